pub mod dates;
pub mod observation;
