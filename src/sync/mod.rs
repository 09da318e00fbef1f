pub mod error;
pub mod outcome;
pub mod plan;
pub mod synchronizer;
