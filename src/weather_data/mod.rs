pub mod daily_metrics;
pub mod error;
pub mod fetcher;
pub mod http;
mod parse;
pub mod yearly_archive;
