pub mod app;
pub mod model;

pub use app::{App, RunOptions, RunSummary};
