pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod render;
pub mod table;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result, FATAL_EXIT_CODE};
pub use table::ExtractedTable;
pub use workflow::Workflow;
