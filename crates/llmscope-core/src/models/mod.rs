//! Data models for llmscope

mod filter;
mod log_entry;
mod page;

pub use filter::*;
pub use log_entry::*;
pub use page::*;
