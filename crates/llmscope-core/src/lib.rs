//! # llmscope
//!
//! Analytics over logged LLM API requests.
//!
//! llmscope filters, aggregates and paginates collections of recorded LLM
//! calls: the computations behind a request-log dashboard, independent of any
//! rendering.
//!
//! ## Architecture
//!
//! - **Models**: log entries, filter criteria and page state
//! - **Source**: async producers of entries (mock generator, recorded JSON)
//! - **Query**: stable field, date-range and free-text filtering
//! - **Aggregate**: metric cards, model distribution, daily performance
//! - **Pager**: fixed-size page slicing
//! - **View**: explicit state tying the pieces together for a front end
//!
//! ## Quick Start
//!
//! ```bash
//! # Dashboard metrics over 100 mock entries
//! llmscope summary
//!
//! # Second page of failed gpt-4-turbo calls mentioning "timeout"
//! llmscope logs --model gpt-4-turbo --status error --search timeout --page 2
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod pager;
pub mod query;
pub mod source;
pub mod view;

#[cfg(test)]
mod fixtures;

pub use crate::config::Config;
pub use crate::error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::source::{DataSource, MockDataSource, StaticDataSource};
    pub use crate::view::{FetchTicket, LogsView};
}
