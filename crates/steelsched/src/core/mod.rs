//! Configuration and end-to-end processing.
//!
//! - **Configuration** (`config`): loading and discovering [`ValidationConfig`]
//! - **Pipeline** (`pipeline`): parsing a model response and validating the rows it contains
//!
//! # Example
//!
//! ```rust,no_run
//! use steelsched::core::config::ValidationConfig;
//! use steelsched::core::pipeline::process_response_file;
//!
//! # fn main() -> steelsched::Result<()> {
//! let config = ValidationConfig::discover()?.unwrap_or_default();
//! let report = process_response_file("response.json", None, &config)?;
//! println!("{} of {} rows valid", report.valid_rows, report.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod pipeline;

pub use config::ValidationConfig;
pub use pipeline::{process_response, process_response_file};
