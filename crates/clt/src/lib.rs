//! Command-line front end for the CLT simulator
//!
//! Loads a run configuration, sets up logging, and renders the results of
//! [`clt_core::simulate`] as a text report and an optional JSON artifact.

pub mod io;
pub mod logging;
pub mod report;
pub mod settings;

pub use logging::init_logging;
pub use settings::{Overrides, RunConfig};
