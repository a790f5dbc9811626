//! Chart data model and JSON loading.
//!
//! A chart file pairs song metadata with a flat note list:
//! - [`Chart`]: parsed chart (metadata + notes)
//! - [`ChartLoader`]: file loading and chart-directory scanning

mod chart;
mod error;
mod loader;

pub use chart::*;
pub use error::*;
pub use loader::*;
