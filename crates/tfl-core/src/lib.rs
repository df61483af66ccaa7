//! tfl-core: shared foundation for the tablefluid workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)
//! - timing (opt-in call timers for the evaluation tiers)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TfError, TfResult};
pub use numeric::*;
pub use units::*;
