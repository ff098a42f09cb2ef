//! Shared value types used by every tidewater crate.

mod types;

pub use types::{Axis, ColorParseError, Rgb};
