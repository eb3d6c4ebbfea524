//! Domain types for range labeling.
//!
//! - [`Date`]: Calendar date with month arithmetic
//! - [`Label`]: Display label identifying one time bucket

mod date;
mod label;

pub use date::Date;
pub use label::Label;
