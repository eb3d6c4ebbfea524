//! Domain types for inventory aggregation.
//!
//! - [`Record`]: A flat inventory row with pass-through attributes
//! - [`Aggregate`]: Ordered category to running-sum mapping
//! - [`StackConfig`]: Configuration for building a stacked view

mod aggregate;
mod config;
mod record;

pub use aggregate::Aggregate;
pub use config::{KeySampling, StackConfig};
pub use record::{Record, LABEL_FIELD};
