//! Stack layer discovery and binding.
//!
//! - [`resolver`]: which category keys become stacked layers, in what order
//! - [`binder`]: one accessor per layer, reading that layer's height from an aggregate

pub mod binder;
pub mod resolver;

pub use binder::{bind, select, StackLayer};
pub use resolver::{resolve, resolve_group, StackKey};
