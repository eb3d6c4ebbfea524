//! Record bucketing.
//!
//! A [`BucketIndex`] partitions records by one derived key and keeps one
//! reduced value per bucket up to date as records are added and removed.
//! The index is an ordinary owned value: create it where the data arrives,
//! pass it by reference to whoever queries it, and drop it when done.
//!
//! # Example
//!
//! ```rust
//! use stackline_core::Label;
//! use stackline_inventory::bucketing::BucketIndex;
//! use stackline_inventory::reducer::CategorySumReducer;
//! use stackline_inventory::tagging::tagged;
//! use stackline_inventory::types::Record;
//!
//! let label = Label::from("Jan");
//! let records = tagged(
//!     vec![Record::new("Shirt", 25), Record::new("T-Shirt", 25)],
//!     &label,
//! )?;
//!
//! let mut index = BucketIndex::by_label(CategorySumReducer::default());
//! index.add(records)?;
//!
//! let group = index.group();
//! assert_eq!(group.len(), 1);
//! assert_eq!(group[0].value.get("Shirt"), 25);
//! # Ok::<(), stackline_inventory::InventoryError>(())
//! ```

mod group;
mod index;

pub use group::{BucketGroup, RecordId};
pub use index::{BucketIndex, Members};
