//! # Stackline Inventory
//!
//! Incremental aggregation of inventory records into stacked-chart layers.
//!
//! Records from one report are stamped with a month-range label, bucketed by
//! that label, and reduced into per-category running sums that stay correct
//! under incremental add and remove. The categories present in the aggregate
//! become the layers of a stacked chart, each with its own accessor.
//!
//! ## Design Philosophy
//!
//! - **Explicit ownership**: the [`BucketIndex`] is created, passed by reference and dropped by its caller
//! - **Ordered aggregates**: [`Aggregate`] keeps categories in first-seen order
//! - **Reducer law**: `remove` exactly undoes `add`, so updates never rescan a bucket
//! - **Checked sums**: a running sum that would overflow is an error, never a wrap
//! - **Rejected vs. empty**: an invalid window is an error; a window with no rows is an empty chart
//!
//! ## Quick Start
//!
//! ```rust
//! use stackline_inventory::prelude::*;
//!
//! let json = r#"{
//!     "request": { "type": "INVENTORY", "fromDate": 20190112, "toDate": 20190115, "views": [] },
//!     "data": { "records": [
//!         { "category": "Shirt", "totalunits": 25 },
//!         { "category": "T-Shirt", "totalunits": 25 }
//!     ] },
//!     "error": false
//! }"#;
//!
//! let chart = StackedChart::from_json(json, &StackConfig::default())?;
//! assert_eq!(chart.label().as_str(), "Jan");
//! assert_eq!(chart.keys(), ["Shirt", "T-Shirt"]);
//! # Ok::<(), InventoryError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`bucketing`] - Bucket index with incremental maintenance
//! - [`pipeline`] - End-to-end chart construction
//! - [`reducer`] - Reducer capability and built-in reducers
//! - [`report`] - Report payload model
//! - [`stacking`] - Stack key resolution and layer accessors
//! - [`tagging`] - Record labeling
//! - [`types`] - Records, aggregates and configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bucketing;
pub mod error;
pub mod pipeline;
pub mod reducer;
pub mod report;
pub mod stacking;
pub mod tagging;
pub mod types;

// Re-export error types at crate root
pub use error::{InventoryError, InventoryResult};

pub use bucketing::{BucketGroup, BucketIndex, RecordId};
pub use pipeline::{Series, StackedChart};
pub use reducer::{CategorySumReducer, CountReducer, Reducer, SumReducer};
pub use report::{InventoryReport, ReportData, ReportRequest};
pub use stacking::{bind, resolve, resolve_group, select, StackKey, StackLayer};
pub use tagging::{tag, tagged};
pub use types::{Aggregate, KeySampling, Record, StackConfig};

/// Prelude module for convenient imports.
///
/// ```rust
/// use stackline_inventory::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bucketing::{BucketGroup, BucketIndex, RecordId};
    pub use crate::error::{InventoryError, InventoryResult};
    pub use crate::pipeline::{Series, StackedChart};
    pub use crate::reducer::{CategorySumReducer, CountReducer, Reducer, SumReducer};
    pub use crate::report::InventoryReport;
    pub use crate::stacking::{bind, resolve, resolve_group, select, StackKey, StackLayer};
    pub use crate::tagging::{tag, tagged};
    pub use crate::types::{Aggregate, KeySampling, Record, StackConfig};

    // Re-export commonly used types from the core crate
    pub use stackline_core::{Date, Label, MonthRangeLabeler};
}
