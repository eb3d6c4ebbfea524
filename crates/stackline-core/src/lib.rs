//! # Stackline Core
//!
//! Calendar foundation for the Stackline aggregation engine.
//!
//! - **Types**: [`Date`] with whole-month arithmetic and [`Label`] for bucket names
//! - **Labeling**: [`MonthRangeLabeler`] turns a request window into one display label
//!
//! ## Example
//!
//! ```rust
//! use stackline_core::prelude::*;
//!
//! let label = MonthRangeLabeler::default().label_compact(20190101, 20190301)?;
//! assert_eq!(label.as_str(), "Jan - Mar");
//! # Ok::<(), CoreError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod labeling;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::labeling::{month_sequence, MonthRangeLabeler};
    pub use crate::types::{Date, Label};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use labeling::MonthRangeLabeler;
pub use types::{Date, Label};
