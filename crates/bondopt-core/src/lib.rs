//! # Bondopt Core
//!
//! Core types for screening and optimizing portfolios from a static bond
//! universe.
//!
//! - **Types**: [`Bond`], [`Classification`], [`ClassLevel`], [`Rating`],
//!   [`TargetMetric`], [`Date`]
//! - **Universe**: the immutable, alias-unique snapshot every request reads
//!
//! ## Example
//!
//! ```rust
//! use bondopt_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bond = Bond::builder()
//!     .alias("US0001")
//!     .classification(Classification::new("Corporate", "Industrials", "Energy", "Midstream"))
//!     .rating("BBB")
//!     .effective_date(Date::from_ymd(2023, 3, 31).unwrap())
//!     .effective_duration(6.2)
//!     .market_value(dec!(1_000_000))
//!     .oas(1.85)
//!     .ytm(5.4)
//!     .build()
//!     .unwrap();
//!
//! let universe = Universe::new(vec![bond]).unwrap();
//! assert_eq!(universe.distinct_classes(ClassLevel::Two), vec!["Industrials"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;
pub mod universe;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Bond, BondBuilder, ClassLevel, Classification, Date, Rating, TargetMetric,
    };
    pub use crate::universe::Universe;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Bond, BondBuilder, ClassLevel, Classification, Date, Rating, TargetMetric};
pub use universe::Universe;
