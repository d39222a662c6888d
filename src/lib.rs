//! # khata
//!
//! Tax and settlement calculation core for GST purchase/sales vouchers and
//! payment/receipt reconciliation.
//!
//! All monetary values are [`Money`](crate::core::Money): an integer count of
//! paisa. Decimal values ([`rust_decimal::Decimal`]) appear only at the two
//! conversion edges, never in intermediate arithmetic.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use khata::core::*;
//! use rust_decimal_macros::dec;
//!
//! let maharashtra = StateCode::new("27").unwrap();
//! let voucher = VoucherBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), maharashtra.clone())
//!     .party("CUST-001", maharashtra)
//!     .add_line(
//!         LineBuilder::new("SKU-1", dec!(2), Money::from_minor(50_000))
//!             .discount_percent(dec!(10))
//!             .tax_rate_percent(dec!(18))
//!             .build_sales(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let computed = voucher.compute().unwrap();
//! assert_eq!(computed.totals.subtotal, Money::from_minor(90_000));
//! assert_eq!(computed.totals.tax_split.cgst, Money::from_minor(8_100));
//! assert_eq!(computed.totals.grand_total.to_major(), dec!(1062.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Money, line calculator, tax split, voucher totals, numbering |
//! | `settlement` | Payment/receipt allocation against outstanding invoices |
//! | `display` | `₹` formatting with Indian digit grouping |
//! | `tracing` | Emit `tracing` events for rejected edits and commits |
//! | `all` | Everything |

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "settlement")]
pub mod settlement;

#[cfg(feature = "display")]
pub mod display;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
