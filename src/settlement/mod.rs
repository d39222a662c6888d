//! Payment and receipt allocation against outstanding invoices.
//!
//! A [`SettlementDraft`] holds the tendered amount and the party's
//! outstanding invoices. The user selects invoices and edits how much to
//! adjust against each; [`SettlementDraft::commit`] succeeds only when the
//! adjustments add up to the tendered amount exactly.
//!
//! # Example
//!
//! ```
//! use khata::core::Money;
//! use khata::settlement::*;
//!
//! let invoices = vec![
//!     OutstandingInvoice::new("SAL/2024-25/0007", Money::from_rupees(300), Money::ZERO),
//!     OutstandingInvoice::new("SAL/2024-25/0009", Money::from_rupees(200), Money::ZERO),
//! ];
//! let mut draft = SettlementDraft::new(
//!     SettlementKind::Receipt,
//!     "CUST-001",
//!     Money::from_rupees(500),
//!     invoices,
//! ).unwrap();
//!
//! draft.toggle("SAL/2024-25/0007").unwrap();
//! draft.toggle("SAL/2024-25/0009").unwrap();
//! let batch = draft.commit().unwrap();
//! assert_eq!(batch.adjustments().len(), 2);
//! ```

mod draft;
mod types;

pub use draft::*;
pub use types::*;
