use std::fmt;

use thiserror::Error;

use super::money::Money;

/// Errors produced by the calculation core.
///
/// Every variant is a local validation failure over the given inputs. None is
/// transient, and an operation that fails has applied nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KhataError {
    /// A decimal amount could not be converted to [`Money`].
    #[error("invalid amount for {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    /// A line input is outside its allowed range.
    #[error("{}", fmt_line_input(.line, .field, .reason))]
    InvalidLineInput {
        /// Zero-based line position, when the line belongs to a voucher.
        line: Option<usize>,
        field: LineField,
        reason: String,
    },

    /// A tax amount handed to the split resolver is negative.
    #[error("invalid tax amount {amount}: must not be negative")]
    InvalidTaxAmount { amount: Money },

    /// A voucher was submitted with no lines.
    #[error("voucher must have at least one line")]
    EmptyVoucher,

    /// An adjustment edit is outside `0 < amount <= balance`.
    #[error(
        "adjustment {requested} against invoice {invoice_ref} is out of range (balance {balance})"
    )]
    AdjustmentOutOfRange {
        invoice_ref: String,
        requested: Money,
        balance: Money,
    },

    /// The adjustments do not add up to the tendered amount.
    #[error("settlement mismatch: expected {expected}, adjustments total {actual}")]
    SettlementMismatch { expected: Money, actual: Money },

    /// Not a known GST state code.
    #[error("invalid GST state code '{code}'")]
    InvalidStateCode { code: String },

    /// Manual round-off outside ±0.99.
    #[error("round-off {amount} exceeds ±0.99")]
    InvalidRoundOff { amount: Money },

    /// Outstanding invoice data from the caller is inconsistent.
    #[error("outstanding invoice {invoice_ref} is inconsistent: {reason}")]
    InvalidOutstandingInvoice { invoice_ref: String, reason: String },

    /// Invoice reference is not among the settlement candidates.
    #[error("invoice {invoice_ref} is not an outstanding candidate")]
    UnknownInvoice { invoice_ref: String },

    /// Adjustment edit on an invoice that is not selected.
    #[error("invoice {invoice_ref} is not selected for adjustment")]
    InvoiceNotSelected { invoice_ref: String },

    /// Edit or commit attempted on a settlement that is already committed.
    #[error("settlement with {party_ref} is already committed")]
    SettlementCommitted { party_ref: String },

    /// Arithmetic left the representable range.
    #[error("arithmetic overflow in {context}")]
    Overflow { context: &'static str },

    /// Builder encountered missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Voucher number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// One or more whole-voucher checks failed.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl KhataError {
    pub(crate) fn line_input(field: LineField, reason: impl Into<String>) -> Self {
        Self::InvalidLineInput {
            line: None,
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn amount(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Attach a line position to an `InvalidLineInput` error.
    pub(crate) fn at_line(self, index: usize) -> Self {
        match self {
            Self::InvalidLineInput { field, reason, .. } => Self::InvalidLineInput {
                line: Some(index),
                field,
                reason,
            },
            other => other,
        }
    }
}

fn fmt_line_input(line: &Option<usize>, field: &LineField, reason: &str) -> String {
    match line {
        Some(i) => format!("invalid line input at line {}: {field} {reason}", i + 1),
        None => format!("invalid line input: {field} {reason}"),
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Line input field named by [`KhataError::InvalidLineInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    Quantity,
    UnitRate,
    DiscountPercent,
    TaxRatePercent,
}

impl LineField {
    /// Field name as it appears on the input form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::UnitRate => "unit_rate",
            Self::DiscountPercent => "discount_percent",
            Self::TaxRatePercent => "tax_rate_percent",
        }
    }
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single validation problem with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "lines[2].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    /// A problem at `field` described by `message`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
