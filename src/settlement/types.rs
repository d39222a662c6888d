use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{KhataError, Money};

/// Direction of the money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementKind {
    /// Company pays a supplier against purchase invoices.
    Payment,
    /// Company receives from a customer against sales invoices.
    Receipt,
}

/// An unpaid or partly paid invoice, as fetched for the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingInvoice {
    pub invoice_ref: String,
    pub invoice_date: Option<NaiveDate>,
    pub invoice_amount: Money,
    pub paid_amount: Money,
    /// `invoice_amount - paid_amount`.
    pub balance_amount: Money,
}

impl OutstandingInvoice {
    /// Build with the balance derived from amount and paid.
    ///
    /// If the difference does not fit, the balance is left at zero and
    /// [`check`](Self::check) rejects the record.
    pub fn new(invoice_ref: impl Into<String>, invoice_amount: Money, paid_amount: Money) -> Self {
        Self {
            invoice_ref: invoice_ref.into(),
            invoice_date: None,
            invoice_amount,
            paid_amount,
            balance_amount: invoice_amount
                .checked_sub(paid_amount)
                .unwrap_or(Money::ZERO),
        }
    }

    /// Attach the invoice date, for display and ordering by the caller.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = Some(date);
        self
    }

    /// Check the record is a consistent settlement candidate.
    pub fn check(&self) -> Result<(), KhataError> {
        let fail = |reason: &str| {
            Err(KhataError::InvalidOutstandingInvoice {
                invoice_ref: self.invoice_ref.clone(),
                reason: reason.into(),
            })
        };
        if self.invoice_ref.trim().is_empty() {
            return fail("invoice reference is empty");
        }
        if self.paid_amount.is_negative() {
            return fail("paid amount is negative");
        }
        if self.invoice_amount.checked_sub(self.paid_amount) != Some(self.balance_amount) {
            return fail("balance does not equal invoice amount minus paid amount");
        }
        if !self.balance_amount.is_positive() {
            return fail("invoice has no outstanding balance");
        }
        Ok(())
    }
}

/// Amount applied against one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAdjustment {
    pub invoice_ref: String,
    pub invoice_amount: Money,
    pub adjusted_amount: Money,
}

/// Draft lifecycle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementPhase {
    /// No invoice selected yet.
    Selecting,
    /// At least one invoice selected; amounts may be edited.
    Adjusting,
    /// Batch produced. Terminal: nothing can change any more.
    Committed,
}

/// A committed settlement, ready to hand to the API client.
///
/// Only [`SettlementDraft::commit`](super::SettlementDraft::commit) creates
/// one, so the adjustments always add up to the tendered amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementBatch {
    pub(super) kind: SettlementKind,
    pub(super) party_ref: String,
    pub(super) tendered_amount: Money,
    pub(super) adjustments: Vec<InvoiceAdjustment>,
}

impl SettlementBatch {
    /// Payment or receipt.
    pub fn kind(&self) -> SettlementKind {
        self.kind
    }

    /// The supplier or customer settled with.
    pub fn party_ref(&self) -> &str {
        &self.party_ref
    }

    /// Amount paid or received; equals the sum of the adjustments.
    pub fn tendered_amount(&self) -> Money {
        self.tendered_amount
    }

    /// Adjustments in candidate-list order.
    pub fn adjustments(&self) -> &[InvoiceAdjustment] {
        &self.adjustments
    }
}
