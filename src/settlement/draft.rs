use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::core::{KhataError, Money};

/// Whether a candidate invoice takes part in the settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    NotSelected,
    /// Selected with an amount already checked against the balance.
    Selected { adjusted: Money },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Candidate {
    invoice: OutstandingInvoice,
    selection: Selection,
}

/// A payment or receipt being allocated across a party's invoices.
///
/// Every mutator either applies fully or returns an error and leaves the
/// draft untouched. Once committed the draft is frozen: further edits and a
/// second commit fail with [`KhataError::SettlementCommitted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementDraft {
    kind: SettlementKind,
    party_ref: String,
    tendered_amount: Money,
    candidates: Vec<Candidate>,
    committed: bool,
}

impl SettlementDraft {
    /// Start a draft with nothing selected.
    ///
    /// Fails if the tendered amount is not positive, or if any candidate is
    /// inconsistent or listed twice.
    pub fn new(
        kind: SettlementKind,
        party_ref: impl Into<String>,
        tendered_amount: Money,
        invoices: Vec<OutstandingInvoice>,
    ) -> Result<Self, KhataError> {
        check_tendered(tendered_amount)?;

        let mut seen = HashSet::new();
        for invoice in &invoices {
            invoice.check()?;
            if !seen.insert(invoice.invoice_ref.as_str()) {
                return Err(KhataError::InvalidOutstandingInvoice {
                    invoice_ref: invoice.invoice_ref.clone(),
                    reason: "listed more than once".into(),
                });
            }
        }

        let candidates = invoices
            .into_iter()
            .map(|invoice| Candidate {
                invoice,
                selection: Selection::NotSelected,
            })
            .collect();

        Ok(Self {
            kind,
            party_ref: party_ref.into(),
            tendered_amount,
            candidates,
            committed: false,
        })
    }

    /// Payment to a supplier or receipt from a customer.
    pub fn kind(&self) -> SettlementKind {
        self.kind
    }

    /// The supplier or customer being settled with.
    pub fn party_ref(&self) -> &str {
        &self.party_ref
    }

    /// Amount paid or received, to be allocated in full.
    pub fn tendered_amount(&self) -> Money {
        self.tendered_amount
    }

    /// Change the tendered amount. Selections are kept.
    pub fn set_tendered(&mut self, amount: Money) -> Result<(), KhataError> {
        self.ensure_open()?;
        check_tendered(amount)?;
        self.tendered_amount = amount;
        Ok(())
    }

    /// Where the draft is in its lifecycle.
    pub fn phase(&self) -> SettlementPhase {
        if self.committed {
            SettlementPhase::Committed
        } else if self
            .candidates
            .iter()
            .any(|c| matches!(c.selection, Selection::Selected { .. }))
        {
            SettlementPhase::Adjusting
        } else {
            SettlementPhase::Selecting
        }
    }

    /// Candidates in the order they were supplied, with their selection.
    pub fn candidates(&self) -> impl Iterator<Item = (&OutstandingInvoice, Selection)> {
        self.candidates.iter().map(|c| (&c.invoice, c.selection))
    }

    /// Current selection of one candidate.
    pub fn selection(&self, invoice_ref: &str) -> Result<Selection, KhataError> {
        Ok(self.find(invoice_ref)?.1.selection)
    }

    /// Flip selection of an invoice. Selecting defaults the adjustment to the
    /// full balance; deselecting drops it from the set.
    ///
    /// Returns whether the invoice is now selected.
    pub fn toggle(&mut self, invoice_ref: &str) -> Result<bool, KhataError> {
        self.ensure_open()?;
        let index = self.find(invoice_ref)?.0;
        let candidate = &mut self.candidates[index];
        candidate.selection = match candidate.selection {
            Selection::NotSelected => Selection::Selected {
                adjusted: candidate.invoice.balance_amount,
            },
            Selection::Selected { .. } => Selection::NotSelected,
        };
        Ok(matches!(candidate.selection, Selection::Selected { .. }))
    }

    /// Select an invoice at its full balance. Already selected invoices keep
    /// their edited amount.
    pub fn select(&mut self, invoice_ref: &str) -> Result<(), KhataError> {
        self.ensure_open()?;
        if let Selection::NotSelected = self.selection(invoice_ref)? {
            self.toggle(invoice_ref)?;
        }
        Ok(())
    }

    /// Drop an invoice from the adjustment set. No-op if not selected.
    pub fn deselect(&mut self, invoice_ref: &str) -> Result<(), KhataError> {
        self.ensure_open()?;
        let index = self.find(invoice_ref)?.0;
        self.candidates[index].selection = Selection::NotSelected;
        Ok(())
    }

    /// Edit the amount adjusted against a selected invoice.
    ///
    /// The amount must satisfy `0 < amount <= balance`; otherwise the
    /// previous amount stays in place.
    pub fn set_adjusted_amount(&mut self, invoice_ref: &str, amount: Money) -> Result<(), KhataError> {
        self.ensure_open()?;
        let index = self.find(invoice_ref)?.0;
        let candidate = &mut self.candidates[index];
        if candidate.selection == Selection::NotSelected {
            return Err(KhataError::InvoiceNotSelected {
                invoice_ref: invoice_ref.into(),
            });
        }
        let balance = candidate.invoice.balance_amount;
        if !amount.is_positive() || amount > balance {
            debug_event!(
                invoice_ref,
                requested = %amount,
                balance = %balance,
                "adjustment out of range"
            );
            return Err(KhataError::AdjustmentOutOfRange {
                invoice_ref: invoice_ref.into(),
                requested: amount,
                balance,
            });
        }
        candidate.selection = Selection::Selected { adjusted: amount };
        Ok(())
    }

    /// Selected invoices with their amounts, in candidate order.
    pub fn adjustments(&self) -> Vec<InvoiceAdjustment> {
        self.candidates
            .iter()
            .filter_map(|c| match c.selection {
                Selection::Selected { adjusted } => Some(InvoiceAdjustment {
                    invoice_ref: c.invoice.invoice_ref.clone(),
                    invoice_amount: c.invoice.invoice_amount,
                    adjusted_amount: adjusted,
                }),
                Selection::NotSelected => None,
            })
            .collect()
    }

    /// Sum of the selected adjustments.
    pub fn allocated(&self) -> Result<Money, KhataError> {
        Money::checked_sum(
            self.candidates.iter().filter_map(|c| match c.selection {
                Selection::Selected { adjusted } => Some(adjusted),
                Selection::NotSelected => None,
            }),
            "settlement allocation",
        )
    }

    /// Tendered minus allocated. Negative when over-allocated.
    pub fn unallocated(&self) -> Result<Money, KhataError> {
        self.tendered_amount
            .checked_sub(self.allocated()?)
            .ok_or(KhataError::Overflow {
                context: "settlement allocation",
            })
    }

    /// Produce the batch if the adjustments equal the tendered amount to the
    /// paisa, and freeze the draft. On mismatch the draft stays as it is and
    /// remains editable.
    pub fn commit(&mut self) -> Result<SettlementBatch, KhataError> {
        self.ensure_open()?;
        let actual = self.allocated()?;
        if actual != self.tendered_amount {
            debug_event!(
                party_ref = %self.party_ref,
                expected = %self.tendered_amount,
                actual = %actual,
                "settlement commit rejected"
            );
            return Err(KhataError::SettlementMismatch {
                expected: self.tendered_amount,
                actual,
            });
        }
        let batch = SettlementBatch {
            kind: self.kind,
            party_ref: self.party_ref.clone(),
            tendered_amount: self.tendered_amount,
            adjustments: self.adjustments(),
        };
        self.committed = true;
        debug_event!(
            party_ref = %self.party_ref,
            tendered = %self.tendered_amount,
            invoices = batch.adjustments.len(),
            "settlement committed"
        );
        Ok(batch)
    }

    fn ensure_open(&self) -> Result<(), KhataError> {
        if self.committed {
            return Err(KhataError::SettlementCommitted {
                party_ref: self.party_ref.clone(),
            });
        }
        Ok(())
    }

    fn find(&self, invoice_ref: &str) -> Result<(usize, &Candidate), KhataError> {
        self.candidates
            .iter()
            .enumerate()
            .find(|(_, c)| c.invoice.invoice_ref == invoice_ref)
            .ok_or_else(|| KhataError::UnknownInvoice {
                invoice_ref: invoice_ref.into(),
            })
    }
}

fn check_tendered(amount: Money) -> Result<(), KhataError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(KhataError::amount(
            "tendered_amount",
            "must be greater than zero",
        ))
    }
}
