use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::KhataError;
use super::line::{LineAmounts, LineSource, PurchaseLine, SalesLine};
use super::money::Money;
use super::states::StateCode;
use super::tax::{Locality, TaxSplit};
use super::totals;

/// Which side of the trade the company is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoucherKind {
    /// Company buys from the party (supplier is the seller).
    Purchase,
    /// Company sells to the party (company is the seller).
    Sales,
}

impl VoucherKind {
    /// Lower-case name, e.g. for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sales => "sales",
        }
    }
}

/// Voucher-level rounding adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOff {
    /// Entered by the user; must lie within ±0.99.
    Manual(Money),
    /// Computed so the grand total is a whole rupee.
    NearestRupee,
}

impl Default for RoundOff {
    fn default() -> Self {
        Self::Manual(Money::ZERO)
    }
}

/// A purchase or sales voucher draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher<L> {
    /// Voucher number, if already assigned.
    pub number: Option<String>,
    pub date: NaiveDate,
    /// Supplier (purchase) or customer (sales).
    pub party_ref: String,
    pub company_state: StateCode,
    pub party_state: StateCode,
    /// Rates on this voucher already include tax.
    pub tax_inclusive: bool,
    pub lines: Vec<L>,
    /// Freight, packing, and other header charges. Not taxed.
    pub other_charges: Money,
    pub round_off: RoundOff,
}

pub type PurchaseVoucher = Voucher<PurchaseLine>;
pub type SalesVoucher = Voucher<SalesLine>;

impl<L: LineSource> Voucher<L> {
    /// Purchase or sales, fixed by the line type.
    pub fn kind(&self) -> VoucherKind {
        L::KIND
    }

    /// State of the supplying side: the party on a purchase, the company on a sale.
    pub fn seller_state(&self) -> &StateCode {
        match L::KIND {
            VoucherKind::Purchase => &self.party_state,
            VoucherKind::Sales => &self.company_state,
        }
    }

    /// State of the receiving side: the company on a purchase, the party on a sale.
    pub fn buyer_state(&self) -> &StateCode {
        match L::KIND {
            VoucherKind::Purchase => &self.company_state,
            VoucherKind::Sales => &self.party_state,
        }
    }

    /// Intrastate or interstate, from the seller and buyer states.
    pub fn locality(&self) -> Locality {
        Locality::between(self.seller_state(), self.buyer_state())
    }

    /// Compute every line and the voucher totals.
    ///
    /// Pure: the same voucher always yields the same result.
    pub fn compute(&self) -> Result<ComputedVoucher, KhataError> {
        totals::compute_voucher(self)
    }
}

/// One line after calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedLine {
    pub product_ref: String,
    pub tax_rate_percent: Decimal,
    pub amounts: LineAmounts,
}

/// Tax summary for one rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub tax_rate_percent: Decimal,
    pub taxable_amount: Money,
    pub tax_amount: Money,
    pub split: TaxSplit,
}

/// Voucher totals.
///
/// `grand_total == subtotal + total_tax + other_charges + round_off`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherTotals {
    /// Sum of line net amounts.
    pub subtotal: Money,
    /// Sum of line tax amounts.
    pub total_tax: Money,
    /// `total_tax` split by locality.
    pub tax_split: TaxSplit,
    pub other_charges: Money,
    pub round_off: Money,
    pub grand_total: Money,
    /// Per-rate summary, ascending by rate.
    pub breakdown: Vec<RateBreakdown>,
}

/// Result of [`Voucher::compute`]: lines in voucher order plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedVoucher {
    pub kind: VoucherKind,
    pub locality: Locality,
    pub lines: Vec<ComputedLine>,
    pub totals: VoucherTotals,
}
