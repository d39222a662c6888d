use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::KhataError;
use super::line::{LineSource, PurchaseLine, SalesLine};
use super::money::Money;
use super::settings::VoucherSettings;
use super::states::StateCode;
use super::types::*;
use super::validation;

/// Builder for purchase and sales vouchers.
///
/// The line type decides the voucher kind.
///
/// ```
/// use khata::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let karnataka = StateCode::new("29").unwrap();
/// let voucher = VoucherBuilder::new(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(), karnataka)
///     .party("SUP-042", StateCode::new("33").unwrap())
///     .add_line(LineBuilder::new("RAW-7", dec!(10), Money::from_rupees(125))
///         .tax_rate_percent(dec!(18))
///         .build_purchase())
///     .build()
///     .unwrap();
/// assert_eq!(voucher.kind(), VoucherKind::Purchase);
/// ```
pub struct VoucherBuilder<L> {
    number: Option<String>,
    date: NaiveDate,
    party: Option<(String, StateCode)>,
    company_state: StateCode,
    tax_inclusive: bool,
    lines: Vec<L>,
    other_charges: Money,
    round_off: RoundOff,
}

impl<L: LineSource> VoucherBuilder<L> {
    /// Start a voucher dated `date` for a company registered in `company_state`.
    pub fn new(date: NaiveDate, company_state: StateCode) -> Self {
        Self {
            number: None,
            date,
            party: None,
            company_state,
            tax_inclusive: false,
            lines: Vec::new(),
            other_charges: Money::ZERO,
            round_off: RoundOff::default(),
        }
    }

    /// Start from company settings: home state, tax-inclusive default and
    /// round-off policy.
    pub fn from_settings(settings: &VoucherSettings, date: NaiveDate) -> Self {
        let round_off = if settings.auto_round_off {
            RoundOff::NearestRupee
        } else {
            RoundOff::default()
        };
        Self {
            tax_inclusive: settings.tax_inclusive,
            round_off,
            ..Self::new(date, settings.company_state.clone())
        }
    }

    /// Set the voucher number (see [`VoucherNumberSequence`](super::VoucherNumberSequence)).
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Supplier for a purchase voucher, customer for a sales voucher.
    pub fn party(mut self, party_ref: impl Into<String>, state: StateCode) -> Self {
        self.party = Some((party_ref.into(), state));
        self
    }

    /// Treat line rates as already including tax.
    pub fn tax_inclusive(mut self, inclusive: bool) -> Self {
        self.tax_inclusive = inclusive;
        self
    }

    /// Append a line. Lines keep their insertion order.
    pub fn add_line(mut self, line: L) -> Self {
        self.lines.push(line);
        self
    }

    /// Set untaxed header charges (freight, packing).
    pub fn other_charges(mut self, amount: Money) -> Self {
        self.other_charges = amount;
        self
    }

    /// Set a manual round-off, allowed within ±0.99.
    pub fn round_off(mut self, amount: Money) -> Self {
        self.round_off = RoundOff::Manual(amount);
        self
    }

    /// Compute the round-off so the grand total is a whole rupee.
    pub fn round_to_nearest_rupee(mut self) -> Self {
        self.round_off = RoundOff::NearestRupee;
        self
    }

    /// Build the voucher and run all whole-voucher checks.
    /// Returns every problem found, not just the first.
    pub fn build(self) -> Result<Voucher<L>, KhataError> {
        let voucher = self.build_unchecked()?;
        if voucher.lines.is_empty() {
            return Err(KhataError::EmptyVoucher);
        }
        let errors = validation::validate_voucher(&voucher);
        if !errors.is_empty() {
            return Err(KhataError::Validation(errors));
        }
        Ok(voucher)
    }

    /// Build without validation, for drafts still being edited.
    pub fn build_unchecked(self) -> Result<Voucher<L>, KhataError> {
        let (party_ref, party_state) = self
            .party
            .ok_or_else(|| KhataError::Builder("party is required".into()))?;
        Ok(Voucher {
            number: self.number,
            date: self.date,
            party_ref,
            company_state: self.company_state,
            party_state,
            tax_inclusive: self.tax_inclusive,
            lines: self.lines,
            other_charges: self.other_charges,
            round_off: self.round_off,
        })
    }
}

/// Builder for purchase and sales lines.
pub struct LineBuilder {
    product_ref: String,
    description: String,
    quantity: Decimal,
    unit_rate: Money,
    discount_percent: Decimal,
    tax_rate_percent: Decimal,
}

impl LineBuilder {
    /// Start a line with no discount and a 0% tax rate.
    pub fn new(product_ref: impl Into<String>, quantity: Decimal, unit_rate: Money) -> Self {
        Self {
            product_ref: product_ref.into(),
            description: String::new(),
            quantity,
            unit_rate,
            discount_percent: Decimal::ZERO,
            tax_rate_percent: Decimal::ZERO,
        }
    }

    /// Set the free-text description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set the discount, 0 to 100 percent.
    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    /// Set the GST rate in percent, e.g. `dec!(18)`.
    pub fn tax_rate_percent(mut self, percent: Decimal) -> Self {
        self.tax_rate_percent = percent;
        self
    }

    /// Finish as a purchase line; the unit rate becomes the purchase rate.
    pub fn build_purchase(self) -> PurchaseLine {
        PurchaseLine {
            product_ref: self.product_ref,
            description: self.description,
            quantity: self.quantity,
            purchase_rate: self.unit_rate,
            discount_percent: self.discount_percent,
            tax_rate_percent: self.tax_rate_percent,
            batch_no: None,
        }
    }

    /// Finish as a sales line; the unit rate becomes the selling price.
    pub fn build_sales(self) -> SalesLine {
        SalesLine {
            product_ref: self.product_ref,
            description: self.description,
            quantity: self.quantity,
            selling_price: self.unit_rate,
            discount_percent: self.discount_percent,
            tax_rate_percent: self.tax_rate_percent,
            mrp: None,
        }
    }
}
