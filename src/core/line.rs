use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::{KhataError, LineField};
use super::money::{Money, round_to_minor};
use super::types::VoucherKind;

/// Calculator inputs of a voucher line.
///
/// Purchase and sales lines name their fields differently but feed the same
/// calculation through this trait.
pub trait LineSource {
    /// Voucher kind this line shape belongs to.
    const KIND: VoucherKind;

    fn product_ref(&self) -> &str;
    fn description(&self) -> &str;
    fn quantity(&self) -> Decimal;
    /// Per-unit rate before discount and (for exclusive vouchers) before tax.
    fn unit_rate(&self) -> Money;
    fn discount_percent(&self) -> Decimal;
    fn tax_rate_percent(&self) -> Decimal;
}

/// A purchase voucher line: goods bought from a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub product_ref: String,
    pub description: String,
    pub quantity: Decimal,
    /// Supplier's rate per unit.
    pub purchase_rate: Money,
    pub discount_percent: Decimal,
    pub tax_rate_percent: Decimal,
    /// Supplier batch number, if tracked.
    pub batch_no: Option<String>,
}

impl LineSource for PurchaseLine {
    const KIND: VoucherKind = VoucherKind::Purchase;

    fn product_ref(&self) -> &str {
        &self.product_ref
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_rate(&self) -> Money {
        self.purchase_rate
    }

    fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }
}

/// A sales voucher line: goods sold to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesLine {
    pub product_ref: String,
    pub description: String,
    pub quantity: Decimal,
    /// Selling price per unit.
    pub selling_price: Money,
    pub discount_percent: Decimal,
    pub tax_rate_percent: Decimal,
    /// Printed maximum retail price, shown on the bill only.
    pub mrp: Option<Money>,
}

impl LineSource for SalesLine {
    const KIND: VoucherKind = VoucherKind::Sales;

    fn product_ref(&self) -> &str {
        &self.product_ref
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_rate(&self) -> Money {
        self.selling_price
    }

    fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }
}

/// Derived amounts of one line. `gross == net + tax` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineAmounts {
    /// `quantity * unit_rate`, rounded.
    pub before_discount: Money,
    pub discount: Money,
    /// Taxable value.
    pub net: Money,
    pub tax: Money,
    pub gross: Money,
}

/// Compute net, tax, and gross for a line.
///
/// Rounds to the paisa (half away from zero) after the rate, after the
/// discount, and after the tax, in that order. With `tax_inclusive` the rate
/// already contains tax and the taxable value is backed out of it.
pub fn calculate_line<L: LineSource + ?Sized>(
    line: &L,
    tax_inclusive: bool,
) -> Result<LineAmounts, KhataError> {
    let quantity = line.quantity();
    let unit_rate = line.unit_rate();
    let discount_percent = line.discount_percent();
    let tax_rate = line.tax_rate_percent();

    if quantity <= Decimal::ZERO {
        return Err(KhataError::line_input(
            LineField::Quantity,
            "must be greater than zero",
        ));
    }
    if unit_rate.is_negative() {
        return Err(KhataError::line_input(
            LineField::UnitRate,
            "must not be negative",
        ));
    }
    if discount_percent < Decimal::ZERO || discount_percent > dec!(100) {
        return Err(KhataError::line_input(
            LineField::DiscountPercent,
            "must be between 0 and 100",
        ));
    }
    if tax_rate < Decimal::ZERO {
        return Err(KhataError::line_input(
            LineField::TaxRatePercent,
            "must not be negative",
        ));
    }

    let overflow = || KhataError::Overflow {
        context: "line amount",
    };

    let before_discount = quantity
        .checked_mul(Decimal::from(unit_rate.minor()))
        .and_then(round_to_minor)
        .ok_or_else(overflow)?;

    let discount = percent_of(before_discount, discount_percent).ok_or_else(overflow)?;
    let net_of_discount = before_discount - discount;

    let (net, tax) = if tax_inclusive {
        let net = Decimal::from(net_of_discount.minor())
            .checked_mul(dec!(100))
            .and_then(|v| dec!(100).checked_add(tax_rate).and_then(|d| v.checked_div(d)))
            .and_then(round_to_minor)
            .ok_or_else(overflow)?;
        (net, net_of_discount - net)
    } else {
        let tax = percent_of(net_of_discount, tax_rate).ok_or_else(overflow)?;
        (net_of_discount, tax)
    };

    let gross = net.checked_add(tax).ok_or_else(overflow)?;

    Ok(LineAmounts {
        before_discount,
        discount,
        net,
        tax,
        gross,
    })
}

/// `round(amount * percent / 100)`.
fn percent_of(amount: Money, percent: Decimal) -> Option<Money> {
    Decimal::from(amount.minor())
        .checked_mul(percent)
        .and_then(|v| v.checked_div(dec!(100)))
        .and_then(round_to_minor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(qty: Decimal, rate: i64, discount: Decimal, tax: Decimal) -> SalesLine {
        SalesLine {
            product_ref: "SKU-1".into(),
            description: String::new(),
            quantity: qty,
            selling_price: Money::from_minor(rate),
            discount_percent: discount,
            tax_rate_percent: tax,
            mrp: None,
        }
    }

    #[test]
    fn exclusive_line_with_discount() {
        let amounts = calculate_line(&sales(dec!(2), 50_000, dec!(10), dec!(18)), false).unwrap();
        assert_eq!(amounts.before_discount, Money::from_minor(100_000));
        assert_eq!(amounts.discount, Money::from_minor(10_000));
        assert_eq!(amounts.net, Money::from_minor(90_000));
        assert_eq!(amounts.tax, Money::from_minor(16_200));
        assert_eq!(amounts.gross, Money::from_minor(106_200));
    }

    #[test]
    fn inclusive_line_backs_out_tax() {
        // 2 x 590.00 less 10% = 1062.00 inclusive of 18%
        let amounts = calculate_line(&sales(dec!(2), 59_000, dec!(10), dec!(18)), true).unwrap();
        assert_eq!(amounts.net, Money::from_minor(90_000));
        assert_eq!(amounts.tax, Money::from_minor(16_200));
        assert_eq!(amounts.gross, Money::from_minor(106_200));
    }

    #[test]
    fn inclusive_gross_equals_discounted_amount() {
        let amounts = calculate_line(&sales(dec!(3), 9_999, dec!(0), dec!(12)), true).unwrap();
        assert_eq!(amounts.gross, Money::from_minor(29_997));
        assert_eq!(amounts.net + amounts.tax, amounts.gross);
    }

    #[test]
    fn fractional_quantity_rounds_once() {
        // 1.5 kg at 33.33 = 49.995 -> 50.00
        let amounts = calculate_line(&sales(dec!(1.5), 3_333, dec!(0), dec!(5)), false).unwrap();
        assert_eq!(amounts.before_discount, Money::from_minor(5_000));
        assert_eq!(amounts.tax, Money::from_minor(250));
    }

    #[test]
    fn zero_rate_is_allowed() {
        let amounts = calculate_line(&sales(dec!(1), 0, dec!(0), dec!(18)), false).unwrap();
        assert_eq!(amounts.gross, Money::ZERO);
    }

    #[test]
    fn full_discount_leaves_nothing() {
        let amounts = calculate_line(&sales(dec!(4), 12_345, dec!(100), dec!(28)), false).unwrap();
        assert_eq!(amounts.net, Money::ZERO);
        assert_eq!(amounts.tax, Money::ZERO);
    }

    #[test]
    fn rejects_bad_inputs() {
        let cases = [
            (sales(dec!(0), 100, dec!(0), dec!(0)), LineField::Quantity),
            (sales(dec!(-1), 100, dec!(0), dec!(0)), LineField::Quantity),
            (sales(dec!(1), -100, dec!(0), dec!(0)), LineField::UnitRate),
            (sales(dec!(1), 100, dec!(-0.5), dec!(0)), LineField::DiscountPercent),
            (sales(dec!(1), 100, dec!(100.01), dec!(0)), LineField::DiscountPercent),
            (sales(dec!(1), 100, dec!(0), dec!(-5)), LineField::TaxRatePercent),
        ];
        for (line, expected) in cases {
            match calculate_line(&line, false) {
                Err(KhataError::InvalidLineInput { field, line: None, .. }) => {
                    assert_eq!(field, expected)
                }
                other => panic!("expected {expected} error, got {other:?}"),
            }
        }
    }

    #[test]
    fn purchase_line_uses_purchase_rate() {
        let line = PurchaseLine {
            product_ref: "RAW-7".into(),
            description: "Copper wire".into(),
            quantity: dec!(10),
            purchase_rate: Money::from_minor(1_250),
            discount_percent: dec!(0),
            tax_rate_percent: dec!(18),
            batch_no: Some("B-19".into()),
        };
        let amounts = calculate_line(&line, false).unwrap();
        assert_eq!(amounts.net, Money::from_minor(12_500));
        assert_eq!(amounts.tax, Money::from_minor(2_250));
    }
}
