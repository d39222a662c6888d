use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::KhataError;
use super::line::{LineSource, calculate_line};
use super::money::Money;
use super::states::StateCode;
use super::tax::{Locality, TaxSplit};
use super::types::*;

/// Largest manual round-off in either direction (0.99 rupees).
pub const MAX_MANUAL_ROUND_OFF: Money = Money::from_minor(99);

/// Calculate every line of a voucher, in order.
///
/// A failing line reports its position in the error.
pub fn compute_lines<L: LineSource>(
    lines: &[L],
    tax_inclusive: bool,
) -> Result<Vec<ComputedLine>, KhataError> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let amounts = calculate_line(line, tax_inclusive).map_err(|e| e.at_line(i))?;
            Ok(ComputedLine {
                product_ref: line.product_ref().to_string(),
                tax_rate_percent: line.tax_rate_percent(),
                amounts,
            })
        })
        .collect()
}

/// Fold computed lines and header charges into voucher totals.
///
/// Only sums already-rounded line amounts; no rounding happens here except
/// the optional whole-rupee round-off.
pub fn compute_totals(
    lines: &[ComputedLine],
    other_charges: Money,
    round_off: RoundOff,
    seller_state: &StateCode,
    buyer_state: &StateCode,
) -> Result<VoucherTotals, KhataError> {
    if lines.is_empty() {
        return Err(KhataError::EmptyVoucher);
    }
    if other_charges.is_negative() {
        return Err(KhataError::amount("other_charges", "must not be negative"));
    }

    let locality = Locality::between(seller_state, buyer_state);
    let subtotal = Money::checked_sum(lines.iter().map(|l| l.amounts.net), "subtotal")?;
    let total_tax = Money::checked_sum(lines.iter().map(|l| l.amounts.tax), "total tax")?;
    let tax_split = TaxSplit::for_locality(total_tax, locality)?;

    let before_round_off =
        Money::checked_sum([subtotal, total_tax, other_charges], "grand total")?;
    let round_off = match round_off {
        RoundOff::Manual(amount) => {
            if amount.abs() > MAX_MANUAL_ROUND_OFF {
                return Err(KhataError::InvalidRoundOff { amount });
            }
            amount
        }
        RoundOff::NearestRupee => nearest_rupee_round_off(before_round_off)?,
    };
    let grand_total = before_round_off
        .checked_add(round_off)
        .ok_or(KhataError::Overflow {
            context: "grand total",
        })?;

    let breakdown = rate_breakdown(lines, locality)?;

    trace_event!(
        subtotal = %subtotal,
        total_tax = %total_tax,
        grand_total = %grand_total,
        lines = lines.len(),
        "computed voucher totals"
    );

    Ok(VoucherTotals {
        subtotal,
        total_tax,
        tax_split,
        other_charges,
        round_off,
        grand_total,
        breakdown,
    })
}

/// Round-off that brings `amount` to the nearest whole rupee, half away
/// from zero. Always within ±0.50.
pub fn nearest_rupee_round_off(amount: Money) -> Result<Money, KhataError> {
    let rupees = amount
        .to_major()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let rounded = Money::from_major(rupees)?;
    Ok(rounded - amount)
}

fn rate_breakdown(
    lines: &[ComputedLine],
    locality: Locality,
) -> Result<Vec<RateBreakdown>, KhataError> {
    let overflow = || KhataError::Overflow {
        context: "rate breakdown",
    };

    // Decimal orders by value, so 18 and 18.00 share an entry.
    let mut groups: BTreeMap<Decimal, (Money, Money)> = BTreeMap::new();
    for line in lines {
        let entry = groups
            .entry(line.tax_rate_percent.normalize())
            .or_insert((Money::ZERO, Money::ZERO));
        entry.0 = entry.0.checked_add(line.amounts.net).ok_or_else(overflow)?;
        entry.1 = entry.1.checked_add(line.amounts.tax).ok_or_else(overflow)?;
    }

    groups
        .into_iter()
        .map(|(rate, (taxable_amount, tax_amount))| {
            Ok(RateBreakdown {
                tax_rate_percent: rate,
                taxable_amount,
                tax_amount,
                split: TaxSplit::for_locality(tax_amount, locality)?,
            })
        })
        .collect()
}

pub(crate) fn compute_voucher<L: LineSource>(
    voucher: &Voucher<L>,
) -> Result<ComputedVoucher, KhataError> {
    if voucher.lines.is_empty() {
        return Err(KhataError::EmptyVoucher);
    }
    let lines = compute_lines(&voucher.lines, voucher.tax_inclusive)?;
    let totals = compute_totals(
        &lines,
        voucher.other_charges,
        voucher.round_off,
        voucher.seller_state(),
        voucher.buyer_state(),
    )?;
    Ok(ComputedVoucher {
        kind: voucher.kind(),
        locality: voucher.locality(),
        lines,
        totals,
    })
}
