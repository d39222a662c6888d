#![no_main]

use khata::core::{LineBuilder, Money, calculate_line};
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

type RawDecimal = (u32, u32, u32, bool, u32);

/// Any representable decimal, up to `Decimal::MAX` in magnitude.
fn decimal((lo, mid, hi, negative, scale): RawDecimal) -> Decimal {
    Decimal::from_parts(lo, mid, hi, negative, scale % 29)
}

fuzz_target!(|data: (RawDecimal, i64, RawDecimal, RawDecimal, bool)| {
    let (qty, rate, discount, tax, inclusive) = data;
    let line = LineBuilder::new("F", decimal(qty), Money::from_minor(rate))
        .discount_percent(decimal(discount))
        .tax_rate_percent(decimal(tax))
        .build_sales();
    // Errors are fine, panics are bugs.
    if let Ok(amounts) = calculate_line(&line, inclusive) {
        assert_eq!(amounts.gross, amounts.net + amounts.tax);
    }
});
