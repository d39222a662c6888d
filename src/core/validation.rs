use super::error::{KhataError, ValidationError};
use super::line::{LineSource, calculate_line};
use super::totals::MAX_MANUAL_ROUND_OFF;
use super::types::{RoundOff, Voucher};

/// Check a voucher draft and return every problem found (not just the
/// first), with field paths suitable for form rendering.
pub fn validate_voucher<L: LineSource>(voucher: &Voucher<L>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if voucher.party_ref.trim().is_empty() {
        errors.push(ValidationError::new("party_ref", "party must not be empty"));
    }

    if voucher.lines.is_empty() {
        errors.push(ValidationError::new(
            "lines",
            "voucher must have at least one line",
        ));
    }

    for (i, line) in voucher.lines.iter().enumerate() {
        validate_line(line, voucher.tax_inclusive, i, &mut errors);
    }

    if voucher.other_charges.is_negative() {
        errors.push(ValidationError::new(
            "other_charges",
            "other charges must not be negative",
        ));
    }

    if let RoundOff::Manual(amount) = voucher.round_off {
        if amount.abs() > MAX_MANUAL_ROUND_OFF {
            errors.push(ValidationError::new(
                "round_off",
                format!("round-off {amount} exceeds ±0.99"),
            ));
        }
    }

    errors
}

fn validate_line<L: LineSource>(
    line: &L,
    tax_inclusive: bool,
    index: usize,
    errors: &mut Vec<ValidationError>,
) {
    if line.product_ref().trim().is_empty() {
        errors.push(ValidationError::new(
            format!("lines[{index}].product_ref"),
            "product must not be empty",
        ));
    }

    match calculate_line(line, tax_inclusive) {
        Ok(_) => {}
        Err(KhataError::InvalidLineInput { field, reason, .. }) => {
            errors.push(ValidationError::new(
                format!("lines[{index}].{field}"),
                format!("{field} {reason}"),
            ));
        }
        Err(other) => {
            errors.push(ValidationError::new(format!("lines[{index}]"), other.to_string()));
        }
    }
}
