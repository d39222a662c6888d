use chrono::{Datelike, NaiveDate};

use super::error::KhataError;

/// Starting calendar year of the April–March financial year containing `date`.
pub fn financial_year_start(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

/// `"2024-25"` style label for a financial year starting in `start_year`.
pub fn financial_year_label(start_year: i32) -> String {
    format!("{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

/// Gapless voucher number sequence within a financial year.
///
/// Generates numbers in the format `{prefix}/{fy}/{sequential}`,
/// e.g. "SAL/2024-25/0001". The counter restarts at 1 each April.
#[derive(Debug, Clone)]
pub struct VoucherNumberSequence {
    prefix: String,
    fy_start: i32,
    next_number: u64,
    zero_pad: usize,
}

impl VoucherNumberSequence {
    /// Create a new sequence starting at 1 for the financial year beginning
    /// in `fy_start`.
    pub fn new(prefix: impl Into<String>, fy_start: i32) -> Self {
        Self {
            prefix: prefix.into(),
            fy_start,
            next_number: 1,
            zero_pad: 4,
        }
    }

    /// Create a sequence for the financial year containing `date`.
    pub fn for_date(prefix: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(prefix, financial_year_start(date))
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, fy_start: i32, next_number: u64) -> Self {
        Self {
            next_number,
            ..Self::new(prefix, fy_start)
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Consume and return the next number in the sequence.
    pub fn next_number(&mut self) -> String {
        let formatted = self.format(self.next_number);
        self.next_number += 1;
        formatted
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    /// Starting calendar year of the current financial year.
    pub fn financial_year(&self) -> i32 {
        self.fy_start
    }

    /// The counter value the next number will use.
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Move to a later financial year, resetting the counter to 1.
    pub fn advance_year(&mut self, fy_start: i32) -> Result<(), KhataError> {
        if fy_start <= self.fy_start {
            return Err(KhataError::Numbering(format!(
                "financial year {} must be after current financial year {}",
                financial_year_label(fy_start),
                financial_year_label(self.fy_start)
            )));
        }
        self.fy_start = fy_start;
        self.next_number = 1;
        Ok(())
    }

    /// Advance if `date` falls in a later financial year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let fy = financial_year_start(date);
        if fy > self.fy_start {
            self.fy_start = fy;
            self.next_number = 1;
            true
        } else {
            false
        }
    }

    fn format(&self, num: u64) -> String {
        format!(
            "{}/{}/{:0>width$}",
            self.prefix,
            financial_year_label(self.fy_start),
            num,
            width = self.zero_pad
        )
    }
}
