use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::numbering::VoucherNumberSequence;
use super::states::StateCode;
use super::types::VoucherKind;

/// Company-level voucher settings, as stored by the settings screen.
///
/// Only `company_state` is required when deserializing; everything else
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherSettings {
    /// State in which the company is GST-registered.
    pub company_state: StateCode,
    /// Rates are entered inclusive of tax by default.
    #[serde(default)]
    pub tax_inclusive: bool,
    /// Round grand totals to the nearest rupee.
    #[serde(default)]
    pub auto_round_off: bool,
    #[serde(default = "default_purchase_prefix")]
    pub purchase_prefix: String,
    #[serde(default = "default_sales_prefix")]
    pub sales_prefix: String,
}

fn default_purchase_prefix() -> String {
    "PUR".into()
}

fn default_sales_prefix() -> String {
    "SAL".into()
}

impl VoucherSettings {
    /// Settings with every optional field at its default.
    pub fn new(company_state: StateCode) -> Self {
        Self {
            company_state,
            tax_inclusive: false,
            auto_round_off: false,
            purchase_prefix: default_purchase_prefix(),
            sales_prefix: default_sales_prefix(),
        }
    }

    /// Voucher number prefix for `kind`.
    pub fn prefix_for(&self, kind: VoucherKind) -> &str {
        match kind {
            VoucherKind::Purchase => &self.purchase_prefix,
            VoucherKind::Sales => &self.sales_prefix,
        }
    }

    /// A fresh number sequence for `kind` in the financial year of `date`.
    pub fn sequence_for(&self, kind: VoucherKind, date: NaiveDate) -> VoucherNumberSequence {
        VoucherNumberSequence::for_date(self.prefix_for(kind), date)
    }
}
