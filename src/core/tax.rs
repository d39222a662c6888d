use serde::{Deserialize, Serialize};

use super::error::KhataError;
use super::money::Money;
use super::states::StateCode;

/// Whether a supply crosses a state boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locality {
    /// Seller and buyer in the same state: CGST + SGST.
    Intrastate,
    /// Seller and buyer in different states: IGST.
    Interstate,
}

impl Locality {
    /// Intrastate when both codes are equal.
    pub fn between(seller: &StateCode, buyer: &StateCode) -> Self {
        if seller == buyer {
            Self::Intrastate
        } else {
            Self::Interstate
        }
    }
}

/// Statutory GST components of a tax amount.
///
/// Either CGST and SGST carry the amount (intrastate) or IGST does
/// (interstate), and the three always add back to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxSplit {
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
}

impl TaxSplit {
    /// Split `total_tax` for the given locality.
    ///
    /// Intrastate CGST is `floor(total / 2)`; an odd paisa goes to SGST.
    pub fn for_locality(total_tax: Money, locality: Locality) -> Result<Self, KhataError> {
        if total_tax.is_negative() {
            return Err(KhataError::InvalidTaxAmount { amount: total_tax });
        }
        let split = match locality {
            Locality::Interstate => Self {
                cgst: Money::ZERO,
                sgst: Money::ZERO,
                igst: total_tax,
            },
            Locality::Intrastate => {
                let cgst = Money::from_minor(total_tax.minor() / 2);
                Self {
                    cgst,
                    sgst: total_tax - cgst,
                    igst: Money::ZERO,
                }
            }
        };
        Ok(split)
    }

    /// Sum of the three components. Fails only for hand-built splits whose
    /// components do not fit together.
    pub fn total(&self) -> Result<Money, KhataError> {
        Money::checked_sum([self.cgst, self.sgst, self.igst], "tax split total")
    }
}

/// Split `total_tax` into CGST/SGST or IGST by comparing state codes.
pub fn resolve_tax_split(
    total_tax: Money,
    seller_state: &StateCode,
    buyer_state: &StateCode,
) -> Result<TaxSplit, KhataError> {
    TaxSplit::for_locality(total_tax, Locality::between(seller_state, buyer_state))
}
