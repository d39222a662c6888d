//! Voucher calculation core: money, line amounts, GST split, totals.
//!
//! Purchase and sales vouchers share one implementation, parameterized over
//! the [`LineSource`] trait.

mod builder;
mod error;
mod line;
mod money;
mod numbering;
mod settings;
pub mod states;
mod tax;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use line::*;
pub use money::*;
pub use numbering::*;
pub use settings::*;
pub use states::StateCode;
pub use tax::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
