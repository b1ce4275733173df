//! Standard dice and the entry point of the two-step builder.
//!
//! ```
//! use dice_chain::{dice, ValueProvider};
//!
//! let chain = dice::take(2).d(6)?.plus(3);
//! assert_eq!(chain.to_string(), "2d6+3");
//! assert_eq!((chain.minimum(), chain.maximum()), (5.0, 15.0));
//! # Ok::<(), dice_chain::DiceError>(())
//! ```

use crate::common::Operation;
use crate::roll::{ChainSetup, Die};

pub use crate::roll::{D10, D100, D12, D2, D20, D3, D4, D6, D8};

/// Starts a chain whose first pool rolls `amount` dice.
pub fn take(amount: impl Into<Die>) -> ChainSetup {
    ChainSetup::new(None, Operation::Plus, amount.into())
}
