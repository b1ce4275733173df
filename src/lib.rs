//! Dice chains: pools of dice folded left to right with `+`, `-`, `*`, `/`, or
//! with a modifier applied once per roll.
//!
//! A chain is built with the fluent API or parsed from its textual notation,
//! and prints back to the same notation.
//!
//! ```
//! use dice_chain::{dice, roll::Chain, ValueProvider};
//!
//! let built = dice::take(3).d(8)?.each_plus(3);
//! let parsed: Chain = "3d8(+3)".parse()?;
//! assert_eq!(built, parsed);
//! assert_eq!(parsed.to_string(), "3d8(+3)");
//! assert_eq!((parsed.minimum(), parsed.maximum()), (12.0, 33.0));
//!
//! let total = dice_chain::roll::with_thread_roller(|roller| parsed.roll(roller))?;
//! assert!((12.0..=33.0).contains(&total));
//! # Ok::<(), dice_chain::DiceError>(())
//! ```

pub mod common;
pub mod dice;
mod error;
pub mod parse;
pub mod roll;

#[cfg(test)]
pub(crate) mod test_utils;

pub use common::{Float, Int, Operation};
pub use error::{DiceError, DiceResult};
pub use roll::{Chain, Roller, ValueProvider};

/// Parses a chain with the built-in node parser.
pub fn parse(text: &str) -> DiceResult<Chain> {
    parse::NodeParsers::builtin().parse_chain(text)
}
