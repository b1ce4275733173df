mod chain;
mod die;
pub mod ops;
mod pool;
mod provider;
pub(crate) mod roller;
mod seed;
mod setup;
mod stringify;

use crate::common::Operation;

pub use chain::{Chain, ChainLink, ChainRollStep, SteppedRoll};
pub use die::{CustomDie, FixedDie, UniformDie, D10, D100, D12, D2, D20, D3, D4, D6, D8};
pub use pool::Pool;
pub use provider::{Die, ValueProvider};
pub use roller::Roller;
pub use seed::{global_seed_source, install_seed_source, with_thread_roller, SeedSource};
pub use setup::ChainSetup;
