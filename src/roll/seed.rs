use super::Roller;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Hands out independently seeded generators from one lock-protected master generator.
///
/// Each worker takes its own generator with [`SeedSource::spawn`] and never
/// touches the master again, so concurrent rollers do not share state. A source
/// built with [`SeedSource::from_seed`] hands out the same generators in the same
/// order every time.
#[derive(Debug)]
pub struct SeedSource {
    master: Mutex<ChaCha20Rng>,
}

impl SeedSource {
    pub fn from_entropy() -> Self {
        Self::with_master(ChaCha20Rng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::with_master(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_master(master: ChaCha20Rng) -> Self {
        Self {
            master: Mutex::new(master),
        }
    }

    pub fn spawn(&self) -> ChaCha20Rng {
        let mut seed = <ChaCha20Rng as SeedableRng>::Seed::default();
        self.master
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(&mut seed);
        log::trace!("spawned a generator from the seed source");
        ChaCha20Rng::from_seed(seed)
    }
}

static GLOBAL: OnceLock<SeedSource> = OnceLock::new();

thread_local! {
    static THREAD_ROLLER: RefCell<ChaCha20Rng> = RefCell::new(global_seed_source().spawn());
}

/// The process-wide seed source, seeded from entropy unless
/// [`install_seed_source`] ran first.
pub fn global_seed_source() -> &'static SeedSource {
    GLOBAL.get_or_init(SeedSource::from_entropy)
}

/// Replaces the process-wide seed source. Fails, returning `source`, once the
/// global source is already in use.
pub fn install_seed_source(source: SeedSource) -> Result<(), SeedSource> {
    GLOBAL.set(source)
}

/// Runs `f` with this thread's generator.
///
/// The generator is spawned from [`global_seed_source`] on first use. Calling
/// this again from inside `f` panics.
pub fn with_thread_roller<T>(f: impl FnOnce(&mut dyn Roller) -> T) -> T {
    THREAD_ROLLER.with(|rng| f(&mut *rng.borrow_mut()))
}
