//! Write serialisation for the exchange

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{Mutex, MutexGuard};

/// Serialises every state-changing operation and owns the RNG they draw from.
///
/// Team creation, code redemption and gift assignment each span several
/// repository calls; holding the guard across them keeps each operation
/// atomic with respect to the others. Reads never take it.
#[derive(Debug, Clone)]
pub struct ExchangeLock {
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl ExchangeLock {
    /// Seeded for reproducible runs, from OS entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ChaCha8Rng> {
        self.rng.lock().await
    }
}

impl Default for ExchangeLock {
    fn default() -> Self {
        Self::new(None)
    }
}
