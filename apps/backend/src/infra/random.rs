use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Randomness injected for code generation and bot decisions.
///
/// Both methods are total: `int_below(0)` is 0 and `string` with an empty
/// alphabet or zero length is the empty string.
pub trait RandomSource: Send + Sync {
    /// A uniform value in `[0, n)`.
    fn int_below(&self, n: usize) -> usize;

    /// A random string of `length` characters drawn from `alphabet`.
    fn string(&self, length: usize, alphabet: &str) -> String {
        let chars: Vec<char> = alphabet.chars().collect();
        if length == 0 || chars.is_empty() {
            return String::new();
        }
        (0..length).map(|_| chars[self.int_below(chars.len())]).collect()
    }
}

/// OS-entropy randomness for production use.
///
/// The RNG lives behind a mutex since `RandomSource` methods take `&self`.
#[derive(Debug)]
pub struct OsRandom {
    rng: Mutex<StdRng>,
}

impl OsRandom {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl Default for OsRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandom {
    fn int_below(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.lock().random_range(0..n)
    }
}

/// Seeded randomness for reproducible tests.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_below(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.lock().random_range(0..n)
    }
}
