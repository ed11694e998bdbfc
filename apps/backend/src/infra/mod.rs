//! Injected collaborators: wall clock and randomness.

pub mod clock;
pub mod random;

pub use clock::{Clock, FixedClock, SystemClock};
pub use random::{OsRandom, RandomSource, SeededRandom};
