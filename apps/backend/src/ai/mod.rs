//! Bot decision strategies.

pub mod random;
pub mod registry;
pub mod trait_def;

pub use random::RandomStrategy;
pub use registry::StrategyRegistry;
pub use trait_def::Strategy;
