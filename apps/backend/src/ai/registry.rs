//! Named strategy registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ai::random::RandomStrategy;
use crate::ai::trait_def::Strategy;
use crate::domain::Player;
use crate::infra::RandomSource;

/// Maps strategy names to implementations. Bots carry a strategy tag and
/// resolve it here at decision time; an unknown tag falls back to the
/// first registered strategy.
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// A registry with the default strategies installed.
    pub fn with_defaults(random: Arc<dyn RandomSource>) -> Self {
        let mut registry = Self::new();
        registry.register(RandomStrategy::NAME, Arc::new(RandomStrategy::new(random)));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, strategy: Arc<dyn Strategy>) {
        self.strategies.insert(name.into(), strategy);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.strategies.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Registered strategy names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    /// Resolve a bot's strategy, falling back to the first registered one
    /// when the tag is unknown.
    pub fn for_player(&self, player: &Player) -> Option<Arc<dyn Strategy>> {
        player
            .bot_strategy
            .as_deref()
            .and_then(|name| self.get(name))
            .or_else(|| self.strategies.values().next().cloned())
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
