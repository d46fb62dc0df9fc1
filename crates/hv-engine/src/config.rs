//! Engine configuration.

use serde::Deserialize;

/// Configuration for a game session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed for reproducible dice rolls.
    pub seed: u64,
    /// A failed move asks for generated flavor text one time in this many.
    pub cannot_go_flavor_odds: u32,
    /// Maximum weight the player can carry.
    pub carry_limit: u32,
    /// Placed between the intent's narration and each actor's output.
    pub turn_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cannot_go_flavor_odds: 5,
            carry_limit: 100,
            turn_separator: "\n".to_string(),
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the odds of flavor text on a failed move (at least 1).
    pub fn with_cannot_go_flavor_odds(mut self, odds: u32) -> Self {
        self.cannot_go_flavor_odds = odds.max(1);
        self
    }

    /// Set the player's carry limit.
    pub fn with_carry_limit(mut self, limit: u32) -> Self {
        self.carry_limit = limit;
        self
    }

    /// Set the separator between narration pieces of one turn.
    pub fn with_turn_separator(mut self, separator: impl Into<String>) -> Self {
        self.turn_separator = separator.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.cannot_go_flavor_odds, 5);
        assert_eq!(cfg.carry_limit, 100);
        assert_eq!(cfg.turn_separator, "\n");
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_cannot_go_flavor_odds(0)
            .with_carry_limit(40);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.cannot_go_flavor_odds, 1);
        assert_eq!(cfg.carry_limit, 40);
    }

    #[test]
    fn deserializes_with_defaults_for_missing_fields() {
        let cfg: EngineConfig = serde_json::from_str(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.carry_limit, 100);
    }
}
