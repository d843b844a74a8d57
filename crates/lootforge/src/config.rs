//! Engine configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for a [`LootEngine`](crate::LootEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootConfig {
    /// Radius (in world units) handed to the host's dead-entity scan when
    /// the ability-driven sweep trigger fires.
    pub sweep_radius: u32,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self { sweep_radius: 45 }
    }
}

impl LootConfig {
    /// Maximum supported sweep radius.
    pub const MAX_SWEEP_RADIUS: u32 = 250;

    /// Clamp any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`LootEngine::new`](crate::LootEngine::new).
    pub fn validated(mut self) -> Self {
        if self.sweep_radius > Self::MAX_SWEEP_RADIUS {
            warn!(
                radius = self.sweep_radius,
                max = Self::MAX_SWEEP_RADIUS,
                "sweep_radius exceeds maximum — clamping"
            );
            self.sweep_radius = Self::MAX_SWEEP_RADIUS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius() {
        assert_eq!(LootConfig::default().sweep_radius, 45);
    }

    #[test]
    fn test_validated_clamps_radius() {
        let config = LootConfig { sweep_radius: 10_000 }.validated();
        assert_eq!(config.sweep_radius, LootConfig::MAX_SWEEP_RADIUS);
        let config = LootConfig { sweep_radius: 45 }.validated();
        assert_eq!(config.sweep_radius, 45);
    }
}
