use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Args;

/// Tunable limits and thresholds for one pipeline.
///
/// The fixed lexicon tables live in [`crate::lexicon`]; this struct only
/// carries the knobs a deployment would plausibly adjust. `max_depth` is
/// the single source of truth for BOTH depth enforcement points (bus guard
/// and feedback gate), so they cannot disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Args))]
pub struct BloomConfig {
    /// Maximum recursion depth for one logical request
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 13))]
    pub max_depth: u32,

    /// Harmonic sync below which the feedback stage loops the packet back
    #[cfg_attr(feature = "cli", arg(long, default_value = "0.75"))]
    pub sync_threshold: f32,

    /// Mean harmonic score at which a logic vector is recursion-ready
    #[cfg_attr(feature = "cli", arg(long, default_value = "2.5"))]
    pub ready_threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            max_depth: 13,
            sync_threshold: 0.75,
            ready_threshold: crate::lexicon::READY_THRESHOLD,
        }
    }
}

impl BloomConfig {
    /// Loop gate: a packet at `depth` may re-enter pre-processing.
    /// Incrementing from here keeps the resting depth within 0..=max_depth.
    pub fn may_loop(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    /// Bus backstop: `depth` is outside the valid resting range and routing
    /// must fail closed. The feedback gate can never produce such a depth;
    /// this fires only for hand-built packets.
    pub fn depth_exceeded(&self, depth: u32) -> bool {
        depth > self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_predicates_share_one_constant() {
        let config = BloomConfig::default();
        // Loop allowed strictly below the cap
        assert!(config.may_loop(0));
        assert!(config.may_loop(12));
        assert!(!config.may_loop(13));
        // The cap itself is a valid resting depth; only beyond it halts
        assert!(!config.depth_exceeded(13));
        assert!(config.depth_exceeded(14));
    }
}
