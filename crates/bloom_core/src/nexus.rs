//! Integration stage: builds the logic vector from the pre-processing
//! outputs, resolves each node's entropy, and computes the harmonic
//! readiness score. The logic vector is the execution skeleton every
//! expansion stage reads from.

use serde::{Deserialize, Serialize};

use crate::glyph::{EntropyResolution, Glyph};
use crate::harmonics::round3;
use crate::lexicon::{
    resolution_bias, symbol_weight, BRANCH_THRESHOLD, DEFER_THRESHOLD, MEMORY_BONUS,
};
use crate::packet::BloomPacket;

/// One element of the logic vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogicNode {
    pub symbol: Glyph,
    /// Token the seed originated from
    pub origin: String,
    pub depth: u32,
    pub memory_tag: Option<String>,
    /// In [0, 1]
    pub entropy_weight: f32,
    pub entropy_resolution: EntropyResolution,
    /// Recomputed wholesale on every scoring pass
    pub harmonic_score: f32,
    /// `<glyph>::<memory_tag or origin>::<index>`
    pub path_id: String,
}

/// Classify an entropy weight. Total over [0, 1]: the thresholds
/// partition the range, so no fallback arm is needed.
pub fn resolve_entropy(weight: f32) -> EntropyResolution {
    if weight >= BRANCH_THRESHOLD {
        EntropyResolution::Branch
    } else if weight >= DEFER_THRESHOLD {
        EntropyResolution::Defer
    } else {
        EntropyResolution::Collapse
    }
}

/// Joins recursion seeds with memory resonance (first match by origin
/// token) and entropy fields (first match by token, else 0.0) into the
/// logic vector.
#[derive(Debug, Default)]
pub struct VectorConstructor;

impl VectorConstructor {
    pub fn process(&self, packet: &mut BloomPacket) {
        let seeds = packet.annotations.seeds.clone().unwrap_or_default();
        let resonance = packet.annotations.memory_resonance.clone().unwrap_or_default();
        let entropy = packet.annotations.entropy_fields.clone().unwrap_or_default();

        let vector: Vec<LogicNode> = seeds
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                let memory_tag = resonance
                    .iter()
                    .find(|m| m.seed == seed.origin)
                    .map(|m| m.memory_tag.clone());
                let entropy_weight = entropy
                    .iter()
                    .find(|e| e.token == seed.origin)
                    .map(|e| e.entropy_level)
                    .unwrap_or(0.0);
                let anchor = memory_tag.as_deref().unwrap_or(&seed.origin);

                LogicNode {
                    symbol: seed.glyph,
                    origin: seed.origin.clone(),
                    depth: seed.depth,
                    path_id: format!("{}::{}::{}", seed.glyph, anchor, index),
                    memory_tag,
                    entropy_weight,
                    entropy_resolution: EntropyResolution::None,
                    harmonic_score: 0.0,
                }
            })
            .collect();

        packet.annotations.logic_vector = Some(vector);
    }
}

/// Stabilizes the vector by assigning each node its entropy resolution.
#[derive(Debug, Default)]
pub struct EntropyResolver;

impl EntropyResolver {
    pub fn process(&self, packet: &mut BloomPacket) {
        if let Some(vector) = packet.annotations.logic_vector.as_mut() {
            for node in vector {
                node.entropy_resolution = resolve_entropy(node.entropy_weight);
            }
        }
    }
}

/// Scores every node and the vector as a whole, then gates readiness.
///
/// Per node: `(symbol_weight + resolution_bias + memory_bonus) * depth`.
/// The mean over all nodes (0 for an empty vector) is stored alongside
/// `recursion_ready = mean >= ready_threshold`. Scores are recomputed
/// wholesale on every pass, never incrementally.
#[derive(Debug)]
pub struct HarmonicScorer {
    ready_threshold: f32,
}

impl HarmonicScorer {
    pub fn new(ready_threshold: f32) -> Self {
        Self { ready_threshold }
    }

    pub fn process(&self, packet: &mut BloomPacket) {
        let mut total = 0.0f32;
        let mut count = 0usize;

        if let Some(vector) = packet.annotations.logic_vector.as_mut() {
            for node in vector.iter_mut() {
                let polarity = symbol_weight(node.symbol);
                let bias = resolution_bias(node.entropy_resolution);
                let bonus = if node.memory_tag.is_some() { MEMORY_BONUS } else { 0.0 };

                let score = (polarity + bias + bonus) * node.depth as f32;
                node.harmonic_score = round3(score);
                total += score;
            }
            count = vector.len();
        }

        let mean = if count == 0 { 0.0 } else { round3(total / count as f32) };
        packet.annotations.harmonic_score = Some(mean);
        packet.annotations.recursion_ready = Some(mean >= self.ready_threshold);
    }
}

impl Default for HarmonicScorer {
    fn default() -> Self {
        Self::new(crate::lexicon::READY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{EntropyField, MemoryMatch, RecursionSeed};

    fn sample_node(weight: f32) -> LogicNode {
        LogicNode {
            symbol: Glyph::Phi,
            origin: "build".into(),
            depth: 3,
            memory_tag: None,
            entropy_weight: weight,
            entropy_resolution: EntropyResolution::None,
            harmonic_score: 0.0,
            path_id: "Φ::build::0".into(),
        }
    }

    #[test]
    fn resolution_thresholds_partition_the_range() {
        assert_eq!(resolve_entropy(0.0), EntropyResolution::Collapse);
        assert_eq!(resolve_entropy(0.399), EntropyResolution::Collapse);
        // Exact boundary values
        assert_eq!(resolve_entropy(0.4), EntropyResolution::Defer);
        assert_eq!(resolve_entropy(0.749), EntropyResolution::Defer);
        assert_eq!(resolve_entropy(0.75), EntropyResolution::Branch);
        assert_eq!(resolve_entropy(1.0), EntropyResolution::Branch);
    }

    #[test]
    fn constructor_joins_first_memory_and_entropy_matches() {
        let mut packet = BloomPacket::new("build quantum");
        packet.annotations.seeds = Some(vec![
            RecursionSeed { origin: "build".into(), glyph: Glyph::Phi, depth: 3, position: 0 },
            RecursionSeed { origin: "quantum".into(), glyph: Glyph::Undefined, depth: 0, position: 1 },
        ]);
        packet.annotations.memory_resonance = Some(vec![
            MemoryMatch { seed: "build".into(), glyph: Glyph::Phi, memory_tag: "quantum_engine".into(), score: 1 },
            MemoryMatch { seed: "build".into(), glyph: Glyph::Phi, memory_tag: "harmonic_clock".into(), score: 1 },
        ]);
        packet.annotations.entropy_fields = Some(vec![EntropyField {
            token: "quantum".into(),
            position: 1,
            entropy_level: 0.9,
        }]);

        VectorConstructor.process(&mut packet);
        let vector = packet.annotations.logic_vector.unwrap();

        assert_eq!(vector[0].memory_tag.as_deref(), Some("quantum_engine"));
        assert_eq!(vector[0].entropy_weight, 0.0);
        assert_eq!(vector[0].path_id, "Φ::quantum_engine::0");
        assert_eq!(vector[1].memory_tag, None);
        assert_eq!(vector[1].entropy_weight, 0.9);
        assert_eq!(vector[1].path_id, "∅::quantum::1");
    }

    #[test]
    fn scorer_mean_is_arithmetic_mean_of_node_scores() {
        let mut packet = BloomPacket::new("build run");
        let mut phi = sample_node(0.0);
        phi.entropy_resolution = EntropyResolution::Collapse;
        phi.memory_tag = Some("quantum_engine".into());
        let mut psi = sample_node(0.0);
        psi.symbol = Glyph::Psi;
        psi.depth = 2;
        psi.entropy_resolution = EntropyResolution::Collapse;
        psi.memory_tag = Some("quantum_engine".into());
        packet.annotations.logic_vector = Some(vec![phi, psi]);

        HarmonicScorer::default().process(&mut packet);

        let vector = packet.annotations.logic_vector.as_ref().unwrap();
        // Phi: (1.0 + 0.9 + 0.3) * 3 = 6.6; Psi: (0.8 + 0.9 + 0.3) * 2 = 4.0
        assert_eq!(vector[0].harmonic_score, 6.6);
        assert_eq!(vector[1].harmonic_score, 4.0);
        assert_eq!(packet.annotations.harmonic_score, Some(5.3));
        assert_eq!(packet.annotations.recursion_ready, Some(true));
    }

    #[test]
    fn scorer_treats_empty_vector_as_zero() {
        let mut packet = BloomPacket::new("nothing here");
        packet.annotations.logic_vector = Some(Vec::new());
        HarmonicScorer::default().process(&mut packet);
        assert_eq!(packet.annotations.harmonic_score, Some(0.0));
        assert_eq!(packet.annotations.recursion_ready, Some(false));
    }

    #[test]
    fn unresolved_node_scores_with_neutral_bias() {
        let mut packet = BloomPacket::new("build");
        packet.annotations.logic_vector = Some(vec![sample_node(0.0)]);
        HarmonicScorer::default().process(&mut packet);
        let vector = packet.annotations.logic_vector.as_ref().unwrap();
        // (1.0 + 0.5 + 0) * 3 = 4.5 for a node never resolved
        assert_eq!(vector[0].harmonic_score, 4.5);
    }
}
