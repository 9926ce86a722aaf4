//! Signal tuning: weighs the vectorized instructions into confidence,
//! priority, and loop-control metrics.

use serde::{Deserialize, Serialize};

use crate::bus::{Signal, SignalBus, StageId, Topic};
use crate::cluster::vectorize::{ExecutionSeed, ExtendedInstruction};
use crate::error::BloomError;
use crate::glyph::{EntropyResolution, Priority};
use crate::harmonics::{round2, round3};
use crate::lexicon::{
    branch_weight, symbol_impact, BRANCH_WINDOW_FACTOR, HIGH_PRIORITY_IMPACT,
};
use crate::packet::{BloomPacket, StageReport};

/// An execution seed with its tuned confidence and priority tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TunedSeed {
    pub seed: ExecutionSeed,
    /// `round3(impact * depth)`
    pub confidence: f32,
    pub priority: Priority,
}

/// An extended instruction with its branch metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TunedBranch {
    pub instruction: ExtendedInstruction,
    /// `round2((depth + 1) * window factor)`
    pub recursion_window: f32,
    /// `round3(weight + 0.5 * depth)`
    pub branch_viability: f32,
    /// `round3(1 / (|weight| + 1))`, always in (0, 1]
    pub loop_risk: f32,
}

/// Left pass: confidence and priority per execution seed.
#[derive(Debug, Default)]
pub struct SignalTunerLeft;

impl SignalTunerLeft {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let seeds = bus
            .listen(Topic::ExecutionSeeds)
            .and_then(Signal::into_execution_seeds)
            .unwrap_or_default();

        let tuned: Vec<TunedSeed> = seeds
            .into_iter()
            .map(|seed| {
                let impact = symbol_impact(seed.symbol);
                let confidence = round3(impact * seed.depth as f32);
                let priority = if impact > HIGH_PRIORITY_IMPACT {
                    Priority::High
                } else {
                    Priority::Normal
                };
                TunedSeed { seed, confidence, priority }
            })
            .collect();

        bus.broadcast(&Signal::TunedVector(tuned.clone()))?;
        packet.annotations.tuned_vector = Some(tuned);
        packet.annotations.record_report(StageReport {
            stage: StageId::SignalTunerLeft,
            signal_tag: Topic::TunedVector,
            summary: "confidence and priority tier assigned".to_owned(),
        });
        Ok(())
    }
}

/// Right pass: recursion window, viability, and loop risk per extended
/// instruction.
#[derive(Debug, Default)]
pub struct SignalTunerRight;

impl SignalTunerRight {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let instructions = bus
            .listen(Topic::ExtendedVector)
            .and_then(Signal::into_extended_vector)
            .unwrap_or_default();

        let tuned: Vec<TunedBranch> = instructions
            .into_iter()
            .map(|instruction| {
                let weight = branch_weight(instruction.symbol);
                let depth = instruction.branch_depth as f32;
                let window_factor = if instruction.resolution == EntropyResolution::Branch {
                    BRANCH_WINDOW_FACTOR
                } else {
                    1.0
                };

                TunedBranch {
                    recursion_window: round2((depth + 1.0) * window_factor),
                    branch_viability: round3(weight + 0.5 * depth),
                    loop_risk: round3(1.0 / (weight.abs() + 1.0)),
                    instruction,
                }
            })
            .collect();

        bus.broadcast(&Signal::BranchTuning(tuned.clone()))?;
        packet.annotations.branch_vector = Some(tuned);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BloomConfig;
    use crate::glyph::Glyph;

    fn seed(symbol: Glyph, depth: u32) -> ExecutionSeed {
        ExecutionSeed {
            symbol,
            operation: format!("exec::{symbol}"),
            depth,
            context: "root".into(),
        }
    }

    fn instruction(symbol: Glyph, resolution: EntropyResolution, depth: u32) -> ExtendedInstruction {
        ExtendedInstruction {
            symbol,
            resolution,
            origin: "token".into(),
            branch_depth: depth,
            context: "root".into(),
        }
    }

    #[test]
    fn left_tuner_scales_impact_by_depth() {
        let mut packet = BloomPacket::new("build run");
        let mut bus = SignalBus::new(&BloomConfig::default());
        bus.broadcast(&Signal::ExecutionSeeds(vec![
            seed(Glyph::Phi, 3),
            seed(Glyph::Psi, 2),
        ]))
        .unwrap();

        SignalTunerLeft.process(&mut packet, &mut bus).unwrap();

        let tuned = packet.annotations.tuned_vector.unwrap();
        assert_eq!(tuned[0].confidence, 2.7);
        assert_eq!(tuned[0].priority, Priority::High);
        assert_eq!(tuned[1].confidence, 1.6);
        assert_eq!(tuned[1].priority, Priority::High);
    }

    #[test]
    fn left_tuner_priority_boundary_is_strict() {
        let mut packet = BloomPacket::new("delete think");
        let mut bus = SignalBus::new(&BloomConfig::default());
        // Omega impact 0.4 and Theta impact 0.6 both sit at or below 0.7
        bus.broadcast(&Signal::ExecutionSeeds(vec![
            seed(Glyph::Omega, 1),
            seed(Glyph::Theta, 4),
        ]))
        .unwrap();

        SignalTunerLeft.process(&mut packet, &mut bus).unwrap();

        let tuned = packet.annotations.tuned_vector.unwrap();
        assert_eq!(tuned[0].priority, Priority::Normal);
        assert_eq!(tuned[1].priority, Priority::Normal);
    }

    #[test]
    fn right_tuner_derives_branch_metrics() {
        let mut packet = BloomPacket::new("convert");
        let mut bus = SignalBus::new(&BloomConfig::default());
        bus.broadcast(&Signal::ExtendedVector(vec![
            instruction(Glyph::Phi, EntropyResolution::Branch, 3),
            instruction(Glyph::Epsilon, EntropyResolution::Defer, 1),
        ]))
        .unwrap();

        SignalTunerRight.process(&mut packet, &mut bus).unwrap();

        let tuned = packet.annotations.branch_vector.unwrap();
        // Branch: (3 + 1) * 1.5 = 6.0; weight 1.0 → viability 2.5, risk 0.5
        assert_eq!(tuned[0].recursion_window, 6.0);
        assert_eq!(tuned[0].branch_viability, 2.5);
        assert_eq!(tuned[0].loop_risk, 0.5);
        // Defer: (1 + 1) * 1.0 = 2.0; weight -0.6 → viability -0.1, risk 0.625
        assert_eq!(tuned[1].recursion_window, 2.0);
        assert_eq!(tuned[1].branch_viability, -0.1);
        assert_eq!(tuned[1].loop_risk, 0.625);
    }

    #[test]
    fn tuners_default_to_empty_without_broadcasts() {
        let mut packet = BloomPacket::new("build");
        let mut bus = SignalBus::new(&BloomConfig::default());
        SignalTunerLeft.process(&mut packet, &mut bus).unwrap();
        SignalTunerRight.process(&mut packet, &mut bus).unwrap();
        assert_eq!(packet.annotations.tuned_vector, Some(Vec::new()));
        assert_eq!(packet.annotations.branch_vector, Some(Vec::new()));
    }
}
