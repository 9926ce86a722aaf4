//! Execution vectorization: splits the logic vector by resolution into
//! execution seeds (left) and extended instructions (right). The two
//! filters are disjoint and together cover every resolution except
//! `none`.

use serde::{Deserialize, Serialize};

use crate::bus::{Signal, SignalBus, StageId, Topic};
use crate::error::BloomError;
use crate::glyph::{EntropyResolution, Glyph};
use crate::packet::{BloomPacket, StageReport};

/// A collapse-ready node converted into a symbolic execution instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSeed {
    pub symbol: Glyph,
    /// `exec::<glyph>`
    pub operation: String,
    pub depth: u32,
    /// Memory tag of the node, or `root`
    pub context: String,
}

/// A branch/defer node prepared for forked or delayed recursion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtendedInstruction {
    pub symbol: Glyph,
    pub resolution: EntropyResolution,
    pub origin: String,
    pub branch_depth: u32,
    pub context: String,
}

/// Left pass: collapse nodes become execution seeds.
#[derive(Debug, Default)]
pub struct ExecVectorizerLeft;

impl ExecVectorizerLeft {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let vector = packet.annotations.logic_vector.clone().unwrap_or_default();

        let seeds: Vec<ExecutionSeed> = vector
            .iter()
            .filter(|node| node.entropy_resolution == EntropyResolution::Collapse)
            .map(|node| ExecutionSeed {
                symbol: node.symbol,
                operation: format!("exec::{}", node.symbol),
                depth: node.depth,
                context: node.memory_tag.clone().unwrap_or_else(|| "root".to_owned()),
            })
            .collect();

        bus.broadcast(&Signal::ExecutionSeeds(seeds.clone()))?;
        packet.annotations.execution_vector = Some(seeds);
        packet.annotations.record_report(StageReport {
            stage: StageId::ExecVectorizerLeft,
            signal_tag: Topic::ExecutionSeeds,
            summary: "execution seeds extracted from collapse nodes".to_owned(),
        });
        Ok(())
    }
}

/// Right pass: branch and defer nodes become extended instructions.
#[derive(Debug, Default)]
pub struct ExecVectorizerRight;

impl ExecVectorizerRight {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let vector = packet.annotations.logic_vector.clone().unwrap_or_default();

        let instructions: Vec<ExtendedInstruction> = vector
            .iter()
            .filter(|node| {
                matches!(
                    node.entropy_resolution,
                    EntropyResolution::Branch | EntropyResolution::Defer
                )
            })
            .map(|node| ExtendedInstruction {
                symbol: node.symbol,
                resolution: node.entropy_resolution,
                origin: node.origin.clone(),
                branch_depth: node.depth,
                context: node.memory_tag.clone().unwrap_or_else(|| "root".to_owned()),
            })
            .collect();

        bus.broadcast(&Signal::ExtendedVector(instructions.clone()))?;
        packet.annotations.extended_vector = Some(instructions);
        packet.annotations.record_report(StageReport {
            stage: StageId::ExecVectorizerRight,
            signal_tag: Topic::ExtendedVector,
            summary: "branch and defer nodes parsed into extended vector".to_owned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BloomConfig;
    use crate::nexus::LogicNode;

    fn node(resolution: EntropyResolution) -> LogicNode {
        LogicNode {
            symbol: Glyph::Phi,
            origin: "build".into(),
            depth: 3,
            memory_tag: Some("quantum_engine".into()),
            entropy_weight: 0.0,
            entropy_resolution: resolution,
            harmonic_score: 0.0,
            path_id: "Φ::quantum_engine::0".into(),
        }
    }

    #[test]
    fn filters_are_disjoint_and_skip_none() {
        let mut packet = BloomPacket::new("build");
        packet.annotations.logic_vector = Some(vec![
            node(EntropyResolution::Collapse),
            node(EntropyResolution::Defer),
            node(EntropyResolution::Branch),
            node(EntropyResolution::None),
        ]);
        let mut bus = SignalBus::new(&BloomConfig::default());

        ExecVectorizerLeft.process(&mut packet, &mut bus).unwrap();
        ExecVectorizerRight.process(&mut packet, &mut bus).unwrap();

        assert_eq!(packet.annotations.execution_vector.as_ref().unwrap().len(), 1);
        assert_eq!(packet.annotations.extended_vector.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn seeds_carry_operation_and_context() {
        let mut packet = BloomPacket::new("build");
        let mut bare = node(EntropyResolution::Collapse);
        bare.memory_tag = None;
        packet.annotations.logic_vector = Some(vec![node(EntropyResolution::Collapse), bare]);
        let mut bus = SignalBus::new(&BloomConfig::default());

        ExecVectorizerLeft.process(&mut packet, &mut bus).unwrap();

        let seeds = packet.annotations.execution_vector.unwrap();
        assert_eq!(seeds[0].operation, "exec::Φ");
        assert_eq!(seeds[0].context, "quantum_engine");
        assert_eq!(seeds[1].context, "root");
        // Broadcast mirrors the annotation
        let heard = bus
            .listen(Topic::ExecutionSeeds)
            .and_then(Signal::into_execution_seeds)
            .unwrap();
        assert_eq!(heard, seeds);
    }
}
