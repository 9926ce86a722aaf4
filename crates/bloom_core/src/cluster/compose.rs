//! Directive composition: converts the tuned vectors into the two
//! directive lists, assigning positional path ids.

use crate::bus::{Signal, SignalBus, StageId, Topic};
use crate::error::BloomError;
use crate::glyph::Containment;
use crate::lexicon::ECHO_DAMPEN_RISK;
use crate::manifest::{Directive, RecursiveDirective};
use crate::packet::{BloomPacket, StageReport};

/// Left pass: tuned seeds become linear directives with `dir_<i>` paths.
#[derive(Debug, Default)]
pub struct ComposerLeft;

impl ComposerLeft {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let tuned = bus
            .listen(Topic::TunedVector)
            .and_then(Signal::into_tuned_vector)
            .unwrap_or_default();

        let directives: Vec<Directive> = tuned
            .into_iter()
            .enumerate()
            .map(|(i, tuned)| Directive {
                action: tuned.seed.operation,
                confidence: tuned.confidence,
                priority: tuned.priority,
                tag: tuned.seed.context,
                path: format!("dir_{i}"),
            })
            .collect();

        bus.broadcast(&Signal::LinearDirectives(directives.clone()))?;
        packet.annotations.linear_directives = Some(directives);
        packet.annotations.record_report(StageReport {
            stage: StageId::ComposerLeft,
            signal_tag: Topic::LinearDirectives,
            summary: "linear directives composed from tuned seeds".to_owned(),
        });
        Ok(())
    }
}

/// Right pass: tuned branches become recursive directives with `rdir_<i>`
/// paths; tight loops (risk above the dampening threshold) get echo
/// containment.
#[derive(Debug, Default)]
pub struct ComposerRight;

impl ComposerRight {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let tuned = bus
            .listen(Topic::BranchTuning)
            .and_then(Signal::into_branch_tuning)
            .unwrap_or_default();

        let directives: Vec<RecursiveDirective> = tuned
            .into_iter()
            .enumerate()
            .map(|(i, branch)| RecursiveDirective {
                symbol: branch.instruction.symbol,
                kind: branch.instruction.resolution,
                window: branch.recursion_window,
                viability: branch.branch_viability,
                loop_risk: branch.loop_risk,
                path: format!("rdir_{i}"),
                containment: if branch.loop_risk > ECHO_DAMPEN_RISK {
                    Containment::EchoDampen
                } else {
                    Containment::None
                },
                origin: branch.instruction.origin,
            })
            .collect();

        bus.broadcast(&Signal::RecursiveDirectives(directives.clone()))?;
        packet.annotations.recursive_directives = Some(directives);
        packet.annotations.record_report(StageReport {
            stage: StageId::ComposerRight,
            signal_tag: Topic::RecursiveDirectives,
            summary: "recursive directives composed with loop containment".to_owned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::tune::{TunedBranch, TunedSeed};
    use crate::cluster::vectorize::{ExecutionSeed, ExtendedInstruction};
    use crate::config::BloomConfig;
    use crate::glyph::{EntropyResolution, Glyph, Priority};

    #[test]
    fn left_composer_assigns_positional_paths() {
        let mut packet = BloomPacket::new("build run");
        let mut bus = SignalBus::new(&BloomConfig::default());
        let tuned: Vec<TunedSeed> = [(Glyph::Phi, 2.7f32), (Glyph::Psi, 1.6f32)]
            .iter()
            .map(|(symbol, confidence)| TunedSeed {
                seed: ExecutionSeed {
                    symbol: *symbol,
                    operation: format!("exec::{symbol}"),
                    depth: 1,
                    context: "root".into(),
                },
                confidence: *confidence,
                priority: Priority::High,
            })
            .collect();
        bus.broadcast(&Signal::TunedVector(tuned)).unwrap();

        ComposerLeft.process(&mut packet, &mut bus).unwrap();

        let directives = packet.annotations.linear_directives.unwrap();
        assert_eq!(directives[0].path, "dir_0");
        assert_eq!(directives[1].path, "dir_1");
        assert_eq!(directives[0].action, "exec::Φ");
        assert_eq!(directives[0].confidence, 2.7);
    }

    #[test]
    fn right_composer_contains_tight_loops() {
        let mut packet = BloomPacket::new("convert think");
        let mut bus = SignalBus::new(&BloomConfig::default());
        let branch = |symbol, risk| TunedBranch {
            instruction: ExtendedInstruction {
                symbol,
                resolution: EntropyResolution::Defer,
                origin: "token".into(),
                branch_depth: 1,
                context: "root".into(),
            },
            recursion_window: 2.0,
            branch_viability: 0.5,
            loop_risk: risk,
        };
        // Epsilon: risk 0.625 stays open; Undefined weight 0 → risk 1.0 dampens
        bus.broadcast(&Signal::BranchTuning(vec![
            branch(Glyph::Epsilon, 0.625),
            branch(Glyph::Undefined, 1.0),
        ]))
        .unwrap();

        ComposerRight.process(&mut packet, &mut bus).unwrap();

        let directives = packet.annotations.recursive_directives.unwrap();
        assert_eq!(directives[0].containment, Containment::None);
        assert_eq!(directives[1].containment, Containment::EchoDampen);
        assert_eq!(directives[1].path, "rdir_1");
    }
}
