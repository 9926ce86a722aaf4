//! Orchestrator: drives the stage sequence and the bounded loop-back.
//!
//! One call to [`BloomPipeline::run`] owns one packet and one bus for its
//! whole lifetime, including loop-backs. The loop is an explicit iteration
//! bounded by `max_depth`; termination does not depend on harmonic-sync
//! values. Every stage entry is routed through the bus pass-through so
//! validation, depth halts, and the audit trace are uniform.

use log::{debug, info};

use crate::bus::{RouteOutcome, SignalBus, StageId};
use crate::cluster::{
    ComposerLeft, ComposerRight, ExecVectorizerLeft, ExecVectorizerRight, Fusion,
    SignalTunerLeft, SignalTunerRight,
};
use crate::config::BloomConfig;
use crate::error::BloomError;
use crate::feedback::{FeedbackStage, FeedbackState};
use crate::hemisphere::{
    EntropyTagger, IntentInference, MemoryHarmonizer, NoiseFilter, RecursionSeeder, SymbolMapper,
};
use crate::manifest::Manifest;
use crate::nexus::{EntropyResolver, HarmonicScorer, VectorConstructor};
use crate::packet::BloomPacket;

/// Result of one complete run: the terminal manifest plus the packet that
/// produced it (trace, stage reports, final annotations).
#[derive(Debug)]
pub struct BloomOutcome {
    pub manifest: Manifest,
    pub packet: BloomPacket,
    /// Drift-damped diagnostic reading of the run's bus field
    pub stability: f32,
}

/// The fixed stage sequence with its loop-back transition.
#[derive(Debug, Default)]
pub struct BloomPipeline {
    config: BloomConfig,
}

impl BloomPipeline {
    pub fn new(config: BloomConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BloomConfig {
        &self.config
    }

    /// Annotate one request to a terminal manifest.
    ///
    /// The noise filter runs on the first pass only; loop-backs re-enter
    /// at the symbol mapper, matching the re-entry mark the feedback stage
    /// records.
    pub fn run(&self, signal: &str) -> Result<BloomOutcome, BloomError> {
        let mut packet = BloomPacket::new(signal);
        let mut bus = SignalBus::new(&self.config);
        let feedback = FeedbackStage::new(&self.config);
        let scorer = HarmonicScorer::new(self.config.ready_threshold);
        let mut state = FeedbackState::Running;

        for pass in 0..=self.config.max_depth {
            debug!("forward pass {pass} at depth {}", packet.recursion_depth);

            if pass == 0 {
                bus.transmit_with(&mut packet, StageId::NoiseFilter, |p| {
                    NoiseFilter.process(p)
                })?;
            }

            // Pre-processing: left and right hemisphere passes
            bus.transmit_with(&mut packet, StageId::SymbolMapper, |p| {
                SymbolMapper.process(p)
            })?;
            bus.transmit_with(&mut packet, StageId::IntentInference, |p| {
                IntentInference.process(p)
            })?;
            bus.transmit_with(&mut packet, StageId::RecursionSeeder, |p| {
                RecursionSeeder.process(p)
            })?;
            bus.transmit_with(&mut packet, StageId::EntropyTagger, |p| {
                EntropyTagger.process(p)
            })?;
            bus.transmit_with(&mut packet, StageId::MemoryHarmonizer, |p| {
                MemoryHarmonizer.process(p)
            })?;

            // Integration
            bus.transmit_with(&mut packet, StageId::VectorConstructor, |p| {
                VectorConstructor.process(p)
            })?;
            bus.transmit_with(&mut packet, StageId::EntropyResolver, |p| {
                EntropyResolver.process(p)
            })?;
            bus.transmit_with(&mut packet, StageId::HarmonicScorer, |p| scorer.process(p))?;

            // Expansion: bus-coupled stages route first, then run
            if bus.transmit(&mut packet, StageId::ExecVectorizerLeft)? == RouteOutcome::Routed {
                ExecVectorizerLeft.process(&mut packet, &mut bus)?;
            }
            if bus.transmit(&mut packet, StageId::ExecVectorizerRight)? == RouteOutcome::Routed {
                ExecVectorizerRight.process(&mut packet, &mut bus)?;
            }
            if bus.transmit(&mut packet, StageId::SignalTunerLeft)? == RouteOutcome::Routed {
                SignalTunerLeft.process(&mut packet, &mut bus)?;
            }
            if bus.transmit(&mut packet, StageId::SignalTunerRight)? == RouteOutcome::Routed {
                SignalTunerRight.process(&mut packet, &mut bus)?;
            }
            if bus.transmit(&mut packet, StageId::ComposerLeft)? == RouteOutcome::Routed {
                ComposerLeft.process(&mut packet, &mut bus)?;
            }
            if bus.transmit(&mut packet, StageId::ComposerRight)? == RouteOutcome::Routed {
                ComposerRight.process(&mut packet, &mut bus)?;
            }
            if bus.transmit(&mut packet, StageId::Fusion)? == RouteOutcome::Routed {
                Fusion.process(&mut packet, &mut bus)?;
            }

            if bus.transmit(&mut packet, StageId::Feedback)? == RouteOutcome::Routed {
                state = feedback.process(&mut packet, &mut bus);
            }
            if state == FeedbackState::Terminal {
                break;
            }
        }

        let manifest = packet.annotations.output.clone().ok_or(BloomError::Incomplete)?;
        let stability = bus.field_stability(manifest.harmonic_sync);
        info!(
            "run complete: {} linear, {} recursive, sync {}, depth {}, stability {stability:.3}",
            manifest.linear.len(),
            manifest.recursive.len(),
            manifest.harmonic_sync,
            packet.recursion_depth
        );
        Ok(BloomOutcome { manifest, packet, stability })
    }
}
