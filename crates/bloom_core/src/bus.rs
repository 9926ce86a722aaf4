//! Append-only broadcast log scoped to one pipeline run.
//!
//! Expansion stages communicate through the bus instead of reading each
//! other's annotations directly: a producer broadcasts a typed signal, a
//! consumer listens for the newest entry on a topic. Payloads are a closed
//! tagged union serialized per entry, and every decode is checked against
//! the topic it claims; there is no generic decoding of arbitrary text.
//!
//! The bus also owns the routing guard: every stage entry passes through
//! [`SignalBus::transmit`], which validates the packet, enforces the depth
//! cap fail-closed, and appends the audit trace.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cluster::tune::{TunedBranch, TunedSeed};
use crate::cluster::vectorize::{ExecutionSeed, ExtendedInstruction};
use crate::config::BloomConfig;
use crate::error::BloomError;
use crate::harmonics::{stabilize, GoldenLoop};
use crate::manifest::{Directive, Manifest, RecursiveDirective};
use crate::packet::BloomPacket;

/// Routing identity of a pipeline stage, used for traces and re-entry
/// marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    NoiseFilter,
    SymbolMapper,
    IntentInference,
    RecursionSeeder,
    EntropyTagger,
    MemoryHarmonizer,
    VectorConstructor,
    EntropyResolver,
    HarmonicScorer,
    ExecVectorizerLeft,
    ExecVectorizerRight,
    SignalTunerLeft,
    SignalTunerRight,
    ComposerLeft,
    ComposerRight,
    Fusion,
    Feedback,
}

impl StageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::NoiseFilter => "noise_filter",
            StageId::SymbolMapper => "symbol_mapper",
            StageId::IntentInference => "intent_inference",
            StageId::RecursionSeeder => "recursion_seeder",
            StageId::EntropyTagger => "entropy_tagger",
            StageId::MemoryHarmonizer => "memory_harmonizer",
            StageId::VectorConstructor => "vector_constructor",
            StageId::EntropyResolver => "entropy_resolver",
            StageId::HarmonicScorer => "harmonic_scorer",
            StageId::ExecVectorizerLeft => "exec_vectorizer_left",
            StageId::ExecVectorizerRight => "exec_vectorizer_right",
            StageId::SignalTunerLeft => "signal_tuner_left",
            StageId::SignalTunerRight => "signal_tuner_right",
            StageId::ComposerLeft => "composer_left",
            StageId::ComposerRight => "composer_right",
            StageId::Fusion => "fusion",
            StageId::Feedback => "feedback",
        }
    }
}

/// Topics the expansion stages publish on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    ExecutionSeeds,
    ExtendedVector,
    TunedVector,
    BranchTuning,
    LinearDirectives,
    RecursiveDirectives,
    Manifest,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::ExecutionSeeds => "execution_seeds",
            Topic::ExtendedVector => "extended_vector",
            Topic::TunedVector => "tuned_vector",
            Topic::BranchTuning => "branch_tuning",
            Topic::LinearDirectives => "linear_directives",
            Topic::RecursiveDirectives => "recursive_directives",
            Topic::Manifest => "manifest",
        }
    }
}

/// Typed payload union, one variant per topic.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "topic", content = "payload", rename_all = "snake_case")]
pub enum Signal {
    ExecutionSeeds(Vec<ExecutionSeed>),
    ExtendedVector(Vec<ExtendedInstruction>),
    TunedVector(Vec<TunedSeed>),
    BranchTuning(Vec<TunedBranch>),
    LinearDirectives(Vec<Directive>),
    RecursiveDirectives(Vec<RecursiveDirective>),
    Manifest(Manifest),
}

impl Signal {
    pub fn topic(&self) -> Topic {
        match self {
            Signal::ExecutionSeeds(_) => Topic::ExecutionSeeds,
            Signal::ExtendedVector(_) => Topic::ExtendedVector,
            Signal::TunedVector(_) => Topic::TunedVector,
            Signal::BranchTuning(_) => Topic::BranchTuning,
            Signal::LinearDirectives(_) => Topic::LinearDirectives,
            Signal::RecursiveDirectives(_) => Topic::RecursiveDirectives,
            Signal::Manifest(_) => Topic::Manifest,
        }
    }

    pub fn into_execution_seeds(self) -> Option<Vec<ExecutionSeed>> {
        match self {
            Signal::ExecutionSeeds(seeds) => Some(seeds),
            _ => None,
        }
    }

    pub fn into_extended_vector(self) -> Option<Vec<ExtendedInstruction>> {
        match self {
            Signal::ExtendedVector(instructions) => Some(instructions),
            _ => None,
        }
    }

    pub fn into_tuned_vector(self) -> Option<Vec<TunedSeed>> {
        match self {
            Signal::TunedVector(tuned) => Some(tuned),
            _ => None,
        }
    }

    pub fn into_branch_tuning(self) -> Option<Vec<TunedBranch>> {
        match self {
            Signal::BranchTuning(branches) => Some(branches),
            _ => None,
        }
    }

    pub fn into_linear_directives(self) -> Option<Vec<Directive>> {
        match self {
            Signal::LinearDirectives(directives) => Some(directives),
            _ => None,
        }
    }

    pub fn into_recursive_directives(self) -> Option<Vec<RecursiveDirective>> {
        match self {
            Signal::RecursiveDirectives(directives) => Some(directives),
            _ => None,
        }
    }

    pub fn into_manifest(self) -> Option<Manifest> {
        match self {
            Signal::Manifest(manifest) => Some(manifest),
            _ => None,
        }
    }
}

/// Result of a guarded pass-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Packet validated and traced; the stage may run.
    Routed,
    /// Depth cap breached; the stage must be skipped for this call.
    Halted,
}

struct BusEntry {
    topic: Topic,
    encoded: String,
}

/// One per top-level run, exclusively owned by that run's stage sequence.
pub struct SignalBus {
    log: Vec<BusEntry>,
    max_depth: u32,
    decode_failures: u32,
    resonance: GoldenLoop,
}

impl SignalBus {
    pub fn new(config: &BloomConfig) -> Self {
        Self {
            log: Vec::new(),
            max_depth: config.max_depth,
            decode_failures: 0,
            resonance: GoldenLoop::new(),
        }
    }

    /// Append one encoded signal to the log; returns the encoding.
    pub fn broadcast(&mut self, signal: &Signal) -> Result<String, BloomError> {
        let encoded = serde_json::to_string(signal)?;
        debug!("broadcast {}: {} bytes", signal.topic().as_str(), encoded.len());
        self.log.push(BusEntry {
            topic: signal.topic(),
            encoded: encoded.clone(),
        });
        Ok(encoded)
    }

    /// Decode the newest entry on `topic`, or `None` when no entry matches
    /// or the match fails to decode. A decode failure is an ordinary miss
    /// for the caller; the bus counts it and logs a warning.
    pub fn listen(&mut self, topic: Topic) -> Option<Signal> {
        let entry = self.log.iter().rev().find(|e| e.topic == topic)?;
        match serde_json::from_str::<Signal>(&entry.encoded) {
            Ok(signal) if signal.topic() == topic => Some(signal),
            Ok(signal) => {
                // Entry claims one topic but decodes as another
                warn!(
                    "bus entry on {} decoded as {}; treating as miss",
                    topic.as_str(),
                    signal.topic().as_str()
                );
                self.decode_failures += 1;
                None
            }
            Err(err) => {
                warn!("bus decode failure on {}: {err}", topic.as_str());
                self.decode_failures += 1;
                None
            }
        }
    }

    /// Guarded pass-through for a stage entry. Validates the packet, fails
    /// closed on a depth breach (halt trace, stage skipped), and appends
    /// the success trace otherwise.
    pub fn transmit(
        &mut self,
        packet: &mut BloomPacket,
        stage: StageId,
    ) -> Result<RouteOutcome, BloomError> {
        self.transmit_with(packet, stage, |_| {})
    }

    /// [`SignalBus::transmit`] with a transform hook applied to the packet
    /// before the success trace is written.
    pub fn transmit_with<F>(
        &mut self,
        packet: &mut BloomPacket,
        stage: StageId,
        transform: F,
    ) -> Result<RouteOutcome, BloomError>
    where
        F: FnOnce(&mut BloomPacket),
    {
        if packet.signal.trim().is_empty() {
            return Err(BloomError::MalformedPacket("empty signal"));
        }

        let depth = packet.recursion_depth;
        if depth > self.max_depth {
            warn!("routing halted at {}: depth {depth}", stage.as_str());
            packet.trace.push(format!(
                "bus halted: recursion depth {depth} exceeded at {}",
                stage.as_str()
            ));
            return Ok(RouteOutcome::Halted);
        }

        transform(packet);
        packet
            .trace
            .push(format!("bus routed: {} | depth={depth}", stage.as_str()));
        Ok(RouteOutcome::Routed)
    }

    /// Record a halt with its reason. Audit only, no control-flow effect.
    pub fn halt(&mut self, packet: &mut BloomPacket, reason: &str) {
        packet.trace.push(format!("halt: {reason}"));
    }

    /// Record a loop-back signal and fold its strength into the resonance
    /// accumulator. Audit only, no control-flow effect.
    pub fn feedback(&mut self, packet: &mut BloomPacket, strength: f32) {
        let resonance = self.resonance.iterate(strength);
        packet.trace.push(format!(
            "feedback loop engaged (strength={strength}, resonance={resonance:.3})"
        ));
    }

    /// Running golden-ratio resonance over feedback strengths.
    pub fn resonance(&self) -> f32 {
        self.resonance.output()
    }

    /// Count of swallowed decode errors; nonzero means a payload was
    /// corrupted or mislabeled somewhere upstream.
    pub fn decode_failures(&self) -> u32 {
        self.decode_failures
    }

    /// Drift-damped stability reading of the current field: resonance plus
    /// sync, suppressed by the fraction of log entries that failed to
    /// decode.
    pub fn field_stability(&self, sync: f32) -> f32 {
        let drift = if self.log.is_empty() {
            0.0
        } else {
            (self.decode_failures as f32 / self.log.len() as f32).min(1.0)
        };
        stabilize(self.resonance.output(), sync, drift)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
