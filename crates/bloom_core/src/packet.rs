//! The per-request annotation record.
//!
//! A [`BloomPacket`] is created once per incoming request and passed by
//! `&mut` through every stage, surviving loop-backs until the feedback
//! stage marks it terminal. Stage outputs land in [`Annotations`], a
//! structured record with one field per stage, so which fields exist after
//! which stage is a compile-time fact, not a runtime key lookup.

use serde::{Deserialize, Serialize};

use crate::bus::{StageId, Topic};
use crate::cluster::tune::{TunedBranch, TunedSeed};
use crate::cluster::vectorize::{ExecutionSeed, ExtendedInstruction};
use crate::glyph::{Glyph, Intent};
use crate::manifest::{Directive, Manifest, RecursiveDirective};
use crate::nexus::LogicNode;

/// One token with its mapped glyph, in stream order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPair {
    pub token: String,
    pub glyph: Glyph,
}

/// A recursion-worthy symbol emitted by the seeder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionSeed {
    /// Token the glyph was mapped from
    pub origin: String,
    pub glyph: Glyph,
    /// Depth assigned by the glyph depth table
    pub depth: u32,
    /// Index in the symbol stream
    pub position: usize,
}

/// An entropic token flagged by the tagger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntropyField {
    pub token: String,
    pub position: usize,
    pub entropy_level: f32,
}

/// One resonance hit between a seed and a known symbol structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMatch {
    /// Origin token of the matching seed
    pub seed: String,
    pub glyph: Glyph,
    pub memory_tag: String,
    /// Occurrences of the glyph in the matched structure
    pub score: u32,
}

/// Per-stage summary appended by the expansion passes for the downstream
/// language model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: StageId,
    pub signal_tag: Topic,
    pub summary: String,
}

/// Structured stage outputs. Each field is written by exactly one stage
/// and only ever overwritten by a later re-entry of that same stage;
/// expansion fields are replaced wholesale per pass, never merged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub noise_filtered: bool,
    pub symbol_stream: Option<Vec<SymbolPair>>,
    pub intents: Option<Vec<Intent>>,
    pub seeds: Option<Vec<RecursionSeed>>,
    pub entropy_fields: Option<Vec<EntropyField>>,
    pub memory_resonance: Option<Vec<MemoryMatch>>,
    pub logic_vector: Option<Vec<LogicNode>>,
    /// Mean harmonic score over the logic vector (0 when empty)
    pub harmonic_score: Option<f32>,
    pub recursion_ready: Option<bool>,
    pub execution_vector: Option<Vec<ExecutionSeed>>,
    pub extended_vector: Option<Vec<ExtendedInstruction>>,
    pub tuned_vector: Option<Vec<TunedSeed>>,
    pub branch_vector: Option<Vec<TunedBranch>>,
    pub linear_directives: Option<Vec<Directive>>,
    pub recursive_directives: Option<Vec<RecursiveDirective>>,
    /// Latest fused manifest (also broadcast on the bus)
    pub manifest: Option<Manifest>,
    /// Stage the packet re-enters at on loop-back; None once terminal
    pub reentry: Option<StageId>,
    /// Final manifest, set only by a terminal feedback decision
    pub output: Option<Manifest>,
    /// Expansion-stage summaries, keyed by stage (replaced per pass)
    pub stage_reports: Vec<StageReport>,
}

impl Annotations {
    /// Replace any existing report from the same stage, then append.
    /// Keeps one report per stage across loop-backs.
    pub fn record_report(&mut self, report: StageReport) {
        self.stage_reports.retain(|r| r.stage != report.stage);
        self.stage_reports.push(report);
    }
}

/// The shared annotation record flowing through all stages.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BloomPacket {
    /// Raw input text
    pub signal: String,
    /// Token sequence; mutated in place by the noise filter only
    pub symbols: Vec<String>,
    pub annotations: Annotations,
    /// Monotonically non-decreasing across loop-backs, capped by config
    pub recursion_depth: u32,
    /// Human-readable routing audit trail, appended by the bus
    pub trace: Vec<String>,
}

impl BloomPacket {
    /// Build a packet from a raw request, splitting it into whitespace
    /// tokens.
    pub fn new(signal: &str) -> Self {
        Self {
            signal: signal.to_owned(),
            symbols: signal.split_whitespace().map(str::to_owned).collect(),
            annotations: Annotations::default(),
            recursion_depth: 0,
            trace: Vec::new(),
        }
    }
}
