//! Deterministic symbolic annotation pipeline.
//!
//! Converts a short natural-language request into a manifest of weighted,
//! prioritized directives through a fixed sequence of annotation passes,
//! then hands the rendered manifest to an external text-generation
//! backend.
//!
//! One run owns a mutable [`packet::BloomPacket`] that accumulates stage
//! outputs, a [`bus::SignalBus`] carrying typed broadcasts between
//! expansion stages, and a bounded feedback loop that can re-enter
//! pre-processing up to `max_depth` times before finalizing.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`packet`] | Per-request record: signal, tokens, structured annotations, trace |
//! | [`bus`] | Append-only broadcast log, typed payload union, guarded routing |
//! | [`hemisphere`] | Pre-processing: noise filter, symbol/intent mapping, seeding, entropy tags, memory resonance |
//! | [`nexus`] | Integration: logic vector, entropy resolution, harmonic scoring |
//! | [`cluster`] | Expansion: vectorize, tune, compose, fuse |
//! | [`feedback`] | Loop-back vs terminal decision |
//! | [`pipeline`] | Orchestrator with the explicit bounded loop |
//! | [`bridge`] | Seam to the external text-generation collaborator |
//! | [`lexicon`] | Every fixed table and threshold |
//!
//! ```
//! use bloom_core::BloomPipeline;
//!
//! let pipeline = BloomPipeline::default();
//! let outcome = pipeline.run("build run").unwrap();
//! assert_eq!(outcome.manifest.harmonic_sync, 1.433);
//! println!("{}", outcome.manifest.render());
//! ```

pub mod bridge;
pub mod bus;
pub mod cluster;
pub mod config;
pub mod error;
pub mod feedback;
pub mod glyph;
pub mod harmonics;
pub mod hemisphere;
pub mod lexicon;
pub mod manifest;
pub mod nexus;
pub mod packet;
pub mod pipeline;

pub use bridge::{ManifestBridge, TextGenerator};
pub use bus::{Signal, SignalBus, StageId, Topic};
pub use config::BloomConfig;
pub use error::BloomError;
pub use glyph::{Containment, EntropyResolution, Glyph, Intent, Priority};
pub use manifest::{Directive, Manifest, RecursiveDirective};
pub use packet::BloomPacket;
pub use pipeline::{BloomOutcome, BloomPipeline};
