//! Fusion: merges the two directive lists into the harmonic manifest.

use chrono::Utc;

use crate::bus::{Signal, SignalBus, StageId, Topic};
use crate::error::BloomError;
use crate::harmonics::round3;
use crate::manifest::Manifest;
use crate::packet::{BloomPacket, StageReport};

/// Tag stamped on every fused manifest.
pub const MANIFEST_TAG: &str = "bloom_core_ready";

/// Reads both directive lists off the bus and fuses them.
///
/// `harmonic_sync = round3((Σ confidence + Σ viability) / (n_linear +
/// n_recursive + 1))`. The +1 in the denominator smooths the score and
/// keeps the empty case at exactly 0.0 instead of a division error.
#[derive(Debug, Default)]
pub struct Fusion;

impl Fusion {
    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> Result<(), BloomError> {
        let linear = bus
            .listen(Topic::LinearDirectives)
            .and_then(Signal::into_linear_directives)
            .unwrap_or_default();
        let recursive = bus
            .listen(Topic::RecursiveDirectives)
            .and_then(Signal::into_recursive_directives)
            .unwrap_or_default();

        let total_confidence: f32 = linear.iter().map(|d| d.confidence).sum();
        let total_viability: f32 = recursive.iter().map(|d| d.viability).sum();
        let harmonic_sync = round3(
            (total_confidence + total_viability) / (linear.len() + recursive.len() + 1) as f32,
        );

        let manifest = Manifest {
            linear,
            recursive,
            harmonic_sync,
            manifest_tag: MANIFEST_TAG.to_owned(),
            timestamp: Utc::now(),
            reloop_trigger: false,
        };

        bus.broadcast(&Signal::Manifest(manifest.clone()))?;
        packet.annotations.manifest = Some(manifest);
        packet.annotations.record_report(StageReport {
            stage: StageId::Fusion,
            signal_tag: Topic::Manifest,
            summary: "linear and recursive directives fused into manifest".to_owned(),
        });
        Ok(())
    }
}
