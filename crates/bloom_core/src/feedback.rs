//! Feedback stage: decides between loop-back and terminal output.

use log::{debug, info};

use crate::bus::{Signal, SignalBus, StageId, Topic};
use crate::config::BloomConfig;
use crate::manifest::Manifest;
use crate::packet::BloomPacket;

/// Lifecycle of one logical request through the feedback stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackState {
    /// A forward pass is still in flight.
    Running,
    /// The packet re-enters pre-processing at the recorded depth.
    Loop { depth: u32 },
    /// The manifest is final; the packet is done.
    Terminal,
}

/// Reads the latest fused manifest and gates the loop-back transition.
///
/// Loops while the depth budget allows AND the manifest is either below
/// the sync threshold or explicitly requests a re-loop; terminal
/// otherwise. The depth budget comes from the same `max_depth` the bus
/// guard uses.
#[derive(Debug)]
pub struct FeedbackStage {
    config: BloomConfig,
}

impl FeedbackStage {
    pub fn new(config: &BloomConfig) -> Self {
        Self { config: config.clone() }
    }

    pub fn process(&self, packet: &mut BloomPacket, bus: &mut SignalBus) -> FeedbackState {
        let manifest = bus
            .listen(Topic::Manifest)
            .and_then(Signal::into_manifest)
            .or_else(|| packet.annotations.manifest.clone())
            .unwrap_or_else(Manifest::default);

        let depth = packet.recursion_depth;
        let sync = manifest.harmonic_sync;
        let wants_loop = sync < self.config.sync_threshold || manifest.reloop_trigger;

        if self.config.may_loop(depth) && wants_loop {
            packet.recursion_depth = depth + 1;
            packet.annotations.reentry = Some(StageId::SymbolMapper);
            bus.feedback(packet, sync);
            debug!(
                "re-looping to {} at depth {}",
                StageId::SymbolMapper.as_str(),
                packet.recursion_depth
            );
            FeedbackState::Loop { depth: packet.recursion_depth }
        } else {
            packet.annotations.reentry = None;
            packet.annotations.output = Some(manifest);
            info!("manifest finalized at depth {depth} (sync {sync})");
            FeedbackState::Terminal
        }
    }
}
