//! Boundary to the external text-generation collaborator.
//!
//! The core makes no contract about the generated content: the rendered
//! manifest goes out, the reply comes back unmodified. Concrete backends
//! (local model daemons, remote APIs) live outside this crate and plug in
//! through [`TextGenerator`].

use crate::error::BloomError;
use crate::manifest::Manifest;
use crate::packet::BloomPacket;
use crate::pipeline::BloomPipeline;

/// A text-generation backend.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, BloomError>;
}

/// Reply from one bridged request.
#[derive(Debug)]
pub struct BridgeReply {
    pub manifest: Manifest,
    /// The rendered manifest handed to the generator
    pub prompt: String,
    /// The generator's reply, passed through unmodified
    pub reply: String,
    pub packet: BloomPacket,
}

/// Runs the pipeline, renders the manifest, and forwards it to the
/// generator.
pub struct ManifestBridge {
    pipeline: BloomPipeline,
    generator: Box<dyn TextGenerator>,
}

impl ManifestBridge {
    pub fn new(pipeline: BloomPipeline, generator: Box<dyn TextGenerator>) -> Self {
        Self { pipeline, generator }
    }

    pub fn process(&self, signal: &str) -> Result<BridgeReply, BloomError> {
        let outcome = self.pipeline.run(signal)?;
        let prompt = outcome.manifest.render();
        let reply = self.generator.generate(&prompt)?;
        Ok(BridgeReply {
            manifest: outcome.manifest,
            prompt,
            reply,
            packet: outcome.packet,
        })
    }
}
