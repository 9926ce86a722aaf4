use thiserror::Error;

/// Errors surfaced by the annotation core.
///
/// Lookup misses, empty vectors, and bus decode failures are deliberately
/// NOT errors: every scoring path stays total by defaulting to a neutral
/// contribution. Only genuinely malformed inputs and boundary failures
/// reach this type.
#[derive(Debug, Error)]
pub enum BloomError {
    /// A packet failed validation at the bus pass-through before any stage
    /// touched it.
    #[error("malformed packet: {0}")]
    MalformedPacket(&'static str),

    /// A broadcast payload could not be encoded for the bus log.
    #[error("signal encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The pipeline finished its bounded loop without a terminal manifest.
    #[error("pipeline ended without a terminal manifest")]
    Incomplete,

    /// The external text-generation collaborator reported a failure.
    #[error("text generation failed: {0}")]
    Generation(String),
}
