//! The fused output of one pipeline run and its deterministic text
//! rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::glyph::{Containment, EntropyResolution, Glyph, Priority};

/// A linear, execution-ready instruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    /// Operation tag, `exec::<glyph>`
    pub action: String,
    pub confidence: f32,
    pub priority: Priority,
    /// Memory context the seed resolved against
    pub tag: String,
    /// Positional id, unique within one manifest (`dir_<i>`)
    pub path: String,
}

/// A recursion-ready instruction carrying loop control metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecursiveDirective {
    pub symbol: Glyph,
    /// Resolution kind that routed the node here (branch or defer)
    pub kind: EntropyResolution,
    /// Estimated recursion window
    pub window: f32,
    pub viability: f32,
    /// In (0, 1]; higher means tighter loops
    pub loop_risk: f32,
    /// Positional id (`rdir_<i>`)
    pub path: String,
    pub containment: Containment,
    /// Origin token of the underlying node
    pub origin: String,
}

/// The final structured output handed to the text-generation collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub linear: Vec<Directive>,
    pub recursive: Vec<RecursiveDirective>,
    /// Smoothed aggregate of confidences and viabilities
    pub harmonic_sync: f32,
    pub manifest_tag: String,
    pub timestamp: DateTime<Utc>,
    /// Explicit re-loop request honored by the feedback stage regardless
    /// of sync. Fusion always emits false; collaborators may set it.
    #[serde(default)]
    pub reloop_trigger: bool,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            linear: Vec::new(),
            recursive: Vec::new(),
            harmonic_sync: 0.0,
            manifest_tag: String::new(),
            timestamp: Utc::now(),
            reloop_trigger: false,
        }
    }
}

impl Manifest {
    /// Deterministic text rendering: one header line, then one line per
    /// linear directive in list order. This string is the payload handed
    /// to the text-generation collaborator.
    pub fn render(&self) -> String {
        let mut out = format!("Bloom Manifest – {}\n", self.timestamp.to_rfc3339());
        for directive in &self.linear {
            out.push_str(&format!(
                "[{}] {} ({} @ {}) | confidence: {}\n",
                directive.priority,
                directive.action,
                directive.tag,
                directive.path,
                directive.confidence
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_directive(i: usize, confidence: f32, priority: Priority) -> Directive {
        Directive {
            action: format!("exec::{}", Glyph::Phi),
            confidence,
            priority,
            tag: "quantum_engine".into(),
            path: format!("dir_{i}"),
        }
    }

    #[test]
    fn render_lists_linear_directives_in_order() {
        let manifest = Manifest {
            linear: vec![
                sample_directive(0, 2.7, Priority::High),
                sample_directive(1, 1.6, Priority::Normal),
            ],
            ..Manifest::default()
        };

        let text = manifest.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Bloom Manifest"));
        assert_eq!(lines[1], "[high] exec::Φ (quantum_engine @ dir_0) | confidence: 2.7");
        assert_eq!(lines[2], "[normal] exec::Φ (quantum_engine @ dir_1) | confidence: 1.6");
    }

    #[test]
    fn render_of_empty_manifest_is_header_only() {
        let text = Manifest::default().render();
        assert_eq!(text.lines().count(), 1);
    }
}
