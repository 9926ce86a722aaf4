//! Closed symbol vocabularies used as weighting keys throughout the
//! pipeline.

use std::fmt;
use serde::{Deserialize, Serialize};

/// One of the five symbolic labels the lexicon maps tokens onto, plus the
/// catch-all for unmapped tokens.
///
/// Glyphs are the primary weighting key: seed depth, harmonic weight,
/// tuning impact, and branch weight are all keyed by glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    Phi,
    Psi,
    Theta,
    Epsilon,
    Omega,
    /// Token had no lexicon entry. Never seeded, never weighted.
    Undefined,
}

impl Glyph {
    /// Rendering used in path ids and operation tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Glyph::Phi => "Φ",
            Glyph::Psi => "Ψ",
            Glyph::Theta => "Θ",
            Glyph::Epsilon => "ε",
            Glyph::Omega => "Ω",
            Glyph::Undefined => "∅",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic intent classes inferred by the right hemisphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Creation,
    Negation,
    Transformation,
    Activation,
    /// Fallback when no token matched the intent lexicon.
    Ambiguous,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Creation => "creation",
            Intent::Negation => "negation",
            Intent::Transformation => "transformation",
            Intent::Activation => "activation",
            Intent::Ambiguous => "ambiguous",
        }
    }
}

/// Stability decision assigned to each logic node by the entropy resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyResolution {
    /// Simplify and execute.
    Collapse,
    /// Postpone recursion.
    Defer,
    /// Fork a parallel recursion path.
    Branch,
    /// Not yet resolved. The in-pipeline resolver never leaves a node in
    /// this state; externally seeded vectors may carry it.
    None,
}

impl EntropyResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntropyResolution::Collapse => "collapse",
            EntropyResolution::Defer => "defer",
            EntropyResolution::Branch => "branch",
            EntropyResolution::None => "none",
        }
    }
}

impl fmt::Display for EntropyResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority tier of a linear directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Normal,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Normal => "normal",
        })
    }
}

/// Loop-risk containment applied to recursive directives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    EchoDampen,
    None,
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Containment::EchoDampen => "echo_dampen",
            Containment::None => "none",
        })
    }
}
