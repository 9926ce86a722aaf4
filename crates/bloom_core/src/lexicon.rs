//! All fixed tables and thresholds in one place.
//!
//! Every stage reads its constants from here rather than carrying a private
//! copy. Unknown keys always resolve to a neutral contribution (0.0 or a
//! skip), keeping every lookup total.

use crate::glyph::{EntropyResolution, Glyph, Intent};

/// Filler tokens the noise filter drops outright.
pub const NOISE_TOKENS: &[&str] = &["uh", "um", "like", "...", "actually", "basically"];

/// Token → glyph lexicon for the symbol mapper.
pub fn glyph_for(token: &str) -> Glyph {
    match token {
        "build" | "design" => Glyph::Phi,
        "run" | "start" => Glyph::Psi,
        "delete" => Glyph::Omega,
        "transform" | "convert" => Glyph::Epsilon,
        "think" | "remember" => Glyph::Theta,
        _ => Glyph::Undefined,
    }
}

/// Token → intent lexicon for the right hemisphere.
pub fn intent_for(token: &str) -> Option<Intent> {
    match token {
        "build" | "make" | "design" => Some(Intent::Creation),
        "destroy" | "remove" => Some(Intent::Negation),
        "translate" | "convert" => Some(Intent::Transformation),
        "run" | "start" => Some(Intent::Activation),
        _ => None,
    }
}

/// Named symbol structures the memory harmonizer scores resonance against.
pub const KNOWN_STRUCTURES: &[(&str, &[Glyph])] = &[
    ("quantum_engine", &[Glyph::Phi, Glyph::Psi, Glyph::Theta]),
    ("harmonic_clock", &[Glyph::Theta, Glyph::Epsilon, Glyph::Phi]),
    ("translator", &[Glyph::Psi, Glyph::Epsilon]),
];

/// Glyph → recursion depth for the seeder. Glyphs without an entry are not
/// recursion-worthy and produce no seed.
pub fn seed_depth(glyph: Glyph) -> Option<u32> {
    match glyph {
        Glyph::Phi => Some(3),
        Glyph::Psi => Some(2),
        Glyph::Epsilon => Some(1),
        Glyph::Theta => Some(4),
        Glyph::Omega => Some(0),
        Glyph::Undefined => None,
    }
}

/// Keywords the entropy tagger flags as entropic.
pub const ENTROPIC_TOKENS: &[&str] = &[
    "quantum", "shift", "entropy", "collapse", "flux", "decode", "mirror",
];

/// Placeholder entropy level assigned to every tagged token.
pub const PLACEHOLDER_ENTROPY: f32 = 0.9;

/// Entropy weight at or above which a node branches.
pub const BRANCH_THRESHOLD: f32 = 0.75;

/// Entropy weight at or above which a node defers (below the branch
/// threshold).
pub const DEFER_THRESHOLD: f32 = 0.4;

/// Harmonic polarity per glyph. Unknown symbols contribute 0.0.
pub fn symbol_weight(glyph: Glyph) -> f32 {
    match glyph {
        Glyph::Phi => 1.0,
        Glyph::Psi => 0.8,
        Glyph::Theta => 0.6,
        Glyph::Epsilon => -0.5,
        Glyph::Omega => -1.0,
        Glyph::Undefined => 0.0,
    }
}

/// Scoring bias per resolution. `None` keeps the neutral midpoint so
/// externally seeded, unresolved nodes still score.
pub fn resolution_bias(resolution: EntropyResolution) -> f32 {
    match resolution {
        EntropyResolution::Collapse => 0.9,
        EntropyResolution::Defer => 0.4,
        EntropyResolution::Branch => 0.2,
        EntropyResolution::None => 0.5,
    }
}

/// Harmonic bonus for a node backed by a memory tag.
pub const MEMORY_BONUS: f32 = 0.3;

/// Mean harmonic score required to flag a vector recursion-ready.
pub const READY_THRESHOLD: f32 = 2.5;

/// Execution impact per glyph for the left signal tuner. Unknown symbols
/// contribute 0.0 (canonical default for both tuning tables).
pub fn symbol_impact(glyph: Glyph) -> f32 {
    match glyph {
        Glyph::Phi => 0.9,
        Glyph::Psi => 0.8,
        Glyph::Theta => 0.6,
        Glyph::Omega => 0.4,
        Glyph::Epsilon => -0.5,
        Glyph::Undefined => 0.0,
    }
}

/// Branch weight per glyph for the right signal tuner.
pub fn branch_weight(glyph: Glyph) -> f32 {
    match glyph {
        Glyph::Phi => 1.0,
        Glyph::Psi => 0.9,
        Glyph::Theta => 0.7,
        Glyph::Epsilon => -0.6,
        Glyph::Omega => -1.2,
        Glyph::Undefined => 0.0,
    }
}

/// Impact above which a tuned seed is high priority.
pub const HIGH_PRIORITY_IMPACT: f32 = 0.7;

/// Loop risk above which a recursive directive gets echo dampening.
pub const ECHO_DAMPEN_RISK: f32 = 0.7;

/// Recursion window multiplier applied to branching resolutions.
pub const BRANCH_WINDOW_FACTOR: f32 = 1.5;
