//! Left-track passes: pre-symbolic stabilization, glyph mapping, and
//! memory resonance.

use crate::lexicon::{glyph_for, KNOWN_STRUCTURES, NOISE_TOKENS};
use crate::packet::{BloomPacket, MemoryMatch, SymbolPair};

/// Drops filler tokens and single-character fragments so only coherent
/// patterns enter the symbolic stream. Idempotent; runs once per request,
/// on the first pass only.
#[derive(Debug, Default)]
pub struct NoiseFilter;

impl NoiseFilter {
    pub fn process(&self, packet: &mut BloomPacket) {
        packet.symbols.retain(|token| {
            let trimmed = token.trim();
            !NOISE_TOKENS.contains(&trimmed) && trimmed.chars().count() > 1
        });
        packet.annotations.noise_filtered = true;
    }
}

/// Maps each surviving token through the glyph lexicon, producing the
/// ordered symbol stream. Deterministic and order-preserving; tokens with
/// no lexicon entry map to the undefined glyph.
#[derive(Debug, Default)]
pub struct SymbolMapper;

impl SymbolMapper {
    pub fn process(&self, packet: &mut BloomPacket) {
        let stream: Vec<SymbolPair> = packet
            .symbols
            .iter()
            .map(|token| SymbolPair {
                token: token.clone(),
                glyph: glyph_for(token),
            })
            .collect();
        packet.annotations.symbol_stream = Some(stream);
    }
}

/// Scores each recursion seed against the known symbol structures,
/// appending one match per structure that contains the seed's glyph. A
/// seed may resonate with zero, one, or many structures; the score is the
/// glyph's occurrence count within the structure. Runs after right-track
/// seeding.
#[derive(Debug, Default)]
pub struct MemoryHarmonizer;

impl MemoryHarmonizer {
    pub fn process(&self, packet: &mut BloomPacket) {
        let seeds = packet.annotations.seeds.clone().unwrap_or_default();
        let mut resonance = Vec::new();

        for seed in &seeds {
            for (memory_tag, structure) in KNOWN_STRUCTURES {
                if structure.contains(&seed.glyph) {
                    resonance.push(MemoryMatch {
                        seed: seed.origin.clone(),
                        glyph: seed.glyph,
                        memory_tag: (*memory_tag).to_owned(),
                        score: structure.iter().filter(|g| **g == seed.glyph).count() as u32,
                    });
                }
            }
        }

        packet.annotations.memory_resonance = Some(resonance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Glyph;
    use crate::packet::RecursionSeed;

    #[test]
    fn noise_filter_drops_fillers_and_fragments() {
        let mut packet = BloomPacket::new("uh build a quantum engine basically ...");
        NoiseFilter.process(&mut packet);
        assert_eq!(packet.symbols, vec!["build", "quantum", "engine"]);
        assert!(packet.annotations.noise_filtered);
    }

    #[test]
    fn noise_filter_is_idempotent() {
        let mut packet = BloomPacket::new("um run it");
        NoiseFilter.process(&mut packet);
        let once = packet.symbols.clone();
        NoiseFilter.process(&mut packet);
        assert_eq!(packet.symbols, once);
    }

    #[test]
    fn symbol_mapper_preserves_order_and_marks_unknowns() {
        let mut packet = BloomPacket::new("build mysterious run");
        SymbolMapper.process(&mut packet);

        let stream = packet.annotations.symbol_stream.unwrap();
        assert_eq!(stream.len(), 3);
        assert_eq!(stream[0].glyph, Glyph::Phi);
        assert_eq!(stream[1].glyph, Glyph::Undefined);
        assert_eq!(stream[2].glyph, Glyph::Psi);
    }

    #[test]
    fn harmonizer_matches_every_containing_structure() {
        let mut packet = BloomPacket::new("build");
        packet.annotations.seeds = Some(vec![RecursionSeed {
            origin: "build".into(),
            glyph: Glyph::Phi,
            depth: 3,
            position: 0,
        }]);

        MemoryHarmonizer.process(&mut packet);
        let resonance = packet.annotations.memory_resonance.unwrap();
        // Phi occurs in quantum_engine and harmonic_clock, not translator
        let tags: Vec<&str> = resonance.iter().map(|m| m.memory_tag.as_str()).collect();
        assert_eq!(tags, vec!["quantum_engine", "harmonic_clock"]);
        assert!(resonance.iter().all(|m| m.score == 1));
    }

    #[test]
    fn harmonizer_with_no_seeds_writes_empty_resonance() {
        let mut packet = BloomPacket::new("plain words");
        MemoryHarmonizer.process(&mut packet);
        assert_eq!(packet.annotations.memory_resonance, Some(Vec::new()));
    }
}
