//! Right-track passes: intent inference, recursion seeding, and entropy
//! tagging.

use crate::lexicon::{intent_for, seed_depth, ENTROPIC_TOKENS, PLACEHOLDER_ENTROPY};
use crate::packet::{BloomPacket, EntropyField, RecursionSeed};

/// Infers the request's semantic intents from the token stream. Duplicates
/// collapse (first occurrence wins the position); a stream with no lexicon
/// hit yields the single intent `ambiguous`.
#[derive(Debug, Default)]
pub struct IntentInference;

impl IntentInference {
    pub fn process(&self, packet: &mut BloomPacket) {
        let mut intents = Vec::new();
        for token in &packet.symbols {
            if let Some(intent) = intent_for(token) {
                if !intents.contains(&intent) {
                    intents.push(intent);
                }
            }
        }
        if intents.is_empty() {
            intents.push(crate::glyph::Intent::Ambiguous);
        }
        packet.annotations.intents = Some(intents);
    }
}

/// Emits one recursion seed per symbol-stream entry whose glyph carries a
/// depth assignment; glyphs outside the depth table are dropped.
#[derive(Debug, Default)]
pub struct RecursionSeeder;

impl RecursionSeeder {
    pub fn process(&self, packet: &mut BloomPacket) {
        let stream = packet.annotations.symbol_stream.clone().unwrap_or_default();
        let seeds: Vec<RecursionSeed> = stream
            .iter()
            .enumerate()
            .filter_map(|(position, pair)| {
                seed_depth(pair.glyph).map(|depth| RecursionSeed {
                    origin: pair.token.clone(),
                    glyph: pair.glyph,
                    depth,
                    position,
                })
            })
            .collect();
        packet.annotations.seeds = Some(seeds);
    }
}

/// Flags tokens from the entropic keyword set, each at the constant
/// placeholder level with its position in the current token sequence.
#[derive(Debug, Default)]
pub struct EntropyTagger;

impl EntropyTagger {
    pub fn process(&self, packet: &mut BloomPacket) {
        let fields: Vec<EntropyField> = packet
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, token)| ENTROPIC_TOKENS.contains(&token.as_str()))
            .map(|(position, token)| EntropyField {
                token: token.clone(),
                position,
                entropy_level: PLACEHOLDER_ENTROPY,
            })
            .collect();
        packet.annotations.entropy_fields = Some(fields);
    }
}
