//! Pre-processing stages, split into two hemispheric tracks: the left
//! track cleans and maps the token stream, the right track infers intent
//! and seeds recursion. The tracks are not independent: the seeder
//! consumes the left track's symbol stream, and the memory harmonizer
//! consumes the right track's seeds.

pub mod left;
pub mod right;

pub use left::{MemoryHarmonizer, NoiseFilter, SymbolMapper};
pub use right::{EntropyTagger, IntentInference, RecursionSeeder};
