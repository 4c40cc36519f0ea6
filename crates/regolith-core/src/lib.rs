//! # Regolith - deterministic world-generation toolkit
//!
//! Variable random amounts, weighted selection tables, and per-chunk
//! populators for 2D sandbox worlds. Everything samples from a caller-supplied
//! RNG, so a world seed fully determines every chunk.

pub mod amount;
pub mod chunk;
pub mod generation;
pub mod populator;
pub mod preset;
pub mod rng;
pub mod seeded;
pub mod settings;
pub mod weighted;

/// Common imports for downstream generators
pub mod prelude {
    pub use crate::amount::VariableAmount;
    pub use crate::chunk::{Chunk, CHUNK_SIZE};
    pub use crate::generation::{TerrainParams, WorldGenerator};
    pub use crate::populator::Populator;
    pub use crate::preset::GenerationPreset;
    pub use crate::seeded::SeededVariableAmount;
    pub use crate::settings::BiomeGenerationSettings;
    pub use crate::weighted::WeightedTable;
    pub use regolith_blocks::{BlockId, BlockRegistry};
}
