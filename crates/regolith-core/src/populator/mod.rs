//! Per-chunk population steps
//!
//! A populator places one category of content (flowers, ice spikes, random
//! blocks) into a freshly generated chunk. Populator values are immutable
//! configuration built through validating builders; placement draws all
//! randomness from the RNG handed to [`Populator::populate`], so a chunk's
//! content is fully determined by that stream.

mod big_mushroom;
mod double_plant;
mod flowers;
mod ice_spike;
mod random_block;
mod random_object;
mod shrub;

pub use big_mushroom::{BigMushroom, BigMushroomBuilder};
pub use double_plant::{DoublePlant, DoublePlantBuilder};
pub use flowers::{Flowers, FlowersBuilder};
pub use ice_spike::{IceSpike, IceSpikeBuilder};
pub use random_block::{PlacementTarget, RandomBlock, RandomBlockBuilder};
pub use random_object::{ObjectTemplate, RandomObject, RandomObjectBuilder};
pub use shrub::{Shrub, ShrubBuilder};

use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::weighted::TableError;
use rand::RngCore;
use thiserror::Error;

/// Errors returned by populator builders for missing or invalid fields
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("required field `{0}` was not set")]
    MissingField(&'static str),
    #[error("`{0}` requires at least one weighted entry")]
    EmptyTypes(&'static str),
    #[error("chance must be within [0, 1], got {0}")]
    InvalidChance(f64),
    #[error("height range is invalid: min {min} > max {max}")]
    InvalidHeightRange { min: f32, max: f32 },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// A per-chunk world-generation step placing one category of content
///
/// Populator values hold no mutable state; population of distinct chunks may
/// run concurrently as long as each call gets its own chunk and RNG.
pub trait Populator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Place this populator's content into the chunk
    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore);
}

/// Find a spot to root vegetation in the given column
///
/// Returns the local Y of the free cell directly above the surface when the
/// surface block is one of `soils`.
pub(crate) fn rooting_spot(chunk: &Chunk, x: usize, soils: &[u16]) -> Option<usize> {
    let surface = chunk.surface_y(x)?;
    if surface + 1 >= CHUNK_SIZE {
        return None;
    }
    if !soils.contains(&chunk.get(x, surface)) {
        return None;
    }
    if !chunk.is_air(x, surface + 1) {
        return None;
    }
    Some(surface + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regolith_blocks::BlockId;

    #[test]
    fn test_rooting_spot_requires_matching_soil() {
        let mut chunk = Chunk::new(0, 0);
        for y in 0..=10 {
            chunk.set(4, y, BlockId::STONE);
        }

        assert_eq!(rooting_spot(&chunk, 4, &[BlockId::GRASS]), None);
        assert_eq!(rooting_spot(&chunk, 4, &[BlockId::STONE]), Some(11));
    }

    #[test]
    fn test_rooting_spot_requires_free_cell_above() {
        let mut chunk = Chunk::new(0, 0);
        for y in 0..=10 {
            chunk.set(4, y, BlockId::GRASS);
        }
        chunk.set(4, 11, BlockId::LOG);

        assert_eq!(rooting_spot(&chunk, 4, &[BlockId::GRASS]), None);
    }

    #[test]
    fn test_rooting_spot_empty_column() {
        let chunk = Chunk::new(0, 0);
        assert_eq!(rooting_spot(&chunk, 0, &[BlockId::GRASS]), None);
    }
}
