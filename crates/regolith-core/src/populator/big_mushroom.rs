//! Giant mushroom placement

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{rooting_spot, BuildError, Populator};
use crate::weighted::WeightedTable;
use rand::{Rng, RngCore};
use regolith_blocks::{BlockId, MushroomKind};
use serde::{Deserialize, Serialize};

/// Stem heights in cells; the cap sits on top of the stem
const MIN_STEM_HEIGHT: usize = 4;
const MAX_STEM_HEIGHT: usize = 7;

/// Grows giant mushrooms on dirt and grass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BigMushroom {
    mushrooms_per_chunk: VariableAmount,
    mushroom_types: WeightedTable<MushroomKind>,
}

impl BigMushroom {
    pub fn builder() -> BigMushroomBuilder {
        BigMushroomBuilder::default()
    }

    pub fn mushrooms_per_chunk(&self) -> VariableAmount {
        self.mushrooms_per_chunk
    }

    pub fn set_mushrooms_per_chunk(&mut self, count: VariableAmount) {
        self.mushrooms_per_chunk = count;
    }

    pub fn mushroom_types(&self) -> &WeightedTable<MushroomKind> {
        &self.mushroom_types
    }

    pub fn mushroom_types_mut(&mut self) -> &mut WeightedTable<MushroomKind> {
        &mut self.mushroom_types
    }

    /// Check that the stem column and cap center are free
    fn fits(chunk: &Chunk, x: usize, base: usize, stem_height: usize) -> bool {
        let top = base + stem_height;
        if top >= CHUNK_SIZE {
            return false;
        }
        (base..=top).all(|y| chunk.is_air(x, y))
    }
}

impl Populator for BigMushroom {
    fn name(&self) -> &'static str {
        "big_mushroom"
    }

    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore) {
        let count = self.mushrooms_per_chunk.get_floored_amount(rng).max(0);

        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let Some(base) = rooting_spot(chunk, x, &[BlockId::GRASS, BlockId::DIRT]) else {
                continue;
            };

            let stem_height = rng.gen_range(MIN_STEM_HEIGHT..=MAX_STEM_HEIGHT);
            if !Self::fits(chunk, x, base, stem_height) {
                continue;
            }
            let Some(kind) = self.mushroom_types.get(rng) else {
                break;
            };
            let cap = kind.cap_block_id();

            for y in base..base + stem_height {
                chunk.set(x, y, BlockId::MUSHROOM_STEM);
            }

            // Cap: three cells wide, placed only into free cells
            let cap_y = base + stem_height;
            chunk.set(x, cap_y, cap);
            if x > 0 && chunk.is_air(x - 1, cap_y) {
                chunk.set(x - 1, cap_y, cap);
            }
            if x + 1 < CHUNK_SIZE && chunk.is_air(x + 1, cap_y) {
                chunk.set(x + 1, cap_y, cap);
            }
            placed += 1;
        }

        log::debug!(
            "placed {} big mushrooms in chunk ({}, {})",
            placed,
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`BigMushroom`]
#[derive(Clone, Debug, Default)]
pub struct BigMushroomBuilder {
    per_chunk: Option<VariableAmount>,
    types: Vec<(MushroomKind, f64)>,
}

impl BigMushroomBuilder {
    /// Number of mushrooms to attempt per chunk
    pub fn per_chunk(mut self, count: VariableAmount) -> Self {
        self.per_chunk = Some(count);
        self
    }

    /// Add a mushroom variety with a selection weight
    pub fn kind(mut self, kind: MushroomKind, weight: f64) -> Self {
        self.types.push((kind, weight));
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<BigMushroom, BuildError> {
        let mushrooms_per_chunk = self
            .per_chunk
            .ok_or(BuildError::MissingField("mushrooms_per_chunk"))?;
        if self.types.is_empty() {
            return Err(BuildError::EmptyTypes("mushroom_types"));
        }

        let mut mushroom_types = WeightedTable::new();
        for (kind, weight) in self.types {
            mushroom_types.insert(kind, weight)?;
        }

        Ok(BigMushroom {
            mushrooms_per_chunk,
            mushroom_types,
        })
    }
}
