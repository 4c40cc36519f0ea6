//! Shrub placement (grass tufts, ferns, dead bushes)

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{rooting_spot, BuildError, Populator};
use crate::weighted::WeightedTable;
use rand::{Rng, RngCore};
use regolith_blocks::{BlockId, ShrubKind};
use serde::{Deserialize, Serialize};

// Dead bushes root in sand as well, so sand is part of the soil set.
const SOILS: [u16; 3] = [BlockId::GRASS, BlockId::DIRT, BlockId::SAND];

/// Scatters low ground cover across surface cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shrub {
    shrubs_per_chunk: VariableAmount,
    shrub_types: WeightedTable<ShrubKind>,
}

impl Shrub {
    pub fn builder() -> ShrubBuilder {
        ShrubBuilder::default()
    }

    pub fn shrubs_per_chunk(&self) -> VariableAmount {
        self.shrubs_per_chunk
    }

    pub fn set_shrubs_per_chunk(&mut self, count: VariableAmount) {
        self.shrubs_per_chunk = count;
    }

    pub fn shrub_types(&self) -> &WeightedTable<ShrubKind> {
        &self.shrub_types
    }

    pub fn shrub_types_mut(&mut self) -> &mut WeightedTable<ShrubKind> {
        &mut self.shrub_types
    }
}

impl Populator for Shrub {
    fn name(&self) -> &'static str {
        "shrub"
    }

    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore) {
        let count = self.shrubs_per_chunk.get_floored_amount(rng).max(0);

        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let Some(spot) = rooting_spot(chunk, x, &SOILS) else {
                continue;
            };
            let Some(kind) = self.shrub_types.get(rng) else {
                break;
            };
            chunk.set(x, spot, kind.block_id());
            placed += 1;
        }

        log::debug!(
            "placed {} shrubs in chunk ({}, {})",
            placed,
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`Shrub`]
#[derive(Clone, Debug, Default)]
pub struct ShrubBuilder {
    per_chunk: Option<VariableAmount>,
    types: Vec<(ShrubKind, f64)>,
}

impl ShrubBuilder {
    /// Number of shrubs to attempt per chunk
    pub fn per_chunk(mut self, count: VariableAmount) -> Self {
        self.per_chunk = Some(count);
        self
    }

    /// Add a shrub variety with a selection weight
    pub fn kind(mut self, kind: ShrubKind, weight: f64) -> Self {
        self.types.push((kind, weight));
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<Shrub, BuildError> {
        let shrubs_per_chunk = self
            .per_chunk
            .ok_or(BuildError::MissingField("shrubs_per_chunk"))?;
        if self.types.is_empty() {
            return Err(BuildError::EmptyTypes("shrub_types"));
        }

        let mut shrub_types = WeightedTable::new();
        for (kind, weight) in self.types {
            shrub_types.insert(kind, weight)?;
        }

        Ok(Shrub {
            shrubs_per_chunk,
            shrub_types,
        })
    }
}
