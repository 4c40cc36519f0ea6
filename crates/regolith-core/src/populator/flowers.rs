//! Flower placement

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{rooting_spot, BuildError, Populator};
use crate::weighted::WeightedTable;
use rand::{Rng, RngCore};
use regolith_blocks::{BlockId, PlantKind};
use serde::{Deserialize, Serialize};

/// Scatters flowers across grassy surface cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flowers {
    flowers_per_chunk: VariableAmount,
    flower_types: WeightedTable<PlantKind>,
}

impl Flowers {
    pub fn builder() -> FlowersBuilder {
        FlowersBuilder::default()
    }

    pub fn flowers_per_chunk(&self) -> VariableAmount {
        self.flowers_per_chunk
    }

    pub fn set_flowers_per_chunk(&mut self, count: VariableAmount) {
        self.flowers_per_chunk = count;
    }

    pub fn flower_types(&self) -> &WeightedTable<PlantKind> {
        &self.flower_types
    }

    pub fn flower_types_mut(&mut self) -> &mut WeightedTable<PlantKind> {
        &mut self.flower_types
    }
}

impl Populator for Flowers {
    fn name(&self) -> &'static str {
        "flowers"
    }

    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore) {
        let count = self.flowers_per_chunk.get_floored_amount(rng).max(0);

        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let Some(spot) = rooting_spot(chunk, x, &[BlockId::GRASS, BlockId::DIRT]) else {
                continue;
            };
            let Some(kind) = self.flower_types.get(rng) else {
                break;
            };
            chunk.set(x, spot, kind.block_id());
            placed += 1;
        }

        log::debug!(
            "placed {} flowers in chunk ({}, {})",
            placed,
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`Flowers`]
#[derive(Clone, Debug, Default)]
pub struct FlowersBuilder {
    per_chunk: Option<VariableAmount>,
    types: Vec<(PlantKind, f64)>,
}

impl FlowersBuilder {
    /// Number of flowers to attempt per chunk
    pub fn per_chunk(mut self, count: VariableAmount) -> Self {
        self.per_chunk = Some(count);
        self
    }

    /// Add a flower variety with a selection weight
    pub fn kind(mut self, kind: PlantKind, weight: f64) -> Self {
        self.types.push((kind, weight));
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<Flowers, BuildError> {
        let flowers_per_chunk = self
            .per_chunk
            .ok_or(BuildError::MissingField("flowers_per_chunk"))?;
        if self.types.is_empty() {
            return Err(BuildError::EmptyTypes("flower_types"));
        }

        let mut flower_types = WeightedTable::new();
        for (kind, weight) in self.types {
            flower_types.insert(kind, weight)?;
        }

        Ok(Flowers {
            flowers_per_chunk,
            flower_types,
        })
    }
}
