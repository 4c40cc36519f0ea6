//! Double plant placement (two-cell-tall flora)

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{rooting_spot, BuildError, Populator};
use crate::weighted::WeightedTable;
use rand::{Rng, RngCore};
use regolith_blocks::{BlockId, DoublePlantKind};
use serde::{Deserialize, Serialize};

/// Scatters two-cell-tall plants across grassy surface cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoublePlant {
    plants_per_chunk: VariableAmount,
    plant_types: WeightedTable<DoublePlantKind>,
}

impl DoublePlant {
    pub fn builder() -> DoublePlantBuilder {
        DoublePlantBuilder::default()
    }

    pub fn plants_per_chunk(&self) -> VariableAmount {
        self.plants_per_chunk
    }

    pub fn set_plants_per_chunk(&mut self, count: VariableAmount) {
        self.plants_per_chunk = count;
    }

    pub fn plant_types(&self) -> &WeightedTable<DoublePlantKind> {
        &self.plant_types
    }

    pub fn plant_types_mut(&mut self) -> &mut WeightedTable<DoublePlantKind> {
        &mut self.plant_types
    }
}

impl Populator for DoublePlant {
    fn name(&self) -> &'static str {
        "double_plant"
    }

    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore) {
        let count = self.plants_per_chunk.get_floored_amount(rng).max(0);

        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let Some(spot) = rooting_spot(chunk, x, &[BlockId::GRASS, BlockId::DIRT]) else {
                continue;
            };
            // Both halves must fit; skip columns whose upper cell is taken
            if spot + 1 >= CHUNK_SIZE || !chunk.is_air(x, spot + 1) {
                continue;
            }
            let Some(kind) = self.plant_types.get(rng) else {
                break;
            };
            chunk.set(x, spot, kind.bottom_block_id());
            chunk.set(x, spot + 1, kind.top_block_id());
            placed += 1;
        }

        log::debug!(
            "placed {} double plants in chunk ({}, {})",
            placed,
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`DoublePlant`]
#[derive(Clone, Debug, Default)]
pub struct DoublePlantBuilder {
    per_chunk: Option<VariableAmount>,
    types: Vec<(DoublePlantKind, f64)>,
}

impl DoublePlantBuilder {
    /// Number of plants to attempt per chunk
    pub fn per_chunk(mut self, count: VariableAmount) -> Self {
        self.per_chunk = Some(count);
        self
    }

    /// Add a plant variety with a selection weight
    pub fn kind(mut self, kind: DoublePlantKind, weight: f64) -> Self {
        self.types.push((kind, weight));
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<DoublePlant, BuildError> {
        let plants_per_chunk = self
            .per_chunk
            .ok_or(BuildError::MissingField("plants_per_chunk"))?;
        if self.types.is_empty() {
            return Err(BuildError::EmptyTypes("plant_types"));
        }

        let mut plant_types = WeightedTable::new();
        for (kind, weight) in self.types {
            plant_types.insert(kind, weight)?;
        }

        Ok(DoublePlant {
            plants_per_chunk,
            plant_types,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::chunk_rng;

    fn meadow_chunk() -> Chunk {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..CHUNK_SIZE {
            for y in 0..=20 {
                chunk.set(x, y, if y == 20 { BlockId::GRASS } else { BlockId::DIRT });
            }
        }
        chunk
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            DoublePlant::builder().build().unwrap_err(),
            BuildError::MissingField("plants_per_chunk")
        );
        assert_eq!(
            DoublePlant::builder()
                .per_chunk(VariableAmount::fixed(3.0))
                .build()
                .unwrap_err(),
            BuildError::EmptyTypes("plant_types")
        );
    }

    #[test]
    fn test_both_halves_placed_together() {
        let plants = DoublePlant::builder()
            .per_chunk(VariableAmount::fixed(20.0))
            .kind(DoublePlantKind::Sunflower, 1.0)
            .build()
            .unwrap();

        let mut chunk = meadow_chunk();
        let mut rng = chunk_rng(3, 0, 0);
        plants.populate(&mut chunk, &mut rng);

        let bottoms = chunk.count_of(BlockId::SUNFLOWER);
        let tops = chunk.count_of(BlockId::DOUBLE_PLANT_TOP);
        assert!(bottoms > 0, "no sunflowers placed");
        assert_eq!(bottoms, tops, "orphaned plant halves");

        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE - 1 {
                if chunk.get(x, y) == BlockId::SUNFLOWER {
                    assert_eq!(chunk.get(x, y + 1), BlockId::DOUBLE_PLANT_TOP);
                }
            }
        }
    }

    #[test]
    fn test_skips_obstructed_columns() {
        let plants = DoublePlant::builder()
            .per_chunk(VariableAmount::fixed(40.0))
            .kind(DoublePlantKind::Lilac, 1.0)
            .build()
            .unwrap();

        let mut chunk = meadow_chunk();
        // A canopy one cell above the surface blocks the upper half everywhere
        for x in 0..CHUNK_SIZE {
            chunk.set(x, 22, BlockId::LEAVES);
        }

        let mut rng = chunk_rng(3, 0, 0);
        plants.populate(&mut chunk, &mut rng);
        assert_eq!(chunk.count_of(BlockId::LILAC), 0);
    }
}
