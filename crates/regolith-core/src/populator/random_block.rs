//! Random single-block placement

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{BuildError, Populator};
use rand::{Rng, RngCore};
use regolith_blocks::BlockRegistry;
use serde::{Deserialize, Serialize};

/// Placement predicate for [`RandomBlock`] attempts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlacementTarget {
    /// Cell is air
    Air,
    /// Cell is air with a solid cell directly below
    OnGround,
    /// Cell is air with a solid cell directly above (cave ceilings)
    AtCeiling,
    /// Cell is solid
    InsideSolid,
    /// Every listed target must match
    All(Vec<PlacementTarget>),
}

impl PlacementTarget {
    /// Check whether the cell at local coordinates matches this target
    pub fn matches(&self, chunk: &Chunk, x: usize, y: usize) -> bool {
        let registry = BlockRegistry::global();
        let solid_at =
            |cx: usize, cy: usize| -> bool { registry.get(chunk.get(cx, cy)).solid };

        match self {
            PlacementTarget::Air => chunk.is_air(x, y),
            PlacementTarget::OnGround => chunk.is_air(x, y) && y > 0 && solid_at(x, y - 1),
            PlacementTarget::AtCeiling => {
                chunk.is_air(x, y) && y + 1 < CHUNK_SIZE && solid_at(x, y + 1)
            }
            PlacementTarget::InsideSolid => solid_at(x, y),
            PlacementTarget::All(targets) => targets.iter().all(|t| t.matches(chunk, x, y)),
        }
    }
}

/// Scatters single blocks wherever a placement target matches
///
/// The workhorse for ores, fire pockets and similar point features: each
/// attempt draws a position, tests the target predicate and places on
/// success.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomBlock {
    block: u16,
    attempts_per_chunk: VariableAmount,
    height_range: VariableAmount,
    placement_target: PlacementTarget,
}

impl RandomBlock {
    pub fn builder() -> RandomBlockBuilder {
        RandomBlockBuilder::default()
    }

    pub fn block(&self) -> u16 {
        self.block
    }

    pub fn set_block(&mut self, block: u16) {
        self.block = block;
    }

    pub fn attempts_per_chunk(&self) -> VariableAmount {
        self.attempts_per_chunk
    }

    pub fn set_attempts_per_chunk(&mut self, count: VariableAmount) {
        self.attempts_per_chunk = count;
    }

    pub fn height_range(&self) -> VariableAmount {
        self.height_range
    }

    pub fn set_height_range(&mut self, height: VariableAmount) {
        self.height_range = height;
    }

    pub fn placement_target(&self) -> &PlacementTarget {
        &self.placement_target
    }

    pub fn set_placement_target(&mut self, target: PlacementTarget) {
        self.placement_target = target;
    }
}

impl Populator for RandomBlock {
    fn name(&self) -> &'static str {
        "random_block"
    }

    fn populate(&self, chunk: &mut Chunk, rng: &mut dyn RngCore) {
        let attempts = self.attempts_per_chunk.get_floored_amount(rng).max(0);

        let mut placed = 0;
        for _ in 0..attempts {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let y = self.height_range.get_floored_amount(rng);
            if y < 0 || y >= CHUNK_SIZE as i64 {
                continue;
            }
            let y = y as usize;

            if self.placement_target.matches(chunk, x, y) {
                chunk.set(x, y, self.block);
                placed += 1;
            }
        }

        log::debug!(
            "placed {} of block {} in chunk ({}, {})",
            placed,
            self.block,
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`RandomBlock`]
#[derive(Clone, Debug, Default)]
pub struct RandomBlockBuilder {
    block: Option<u16>,
    per_chunk: Option<VariableAmount>,
    height_range: Option<VariableAmount>,
    placement_target: Option<PlacementTarget>,
}

impl RandomBlockBuilder {
    /// Block to place
    pub fn block(mut self, block: u16) -> Self {
        self.block = Some(block);
        self
    }

    /// Number of placement attempts per chunk
    pub fn per_chunk(mut self, count: VariableAmount) -> Self {
        self.per_chunk = Some(count);
        self
    }

    /// Local Y range to draw attempt positions from
    pub fn height_range(mut self, height: VariableAmount) -> Self {
        self.height_range = Some(height);
        self
    }

    /// Predicate a cell must satisfy for placement
    pub fn placement_target(mut self, target: PlacementTarget) -> Self {
        self.placement_target = Some(target);
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<RandomBlock, BuildError> {
        Ok(RandomBlock {
            block: self.block.ok_or(BuildError::MissingField("block"))?,
            attempts_per_chunk: self
                .per_chunk
                .ok_or(BuildError::MissingField("attempts_per_chunk"))?,
            height_range: self
                .height_range
                .ok_or(BuildError::MissingField("height_range"))?,
            placement_target: self
                .placement_target
                .ok_or(BuildError::MissingField("placement_target"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::chunk_rng;
    use regolith_blocks::BlockId;

    fn cave_chunk() -> Chunk {
        // Stone everywhere except an air band from y=20 to y=40
        let mut chunk = Chunk::new(0, 0);
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                if !(20..=40).contains(&y) {
                    chunk.set(x, y, BlockId::STONE);
                }
            }
        }
        chunk
    }

    #[test]
    fn test_builder_requires_all_fields() {
        assert_eq!(
            RandomBlock::builder().build().unwrap_err(),
            BuildError::MissingField("block")
        );
        assert_eq!(
            RandomBlock::builder()
                .block(BlockId::GRAVEL)
                .build()
                .unwrap_err(),
            BuildError::MissingField("attempts_per_chunk")
        );
    }

    #[test]
    fn test_on_ground_places_on_cave_floor() {
        let blocks = RandomBlock::builder()
            .block(BlockId::GRAVEL)
            .per_chunk(VariableAmount::fixed(400.0))
            .height_range(VariableAmount::base_with_random_addition(0.0, 64.0).unwrap())
            .placement_target(PlacementTarget::OnGround)
            .build()
            .unwrap();

        let mut chunk = cave_chunk();
        let mut rng = chunk_rng(31, 0, 0);
        blocks.populate(&mut chunk, &mut rng);

        let placed = chunk.count_of(BlockId::GRAVEL);
        assert!(placed > 0, "nothing placed on the cave floor");

        // Gravel only lands in the air band, resting on something solid
        // (stone, or gravel placed by an earlier attempt)
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                if chunk.get(x, y) == BlockId::GRAVEL {
                    assert!((20..=40).contains(&y), "gravel outside air band at y={}", y);
                    assert!(!chunk.is_air(x, y - 1), "floating gravel at y={}", y);
                }
            }
        }
    }

    #[test]
    fn test_at_ceiling_places_under_cave_roof() {
        let blocks = RandomBlock::builder()
            .block(BlockId::ICE)
            .per_chunk(VariableAmount::fixed(400.0))
            .height_range(VariableAmount::base_with_random_addition(0.0, 64.0).unwrap())
            .placement_target(PlacementTarget::AtCeiling)
            .build()
            .unwrap();

        let mut chunk = cave_chunk();
        let mut rng = chunk_rng(31, 0, 0);
        blocks.populate(&mut chunk, &mut rng);

        let placed = chunk.count_of(BlockId::ICE);
        assert!(placed > 0, "nothing placed at the cave ceiling");

        // Ice only hangs in the air band, with something solid above it
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                if chunk.get(x, y) == BlockId::ICE {
                    assert!((20..=40).contains(&y), "ice outside air band at y={}", y);
                    assert!(!chunk.is_air(x, y + 1), "detached ice at y={}", y);
                }
            }
        }
    }

    #[test]
    fn test_inside_solid_replaces_stone() {
        // Ore-style placement: replace stone within a depth band
        let blocks = RandomBlock::builder()
            .block(BlockId::GRAVEL)
            .per_chunk(VariableAmount::fixed(50.0))
            .height_range(VariableAmount::base_with_random_addition(0.0, 20.0).unwrap())
            .placement_target(PlacementTarget::InsideSolid)
            .build()
            .unwrap();

        let mut chunk = cave_chunk();
        let mut rng = chunk_rng(37, 0, 0);
        blocks.populate(&mut chunk, &mut rng);

        let placed = chunk.count_of(BlockId::GRAVEL);
        assert!(placed > 0);

        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                if chunk.get(x, y) == BlockId::GRAVEL {
                    assert!(y < 20, "placed outside the height range at y={}", y);
                }
            }
        }
    }

    #[test]
    fn test_all_combines_targets() {
        let target = PlacementTarget::All(vec![
            PlacementTarget::Air,
            PlacementTarget::OnGround,
        ]);

        let chunk = cave_chunk();
        assert!(target.matches(&chunk, 5, 20));
        assert!(!target.matches(&chunk, 5, 25));
    }

    #[test]
    fn test_out_of_range_heights_are_skipped() {
        let blocks = RandomBlock::builder()
            .block(BlockId::GRAVEL)
            .per_chunk(VariableAmount::fixed(100.0))
            .height_range(VariableAmount::fixed(-5.0))
            .placement_target(PlacementTarget::Air)
            .build()
            .unwrap();

        let mut chunk = cave_chunk();
        let mut rng = chunk_rng(41, 0, 0);
        blocks.populate(&mut chunk, &mut rng);
        assert_eq!(chunk.count_of(BlockId::GRAVEL), 0);
    }
}
