//! Random multi-cell object placement

use crate::amount::VariableAmount;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::populator::{BuildError, Populator};
use crate::rng::PlacementRng;
use rand::{Rng, RngCore};
use regolith_blocks::{BlockId, BlockRegistry};
use serde::{Deserialize, Serialize};

/// A placeable multi-cell object as an anchor-relative stencil
///
/// Cell offsets are relative to the anchor, which sits at the bottom center
/// of the object. Cells falling outside the chunk are skipped at placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectTemplate {
    name: String,
    /// (dx, dy, block) triples; dy grows upward from the anchor
    cells: Vec<(i32, i32, u16)>,
}

impl ObjectTemplate {
    pub fn new(name: impl Into<String>, cells: Vec<(i32, i32, u16)>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[(i32, i32, u16)] {
        &self.cells
    }

    /// A small conifer: log trunk with a leaf cone
    pub fn pine_tree() -> Self {
        let mut cells = Vec::new();
        for dy in 0..5 {
            cells.push((0, dy, BlockId::LOG));
        }
        for dy in 2..6 {
            let radius = ((6 - dy) / 2).max(1);
            for dx in -radius..=radius {
                if dx != 0 || dy >= 5 {
                    cells.push((dx, dy, BlockId::LEAVES));
                }
            }
        }
        Self::new("pine_tree", cells)
    }

    /// A lump of gravel half-buried in the ground
    pub fn boulder() -> Self {
        Self::new(
            "boulder",
            vec![
                (-1, 0, BlockId::GRAVEL),
                (0, 0, BlockId::GRAVEL),
                (1, 0, BlockId::GRAVEL),
                (0, 1, BlockId::GRAVEL),
            ],
        )
    }

    /// Check whether the object can be placed with its anchor at (x, y)
    ///
    /// Requires solid ground directly below the anchor and a free (air or
    /// replaceable) cell for every in-bounds stencil cell.
    pub fn can_place_at(&self, chunk: &Chunk, x: usize, y: usize) -> bool {
        let registry = BlockRegistry::global();

        if y == 0 || !registry.get(chunk.get(x, y - 1)).solid {
            return false;
        }

        self.cells.iter().all(|&(dx, dy, _)| {
            let cx = x as i32 + dx;
            let cy = y as i32 + dy;
            if !(0..CHUNK_SIZE as i32).contains(&cx) || !(0..CHUNK_SIZE as i32).contains(&cy) {
                return true; // Out-of-chunk cells are simply not placed
            }
            registry.get(chunk.get(cx as usize, cy as usize)).replaceable
        })
    }

    /// Stamp the object into the chunk with its anchor at (x, y)
    pub fn place_at(&self, chunk: &mut Chunk, x: usize, y: usize) {
        for &(dx, dy, block) in &self.cells {
            let cx = x as i32 + dx;
            let cy = y as i32 + dy;
            if (0..CHUNK_SIZE as i32).contains(&cx) && (0..CHUNK_SIZE as i32).contains(&cy) {
                chunk.set(cx as usize, cy as usize, block);
            }
        }
    }
}

/// Attempts to place a multi-cell object at random positions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomObject {
    attempts_per_chunk: VariableAmount,
    height_range: VariableAmount,
    object: ObjectTemplate,
    spawn_chance: f64,
}

impl RandomObject {
    pub fn builder() -> RandomObjectBuilder {
        RandomObjectBuilder::default()
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

    pub fn object(&self) -> &ObjectTemplate {
        &self.object
    }

    pub fn set_object(&mut self, object: ObjectTemplate) {
        self.object = object;
    }

    pub fn spawn_chance(&self) -> f64 {
        self.spawn_chance
    }

    /// Set the per-attempt spawn chance; must be within `[0, 1]`
    pub fn set_spawn_chance(&mut self, chance: f64) -> Result<(), BuildError> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(BuildError::InvalidChance(chance));
        }
        self.spawn_chance = chance;
        Ok(())
    }
}

impl Populator for RandomObject {
    fn name(&self) -> &'static str {
        "random_object"
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

            if !rng.check_chance(self.spawn_chance) {
                continue;
            }
            if self.object.can_place_at(chunk, x, y) {
                self.object.place_at(chunk, x, y);
                placed += 1;
            }
        }

        log::debug!(
            "placed {} x {} in chunk ({}, {})",
            placed,
            self.object.name(),
            chunk.x,
            chunk.y
        );
    }
}

/// Builder for [`RandomObject`]
#[derive(Clone, Debug, Default)]
pub struct RandomObjectBuilder {
    per_chunk: Option<VariableAmount>,
    height_range: Option<VariableAmount>,
    object: Option<ObjectTemplate>,
    spawn_chance: Option<f64>,
}

impl RandomObjectBuilder {
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

    /// Object to place
    pub fn object(mut self, object: ObjectTemplate) -> Self {
        self.object = Some(object);
        self
    }

    /// Per-attempt spawn chance (default 1.0)
    pub fn spawn_chance(mut self, chance: f64) -> Self {
        self.spawn_chance = Some(chance);
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<RandomObject, BuildError> {
        let attempts_per_chunk = self
            .per_chunk
            .ok_or(BuildError::MissingField("attempts_per_chunk"))?;
        let height_range = self
            .height_range
            .ok_or(BuildError::MissingField("height_range"))?;
        let object = self.object.ok_or(BuildError::MissingField("object"))?;

        let spawn_chance = self.spawn_chance.unwrap_or(1.0);
        if !(0.0..=1.0).contains(&spawn_chance) {
            return Err(BuildError::InvalidChance(spawn_chance));
        }

        Ok(RandomObject {
            attempts_per_chunk,
            height_range,
            object,
            spawn_chance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::chunk_rng;

    fn flat_chunk() -> Chunk {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..CHUNK_SIZE {
            for y in 0..=15 {
                chunk.set(x, y, if y == 15 { BlockId::GRASS } else { BlockId::DIRT });
            }
        }
        chunk
    }

    #[test]
    fn test_builder_requires_object() {
        let err = RandomObject::builder()
            .per_chunk(VariableAmount::fixed(4.0))
            .height_range(VariableAmount::fixed(16.0))
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::MissingField("object"));
    }

    #[test]
    fn test_builder_rejects_bad_chance() {
        let err = RandomObject::builder()
            .per_chunk(VariableAmount::fixed(4.0))
            .height_range(VariableAmount::fixed(16.0))
            .object(ObjectTemplate::boulder())
            .spawn_chance(2.0)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::InvalidChance(2.0));
    }

    #[test]
    fn test_template_needs_ground() {
        let tree = ObjectTemplate::pine_tree();
        let chunk = flat_chunk();

        // y=16 sits directly on the grass surface
        assert!(tree.can_place_at(&chunk, 32, 16));
        // y=30 floats in the air
        assert!(!tree.can_place_at(&chunk, 32, 30));
    }

    #[test]
    fn test_template_respects_obstructions() {
        let tree = ObjectTemplate::pine_tree();
        let mut chunk = flat_chunk();
        // A stone pillar where the trunk would go
        chunk.set(32, 18, BlockId::STONE);

        assert!(!tree.can_place_at(&chunk, 32, 16));
    }

    #[test]
    fn test_populate_places_trees_on_surface() {
        let trees = RandomObject::builder()
            .per_chunk(VariableAmount::fixed(40.0))
            .height_range(VariableAmount::fixed(16.0))
            .object(ObjectTemplate::pine_tree())
            .build()
            .unwrap();

        let mut chunk = flat_chunk();
        let mut rng = chunk_rng(51, 0, 0);
        trees.populate(&mut chunk, &mut rng);

        let logs = chunk.count_of(BlockId::LOG);
        assert!(logs > 0, "no trees placed");
        assert_eq!(logs % 5, 0, "partial trunks placed");
        assert!(chunk.count_of(BlockId::LEAVES) > 0);
    }

    #[test]
    fn test_zero_spawn_chance_places_nothing() {
        let trees = RandomObject::builder()
            .per_chunk(VariableAmount::fixed(40.0))
            .height_range(VariableAmount::fixed(16.0))
            .object(ObjectTemplate::pine_tree())
            .spawn_chance(0.0)
            .build()
            .unwrap();

        let mut chunk = flat_chunk();
        let mut rng = chunk_rng(51, 0, 0);
        trees.populate(&mut chunk, &mut rng);
        assert_eq!(chunk.count_of(BlockId::LOG), 0);
    }
}
