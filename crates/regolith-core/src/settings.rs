//! Biome generation settings
//!
//! Bundles everything the generator needs for one biome: the surface height
//! band, the ground cover layers laid beneath the surface, and the populators
//! run over each freshly generated chunk.

use crate::populator::{BuildError, Populator};
use crate::seeded::SeededVariableAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One layer of ground cover under the surface
///
/// The layer depth is a seeded amount whose seed is the block being laid, so
/// a future depth strategy can vary per block without changing this type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundCoverLayer {
    block: u16,
    depth: SeededVariableAmount<u16>,
}

impl GroundCoverLayer {
    pub fn new(block: u16, depth: SeededVariableAmount<u16>) -> Self {
        Self { block, depth }
    }

    /// Layer of constant depth
    pub fn uniform(block: u16, depth: f64) -> Self {
        Self::new(block, SeededVariableAmount::fixed(depth))
    }

    pub fn block(&self) -> u16 {
        self.block
    }

    pub fn depth(&self) -> &SeededVariableAmount<u16> {
        &self.depth
    }
}

/// Generation parameters for one biome
pub struct BiomeGenerationSettings {
    min_height: f32,
    max_height: f32,
    ground_cover: Vec<GroundCoverLayer>,
    populators: Vec<Box<dyn Populator>>,
}

impl BiomeGenerationSettings {
    pub fn builder() -> BiomeGenerationSettingsBuilder {
        BiomeGenerationSettingsBuilder::default()
    }

    /// Lower bound of the surface height band, in cells above the base level
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    /// Upper bound of the surface height band
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn ground_cover(&self) -> &[GroundCoverLayer] {
        &self.ground_cover
    }

    pub fn populators(&self) -> &[Box<dyn Populator>] {
        &self.populators
    }
}

// Populators are trait objects; print their names instead
impl fmt::Debug for BiomeGenerationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiomeGenerationSettings")
            .field("min_height", &self.min_height)
            .field("max_height", &self.max_height)
            .field("ground_cover", &self.ground_cover)
            .field(
                "populators",
                &self.populators.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for [`BiomeGenerationSettings`]
pub struct BiomeGenerationSettingsBuilder {
    min_height: f32,
    max_height: f32,
    ground_cover: Vec<GroundCoverLayer>,
    populators: Vec<Box<dyn Populator>>,
}

impl Default for BiomeGenerationSettingsBuilder {
    fn default() -> Self {
        Self {
            min_height: 4.0,
            max_height: 16.0,
            ground_cover: Vec::new(),
            populators: Vec::new(),
        }
    }
}

impl BiomeGenerationSettingsBuilder {
    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = height;
        self
    }

    /// Append one ground cover layer; layers apply top-down in insert order
    pub fn ground_cover_layer(mut self, layer: GroundCoverLayer) -> Self {
        self.ground_cover.push(layer);
        self
    }

    pub fn ground_cover_layers(mut self, layers: impl IntoIterator<Item = GroundCoverLayer>) -> Self {
        self.ground_cover.extend(layers);
        self
    }

    /// Append a populator; populators run in insert order
    pub fn populator<P: Populator + 'static>(mut self, populator: P) -> Self {
        self.populators.push(Box::new(populator));
        self
    }

    pub fn boxed_populator(mut self, populator: Box<dyn Populator>) -> Self {
        self.populators.push(populator);
        self
    }

    /// Drop everything set so far
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn build(self) -> Result<BiomeGenerationSettings, BuildError> {
        if !self.min_height.is_finite()
            || !self.max_height.is_finite()
            || self.min_height > self.max_height
        {
            return Err(BuildError::InvalidHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }

        Ok(BiomeGenerationSettings {
            min_height: self.min_height,
            max_height: self.max_height,
            ground_cover: self.ground_cover,
            populators: self.populators,
        })
    }
}
