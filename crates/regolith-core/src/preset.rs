//! Serializable generation presets
//!
//! A [`GenerationPreset`] captures a full generation configuration - terrain
//! shape, ground cover and populator configs - in a form that round-trips
//! through RON. The seed is NOT part of the preset: same preset + different
//! seed = different world.

use crate::generation::{TerrainParams, WorldGenerator};
use crate::populator::{
    BigMushroom, BuildError, DoublePlant, Flowers, IceSpike, Populator, RandomBlock, RandomObject,
    Shrub,
};
use crate::settings::{BiomeGenerationSettings, GroundCoverLayer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when loading or saving presets
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to parse preset: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize preset: {0}")]
    Serialize(#[from] ron::Error),
}

/// Serializable populator configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PopulatorConfig {
    Flowers(Flowers),
    Shrubs(Shrub),
    DoublePlants(DoublePlant),
    BigMushrooms(BigMushroom),
    IceSpikes(IceSpike),
    RandomBlocks(RandomBlock),
    RandomObjects(RandomObject),
}

impl PopulatorConfig {
    /// Box the configured populator for the generation pipeline
    pub fn instantiate(&self) -> Box<dyn Populator> {
        match self {
            PopulatorConfig::Flowers(p) => Box::new(p.clone()),
            PopulatorConfig::Shrubs(p) => Box::new(p.clone()),
            PopulatorConfig::DoublePlants(p) => Box::new(p.clone()),
            PopulatorConfig::BigMushrooms(p) => Box::new(p.clone()),
            PopulatorConfig::IceSpikes(p) => Box::new(p.clone()),
            PopulatorConfig::RandomBlocks(p) => Box::new(p.clone()),
            PopulatorConfig::RandomObjects(p) => Box::new(p.clone()),
        }
    }
}

/// Complete generation configuration, serializable to RON
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationPreset {
    /// Display name for this configuration
    pub name: String,
    /// Base terrain shape
    pub terrain: TerrainParams,
    /// Surface height band above the terrain base level
    pub min_height: f32,
    pub max_height: f32,
    /// Ground cover layers, applied top-down
    pub ground_cover: Vec<GroundCoverLayer>,
    /// Populators, run in order
    pub populators: Vec<PopulatorConfig>,
}

impl GenerationPreset {
    /// Load a preset from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, PresetError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize this preset to RON text
    pub fn to_ron_string(&self) -> Result<String, PresetError> {
        Ok(ron::to_string(self)?)
    }

    /// Build a generator for this preset and seed
    pub fn build_generator(&self, seed: u64) -> Result<WorldGenerator, BuildError> {
        let mut builder = BiomeGenerationSettings::builder()
            .min_height(self.min_height)
            .max_height(self.max_height)
            .ground_cover_layers(self.ground_cover.iter().copied());

        for config in &self.populators {
            builder = builder.boxed_populator(config.instantiate());
        }

        Ok(WorldGenerator::new(seed, self.terrain, builder.build()?))
    }
}

// ============================================================================
// Builtin presets
// ============================================================================

impl GenerationPreset {
    /// Grassy flats with flowers, tall plants and scattered pines
    pub fn meadow() -> Self {
        use regolith_blocks::{BlockId, DoublePlantKind, PlantKind, ShrubKind};

        use crate::amount::VariableAmount;
        use crate::populator::ObjectTemplate;
        use crate::seeded::SeededVariableAmount;

        let flowers = Flowers::builder()
            .per_chunk(VariableAmount::BaseWithVariance {
                base: 10.0,
                variance: 4.0,
            })
            .kind(PlantKind::Dandelion, 3.0)
            .kind(PlantKind::Poppy, 2.0)
            .kind(PlantKind::OxeyeDaisy, 1.0)
            .build()
            .unwrap();

        let shrubs = Shrub::builder()
            .per_chunk(VariableAmount::Fixed(16.0))
            .kind(ShrubKind::TallGrass, 4.0)
            .kind(ShrubKind::Fern, 1.0)
            .build()
            .unwrap();

        let tall_plants = DoublePlant::builder()
            .per_chunk(VariableAmount::BaseWithOptionalAddition {
                base: 2.0,
                addition: 4.0,
                chance: 0.3,
            })
            .kind(DoublePlantKind::Sunflower, 1.0)
            .kind(DoublePlantKind::Lilac, 1.0)
            .kind(DoublePlantKind::RoseBush, 1.0)
            .build()
            .unwrap();

        // Tree anchors only take directly above the surface; the height
        // range tracks the meadow surface band (world Y 20-36).
        let pines = RandomObject::builder()
            .per_chunk(VariableAmount::Fixed(48.0))
            .height_range(VariableAmount::BaseWithRandomAddition {
                base: 20.0,
                addition: 17.0,
            })
            .object(ObjectTemplate::pine_tree())
            .spawn_chance(0.4)
            .build()
            .unwrap();

        Self {
            name: "Meadow".to_string(),
            terrain: TerrainParams::default(),
            min_height: 4.0,
            max_height: 16.0,
            ground_cover: vec![
                GroundCoverLayer::uniform(BlockId::GRASS, 1.0),
                GroundCoverLayer::new(
                    BlockId::DIRT,
                    SeededVariableAmount::wrapping(VariableAmount::BaseWithRandomAddition {
                        base: 2.0,
                        addition: 3.0,
                    }),
                ),
            ],
            populators: vec![
                PopulatorConfig::Flowers(flowers),
                PopulatorConfig::Shrubs(shrubs),
                PopulatorConfig::DoublePlants(tall_plants),
                PopulatorConfig::RandomObjects(pines),
            ],
        }
    }

    /// Snowy flats with ice spikes and bare gravel patches
    pub fn tundra() -> Self {
        use regolith_blocks::BlockId;

        use crate::amount::VariableAmount;
        use crate::populator::PlacementTarget;

        let spikes = IceSpike::builder()
            .per_chunk(VariableAmount::BaseWithOptionalAddition {
                base: 2.0,
                addition: 3.0,
                chance: 0.5,
            })
            .height(VariableAmount::BaseWithVariance {
                base: 10.0,
                variance: 4.0,
            })
            .extreme_spike_probability(0.05)
            .extreme_spike_increase(VariableAmount::BaseWithRandomAddition {
                base: 8.0,
                addition: 12.0,
            })
            .build()
            .unwrap();

        let gravel = RandomBlock::builder()
            .block(BlockId::GRAVEL)
            .per_chunk(VariableAmount::Fixed(40.0))
            .height_range(VariableAmount::BaseWithRandomAddition {
                base: 0.0,
                addition: 64.0,
            })
            .placement_target(PlacementTarget::OnGround)
            .build()
            .unwrap();

        Self {
            name: "Tundra".to_string(),
            terrain: TerrainParams::default(),
            min_height: 2.0,
            max_height: 10.0,
            ground_cover: vec![
                GroundCoverLayer::uniform(BlockId::SNOW, 1.0),
                GroundCoverLayer::uniform(BlockId::DIRT, 2.0),
            ],
            populators: vec![
                PopulatorConfig::IceSpikes(spikes),
                PopulatorConfig::RandomBlocks(gravel),
            ],
        }
    }

    /// Dim dirt flats overgrown with giant mushrooms
    pub fn mushroom_grove() -> Self {
        use regolith_blocks::{BlockId, MushroomKind, ShrubKind};

        use crate::amount::VariableAmount;

        let mushrooms = BigMushroom::builder()
            .per_chunk(VariableAmount::BaseWithRandomAddition {
                base: 3.0,
                addition: 5.0,
            })
            .kind(MushroomKind::Brown, 2.0)
            .kind(MushroomKind::Red, 1.0)
            .build()
            .unwrap();

        let ferns = Shrub::builder()
            .per_chunk(VariableAmount::Fixed(10.0))
            .kind(ShrubKind::Fern, 1.0)
            .build()
            .unwrap();

        Self {
            name: "Mushroom Grove".to_string(),
            terrain: TerrainParams::default(),
            min_height: 3.0,
            max_height: 12.0,
            ground_cover: vec![GroundCoverLayer::uniform(BlockId::DIRT, 4.0)],
            populators: vec![
                PopulatorConfig::BigMushrooms(mushrooms),
                PopulatorConfig::Shrubs(ferns),
            ],
        }
    }
}
