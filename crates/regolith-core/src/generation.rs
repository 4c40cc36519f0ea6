//! Chunk generation pipeline
//!
//! Base terrain comes from an OpenSimplex2 height noise layer; ground cover
//! is applied top-down per column with depths drawn from seeded amounts; then
//! each populator runs with a per-chunk deterministic RNG. Same seed + same
//! chunk coordinates always produce an identical chunk.

use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::rng::chunk_rng;
use crate::settings::BiomeGenerationSettings;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use regolith_blocks::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reusable noise layer configuration
///
/// Captures the FastNoiseLite settings a generation pass needs, so presets
/// can serialize them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Offset added to the world seed for this layer
    pub seed_offset: i32,
    /// Base frequency (lower = larger features)
    pub frequency: f32,
    /// Number of fractal octaves (1-8)
    pub octaves: u8,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Amplitude multiplier per octave
    pub gain: f32,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            seed_offset: 0,
            frequency: 0.01,
            octaves: 3,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl NoiseLayer {
    /// Create a FastNoiseLite instance from this config
    pub fn to_fastnoise(&self, base_seed: u64) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed((base_seed as i32).wrapping_add(self.seed_offset));
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(self.frequency));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(self.octaves as i32));
        noise.set_fractal_lacunarity(Some(self.lacunarity));
        noise.set_fractal_gain(Some(self.gain));
        noise
    }
}

/// Base terrain shape parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// World Y the surface height band sits on top of
    pub base_level: i32,
    /// Noise layer for surface height variation
    pub height_noise: NoiseLayer,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_level: 16,
            height_noise: NoiseLayer {
                seed_offset: 2,
                frequency: 0.004,
                octaves: 4,
                lacunarity: 2.0,
                gain: 0.5,
            },
        }
    }
}

/// Deterministic chunk generator for one biome
pub struct WorldGenerator {
    pub seed: u64,
    terrain: TerrainParams,
    settings: BiomeGenerationSettings,
    height_noise: FastNoiseLite,
}

impl WorldGenerator {
    pub fn new(seed: u64, terrain: TerrainParams, settings: BiomeGenerationSettings) -> Self {
        let height_noise = terrain.height_noise.to_fastnoise(seed);
        Self {
            seed,
            terrain,
            settings,
            height_noise,
        }
    }

    pub fn terrain(&self) -> &TerrainParams {
        &self.terrain
    }

    pub fn settings(&self) -> &BiomeGenerationSettings {
        &self.settings
    }

    /// Surface height (world Y of the topmost solid cell) for a column
    pub fn surface_height(&self, world_x: i32) -> i32 {
        let n = self.height_noise.get_noise_2d(world_x as f32, 0.0);
        // Fractal noise output is only approximately [-1, 1]
        let t = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
        let band = self.settings.min_height()
            + t * (self.settings.max_height() - self.settings.min_height());
        self.terrain.base_level + band.round() as i32
    }

    /// Generate a complete chunk at the given chunk coordinates
    pub fn generate_chunk(&self, chunk_x: i32, chunk_y: i32) -> Chunk {
        let mut chunk = Chunk::new(chunk_x, chunk_y);
        let mut rng = chunk_rng(self.seed, chunk_x, chunk_y);

        // Base terrain: stone up to the noise-derived surface height
        for local_x in 0..CHUNK_SIZE {
            let world_x = chunk.world_x(local_x);
            let surface = self.surface_height(world_x);

            for local_y in 0..CHUNK_SIZE {
                if chunk.world_y(local_y) <= surface {
                    chunk.set(local_x, local_y, BlockId::STONE);
                }
            }
        }

        // Ground cover: walk layers downward from the surface, each layer
        // drawing its depth with the block being laid as the seed object
        for local_x in 0..CHUNK_SIZE {
            let world_x = chunk.world_x(local_x);
            let mut top = self.surface_height(world_x);

            for layer in self.settings.ground_cover() {
                let block = layer.block();
                let depth = layer.depth().get_floored_amount(&mut rng, &block).max(0);

                for i in 0..depth {
                    let world_y = top - i as i32;
                    let local_y = world_y - chunk.world_y(0);
                    if (0..CHUNK_SIZE as i32).contains(&local_y)
                        && chunk.get(local_x, local_y as usize) == BlockId::STONE
                    {
                        chunk.set(local_x, local_y as usize, block);
                    }
                }
                top -= depth as i32;
            }
        }

        // Populators run last, over the finished terrain
        for populator in self.settings.populators() {
            populator.populate(&mut chunk, &mut rng);
        }

        log::debug!(
            "generated chunk ({}, {}) with {} populators, {} non-air cells",
            chunk_x,
            chunk_y,
            self.settings.populators().len(),
            chunk.count_non_air()
        );

        // Fresh chunks start as not dirty
        chunk.dirty = false;
        chunk
    }
}

impl fmt::Debug for WorldGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldGenerator")
            .field("seed", &self.seed)
            .field("terrain", &self.terrain)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::VariableAmount;
    use crate::populator::Flowers;
    use crate::seeded::SeededVariableAmount;
    use crate::settings::GroundCoverLayer;
    use regolith_blocks::PlantKind;

    fn grass_over_dirt() -> BiomeGenerationSettings {
        BiomeGenerationSettings::builder()
            .min_height(4.0)
            .max_height(20.0)
            .ground_cover_layer(GroundCoverLayer::uniform(BlockId::GRASS, 1.0))
            .ground_cover_layer(GroundCoverLayer::new(
                BlockId::DIRT,
                SeededVariableAmount::base_with_random_addition(2.0, 3.0).unwrap(),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_deterministic_generation() {
        let gen1 = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());
        let gen2 = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());

        let chunk1 = gen1.generate_chunk(0, 0);
        let chunk2 = gen2.generate_chunk(0, 0);

        // Same seed should produce identical chunks
        assert_eq!(chunk1.cells(), chunk2.cells());
    }

    #[test]
    fn test_different_seeds_differ() {
        let gen1 = WorldGenerator::new(1, TerrainParams::default(), grass_over_dirt());
        let gen2 = WorldGenerator::new(2, TerrainParams::default(), grass_over_dirt());

        let chunk1 = gen1.generate_chunk(0, 0);
        let chunk2 = gen2.generate_chunk(0, 0);
        assert_ne!(chunk1.cells(), chunk2.cells());
    }

    #[test]
    fn test_surface_height_stays_in_band() {
        let generator = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());

        for world_x in -512..512 {
            let surface = generator.surface_height(world_x);
            assert!(
                (16 + 4..=16 + 20).contains(&surface),
                "surface {} outside band at x={}",
                surface,
                world_x
            );
        }
    }

    #[test]
    fn test_ground_cover_layers_in_order() {
        let generator = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());
        let chunk = generator.generate_chunk(0, 0);

        for local_x in 0..CHUNK_SIZE {
            let world_x = chunk.world_x(local_x);
            let surface = generator.surface_height(world_x) as usize;

            // Topmost solid cell is the grass layer, dirt directly below
            assert_eq!(chunk.get(local_x, surface), BlockId::GRASS);
            assert_eq!(chunk.get(local_x, surface - 1), BlockId::DIRT);
            // And air above
            assert!(chunk.is_air(local_x, surface + 1));
        }
    }

    #[test]
    fn test_deep_chunks_are_solid_stone() {
        let generator = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());
        let chunk = generator.generate_chunk(0, -2);

        assert_eq!(chunk.count_of(BlockId::STONE), CHUNK_SIZE * CHUNK_SIZE);
    }

    #[test]
    fn test_sky_chunks_are_empty() {
        let generator = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());
        let chunk = generator.generate_chunk(0, 2);

        assert_eq!(chunk.count_non_air(), 0);
    }

    #[test]
    fn test_populators_run_over_terrain() {
        let flowers = Flowers::builder()
            .per_chunk(VariableAmount::fixed(30.0))
            .kind(PlantKind::Poppy, 1.0)
            .build()
            .unwrap();

        let settings = BiomeGenerationSettings::builder()
            .min_height(4.0)
            .max_height(20.0)
            .ground_cover_layer(GroundCoverLayer::uniform(BlockId::GRASS, 1.0))
            .populator(flowers)
            .build()
            .unwrap();

        let generator = WorldGenerator::new(42, TerrainParams::default(), settings);
        let chunk = generator.generate_chunk(0, 0);

        assert!(chunk.count_of(BlockId::POPPY) > 0, "populator did not run");
    }

    #[test]
    fn test_fresh_chunk_not_dirty() {
        let generator = WorldGenerator::new(42, TerrainParams::default(), grass_over_dirt());
        let chunk = generator.generate_chunk(0, 0);
        assert!(!chunk.dirty);
    }
}
