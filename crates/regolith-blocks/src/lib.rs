//! Block definitions and registry

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Built-in block IDs
pub struct BlockId;

impl BlockId {
    // Terrain blocks (0-9)
    pub const AIR: u16 = 0;
    pub const STONE: u16 = 1;
    pub const DIRT: u16 = 2;
    pub const GRASS: u16 = 3;
    pub const SAND: u16 = 4;
    pub const GRAVEL: u16 = 5;
    pub const WATER: u16 = 6;
    pub const SNOW: u16 = 7;
    pub const ICE: u16 = 8;
    pub const PACKED_ICE: u16 = 9;

    // Vegetation blocks (10-19)
    pub const LOG: u16 = 10;
    pub const LEAVES: u16 = 11;
    pub const TALL_GRASS: u16 = 12;
    pub const FERN: u16 = 13;
    pub const DEAD_BUSH: u16 = 14;
    pub const MUSHROOM_STEM: u16 = 15;
    pub const MUSHROOM_CAP_BROWN: u16 = 16;
    pub const MUSHROOM_CAP_RED: u16 = 17;

    // Flower blocks (20-29)
    pub const DANDELION: u16 = 20;
    pub const POPPY: u16 = 21;
    pub const BLUE_ORCHID: u16 = 22;
    pub const ALLIUM: u16 = 23;
    pub const OXEYE_DAISY: u16 = 24;

    // Double plant blocks (30-39); tall plants occupy two cells
    pub const SUNFLOWER: u16 = 30;
    pub const LILAC: u16 = 31;
    pub const ROSE_BUSH: u16 = 32;
    pub const PEONY: u16 = 33;
    pub const DOUBLE_PLANT_TOP: u16 = 34;
}

/// Definition of a block's registry properties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockDef {
    pub id: u16,
    pub name: String,

    /// Map color (RGBA) used when drawing world overviews
    pub color: [u8; 4],

    /// Blocks movement and supports placement on top
    pub solid: bool,

    /// World generation may overwrite this block (air, water, grass tufts)
    pub replaceable: bool,
}

impl Default for BlockDef {
    fn default() -> Self {
        Self {
            id: 0,
            name: "unknown".to_string(),
            color: [255, 0, 255, 255], // Magenta for missing blocks
            solid: false,
            replaceable: false,
        }
    }
}

/// Registry of all blocks
///
/// Populated once from the canonical list below, then read-only. Use
/// [`BlockRegistry::global`] for the process-wide instance.
pub struct BlockRegistry {
    blocks: Vec<BlockDef>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        let mut registry = Self { blocks: Vec::new() };
        registry.register_defaults();
        registry
    }

    /// Process-wide registry, created on first access
    pub fn global() -> &'static BlockRegistry {
        static REGISTRY: OnceLock<BlockRegistry> = OnceLock::new();
        REGISTRY.get_or_init(BlockRegistry::new)
    }

    fn register_defaults(&mut self) {
        // Air (empty space)
        self.register(BlockDef {
            id: BlockId::AIR,
            name: "air".to_string(),
            color: [0, 0, 0, 0], // Transparent
            replaceable: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::STONE,
            name: "stone".to_string(),
            color: [112, 112, 112, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::DIRT,
            name: "dirt".to_string(),
            color: [151, 109, 77, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::GRASS,
            name: "grass".to_string(),
            color: [127, 178, 56, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::SAND,
            name: "sand".to_string(),
            color: [247, 233, 163, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::GRAVEL,
            name: "gravel".to_string(),
            color: [136, 126, 126, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::WATER,
            name: "water".to_string(),
            color: [64, 64, 255, 200],
            replaceable: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::SNOW,
            name: "snow".to_string(),
            color: [255, 255, 255, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::ICE,
            name: "ice".to_string(),
            color: [160, 160, 255, 220],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::PACKED_ICE,
            name: "packed_ice".to_string(),
            color: [120, 120, 230, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::LOG,
            name: "log".to_string(),
            color: [104, 83, 50, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::LEAVES,
            name: "leaves".to_string(),
            color: [0, 124, 0, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::TALL_GRASS,
            name: "tall_grass".to_string(),
            color: [94, 157, 52, 255],
            replaceable: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::FERN,
            name: "fern".to_string(),
            color: [70, 120, 48, 255],
            replaceable: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::DEAD_BUSH,
            name: "dead_bush".to_string(),
            color: [146, 99, 40, 255],
            replaceable: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::MUSHROOM_STEM,
            name: "mushroom_stem".to_string(),
            color: [215, 205, 185, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::MUSHROOM_CAP_BROWN,
            name: "mushroom_cap_brown".to_string(),
            color: [130, 94, 66, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::MUSHROOM_CAP_RED,
            name: "mushroom_cap_red".to_string(),
            color: [178, 40, 40, 255],
            solid: true,
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::DANDELION,
            name: "dandelion".to_string(),
            color: [255, 236, 79, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::POPPY,
            name: "poppy".to_string(),
            color: [214, 44, 44, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::BLUE_ORCHID,
            name: "blue_orchid".to_string(),
            color: [47, 162, 232, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::ALLIUM,
            name: "allium".to_string(),
            color: [178, 112, 221, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::OXEYE_DAISY,
            name: "oxeye_daisy".to_string(),
            color: [236, 236, 220, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::SUNFLOWER,
            name: "sunflower".to_string(),
            color: [250, 204, 36, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::LILAC,
            name: "lilac".to_string(),
            color: [184, 124, 184, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::ROSE_BUSH,
            name: "rose_bush".to_string(),
            color: [196, 32, 48, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::PEONY,
            name: "peony".to_string(),
            color: [232, 166, 196, 255],
            ..Default::default()
        });

        self.register(BlockDef {
            id: BlockId::DOUBLE_PLANT_TOP,
            name: "double_plant_top".to_string(),
            color: [94, 157, 52, 255],
            replaceable: true,
            ..Default::default()
        });
    }

    fn register(&mut self, block: BlockDef) {
        let id = block.id as usize;

        if id < self.blocks.len() && self.blocks[id].name != "unknown" {
            log::warn!(
                "block id {} registered twice ({} replaces {})",
                block.id,
                block.name,
                self.blocks[id].name
            );
        }

        // Ensure vec is large enough
        if self.blocks.len() <= id {
            self.blocks.resize(id + 1, BlockDef::default());
        }

        self.blocks[id] = block;
    }

    /// Get block definition by ID, falling back to air for unknown IDs
    pub fn get(&self, id: u16) -> &BlockDef {
        self.blocks.get(id as usize).unwrap_or(&self.blocks[0])
    }

    /// Look up a block definition by name
    pub fn find_by_name(&self, name: &str) -> Option<&BlockDef> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Get map color for a block
    pub fn color(&self, id: u16) -> [u8; 4] {
        self.get(id).color
    }

    /// Number of registered block slots
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Flower varieties placeable by vegetation populators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    Dandelion,
    Poppy,
    BlueOrchid,
    Allium,
    OxeyeDaisy,
}

impl PlantKind {
    pub fn block_id(self) -> u16 {
        match self {
            PlantKind::Dandelion => BlockId::DANDELION,
            PlantKind::Poppy => BlockId::POPPY,
            PlantKind::BlueOrchid => BlockId::BLUE_ORCHID,
            PlantKind::Allium => BlockId::ALLIUM,
            PlantKind::OxeyeDaisy => BlockId::OXEYE_DAISY,
        }
    }
}

/// Low ground-cover varieties (grass tufts and their dry cousins)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShrubKind {
    TallGrass,
    Fern,
    DeadBush,
}

impl ShrubKind {
    pub fn block_id(self) -> u16 {
        match self {
            ShrubKind::TallGrass => BlockId::TALL_GRASS,
            ShrubKind::Fern => BlockId::FERN,
            ShrubKind::DeadBush => BlockId::DEAD_BUSH,
        }
    }
}

/// Giant mushroom cap varieties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MushroomKind {
    Brown,
    Red,
}

impl MushroomKind {
    pub fn cap_block_id(self) -> u16 {
        match self {
            MushroomKind::Brown => BlockId::MUSHROOM_CAP_BROWN,
            MushroomKind::Red => BlockId::MUSHROOM_CAP_RED,
        }
    }
}

/// Two-cell-tall plant varieties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoublePlantKind {
    Sunflower,
    Lilac,
    RoseBush,
    Peony,
}

impl DoublePlantKind {
    /// Block placed in the lower of the two cells
    pub fn bottom_block_id(self) -> u16 {
        match self {
            DoublePlantKind::Sunflower => BlockId::SUNFLOWER,
            DoublePlantKind::Lilac => BlockId::LILAC,
            DoublePlantKind::RoseBush => BlockId::ROSE_BUSH,
            DoublePlantKind::Peony => BlockId::PEONY,
        }
    }

    /// Block placed in the upper of the two cells
    pub fn top_block_id(self) -> u16 {
        BlockId::DOUBLE_PLANT_TOP
    }
}
