//! Chunk - 64x64 region of block cells

use regolith_blocks::{BlockId, BlockRegistry};
use serde::{Deserialize, Serialize};

pub const CHUNK_SIZE: usize = 64;
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;

/// A 64x64 region of the world
///
/// Cells are block IDs in row-major order with `y = 0` at the bottom of the
/// chunk. World coordinates grow upward: `world_y = chunk.y * 64 + local_y`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk coordinates (in chunk space, not cell space)
    pub x: i32,
    pub y: i32,

    /// Cell data, row-major order
    /// Index = y * CHUNK_SIZE + x
    #[serde(with = "serde_big_array::BigArray")]
    cells: [u16; CHUNK_AREA],

    /// Whether the chunk has been modified since creation (not persisted)
    #[serde(skip)]
    pub dirty: bool,
}

impl Chunk {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            cells: [BlockId::AIR; CHUNK_AREA],
            dirty: false,
        }
    }

    /// Get block at local coordinates (0-63, 0-63)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE);
        self.cells[y * CHUNK_SIZE + x]
    }

    /// Set block at local coordinates
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, block: u16) {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE);
        self.cells[y * CHUNK_SIZE + x] = block;
        self.dirty = true;
    }

    #[inline]
    pub fn is_air(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == BlockId::AIR
    }

    /// World X coordinate of a local column
    #[inline]
    pub fn world_x(&self, local_x: usize) -> i32 {
        self.x * CHUNK_SIZE as i32 + local_x as i32
    }

    /// World Y coordinate of a local row
    #[inline]
    pub fn world_y(&self, local_y: usize) -> i32 {
        self.y * CHUNK_SIZE as i32 + local_y as i32
    }

    /// Topmost solid cell in a column, if any
    ///
    /// Scans from the top of the chunk downward and returns the local Y of
    /// the first solid block (per the global registry).
    pub fn surface_y(&self, x: usize) -> Option<usize> {
        let registry = BlockRegistry::global();
        (0..CHUNK_SIZE)
            .rev()
            .find(|&y| registry.get(self.get(x, y)).solid)
    }

    /// Count non-air cells (for debugging generation passes)
    pub fn count_non_air(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c != BlockId::AIR)
            .count()
    }

    /// Count cells holding the given block
    pub fn count_of(&self, block: u16) -> usize {
        self.cells.iter().filter(|&&c| c == block).count()
    }

    /// Raw cell slice, row-major
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
