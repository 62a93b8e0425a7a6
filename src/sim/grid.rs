//! Breakable block grid
//!
//! Blocks are stored column-major: index = column * rows + row. The grid is
//! never resized mid-level, only rebuilt between levels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Block colour, chosen by row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl BlockColor {
    pub const PALETTE: [BlockColor; 5] = [
        BlockColor::Red,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Blue,
    ];

    /// Rows past the palette wrap around
    pub fn for_row(row: usize) -> Self {
        Self::PALETTE[row % Self::PALETTE.len()]
    }

    /// sRGB hex value
    pub fn hex(&self) -> u32 {
        match self {
            BlockColor::Red => 0xFF4136,
            BlockColor::Orange => 0xFF851B,
            BlockColor::Yellow => 0xFFDC00,
            BlockColor::Green => 0x2ECC40,
            BlockColor::Blue => 0x0074D9,
        }
    }
}

/// A single breakable block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub column: usize,
    pub row: usize,
    pub rect: Rect,
    pub color: BlockColor,
    pub alive: bool,
}

/// Top-left corner of the block at (column, row)
pub fn block_origin(column: usize, row: usize) -> Vec2 {
    Vec2::new(
        BLOCK_OFFSET_LEFT + column as f32 * (BLOCK_WIDTH + BLOCK_PADDING),
        BLOCK_OFFSET_TOP + row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING),
    )
}

/// The level's block layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    columns: usize,
    rows: usize,
    blocks: Vec<Block>,
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new(BLOCK_COLUMNS, BLOCK_ROWS)
    }
}

impl BlockGrid {
    /// Build a fully alive grid
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut grid = Self {
            columns: 0,
            rows: 0,
            blocks: Vec::new(),
        };
        grid.initialize(columns, rows);
        grid
    }

    /// Rebuild every cell as alive at its deterministic position
    pub fn initialize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.blocks.clear();
        self.blocks.reserve(columns * rows);

        for column in 0..columns {
            for row in 0..rows {
                let origin = block_origin(column, row);
                self.blocks.push(Block {
                    column,
                    row,
                    rect: Rect::new(origin.x, origin.y, BLOCK_WIDTH, BLOCK_HEIGHT),
                    color: BlockColor::for_row(row),
                    alive: true,
                });
            }
        }
    }

    /// Rebuild with the current dimensions
    pub fn reset(&mut self) {
        self.initialize(self.columns, self.rows);
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Block> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.blocks.get(column * self.rows + row)
    }

    /// Blocks in column-major scan order
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.blocks.iter_mut()
    }

    pub fn alive_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// True iff every block has been destroyed
    pub fn all_destroyed(&self) -> bool {
        self.blocks.iter().all(|b| !b.alive)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
