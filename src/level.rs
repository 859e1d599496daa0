//! Level grids and the loaders that produce them
//!
//! A level is a fixed `NUM_ROWS x NUM_COLS` grid of hit counts: 0 leaves the
//! cell empty, 1-4 places a block that takes that many hits. On disk a level
//! is plain whitespace-separated integers in row-major order, one file per
//! level (`level1.txt`, `level2.txt`, ...).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::rect::Rect;
use crate::sim::state::Block;

/// Errors from loading or parsing a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level {level}: '{token}' is not a hit count")]
    BadToken { level: u32, token: String },
    #[error("level {level}: hit count {value} is outside 0-{max}", max = MAX_BLOCK_HITS)]
    OutOfRange { level: u32, value: u32 },
    #[error("level {level}: expected {expected} cells, found {found}")]
    WrongCellCount { level: u32, expected: usize, found: usize },
    #[error("level {level} has no blocks")]
    Empty { level: u32 },
    #[error("level {level} not found")]
    Missing { level: u32 },
}

/// Hit counts for every cell of one level.
///
/// Serializes as the flat cell list; deserializing runs the same checks as
/// [`LevelGrid::from_cells`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct LevelGrid {
    cells: Vec<u8>,
}

/// Errors from this conversion report level 0, since the cells alone don't
/// say which level they belong to
impl TryFrom<Vec<u8>> for LevelGrid {
    type Error = LevelError;

    fn try_from(cells: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_cells(0, cells)
    }
}

impl From<LevelGrid> for Vec<u8> {
    fn from(grid: LevelGrid) -> Self {
        grid.cells
    }
}

impl LevelGrid {
    /// Build a grid from row-major cells, checking size and range
    pub fn from_cells(level: u32, cells: Vec<u8>) -> Result<Self, LevelError> {
        let expected = NUM_ROWS * NUM_COLS;
        if cells.len() != expected {
            return Err(LevelError::WrongCellCount {
                level,
                expected,
                found: cells.len(),
            });
        }
        if let Some(&value) = cells.iter().find(|&&c| c > MAX_BLOCK_HITS) {
            return Err(LevelError::OutOfRange {
                level,
                value: value as u32,
            });
        }
        if cells.iter().all(|&c| c == 0) {
            return Err(LevelError::Empty { level });
        }
        Ok(Self { cells })
    }

    /// Hit count at a 0-based row/column
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row * NUM_COLS + col]
    }

    /// Number of non-empty cells
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }

    /// Lay out the blocks on screen
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.cells.iter().enumerate().filter(|(_, hits)| **hits > 0).map(|(i, &hits)| {
            // Layout is 1-based so the grid sits clear of the window edges
            let row = (i / NUM_COLS) as i32 + 1;
            let col = (i % NUM_COLS) as i32 + 1;
            let rect = Rect::new(
                col * BLOCK_WIDTH - BLOCK_SCREEN_BUFFER,
                row * BLOCK_HEIGHT + BLOCK_SCREEN_BUFFER,
                BLOCK_WIDTH,
                BLOCK_HEIGHT,
            );
            Block::new(rect, hits)
        })
    }
}

/// Parse the text form of a level
pub fn parse_level(level: u32, text: &str) -> Result<LevelGrid, LevelError> {
    let cells = text
        .split_whitespace()
        .map(|token| {
            let value: u32 = token.parse().map_err(|_| LevelError::BadToken {
                level,
                token: token.to_string(),
            })?;
            u8::try_from(value)
                .ok()
                .filter(|&v| v <= MAX_BLOCK_HITS)
                .ok_or(LevelError::OutOfRange { level, value })
        })
        .collect::<Result<Vec<u8>, LevelError>>()?;
    LevelGrid::from_cells(level, cells)
}

/// Source of level grids, addressed by 1-based level index
pub trait LevelLoader {
    fn load(&self, level: u32) -> Result<LevelGrid, LevelError>;
}

/// Reads `level<N>.txt` from a directory
#[derive(Debug, Clone)]
pub struct FileLevelLoader {
    dir: PathBuf,
}

impl FileLevelLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(format!("level{level}.txt"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LevelLoader for FileLevelLoader {
    fn load(&self, level: u32) -> Result<LevelGrid, LevelError> {
        let path = self.path_for(level);
        let text = std::fs::read_to_string(&path).map_err(|source| LevelError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("Read level {} from {}", level, path.display());
        parse_level(level, &text)
    }
}

/// Levels held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelLoader {
    levels: HashMap<u32, String>,
}

impl MemoryLevelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the text form of a level
    pub fn with_level(mut self, level: u32, text: impl Into<String>) -> Self {
        self.levels.insert(level, text.into());
        self
    }
}

impl LevelLoader for MemoryLevelLoader {
    fn load(&self, level: u32) -> Result<LevelGrid, LevelError> {
        let text = self.levels.get(&level).ok_or(LevelError::Missing { level })?;
        parse_level(level, text)
    }
}

/// Every level of a run, loaded up front so a bad level fails at start-up
#[derive(Debug, Clone)]
pub struct LevelSet {
    grids: Vec<LevelGrid>,
}

impl LevelSet {
    pub fn load_all(loader: &dyn LevelLoader, count: u32) -> Result<Self, LevelError> {
        let grids = (1..=count)
            .map(|level| loader.load(level))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} levels", grids.len());
        Ok(Self { grids })
    }

    /// Grid for a 1-based level index
    pub fn grid(&self, level: u32) -> Option<&LevelGrid> {
        let index = (level as usize).checked_sub(1)?;
        self.grids.get(index)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
