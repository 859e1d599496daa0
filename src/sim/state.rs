//! Game state and core simulation types
//!
//! Everything the Playing mode mutates lives in [`GameState`]; the state
//! machine owns one instance for the whole run.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::level::LevelSet;

/// Tunable session and physics rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Lives at the start of a session
    pub starting_lives: u32,
    /// Number of levels; clearing the last one wins the game
    pub level_count: u32,
    /// Pixels the paddle moves per frame while a movement key is held
    pub paddle_speed: i32,
    /// Vertical speed given to a docked ball on launch
    pub launch_speed: i32,
    /// Paddle hit offset is divided by this to get the new horizontal speed
    pub deflection_divisor: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_lives: NUM_LIVES,
            level_count: NUM_LEVELS,
            paddle_speed: PLAYER_SPEED,
            launch_speed: BALL_SPEED_Y,
            deflection_divisor: BALL_SPEED_MODIFIER,
        }
    }
}

/// The player's paddle. Only moves horizontally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub speed: i32,
}

impl Paddle {
    pub fn new(speed: i32) -> Self {
        Self {
            rect: Rect::new(
                WINDOW_WIDTH / 2 - PADDLE_WIDTH / 2,
                PLAYER_Y,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            speed,
        }
    }

    /// Move by `dx` pixels, clamped so the paddle stays inside the window
    pub fn shift(&mut self, dx: i32) {
        let max_x = WINDOW_WIDTH - self.rect.size.x;
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0, max_x);
    }

    pub fn move_left(&mut self) {
        self.shift(-self.speed);
    }

    pub fn move_right(&mut self) {
        self.shift(self.speed);
    }
}

/// The game ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Signed speed in pixels per frame; zero on both axes while docked
    pub vel: IVec2,
}

impl Default for Ball {
    fn default() -> Self {
        let mut ball = Self {
            rect: Rect::new(0, 0, BALL_DIAMETER, BALL_DIAMETER),
            vel: IVec2::ZERO,
        };
        ball.dock();
        ball
    }
}

impl Ball {
    /// Park the ball at screen center with zero speed
    pub fn dock(&mut self) {
        self.vel = IVec2::ZERO;
        self.rect = Rect::centered_at(IVec2::new(WINDOW_WIDTH / 2, WINDOW_HEIGHT / 2), self.rect.size);
    }

    pub fn is_docked(&self) -> bool {
        self.vel == IVec2::ZERO
    }

    /// Start a docked ball falling straight down. Returns false if the ball
    /// was already in flight.
    pub fn launch(&mut self, speed_y: i32) -> bool {
        if !self.is_docked() {
            return false;
        }
        self.vel = IVec2::new(0, speed_y);
        true
    }

    #[inline]
    pub fn diameter(&self) -> i32 {
        self.rect.size.x
    }
}

/// Block tint, chosen by remaining hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    Yellow,
    Red,
    Green,
    Blue,
}

impl BlockColor {
    pub fn from_hits(hits: u8) -> Self {
        match hits {
            0 | 1 => BlockColor::Yellow,
            2 => BlockColor::Red,
            3 => BlockColor::Green,
            _ => BlockColor::Blue,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            BlockColor::Yellow => [255, 220, 0],
            BlockColor::Red => [220, 30, 30],
            BlockColor::Green => [40, 200, 60],
            BlockColor::Blue => [40, 90, 230],
        }
    }
}

/// A breakable block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    /// Hits left before the block breaks (always > 0 while stored)
    pub hits: u8,
}

impl Block {
    pub fn new(rect: Rect, hits: u8) -> Self {
        debug_assert!(hits > 0, "blocks are created with at least one hit");
        Self { rect, hits }
    }

    pub fn color(&self) -> BlockColor {
        BlockColor::from_hits(self.hits)
    }
}

/// Outcome of a single hit on a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Block survived with this many hits left
    Damaged { hits_left: u8 },
    /// Block reached zero and was removed
    Destroyed,
}

/// Unordered storage of the blocks on the field.
///
/// Removal swaps the last block into the freed slot, so indices are only
/// stable until the next removal and iteration order carries no meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockArena {
    blocks: Vec<Block>,
}

impl BlockArena {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Replace the contents with a freshly loaded level
    pub fn reload(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.clear();
        self.blocks.extend(blocks);
    }

    /// O(1) removal; the last block takes the slot of the removed one
    pub fn swap_remove(&mut self, index: usize) -> Block {
        self.blocks.swap_remove(index)
    }

    /// Apply one hit to the block at `index`, removing it when it breaks
    pub fn hit(&mut self, index: usize) -> HitResult {
        let block = &mut self.blocks[index];
        block.hits = block.hits.saturating_sub(1);
        if block.hits == 0 {
            self.swap_remove(index);
            HitResult::Destroyed
        } else {
            HitResult::Damaged {
                hits_left: block.hits,
            }
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    PaddleHit { offset: i32 },
    BlockHit { hits_left: u8 },
    BlockDestroyed,
    LifeLost { lives_left: u32 },
    LevelCleared { next_level: u32 },
    /// Final level cleared; the session has already been reset
    GameWon,
    /// Last life lost; the session has already been reset
    GameLost,
}

/// Complete Playing-mode state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub rules: Rules,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockArena,
    /// Lives remaining
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Processed Playing frames since start
    pub frame: u64,
    /// Events from the most recent tick, drained by the state machine
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session on level 1
    pub fn new(rules: Rules, levels: &LevelSet) -> Self {
        let mut state = Self {
            rules,
            paddle: Paddle::new(rules.paddle_speed),
            ball: Ball::default(),
            blocks: BlockArena::default(),
            lives: rules.starting_lives,
            level: 1,
            frame: 0,
            events: Vec::new(),
        };
        state.load_level(levels);
        state
    }

    /// Back to full lives on level 1 with a docked ball
    pub fn reset(&mut self, levels: &LevelSet) {
        self.lives = self.rules.starting_lives;
        self.level = 1;
        self.paddle = Paddle::new(self.rules.paddle_speed);
        self.ball.dock();
        self.load_level(levels);
    }

    /// Replace the blocks with the layout of the current level
    pub fn load_level(&mut self, levels: &LevelSet) {
        match levels.grid(self.level) {
            Some(grid) => {
                self.blocks.reload(grid.blocks());
                log::info!("Level {} loaded with {} blocks", self.level, self.blocks.len());
            }
            None => {
                // LevelSet is checked against the rules when the machine is built
                log::error!("Level {} missing from level set", self.level);
                self.blocks.clear();
            }
        }
    }

    pub fn is_final_level(&self) -> bool {
        self.level >= self.rules.level_count
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
