//! Collision detection and response
//!
//! Ball-vs-paddle uses a band test on the ball's bottom edge. Ball-vs-block
//! tests four sample points (the edge mid-points of the ball box) against
//! every block, so one frame can strike several blocks and several edges.

use glam::IVec2;

use super::rect::{EdgePoints, Rect};
use super::state::{Ball, BlockArena, GameEvent, HitResult};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Which sides of the ball touched a block this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StruckEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl StruckEdges {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// Ball sample point, in the order the scan tests them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

const EDGES: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

impl Edge {
    fn point(self, points: &EdgePoints) -> IVec2 {
        match self {
            Edge::Top => points.top,
            Edge::Bottom => points.bottom,
            Edge::Left => points.left,
            Edge::Right => points.right,
        }
    }

    fn mark(self, struck: &mut StruckEdges) {
        match self {
            Edge::Top => struck.top = true,
            Edge::Bottom => struck.bottom = true,
            Edge::Left => struck.left = true,
            Edge::Right => struck.right = true,
        }
    }
}

/// True if a falling ball's bottom edge is inside the paddle's vertical band
/// and the two horizontal extents overlap.
pub fn ball_hits_paddle(ball: &Rect, vel_y: i32, paddle: &Rect) -> bool {
    if vel_y <= 0 {
        return false;
    }
    let bottom = ball.bottom();
    bottom >= paddle.top() && bottom <= paddle.bottom() && ball.overlaps_x(paddle)
}

/// Horizontal speed after a paddle hit: the further from the paddle's
/// center, the steeper the rebound.
pub fn paddle_deflection(ball: &Rect, paddle: &Rect, divisor: i32) -> i32 {
    let offset = ball.center().x - paddle.center().x;
    offset / divisor
}

/// Bounce the ball off the paddle if they touch. Returns the hit offset.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Rect, divisor: i32) -> Option<i32> {
    if !ball_hits_paddle(&ball.rect, ball.vel.y, paddle) {
        return None;
    }
    let offset = ball.rect.center().x - paddle.center().x;
    ball.vel.x = paddle_deflection(&ball.rect, paddle, divisor);
    ball.vel.y = -ball.vel.y;
    Some(offset)
}

/// Test every block against the ball's sample points, applying one hit per
/// point that lands inside a block.
///
/// A block may take several hits in one frame. When a block breaks, the
/// remaining points are not tested against it; the block swapped into its
/// slot is scanned in full instead.
pub fn scan_blocks(ball: &Rect, blocks: &mut BlockArena, events: &mut Vec<GameEvent>) -> StruckEdges {
    let points = ball.edge_midpoints();
    let mut struck = StruckEdges::default();

    let mut index = 0;
    while index < blocks.len() {
        let mut destroyed = false;
        for edge in EDGES {
            let Some(block) = blocks.get(index) else {
                break;
            };
            if !block.rect.contains_point(edge.point(&points)) {
                continue;
            }
            edge.mark(&mut struck);
            match blocks.hit(index) {
                HitResult::Damaged { hits_left } => {
                    events.push(GameEvent::BlockHit { hits_left });
                }
                HitResult::Destroyed => {
                    log::debug!("Block destroyed, {} left", blocks.len());
                    events.push(GameEvent::BlockDestroyed);
                    destroyed = true;
                    break;
                }
            }
        }
        if !destroyed {
            index += 1;
        }
    }

    struck
}

/// Apply at most one correction per struck edge: flip the matching speed
/// component and push the ball one diameter away from the surface.
pub fn apply_block_bounce(ball: &mut Ball, struck: StruckEdges) {
    let d = ball.diameter();
    if struck.top {
        ball.vel.y = -ball.vel.y;
        ball.rect.pos.y += d;
    }
    if struck.bottom {
        ball.vel.y = -ball.vel.y;
        ball.rect.pos.y -= d;
    }
    if struck.left {
        ball.vel.x = -ball.vel.x;
        ball.rect.pos.x += d;
    }
    if struck.right {
        ball.vel.x = -ball.vel.x;
        ball.rect.pos.x -= d;
    }
}

/// Reflect off the side walls and the ceiling. Only reflects when the ball is
/// moving toward the wall it touches.
pub fn reflect_off_walls(ball: &mut Ball) {
    let r = ball.rect;
    if (ball.vel.x < 0 && r.left() <= 0) || (ball.vel.x > 0 && r.right() >= WINDOW_WIDTH) {
        ball.vel.x = -ball.vel.x;
    }
    if ball.vel.y < 0 && r.top() <= 0 {
        ball.vel.y = -ball.vel.y;
    }
}

/// True once the ball's top edge has dropped past the bottom of the window
pub fn ball_out_of_bounds(ball: &Rect) -> bool {
    ball.top() >= WINDOW_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Block, Paddle};
    use proptest::prelude::*;

    fn ball_at(x: i32, y: i32, vel: IVec2) -> Ball {
        Ball {
            rect: Rect::new(x, y, BALL_DIAMETER, BALL_DIAMETER),
            vel,
        }
    }

    fn arena(rects: &[(Rect, u8)]) -> BlockArena {
        let mut arena = BlockArena::default();
        arena.reload(rects.iter().map(|&(r, h)| Block::new(r, h)));
        arena
    }

    #[test]
    fn test_dead_center_paddle_hit() {
        let paddle = Paddle::new(PLAYER_SPEED);
        let center_x = paddle.rect.center().x;
        // Bottom edge lands exactly on the paddle's top
        let mut ball = ball_at(center_x - BALL_DIAMETER / 2, PLAYER_Y - BALL_DIAMETER, IVec2::new(0, 10));

        let offset = resolve_paddle(&mut ball, &paddle.rect, BALL_SPEED_MODIFIER);
        assert_eq!(offset, Some(0));
        assert_eq!(ball.vel, IVec2::new(0, -10));
    }

    #[test]
    fn test_edge_paddle_hit_deflects() {
        let paddle = Paddle::new(PLAYER_SPEED);
        // Ball centered 48px right of paddle center
        let x = paddle.rect.center().x + 48 - BALL_DIAMETER / 2;
        let mut ball = ball_at(x, PLAYER_Y - 4, IVec2::new(0, 10));
        resolve_paddle(&mut ball, &paddle.rect, BALL_SPEED_MODIFIER);
        assert_eq!(ball.vel, IVec2::new(9, -10));

        // Truncates toward zero on the left side too
        let x = paddle.rect.center().x - 48 - BALL_DIAMETER / 2;
        let mut ball = ball_at(x, PLAYER_Y - 4, IVec2::new(0, 10));
        resolve_paddle(&mut ball, &paddle.rect, BALL_SPEED_MODIFIER);
        assert_eq!(ball.vel, IVec2::new(-9, -10));
    }

    #[test]
    fn test_rising_ball_ignores_paddle() {
        let paddle = Paddle::new(PLAYER_SPEED);
        let mut ball = ball_at(paddle.rect.center().x, PLAYER_Y - 4, IVec2::new(0, -10));
        assert_eq!(resolve_paddle(&mut ball, &paddle.rect, BALL_SPEED_MODIFIER), None);
        assert_eq!(ball.vel, IVec2::new(0, -10));
    }

    #[test]
    fn test_ball_beside_paddle_misses() {
        let paddle = Paddle::new(PLAYER_SPEED);
        let ball = ball_at(paddle.rect.right() + 1, PLAYER_Y, IVec2::new(0, 10));
        assert!(!ball_hits_paddle(&ball.rect, ball.vel.y, &paddle.rect));
    }

    #[test]
    fn test_two_blocks_same_edge_single_bounce() {
        // Two blocks side by side; the ball's top mid-point sits on their shared edge
        let mut blocks = arena(&[(Rect::new(100, 100, 80, 20), 2), (Rect::new(180, 100, 80, 20), 2)]);
        let mut ball = ball_at(180 - BALL_DIAMETER / 2, 115, IVec2::new(0, -10));
        let mut events = Vec::new();

        let struck = scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert_eq!(struck, StruckEdges { top: true, ..Default::default() });
        assert!(blocks.iter().all(|b| b.hits == 1));
        assert_eq!(events.len(), 2);

        let y = ball.rect.pos.y;
        apply_block_bounce(&mut ball, struck);
        assert_eq!(ball.vel, IVec2::new(0, 10));
        assert_eq!(ball.rect.pos.y, y + BALL_DIAMETER);
    }

    #[test]
    fn test_one_block_hit_by_two_points() {
        // Ball corner wedged into a block: top and left points both inside
        let mut blocks = arena(&[(Rect::new(100, 100, 80, 20), 3)]);
        let ball = ball_at(172, 112, IVec2::new(-5, -10));
        let mut events = Vec::new();

        let struck = scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert!(struck.top && struck.left);
        assert_eq!(blocks.get(0).map(|b| b.hits), Some(1));
    }

    #[test]
    fn test_destroyed_block_stops_further_points() {
        let mut blocks = arena(&[(Rect::new(100, 100, 80, 20), 1)]);
        let ball = ball_at(172, 112, IVec2::new(-5, -10));
        let mut events = Vec::new();

        let struck = scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert!(blocks.is_empty());
        assert_eq!(events, vec![GameEvent::BlockDestroyed]);
        assert!(struck.top);
        assert!(!struck.left);
    }

    #[test]
    fn test_swapped_in_block_is_scanned() {
        // First block breaks, last block (also touching) moves into slot 0
        let mut blocks = arena(&[
            (Rect::new(100, 100, 80, 20), 1),
            (Rect::new(500, 300, 80, 20), 1),
            (Rect::new(180, 100, 80, 20), 1),
        ]);
        let ball = ball_at(180 - BALL_DIAMETER / 2, 115, IVec2::new(0, -10));
        let mut events = Vec::new();

        scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get(0).map(|b| b.rect.pos), Some(IVec2::new(500, 300)));
    }

    #[test]
    fn test_left_edge_hit_bounces_right() {
        let mut blocks = arena(&[(Rect::new(100, 100, 80, 20), 2)]);
        let mut ball = ball_at(178, 102, IVec2::new(-5, 3));
        let mut events = Vec::new();

        let struck = scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert_eq!(struck, StruckEdges { left: true, ..Default::default() });
        apply_block_bounce(&mut ball, struck);
        assert_eq!(ball.vel, IVec2::new(5, 3));
        assert_eq!(ball.rect.pos, IVec2::new(178 + BALL_DIAMETER, 102));
    }

    #[test]
    fn test_right_edge_hit_bounces_left() {
        let mut blocks = arena(&[(Rect::new(200, 100, 80, 20), 2)]);
        let mut ball = ball_at(186, 102, IVec2::new(5, 3));
        let mut events = Vec::new();

        let struck = scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert_eq!(struck, StruckEdges { right: true, ..Default::default() });
        apply_block_bounce(&mut ball, struck);
        assert_eq!(ball.vel, IVec2::new(-5, 3));
        assert_eq!(ball.rect.pos, IVec2::new(186 - BALL_DIAMETER, 102));
    }

    #[test]
    fn test_two_blocks_same_side_single_horizontal_bounce() {
        // Stacked blocks; the ball's left mid-point sits on their shared edge
        let mut blocks = arena(&[(Rect::new(100, 100, 80, 20), 2), (Rect::new(100, 120, 80, 20), 2)]);
        let mut ball = ball_at(178, 112, IVec2::new(-5, 3));
        let mut events = Vec::new();

        let struck = scan_blocks(&ball.rect, &mut blocks, &mut events);
        assert_eq!(struck, StruckEdges { left: true, ..Default::default() });
        assert_eq!(events, vec![GameEvent::BlockHit { hits_left: 1 }; 2]);

        apply_block_bounce(&mut ball, struck);
        assert_eq!(ball.vel, IVec2::new(5, 3));
        assert_eq!(ball.rect.pos, IVec2::new(178 + BALL_DIAMETER, 112));
    }

    #[test]
    fn test_ceiling_reflects_only_when_rising() {
        let mut ball = ball_at(300, 0, IVec2::new(0, -10));
        reflect_off_walls(&mut ball);
        assert_eq!(ball.vel.y, 10);

        let mut ball = ball_at(300, 0, IVec2::new(0, 10));
        reflect_off_walls(&mut ball);
        assert_eq!(ball.vel.y, 10);
    }

    proptest! {
        #[test]
        fn prop_side_wall_flip(x in -20i32..WINDOW_WIDTH + 20, vx in -15i32..=15) {
            prop_assume!(vx != 0);
            let mut ball = ball_at(x, 300, IVec2::new(vx, 10));
            let touches_left = ball.rect.left() <= 0;
            let touches_right = ball.rect.right() >= WINDOW_WIDTH;
            let toward_wall = (vx < 0 && touches_left) || (vx > 0 && touches_right);

            reflect_off_walls(&mut ball);
            if toward_wall {
                prop_assert_eq!(ball.vel.x, -vx);
            } else {
                prop_assert_eq!(ball.vel.x, vx);
            }
        }

        #[test]
        fn prop_scan_never_adds_blocks(
            x in 0i32..WINDOW_WIDTH,
            y in 0i32..WINDOW_HEIGHT,
            hits in proptest::collection::vec(1u8..=4, 1..12),
        ) {
            let rects: Vec<(Rect, u8)> = hits
                .iter()
                .enumerate()
                .map(|(i, &h)| (Rect::new((i as i32 % 4) * 80 + 40, (i as i32 / 4) * 20 + 60, 80, 20), h))
                .collect();
            let mut blocks = arena(&rects);
            let before: u32 = blocks.iter().map(|b| b.hits as u32).sum();
            let count = blocks.len();
            let ball = ball_at(x, y, IVec2::new(0, -10));
            let mut events = Vec::new();

            scan_blocks(&ball.rect, &mut blocks, &mut events);
            let after: u32 = blocks.iter().map(|b| b.hits as u32).sum();
            prop_assert!(blocks.len() <= count);
            prop_assert!(blocks.iter().all(|b| b.hits > 0));
            prop_assert_eq!(before - after, events.len() as u32);
        }
    }
}
