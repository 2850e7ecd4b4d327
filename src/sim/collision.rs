//! Collision queries and movement resolution
//!
//! Everything here is brute force over slices. Level grids are 20×20 tiles,
//! so a tick touches a few hundred rectangles at most.

use glam::IVec2;

use super::rect::Rect;

/// Which axis a displacement is applied on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Apply a displacement along one axis, then push the rectangle back out of
/// every obstacle it now overlaps.
///
/// Moving right clamps the right edge to the obstacle's left edge, moving left
/// clamps the left edge to the obstacle's right edge (and likewise for
/// vertical motion). Obstacles are visited in order against the updated
/// rectangle.
pub fn sweep_axis(rect: Rect, delta: i32, axis: Axis, obstacles: &[Rect]) -> Rect {
    let mut moved = match axis {
        Axis::Horizontal => rect.translated(IVec2::new(delta, 0)),
        Axis::Vertical => rect.translated(IVec2::new(0, delta)),
    };

    for obstacle in obstacles {
        if !moved.overlaps(obstacle) {
            continue;
        }
        match axis {
            Axis::Horizontal => {
                if delta > 0 {
                    moved.pos.x = obstacle.left() - moved.size.x;
                } else if delta < 0 {
                    moved.pos.x = obstacle.right();
                }
            }
            Axis::Vertical => {
                if delta > 0 {
                    moved.pos.y = obstacle.top() - moved.size.y;
                } else if delta < 0 {
                    moved.pos.y = obstacle.bottom();
                }
            }
        }
    }

    moved
}

/// Move horizontally first, then vertically, clamping against obstacles
pub fn move_with_clamp(rect: Rect, delta: IVec2, obstacles: &[Rect]) -> Rect {
    let rect = sweep_axis(rect, delta.x, Axis::Horizontal, obstacles);
    sweep_axis(rect, delta.y, Axis::Vertical, obstacles)
}

/// Index of the first rectangle overlapping `rect`
pub fn first_overlap<'a, I>(rect: &Rect, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    candidates.into_iter().position(|other| rect.overlaps(other))
}
