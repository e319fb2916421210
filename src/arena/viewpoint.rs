//! Obstacle-to-viewpoint projection.
//!
//! Each obstacle has exactly one viewing state: the cell `clearance` units
//! away on the far side of its marked face, with the robot heading along
//! the obstacle's facing so the face fills the camera. An obstacle whose
//! viewing state falls outside the arena or inside another obstacle's
//! margin is flagged unreachable instead of being silently dropped.

use log::debug;

use crate::core::RobotState;

use super::{Arena, Obstacle};

/// An obstacle paired with its derived viewing state.
#[derive(Clone, Debug)]
pub struct ObstacleViewpoint {
    pub obstacle: Obstacle,
    /// Viewing state; meaningful only when `reachable` is true.
    pub state: RobotState,
    /// Whether the viewing state is a legal robot footprint position.
    pub reachable: bool,
}

/// Project every obstacle to its viewing state.
///
/// Output order matches input order; callers rely on the index pairing
/// when correlating DP results back to obstacle identifiers.
pub fn project_viewpoints(
    arena: &Arena,
    obstacles: &[Obstacle],
    clearance: i32,
) -> Vec<ObstacleViewpoint> {
    obstacles
        .iter()
        .map(|ob| {
            let (dx, dy) = ob.facing.vector();
            let cell = ob.cell.offset(-dx * clearance, -dy * clearance);
            let state = RobotState::new(cell, ob.facing);
            let reachable = arena.is_footprint_legal(cell);

            if !reachable {
                debug!(
                    "[Viewpoint] obstacle {} at {} facing {} has no legal viewing state (candidate {})",
                    ob.id, ob.cell, ob.facing, cell
                );
            }

            ObstacleViewpoint {
                obstacle: ob.clone(),
                state,
                reachable,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridCell, Heading};

    fn project_one(ob: Obstacle) -> ObstacleViewpoint {
        let obstacles = vec![ob];
        let arena = Arena::new(20, 20, &obstacles, 2);
        project_viewpoints(&arena, &obstacles, 2).remove(0)
    }

    #[test]
    fn test_viewpoint_sits_opposite_the_face() {
        // facing North: robot senses heading north, standing south of it
        let vp = project_one(Obstacle::new(GridCell::new(5, 5), Heading::North, "1"));
        assert!(vp.reachable);
        assert_eq!(vp.state, RobotState::at(5, 3, Heading::North));

        let vp = project_one(Obstacle::new(GridCell::new(5, 5), Heading::West, "2"));
        assert!(vp.reachable);
        assert_eq!(vp.state, RobotState::at(7, 5, Heading::West));
    }

    #[test]
    fn test_viewpoint_outside_arena_is_unreachable() {
        // clearance pushes the viewing state below y = 0
        let vp = project_one(Obstacle::new(GridCell::new(5, 1), Heading::North, "1"));
        assert!(!vp.reachable);
    }

    #[test]
    fn test_viewpoint_blocked_by_other_obstacle() {
        let obstacles = vec![
            Obstacle::new(GridCell::new(5, 5), Heading::North, "1"),
            // sits exactly on the first obstacle's viewing cell
            Obstacle::new(GridCell::new(5, 3), Heading::East, "2"),
        ];
        let arena = Arena::new(20, 20, &obstacles, 2);
        let vps = project_viewpoints(&arena, &obstacles, 2);
        assert!(!vps[0].reachable);
    }

    #[test]
    fn test_wall_margin_makes_viewpoint_unreachable() {
        // viewing cell lands on x = 0, where the footprint cannot center
        let vp = project_one(Obstacle::new(GridCell::new(2, 10), Heading::East, "1"));
        assert!(!vp.reachable);
    }
}
