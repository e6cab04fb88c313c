//! Fixed-step ray march.
//!
//! Not a DDA: the ray advances by `1 / precision` map units per step, so
//! cost grows with `distance × precision` and the hit point overshoots the
//! wall face by at most one step.

use glam::Vec2;

use crate::world::{Cell, Grid, OPEN};

/// Where a ray stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    /// Straight Euclidean length origin → `point` (no fish-eye correction).
    pub distance: f32,
    /// Value of the cell that stopped the ray.
    pub cell: Cell,
}

/// March from `origin` towards `angle` (degrees) until an occupied cell.
///
/// The first step is always taken before the first lookup, so the distance
/// is never zero. `precision` must be finite and positive; termination
/// relies on the grid's occupied border.
pub fn march(grid: &Grid, origin: Vec2, angle: f32, precision: f32) -> RayHit {
    let (sin, cos) = angle.to_radians().sin_cos();
    let step = Vec2::new(cos, sin) / precision;

    let mut p = origin;
    let cell = loop {
        p += step;
        let c = grid.occupancy(p.x.floor() as usize, p.y.floor() as usize);
        if c != OPEN {
            break c;
        }
    };

    RayHit {
        point: p,
        distance: origin.distance(p),
        cell,
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    const PRECISION: f32 = 64.0;

    #[test]
    fn straight_down_the_corridor() {
        // row 2 is open from x=1 to x=8, wall at x=9
        let hit = march(&Grid::sample(), Vec2::new(2.0, 2.0), 0.0, PRECISION);
        assert_eq!(hit.cell, 1);
        assert_eq!(hit.point.x.floor(), 9.0);
        assert!((hit.distance - 7.0).abs() <= 1.0 / PRECISION);
    }

    #[test]
    fn sample_scenario_distances() {
        let g = Grid::sample();
        let origin = Vec2::new(2.0, 2.0);

        // centre column looks along +Y through column 1/2 to the bottom wall
        let centre = march(&g, origin, 90.0, PRECISION);
        assert!((centre.distance - 7.0).abs() < 0.05, "{centre:?}");

        // left-most column (60°) clips the pillar at cell (3, 3)
        let left = march(&g, origin, 60.0, PRECISION);
        assert!((left.distance - 2.0).abs() < 0.05, "{left:?}");
        assert_eq!((left.point.x.floor(), left.point.y.floor()), (3.0, 3.0));
    }

    #[test]
    fn identical_inputs_are_bit_identical() {
        let g = Grid::sample();
        let a = march(&g, Vec2::new(2.0, 2.0), 60.0, PRECISION);
        let b = march(&g, Vec2::new(2.0, 2.0), 60.0, PRECISION);
        assert_eq!(a.distance.to_bits(), b.distance.to_bits());
        assert_eq!(a.point, b.point);
    }

    #[test]
    fn every_ray_terminates_inside_the_map() {
        let g = Grid::sample();
        let origins = [
            Vec2::new(1.5, 1.5),
            Vec2::new(2.0, 2.0),
            Vec2::new(4.5, 4.5),
            Vec2::new(8.9, 8.9),
            Vec2::new(7.25, 5.75),
        ];
        for origin in origins {
            assert!(g.is_open(origin));
            for i in 0..96 {
                let angle = i as f32 * 3.75 - 180.0;
                let hit = march(&g, origin, angle, PRECISION);
                assert!(hit.distance > 0.0 && hit.distance.is_finite());
                assert!(hit.distance <= g.diagonal(), "{origin} @ {angle}°");
                assert_ne!(hit.cell, OPEN);
            }
        }
    }

    #[test]
    fn first_step_is_taken_even_inside_a_wall() {
        // origin inside the pillar: the loop still moves before looking
        let hit = march(&Grid::sample(), Vec2::new(3.5, 3.5), 0.0, PRECISION);
        assert!((hit.distance - 1.0 / PRECISION).abs() < 1e-6);
    }

    #[test]
    fn finest_accepted_precision_still_reaches_a_wall() {
        let g = Grid::sample();
        let precision = g.finest_precision() * 0.5;
        for angle in [0.0, 45.0, 90.0, 200.0] {
            let hit = march(&g, Vec2::new(2.0, 2.0), angle, precision);
            assert!(hit.distance <= g.diagonal(), "{angle}°");
            assert_ne!(hit.cell, OPEN);
        }
    }

    #[test]
    fn coarser_precision_overshoots_more() {
        let g = Grid::sample();
        let fine = march(&g, Vec2::new(2.0, 2.0), 0.0, 256.0);
        let coarse = march(&g, Vec2::new(2.0, 2.0), 0.0, 3.0);
        assert!(fine.distance >= 7.0 && fine.distance - 7.0 <= 1.0 / 256.0);
        assert!(coarse.distance >= 7.0 && coarse.distance - 7.0 <= 1.0 / 3.0 + 1e-5);
    }
}
