//! Radial wheel geometry.
//!
//! Items sit at equal angular steps on a circle inside a square container.
//! Index 0 is at 12 o'clock and the wheel proceeds clockwise; offsets are in
//! screen space (y grows downward) relative to the container centre.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Keeps items from touching the container edge.
pub const WHEEL_PADDING: f64 = 8.0;
pub const DEFAULT_CONTAINER_DIAMETER: f64 = 320.0;
pub const DEFAULT_ITEM_DIAMETER: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPosition {
    pub x: f64,
    pub y: f64,
}

impl LayoutPosition {
    pub fn distance_from_centre(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Top-left corner of an item of `item_diameter` placed at this offset
    /// inside a container of `container_diameter`, as `(left, top)`.
    pub fn anchor(&self, container_diameter: f64, item_diameter: f64) -> (f64, f64) {
        let origin = container_diameter / 2.0 - item_diameter / 2.0;
        (origin + self.x, origin + self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    pub container_diameter: f64,
    pub item_diameter: f64,
    pub padding: f64,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_DIAMETER, DEFAULT_ITEM_DIAMETER)
    }
}

impl RadialLayout {
    pub fn new(container_diameter: f64, item_diameter: f64) -> Self {
        Self {
            container_diameter,
            item_diameter,
            padding: WHEEL_PADDING,
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Placement radius, or `None` when the geometry cannot hold a wheel.
    pub fn radius(&self) -> Option<f64> {
        let dims = [self.container_diameter, self.item_diameter, self.padding];
        if dims.iter().any(|d| !d.is_finite()) {
            return None;
        }
        if self.container_diameter <= 0.0 || self.item_diameter <= 0.0 || self.padding < 0.0 {
            return None;
        }
        let radius = self.container_diameter / 2.0 - self.item_diameter / 2.0 - self.padding;
        (radius > 0.0).then_some(radius)
    }

    pub fn positions(&self, item_count: usize) -> Vec<LayoutPosition> {
        let Some(radius) = self.radius() else {
            return Vec::new();
        };

        (0..item_count)
            .map(|i| {
                let angle = (i as f64 / item_count as f64) * TAU - FRAC_PI_2;
                LayoutPosition {
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                }
            })
            .collect()
    }

    /// Pairs each item with its slot on the wheel, in order.
    pub fn place<'a, T>(&self, items: &'a [T]) -> Vec<(&'a T, LayoutPosition)> {
        items.iter().zip(self.positions(items.len())).collect()
    }
}

pub fn radial_positions(
    item_count: usize,
    container_diameter: f64,
    item_diameter: f64,
) -> Vec<LayoutPosition> {
    RadialLayout::new(container_diameter, item_diameter).positions(item_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_every_item_sits_on_the_circle() {
        let layout = RadialLayout::default();
        let radius = layout.radius().unwrap();
        assert!((radius - 120.0).abs() < EPSILON);

        for count in 1..=24 {
            let positions = layout.positions(count);
            assert_eq!(positions.len(), count);
            for p in &positions {
                assert!((p.distance_from_centre() - radius).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_first_item_at_twelve_o_clock() {
        for count in [1, 2, 7, 12] {
            let first = radial_positions(count, 320.0, 64.0)[0];
            assert!(first.x.abs() < EPSILON);
            assert!((first.y + 120.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_wheel_runs_clockwise() {
        let positions = radial_positions(4, 320.0, 64.0);
        // top, right, bottom, left
        assert!((positions[1].x - 120.0).abs() < EPSILON);
        assert!((positions[2].y - 120.0).abs() < EPSILON);
        assert!((positions[3].x + 120.0).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_geometry_is_empty() {
        assert!(radial_positions(0, 320.0, 64.0).is_empty());
        assert!(radial_positions(12, 0.0, 64.0).is_empty());
        assert!(radial_positions(12, 320.0, -1.0).is_empty());
        assert!(radial_positions(12, 64.0, 64.0).is_empty());
        assert!(radial_positions(12, f64::NAN, 64.0).is_empty());
    }

    #[test]
    fn test_anchor_centres_the_item() {
        let top = radial_positions(12, 320.0, 64.0)[0];
        let (left, top_edge) = top.anchor(320.0, 64.0);
        assert!((left - 128.0).abs() < EPSILON);
        assert!((top_edge - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_place_keeps_item_order() {
        let items = ["a", "b", "c"];
        let placed = RadialLayout::default().place(&items);
        assert_eq!(placed.len(), 3);
        assert_eq!(*placed[0].0, "a");
        assert!(placed[0].1.x.abs() < EPSILON);
    }
}
