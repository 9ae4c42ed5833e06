use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use crate::config::LabConfig;

/// Fixed container geometry. `position` is the centre of the floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beaker {
    pub position: Vec2,
    pub size: Vec2,
    /// Fluid capacity (L)
    pub capacity: f64,
    /// The beaker's interior width in cm, used as the Beer's-law optical
    /// path. The view-unit `size.x` is not a physical length.
    pub path_length: f64,
}

impl Beaker {
    pub fn new(position: Vec2, size: Vec2, capacity: f64, path_length: f64) -> Self {
        Self { position, size, capacity, path_length }
    }

    pub fn from_config(config: &LabConfig) -> Self {
        let [x, y] = config.beaker_position;
        Self::new(
            Vec2::new(x, y),
            Vec2::new(config.beaker_width, config.beaker_height),
            config.beaker_capacity,
            config.path_length_cm,
        )
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.position.y
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Height of `volume` liters of fluid above the floor.
    pub fn fill_height(&self, volume: f64) -> f32 {
        (self.size.y as f64 * (volume / self.capacity).clamp(0.0, 1.0)) as f32
    }

    /// Y coordinate of the fluid surface for `volume`.
    pub fn surface_y(&self, volume: f64) -> f32 {
        self.bottom() + self.fill_height(volume)
    }

    /// Whether `point` lies inside the fluid of the given volume.
    pub fn in_fluid(&self, point: Vec2, volume: f64) -> bool {
        volume > 0.0
            && point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.surface_y(volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beaker() -> Beaker {
        Beaker::from_config(&LabConfig::default())
    }

    #[test]
    fn fill_height_scales_with_volume() {
        let b = beaker();
        assert_eq!(b.fill_height(0.0), 0.0);
        assert_eq!(b.fill_height(0.5), 150.0);
        assert_eq!(b.fill_height(1.0), 300.0);
        assert_eq!(b.fill_height(2.0), 300.0);
    }

    #[test]
    fn fluid_containment() {
        let b = beaker();
        assert!(b.in_fluid(Vec2::new(0.0, 100.0), 0.5));
        assert!(!b.in_fluid(Vec2::new(0.0, 200.0), 0.5));
        assert!(!b.in_fluid(Vec2::new(400.0, 100.0), 0.5));
        assert!(!b.in_fluid(Vec2::new(0.0, 0.0), 0.0));
    }
}
