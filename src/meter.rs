use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use crate::beaker::Beaker;
use crate::config;
use crate::emitters::{DragBounds, FluidStream, Movable};
use crate::solution::Solution;

/// Draggable concentration probe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationMeter {
    pub probe: Movable,
    /// Last reading (mol/L), `None` when the probe touches no fluid
    value: Option<f64>,
}

impl Default for ConcentrationMeter {
    fn default() -> Self {
        Self {
            probe: Movable::new(
                config::PROBE_POSITION,
                DragBounds::new(config::PROBE_DRAG_MIN, config::PROBE_DRAG_MAX),
            ),
            value: None,
        }
    }
}

impl ConcentrationMeter {
    pub fn probe_position(&self) -> Vec2 {
        self.probe.position()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Re-read the probe. The beaker's solution wins over any stream;
    /// otherwise the first stream containing the probe supplies its
    /// concentration.
    pub fn update(
        &mut self,
        beaker: &Beaker,
        solution: &Solution,
        streams: &[(Option<FluidStream>, f64)],
    ) -> Option<f64> {
        let probe = self.probe_position();
        self.value = if beaker.in_fluid(probe, solution.volume()) {
            Some(solution.concentration())
        } else {
            streams
                .iter()
                .find(|(stream, _)| stream.map_or(false, |s| s.contains(probe)))
                .map(|(_, concentration)| *concentration)
        };
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabConfig;
    use crate::solute::SoluteId;
    use approx::assert_relative_eq;

    fn setup() -> (Beaker, Solution) {
        let beaker = Beaker::from_config(&LabConfig::default());
        let mut solution = Solution::new(SoluteId::DrinkMix, 0.5, 1.0);
        solution.add_solute(1.0);
        (beaker, solution)
    }

    #[test]
    fn reads_solution_when_immersed() {
        let (beaker, solution) = setup();
        let mut meter = ConcentrationMeter::default();
        meter.probe.move_to(Vec2::new(0.0, 50.0));
        assert_relative_eq!(meter.update(&beaker, &solution, &[]).unwrap(), 2.0);
    }

    #[test]
    fn reads_nothing_in_air() {
        let (beaker, solution) = setup();
        let mut meter = ConcentrationMeter::default();
        assert_eq!(meter.update(&beaker, &solution, &[]), None);
    }

    #[test]
    fn reads_stream_concentration() {
        let (beaker, solution) = setup();
        let mut meter = ConcentrationMeter::default();
        meter.probe.move_to(Vec2::new(0.0, 250.0));
        let stream = FluidStream { x: 0.0, half_width: 5.0, top: 325.0, bottom: 150.0 };
        assert_eq!(meter.update(&beaker, &solution, &[(None, 0.0), (Some(stream), 5.5)]), Some(5.5));
    }
}
