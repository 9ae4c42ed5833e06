// simulation/collision.rs
// Grains meeting the fluid surface, and the floor's precipitate stack

use log::trace;

use super::{ConcentrationModel, LabEvent};
use crate::particles::{Landing, Precipitate};

/// Resolve one grain that reached the surface. It dissolves if the
/// solution can still take its whole amount (the saturation boundary
/// counts as dissolving); otherwise the excess settles as precipitate
/// under the landing point. Returns whether the grain dissolved.
pub fn resolve_landing(model: &mut ConcentrationModel, landing: Landing) -> bool {
    if landing.solute != model.solution.solute() {
        // grain from a solute that has since been switched out
        return false;
    }
    let moles = landing.solute.moles_per_particle();
    let room = model.solution.saturated_amount() - model.solution.solute_amount();
    model.solution.add_solute(moles);
    if moles <= room {
        trace!("grain dissolved at x={:.1}", landing.position.x);
        true
    } else {
        trace!("grain precipitated at x={:.1}", landing.position.x);
        reconcile_precipitate(model, Some(landing.position.x));
        false
    }
}

/// Bring the number of floor grains in line with the precipitate amount.
pub fn reconcile_precipitate(model: &mut ConcentrationModel, hint_x: Option<f32>) {
    let solute = model.solution.solute();
    let target = Precipitate::target_count(model.solution.precipitate_amount(), solute);
    let (added, removed) =
        model
            .precipitate
            .reconcile(target, solute, &model.beaker, hint_x, &mut model.rng);
    if added > 0 {
        model.push_event(LabEvent::PrecipitateFormed { count: added });
    }
    if removed > 0 {
        model.push_event(LabEvent::PrecipitateDissolved { count: removed });
    }
}
