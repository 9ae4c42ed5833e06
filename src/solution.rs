//! Solvent volume plus total solute amount for the active solute.
//!
//! `solute_amount` counts every mole that has entered the beaker, whether
//! it is dissolved or lying on the floor as precipitate. The split between
//! the two is always derived from the saturation cap and never stored.

use serde::{Deserialize, Serialize};

use crate::solute::SoluteId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    solute: SoluteId,
    /// Total solute in the beaker (mol)
    solute_amount: f64,
    /// Solvent volume (L)
    volume: f64,
    max_volume: f64,
}

impl Solution {
    pub fn new(solute: SoluteId, volume: f64, max_volume: f64) -> Self {
        Self {
            solute,
            solute_amount: 0.0,
            volume: volume.clamp(0.0, max_volume),
            max_volume,
        }
    }

    pub fn solute(&self) -> SoluteId {
        self.solute
    }

    pub fn solute_amount(&self) -> f64 {
        self.solute_amount
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_full(&self) -> bool {
        self.volume >= self.max_volume
    }

    pub fn is_empty(&self) -> bool {
        self.volume <= 0.0
    }

    /// Largest amount that can stay dissolved in the current volume.
    pub fn saturated_amount(&self) -> f64 {
        self.solute.saturated_concentration() * self.volume
    }

    pub fn precipitate_amount(&self) -> f64 {
        (self.solute_amount - self.saturated_amount()).max(0.0)
    }

    pub fn dissolved_amount(&self) -> f64 {
        self.solute_amount - self.precipitate_amount()
    }

    /// Total amount over volume, ignoring saturation. Zero when empty.
    pub fn raw_concentration(&self) -> f64 {
        if self.volume > 0.0 {
            self.solute_amount / self.volume
        } else {
            0.0
        }
    }

    /// Dissolved concentration (mol/L), never above saturation.
    pub fn concentration(&self) -> f64 {
        if self.volume > 0.0 {
            (self.dissolved_amount() / self.volume).min(self.solute.saturated_concentration())
        } else {
            0.0
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.volume > 0.0 && self.raw_concentration() >= self.solute.saturated_concentration()
    }

    /// Add solid solute. Returns the amount actually added.
    pub fn add_solute(&mut self, moles: f64) -> f64 {
        if !(moles > 0.0) || !moles.is_finite() {
            return 0.0;
        }
        self.solute_amount += moles;
        self.check_invariants();
        moles
    }

    /// Clear all solute, dissolved and precipitated.
    pub fn remove_all_solute(&mut self) {
        self.solute_amount = 0.0;
    }

    /// Switch chemicals. Any previous solute is discarded.
    pub fn set_solute(&mut self, solute: SoluteId) {
        self.solute = solute;
        self.solute_amount = 0.0;
    }

    /// Add pure solvent, saturating at capacity. Returns liters added.
    pub fn add_volume(&mut self, liters: f64) -> f64 {
        let added = clamp_delta(liters, self.max_volume - self.volume);
        self.volume += added;
        self.check_invariants();
        added
    }

    /// Add solution of the given concentration, saturating at capacity.
    /// Returns liters added.
    pub fn add_stock_solution(&mut self, liters: f64, concentration: f64) -> f64 {
        let added = self.add_volume(liters);
        self.solute_amount += added * concentration.max(0.0);
        self.check_invariants();
        added
    }

    /// Drain solution: solvent and dissolved solute leave in proportion, so
    /// the dissolved concentration and the precipitate are unchanged.
    /// Returns liters removed.
    pub fn remove_volume(&mut self, liters: f64) -> f64 {
        let removed = clamp_delta(liters, self.volume);
        if removed > 0.0 {
            let solute_removed = self.concentration() * removed;
            self.solute_amount = (self.solute_amount - solute_removed).max(0.0);
            self.volume = if removed >= self.volume { 0.0 } else { self.volume - removed };
        }
        self.check_invariants();
        removed
    }

    /// Remove solvent only. Returns liters removed.
    pub fn evaporate(&mut self, liters: f64) -> f64 {
        let removed = clamp_delta(liters, self.volume);
        self.volume = if removed >= self.volume { 0.0 } else { self.volume - removed };
        self.check_invariants();
        removed
    }

    fn check_invariants(&self) {
        debug_assert!(self.solute_amount >= 0.0, "negative solute amount");
        debug_assert!(
            self.volume >= 0.0 && self.volume <= self.max_volume,
            "volume outside beaker range"
        );
        debug_assert!(
            self.concentration() <= self.solute.saturated_concentration(),
            "dissolved concentration above saturation"
        );
    }
}

/// Clamp a requested change to `[0, available]`, treating NaN as zero.
fn clamp_delta(requested: f64, available: f64) -> f64 {
    if requested > 0.0 {
        requested.min(available.max(0.0))
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn drink_mix(volume: f64) -> Solution {
        Solution::new(SoluteId::DrinkMix, volume, 1.0)
    }

    #[test]
    fn drink_mix_saturates_past_2_98_moles_in_half_a_liter() {
        let mut s = drink_mix(0.5);
        while s.solute_amount() < 2.5 - 1e-9 {
            s.add_solute(0.25);
        }
        assert_relative_eq!(s.solute_amount(), 2.5);
        assert!(!s.is_saturated());
        assert_eq!(s.precipitate_amount(), 0.0);
        assert_relative_eq!(s.concentration(), 5.0);

        while s.solute_amount() < 4.0 - 1e-9 {
            s.add_solute(0.25);
        }
        assert_relative_eq!(s.solute_amount(), 4.0);
        assert!(s.is_saturated());
        assert_relative_eq!(s.precipitate_amount(), 1.02, epsilon = 1e-12);
        assert_relative_eq!(s.concentration(), 5.96);
    }

    #[test]
    fn exact_saturation_has_no_precipitate() {
        let mut s = drink_mix(0.5);
        s.add_solute(2.98);
        assert!(s.is_saturated());
        assert_abs_diff_eq!(s.precipitate_amount(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn dissolved_plus_precipitate_is_total() {
        for volume in [0.05, 0.1, 0.33, 0.5, 0.9, 1.0] {
            for amount in [0.0, 0.1, 1.0, 2.98, 4.0, 5.0] {
                let mut s = drink_mix(volume);
                s.add_solute(amount);
                assert_abs_diff_eq!(
                    s.dissolved_amount() + s.precipitate_amount(),
                    amount,
                    epsilon = 1e-12
                );
                assert!(s.concentration() <= 5.96);
            }
        }
    }

    #[test]
    fn empty_solution_has_zero_concentration() {
        let mut s = drink_mix(0.0);
        s.add_solute(1.0);
        assert_eq!(s.concentration(), 0.0);
        assert!(!s.is_saturated());
        assert_eq!(s.precipitate_amount(), 1.0);
    }

    #[test]
    fn draining_keeps_concentration() {
        let mut s = drink_mix(0.8);
        s.add_solute(1.2);
        let before = s.concentration();
        for x in [0.01, 0.1, 0.3] {
            s.remove_volume(x);
            assert_relative_eq!(s.concentration(), before, epsilon = 1e-12);
        }
    }

    #[test]
    fn draining_saturated_solution_keeps_precipitate() {
        let mut s = drink_mix(0.5);
        s.add_solute(4.0);
        let precipitate = s.precipitate_amount();
        s.remove_volume(0.2);
        assert_relative_eq!(s.precipitate_amount(), precipitate, epsilon = 1e-12);
        assert_relative_eq!(s.concentration(), 5.96, epsilon = 1e-12);
    }

    #[test]
    fn removing_more_than_present_saturates_at_zero() {
        let mut s = drink_mix(0.2);
        s.add_solute(0.5);
        assert_relative_eq!(s.remove_volume(1.0), 0.2);
        assert_eq!(s.volume(), 0.0);
        assert_abs_diff_eq!(s.solute_amount(), 0.0, epsilon = 1e-12);
        assert_eq!(s.evaporate(0.5), 0.0);
    }

    #[test]
    fn adding_volume_saturates_at_capacity() {
        let mut s = drink_mix(0.9);
        assert_relative_eq!(s.add_volume(0.5), 0.1, epsilon = 1e-12);
        assert!(s.is_full());
        assert_eq!(s.add_volume(-1.0), 0.0);
        assert_eq!(s.add_volume(f64::NAN), 0.0);
    }

    #[test]
    fn evaporation_keeps_solute_amount() {
        let mut s = drink_mix(0.5);
        s.add_solute(1.0);
        let mut last_precipitate = 0.0;
        while s.volume() > 0.1 + 1e-9 {
            s.evaporate(0.01);
            assert_relative_eq!(s.solute_amount(), 1.0);
            assert!(s.precipitate_amount() >= last_precipitate);
            last_precipitate = s.precipitate_amount();
        }
        assert!(s.precipitate_amount() > 0.0);
    }

    #[test]
    fn adding_volume_never_increases_precipitate() {
        let mut s = drink_mix(0.2);
        s.add_solute(3.0);
        let mut last = s.precipitate_amount();
        for _ in 0..20 {
            s.add_volume(0.05);
            assert!(s.precipitate_amount() <= last);
            last = s.precipitate_amount();
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn stock_solution_adds_proportional_solute() {
        let mut s = drink_mix(0.5);
        s.add_stock_solution(0.1, 5.5);
        assert_relative_eq!(s.volume(), 0.6);
        assert_relative_eq!(s.solute_amount(), 0.55);
    }

    #[test]
    fn switching_solute_discards_amount() {
        let mut s = drink_mix(0.5);
        s.add_solute(4.0);
        s.set_solute(SoluteId::CopperSulfate);
        assert_eq!(s.solute_amount(), 0.0);
        assert_eq!(s.precipitate_amount(), 0.0);
        assert_relative_eq!(s.volume(), 0.5);
    }
}
