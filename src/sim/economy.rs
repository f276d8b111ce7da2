//! Fuel and score bookkeeping
//!
//! Clamps are applied here, at the point of mutation, so no caller can push
//! the economy out of range.

use super::state::Economy;

/// Outcome of the per-step fuel drain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelStatus {
    Ok,
    /// Tank ran dry this step
    Exhausted,
}

impl Economy {
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract points, flooring at zero
    pub fn apply_penalty(&mut self, points: u64) {
        self.score = self.score.saturating_sub(points);
    }

    /// Add fuel up to `max_fuel`
    pub fn refuel(&mut self, amount: f32, max_fuel: f32) {
        self.fuel = (self.fuel + amount).clamp(0.0, max_fuel);
    }

    /// Burn fuel; reaching zero or below empties the tank
    pub fn drain(&mut self, amount: f32) -> FuelStatus {
        let fuel = self.fuel - amount;
        if fuel <= 0.0 {
            self.fuel = 0.0;
            FuelStatus::Exhausted
        } else {
            self.fuel = fuel;
            FuelStatus::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut economy = Economy::new_run(300.0);
        economy.score = 30;
        economy.apply_penalty(50);
        assert_eq!(economy.score, 0);
    }

    #[test]
    fn test_refuel_caps_at_max() {
        let mut economy = Economy::new_run(300.0);
        economy.fuel = 250.0;
        economy.refuel(40.0, 300.0);
        assert_eq!(economy.fuel, 290.0);
        economy.refuel(40.0, 300.0);
        assert_eq!(economy.fuel, 300.0);
    }

    #[test]
    fn test_drain_to_exactly_zero_is_exhaustion() {
        let mut economy = Economy::new_run(300.0);
        economy.fuel = 0.5;
        assert_eq!(economy.drain(0.5), FuelStatus::Exhausted);
        assert_eq!(economy.fuel, 0.0);
    }

    #[test]
    fn test_drain_keeps_positive_fuel() {
        let mut economy = Economy::new_run(300.0);
        assert_eq!(economy.drain(0.5), FuelStatus::Ok);
        assert_eq!(economy.fuel, 299.5);
    }
}
