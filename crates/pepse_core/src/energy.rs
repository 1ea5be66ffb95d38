//! Avatar energy bookkeeping.
//!
//! Walking and jumping cost energy, standing still regenerates it, and eaten
//! fruit tops it up. Energy never exceeds `max` nor drops below zero.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    pub max: f32,
    /// Cost per grounded walking step.
    pub walk_cost: f32,
    pub jump_cost: f32,
    /// Gain per idle step.
    pub idle_gain: f32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            walk_cost: 0.5,
            jump_cost: 10.0,
            idle_gain: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    current: f32,
    config: EnergyConfig,
}

impl Energy {
    pub fn new(config: EnergyConfig) -> Self {
        Self {
            current: config.max,
            config,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn can_walk(&self) -> bool {
        self.current >= self.config.walk_cost
    }

    pub fn can_jump(&self) -> bool {
        self.current >= self.config.jump_cost
    }

    /// Pay for one walking step. Airborne steps are free.
    pub fn spend_walk(&mut self, grounded: bool) -> bool {
        if !self.can_walk() {
            return false;
        }
        if grounded {
            self.current -= self.config.walk_cost;
        }
        true
    }

    pub fn spend_jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.current -= self.config.jump_cost;
        true
    }

    pub fn rest(&mut self) {
        self.gain(self.config.idle_gain);
    }

    pub fn gain(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.config.max);
    }
}

impl Default for Energy {
    fn default() -> Self {
        Self::new(EnergyConfig::default())
    }
}
