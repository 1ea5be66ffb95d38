use glam::Vec2;
use pepse_core::energy::{Energy, EnergyConfig};
use pepse_core::input::{InputState, Key};
use pepse_core::{PositionTracker, Terrain, WorldConfig};

#[derive(Debug, Clone, Copy)]
pub struct AvatarConfig {
    pub walk_speed: f32,
    pub jump_speed: f32,
    /// Downward acceleration (screen y grows downward).
    pub gravity: f32,
    pub size: Vec2,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            walk_speed: 400.0,
            jump_speed: 650.0,
            gravity: 600.0,
            size: Vec2::new(30.0, 50.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub walked: bool,
    pub jumped: bool,
    pub rested: bool,
}

/// Kinematic stand-in for the host's physics body. It only knows the ground
/// surface; trunks and leaves do not block it.
#[derive(Debug, Clone)]
pub struct Avatar {
    pub top_left: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    pub energy: Energy,
    pub config: AvatarConfig,
}

impl Avatar {
    /// Stand on the ground in the middle of the first screen, snapped to the
    /// cell grid.
    pub fn spawn(world: &WorldConfig, terrain: &Terrain, energy: EnergyConfig) -> Self {
        let config = AvatarConfig::default();
        let x = ((world.window_width / 2.0) / world.cell_size).floor() * world.cell_size;
        let y = terrain.surface_y(x) - config.size.y;
        Self {
            top_left: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            grounded: true,
            energy: Energy::new(energy),
            config,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.top_left + self.config.size * 0.5
    }

    pub fn step(&mut self, input: &InputState, dt: f32, terrain: &Terrain) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        // Horizontal speed is reset every step; walking needs energy.
        self.velocity.x = 0.0;
        let direction = input.axis_x();
        if direction != 0.0 && self.energy.spend_walk(self.grounded) {
            self.velocity.x = direction * self.config.walk_speed;
            outcome.walked = true;
        }

        if input.is_held(Key::Jump) && self.grounded && self.energy.spend_jump() {
            self.velocity.y = -self.config.jump_speed;
            self.grounded = false;
            outcome.jumped = true;
        }

        if !input.any_held() && self.grounded && self.velocity == Vec2::ZERO {
            self.energy.rest();
            outcome.rested = true;
        }

        self.velocity.y += self.config.gravity * dt;
        self.top_left += self.velocity * dt;

        let surface = terrain.surface_y(self.center().x);
        let feet = self.top_left.y + self.config.size.y;
        if feet >= surface {
            self.top_left.y = surface - self.config.size.y;
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        outcome
    }
}

impl PositionTracker for Avatar {
    fn tracked_x(&self) -> f32 {
        self.top_left.x
    }
}
