//! Seeded 1-D height field.
//!
//! `height_at(x)` maps any world x (not only grid points) to the screen-space
//! y of the ground surface. Screen space grows downward, so a larger value is
//! lower ground. The field is smooth Perlin noise around the baseline
//! `H0 = window_height * 2/3`.

use noise::{NoiseFn, Perlin};

use crate::config::WorldConfig;

/// Second noise coordinate. Perlin is zero on integer lattice lines, so the
/// 1-D slice is taken between them.
const SAMPLE_ROW: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct HeightField {
    seed: i64,
    baseline: f32,
    amplitude: f32,
    frequency: f64,
    octaves: u32,
    noise: Perlin,
}

impl HeightField {
    pub fn new(seed: i64, config: &WorldConfig) -> Self {
        Self::with_params(
            seed,
            config.baseline_height(),
            config.noise_amplitude,
            config.noise_frequency as f64,
            config.noise_octaves,
        )
    }

    pub fn with_params(seed: i64, baseline: f32, amplitude: f32, frequency: f64, octaves: u32) -> Self {
        Self {
            seed,
            baseline,
            amplitude,
            frequency,
            octaves: octaves.max(1),
            noise: Perlin::new(fold_seed(seed)),
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Ground-surface y at world x. Pure: same field, same x, same answer.
    pub fn height_at(&self, x: f32) -> f32 {
        if self.amplitude == 0.0 {
            return self.baseline;
        }

        let mut sum = 0.0;
        let mut frequency = self.frequency;
        let mut weight = 1.0;
        for _ in 0..self.octaves {
            sum += self.noise.get([x as f64 * frequency, SAMPLE_ROW]) * weight;
            frequency *= 2.0;
            weight *= 0.5;
        }
        self.baseline + self.amplitude * sum as f32
    }
}

fn fold_seed(seed: i64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
