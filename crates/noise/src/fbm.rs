use roadscape_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::field::Noise2D;

/// Octave parameters for [`Fbm`].
///
/// Each octave samples the same base noise with coordinates multiplied by
/// `frequency_decay` and weight multiplied by `amplitude_decay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmConfig {
    pub octaves: u32,
    /// Weight of the first octave.
    pub amplitude: f64,
    pub amplitude_decay: f64,
    pub frequency_decay: f64,
}

impl Default for FbmConfig {
    fn default() -> Self {
        Self {
            octaves: 2,
            amplitude: 0.5,
            amplitude_decay: 0.8,
            frequency_decay: 0.5,
        }
    }
}

impl FbmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::parameter("fbm.octaves", "must be at least 1"));
        }
        for (name, value) in [
            ("fbm.amplitude", self.amplitude),
            ("fbm.amplitude_decay", self.amplitude_decay),
            ("fbm.frequency_decay", self.frequency_decay),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::parameter(name, format!("{value} is not finite")));
            }
        }
        Ok(())
    }
}

/// Multi-octave sum over a base noise function.
#[derive(Debug, Clone)]
pub struct Fbm<N> {
    base: N,
    config: FbmConfig,
}

impl<N: Noise2D> Fbm<N> {
    pub fn new(base: N, config: &FbmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            base,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &FbmConfig {
        &self.config
    }
}

impl<N: Noise2D> Noise2D for Fbm<N> {
    fn sample(&self, mut x: f64, mut y: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = self.config.amplitude;
        for _ in 0..self.config.octaves {
            value += self.base.sample(x, y) * amplitude;
            x *= self.config.frequency_decay;
            y *= self.config.frequency_decay;
            amplitude *= self.config.amplitude_decay;
        }
        value
    }
}
