use roadscape_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Shape constants for the road and mountains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Rows scrolled per millisecond.
    pub speed: f64,
    /// Half-width of the flat road band, as a fraction of the cosine bowl.
    pub road_width: f64,
    /// Peak lateral swing of the road, in cells.
    pub twistyness_amplitude: f64,
    pub twistyness_period: f64,
    /// Period of individual bends.
    pub corner_period: f64,
    pub hilliness_period: f64,
    /// Scale applied to cell coordinates before sampling noise.
    pub noise_scale: f64,
    pub mountain_base: f64,
    pub mountain_height: f64,
    /// World y of zero elevation.
    pub base_height: f64,
    /// World z of the nearest row.
    pub near_offset: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            speed: 0.02,
            road_width: 0.03,
            twistyness_amplitude: 6.0,
            twistyness_period: 210.0,
            corner_period: 10.0,
            hilliness_period: 220.0,
            noise_scale: 0.15,
            mountain_base: 2.0,
            mountain_height: 5.0,
            base_height: -5.0,
            near_offset: 5.0,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("terrain.speed", self.speed),
            ("terrain.twistyness_period", self.twistyness_period),
            ("terrain.corner_period", self.corner_period),
            ("terrain.hilliness_period", self.hilliness_period),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::parameter(name, format!("{value} must be positive")));
            }
        }
        for (name, value) in [
            ("terrain.road_width", self.road_width),
            ("terrain.twistyness_amplitude", self.twistyness_amplitude),
            ("terrain.noise_scale", self.noise_scale),
            ("terrain.mountain_base", self.mountain_base),
            ("terrain.mountain_height", self.mountain_height),
            ("terrain.base_height", self.base_height),
            ("terrain.near_offset", self.near_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::parameter(name, format!("{value} is not finite")));
            }
        }
        Ok(())
    }
}
