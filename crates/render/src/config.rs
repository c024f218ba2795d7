use std::path::Path;

use roadscape_common::{ConfigError, Viewport};
use roadscape_noise::FbmConfig;
use roadscape_terrain::TerrainConfig;
use serde::{Deserialize, Serialize};

use crate::surface::{Color, GradientStop};

/// Errors from reading a scene configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Perspective camera. The camera sits at the origin looking along -z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::parameter(
                "projection.fov_degrees",
                format!("{} must lie in (0, 180)", self.fov_degrees),
            ));
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(ConfigError::parameter("projection.near", "must be positive"));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(ConfigError::parameter("projection.far", "must exceed near"));
        }
        Ok(())
    }
}

/// Limits for the grid resolution derived from the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBounds {
    pub min_width: usize,
    pub min_height: usize,
    pub max_width: usize,
    pub max_height: usize,
    /// Viewport pixels per grid cell before clamping.
    pub cell_pixels: u32,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            min_width: 4,
            min_height: 32,
            max_width: 64,
            max_height: 64,
            cell_pixels: 16,
        }
    }
}

impl GridBounds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_width < 2 || self.min_height < 2 {
            return Err(ConfigError::parameter("grid.min", "grid needs at least 2x2 points"));
        }
        if self.max_width < self.min_width || self.max_height < self.min_height {
            return Err(ConfigError::parameter("grid.max", "must not be below grid.min"));
        }
        if self.cell_pixels == 0 {
            return Err(ConfigError::parameter("grid.cell_pixels", "must be positive"));
        }
        Ok(())
    }

    /// `(width, height)` in points: `viewport / cell_pixels`, clamped to the bounds.
    pub fn resolution(&self, viewport: Viewport) -> (usize, usize) {
        let width = (viewport.width() / self.cell_pixels) as usize;
        let height = (viewport.height() / self.cell_pixels) as usize;
        (
            width.clamp(self.min_width, self.max_width),
            height.clamp(self.min_height, self.max_height),
        )
    }
}

/// Colors for the sky and terrain passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub sky: Vec<GradientStop>,
    /// Fraction of the viewport height, from the top, covered by the sky.
    pub sky_coverage: f32,
    pub fill: Color,
    pub stroke: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: vec![
                GradientStop::new(0.0, Color::rgba(0x1c, 0x01, 0x4a, 0xdd)),
                GradientStop::new(0.5, Color::rgba(0xd4, 0x04, 0x85, 0xdd)),
                GradientStop::new(0.71, Color::rgba(0xfd, 0x95, 0x54, 0xee)),
                GradientStop::new(1.0, Color::rgba(0x00, 0x00, 0x00, 0xee)),
            ],
            sky_coverage: 0.75,
            fill: Color::rgba(0x03, 0x02, 0x0a, 0xfa),
            stroke: Color::rgb(0x80, 0x00, 0x80),
        }
    }
}

impl Palette {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sky_coverage) {
            return Err(ConfigError::parameter("palette.sky_coverage", "must lie in [0, 1]"));
        }
        let mut last = 0.0;
        for stop in &self.sky {
            if !(0.0..=1.0).contains(&stop.offset) || stop.offset < last {
                return Err(ConfigError::parameter(
                    "palette.sky",
                    "stop offsets must be ascending within [0, 1]",
                ));
            }
            last = stop.offset;
        }
        Ok(())
    }
}

/// Everything a renderer needs besides the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the terrain noise.
    pub seed: u32,
    pub fbm: FbmConfig,
    pub terrain: TerrainConfig,
    pub projection: ProjectionConfig,
    pub grid: GridBounds,
    pub palette: Palette,
    /// Depth past which rows fade out; must lie in `[0, 1)`.
    pub fade_threshold: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 66,
            fbm: FbmConfig::default(),
            terrain: TerrainConfig::default(),
            projection: ProjectionConfig::default(),
            grid: GridBounds::default(),
            palette: Palette::default(),
            fade_threshold: 0.8,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fbm.validate()?;
        self.terrain.validate()?;
        self.projection.validate()?;
        self.grid.validate()?;
        self.palette.validate()?;
        if !(0.0..1.0).contains(&self.fade_threshold) {
            return Err(ConfigError::parameter(
                "fade_threshold",
                format!("{} must lie in [0, 1)", self.fade_threshold),
            ));
        }
        Ok(())
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(ConfigLoadError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn resolution_clamps_to_bounds() {
        let bounds = GridBounds::default();
        let small = Viewport::new(64, 64).unwrap();
        assert_eq!(bounds.resolution(small), (4, 32));

        let mid = Viewport::new(640, 720).unwrap();
        assert_eq!(bounds.resolution(mid), (40, 45));

        let large = Viewport::new(3840, 2160).unwrap();
        assert_eq!(bounds.resolution(large), (64, 64));

        let tiny = Viewport::new(1, 1).unwrap();
        assert_eq!(bounds.resolution(tiny), (4, 32));
    }

    #[test]
    fn projection_rejects_bad_planes() {
        let far_before_near = ProjectionConfig {
            near: 10.0,
            far: 1.0,
            ..ProjectionConfig::default()
        };
        assert!(far_before_near.validate().is_err());

        let zero_near = ProjectionConfig {
            near: 0.0,
            ..ProjectionConfig::default()
        };
        assert!(zero_near.validate().is_err());

        let wide = ProjectionConfig {
            fov_degrees: 180.0,
            ..ProjectionConfig::default()
        };
        assert!(wide.validate().is_err());
    }

    #[test]
    fn fade_threshold_must_be_below_one() {
        let config = SceneConfig {
            fade_threshold: 1.0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "fade_threshold",
                ..
            })
        ));
    }

    #[test]
    fn grid_bounds_must_be_ordered() {
        let bounds = GridBounds {
            max_width: 2,
            ..GridBounds::default()
        };
        assert!(bounds.validate().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SceneConfig::from_yaml_str("seed: 7\nterrain:\n  speed: 0.04\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.terrain.speed, 0.04);
        assert_eq!(config.terrain.road_width, 0.03);
        assert_eq!(config.fbm, FbmConfig::default());
    }

    #[test]
    fn invalid_yaml_value_is_reported() {
        let err = SceneConfig::from_yaml_str("fbm:\n  octaves: 0\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }

    #[test]
    fn yaml_round_trips_defaults() {
        let yaml = SceneConfig::default().to_yaml().unwrap();
        let back = SceneConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, SceneConfig::default());
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("scene.json");
        std::fs::write(&json_path, r#"{"seed": 3, "fade_threshold": 0.5}"#).unwrap();
        let config = SceneConfig::load(&json_path).unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.fade_threshold, 0.5);

        let yaml_path = dir.path().join("scene.yml");
        std::fs::write(&yaml_path, "projection:\n  fov_degrees: 60\n").unwrap();
        let config = SceneConfig::load(&yaml_path).unwrap();
        assert_eq!(config.projection.fov_degrees, 60.0);

        let toml_path = dir.path().join("scene.toml");
        std::fs::write(&toml_path, "seed = 1").unwrap();
        assert!(matches!(
            SceneConfig::load(&toml_path),
            Err(ConfigLoadError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            SceneConfig::load(dir.path().join("missing.yaml")),
            Err(ConfigLoadError::Io(_))
        ));
    }
}
