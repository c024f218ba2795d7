use std::f64::consts::TAU;

use glam::DVec3;
use roadscape_common::ConfigError;
use roadscape_noise::Noise2D;

use crate::config::TerrainConfig;

/// Whole rows scrolled by time `t` (milliseconds).
pub fn terrain_offset(t: f64, speed: f64) -> f64 {
    (t * speed).floor()
}

/// Progress towards the next whole-row step. Keeps the sign of `t * speed`.
pub fn scroll_fraction(t: f64, speed: f64) -> f64 {
    (t * speed) % 1.0
}

/// One evaluated grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    /// World-space point: x centred on the grid, y up, z receding.
    pub world: DVec3,
    /// Height above `base_height`.
    pub elevation: f64,
    /// Fog metric in `(0, 1]` for rows inside the grid; 1 at the far row.
    pub depth: f64,
}

/// Height function over a noise field.
#[derive(Debug, Clone)]
pub struct Terrain<N> {
    config: TerrainConfig,
    noise: N,
}

impl<N: Noise2D> Terrain<N> {
    pub fn new(noise: N, config: &TerrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            speed = config.speed,
            road_width = config.road_width,
            "terrain configured"
        );
        Ok(Self {
            config: config.clone(),
            noise,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn into_noise(self) -> N {
        self.noise
    }

    /// Non-negative envelope for how sharply the road bends at `phase`.
    pub fn road_twistyness(&self, phase: f64) -> f64 {
        self.config.twistyness_amplitude * (phase / self.config.twistyness_period).sin().max(0.0)
    }

    /// Lateral road displacement, in cells.
    pub fn road_winding(&self, phase: f64) -> f64 {
        (phase / self.config.corner_period).sin() * self.road_twistyness(phase)
    }

    /// Clamped cosine bowl: about `road_width` on the road band, up to 2 at the edges.
    pub fn road_profile(&self, x: f64, winding: f64, grid_width: f64) -> f64 {
        let bowl = -(((x + winding) / grid_width - 0.5) * TAU).cos();
        bowl.max(self.config.road_width - 1.0) + 1.0
    }

    /// Mountain prominence envelope in `[0, 1]`.
    pub fn hilliness(&self, phase: f64) -> f64 {
        (phase / self.config.hilliness_period).sin().abs()
    }

    pub fn mountains(&self, x: f64, phase: f64) -> f64 {
        let scale = self.config.noise_scale;
        let peak = self.noise.sample(x * scale, phase * scale);
        self.config.mountain_base + peak * self.config.mountain_height * self.hilliness(phase)
    }

    /// Elevation of cell `(x, y)` at time `t`.
    pub fn elevation(&self, x: f64, y: f64, t: f64, grid_width: f64) -> f64 {
        let phase = y - terrain_offset(t, self.config.speed);
        let road = self.road_profile(x, self.road_winding(phase), grid_width);
        road * self.mountains(x, phase)
    }

    pub fn sample(&self, x: f64, y: f64, t: f64, grid_width: f64, grid_height: f64) -> TerrainSample {
        let speed = self.config.speed;
        let offset = terrain_offset(t, speed);
        let elevation = self.elevation(x, y, t, grid_width);
        let world = DVec3::new(
            -grid_width / 2.0 + x,
            self.config.base_height + elevation,
            self.config.near_offset + (grid_height - y) - scroll_fraction(t, speed),
        );
        let depth = (grid_height - y + offset % 1.0) / grid_height;
        TerrainSample {
            world,
            elevation,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadscape_noise::{FbmConfig, SimplexField, terrain_noise};

    struct Constant(f64);

    impl Noise2D for Constant {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    fn flat(value: f64) -> Terrain<Constant> {
        Terrain::new(Constant(value), &TerrainConfig::default()).unwrap()
    }

    #[test]
    fn offset_and_fraction() {
        assert_eq!(terrain_offset(0.0, 0.02), 0.0);
        assert_eq!(terrain_offset(49.0, 0.02), 0.0);
        assert_eq!(terrain_offset(1000.0, 0.02), 20.0);
        assert!((scroll_fraction(25.0, 0.02) - 0.5).abs() < 1e-12);
        assert_eq!(scroll_fraction(1000.0, 0.02), 0.0);
    }

    #[test]
    fn road_band_is_flat_and_edges_are_high() {
        let terrain = flat(0.0);
        let gw = 32.0;
        // centre of the grid with no winding sits in the road band
        assert!((terrain.road_profile(16.0, 0.0, gw) - 0.03).abs() < 1e-12);
        // grid edge is the top of the bowl
        assert!((terrain.road_profile(0.0, 0.0, gw) - 2.0).abs() < 1e-12);
        // winding shifts the band
        assert!((terrain.road_profile(12.0, 4.0, gw) - 0.03).abs() < 1e-12);
    }

    #[test]
    fn twistyness_is_non_negative_and_periodic() {
        let terrain = flat(0.0);
        let period = TAU * terrain.config().twistyness_period;
        for i in 0..200 {
            let phase = i as f64 * 7.3 - 600.0;
            let v = terrain.road_twistyness(phase);
            assert!(v >= 0.0);
            assert!(v <= 6.0);
            assert!((v - terrain.road_twistyness(phase + period)).abs() < 1e-9);
        }
    }

    #[test]
    fn hilliness_in_unit_range() {
        let terrain = flat(0.0);
        for i in 0..200 {
            let h = terrain.hilliness(i as f64 * 3.1 - 300.0);
            assert!((0.0..=1.0).contains(&h));
        }
    }

    #[test]
    fn mountains_without_hills_are_base_height() {
        let terrain = flat(1.0);
        // phase 0 gives zero hilliness
        assert_eq!(terrain.mountains(5.0, 0.0), 2.0);
    }

    #[test]
    fn world_point_layout() {
        let terrain = flat(0.0);
        let s = terrain.sample(0.0, 0.0, 0.0, 4.0, 32.0);
        assert_eq!(s.world.x, -2.0);
        assert_eq!(s.world.z, 5.0 + 32.0);
        assert_eq!(s.depth, 1.0);
        // noise is zero so mountains are the base; x = 0 is the bowl rim
        assert!((s.elevation - 4.0).abs() < 1e-12);
        assert!((s.world.y - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn depth_per_row() {
        let terrain = flat(0.0);
        let gh = 32.0;
        for y in 0..32 {
            let s = terrain.sample(1.0, y as f64, 777.0, 4.0, gh);
            assert!((s.depth - (gh - y as f64) / gh).abs() < 1e-12);
        }
    }

    #[test]
    fn sampling_is_pure() {
        let terrain = Terrain::new(
            terrain_noise(66, &FbmConfig::default()).unwrap(),
            &TerrainConfig::default(),
        )
        .unwrap();
        for (x, y, t) in [(0.0, 0.0, 0.0), (3.0, 17.0, 12_345.0), (63.0, 63.0, 9.9e6)] {
            let a = terrain.sample(x, y, t, 64.0, 64.0);
            let b = terrain.sample(x, y, t, 64.0, 64.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn elevation_depends_on_phase_only() {
        let terrain = Terrain::new(SimplexField::new(5), &TerrainConfig::default()).unwrap();
        // 50 ms scrolls exactly one row at the default speed
        for y in 1..20 {
            let a = terrain.elevation(7.0, y as f64, 0.0, 32.0);
            let b = terrain.elevation(7.0, (y + 3) as f64, 150.0, 32.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn scroll_is_continuous_across_row_steps() {
        let terrain = Terrain::new(SimplexField::new(66), &TerrainConfig::default()).unwrap();
        let speed = terrain.config().speed;
        let t_step = 1000.0;
        let before = t_step - 1e-6;
        assert_eq!(terrain_offset(t_step, speed), 20.0);
        assert_eq!(terrain_offset(before, speed), 19.0);

        for y in 1..32 {
            for x in [0.0, 5.0, 11.0] {
                // after a step, row y shows what row y - 1 showed just before it
                let after = terrain.sample(x, y as f64, t_step, 16.0, 32.0);
                let prior = terrain.sample(x, (y - 1) as f64, before, 16.0, 32.0);
                assert_eq!(after.elevation, prior.elevation);
                assert!((after.world.z - prior.world.z).abs() < 1e-6);
                assert_eq!(after.world.y, prior.world.y);
            }
        }
    }

    #[test]
    fn z_moves_smoothly_within_a_step() {
        let terrain = flat(0.0);
        let mut last = terrain.sample(3.0, 10.0, 1000.0, 16.0, 32.0).world.z;
        for i in 1..50 {
            let z = terrain.sample(3.0, 10.0, 1000.0 + i as f64, 16.0, 32.0).world.z;
            assert!(z < last);
            assert!(last - z < 0.05);
            last = z;
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = TerrainConfig {
            hilliness_period: 0.0,
            ..TerrainConfig::default()
        };
        assert!(Terrain::new(Constant(0.0), &config).is_err());
    }
}
