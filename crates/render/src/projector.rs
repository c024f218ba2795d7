use glam::{DMat4, DVec2, DVec3};
use roadscape_common::{ConfigError, Viewport};

use crate::config::ProjectionConfig;

/// World space to pixel space through a fixed perspective matrix.
///
/// The matrix follows OpenGL clip conventions (right-handed, depth in
/// `[-1, 1]`). Pixel coordinates map NDC -1..1 onto 0..width and 0..height
/// without flipping y.
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    matrix: DMat4,
    viewport: Viewport,
}

impl Projector {
    pub fn new(config: &ProjectionConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let matrix = DMat4::perspective_rh_gl(
            config.fov_degrees.to_radians(),
            viewport.aspect(),
            config.near,
            config.far,
        );
        Ok(Self { matrix, viewport })
    }

    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Transform and divide by w. A zero w is treated as 1.
    pub fn to_ndc(&self, world: DVec3) -> DVec3 {
        let clip = self.matrix * world.extend(1.0);
        let w = if clip.w == 0.0 { 1.0 } else { clip.w };
        clip.truncate() / w
    }

    pub fn ndc_to_pixel(&self, ndc: DVec3) -> DVec2 {
        DVec2::new(
            (1.0 + ndc.x) / 2.0 * self.viewport.width() as f64,
            (1.0 + ndc.y) / 2.0 * self.viewport.height() as f64,
        )
    }

    pub fn project(&self, world: DVec3) -> DVec2 {
        self.ndc_to_pixel(self.to_ndc(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector(width: u32, height: u32) -> Projector {
        Projector::new(
            &ProjectionConfig::default(),
            Viewport::new(width, height).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn axis_maps_to_viewport_centre() {
        let p = projector(640, 480);
        for z in [1.0, 10.0, 100.0] {
            let px = p.project(DVec3::new(0.0, 0.0, -z));
            assert!((px.x - 320.0).abs() < 1e-9);
            assert!((px.y - 240.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ndc_corners_map_to_pixel_corners() {
        let p = projector(200, 100);
        assert_eq!(p.ndc_to_pixel(DVec3::new(-1.0, -1.0, 0.0)), DVec2::new(0.0, 0.0));
        assert_eq!(p.ndc_to_pixel(DVec3::new(1.0, 1.0, 0.0)), DVec2::new(200.0, 100.0));
    }

    #[test]
    fn positive_z_terrain_lands_below_centre() {
        // terrain sits at positive z below the eye; the negative w flips it
        // into the lower half of a y-down surface
        let p = projector(640, 480);
        let near = p.project(DVec3::new(0.0, -5.0, 20.0));
        let far = p.project(DVec3::new(0.0, -5.0, 40.0));
        assert!(near.y > 240.0);
        assert!(far.y > 240.0);
        assert!(near.y > far.y);
    }

    #[test]
    fn larger_x_maps_left_behind_the_eye() {
        let p = projector(640, 480);
        let a = p.project(DVec3::new(0.0, -5.0, 20.0));
        let b = p.project(DVec3::new(1.0, -5.0, 20.0));
        assert!(b.x < a.x);
    }

    #[test]
    fn zero_w_stays_finite() {
        let p = projector(64, 64);
        let px = p.project(DVec3::new(1.0, 1.0, 0.0));
        assert!(px.x.is_finite() && px.y.is_finite());
    }

    #[test]
    fn aspect_comes_from_viewport() {
        let wide = projector(200, 100).matrix();
        let square = projector(100, 100).matrix();
        assert!((square.x_axis.x / wide.x_axis.x - 2.0).abs() < 1e-9);
        assert_eq!(wide.y_axis.y, square.y_axis.y);
    }

    #[test]
    fn invalid_projection_rejected() {
        let config = ProjectionConfig {
            far: 0.05,
            ..ProjectionConfig::default()
        };
        assert!(Projector::new(&config, Viewport::new(10, 10).unwrap()).is_err());
    }
}
