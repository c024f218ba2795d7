use glam::{DVec2, DVec3};
use roadscape_common::{ConfigError, Grid2D, Viewport};
use roadscape_noise::{Fbm, Noise2D, SimplexField, terrain_noise};
use roadscape_terrain::Terrain;

use crate::config::SceneConfig;
use crate::cull::{Quad, Visibility};
use crate::projector::Projector;
use crate::surface::{Rect, Surface};

/// Components per grid point: pixel x, pixel y, fog depth.
pub const COMPONENTS: usize = 3;

/// Row opacity for a fog depth: 1 up to `threshold`, then linear down to 0 at
/// depth 1. Clamped to `[0, 1]`.
pub fn fade_alpha(depth: f64, threshold: f64) -> f64 {
    let faded = (depth - threshold).max(0.0) * (1.0 / (1.0 - threshold));
    (1.0 - faded).clamp(0.0, 1.0)
}

/// Quad counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub quads_drawn: usize,
    pub culled_offscreen: usize,
    pub culled_backfacing: usize,
    pub culled_degenerate: usize,
}

impl FrameStats {
    pub fn culled(&self) -> usize {
        self.culled_offscreen + self.culled_backfacing + self.culled_degenerate
    }

    fn record(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Visible => self.quads_drawn += 1,
            Visibility::OffScreen => self.culled_offscreen += 1,
            Visibility::BackFacing => self.culled_backfacing += 1,
            Visibility::Degenerate => self.culled_degenerate += 1,
        }
    }
}

/// Renders the scrolling landscape one frame at a time.
///
/// Owns the point grid exclusively. Each frame overwrites every grid point
/// with its projected position, then walks the cells far row first so nearer
/// quads overdraw farther ones. Output depends only on the time passed in.
pub struct TerrainRenderer<N> {
    viewport: Viewport,
    config: SceneConfig,
    grid: Grid2D,
    projector: Projector,
    terrain: Terrain<N>,
}

impl TerrainRenderer<Fbm<SimplexField>> {
    /// Renderer over fbm simplex noise seeded from `config.seed`.
    pub fn with_seed(viewport: Viewport, config: &SceneConfig) -> Result<Self, ConfigError> {
        let noise = terrain_noise(config.seed, &config.fbm)?;
        Self::new(viewport, config, noise)
    }
}

impl<N: Noise2D> TerrainRenderer<N> {
    pub fn new(viewport: Viewport, config: &SceneConfig, noise: N) -> Result<Self, ConfigError> {
        config.validate()?;
        let (grid_width, grid_height) = config.grid.resolution(viewport);
        let grid = Grid2D::new(grid_width, grid_height, COMPONENTS)?;
        let projector = Projector::new(&config.projection, viewport)?;
        let terrain = Terrain::new(noise, &config.terrain)?;

        tracing::debug!(
            viewport_width = viewport.width(),
            viewport_height = viewport.height(),
            grid_width,
            grid_height,
            "terrain renderer created"
        );

        Ok(Self {
            viewport,
            config: config.clone(),
            grid,
            projector,
            terrain,
        })
    }

    /// Replace this renderer with one sized for `viewport`. Grid and
    /// projection are rebuilt; configuration and noise carry over.
    pub fn resized(self, viewport: Viewport) -> Result<Self, ConfigError> {
        let config = self.config;
        Self::new(viewport, &config, self.terrain.into_noise())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn terrain(&self) -> &Terrain<N> {
        &self.terrain
    }

    /// Sky, terrain update, terrain draw.
    pub fn render<S: Surface + ?Sized>(&mut self, t: f64, surface: &mut S) -> FrameStats {
        let _span = tracing::trace_span!("render_frame", t).entered();

        self.draw_sky(surface);
        self.update_terrain(t);
        let stats = self.draw_terrain(surface);

        tracing::trace!(
            drawn = stats.quads_drawn,
            offscreen = stats.culled_offscreen,
            backfacing = stats.culled_backfacing,
            degenerate = stats.culled_degenerate,
            "frame complete"
        );
        stats
    }

    pub fn sky_rect(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: self.viewport.width() as f32,
            height: self.viewport.height() as f32 * self.config.palette.sky_coverage,
        }
    }

    pub fn draw_sky<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_global_alpha(1.0);
        surface.fill_vertical_gradient(self.sky_rect(), &self.config.palette.sky);
    }

    /// Evaluate and project every grid point for time `t`.
    pub fn update_terrain(&mut self, t: f64) {
        let grid_width = self.grid.width() as f64;
        let grid_height = self.grid.height() as f64;
        let terrain = &self.terrain;
        let projector = &self.projector;

        self.grid.for_each_mut(|p, x, y, i| {
            let sample = terrain.sample(x as f64, y as f64, t, grid_width, grid_height);
            let pixel = projector.project(sample.world);
            p[i] = pixel.x as f32;
            p[i + 1] = pixel.y as f32;
            p[i + 2] = sample.depth as f32;
        });
    }

    /// Project a single world point with this renderer's camera.
    pub fn project(&self, world: DVec3) -> DVec2 {
        self.projector.project(world)
    }

    /// Opacity for grid row `y`, read from the depth stored at `(0, y)`.
    pub fn row_alpha(&self, y: usize) -> f64 {
        let depth = self.grid.point(0, y).map_or(1.0, |p| p[2] as f64);
        fade_alpha(depth, self.config.fade_threshold)
    }

    /// Draw every visible quad of the current grid, far row first.
    pub fn draw_terrain<S: Surface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        let mut stats = FrameStats::default();
        surface.set_stroke_color(self.config.palette.stroke);
        surface.set_fill_color(self.config.palette.fill);

        let rows = self.grid.height().saturating_sub(1);
        let cols = self.grid.width().saturating_sub(1);
        for y in 0..rows {
            surface.set_global_alpha(self.row_alpha(y) as f32);
            for x in 0..cols {
                let Some(quad) = Quad::from_grid(&self.grid, x, y) else {
                    continue;
                };
                let visibility = quad.visibility(self.viewport);
                stats.record(visibility);
                if visibility != Visibility::Visible {
                    continue;
                }

                // one closed path per quad
                let [v0, v1, v2, v3] = quad.vertices;
                surface.begin_path();
                surface.move_to(v0.x, v0.y);
                surface.line_to(v1.x, v1.y);
                surface.line_to(v2.x, v2.y);
                surface.line_to(v3.x, v3.y);
                surface.close_path();
                surface.fill();
                surface.stroke();
            }
        }
        stats
    }
}
