use roadscape_common::Viewport;

use crate::surface::{Color, GradientStop, Rect, Surface};

/// Surface that renders into a standalone SVG document.
///
/// The page starts opaque black. Each `fill` and each `stroke` becomes its own
/// `<path>` so overdraw order matches call order.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    defs: String,
    body: String,
    path: String,
    fill: Color,
    stroke: Color,
    alpha: f32,
    gradients: usize,
}

impl SvgSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            defs: String::new(),
            body: String::new(),
            path: String::new(),
            fill: Color::rgb(0, 0, 0),
            stroke: Color::rgb(0, 0, 0),
            alpha: 1.0,
            gradients: 0,
        }
    }

    /// Number of elements emitted so far.
    pub fn element_count(&self) -> usize {
        self.body.lines().count()
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        ));
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"#000000\"/>\n",
            self.width, self.height
        ));
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn opacity(&self, color: Color) -> f32 {
        (color.opacity() * self.alpha).clamp(0.0, 1.0)
    }
}

impl Surface for SvgSurface {
    fn fill_vertical_gradient(&mut self, rect: Rect, stops: &[GradientStop]) {
        let id = format!("g{}", self.gradients);
        self.gradients += 1;

        self.defs.push_str(&format!(
            "<linearGradient id=\"{id}\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">\n"
        ));
        for stop in stops {
            self.defs.push_str(&format!(
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{:.4}\"/>\n",
                stop.offset,
                stop.color.hex(),
                stop.color.opacity()
            ));
        }
        self.defs.push_str("</linearGradient>\n");

        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"url(#{id})\" opacity=\"{:.4}\"/>\n",
            rect.x, rect.y, rect.width, rect.height, self.alpha
        ));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push_str(&format!("M{x:.2} {y:.2}"));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push_str(&format!("L{x:.2} {y:.2}"));
    }

    fn close_path(&mut self) {
        self.path.push('Z');
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\" fill-opacity=\"{:.4}\"/>\n",
            self.path,
            self.fill.hex(),
            self.opacity(self.fill)
        ));
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{:.4}\"/>\n",
            self.path,
            self.stroke.hex(),
            self.opacity(self.stroke)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SvgSurface {
        SvgSurface::new(Viewport::new(64, 48).unwrap())
    }

    #[test]
    fn empty_document_has_background() {
        let svg = surface().finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 64 48\""));
        assert!(svg.contains("fill=\"#000000\""));
        assert!(!svg.contains("<defs>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn fill_and_stroke_emit_paths() {
        let mut s = surface();
        s.set_fill_color(Color::rgba(3, 2, 10, 0xfa));
        s.set_stroke_color(Color::rgb(0x80, 0, 0x80));
        s.set_global_alpha(0.5);
        s.begin_path();
        s.move_to(1.0, 2.0);
        s.line_to(3.0, 4.0);
        s.close_path();
        s.fill();
        s.stroke();
        assert_eq!(s.element_count(), 2);

        let svg = s.finish();
        assert!(svg.contains("d=\"M1.00 2.00L3.00 4.00Z\""));
        assert!(svg.contains("fill=\"#03020a\""));
        assert!(svg.contains("stroke=\"#800080\" stroke-opacity=\"0.5000\""));
    }

    #[test]
    fn gradient_goes_into_defs() {
        let mut s = surface();
        let stops = [
            GradientStop::new(0.0, Color::rgb(255, 0, 0)),
            GradientStop::new(1.0, Color::rgb(0, 0, 255)),
        ];
        s.fill_vertical_gradient(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 64.0,
                height: 36.0,
            },
            &stops,
        );
        let svg = s.finish();
        assert!(svg.contains("<linearGradient id=\"g0\""));
        assert!(svg.contains("stop-color=\"#ff0000\""));
        assert!(svg.contains("fill=\"url(#g0)\""));
    }

    #[test]
    fn fill_without_path_is_noop() {
        let mut s = surface();
        s.begin_path();
        s.fill();
        s.stroke();
        assert_eq!(s.element_count(), 0);
    }
}
