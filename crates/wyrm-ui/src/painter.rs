use egui::{Color32, Mesh, Painter, Pos2, Stroke};
use glam::{Vec2, Vec4};
use wyrm_core::draw::{sample_stops, Glow, Paint, Shape};
use wyrm_core::DrawCommand;
use wyrm_platform::{Canvas, Result, SurfaceSize};

const OUTLINE_SEGMENTS: usize = 36;
const GRADIENT_RINGS: usize = 5;
const GLOW_LAYERS: usize = 4;
const BACKDROP: Color32 = Color32::from_rgb(8, 11, 18);

/// Executes draw commands with an egui painter. egui composites source-over
/// only, so additive and screen blends fall back to plain alpha, and glows
/// are stacked translucent halos rather than a real blur.
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
    size: SurfaceSize,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, size: SurfaceSize) -> Self {
        Self {
            painter,
            origin,
            size,
        }
    }

    fn pos(&self, p: Vec2) -> Pos2 {
        Pos2::new(self.origin.x + p.x, self.origin.y + p.y)
    }

    fn fill(&self, shape: &Shape, paint: &Paint, glow: Option<&Glow>, alpha: f32) {
        if let Some(glow) = glow {
            self.halo(shape, glow, alpha);
        }
        match (shape, paint) {
            (Shape::Circle { center, radius }, Paint::Solid(color)) => {
                self.painter
                    .circle_filled(self.pos(*center), *radius, color32(*color, alpha));
            }
            (Shape::Rect { min, size }, Paint::Solid(color)) => {
                let rect = egui::Rect::from_min_size(self.pos(*min), egui::vec2(size.x, size.y));
                self.painter.rect_filled(rect, 0.0, color32(*color, alpha));
            }
            _ => {
                let center = shape.center();
                for poly in shape.outline(OUTLINE_SEGMENTS) {
                    self.fan(&poly, center, |p| color32(paint_at(paint, p), alpha));
                }
            }
        }
    }

    fn halo(&self, shape: &Shape, glow: &Glow, alpha: f32) {
        let center = shape.center();
        for poly in shape.outline(OUTLINE_SEGMENTS) {
            for layer in (1..=GLOW_LAYERS).rev() {
                let grow = glow.blur * layer as f32 / GLOW_LAYERS as f32 * 0.6;
                let fade = 0.35 / layer as f32;
                let grown: Vec<Vec2> = poly.iter().map(|&p| push_out(p, center, grow)).collect();
                let color = color32(glow.color, glow.color.w * fade * alpha);
                self.fan(&grown, center, |_| color);
            }
        }
    }

    /// Fills a polygon as a fan of concentric rings around `center`, so
    /// per-vertex colours can approximate gradients.
    fn fan(&self, poly: &[Vec2], center: Vec2, color_at: impl Fn(Vec2) -> Color32) {
        if poly.len() < 3 {
            return;
        }
        let mut mesh = Mesh::default();
        mesh.colored_vertex(self.pos(center), color_at(center));
        let n = poly.len() as u32;
        for ring in 1..=GRADIENT_RINGS {
            let t = ring as f32 / GRADIENT_RINGS as f32;
            for &p in poly {
                let v = center.lerp(p, t);
                mesh.colored_vertex(self.pos(v), color_at(v));
            }
        }
        let at = |ring: u32, i: u32| 1 + (ring - 1) * n + i % n;
        for i in 0..n {
            mesh.add_triangle(0, at(1, i), at(1, i + 1));
            for ring in 2..=GRADIENT_RINGS as u32 {
                let (a, b) = (at(ring - 1, i), at(ring - 1, i + 1));
                let (c, d) = (at(ring, i), at(ring, i + 1));
                mesh.add_triangle(a, c, d);
                mesh.add_triangle(a, d, b);
            }
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }

    fn stroke(&self, shape: &Shape, color: Vec4, width: f32, glow: Option<&Glow>) {
        let closed = match shape {
            Shape::Path(path) => path.closed,
            _ => true,
        };
        for poly in shape.outline(OUTLINE_SEGMENTS) {
            let points: Vec<Pos2> = poly.iter().map(|&p| self.pos(p)).collect();
            if let Some(glow) = glow {
                let halo = Stroke::new(width + glow.blur * 0.5, color32(glow.color, glow.color.w * 0.25));
                self.polyline(points.clone(), halo, closed);
            }
            self.polyline(points, Stroke::new(width, color32(color, 1.0)), closed);
        }
    }

    fn polyline(&self, points: Vec<Pos2>, stroke: Stroke, closed: bool) {
        let shape = if closed {
            egui::Shape::closed_line(points, stroke)
        } else {
            egui::Shape::line(points, stroke)
        };
        self.painter.add(shape);
    }
}

impl Canvas for PainterCanvas<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        match command {
            DrawCommand::Clear => {
                let rect = egui::Rect::from_min_size(
                    self.origin,
                    egui::vec2(self.size.width, self.size.height),
                );
                self.painter.rect_filled(rect, 0.0, BACKDROP);
            }
            DrawCommand::Fill {
                shape,
                paint,
                glow,
                alpha,
                ..
            } => self.fill(shape, paint, glow.as_ref(), *alpha),
            DrawCommand::Stroke {
                shape,
                color,
                width,
                glow,
            } => self.stroke(shape, *color, *width, glow.as_ref()),
        }
        Ok(())
    }
}

fn push_out(p: Vec2, center: Vec2, grow: f32) -> Vec2 {
    let offset = p - center;
    let len = offset.length();
    if len <= f32::EPSILON {
        return p;
    }
    center + offset * ((len + grow) / len)
}

/// Colour of `paint` at surface point `p`.
fn paint_at(paint: &Paint, p: Vec2) -> Vec4 {
    match paint {
        Paint::Solid(color) => *color,
        Paint::Linear { from, to, stops } => {
            let axis = *to - *from;
            let t = (p - *from).dot(axis) / axis.length_squared().max(f32::EPSILON);
            sample_stops(stops, t)
        }
        Paint::Radial {
            inner_center,
            inner_radius,
            outer_center,
            outer_radius,
            stops,
        } => {
            // Blend the two centres so an offset highlight still reads.
            let d_inner = p.distance(*inner_center) - inner_radius;
            let d_outer = p.distance(*outer_center);
            let span = (outer_radius - inner_radius).max(f32::EPSILON);
            let t = (d_inner.max(0.0) / span).min(d_outer / outer_radius.max(f32::EPSILON));
            sample_stops(stops, t.max(0.0))
        }
    }
}

fn color32(color: Vec4, alpha: f32) -> Color32 {
    let c = (color * Vec4::new(1.0, 1.0, 1.0, alpha)).clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    Color32::from_rgba_unmultiplied(c.x as u8, c.y as u8, c.z as u8, c.w as u8)
}
