//! Backend-neutral draw commands. Hosts translate these into whatever their
//! painter understands; geometry is already in surface pixels.

use std::f32::consts::TAU;

use glam::{Affine2, Vec2, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathEl {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo(Vec2, Vec2),
    CubicTo(Vec2, Vec2, Vec2),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub elements: Vec<PathEl>,
    pub closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.elements.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.elements.push(PathEl::LineTo(p));
        self
    }

    pub fn quad_to(mut self, c: Vec2, p: Vec2) -> Self {
        self.elements.push(PathEl::QuadTo(c, p));
        self
    }

    pub fn cubic_to(mut self, c1: Vec2, c2: Vec2, p: Vec2) -> Self {
        self.elements.push(PathEl::CubicTo(c1, c2, p));
        self
    }

    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn transformed(&self, transform: &Affine2) -> Self {
        let map = |p: Vec2| transform.transform_point2(p);
        Self {
            elements: self
                .elements
                .iter()
                .map(|el| match *el {
                    PathEl::MoveTo(p) => PathEl::MoveTo(map(p)),
                    PathEl::LineTo(p) => PathEl::LineTo(map(p)),
                    PathEl::QuadTo(c, p) => PathEl::QuadTo(map(c), map(p)),
                    PathEl::CubicTo(c1, c2, p) => PathEl::CubicTo(map(c1), map(c2), map(p)),
                })
                .collect(),
            closed: self.closed,
        }
    }

    /// Flattens curves into polylines, one per subpath. Each curve becomes
    /// `steps` line segments.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Vec2>> {
        let steps = steps.max(1);
        let mut subpaths: Vec<Vec<Vec2>> = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) => {
                    if current.len() > 1 {
                        subpaths.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathEl::LineTo(p) => current.push(p),
                PathEl::QuadTo(c, p) => {
                    let start = current.last().copied().unwrap_or(c);
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        let mt = 1.0 - t;
                        current.push(start * mt * mt + c * 2.0 * mt * t + p * t * t);
                    }
                }
                PathEl::CubicTo(c1, c2, p) => {
                    let start = current.last().copied().unwrap_or(c1);
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        let mt = 1.0 - t;
                        current.push(
                            start * mt * mt * mt
                                + c1 * 3.0 * mt * mt * t
                                + c2 * 3.0 * mt * t * t
                                + p * t * t * t,
                        );
                    }
                }
            }
        }
        if current.len() > 1 {
            subpaths.push(current);
        }
        subpaths
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
    },
    Rect {
        min: Vec2,
        size: Vec2,
    },
    Path(Path),
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Shape::Circle { center, radius }
    }

    /// Outline as polylines, suitable for backends without curve support.
    pub fn outline(&self, segments: usize) -> Vec<Vec<Vec2>> {
        let segments = segments.max(3);
        match self {
            Shape::Circle { center, radius } => {
                vec![ring(*center, Vec2::splat(*radius), 0.0, segments)]
            }
            Shape::Ellipse {
                center,
                radii,
                rotation,
            } => vec![ring(*center, *radii, *rotation, segments)],
            Shape::Rect { min, size } => vec![vec![
                *min,
                *min + Vec2::new(size.x, 0.0),
                *min + *size,
                *min + Vec2::new(0.0, size.y),
            ]],
            Shape::Path(path) => path.flatten(segments / 3),
        }
    }

    /// Approximate centre, used for glow placement.
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Circle { center, .. } | Shape::Ellipse { center, .. } => *center,
            Shape::Rect { min, size } => *min + *size * 0.5,
            Shape::Path(path) => {
                let points: Vec<Vec2> = path.flatten(4).into_iter().flatten().collect();
                if points.is_empty() {
                    Vec2::ZERO
                } else {
                    points.iter().copied().sum::<Vec2>() / points.len() as f32
                }
            }
        }
    }
}

fn ring(center: Vec2, radii: Vec2, rotation: f32, segments: usize) -> Vec<Vec2> {
    let rot = Vec2::from_angle(rotation);
    (0..segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * TAU;
            center + rot.rotate(Vec2::new(a.cos() * radii.x, a.sin() * radii.y))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Vec4,
}

pub fn stop(offset: f32, color: Vec4) -> ColorStop {
    ColorStop { offset, color }
}

/// Samples a stop list at `t`, clamping outside the first and last stop.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Vec4 {
    let Some(first) = stops.first() else {
        return Vec4::ZERO;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Vec4),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    /// Two-circle radial gradient, as in the HTML canvas.
    Radial {
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
        stops: Vec<ColorStop>,
    },
}

/// Canvas-style shadow: a soft halo of `color` spread over `blur` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub color: Vec4,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Blend {
    #[default]
    SourceOver,
    /// Additive.
    Lighter,
    Screen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Wipe the surface to transparent.
    Clear,
    Fill {
        shape: Shape,
        paint: Paint,
        glow: Option<Glow>,
        blend: Blend,
        alpha: f32,
    },
    Stroke {
        shape: Shape,
        color: Vec4,
        width: f32,
        glow: Option<Glow>,
    },
}

impl DrawCommand {
    pub fn fill(shape: Shape, paint: Paint) -> Self {
        DrawCommand::Fill {
            shape,
            paint,
            glow: None,
            blend: Blend::SourceOver,
            alpha: 1.0,
        }
    }

    pub fn solid(shape: Shape, color: Vec4) -> Self {
        Self::fill(shape, Paint::Solid(color))
    }

    pub fn stroke(shape: Shape, color: Vec4, width: f32) -> Self {
        DrawCommand::Stroke {
            shape,
            color,
            width,
            glow: None,
        }
    }

    /// Attaches a glow; a blur of zero removes it.
    pub fn glowing(mut self, color: Vec4, blur: f32) -> Self {
        let value = (blur > 0.0).then_some(Glow { color, blur });
        match &mut self {
            DrawCommand::Fill { glow, .. } | DrawCommand::Stroke { glow, .. } => *glow = value,
            DrawCommand::Clear => {}
        }
        self
    }

    pub fn blended(mut self, mode: Blend, opacity: f32) -> Self {
        if let DrawCommand::Fill { blend, alpha, .. } = &mut self {
            *blend = mode;
            *alpha = opacity;
        }
        self
    }
}
