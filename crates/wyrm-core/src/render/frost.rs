use std::f64::consts::FRAC_PI_2;

use glam::{Affine2, Vec2, Vec4};

use super::{draw_particles, Scene};
use crate::color::{self, rgba};
use crate::draw::{stop, DrawCommand, Paint, Path, Shape};

const ICE_GLOW: Vec4 = Vec4::new(0.0, 246.0 / 255.0, 1.0, 1.0);

pub(super) fn draw(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    background(scene, out);

    wing(scene.point(5) + Vec2::new(-10.0, 2.0), 78.0, false, scene.time, out);
    wing(scene.point(8) + Vec2::new(-22.0, 10.0), 66.0, true, scene.time, out);

    body(scene, out);
    head(scene, out);
    tail_flame(scene, out);
    draw_particles(scene, out);

    out.push(DrawCommand::solid(
        Shape::Rect {
            min: Vec2::ZERO,
            size: scene.size,
        },
        rgba(0, 0, 0, 0.045),
    ));
}

fn background(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::fill(
        Shape::Rect {
            min: Vec2::ZERO,
            size: scene.size,
        },
        Paint::Linear {
            from: Vec2::ZERO,
            to: Vec2::new(0.0, scene.size.y),
            stops: vec![stop(0.0, rgba(0, 40, 40, 0.06)), stop(1.0, rgba(0, 0, 0, 0.15))],
        },
    ));
}

/// Flap phase in `[0.05, 0.95]`; the right wing runs a quarter turn ahead.
pub(super) fn flap(time: f64, right: bool) -> f32 {
    let side = if right { 1.0 } else { 0.0 };
    ((time * 4.0 + side * FRAC_PI_2).sin() * 0.45 + 0.5) as f32
}

fn wing(root: Vec2, size: f32, right: bool, time: f64, out: &mut Vec<DrawCommand>) {
    let flap = flap(time, right);
    let tilt = (if right { 0.35 } else { -0.35 }) * (0.6 + flap * 0.6);
    let to_world = Affine2::from_angle_translation(tilt, root);
    let s = size;

    let membrane = Path::new()
        .move_to(Vec2::ZERO)
        .cubic_to(
            Vec2::new(s * 0.2, -s * 0.9 - flap * 6.0),
            Vec2::new(s * 0.9, -s * 0.55 - flap * 8.0),
            Vec2::new(s, 0.0),
        )
        .cubic_to(
            Vec2::new(s * 0.6, s * 0.55),
            Vec2::new(s * 0.16, s * 0.7),
            Vec2::ZERO,
        )
        .close();
    out.push(
        DrawCommand::solid(
            Shape::Path(membrane.transformed(&to_world)),
            rgba(0, 240, 255, 0.14 + flap * 0.18),
        )
        .glowing(ICE_GLOW, 28.0 * (0.7 + flap * 0.6)),
    );

    let mut veins = Path::new().move_to(Vec2::new(s * 0.12, -s * 0.05));
    for i in 0..5 {
        let i = i as f32;
        veins = veins.quad_to(
            Vec2::new(s * (0.2 + i * 0.14), -s * (0.08 + i * 0.12) - flap * 6.0),
            Vec2::new(s * (0.4 + i * 0.12), 0.0),
        );
    }
    out.push(DrawCommand::stroke(
        Shape::Path(veins.transformed(&to_world)),
        rgba(150, 255, 255, 0.08 + flap * 0.08),
        1.0,
    ));
}

fn body(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    let count = scene.points.len();
    for (i, point) in scene.points.iter().enumerate() {
        let p = point.pos;
        let fi = i as f32;
        let radius = (14.0 - fi * 0.36).max(2.6);
        let tone = scene.tone(i);
        let halo = match tone {
            super::Tone::Hsl {
                hue,
                saturation,
                lightness,
            } => color::hsla(hue, saturation, lightness.min(70.0), 0.9),
            super::Tone::Flat(c) => color::with_alpha(c, 0.9),
        };
        out.push(
            DrawCommand::fill(
                Shape::circle(p, radius),
                Paint::Radial {
                    inner_center: p - Vec2::splat(radius * 0.3),
                    inner_radius: radius * 0.1,
                    outer_center: p,
                    outer_radius: radius * 1.4,
                    stops: tone.sphere_stops(),
                },
            )
            .glowing(halo, (18.0 - fi * 0.4).max(6.0)),
        );

        if i % 2 == 0 {
            out.push(DrawCommand::solid(
                Shape::circle(p - Vec2::new(radius * 0.3, radius * 0.6), radius * 0.5),
                Vec4::new(1.0, 1.0, 1.0, 0.03 + (count - i) as f32 * 0.0015),
            ));
        }
    }
}

fn head(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    let to_world = scene.head_transform();
    let rotation = to_world.matrix2.x_axis.y.atan2(to_world.matrix2.x_axis.x);
    let place = |path: Path| Shape::Path(path.transformed(&to_world));
    let at = |local: Vec2| to_world.transform_point2(local);

    let snout = Path::new()
        .move_to(Vec2::new(0.0, -14.0))
        .line_to(Vec2::new(12.0, 6.0))
        .quad_to(Vec2::new(0.0, 18.0), Vec2::new(-12.0, 6.0))
        .close();
    out.push(
        DrawCommand::solid(place(snout), rgba(0, 255, 255, 0.95))
            .glowing(rgba(0, 246, 255, 0.9), 30.0),
    );

    let jaw = Path::new()
        .move_to(Vec2::new(-8.0, 6.0))
        .quad_to(Vec2::new(0.0, 12.0), Vec2::new(8.0, 6.0))
        .close();
    out.push(
        DrawCommand::solid(place(jaw), rgba(0, 180, 200, 0.95))
            .glowing(rgba(0, 246, 255, 0.9), 6.0),
    );

    for (radii, fill) in [
        (Vec2::new(3.2, 4.5), color::WHITE),
        (Vec2::new(1.2, 2.6), rgba(0, 0, 0x33, 1.0)),
    ] {
        for x in [-6.0, 6.0] {
            out.push(DrawCommand::solid(
                Shape::Ellipse {
                    center: at(Vec2::new(x, -2.0)),
                    radii,
                    rotation,
                },
                fill,
            ));
        }
    }

    for mirror in [-1.0, 1.0] {
        let horn = Path::new()
            .move_to(Vec2::new(10.0 * mirror, -14.0))
            .line_to(Vec2::new(18.0 * mirror, -34.0))
            .line_to(Vec2::new(6.0 * mirror, -18.0))
            .close();
        out.push(DrawCommand::solid(place(horn), color::WHITE).glowing(ICE_GLOW, 10.0));
    }
}

fn tail_flame(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    let tail = scene.tail();
    let f = 1.0 + (scene.time * 1000.0 / 120.0).sin() as f32 * 0.3;
    let flame = Path::new()
        .move_to(tail)
        .line_to(tail + Vec2::new(8.0, -18.0) * f)
        .line_to(tail + Vec2::new(4.0, -6.0) * f)
        .line_to(tail + Vec2::new(-6.0, -14.0) * f)
        .line_to(tail + Vec2::new(-10.0, -6.0) * f)
        .close();
    let fill = if scene.pressed {
        rgba(255, 120, 20, 0.95)
    } else {
        rgba(255, 140, 30, 0.78)
    };
    out.push(DrawCommand::solid(Shape::Path(flame), fill).glowing(rgba(255, 69, 0, 1.0), 22.0));
}
