use glam::Vec2;

use super::Scene;
use crate::color;
use crate::draw::{DrawCommand, Shape};

const HEAD_RADIUS: f32 = 15.0;

pub(super) fn draw(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    // tail first so the head ends up on top
    for (i, point) in scene.points.iter().enumerate().rev() {
        let fi = i as f32;
        let tone = scene.tone(i);
        out.push(
            DrawCommand::solid(Shape::circle(point.pos, segment_radius(i)), tone.base(0.9))
                .glowing(tone.base(0.8), (20.0 - fi * 0.6).max(4.0)),
        );
    }

    let ember = scene.tone(scene.points.len() - 1);
    let pulse = 4.0 + (scene.time * 6.0).sin() as f32;
    out.push(
        DrawCommand::solid(Shape::circle(scene.tail(), pulse), ember.base(0.85))
            .glowing(ember.base(1.0), 14.0),
    );

    let head = scene.tone(0);
    out.push(
        DrawCommand::solid(Shape::circle(scene.head(), HEAD_RADIUS), head.base(0.95))
            .glowing(head.base(1.0), 26.0),
    );
    let to_world = scene.head_transform();
    for x in [-5.0, 5.0] {
        out.push(DrawCommand::solid(
            Shape::circle(to_world.transform_point2(Vec2::new(x, 4.0)), 2.4),
            color::WHITE,
        ));
    }
}

fn segment_radius(index: usize) -> f32 {
    (12.0 - index as f32 * 0.35).max(3.0)
}
