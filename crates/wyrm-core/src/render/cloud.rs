use glam::{Vec2, Vec4};

use super::Scene;
use crate::color::{self, rgba};
use crate::draw::{Blend, DrawCommand, Path, Shape};

const SKY: Vec4 = Vec4::new(0x23 as f32 / 255.0, 0xae as f32 / 255.0, 0xcd as f32 / 255.0, 1.0);
const GOLD: Vec4 = Vec4::new(0xf7 as f32 / 255.0, 0xdb as f32 / 255.0, 0x4e as f32 / 255.0, 1.0);
const ROSE: Vec4 = Vec4::new(0xee as f32 / 255.0, 0x34 as f32 / 255.0, 0x67 as f32 / 255.0, 1.0);

pub(super) fn draw(scene: &Scene<'_>, out: &mut Vec<DrawCommand>) {
    let head = scene.head();

    for i in 0..4 {
        let i = i as f32;
        let puff = head + Vec2::new(i.sin() * 34.0, (i * 2.0).cos() * 28.0 + 22.0);
        out.push(
            DrawCommand::solid(Shape::circle(puff, 18.0), color::WHITE)
                .glowing(SKY, 23.0)
                .blended(Blend::SourceOver, 0.4),
        );
    }

    // Body before head so the face stays visible.
    for i in (0..scene.points.len()).rev() {
        let fi = i as f32;
        out.push(
            DrawCommand::solid(
                Shape::circle(scene.points[i].pos, (13.0 - fi * 0.31).max(1.0)),
                scene.tone(i).base(1.0),
            )
            .glowing(rgba(0x18, 0x1c, 0x25, 1.0), 7.0 - fi * 0.2),
        );
    }

    out.push(
        DrawCommand::solid(Shape::circle(head, 22.0), rgba(0x41, 0x57, 0xa3, 1.0))
            .glowing(GOLD, 32.0),
    );
    for dx in [-8.0, 8.0] {
        out.push(DrawCommand::solid(
            Shape::circle(head + Vec2::new(dx, -5.0), 3.1),
            color::WHITE,
        ));
    }

    let horns = Path::new()
        .move_to(head + Vec2::new(-13.0, -30.0))
        .quad_to(head + Vec2::new(-21.0, -40.0), head + Vec2::new(0.0, -44.0))
        .quad_to(head + Vec2::new(21.0, -40.0), head + Vec2::new(13.0, -30.0));
    out.push(DrawCommand::stroke(Shape::Path(horns), GOLD, 4.0));

    let whiskers = Path::new()
        .move_to(head + Vec2::new(-18.0, 4.0))
        .cubic_to(
            head + Vec2::new(-23.0, 18.0),
            head + Vec2::new(-32.0, 20.0),
            head + Vec2::new(-10.0, 30.0),
        )
        .move_to(head + Vec2::new(18.0, 4.0))
        .cubic_to(
            head + Vec2::new(23.0, 18.0),
            head + Vec2::new(32.0, 20.0),
            head + Vec2::new(10.0, 30.0),
        );
    out.push(DrawCommand::stroke(
        Shape::Path(whiskers),
        rgba(0xc5, 0x86, 0xe7, 1.0),
        2.0,
    ));

    let tail = scene.tail();
    let curl = Path::new().move_to(tail).cubic_to(
        tail + Vec2::new(14.0, 14.0),
        tail + Vec2::new(-14.0, 34.0),
        tail + Vec2::new(0.0, 42.0),
    );
    out.push(DrawCommand::stroke(Shape::Path(curl), ROSE, 5.0));
    out.push(
        DrawCommand::solid(Shape::circle(tail + Vec2::new(0.0, 45.0), 10.0), GOLD)
            .glowing(ROSE, 16.0),
    );
}
