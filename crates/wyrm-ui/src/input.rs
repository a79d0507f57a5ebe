use egui::{Event, PointerButton, Pos2, Rect, TouchPhase};
use glam::Vec2;
use wyrm_core::InputEvent;
use wyrm_platform::InputSource;

/// This frame's egui events, seen from the painter's rect.
pub struct EguiInput<'a> {
    events: &'a [Event],
    rect: Rect,
}

impl<'a> EguiInput<'a> {
    pub fn new(events: &'a [Event], rect: Rect) -> Self {
        Self { events, rect }
    }
}

impl InputSource for EguiInput<'_> {
    fn drain(&mut self, sink: &mut dyn FnMut(InputEvent)) {
        for event in self.events {
            if let Some(event) = translate(event, self.rect) {
                sink(event);
            }
        }
    }
}

fn local(pos: Pos2, rect: Rect) -> Option<Vec2> {
    let offset = pos - rect.min;
    Some(Vec2::new(offset.x, offset.y))
}

/// Maps one egui event to a surface-local input event. Only the primary
/// button counts as a press.
pub fn translate(event: &Event, rect: Rect) -> Option<InputEvent> {
    match event {
        Event::PointerMoved(pos) => Some(InputEvent::PointerMove(local(*pos, rect))),
        Event::PointerButton {
            button: PointerButton::Primary,
            pressed,
            ..
        } => Some(if *pressed {
            InputEvent::PointerDown
        } else {
            InputEvent::PointerUp
        }),
        Event::PointerGone => Some(InputEvent::PointerLeave),
        Event::Touch { phase, pos, .. } => Some(match phase {
            TouchPhase::Start => InputEvent::TouchStart(local(*pos, rect)),
            TouchPhase::Move => InputEvent::TouchMove(local(*pos, rect)),
            TouchPhase::End | TouchPhase::Cancel => InputEvent::TouchEnd,
        }),
        _ => None,
    }
}
