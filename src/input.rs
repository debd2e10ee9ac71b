use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect, TouchPhase};

use crate::intent::Intent;

/// Pointer id reported for the mouse, kept clear of touch ids
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Pressure reported for devices that can't measure it
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// Button bits of [`PointerEvent::buttons`]
pub mod buttons {
    pub const PRIMARY: u32 = 1;
    pub const SECONDARY: u32 = 2;
    pub const MIDDLE: u32 = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The pointer left the canvas
    Leave,
}

/// One pointer observation delivered to the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
    pub pointer_id: u64,
    /// Currently held buttons, see [`buttons`]
    pub buttons: u32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, pos: Pos2, pressure: f32, pointer_id: u64, buttons: u32) -> Self {
        Self {
            kind,
            x: pos.x,
            y: pos.y,
            pressure,
            pointer_id,
            buttons,
        }
    }

    /// Only the primary button is held
    pub fn is_primary_drag(&self) -> bool {
        self.buttons == buttons::PRIMARY
    }
}

fn button_bit(button: PointerButton) -> u32 {
    match button {
        PointerButton::Primary => buttons::PRIMARY,
        PointerButton::Secondary => buttons::SECONDARY,
        PointerButton::Middle => buttons::MIDDLE,
        _ => 0,
    }
}

/// Map a shortcut to an undo/redo intent
pub fn shortcut_intent(key: Key, modifiers: Modifiers) -> Option<Intent> {
    if !modifiers.command {
        return None;
    }
    match key {
        Key::Z => Some(Intent::Undo),
        Key::Y => Some(Intent::Redo),
        _ => None,
    }
}

/// Handles converting raw egui input into canvas pointer events
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Mouse buttons held at this point of the event stream
    held: u32,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            held: 0,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Collect this frame's pointer events, in the order they happened
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            for event in &input.raw.events {
                let pressure = if self.held == 0 { 0.0 } else { DEFAULT_PRESSURE };
                match event {
                    // Integrations also emulate the mouse from touches. Whichever pointer
                    // arrives first owns the capture and the session ignores the other.
                    egui::Event::Touch { id, phase, pos, force, .. } => {
                        let kind = match phase {
                            TouchPhase::Start => PointerEventKind::Down,
                            TouchPhase::Move => PointerEventKind::Move,
                            TouchPhase::End | TouchPhase::Cancel => PointerEventKind::Up,
                        };
                        if kind == PointerEventKind::Down && !self.canvas_rect.contains(*pos) {
                            continue;
                        }
                        let touch_buttons = if kind == PointerEventKind::Up { 0 } else { buttons::PRIMARY };
                        events.push(PointerEvent::new(
                            kind,
                            *pos,
                            force.unwrap_or(DEFAULT_PRESSURE),
                            id.0,
                            touch_buttons,
                        ));
                    }
                    egui::Event::PointerMoved(pos) => {
                        if self.canvas_rect.contains(*pos) {
                            events.push(PointerEvent::new(
                                PointerEventKind::Move,
                                *pos,
                                pressure,
                                MOUSE_POINTER_ID,
                                self.held,
                            ));
                        } else if self.last_pointer_pos.is_some_and(|last| self.canvas_rect.contains(last)) {
                            events.push(PointerEvent::new(
                                PointerEventKind::Leave,
                                *pos,
                                pressure,
                                MOUSE_POINTER_ID,
                                self.held,
                            ));
                        }
                        self.last_pointer_pos = Some(*pos);
                    }
                    egui::Event::PointerButton { pos, button, pressed, .. } => {
                        if *pressed {
                            self.held |= button_bit(*button);
                        } else {
                            self.held &= !button_bit(*button);
                        }
                        if *button != PointerButton::Primary {
                            continue;
                        }
                        if *pressed && self.canvas_rect.contains(*pos) {
                            events.push(PointerEvent::new(
                                PointerEventKind::Down,
                                *pos,
                                DEFAULT_PRESSURE,
                                MOUSE_POINTER_ID,
                                self.held,
                            ));
                        } else if !*pressed {
                            events.push(PointerEvent::new(PointerEventKind::Up, *pos, 0.0, MOUSE_POINTER_ID, self.held));
                        }
                    }
                    egui::Event::PointerGone => {
                        if let Some(last) = self.last_pointer_pos.take() {
                            events.push(PointerEvent::new(PointerEventKind::Leave, last, 0.0, MOUSE_POINTER_ID, 0));
                        }
                    }
                    _ => {}
                }
            }
        });

        events
    }

    /// Collect this frame's keyboard shortcuts
    pub fn process_shortcuts(&self, ctx: &Context) -> Vec<Intent> {
        ctx.input(|input| {
            input
                .raw
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => shortcut_intent(*key, *modifiers),
                    _ => None,
                })
                .collect()
        })
    }
}
