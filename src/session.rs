//! Pointer capture for the stroke currently being drawn.
//!
//! ```text
//!            pointer down              up / leave, samples
//!   ┌──────┐ ───────────► ┌───────────┐ ──────────────────► Commit
//!   │ Idle │              │ Capturing │
//!   └──────┘ ◄─────────── └───────────┘ ──────────────────► Abandoned
//!                 ▲          │    ▲      up / leave, empty
//!                 │          └────┘
//!                 │       primary-button move
//! ```
//!
//! Both exits return the session to `Idle`.

use crate::error::TransitionError;
use crate::input::PointerEvent;
use crate::stroke::Sample;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Capturing {
        /// The pointer holding exclusive capture
        pointer_id: u64,
        /// Samples in arrival order
        samples: Vec<Sample>,
    },
}

/// How a capture ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// The samples should become a stroke
    Commit(Vec<Sample>),
    /// Nothing was captured, the drawing stays untouched
    Abandoned,
}

/// Tracks the in-progress capture of exactly one stroke
#[derive(Debug, Clone, Default)]
pub struct StrokeSession {
    state: SessionState,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, SessionState::Capturing { .. })
    }

    /// The pointer that owns the capture, if any
    pub fn captured_pointer(&self) -> Option<u64> {
        match &self.state {
            SessionState::Capturing { pointer_id, .. } => Some(*pointer_id),
            SessionState::Idle => None,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        match &self.state {
            SessionState::Capturing { samples, .. } => samples,
            SessionState::Idle => &[],
        }
    }

    /// Start capturing for the event's pointer. The down position is the
    /// first sample.
    ///
    /// A second down from the captured pointer (its up was lost) restarts
    /// the capture with a fresh buffer.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Result<(), TransitionError> {
        match self.captured_pointer() {
            Some(active) if active != event.pointer_id => {
                return Err(TransitionError::PointerBusy {
                    active,
                    requested: event.pointer_id,
                });
            }
            Some(_) => log::debug!("Restarting capture of pointer {}", event.pointer_id),
            None => log::debug!("Capturing pointer {}", event.pointer_id),
        }

        self.state = SessionState::Capturing {
            pointer_id: event.pointer_id,
            samples: vec![Sample::new(event.x, event.y, event.pressure)],
        };
        Ok(())
    }

    /// Append a sample for a primary-button drag of the captured pointer.
    /// Returns true if a sample was added.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        match &mut self.state {
            SessionState::Capturing { pointer_id, samples }
                if *pointer_id == event.pointer_id && event.is_primary_drag() =>
            {
                samples.push(Sample::new(event.x, event.y, event.pressure));
                true
            }
            _ => false,
        }
    }

    /// End the capture on pointer up or leave.
    ///
    /// Returns `None` when the event belongs to a pointer other than the
    /// captured one; the capture then continues.
    pub fn release(&mut self, pointer_id: u64) -> Option<SessionEnd> {
        if self.captured_pointer().is_some_and(|active| active != pointer_id) {
            return None;
        }

        match std::mem::take(&mut self.state) {
            SessionState::Capturing { samples, .. } if !samples.is_empty() => {
                log::debug!("Released pointer {pointer_id} with {} samples", samples.len());
                Some(SessionEnd::Commit(samples))
            }
            _ => Some(SessionEnd::Abandoned),
        }
    }
}
