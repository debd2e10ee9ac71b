use crate::stroke::Stroke;

/// Committed strokes plus the strokes that can be redone.
///
/// Linear undo: committing a new stroke discards everything in the redo
/// buffer, history never branches.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    /// Strokes in draw order, later entries paint over earlier ones
    committed: Vec<Stroke>,
    /// Undone strokes, the last one was undone most recently
    redo_buffer: Vec<Stroke>,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke and invalidate the redo buffer
    pub fn commit(&mut self, stroke: Stroke) {
        log::debug!("Committing stroke {}", stroke.id());
        self.committed.push(stroke);
        self.redo_buffer.clear();
    }

    /// Move the top-most stroke to the redo buffer. Returns false when there
    /// was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                log::debug!("Undo stroke {}", stroke.id());
                self.redo_buffer.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone stroke on top of the drawing.
    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_buffer.pop() {
            Some(stroke) => {
                log::debug!("Redo stroke {}", stroke.id());
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo_buffer
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Returns true if there are strokes that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
