use ratatui::prelude::Rect;

/// Seek bar over `0..=max`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slider {
    max: usize,
    progress: usize,
}

impl Slider {
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn set_max(&mut self, max: usize) {
        self.max = max;
        self.progress = self.progress.min(max);
    }

    pub fn set_progress(&mut self, progress: usize) {
        self.progress = progress.min(self.max);
    }

    /// User move to `value` (clamped). Returns the new progress if it changed.
    pub fn drag_to(&mut self, value: usize) -> Option<usize> {
        let value = value.min(self.max);
        if value == self.progress {
            return None;
        }
        self.progress = value;
        Some(value)
    }

    /// Slider value under `column` for a track drawn in `track`.
    pub fn value_at(&self, track: Rect, column: u16) -> usize {
        if track.width <= 1 || self.max == 0 {
            return 0;
        }
        let span = usize::from(track.width - 1);
        let offset = usize::from(column.saturating_sub(track.x)).min(span);
        (offset * self.max + span / 2) / span
    }

    /// Column of the knob inside `track`.
    pub fn knob_offset(&self, track_width: u16) -> u16 {
        if track_width <= 1 || self.max == 0 {
            return 0;
        }
        let span = usize::from(track_width - 1);
        ((self.progress * span + self.max / 2) / self.max) as u16
    }
}
