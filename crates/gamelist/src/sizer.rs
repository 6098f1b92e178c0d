//! Viewport measurement.
//!
//! [`ViewportSizer`] remembers the last content-box size reported for the
//! scroll container and tells observers when it changes. It does no layout of
//! its own: the host measures the container (on mount, window resize, reflow,
//! panel toggles) and feeds every measurement in through
//! [`observe`](ViewportSizer::observe).

use gamelist_core::logging::targets;
use gamelist_core::{Signal, Size};

/// Tracks the scroll container's content-box size.
#[derive(Debug, Default)]
pub struct ViewportSizer {
    last: Option<Size>,
    /// Emitted with the new size whenever a measurement differs from the last.
    pub size_changed: Signal<Size>,
}

impl ViewportSizer {
    /// Create a sizer with no known size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement. Returns `true` if it differs from the last one.
    pub fn observe(&mut self, size: Size) -> bool {
        if self.last == Some(size) {
            return false;
        }
        tracing::debug!(target: targets::SIZER, width = size.width, height = size.height, "viewport resized");
        self.last = Some(size);
        self.size_changed.emit(size);
        true
    }

    /// The last measured size, if it has a non-zero area.
    ///
    /// `None` means the container has not been laid out yet and windowed
    /// rendering must wait.
    pub fn size(&self) -> Option<Size> {
        self.last.filter(|size| !size.is_empty())
    }

    /// Forget the last measurement.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
