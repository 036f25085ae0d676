//! Two-phase marker layer: attach a drawing target, then update from state.
//!
//! Both calls are independent and idempotent. Updating before a sink is
//! attached only records the latest set; attaching later draws it.

use super::layout::{plan_markers, MarkerSet};
use crate::models::{AssignmentResult, GeoPoint, TechnicianLoad};

/// A map surface that can draw a complete marker set.
///
/// The sink always receives the full set and must replace whatever it
/// drew before.
pub trait MarkerSink {
    fn replace_markers(&mut self, markers: &MarkerSet);
}

/// Owns the current marker set and forwards it to an attached sink.
pub struct MarkerLayer<S: MarkerSink> {
    sink: Option<S>,
    current: MarkerSet,
    placeholder_limit: usize,
}

impl<S: MarkerSink> MarkerLayer<S> {
    /// Creates a detached layer.
    pub fn new(placeholder_limit: usize) -> Self {
        Self {
            sink: None,
            current: MarkerSet::default(),
            placeholder_limit,
        }
    }

    /// Attaches (or replaces) the drawing target and draws the current set.
    pub fn attach(&mut self, mut sink: S) {
        sink.replace_markers(&self.current);
        self.sink = Some(sink);
    }

    /// Detaches and returns the drawing target.
    pub fn detach(&mut self) -> Option<S> {
        self.sink.take()
    }

    /// Whether a sink is attached.
    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// Recomputes markers from the given state and redraws if changed.
    ///
    /// Returns the current set.
    pub fn update(
        &mut self,
        target: Option<GeoPoint>,
        result: Option<&AssignmentResult>,
        load: &[TechnicianLoad],
    ) -> &MarkerSet {
        let next = plan_markers(target, result, load, self.placeholder_limit);
        if next != self.current {
            self.current = next;
            if let Some(sink) = self.sink.as_mut() {
                sink.replace_markers(&self.current);
            }
        }
        &self.current
    }

    /// The last computed set.
    pub fn current(&self) -> &MarkerSet {
        &self.current
    }
}
