//! One-shot animation-frame requests.
//!
//! Mirrors the host's `requestAnimationFrame`: a request fires on the next
//! frame only, so anything that wants to keep running re-requests itself
//! from inside its frame callback. Teardown cancels whatever is still
//! outstanding.

use std::collections::BTreeMap;

/// Handle for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(u64);

/// Work items the page schedules on the frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameTask {
    /// The loading gate's progress timeline.
    LoadingGate,
    /// The smooth scroll engine's interpolation step.
    SmoothScroll,
    /// Viewport polling plus reveal transition updates.
    Reveals,
}

#[derive(Debug)]
pub struct FrameScheduler<T> {
    pending: BTreeMap<FrameRequestId, T>,
    next_id: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `task` to run on the next frame.
    pub fn request(&mut self, task: T) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, task);
        id
    }

    /// Withdraw a request. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: FrameRequestId) -> Option<T> {
        self.pending.remove(&id)
    }

    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Remove and return every request due on this frame, in request order.
    pub fn take_due(&mut self) -> Vec<(FrameRequestId, T)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Number of requests that have not fired or been cancelled.
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
