use std::collections::VecDeque;
use std::sync::Arc;

use containers::{BlockRange, Height};
use parking_lot::Mutex;

use crate::consumers::{CompletionAwareBlockRangeConsumer, CompletionStatus, ElementId};

/// Bookkeeping for one range handed downstream and not yet completed.
#[derive(Clone, Copy, Debug)]
struct ElementInfo {
    id: ElementId,
    end_height: Height,
    num_bytes: u64,
}

#[derive(Default)]
struct State {
    elements: VecDeque<ElementInfo>,
    num_bytes: u64,
    has_pending_sync: bool,
    dirty: bool,
}

impl State {
    fn has_pending_operation(&self) -> bool {
        self.num_bytes != 0 || self.has_pending_sync
    }
}

/// Tracks block ranges handed to the downstream pipeline but not yet
/// processed, and gates whether a new sync round may start.
///
/// Shared between the synchronizer and the pipeline's completion callbacks,
/// which may run on unrelated threads. Each handed-off callback holds a
/// strong reference, so completions arriving after the owning synchronizer
/// is dropped remain safe.
pub struct UnprocessedElements {
    consumer: Arc<dyn CompletionAwareBlockRangeConsumer>,
    max_bytes: u64,
    state: Mutex<State>,
}

impl UnprocessedElements {
    pub fn new(
        consumer: Arc<dyn CompletionAwareBlockRangeConsumer>,
        max_bytes: u64,
    ) -> Arc<UnprocessedElements> {
        Arc::new(UnprocessedElements {
            consumer,
            max_bytes,
            state: Mutex::new(State::default()),
        })
    }

    /// True when no handed-off bytes are awaiting completion.
    pub fn is_empty(&self) -> bool {
        0 == self.num_bytes()
    }

    /// Bytes handed downstream and not yet completed.
    pub fn num_bytes(&self) -> u64 {
        self.state.lock().num_bytes
    }

    /// End height of the most recently handed-off range, `Height(0)` if none.
    pub fn max_height(&self) -> Height {
        let state = self.state.lock();
        state
            .elements
            .back()
            .map_or(Height(0), |info| info.end_height)
    }

    /// Atomically claim the right to run a sync round.
    ///
    /// Claims only when the pipeline is below its byte cap, no other round
    /// is in flight, and no abnormal completion is draining. Otherwise
    /// returns false and leaves the state unchanged.
    pub fn should_start_sync(&self) -> bool {
        let mut state = self.state.lock();
        if state.num_bytes >= self.max_bytes || state.has_pending_sync || state.dirty {
            return false;
        }

        state.has_pending_sync = true;
        true
    }

    /// Hand a pulled range to the downstream consumer.
    ///
    /// Returns false without side effects while the subsystem drains after
    /// an abnormal completion. Admission is not re-checked against the byte
    /// cap here: a range admitted by [`should_start_sync`] is added in full
    /// even when it straddles the boundary.
    ///
    /// [`should_start_sync`]: UnprocessedElements::should_start_sync
    pub fn add(self: &Arc<Self>, range: BlockRange) -> bool {
        let mut state = self.state.lock();
        if state.dirty {
            return false;
        }

        let end_height = range.last().expect("handed-off ranges are never empty").height;
        let num_bytes = range.total_size();

        // The callback holds a strong reference because the dispatcher can
        // finish processing an element after the owning synchronizer is gone.
        let subsystem = Arc::clone(self);
        let id = self.consumer.push(
            range,
            Box::new(move |id, status| subsystem.remove(id, status)),
        );

        state.num_bytes += num_bytes;
        state.elements.push_back(ElementInfo {
            id,
            end_height,
            num_bytes,
        });
        true
    }

    /// Completion callback for the downstream pipeline.
    ///
    /// # Panics
    ///
    /// Panics when `id` does not match the oldest in-flight element; the
    /// pipeline has violated its FIFO completion contract.
    pub fn remove(&self, id: ElementId, status: CompletionStatus) {
        let mut state = self.state.lock();
        let info = match state.elements.front() {
            Some(info) => *info,
            None => panic!("unexpected element id {id} (no elements in flight)"),
        };
        if info.id != id {
            panic!("unexpected element id {id} (head element is {})", info.id);
        }

        state.num_bytes -= info.num_bytes;
        state.elements.pop_front();
        state.dirty = state.has_pending_operation() && CompletionStatus::Normal != status;
    }

    /// Release the per-round sync gate.
    ///
    /// Recomputes `dirty` so the subsystem reopens once truly quiescent.
    pub fn clear_pending_sync(&self) {
        let mut state = self.state.lock();
        state.has_pending_sync = false;

        if state.dirty {
            state.dirty = state.has_pending_operation();
        }
    }
}
