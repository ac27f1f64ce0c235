use std::cell::Cell;
use std::rc::Rc;

/// Owner side of a cooperative per-frame task.
///
/// Every `spawn` or `cancel` bumps a generation counter. Tokens remember the
/// generation they were issued at and go stale as soon as it moves, so a
/// callback that was already queued by the host sees `is_live() == false`
/// and returns without touching anything.
#[derive(Clone, Debug, Default)]
pub struct TaskSlot {
    generation: Rc<Cell<u64>>,
    running: Rc<Cell<bool>>,
}

#[derive(Clone, Debug)]
pub struct TaskToken {
    generation: Rc<Cell<u64>>,
    running: Rc<Cell<bool>>,
    issued: u64,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate any previous token and hand out a fresh one.
    pub fn spawn(&self) -> TaskToken {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        self.running.set(true);
        TaskToken {
            generation: self.generation.clone(),
            running: self.running.clone(),
            issued: next,
        }
    }

    /// Returns true if a task was running.
    pub fn cancel(&self) -> bool {
        let was_running = self.running.replace(false);
        self.generation.set(self.generation.get().wrapping_add(1));
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl TaskToken {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.generation.get() == self.issued
    }

    /// Called by the task itself on completion. A stale token does nothing,
    /// so a finished task can never clear its successor.
    pub fn finish(&self) {
        if self.is_live() {
            self.running.set(false);
            self.generation.set(self.issued.wrapping_add(1));
        }
    }
}
