//! Main-thread task queue
//!
//! Work that must not run inside the current pass (focus transitions, for
//! example, are only valid once a widget is attached to its window) is pushed
//! onto a `MainQueue` and run on the next iteration of the host event loop.
//! Everything still runs on the UI thread; the queue only defers.
//!
//! One iteration runs exactly the tasks that were pending when it started.
//! Tasks scheduled while an iteration runs wait for the following one.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle for a scheduled task, used to cancel it
    pub struct TaskId;
}

type Task = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct QueueInner {
    tasks: SlotMap<TaskId, Task>,
    order: VecDeque<TaskId>,
}

/// Deferred work for the UI thread
#[derive(Clone, Default)]
pub struct MainQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl MainQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Schedule `task` for the next event-loop iteration
    pub fn schedule<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let mut inner = self.lock();
        let id = inner.tasks.insert(Box::new(task));
        inner.order.push_back(id);
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.lock().tasks.remove(id).is_some()
    }

    /// Whether `id` is still waiting to run
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.lock().tasks.contains_key(id)
    }

    /// Number of tasks waiting to run
    pub fn pending_count(&self) -> usize {
        self.lock().tasks.len()
    }

    /// Run one event-loop iteration, returning the number of tasks executed
    pub fn run_next_iteration(&self) -> usize {
        let batch: Vec<TaskId> = self.lock().order.drain(..).collect();
        let mut executed = 0;

        for id in batch {
            // Release the lock before running so tasks can schedule more work
            let task = self.lock().tasks.remove(id);
            if let Some(task) = task {
                task();
                executed += 1;
            }
        }

        if executed > 0 {
            tracing::trace!("Main queue ran {} task(s)", executed);
        }
        executed
    }

    /// Run iterations until nothing is pending or `max_iterations` is reached
    pub fn run_until_idle(&self, max_iterations: usize) -> usize {
        let mut executed = 0;
        for _ in 0..max_iterations {
            if self.pending_count() == 0 {
                break;
            }
            executed += self.run_next_iteration();
        }
        executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_tasks_are_deferred_until_iteration() {
        let queue = MainQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ran);
        queue.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(queue.run_next_iteration(), 1);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_tasks_scheduled_during_iteration_wait() {
        let queue = MainQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_queue = queue.clone();
        let outer_log = Arc::clone(&log);
        queue.schedule(move || {
            outer_log.lock().unwrap().push("outer");
            let inner_log = Arc::clone(&outer_log);
            inner_queue.schedule(move || inner_log.lock().unwrap().push("inner"));
        });

        assert_eq!(queue.run_next_iteration(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["outer"]);

        assert_eq!(queue.run_next_iteration(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_cancel() {
        let queue = MainQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ran);
        let id = queue.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(queue.is_pending(id));
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert_eq!(queue.run_next_iteration(), 0);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fifo_order() {
        let queue = MainQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let log = Arc::clone(&log);
            queue.schedule(move || log.lock().unwrap().push(i));
        }

        assert_eq!(queue.run_until_idle(8), 3);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }
}
