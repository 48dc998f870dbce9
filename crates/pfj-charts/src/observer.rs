//! Change observation with synchronous or batched delivery.
//!
//! A [`ChangeObserver`] holds listeners registered by mounted elements. A
//! notification either runs the listeners immediately or schedules them on a
//! [`TaskQueue`], where a listener that is already pending is not scheduled
//! twice. A burst of mutations therefore collapses into a single pass that
//! runs after the last mutation and sees the final state.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::{Rc, Weak};

/// How notifications reach listeners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// Listeners run inside the mutating call
    Synchronous,
    /// Listeners run on the next [`TaskQueue::run_until_idle`]
    #[default]
    Batched,
}

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn()>;

struct Task {
    id: ListenerId,
    callback: Callback,
}

/// Single-threaded queue of pending listener invocations.
#[derive(Default)]
pub struct TaskQueue {
    tasks: RefCell<VecDeque<Task>>,
    queued: RefCell<HashSet<ListenerId>>,
    next_id: Cell<u64>,
}

impl TaskQueue {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn allocate_id(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ListenerId(id)
    }

    /// Schedule a listener. Returns `false` if it was already pending.
    fn schedule(&self, id: ListenerId, callback: Callback) -> bool {
        if !self.queued.borrow_mut().insert(id) {
            return false;
        }
        self.tasks.borrow_mut().push_back(Task { id, callback });
        true
    }

    /// Number of pending invocations.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run pending invocations until the queue is empty.
    ///
    /// Tasks scheduled while draining run in the same call.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let Some(task) = self.tasks.borrow_mut().pop_front() else {
                break;
            };
            // Release before running so the callback may schedule again.
            self.queued.borrow_mut().remove(&task.id);
            (task.callback)();
            ran += 1;
        }
        ran
    }
}

/// Registrable "on state changed" callbacks.
pub struct ChangeObserver {
    listeners: RefCell<Vec<(ListenerId, Callback)>>,
    delivery: Delivery,
    queue: Rc<TaskQueue>,
}

impl ChangeObserver {
    pub fn new(queue: Rc<TaskQueue>, delivery: Delivery) -> Rc<Self> {
        Rc::new(Self {
            listeners: RefCell::new(Vec::new()),
            delivery,
            queue,
        })
    }

    /// Register a listener. It stays registered until the subscription is dropped.
    pub fn subscribe(self: &Rc<Self>, listener: impl Fn() + 'static) -> Subscription {
        let id = self.queue.allocate_id();
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription {
            observer: Rc::downgrade(self),
            id: Some(id),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver a change notification to every listener.
    pub fn notify(&self) {
        let listeners: Vec<(ListenerId, Callback)> = self.listeners.borrow().clone();
        for (id, callback) in listeners {
            match self.delivery {
                Delivery::Synchronous => callback(),
                Delivery::Batched => {
                    self.queue.schedule(id, callback);
                }
            }
        }
    }

    fn remove(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

/// Handle to a registered listener.
pub struct Subscription {
    observer: Weak<ChangeObserver>,
    id: Option<ListenerId>,
}

impl Subscription {
    /// Remove the listener. Safe to call more than once.
    pub fn disconnect(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(observer) = self.observer.upgrade() {
                observer.remove(id);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.id.is_some() && self.observer.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn synchronous_delivery_runs_immediately() {
        let queue = TaskQueue::new();
        let observer = ChangeObserver::new(Rc::clone(&queue), Delivery::Synchronous);
        let (count, listener) = counter();
        let _sub = observer.subscribe(listener);

        observer.notify();
        observer.notify();

        assert_eq!(count.get(), 2);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn batched_delivery_collapses_bursts() {
        let queue = TaskQueue::new();
        let observer = ChangeObserver::new(Rc::clone(&queue), Delivery::Batched);
        let (count, listener) = counter();
        let _sub = observer.subscribe(listener);

        observer.notify();
        observer.notify();
        observer.notify();
        assert_eq!(count.get(), 0);

        assert_eq!(queue.run_until_idle(), 1);
        assert_eq!(count.get(), 1);

        observer.notify();
        assert_eq!(queue.run_until_idle(), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let queue = TaskQueue::new();
        let observer = ChangeObserver::new(Rc::clone(&queue), Delivery::Synchronous);
        let (count, listener) = counter();
        let sub = observer.subscribe(listener);
        assert_eq!(observer.listener_count(), 1);

        drop(sub);
        observer.notify();

        assert_eq!(observer.listener_count(), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let queue = TaskQueue::new();
        let observer = ChangeObserver::new(queue, Delivery::Batched);
        let mut sub = observer.subscribe(|| {});

        sub.disconnect();
        sub.disconnect();

        assert!(!sub.is_connected());
        assert_eq!(observer.listener_count(), 0);
    }

    #[test]
    fn tasks_scheduled_while_draining_also_run() {
        let queue = TaskQueue::new();
        let first = ChangeObserver::new(Rc::clone(&queue), Delivery::Batched);
        let second = ChangeObserver::new(Rc::clone(&queue), Delivery::Batched);
        let (count, listener) = counter();
        let _second_sub = second.subscribe(listener);

        let chained = Rc::clone(&second);
        let _first_sub = first.subscribe(move || chained.notify());

        first.notify();

        assert_eq!(queue.run_until_idle(), 2);
        assert_eq!(count.get(), 1);
    }
}
