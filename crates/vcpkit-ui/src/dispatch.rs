//! UI-thread event dispatch
//!
//! Status changes are published on the thread-safe [`EventBus`] from any
//! thread. Controls are single-threaded, so views never subscribe to the bus
//! directly: they register with a [`UiDispatcher`], which owns a broadcast
//! receiver and delivers events when the host loop calls [`UiDispatcher::pump`].
//!
//! The dispatcher also holds the deferred queue: work scheduled with
//! [`UiDispatcher::defer`] runs at the start of the next pump.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use vcpkit_core::{AppEvent, EventBus, EventFilter};

/// Handle for removing a local subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalSubscriptionId(u64);

/// Returns false once the subscriber has nothing left to update
type LocalHandler = Rc<dyn Fn(&AppEvent) -> bool>;

struct LocalSubscriber {
    id: LocalSubscriptionId,
    filter: EventFilter,
    handler: LocalHandler,
}

/// Delivers bus events and deferred work on the UI thread.
pub struct UiDispatcher {
    receiver: RefCell<broadcast::Receiver<AppEvent>>,
    subscribers: RefCell<Vec<LocalSubscriber>>,
    next_id: Cell<u64>,
    deferred: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl UiDispatcher {
    /// Attach to a bus. Only events published after this call are seen.
    pub fn new(bus: &EventBus) -> Self {
        Self {
            receiver: RefCell::new(bus.receiver()),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            deferred: RefCell::new(VecDeque::new()),
        }
    }

    /// Register a handler for matching events
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> LocalSubscriptionId
    where
        F: Fn(&AppEvent) + 'static,
    {
        self.subscribe_while(filter, move |event| {
            handler(event);
            true
        })
    }

    /// Register a handler that is dropped the first time it returns false
    pub fn subscribe_while<F>(&self, filter: EventFilter, handler: F) -> LocalSubscriptionId
    where
        F: Fn(&AppEvent) -> bool + 'static,
    {
        let id = LocalSubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push(LocalSubscriber {
            id,
            filter,
            handler: Rc::new(handler),
        });
        id
    }

    pub fn unsubscribe(&self, id: LocalSubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Run `task` at the start of the next [`pump`](Self::pump)
    pub fn defer<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.deferred.borrow_mut().push_back(Box::new(task));
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.borrow().len()
    }

    /// Run one turn of the UI loop.
    ///
    /// Deferred work queued before this call runs first; work it defers in
    /// turn waits for the next pump. Then every queued bus event is delivered.
    /// Returns the number of events delivered.
    pub fn pump(&self) -> usize {
        let tasks: Vec<Box<dyn FnOnce()>> = self.deferred.borrow_mut().drain(..).collect();
        for task in tasks {
            task();
        }

        let mut delivered = 0;
        loop {
            // Keep the receiver borrow short: handlers may publish.
            let next = self.receiver.borrow_mut().try_recv();
            match next {
                Ok(event) => {
                    self.deliver(&event);
                    delivered += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("UI dispatcher lagged, {} events dropped", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        delivered
    }

    /// Hand an event to local subscribers immediately
    pub fn deliver(&self, event: &AppEvent) {
        let handlers: Vec<(LocalSubscriptionId, LocalHandler)> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.filter.matches(event))
            .map(|s| (s.id, s.handler.clone()))
            .collect();

        let mut finished = Vec::new();
        for (id, handler) in handlers {
            if !handler(event) {
                finished.push(id);
            }
        }
        if !finished.is_empty() {
            tracing::trace!("Dropping {} finished UI subscribers", finished.len());
            self.subscribers
                .borrow_mut()
                .retain(|s| !finished.contains(&s.id));
        }
    }
}

impl std::fmt::Debug for UiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiDispatcher")
            .field("subscribers", &self.subscriber_count())
            .field("deferred", &self.pending_deferred())
            .finish()
    }
}
