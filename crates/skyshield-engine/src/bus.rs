//! Publish/subscribe event bus.
//!
//! Emission only enqueues; dispatch happens when the engine calls
//! `process_events` at the end of its update, so subscribers observe a
//! consistent post-tick state. Handlers for a kind run in descending
//! priority order; a failing handler is recorded and never blocks the
//! rest. Dispatched records land in a bounded rolling history that can be
//! queried with `EventFilter`.

use std::collections::{HashMap, VecDeque};

use skyshield_core::constants::EVENT_HISTORY_LIMIT;
use skyshield_core::events::{EventKind, EventRecord, GameEvent};
use skyshield_core::types::EntityId;

/// Handlers report failure as `Err`; the bus logs it and moves on.
pub type HandlerResult = Result<(), String>;

type Handler = Box<dyn FnMut(&EventRecord) -> HandlerResult>;

/// Options for one subscription.
#[derive(Debug, Clone, Default)]
pub struct SubscribeOpts {
    /// Higher priorities run first; equal priorities keep insertion order.
    pub priority: i32,
    /// Remove the handler after its first invocation.
    pub once: bool,
    /// Debug label carried into handler-error messages.
    pub label: Option<String>,
}

struct Subscription {
    id: u64,
    priority: i32,
    once: bool,
    label: Option<String>,
    handler: Handler,
}

/// History query. All populated criteria must match.
#[derive(Default)]
pub struct EventFilter {
    pub kinds: Option<Vec<EventKind>>,
    pub sources: Option<Vec<EntityId>>,
    pub targets: Option<Vec<EntityId>>,
    pub min_priority: Option<u8>,
    pub max_priority: Option<u8>,
    pub predicate: Option<Box<dyn Fn(&EventRecord) -> bool>>,
}

impl EventFilter {
    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&record.event.kind()) {
                return false;
            }
        }
        if let Some(sources) = &self.sources {
            match record.event.source() {
                Some(source) if sources.contains(&source) => {}
                _ => return false,
            }
        }
        if let Some(targets) = &self.targets {
            match record.event.target() {
                Some(target) if targets.contains(&target) => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_priority {
            if record.priority < min {
                return false;
            }
        }
        if let Some(max) = self.max_priority {
            if record.priority > max {
                return false;
            }
        }
        if let Some(predicate) = &self.predicate {
            if !predicate(record) {
                return false;
            }
        }
        true
    }
}

pub struct EventBus {
    subscriptions: HashMap<EventKind, Vec<Subscription>>,
    queue: VecDeque<EventRecord>,
    history: VecDeque<EventRecord>,
    history_limit: usize,
    next_seq: u64,
    next_sub_id: u64,
    /// Simulation time stamped onto emitted events.
    clock: f64,
    handler_errors: Vec<String>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_history_limit(EVENT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            subscriptions: HashMap::new(),
            queue: VecDeque::new(),
            history: VecDeque::new(),
            history_limit,
            next_seq: 0,
            next_sub_id: 0,
            clock: 0.0,
            handler_errors: Vec::new(),
        }
    }

    /// Set the simulation time used to stamp subsequent emissions.
    pub fn set_time(&mut self, now: f64) {
        self.clock = now;
    }

    /// Register a handler for `kind`. Returns the subscription id.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&EventRecord) -> HandlerResult + 'static,
        opts: SubscribeOpts,
    ) -> u64 {
        let id = self.next_sub_id;
        self.next_sub_id += 1;

        let subscription = Subscription {
            id,
            priority: opts.priority,
            once: opts.once,
            label: opts.label,
            handler: Box::new(handler),
        };

        let handlers = self.subscriptions.entry(kind).or_default();
        // Descending priority; ties keep insertion order.
        let at = handlers
            .iter()
            .position(|s| s.priority < subscription.priority)
            .unwrap_or(handlers.len());
        handlers.insert(at, subscription);
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, kind: EventKind, id: u64) -> bool {
        if let Some(handlers) = self.subscriptions.get_mut(&kind) {
            let before = handlers.len();
            handlers.retain(|s| s.id != id);
            return handlers.len() != before;
        }
        false
    }

    /// Stamp and enqueue an event. Dispatch happens in `process_events`.
    pub fn emit(&mut self, event: GameEvent) {
        let record = EventRecord {
            seq: self.next_seq,
            timestamp: self.clock,
            priority: event.priority(),
            event,
        };
        self.next_seq += 1;
        self.queue.push_back(record);
    }

    /// Drain the queue: append each event to history and invoke its
    /// handlers in priority order. Events emitted by handlers are picked
    /// up on the next call.
    pub fn process_events(&mut self) {
        let pending: Vec<EventRecord> = std::mem::take(&mut self.queue).into();

        for record in pending {
            self.history.push_back(record.clone());
            while self.history.len() > self.history_limit {
                self.history.pop_front();
            }

            let kind = record.event.kind();
            if let Some(handlers) = self.subscriptions.get_mut(&kind) {
                for sub in handlers.iter_mut() {
                    if let Err(message) = (sub.handler)(&record) {
                        let label = sub.label.as_deref().unwrap_or("handler");
                        self.handler_errors
                            .push(format!("{label} failed on {kind:?}: {message}"));
                    }
                }
                handlers.retain(|s| !s.once);
            }
        }
    }

    /// Query history. Records are returned oldest first.
    pub fn events(&self, filter: &EventFilter) -> Vec<&EventRecord> {
        self.history.iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn history(&self) -> impl Iterator<Item = &EventRecord> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drain accumulated handler failure messages.
    pub fn take_handler_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.handler_errors)
    }

    /// Drop queued-but-undispatched events (engine reset).
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
