//! Publish/subscribe notifications for plan edits.
//!
//! An [`EventBus`] is an ordinary value: the host creates one, hands it to
//! whatever publishes, and drops or [`clear`](EventBus::clear)s it on
//! teardown. Nothing here is process-global.

use std::fmt;

/// Notifications published while a plan is edited.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// A document replaced the current plan.
    PlanLoaded { plan_id: String },
    /// The current plan was mutated (including by undo/redo).
    PlanChanged,
    /// Undo/redo availability may have changed.
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// Validation found problems.
    ValidationFailed { errors: Vec<String> },
}

/// Coarse event groups for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Document,
    History,
    Validation,
}

impl PlanEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            PlanEvent::PlanLoaded { .. } | PlanEvent::PlanChanged => EventCategory::Document,
            PlanEvent::HistoryChanged { .. } => EventCategory::History,
            PlanEvent::ValidationFailed { .. } => EventCategory::Validation,
        }
    }
}

/// Filter to receive only specific event types.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &PlanEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Subscription handle for unsubscribing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type EventHandler = Box<dyn Fn(&PlanEvent)>;

/// Synchronous event bus. Handlers run on the publishing call, in
/// subscription order.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, EventFilter, EventHandler)>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&PlanEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, filter, Box::new(handler)));
        log::debug!("Subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub, _, _)| *sub != id);
        let removed = self.handlers.len() != before;
        if removed {
            log::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Deliver an event; returns how many handlers received it.
    pub fn publish(&self, event: &PlanEvent) -> usize {
        let mut delivered = 0;
        for (_, filter, handler) in &self.handlers {
            if filter.matches(event) {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Remove every subscription.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            bus.subscribe(EventFilter::All, move |_| log.borrow_mut().push(name));
        }

        assert_eq!(bus.publish(&PlanEvent::PlanChanged), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_filter_by_category() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let counter = Rc::clone(&count);
        bus.subscribe(EventFilter::Categories(vec![EventCategory::History]), move |_| {
            *counter.borrow_mut() += 1;
        });

        assert_eq!(bus.publish(&PlanEvent::PlanChanged), 0);
        assert_eq!(bus.publish(&PlanEvent::HistoryChanged { can_undo: true, can_redo: false }), 1);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe_and_clear() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(EventFilter::All, |_| {});
        let _b = bus.subscribe(EventFilter::All, |_| {});

        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        assert_eq!(bus.subscriber_count(), 1);

        bus.clear();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(&PlanEvent::PlanChanged), 0);
    }

    #[test]
    fn test_buses_are_isolated() {
        let mut one = EventBus::new();
        let two = EventBus::new();
        one.subscribe(EventFilter::All, |_| {});
        assert_eq!(two.publish(&PlanEvent::PlanChanged), 0);
    }
}
