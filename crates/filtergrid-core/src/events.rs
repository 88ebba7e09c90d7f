//! Lifecycle events fired around filtering, shuffling and sorting.
//!
//! Listeners live in an [`EventRegistry`] owned by the container, so binding and
//! unbinding never reaches listeners that other code attached to the same host
//! element.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use crate::collections::map::HashMap;

/// Suffix appended to event names when they are mirrored to a host element.
pub const EVENT_NAMESPACE: &str = "filtergrid";

/// Grid operation a lifecycle event brackets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleOperation {
    Filtering,
    Shuffling,
    Sorting,
}

/// One of the six lifecycle events, fired in start/end pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    FilteringStart,
    FilteringEnd,
    ShufflingStart,
    ShufflingEnd,
    SortingStart,
    SortingEnd,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 6] = [
        LifecycleEvent::FilteringStart,
        LifecycleEvent::FilteringEnd,
        LifecycleEvent::ShufflingStart,
        LifecycleEvent::ShufflingEnd,
        LifecycleEvent::SortingStart,
        LifecycleEvent::SortingEnd,
    ];

    /// Event name as seen by page scripts, e.g. `filteringStart`.
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::FilteringStart => "filteringStart",
            LifecycleEvent::FilteringEnd => "filteringEnd",
            LifecycleEvent::ShufflingStart => "shufflingStart",
            LifecycleEvent::ShufflingEnd => "shufflingEnd",
            LifecycleEvent::SortingStart => "sortingStart",
            LifecycleEvent::SortingEnd => "sortingEnd",
        }
    }

    /// Name qualified with [`EVENT_NAMESPACE`], e.g. `filteringStart.filtergrid`.
    pub fn namespaced_name(self) -> String {
        format!("{}.{}", self.name(), EVENT_NAMESPACE)
    }

    pub fn operation(self) -> LifecycleOperation {
        match self {
            LifecycleEvent::FilteringStart | LifecycleEvent::FilteringEnd => {
                LifecycleOperation::Filtering
            }
            LifecycleEvent::ShufflingStart | LifecycleEvent::ShufflingEnd => {
                LifecycleOperation::Shuffling
            }
            LifecycleEvent::SortingStart | LifecycleEvent::SortingEnd => {
                LifecycleOperation::Sorting
            }
        }
    }

    pub fn is_start(self) -> bool {
        matches!(
            self,
            LifecycleEvent::FilteringStart
                | LifecycleEvent::ShufflingStart
                | LifecycleEvent::SortingStart
        )
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown lifecycle event `{0}`")]
pub struct ParseEventError(pub String);

impl FromStr for LifecycleEvent {
    type Err = ParseEventError;

    /// Accepts both bare (`sortingEnd`) and namespaced (`sortingEnd.filtergrid`) names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = match s.split_once('.') {
            Some((name, namespace)) if namespace == EVENT_NAMESPACE => name,
            Some(_) => return Err(ParseEventError(s.to_string())),
            None => s,
        };
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.name() == bare)
            .ok_or_else(|| ParseEventError(s.to_string()))
    }
}

/// A bound lifecycle listener.
pub type Listener = Box<dyn FnMut(LifecycleEvent)>;

/// Callbacks handed to [`FilterContainer::bind_events`](crate::FilterContainer::bind_events).
///
/// Every field is optional; a missing callback leaves its event unbound.
#[derive(Default)]
pub struct LifecycleCallbacks {
    pub on_filtering_start: Option<Listener>,
    pub on_filtering_end: Option<Listener>,
    pub on_shuffling_start: Option<Listener>,
    pub on_shuffling_end: Option<Listener>,
    pub on_sorting_start: Option<Listener>,
    pub on_sorting_end: Option<Listener>,
}

impl LifecycleCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for `event`, replacing any callback set before.
    pub fn on(
        mut self,
        event: LifecycleEvent,
        listener: impl FnMut(LifecycleEvent) + 'static,
    ) -> Self {
        *self.slot_mut(event) = Some(Box::new(listener));
        self
    }

    pub fn on_filtering_start(self, listener: impl FnMut(LifecycleEvent) + 'static) -> Self {
        self.on(LifecycleEvent::FilteringStart, listener)
    }

    pub fn on_filtering_end(self, listener: impl FnMut(LifecycleEvent) + 'static) -> Self {
        self.on(LifecycleEvent::FilteringEnd, listener)
    }

    pub fn on_shuffling_start(self, listener: impl FnMut(LifecycleEvent) + 'static) -> Self {
        self.on(LifecycleEvent::ShufflingStart, listener)
    }

    pub fn on_shuffling_end(self, listener: impl FnMut(LifecycleEvent) + 'static) -> Self {
        self.on(LifecycleEvent::ShufflingEnd, listener)
    }

    pub fn on_sorting_start(self, listener: impl FnMut(LifecycleEvent) + 'static) -> Self {
        self.on(LifecycleEvent::SortingStart, listener)
    }

    pub fn on_sorting_end(self, listener: impl FnMut(LifecycleEvent) + 'static) -> Self {
        self.on(LifecycleEvent::SortingEnd, listener)
    }

    fn slot_mut(&mut self, event: LifecycleEvent) -> &mut Option<Listener> {
        match event {
            LifecycleEvent::FilteringStart => &mut self.on_filtering_start,
            LifecycleEvent::FilteringEnd => &mut self.on_filtering_end,
            LifecycleEvent::ShufflingStart => &mut self.on_shuffling_start,
            LifecycleEvent::ShufflingEnd => &mut self.on_shuffling_end,
            LifecycleEvent::SortingStart => &mut self.on_sorting_start,
            LifecycleEvent::SortingEnd => &mut self.on_sorting_end,
        }
    }

    /// Drains the callbacks into `(event, listener)` pairs in [`LifecycleEvent::ALL`] order.
    fn into_listeners(mut self) -> impl Iterator<Item = (LifecycleEvent, Listener)> {
        LifecycleEvent::ALL
            .into_iter()
            .filter_map(move |event| self.slot_mut(event).take().map(|listener| (event, listener)))
    }
}

impl fmt::Debug for LifecycleCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleCallbacks")
            .field("on_filtering_start", &self.on_filtering_start.is_some())
            .field("on_filtering_end", &self.on_filtering_end.is_some())
            .field("on_shuffling_start", &self.on_shuffling_start.is_some())
            .field("on_shuffling_end", &self.on_shuffling_end.is_some())
            .field("on_sorting_start", &self.on_sorting_start.is_some())
            .field("on_sorting_end", &self.on_sorting_end.is_some())
            .finish()
    }
}

/// Listener registry keyed by lifecycle event.
///
/// Binding the same event twice keeps both listeners; they run in binding order.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<LifecycleEvent, SmallVec<[Listener; 1]>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every callback present in `callbacks`. Returns how many were bound.
    pub fn bind(&mut self, callbacks: LifecycleCallbacks) -> usize {
        let mut bound = 0;
        for (event, listener) in callbacks.into_listeners() {
            self.listeners.entry(event).or_default().push(listener);
            bound += 1;
        }
        bound
    }

    /// Removes every listener. Returns how many were removed.
    pub fn unbind_all(&mut self) -> usize {
        let removed = self.listeners.values().map(|list| list.len()).sum();
        self.listeners.clear();
        removed
    }

    /// Invokes the listeners bound to `event`. Returns how many ran.
    pub fn dispatch(&mut self, event: LifecycleEvent) -> usize {
        match self.listeners.get_mut(&event) {
            Some(list) => {
                for listener in list.iter_mut() {
                    listener(event);
                }
                list.len()
            }
            None => 0,
        }
    }

    pub fn is_bound(&self, event: LifecycleEvent) -> bool {
        self.listener_count(event) > 0
    }

    pub fn listener_count(&self, event: LifecycleEvent) -> usize {
        self.listeners.get(&event).map_or(0, |list| list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(|list| list.is_empty())
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event in LifecycleEvent::ALL {
            let count = self.listener_count(event);
            if count > 0 {
                map.entry(&event, &count);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<LifecycleEvent>>>, impl FnMut(LifecycleEvent) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |event| sink.borrow_mut().push(event))
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for event in LifecycleEvent::ALL {
            assert_eq!(event.name().parse::<LifecycleEvent>(), Ok(event));
            assert_eq!(event.namespaced_name().parse::<LifecycleEvent>(), Ok(event));
        }
    }

    #[test]
    fn test_from_str_rejects_foreign_names() {
        assert!("click".parse::<LifecycleEvent>().is_err());
        assert!("filteringStart.other".parse::<LifecycleEvent>().is_err());
        assert_eq!(
            "layoutEnd".parse::<LifecycleEvent>(),
            Err(ParseEventError("layoutEnd".to_string()))
        );
    }

    #[test]
    fn test_operation_and_phase() {
        assert_eq!(LifecycleEvent::ShufflingEnd.operation(), LifecycleOperation::Shuffling);
        assert!(LifecycleEvent::SortingStart.is_start());
        assert!(!LifecycleEvent::FilteringEnd.is_start());
        assert_eq!(LifecycleEvent::ALL.iter().filter(|event| event.is_start()).count(), 3);
    }

    #[test]
    fn test_missing_callbacks_stay_unbound() {
        let (_, listener) = recorder();
        let mut registry = EventRegistry::new();
        let bound = registry.bind(LifecycleCallbacks::new().on_sorting_end(listener));

        assert_eq!(bound, 1);
        assert!(registry.is_bound(LifecycleEvent::SortingEnd));
        assert!(!registry.is_bound(LifecycleEvent::SortingStart));
        assert_eq!(registry.dispatch(LifecycleEvent::SortingStart), 0);
    }

    #[test]
    fn test_dispatch_runs_listeners_in_binding_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);

        let mut registry = EventRegistry::new();
        registry.bind(
            LifecycleCallbacks::new().on_filtering_end(move |_| first.borrow_mut().push(1)),
        );
        registry.bind(
            LifecycleCallbacks::new().on_filtering_end(move |_| second.borrow_mut().push(2)),
        );

        assert_eq!(registry.listener_count(LifecycleEvent::FilteringEnd), 2);
        assert_eq!(registry.dispatch(LifecycleEvent::FilteringEnd), 2);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unbind_all() {
        let (log, listener) = recorder();
        let mut registry = EventRegistry::new();
        registry.bind(
            LifecycleCallbacks::new()
                .on_filtering_start(listener)
                .on_shuffling_start(|_| {}),
        );

        assert_eq!(registry.unbind_all(), 2);
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(LifecycleEvent::FilteringStart), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_listener_receives_event() {
        let (log, listener) = recorder();
        let mut registry = EventRegistry::new();
        registry.bind(LifecycleCallbacks::new().on(LifecycleEvent::ShufflingStart, listener));

        registry.dispatch(LifecycleEvent::ShufflingStart);
        assert_eq!(*log.borrow(), vec![LifecycleEvent::ShufflingStart]);
    }
}
