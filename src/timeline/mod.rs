//! Per-service heartbeat timelines
//!
//! Groups validated events by service, keeping services in first-seen order
//! so results are deterministic across runs.

use fxhash::FxHashMap;

use crate::event::ValidatedEvent;

/// Insertion-ordered mapping from service name to its heartbeats
#[derive(Debug, Clone, Default)]
pub struct ServiceTimeline {
    /// Service partitions in first-seen order
    entries: Vec<(String, Vec<ValidatedEvent>)>,
    /// Service name -> position in `entries`
    index: FxHashMap<String, usize>,
}

impl ServiceTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to its service's partition
    pub fn push(&mut self, event: ValidatedEvent) {
        match self.index.get(&event.service) {
            Some(&pos) => self.entries[pos].1.push(event),
            None => {
                self.index.insert(event.service.clone(), self.entries.len());
                self.entries.push((event.service.clone(), vec![event]));
            }
        }
    }

    /// Heartbeats for a service, if any were seen
    pub fn get(&self, service: &str) -> Option<&[ValidatedEvent]> {
        self.index
            .get(service)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// Number of distinct services
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Service names in first-seen order
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate partitions in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidatedEvent])> {
        self.entries
            .iter()
            .map(|(name, events)| (name.as_str(), events.as_slice()))
    }

    /// Partitions as a slice, for parallel iteration
    pub fn partitions(&self) -> &[(String, Vec<ValidatedEvent>)] {
        &self.entries
    }

    /// Sort every partition by parsed instant
    ///
    /// The sort is stable: heartbeats with equal instants keep input order.
    pub fn sort_chronologically(&mut self) {
        for (_, events) in &mut self.entries {
            events.sort_by_key(|e| e.instant);
        }
    }
}

impl FromIterator<ValidatedEvent> for ServiceTimeline {
    fn from_iter<I: IntoIterator<Item = ValidatedEvent>>(iter: I) -> Self {
        let mut timeline = ServiceTimeline::new();
        for event in iter {
            timeline.push(event);
        }
        timeline
    }
}

/// Partition validated events by service, keeping input order within each
pub fn group_by_service(events: impl IntoIterator<Item = ValidatedEvent>) -> ServiceTimeline {
    events.into_iter().collect()
}
