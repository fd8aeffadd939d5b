//! Record every degradation event: component, failure, fallback used, timestamp.

use std::collections::BTreeMap;

use causeway_core::models::DegradationEvent;

/// Collects degradations for one pipeline run or session.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<DegradationEvent>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a degradation and emit `parse_degraded`.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::parse_degraded(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(event);
    }

    /// Append events that were already reported, without logging them again.
    pub fn extend(&mut self, events: impl IntoIterator<Item = DegradationEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[DegradationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded for one component.
    pub fn count_for(&self, component: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.component == component)
            .count()
    }

    /// Event counts keyed by component.
    pub fn by_component(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.component.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Drain all events, leaving the tracker empty.
    pub fn take(&mut self) -> Vec<DegradationEvent> {
        std::mem::take(&mut self.events)
    }
}
