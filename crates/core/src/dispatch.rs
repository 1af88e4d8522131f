//! Ambulance dispatch notification.
//!
//! Scoring and ranking never dispatch anything. Once the operator picks a facility from the
//! ranking, [`dispatch`] hands exactly that facility to a caller-supplied
//! [`DispatchNotifier`]. Retries and delivery failures are the notifier's business.

use crate::matching::ScoredFacility;
use catalog::Facility;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Receives the facility an operator selected for dispatch.
pub trait DispatchNotifier {
    fn notify_dispatch(&self, facility: &Facility);
}

impl<F> DispatchNotifier for F
where
    F: Fn(&Facility),
{
    fn notify_dispatch(&self, facility: &Facility) {
        self(facility)
    }
}

/// Notify `notifier` that an ambulance is dispatched from `selected`.
///
/// Returns the facility that was passed to the notifier, unmodified.
pub fn dispatch<'a, N>(selected: &'a ScoredFacility, notifier: &N) -> &'a Facility
where
    N: DispatchNotifier + ?Sized,
{
    notifier.notify_dispatch(&selected.facility);
    &selected.facility
}

/// Operator-facing confirmation text for a dispatch.
pub fn dispatch_message(facility: &Facility) -> String {
    format!(
        "Emergency services dispatched from {}. ETA: {} minutes.",
        facility.name, facility.estimated_arrival_minutes
    )
}

/// Records each dispatch as a structured log event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDispatchNotifier;

impl DispatchNotifier for TracingDispatchNotifier {
    fn notify_dispatch(&self, facility: &Facility) {
        tracing::info!(
            facility_id = %facility.id,
            eta_minutes = facility.estimated_arrival_minutes,
            "ambulance dispatched from {}",
            facility.name
        );
    }
}

/// One entry of the in-memory dispatch log.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchRecord {
    pub id: Uuid,
    pub facility: Facility,
    pub dispatched_at: DateTime<Utc>,
}

/// Keeps every dispatched facility in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingDispatchNotifier {
    records: Mutex<Vec<DispatchRecord>>,
}

impl RecordingDispatchNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the log.
    pub fn records(&self) -> Vec<DispatchRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a dispatch of `facility` and return the new entry.
    pub fn record(&self, facility: &Facility) -> DispatchRecord {
        let record = DispatchRecord {
            id: Uuid::new_v4(),
            facility: facility.clone(),
            dispatched_at: Utc::now(),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        record
    }
}

impl DispatchNotifier for RecordingDispatchNotifier {
    fn notify_dispatch(&self, facility: &Facility) {
        self.record(facility);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::facility;
    use std::cell::RefCell;

    fn scored(id: &str) -> ScoredFacility {
        ScoredFacility {
            facility: facility(id, &["emergency"], 1.0),
            match_score: 1,
        }
    }

    #[test]
    fn closure_receives_selected_facility_unmodified() {
        let selected = scored("A");
        let seen = RefCell::new(Vec::new());
        let notifier = |f: &Facility| seen.borrow_mut().push(f.clone());

        let returned = dispatch(&selected, &notifier);

        assert_eq!(returned, &selected.facility);
        assert_eq!(seen.into_inner(), vec![selected.facility.clone()]);
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let log = RecordingDispatchNotifier::new();
        dispatch(&scored("A"), &log);
        dispatch(&scored("B"), &log);

        let records = log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].facility.id.as_str(), "A");
        assert_eq!(records[1].facility.id.as_str(), "B");
        assert_ne!(records[0].id, records[1].id);
        assert!(records[0].dispatched_at <= records[1].dispatched_at);
    }

    #[test]
    fn works_through_trait_object() {
        let log = RecordingDispatchNotifier::new();
        let notifier: &dyn DispatchNotifier = &log;
        dispatch(&scored("A"), notifier);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn tracing_notifier_does_not_panic_without_subscriber() {
        dispatch(&scored("A"), &TracingDispatchNotifier);
    }

    #[test]
    fn message_mentions_name_and_eta() {
        let f = facility("City", &[], 1.0);
        assert_eq!(
            dispatch_message(&f),
            "Emergency services dispatched from City Hospital. ETA: 10 minutes."
        );
    }
}
