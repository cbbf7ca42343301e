//! Tagged loading state shared by every fetch flow.
//!
//! A fetch takes a [`Ticket`] when it is issued and hands it back with its
//! result. Only the holder of the newest ticket may commit; anything older
//! is dropped as stale no matter when it arrives.

use crate::utils::error::{CompassError, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// How a coordinator operation ended. Operations never propagate errors;
/// failures land in the owning state and are reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    /// A newer request superseded this one; its result was dropped.
    Stale,
    /// Preconditions not met; nothing was attempted.
    Skipped,
    Failed(String),
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed)
    }
}

/// Failure text shown to the user. Fetch failures get the operation's retry
/// prompt, anything else keeps its own message.
pub(crate) fn failure_message(failure: &str, error: &CompassError) -> String {
    if error.is_fetch_failure() {
        failure.to_string()
    } else {
        error.user_friendly_message()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub seq: u64,
    pub key: K,
}

/// Owned copy of a slot for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView<K, V> {
    pub key: Option<K>,
    pub phase: Phase,
    pub value: Option<V>,
}

#[derive(Debug)]
pub struct LoadSlot<K, V> {
    issued: u64,
    key: Option<K>,
    phase: Phase,
    value: Option<V>,
}

impl<K, V> Default for LoadSlot<K, V> {
    fn default() -> Self {
        Self {
            issued: 0,
            key: None,
            phase: Phase::Idle,
            value: None,
        }
    }
}

impl<K: Clone + PartialEq, V> LoadSlot<K, V> {
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.issued += 1;
        self.key = Some(key.clone());
        self.phase = Phase::Loading;
        self.value = None;
        Ticket {
            seq: self.issued,
            key,
        }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        ticket.seq == self.issued && self.key.as_ref() == Some(&ticket.key)
    }

    pub fn settle(
        &mut self,
        ticket: &Ticket<K>,
        result: Result<V>,
        context: &str,
        failure: &str,
    ) -> Outcome {
        if !self.is_current(ticket) {
            tracing::warn!("Dropping stale {} response (request #{})", context, ticket.seq);
            return Outcome::Stale;
        }

        match result {
            Ok(value) => {
                self.value = Some(value);
                self.phase = Phase::Ready;
                tracing::debug!("Committed {} (request #{})", context, ticket.seq);
                Outcome::Committed
            }
            Err(e) => {
                tracing::error!("Fetching {} failed: {}", context, e);
                let message = failure_message(failure, &e);
                self.value = None;
                self.phase = Phase::Error(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Loaded value, only ever for the current key.
    pub fn value(&self) -> Option<&V> {
        match self.phase {
            Phase::Ready => self.value.as_ref(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SlotView<K, V>
    where
        V: Clone,
    {
        SlotView {
            key: self.key.clone(),
            phase: self.phase.clone(),
            value: self.value().cloned(),
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANET_FAILURE: &str = "Failed to fetch planet data. Please try again.";

    #[test]
    fn test_newest_ticket_wins() {
        let mut slot: LoadSlot<&str, u32> = LoadSlot::default();
        let first = slot.begin("Mars");
        let second = slot.begin("Venus");

        assert_eq!(
            slot.settle(&second, Ok(2), "planet", PLANET_FAILURE),
            Outcome::Committed
        );
        assert_eq!(
            slot.settle(&first, Ok(1), "planet", PLANET_FAILURE),
            Outcome::Stale
        );
        assert_eq!(slot.key(), Some(&"Venus"));
        assert_eq!(slot.value(), Some(&2));
    }

    #[test]
    fn test_same_key_reissued_still_supersedes() {
        let mut slot: LoadSlot<&str, u32> = LoadSlot::default();
        let first = slot.begin("Mars");
        let _second = slot.begin("Mars");
        assert_eq!(
            slot.settle(&first, Ok(1), "planet", PLANET_FAILURE),
            Outcome::Stale
        );
        assert!(slot.phase().is_loading());
    }

    #[test]
    fn test_failure_clears_value() {
        let mut slot: LoadSlot<&str, u32> = LoadSlot::default();
        let ticket = slot.begin("Mars");
        let outcome = slot.settle(
            &ticket,
            Err(CompassError::malformed("planet", "empty")),
            "planet data",
            PLANET_FAILURE,
        );
        assert_eq!(outcome, Outcome::Failed(PLANET_FAILURE.to_string()));
        assert!(slot.value().is_none());
        assert!(slot.phase().error_message().is_some());
    }

    #[test]
    fn test_non_fetch_failure_keeps_its_own_message() {
        let mut slot: LoadSlot<&str, u32> = LoadSlot::default();
        let ticket = slot.begin("Mars");
        let error = CompassError::invalid_input("birth date", "expected YYYY-MM-DD");
        let expected = error.user_friendly_message();

        let outcome = slot.settle(&ticket, Err(error), "planet data", PLANET_FAILURE);
        assert_eq!(outcome, Outcome::Failed(expected));
    }
}
