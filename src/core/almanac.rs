//! Content that changes once a day: the three daily facts and today's
//! astrological events. Both are keyed by the calendar date they were
//! fetched for and are not fetched again on the same day.

use crate::core::slot::{lock, LoadSlot, Outcome, SlotView};
use crate::domain::model::{AstrologicalEvent, FactSheet, FactTopic};
use crate::domain::ports::ContentProvider;
use crate::utils::error::{CompassError, Result};
use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex};

const FACTS_FAILURE: &str = "Failed to fetch daily facts. Please try again.";
const EVENTS_FAILURE: &str = "Failed to fetch astrological events. Please try again.";

pub struct Almanac {
    provider: Arc<dyn ContentProvider>,
    facts: Mutex<LoadSlot<NaiveDate, FactSheet>>,
    events: Mutex<LoadSlot<NaiveDate, Vec<AstrologicalEvent>>>,
}

impl Almanac {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            facts: Mutex::new(LoadSlot::default()),
            events: Mutex::new(LoadSlot::default()),
        }
    }

    pub async fn load_facts(&self) -> Outcome {
        self.load_facts_for(Local::now().date_naive()).await
    }

    pub async fn load_facts_for(&self, day: NaiveDate) -> Outcome {
        let ticket = {
            let mut slot = lock(&self.facts);
            if slot.key() == Some(&day) && slot.value().is_some() {
                return Outcome::Skipped;
            }
            slot.begin(day)
        };

        let provider = self.provider.as_ref();
        let result = tokio::try_join!(
            provider.daily_fact(FactTopic::WesternAstrology),
            provider.daily_fact(FactTopic::ChineseAstrology),
            provider.daily_fact(FactTopic::Astronomy),
        )
        .map(|(western, chinese, astronomy)| FactSheet {
            western,
            chinese,
            astronomy,
        });

        lock(&self.facts).settle(&ticket, result, "daily facts", FACTS_FAILURE)
    }

    pub async fn load_events(&self) -> Outcome {
        self.load_events_for(Local::now().date_naive()).await
    }

    pub async fn load_events_for(&self, day: NaiveDate) -> Outcome {
        let ticket = {
            let mut slot = lock(&self.events);
            if slot.key() == Some(&day) && slot.value().is_some() {
                return Outcome::Skipped;
            }
            slot.begin(day)
        };

        let result = self
            .provider
            .astrological_events()
            .await
            .and_then(check_events);

        lock(&self.events).settle(&ticket, result, "astrological events", EVENTS_FAILURE)
    }

    pub fn facts(&self) -> SlotView<NaiveDate, FactSheet> {
        lock(&self.facts).snapshot()
    }

    pub fn events(&self) -> SlotView<NaiveDate, Vec<AstrologicalEvent>> {
        lock(&self.events).snapshot()
    }
}

fn check_events(events: Vec<AstrologicalEvent>) -> Result<Vec<AstrologicalEvent>> {
    if events.is_empty() {
        return Err(CompassError::malformed(
            "astrological events",
            "no events returned",
        ));
    }
    Ok(events)
}
