use crate::core::slot::{lock, LoadSlot, Outcome, SlotView};
use crate::domain::model::DiscoveredSigns;
use crate::domain::ports::ContentProvider;
use crate::utils::error::{CompassError, Result};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
const DISCOVERY_FAILURE: &str = "Failed to determine your signs. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthData {
    pub date: String,
    pub place: String,
}

/// Works out both signs from birth data in one all-or-nothing lookup.
pub struct SignDiscovery {
    provider: Arc<dyn ContentProvider>,
    slot: Mutex<LoadSlot<BirthData, DiscoveredSigns>>,
}

impl SignDiscovery {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            slot: Mutex::new(LoadSlot::default()),
        }
    }

    /// Both fields are required; with either blank nothing is attempted and
    /// nothing is reported.
    pub async fn discover(&self, birth: BirthData) -> (Outcome, Option<DiscoveredSigns>) {
        if birth.date.trim().is_empty() || birth.place.trim().is_empty() {
            tracing::debug!("Sign discovery skipped: birth date or place missing");
            return (Outcome::Skipped, None);
        }

        let ticket = lock(&self.slot).begin(birth.clone());
        let result = match parse_birth_date(&birth.date) {
            Ok(date) => {
                let date = date.format(BIRTH_DATE_FORMAT).to_string();
                let provider = self.provider.as_ref();
                tokio::try_join!(
                    provider.sign_from_birth_data(&date, birth.place.trim()),
                    provider.chinese_sign_from_birth_date(&date),
                )
                .map(|(western, chinese)| DiscoveredSigns { western, chinese })
            }
            Err(e) => Err(e),
        };
        let found = result.as_ref().ok().cloned();

        let outcome = lock(&self.slot).settle(&ticket, result, "sign discovery", DISCOVERY_FAILURE);
        match outcome {
            Outcome::Committed => (outcome, found),
            other => (other, None),
        }
    }

    pub fn view(&self) -> SlotView<BirthData, DiscoveredSigns> {
        lock(&self.slot).snapshot()
    }
}

pub fn parse_birth_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).map_err(|e| {
        CompassError::invalid_input("birth date", format!("expected YYYY-MM-DD ({})", e))
    })
}
