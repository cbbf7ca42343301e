use crate::domain::model::{AstrologyMode, Selection, Timeframe};
use crate::domain::ports::KeyValueStore;
use crate::domain::system::AstrologySystem;
use crate::utils::error::Result;
use std::fmt;
use std::sync::Arc;

pub const MODE_KEY: &str = "astrologyType";

/// Typed view over the key/value store holding the user's last picks.
/// Absent or unreadable values fall back to defaults.
#[derive(Clone)]
pub struct SelectionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore").finish_non_exhaustive()
    }
}

impl SelectionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn load_mode(&self) -> AstrologyMode {
        self.parse_or_default(MODE_KEY).unwrap_or_default()
    }

    pub fn save_mode(&self, mode: AstrologyMode) -> Result<()> {
        self.backend.set(MODE_KEY, mode.as_str())
    }

    pub fn load<S: AstrologySystem>(&self) -> Selection<S::Sign> {
        Selection {
            sign: self.parse_or_default(S::SIGN_KEY),
            timeframe: self
                .parse_or_default::<Timeframe>(S::TIMEFRAME_KEY)
                .unwrap_or_default(),
        }
    }

    pub fn save<S: AstrologySystem>(&self, selection: &Selection<S::Sign>) -> Result<()> {
        match selection.sign {
            Some(sign) => self.backend.set(S::SIGN_KEY, &sign.to_string())?,
            None => self.backend.remove(S::SIGN_KEY)?,
        }
        self.backend
            .set(S::TIMEFRAME_KEY, selection.timeframe.as_str())
    }

    fn parse_or_default<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unrecognised value '{}' stored under '{}'", raw, key);
                None
            }
        }
    }
}
