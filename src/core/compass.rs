use crate::core::almanac::Almanac;
use crate::core::coordinator::SelectionCoordinator;
use crate::core::discovery::{BirthData, SignDiscovery};
use crate::core::explorer::TopicExplorer;
use crate::core::layout::{LayoutPosition, RadialLayout};
use crate::core::selection_store::SelectionStore;
use crate::core::slot::{lock, Outcome};
use crate::domain::model::AstrologyMode;
use crate::domain::ports::{ContentProvider, KeyValueStore};
use crate::domain::system::{AstrologySystem, Chinese, Western};
use std::sync::{Arc, Mutex};

/// One sign button on the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSlot {
    pub name: String,
    pub symbol: &'static str,
    pub caption: Option<&'static str>,
    pub position: LayoutPosition,
    pub selected: bool,
}

/// Application root: the remembered mode, one coordinator per astrology
/// mode, and the topic areas that do not depend on a sign.
pub struct Compass {
    store: SelectionStore,
    mode: Mutex<AstrologyMode>,
    wheel: RadialLayout,
    pub western: SelectionCoordinator<Western>,
    pub chinese: SelectionCoordinator<Chinese>,
    pub explorer: TopicExplorer,
    pub almanac: Almanac,
    pub discovery: SignDiscovery,
}

impl Compass {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        backend: Arc<dyn KeyValueStore>,
        wheel: RadialLayout,
    ) -> Self {
        let store = SelectionStore::new(backend);
        let mode = store.load_mode();
        tracing::debug!("Starting in {} mode", mode);

        Self {
            mode: Mutex::new(mode),
            wheel,
            western: SelectionCoordinator::new(provider.clone(), store.clone()),
            chinese: SelectionCoordinator::new(provider.clone(), store.clone()),
            explorer: TopicExplorer::new(provider.clone()),
            almanac: Almanac::new(provider.clone()),
            discovery: SignDiscovery::new(provider),
            store,
        }
    }

    pub fn mode(&self) -> AstrologyMode {
        *lock(&self.mode)
    }

    pub fn set_mode(&self, mode: AstrologyMode) {
        *lock(&self.mode) = mode;
        if let Err(e) = self.store.save_mode(mode) {
            tracing::warn!("Could not persist astrology mode: {}", e);
        }
    }

    /// Startup: every coordinator with a remembered sign goes straight to
    /// loading it. Returns (western, chinese).
    pub async fn restore(&self) -> (Outcome, Outcome) {
        tokio::join!(self.western.restore(), self.chinese.restore())
    }

    /// Looks up both signs from birth data and adopts them. The signs'
    /// content is loaded by the next `restore` or `select_sign`.
    pub async fn discover_signs(&self, birth: BirthData) -> Outcome {
        let (outcome, found) = self.discovery.discover(birth).await;
        if let Some(signs) = found {
            tracing::info!("Discovered signs: {} / {}", signs.western, signs.chinese);
            self.western.adopt_sign(signs.western);
            self.chinese.adopt_sign(signs.chinese);
        }
        outcome
    }

    pub fn wheel<S: AstrologySystem>(
        &self,
        coordinator: &SelectionCoordinator<S>,
    ) -> Vec<WheelSlot> {
        let selected = coordinator.selection().sign;
        self.wheel
            .place(S::signs())
            .into_iter()
            .map(|(sign, position)| WheelSlot {
                name: sign.to_string(),
                symbol: S::symbol(*sign),
                caption: S::caption(*sign),
                position,
                selected: selected == Some(*sign),
            })
            .collect()
    }
}
