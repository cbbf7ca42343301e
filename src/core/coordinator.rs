//! Selection coordinator: one per astrology mode.
//!
//! Owns the mode's [`Selection`] and the content loaded for it. Each fetch is
//! issued with a ticket capturing the selection at issue time; the result is
//! committed only while that ticket is still the newest one and its sign is
//! still the live sign. Sign info and horoscope are fetched together and
//! committed together, or not at all.

use crate::core::selection_store::SelectionStore;
use crate::core::slot::{failure_message, lock, LoadSlot, Outcome, Phase};
use crate::domain::model::{CompatibilityInfo, Horoscope, Selection, Timeframe};
use crate::domain::ports::ContentProvider;
use crate::domain::system::AstrologySystem;
use crate::utils::error::{CompassError, Result};
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Sign,
    Horoscope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket<Sign> {
    seq: u64,
    selection: Selection<Sign>,
}

#[derive(Debug, Clone)]
struct Tagged<T, V> {
    tag: T,
    value: V,
}

struct PrimaryState<S: AstrologySystem> {
    selection: Selection<S::Sign>,
    issued: u64,
    in_flight: Option<Request>,
    phase: Phase,
    info: Option<Tagged<S::Sign, S::Info>>,
    horoscope: Option<Tagged<(S::Sign, Timeframe), Horoscope>>,
}

impl<S: AstrologySystem> PrimaryState<S> {
    fn new(selection: Selection<S::Sign>) -> Self {
        Self {
            selection,
            issued: 0,
            in_flight: None,
            phase: Phase::Idle,
            info: None,
            horoscope: None,
        }
    }

    fn issue(&mut self, request: Request) -> Ticket<S::Sign> {
        self.issued += 1;
        self.in_flight = Some(request);
        self.phase = Phase::Loading;
        Ticket {
            seq: self.issued,
            selection: self.selection,
        }
    }

    fn is_current(&self, ticket: &Ticket<S::Sign>) -> bool {
        ticket.seq == self.issued && ticket.selection.sign == self.selection.sign
    }

    fn land(&mut self) {
        self.in_flight = None;
    }
}

/// Releases the in-flight marker if the fetch future is dropped before it
/// lands, so a cancelled selection never blocks later refreshes.
struct InFlightGuard<'a, S: AstrologySystem> {
    state: &'a Mutex<PrimaryState<S>>,
    seq: u64,
}

impl<S: AstrologySystem> Drop for InFlightGuard<'_, S> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        if state.issued == self.seq && state.in_flight.is_some() {
            tracing::debug!("{} request #{} abandoned before landing", S::MODE, self.seq);
            state.in_flight = None;
            state.phase = Phase::Idle;
        }
    }
}

/// Read-only snapshot of what may be rendered right now. Content appears only
/// when its tag matches the live selection.
#[derive(Debug, Clone)]
pub struct SelectionView<S: AstrologySystem> {
    pub selection: Selection<S::Sign>,
    pub phase: Phase,
    pub info: Option<S::Info>,
    pub horoscope: Option<Horoscope>,
}

#[derive(Debug, Clone)]
pub struct CompatibilityView<S: AstrologySystem> {
    pub pair: Option<(S::Sign, S::Sign)>,
    pub phase: Phase,
    pub result: Option<CompatibilityInfo>,
}

pub struct SelectionCoordinator<S: AstrologySystem> {
    provider: Arc<dyn ContentProvider>,
    store: SelectionStore,
    primary: Mutex<PrimaryState<S>>,
    compatibility: Mutex<LoadSlot<(S::Sign, S::Sign), CompatibilityInfo>>,
}

impl<S: AstrologySystem> fmt::Debug for SelectionCoordinator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("mode", &S::MODE)
            .field("selection", &self.selection())
            .finish_non_exhaustive()
    }
}

impl<S: AstrologySystem> SelectionCoordinator<S> {
    /// Starts from whatever the store remembers for this mode.
    pub fn new(provider: Arc<dyn ContentProvider>, store: SelectionStore) -> Self {
        let selection = store.load::<S>();
        tracing::debug!(
            "{} coordinator restored selection: sign={:?}, timeframe={}",
            S::MODE,
            selection.sign,
            selection.timeframe
        );
        Self {
            provider,
            store,
            primary: Mutex::new(PrimaryState::new(selection)),
            compatibility: Mutex::new(LoadSlot::default()),
        }
    }

    pub fn selection(&self) -> Selection<S::Sign> {
        lock(&self.primary).selection
    }

    pub fn phase(&self) -> Phase {
        lock(&self.primary).phase.clone()
    }

    pub fn view(&self) -> SelectionView<S> {
        let state = lock(&self.primary);
        let live = state.selection;
        let info = state
            .info
            .as_ref()
            .filter(|tagged| Some(tagged.tag) == live.sign)
            .map(|tagged| tagged.value.clone());
        let horoscope = state
            .horoscope
            .as_ref()
            .filter(|tagged| live.sign.map(|sign| (sign, live.timeframe)) == Some(tagged.tag))
            .map(|tagged| tagged.value.clone());

        SelectionView {
            selection: live,
            phase: state.phase.clone(),
            info,
            horoscope,
        }
    }

    /// Picks a sign and loads its info and horoscope together.
    pub async fn select_sign(&self, sign: S::Sign) -> Outcome {
        let ticket = {
            let mut state = lock(&self.primary);
            state.selection.sign = Some(sign);
            state.info = None;
            state.horoscope = None;
            state.issue(Request::Sign)
        };
        self.persist(&ticket.selection);
        tracing::debug!(
            "{} selection -> {} ({}), request #{}",
            S::MODE,
            sign,
            ticket.selection.timeframe,
            ticket.seq
        );

        self.load_sign(ticket, sign).await
    }

    /// Re-enters loading for a remembered sign, exactly as if it had just
    /// been picked.
    pub async fn restore(&self) -> Outcome {
        match self.selection().sign {
            Some(sign) => {
                tracing::info!("Restoring {} selection for {}", S::MODE, sign);
                self.select_sign(sign).await
            }
            None => Outcome::Skipped,
        }
    }

    /// Changes the timeframe without fetching. A horoscope loaded for the old
    /// timeframe stops being visible until it is refreshed.
    pub fn set_timeframe(&self, timeframe: Timeframe) {
        let selection = {
            let mut state = lock(&self.primary);
            state.selection.timeframe = timeframe;
            state.selection
        };
        tracing::debug!("{} timeframe -> {}", S::MODE, timeframe);
        self.persist(&selection);
    }

    /// Sets a sign found elsewhere (birth data lookup) without fetching.
    /// Whatever was loaded or in flight is discarded.
    pub fn adopt_sign(&self, sign: S::Sign) {
        let selection = {
            let mut state = lock(&self.primary);
            state.selection.sign = Some(sign);
            state.issued += 1;
            state.in_flight = None;
            state.phase = Phase::Idle;
            state.info = None;
            state.horoscope = None;
            state.selection
        };
        tracing::debug!("{} adopted sign {}", S::MODE, sign);
        self.persist(&selection);
    }

    /// Fetches only the horoscope for the current sign and timeframe.
    pub async fn refresh_horoscope(&self) -> Outcome {
        let ticket = {
            let mut state = lock(&self.primary);
            if state.selection.sign.is_none() {
                return Outcome::Skipped;
            }
            // The pending selection fetch already brings a horoscope.
            if state.in_flight == Some(Request::Sign) {
                return Outcome::Skipped;
            }
            state.horoscope = None;
            state.issue(Request::Horoscope)
        };
        let Some(sign) = ticket.selection.sign else {
            return Outcome::Skipped;
        };

        let timeframe = ticket.selection.timeframe;
        let _guard = self.guard(&ticket);
        let result = S::horoscope(self.provider.as_ref(), sign, timeframe).await;

        let mut state = lock(&self.primary);
        if !state.is_current(&ticket) {
            tracing::warn!(
                "Dropping stale {} horoscope for {} (request #{})",
                S::MODE,
                sign,
                ticket.seq
            );
            return Outcome::Stale;
        }
        state.land();

        match result {
            Ok(horoscope) => {
                state.horoscope = Some(Tagged {
                    tag: (sign, timeframe),
                    value: horoscope,
                });
                state.phase = Phase::Ready;
                tracing::info!("Loaded {} {} horoscope for {}", timeframe, S::MODE, sign);
                Outcome::Committed
            }
            Err(e) => {
                tracing::error!("{} horoscope for {} failed: {}", S::MODE, sign, e);
                let message = failure_message(S::HOROSCOPE_FAILURE, &e);
                state.phase = Phase::Error(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    /// Runs on its own sub-state; never waits for or disturbs the primary
    /// selection flow.
    pub async fn check_compatibility(&self, first: S::Sign, second: S::Sign) -> Outcome {
        let ticket = lock(&self.compatibility).begin((first, second));
        tracing::debug!("{} compatibility {} + {}", S::MODE, first, second);

        let result = S::compatibility(self.provider.as_ref(), first, second)
            .await
            .and_then(validate_compatibility);

        lock(&self.compatibility).settle(
            &ticket,
            result,
            "compatibility",
            S::COMPATIBILITY_FAILURE,
        )
    }

    pub fn compatibility(&self) -> CompatibilityView<S> {
        let slot = lock(&self.compatibility);
        CompatibilityView {
            pair: slot.key().copied(),
            phase: slot.phase().clone(),
            result: slot.value().cloned(),
        }
    }

    async fn load_sign(&self, ticket: Ticket<S::Sign>, sign: S::Sign) -> Outcome {
        let provider = self.provider.as_ref();
        let timeframe = ticket.selection.timeframe;
        let _guard = self.guard(&ticket);
        let joined = tokio::try_join!(
            S::sign_info(provider, sign),
            S::horoscope(provider, sign, timeframe),
        );

        let mut state = lock(&self.primary);
        if !state.is_current(&ticket) {
            tracing::warn!(
                "Dropping stale {} content for {} (request #{}, live #{})",
                S::MODE,
                sign,
                ticket.seq,
                state.issued
            );
            return Outcome::Stale;
        }
        state.land();

        match joined {
            Ok((info, horoscope)) => {
                state.info = Some(Tagged {
                    tag: sign,
                    value: info,
                });
                state.horoscope = Some(Tagged {
                    tag: (sign, timeframe),
                    value: horoscope,
                });
                state.phase = Phase::Ready;
                tracing::info!("Loaded {} content for {} ({})", S::MODE, sign, timeframe);
                Outcome::Committed
            }
            Err(e) => {
                tracing::error!("{} content for {} failed: {}", S::MODE, sign, e);
                let message = failure_message(S::CONTENT_FAILURE, &e);
                state.info = None;
                state.horoscope = None;
                state.phase = Phase::Error(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    fn guard(&self, ticket: &Ticket<S::Sign>) -> InFlightGuard<'_, S> {
        InFlightGuard {
            state: &self.primary,
            seq: ticket.seq,
        }
    }

    fn persist(&self, selection: &Selection<S::Sign>) {
        if let Err(e) = self.store.save::<S>(selection) {
            tracing::warn!("Could not persist {} selection: {}", S::MODE, e);
        }
    }
}

fn validate_compatibility(info: CompatibilityInfo) -> Result<CompatibilityInfo> {
    if info.percentage > 100 {
        return Err(CompassError::malformed(
            "compatibility",
            format!("percentage {} is outside 0-100", info.percentage),
        ));
    }
    Ok(info)
}
