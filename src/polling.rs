//! Background refresh of the displayed address
//!
//! A `PollingController` owns at most one `PollingSession`. Starting a new
//! session disarms the previous one. Each session has a single-flight slot:
//! a scheduled tick that finds it taken is dropped, a manual refresh waits
//! for it. Results are applied only while the session that issued the fetch
//! is still the current one; anything else is discarded as stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::address::Address;
use crate::error::WatchError;
use crate::fetcher::ChainDataFetcher;
use crate::view::WalletView;

/// What the presentation layer should currently show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No address yet
    Empty,
    /// A user-initiated fetch is running
    Loading(Address),
    Ready(WalletView),
    /// A user-initiated fetch failed; zero balance and no transactions
    Unavailable { view: WalletView, error: String },
}

impl DisplayState {
    pub fn address(&self) -> Option<&Address> {
        match self {
            DisplayState::Empty => None,
            DisplayState::Loading(address) => Some(address),
            DisplayState::Ready(view) | DisplayState::Unavailable { view, .. } => {
                Some(&view.address)
            }
        }
    }

    pub fn view(&self) -> Option<&WalletView> {
        match self {
            DisplayState::Ready(view) | DisplayState::Unavailable { view, .. } => Some(view),
            DisplayState::Empty | DisplayState::Loading(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading(_))
    }
}

/// Result of one refresh attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fetched data was applied to the display
    Applied(WalletView),
    /// Scheduled tick dropped because a fetch was already in flight
    Skipped,
    /// The session was replaced before the result arrived
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    Scheduled,
    Manual,
}

/// One polled address: its timer and its single-flight slot
pub struct PollingSession {
    id: u64,
    address: Address,
    interval: Duration,
    flight: Arc<Semaphore>,
    cancel: CancellationToken,
    timer: Option<JoinHandle<()>>,
}

impl PollingSession {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        !self.cancel.is_cancelled()
            && self
                .timer
                .as_ref()
                .is_some_and(|timer| !timer.is_finished())
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.flight.available_permits() == 0
    }

    fn disarm(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PollingSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Shared {
    fetcher: Arc<dyn ChainDataFetcher>,
    interval: Duration,
    session: Mutex<Option<PollingSession>>,
    next_id: AtomicU64,
    display: watch::Sender<DisplayState>,
}

/// Drives periodic refresh for the current address
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct PollingController {
    shared: Arc<Shared>,
}

impl PollingController {
    pub fn new(fetcher: Arc<dyn ChainDataFetcher>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            log::warn!("Polling interval must be positive, using 1ms");
            Duration::from_millis(1)
        } else {
            interval
        };
        let (display, _) = watch::channel(DisplayState::Empty);

        Self {
            shared: Arc::new(Shared {
                fetcher,
                interval,
                session: Mutex::new(None),
                next_id: AtomicU64::new(0),
                display,
            }),
        }
    }

    /// Replace the current session with one for `address`
    ///
    /// Disarms any previous timer, fetches once immediately, and keeps
    /// refreshing every interval until stopped or replaced.
    pub async fn start(&self, address: Address) -> Result<RefreshOutcome, WatchError> {
        let id = self.arm(address);
        self.shared.refresh(id, FetchMode::Manual).await
    }

    /// Disarm the current session
    ///
    /// A fetch already in flight runs to completion; its result is discarded.
    pub fn stop(&self) {
        if let Some(session) = self.shared.lock_session().take() {
            log::info!(
                "Stopped polling {} (session {})",
                session.address,
                session.id
            );
            session.disarm();
        }
    }

    /// User-initiated refresh of the current session
    ///
    /// Shows the loading state right away, then waits for the single-flight
    /// slot if a scheduled fetch holds it.
    pub async fn refresh(&self) -> Result<RefreshOutcome, WatchError> {
        let id = self
            .shared
            .lock_session()
            .as_ref()
            .map(|session| session.id)
            .ok_or(WatchError::NoAddress)?;
        self.shared.refresh(id, FetchMode::Manual).await
    }

    pub fn display(&self) -> DisplayState {
        self.shared.display.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.shared.display.subscribe()
    }

    pub fn current_address(&self) -> Option<Address> {
        self.shared
            .lock_session()
            .as_ref()
            .map(|session| session.address.clone())
    }

    pub fn session_id(&self) -> Option<u64> {
        self.shared.lock_session().as_ref().map(|session| session.id)
    }

    pub fn is_armed(&self) -> bool {
        self.shared
            .lock_session()
            .as_ref()
            .is_some_and(PollingSession::is_armed)
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.shared
            .lock_session()
            .as_ref()
            .is_some_and(PollingSession::is_fetch_in_flight)
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    fn arm(&self, address: Address) -> u64 {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let interval = self.shared.interval;
        let cancel = CancellationToken::new();

        let mut slot = self.shared.lock_session();
        if let Some(previous) = slot.take() {
            log::info!(
                "Replacing polling session {} for {}",
                previous.id,
                previous.address
            );
            previous.disarm();
        }

        let timer = tokio::spawn(poll_loop(
            Arc::downgrade(&self.shared),
            id,
            interval,
            cancel.clone(),
        ));

        log::info!("🔄 Polling {} every {:?} (session {})", address, interval, id);
        *slot = Some(PollingSession {
            id,
            address,
            interval,
            flight: Arc::new(Semaphore::new(1)),
            cancel,
            timer: Some(timer),
        });
        id
    }
}

impl Shared {
    fn lock_session(&self) -> MutexGuard<'_, Option<PollingSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Address and flight slot of session `id`, while it is current
    fn current(&self, id: u64) -> Option<(Address, Arc<Semaphore>)> {
        self.lock_session()
            .as_ref()
            .filter(|session| session.id == id)
            .map(|session| (session.address.clone(), Arc::clone(&session.flight)))
    }

    /// Show `state` if session `id` is still current
    fn publish(&self, id: u64, state: DisplayState) -> bool {
        let slot = self.lock_session();
        if slot.as_ref().is_some_and(|session| session.id == id) {
            self.display.send_replace(state);
            true
        } else {
            false
        }
    }

    async fn refresh(&self, id: u64, mode: FetchMode) -> Result<RefreshOutcome, WatchError> {
        let Some((address, flight)) = self.current(id) else {
            return Ok(RefreshOutcome::Stale);
        };

        let _permit = match mode {
            FetchMode::Scheduled => match flight.try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    log::debug!("Fetch already in flight for {}, skipping tick", address);
                    return Ok(RefreshOutcome::Skipped);
                }
            },
            FetchMode::Manual => {
                if !self.publish(id, DisplayState::Loading(address.clone())) {
                    return Ok(RefreshOutcome::Stale);
                }
                match flight.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Ok(RefreshOutcome::Stale),
                }
            }
        };

        match self.fetcher.fetch(&address).await {
            Ok(raw) => {
                let view = WalletView::from_fetch(address, &raw);
                if self.publish(id, DisplayState::Ready(view.clone())) {
                    log::debug!(
                        "Applied {} transactions for {} (session {})",
                        view.transactions.len(),
                        view.address,
                        id
                    );
                    Ok(RefreshOutcome::Applied(view))
                } else {
                    log::debug!("Discarding stale result for {}", view.address);
                    Ok(RefreshOutcome::Stale)
                }
            }
            Err(err) => {
                if mode == FetchMode::Manual {
                    let fallback = DisplayState::Unavailable {
                        view: WalletView::empty(address.clone()),
                        error: err.to_string(),
                    };
                    if !self.publish(id, fallback) {
                        return Ok(RefreshOutcome::Stale);
                    }
                    log::error!("Error fetching address data for {}: {}", address, err);
                } else if self.current(id).is_none() {
                    return Ok(RefreshOutcome::Stale);
                }
                Err(err.into())
            }
        }
    }
}

async fn poll_loop(shared: Weak<Shared>, id: u64, interval: Duration, cancel: CancellationToken) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let Some(shared) = shared.upgrade() else { break };
                log::debug!("Polling for transactions (session {})", id);
                match shared.refresh(id, FetchMode::Scheduled).await {
                    Ok(RefreshOutcome::Stale) => break,
                    Ok(_) => {}
                    // Background failures keep the last good display
                    Err(e) => log::warn!("Background refresh failed (session {}): {}", id, e),
                }
            }
        }
    }

    log::debug!("Polling session {} disarmed", id);
}
