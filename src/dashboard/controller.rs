// Polling controller. Owns the refresh timer, the latest fetch, the filter
// state and the derived view.
//
// Lifecycle: `start` spawns a timer task whose first tick fires immediately;
// every tick spawns a detached refresh cycle. `stop` (or dropping the
// controller) aborts the timer only, so a cycle already in flight still
// lands. Overlapping cycles are not prevented; whichever finishes last
// wins. Filter changes recompute the view synchronously and never fetch.

use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::filters::{FilterState, Period};
use super::view::DashboardView;
use crate::config::DEFAULT_REFRESH_SECS;
use crate::interactions::samples::sample_interactions;
use crate::interactions::{Interaction, InteractionKind, Sentiment};
use crate::sheets::traits::InteractionSource;

/// Whether a refresh cycle is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Ready,
}

/// Where the current raw data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Rows fetched from the source.
    Live,
    /// The fixed sample dataset, shown because the source had nothing.
    Sample,
}

/// Point-in-time copy of the dashboard, safe to render or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub kind: InteractionKind,
    pub phase: Phase,
    pub origin: Option<DataOrigin>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Size of the raw set before filtering.
    pub raw_count: usize,
    pub filters: FilterState,
    pub view: DashboardView,
}

struct DashboardState {
    phase: Phase,
    raw: Vec<Interaction>,
    origin: Option<DataOrigin>,
    last_updated: Option<DateTime<Utc>>,
    filters: FilterState,
    view: DashboardView,
}

impl DashboardState {
    fn recompute(&mut self) {
        self.view = DashboardView::compute(&self.raw, &self.filters, Utc::now());
    }
}

/// State shared between the controller handle, the timer task, and any
/// refresh cycles still running.
struct Shared {
    kind: InteractionKind,
    state: RwLock<DashboardState>,
    updates: watch::Sender<u64>,
}

impl Shared {
    fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self) {
        self.updates.send_modify(|version| *version += 1);
    }

    fn set_phase(&self, phase: Phase) {
        self.write().phase = phase;
        self.notify();
    }

    fn update_filters(&self, f: impl FnOnce(&mut FilterState)) {
        {
            let mut state = self.write();
            f(&mut state.filters);
            state.recompute();
        }
        self.notify();
    }

    fn replace_raw(&self, raw: Vec<Interaction>, origin: DataOrigin) {
        {
            let mut state = self.write();
            state.raw = raw;
            state.origin = Some(origin);
            state.last_updated = Some(Utc::now());
            state.phase = Phase::Ready;
            state.recompute();
        }
        self.notify();
    }
}

/// One fetch-and-replace cycle.
///
/// An empty result or an error from the source both swap in the kind's
/// sample dataset.
async fn run_refresh(shared: Arc<Shared>, source: Arc<dyn InteractionSource>) {
    let kind = shared.kind;
    shared.set_phase(Phase::Loading);

    let (interactions, origin) = match source.fetch_interactions(kind).await {
        Ok(rows) if !rows.is_empty() => (rows, DataOrigin::Live),
        Ok(_) => {
            info!(kind = %kind, "Source returned no interactions, showing sample data");
            (sample_interactions(kind), DataOrigin::Sample)
        }
        Err(e) => {
            error!(kind = %kind, error = %e, "Failed to load interactions, showing sample data");
            (sample_interactions(kind), DataOrigin::Sample)
        }
    };

    debug!(kind = %kind, count = interactions.len(), ?origin, "Refresh cycle complete");
    shared.replace_raw(interactions, origin);
}

/// Live dashboard for one interaction kind.
pub struct DashboardController {
    shared: Arc<Shared>,
    source: Arc<dyn InteractionSource>,
    refresh_interval: Duration,
    timer: Option<JoinHandle<()>>,
}

impl DashboardController {
    /// Create a stopped controller. Nothing is fetched until `start` or
    /// `refresh` is called.
    pub fn new(kind: InteractionKind, source: Arc<dyn InteractionSource>) -> Self {
        let filters = FilterState::default();
        let state = DashboardState {
            phase: Phase::Loading,
            raw: Vec::new(),
            origin: None,
            last_updated: None,
            view: DashboardView::compute(&[], &filters, Utc::now()),
            filters,
        };
        let (updates, _) = watch::channel(0);

        Self {
            shared: Arc::new(Shared {
                kind,
                state: RwLock::new(state),
                updates,
            }),
            source,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            timer: None,
        }
    }

    /// Override the refresh period (default 30 seconds). Takes effect on the
    /// next `start`.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Start with these filters instead of the defaults.
    pub fn with_filters(self, filters: FilterState) -> Self {
        self.set_filters(filters);
        self
    }

    pub fn kind(&self) -> InteractionKind {
        self.shared.kind
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Start the refresh timer. The first refresh begins immediately.
    ///
    /// Must be called from within a tokio runtime. Calling it on a running
    /// controller does nothing.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }

        self.shared.set_phase(Phase::Loading);

        let shared = Arc::clone(&self.shared);
        let source = Arc::clone(&self.source);
        let period = self.refresh_interval;

        info!(
            kind = %shared.kind,
            refresh_secs = period.as_secs_f64(),
            "Starting dashboard refresh timer"
        );

        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tokio::spawn(run_refresh(Arc::clone(&shared), Arc::clone(&source)));
            }
        }));
    }

    /// Cancel the refresh timer. Refresh cycles already running are left to
    /// finish.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            info!(kind = %self.shared.kind, "Stopped dashboard refresh timer");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Run one refresh cycle now and wait for it.
    pub async fn refresh(&self) {
        run_refresh(Arc::clone(&self.shared), Arc::clone(&self.source)).await;
    }

    /// Replace the whole filter state.
    pub fn set_filters(&self, filters: FilterState) {
        self.shared.update_filters(|f| *f = filters);
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.shared.update_filters(|f| f.query = query);
    }

    pub fn set_period(&self, period: Period) {
        self.shared.update_filters(|f| f.period = period);
    }

    pub fn set_sentiment(&self, sentiment: Option<Sentiment>) {
        self.shared.update_filters(|f| f.sentiment = sentiment);
    }

    /// Reset every filter to its default.
    pub fn clear_filters(&self) {
        self.set_filters(FilterState::default());
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.shared.read();
        DashboardSnapshot {
            kind: self.shared.kind,
            phase: state.phase,
            origin: state.origin,
            last_updated: state.last_updated,
            raw_count: state.raw.len(),
            filters: state.filters.clone(),
            view: state.view.clone(),
        }
    }

    /// Receiver whose value bumps on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.updates.subscribe()
    }

    /// Hand every ready snapshot to `on_ready` until `shutdown` completes.
    ///
    /// `shutdown` is polled as one future for the whole loop, so a signal
    /// that arrives while `on_ready` runs is still seen.
    pub async fn watch_until<F>(&self, shutdown: F, mut on_ready: impl FnMut(&DashboardSnapshot))
    where
        F: Future<Output = ()>,
    {
        let mut updates = self.subscribe();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = self.snapshot();
                    if snapshot.phase == Phase::Ready {
                        on_ready(&snapshot);
                    }
                }
                _ = &mut shutdown => {
                    break;
                }
            }
        }
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.stop();
    }
}
