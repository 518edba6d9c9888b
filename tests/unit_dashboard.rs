// Unit tests for the dashboard controller.
//
// Fake sources stand in for the spreadsheet so the tests can count fetches
// and control failures. Timer tests run on a paused tokio clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use igpulse::dashboard::{DashboardController, DataOrigin, FilterState, Period, Phase};
use igpulse::interactions::samples::{sample_comments, sample_direct_messages};
use igpulse::interactions::{Interaction, InteractionKind, Sentiment};
use igpulse::sheets::traits::{EmptySource, InteractionSource};

enum Behavior {
    Rows(Vec<Interaction>),
    Fail,
    Slow(Duration, Vec<Interaction>),
}

struct FakeSource {
    calls: AtomicUsize,
    behavior: Behavior,
}

impl FakeSource {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            behavior,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InteractionSource for FakeSource {
    async fn fetch_interactions(&self, _kind: InteractionKind) -> Result<Vec<Interaction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Rows(rows) => Ok(rows.clone()),
            Behavior::Fail => anyhow::bail!("sheet unavailable"),
            Behavior::Slow(delay, rows) => {
                tokio::time::sleep(*delay).await;
                Ok(rows.clone())
            }
        }
    }
}

/// A DM from `hours_ago` hours before now.
fn recent(profile_id: &str, handle: &str, text: &str, sentiment: Sentiment, hours_ago: i64) -> Interaction {
    let at = Utc::now() - chrono::Duration::hours(hours_ago);
    Interaction {
        kind: InteractionKind::DirectMessage,
        profile_id: profile_id.to_string(),
        handle: (!handle.is_empty()).then(|| handle.to_string()),
        text: text.to_string(),
        date: at.format("%Y-%m-%d").to_string(),
        time: at.format("%H:%M").to_string(),
        timestamp: at.to_rfc3339(),
        sentiment: Some(sentiment),
    }
}

fn live_rows() -> Vec<Interaction> {
    vec![
        recent("1", "maria", "entrega rápida, adorei", Sentiment::Positive, 1),
        recent("1", "maria", "entrega chegou hoje", Sentiment::Positive, 2),
        recent("2", "joao", "pedido atrasado", Sentiment::Negative, 3),
        recent("3", "", "qual prazo entrega", Sentiment::Neutral, 4),
        recent("4", "bia", "cupom acabou", Sentiment::Neutral, 24 * 20),
        recent("5", "caio", "pedido antigo", Sentiment::Negative, 24 * 60),
        recent("6", "dani", "muito bom", Sentiment::Positive, 5),
        recent("7", "edu", "voltarei", Sentiment::Positive, 6),
        recent("8", "fabi", "ótimo atendimento", Sentiment::Positive, 7),
    ]
}

fn all_time() -> FilterState {
    FilterState {
        period: Period::All,
        ..FilterState::default()
    }
}

// ============================================================
// Refresh cycle and fallback
// ============================================================

#[tokio::test]
async fn empty_source_falls_back_to_samples() {
    let controller = DashboardController::new(InteractionKind::DirectMessage, Arc::new(EmptySource))
        .with_filters(all_time());

    controller.refresh().await;

    let snap = controller.snapshot();
    assert_eq!(snap.phase, Phase::Ready);
    assert_eq!(snap.origin, Some(DataOrigin::Sample));
    assert!(snap.last_updated.is_some());
    assert_eq!(snap.raw_count, sample_direct_messages().len());
    assert_eq!(snap.view.metrics.total, 3);
    assert_eq!(snap.view.metrics.positive, 1);
    assert_eq!(snap.view.metrics.neutral, 1);
    assert_eq!(snap.view.metrics.negative, 1);
    assert!((snap.view.metrics.sentiment_index - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn failing_source_falls_back_to_samples() {
    let source = FakeSource::new(Behavior::Fail);
    let controller = DashboardController::new(InteractionKind::Comment, source.clone())
        .with_filters(all_time());

    controller.refresh().await;

    let snap = controller.snapshot();
    assert_eq!(source.calls(), 1);
    assert_eq!(snap.phase, Phase::Ready);
    assert_eq!(snap.origin, Some(DataOrigin::Sample));
    assert_eq!(snap.raw_count, sample_comments().len());
    assert!(snap
        .view
        .interactions
        .iter()
        .all(|i| i.kind == InteractionKind::Comment));
}

#[tokio::test]
async fn old_samples_drop_out_of_default_period() {
    // The sample rows are dated in the past, beyond the 30-day default
    let controller = DashboardController::new(InteractionKind::DirectMessage, Arc::new(EmptySource));

    controller.refresh().await;

    let snap = controller.snapshot();
    assert_eq!(snap.origin, Some(DataOrigin::Sample));
    assert_eq!(snap.raw_count, 3);
    assert!(snap.view.interactions.is_empty());
    assert_eq!(snap.view.metrics.total, 0);
}

#[tokio::test]
async fn live_rows_are_filtered_and_summarized() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let controller = DashboardController::new(InteractionKind::DirectMessage, source.clone());

    controller.refresh().await;

    let snap = controller.snapshot();
    assert_eq!(snap.origin, Some(DataOrigin::Live));
    assert_eq!(snap.raw_count, 9);
    // Default 30-day window drops only the 60-day-old row
    assert_eq!(snap.view.interactions.len(), 8);
    assert_eq!(snap.view.metrics.total, 8);
    assert!(snap.view.ranking.len() <= 5);
    assert_eq!(snap.view.ranking[0].profile_id, "1");
    assert_eq!(snap.view.ranking[0].total_interactions, 2);
    assert!(snap.view.topics.len() <= 3);
    assert_eq!(snap.view.topics[0], "entrega");

    let most_active = snap.view.metrics.most_active.as_ref().unwrap();
    assert_eq!(most_active.display_name(), "@maria");
}

// ============================================================
// Filters
// ============================================================

#[tokio::test]
async fn filter_changes_recompute_without_fetching() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let controller = DashboardController::new(InteractionKind::DirectMessage, source.clone());
    controller.refresh().await;
    assert_eq!(source.calls(), 1);

    controller.set_period(Period::Today);
    assert_eq!(controller.snapshot().view.interactions.len(), 7);

    controller.set_sentiment(Some(Sentiment::Positive));
    let snap = controller.snapshot();
    assert_eq!(snap.view.metrics.total, 5);
    assert_eq!(snap.view.metrics.positive, 5);

    controller.set_query("@MARIA");
    assert_eq!(controller.snapshot().view.interactions.len(), 2);

    controller.clear_filters();
    let snap = controller.snapshot();
    assert_eq!(snap.filters, FilterState::default());
    assert_eq!(snap.view.interactions.len(), 8);

    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn query_matches_profile_id_substring() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let controller = DashboardController::new(InteractionKind::DirectMessage, source);
    controller.refresh().await;

    controller.set_query("3");
    let snap = controller.snapshot();
    assert_eq!(snap.view.interactions.len(), 1);
    assert!(snap.view.interactions[0].handle.is_none());
}

#[tokio::test]
async fn refresh_publishes_updates() {
    let controller = DashboardController::new(InteractionKind::Comment, Arc::new(EmptySource));
    let mut updates = controller.subscribe();
    let before = *updates.borrow_and_update();

    controller.refresh().await;

    assert!(updates.has_changed().unwrap());
    // One bump entering Loading, one when the data lands
    assert_eq!(*updates.borrow_and_update(), before + 2);
}

// ============================================================
// Refresh timer (paused clock)
// ============================================================

#[tokio::test(start_paused = true)]
async fn timer_fetches_immediately_then_every_period() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let mut controller = DashboardController::new(InteractionKind::DirectMessage, source.clone())
        .with_refresh_interval(Duration::from_secs(30));

    controller.start();
    assert!(controller.is_running());

    // Ticks at 0s, 30s, 60s, 90s
    tokio::time::sleep(Duration::from_secs(95)).await;
    assert_eq!(source.calls(), 4);
    assert_eq!(controller.snapshot().origin, Some(DataOrigin::Live));

    controller.stop();
    assert!(!controller.is_running());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(source.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn start_twice_keeps_one_timer() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let mut controller = DashboardController::new(InteractionKind::DirectMessage, source.clone())
        .with_refresh_interval(Duration::from_secs(30));

    controller.start();
    controller.start();

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(source.calls(), 2);
    controller.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_lets_in_flight_refresh_finish() {
    let source = FakeSource::new(Behavior::Slow(Duration::from_secs(10), live_rows()));
    let mut controller = DashboardController::new(InteractionKind::DirectMessage, source.clone())
        .with_refresh_interval(Duration::from_secs(30));

    controller.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.calls(), 1);
    assert_eq!(controller.snapshot().phase, Phase::Loading);

    controller.stop();
    tokio::time::sleep(Duration::from_secs(20)).await;

    let snap = controller.snapshot();
    assert_eq!(source.calls(), 1);
    assert_eq!(snap.phase, Phase::Ready);
    assert_eq!(snap.origin, Some(DataOrigin::Live));
}

#[tokio::test(start_paused = true)]
async fn watch_until_renders_each_ready_state_and_honors_shutdown() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let mut controller = DashboardController::new(InteractionKind::DirectMessage, source.clone())
        .with_refresh_interval(Duration::from_secs(30));
    controller.start();

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let mut tx = Some(tx);
    let mut renders = 0;

    // Shutdown is signalled from inside the second render
    controller
        .watch_until(
            async {
                let _ = rx.await;
            },
            |snap| {
                assert_eq!(snap.phase, Phase::Ready);
                renders += 1;
                if renders == 2 {
                    if let Some(tx) = tx.take() {
                        let _ = tx.send(());
                    }
                }
            },
        )
        .await;

    assert_eq!(renders, 2);
    assert_eq!(source.calls(), 2);
    controller.stop();
}

#[tokio::test(start_paused = true)]
async fn dropping_controller_stops_timer() {
    let source = FakeSource::new(Behavior::Rows(live_rows()));
    let mut controller = DashboardController::new(InteractionKind::Comment, source.clone())
        .with_refresh_interval(Duration::from_secs(30));

    controller.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    drop(controller);

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(source.calls(), 1);
}
