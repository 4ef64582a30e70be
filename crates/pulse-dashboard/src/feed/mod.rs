//! Simulated real-time feed.
//!
//! A background task stands in for a streaming connection: after a connect
//! delay it backfills the chart window, then emits one [`Sample`] per
//! interval. Roughly three samples in ten are alerts, which also produce a
//! [`Notification`].
//!
//! The task only sends [`FeedMessage`]s. The UI loop owns the [`FeedState`]
//! and applies them, so the bounded buffers are never shared.

mod buffers;

pub use buffers::{NotificationRing, SlidingWindow};

use crate::config::error::ConfigError;
use crate::config::schema::FeedConfig;
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Points kept in the chart window.
pub const DEFAULT_WINDOW: usize = 20;

/// Notifications kept in the ring.
pub const DEFAULT_NOTIFICATIONS: usize = 10;

/// Probability threshold above which a sample is an alert.
const ALERT_THRESHOLD: f64 = 0.7;

/// Direction of a value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The value went up.
    Increase,
    /// The value went down.
    Decrease,
}

impl Direction {
    /// Past-tense verb used in alert messages.
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Increase => "increased",
            Direction::Decrease => "decreased",
        }
    }
}

/// Whether a sample is routine or noteworthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Plain chart update.
    Update,
    /// Update that also raises a notification.
    Alert,
}

/// One point on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// When the value was observed.
    pub at: DateTime<Local>,
    /// Observed value, 0 to 99.
    pub value: u32,
}

impl DataPoint {
    /// `HH:MM:SS` label for chart axes.
    pub fn label(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// A message received from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Observed point.
    pub point: DataPoint,
    /// Update or alert.
    pub kind: SampleKind,
    /// Change direction reported with the value.
    pub direction: Direction,
}

/// An alert surfaced to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Monotonic id, unique within one feed.
    pub id: u64,
    /// Human-readable alert text.
    pub message: String,
    /// Change direction.
    pub direction: Direction,
    /// When the alert was raised.
    pub at: DateTime<Local>,
}

/// Messages sent from the feed task to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// The connection opened; `backfill` seeds the chart window.
    Connected {
        /// Points preceding the first live sample, oldest first.
        backfill: Vec<DataPoint>,
    },
    /// A live sample.
    Sample(Sample),
}

/// Feed state owned by the UI loop.
#[derive(Debug, Clone)]
pub struct FeedState {
    connected: bool,
    window: SlidingWindow<DataPoint>,
    notifications: NotificationRing<Notification>,
    next_notification_id: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_NOTIFICATIONS)
    }
}

impl FeedState {
    /// Empty, disconnected state with the given buffer capacities.
    pub fn new(window: usize, notifications: usize) -> Self {
        Self {
            connected: false,
            window: SlidingWindow::new(window),
            notifications: NotificationRing::new(notifications),
            next_notification_id: 0,
        }
    }

    /// Returns `true` once the connection has opened.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Chart points, oldest first.
    pub fn window(&self) -> &SlidingWindow<DataPoint> {
        &self.window
    }

    /// Alerts, newest first.
    pub fn notifications(&self) -> &NotificationRing<Notification> {
        &self.notifications
    }

    /// Applies one feed message.
    pub fn apply(&mut self, message: FeedMessage) {
        match message {
            FeedMessage::Connected { backfill } => {
                self.connected = true;
                self.window.clear();
                self.window.extend(backfill);
            }
            FeedMessage::Sample(sample) => self.push_sample(sample),
        }
    }

    fn push_sample(&mut self, sample: Sample) {
        if sample.kind == SampleKind::Alert {
            let id = self.next_notification_id;
            self.next_notification_id += 1;
            self.notifications.push(Notification {
                id,
                message: format!(
                    "Alert: Value has {} to {}",
                    sample.direction.verb(),
                    sample.point.value
                ),
                direction: sample.direction,
                at: sample.point.at,
            });
        }
        self.window.push(sample.point);
    }
}

/// Random sample source.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    /// Generator seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next live sample, stamped `at`.
    pub fn sample(&mut self, at: DateTime<Local>) -> Sample {
        let value = self.rng.gen_range(0..100);
        let kind = if self.rng.gen::<f64>() > ALERT_THRESHOLD {
            SampleKind::Alert
        } else {
            SampleKind::Update
        };
        let direction = if self.rng.gen::<f64>() > 0.5 {
            Direction::Increase
        } else {
            Direction::Decrease
        };
        Sample {
            point: DataPoint { at, value },
            kind,
            direction,
        }
    }

    /// `count` points one second apart, ending one second before `now`.
    pub fn backfill(&mut self, count: usize, now: DateTime<Local>) -> Vec<DataPoint> {
        (0..count)
            .map(|i| DataPoint {
                at: now - chrono::Duration::seconds((count - i) as i64),
                value: self.rng.gen_range(0..100),
            })
            .collect()
    }
}

/// Feed timing and buffer sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    /// Delay before the connection opens.
    pub connect_delay: Duration,
    /// Time between samples.
    pub interval: Duration,
    /// Chart window capacity; also the backfill size.
    pub window: usize,
    /// Notification ring capacity.
    pub notifications: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_secs(1),
            interval: Duration::from_secs(2),
            window: DEFAULT_WINDOW,
            notifications: DEFAULT_NOTIFICATIONS,
        }
    }
}

impl FeedSettings {
    /// Settings from the `[feed]` config section.
    pub fn from_config(config: &FeedConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            connect_delay: config.connect_delay()?,
            interval: config.interval()?,
            window: config.window,
            notifications: config.notifications,
        })
    }

    /// Empty state sized for these settings.
    pub fn initial_state(&self) -> FeedState {
        FeedState::new(self.window, self.notifications)
    }
}

/// Handle to a running feed task.
///
/// The task stops when [`FeedHandle::stop`] is called or the handle is
/// dropped.
#[derive(Debug)]
pub struct FeedHandle {
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Cancels the feed task.
    pub fn stop(self) {
        // Drop aborts.
    }

    /// Returns `true` once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("feed task stopped");
    }
}

/// Starts the feed task, delivering messages through `tx`.
///
/// The task exits on its own when the receiver is dropped.
pub fn spawn_feed(
    settings: FeedSettings,
    mut generator: SampleGenerator,
    tx: mpsc::Sender<FeedMessage>,
) -> FeedHandle {
    let task = tokio::spawn(async move {
        tokio::time::sleep(settings.connect_delay).await;
        let backfill = generator.backfill(settings.window, Local::now());
        if tx.send(FeedMessage::Connected { backfill }).await.is_err() {
            return;
        }
        tracing::info!("feed connected, sampling every {:?}", settings.interval);

        // interval() panics on a zero period
        let mut ticker = tokio::time::interval(settings.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let sample = generator.sample(Local::now());
            if sample.kind == SampleKind::Alert {
                tracing::debug!("feed alert: {:?} to {}", sample.direction, sample.point.value);
            }
            if tx.send(FeedMessage::Sample(sample)).await.is_err() {
                tracing::debug!("feed receiver closed");
                break;
            }
        }
    });
    FeedHandle { task }
}
