//! Background notification source
//!
//! A ticker task periodically asks a `NotificationSource` for something to
//! deliver to the signed-in viewer. The stock source fires at random, which
//! keeps the demo feed moving without any other activity.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use forum_core::entities::{NewNotification, Notification, NotificationKind, Question, User};

use crate::services::{NotificationService, ServiceContext, ServiceResult};

/// Produces at most one notification per tick
pub trait NotificationSource: Send {
    fn poll(&mut self, viewer: &User, questions: &[Question]) -> Option<NewNotification>;
}

/// Fires with a fixed probability per tick about a random question
pub struct RandomNotificationSource<R = StdRng> {
    rng: R,
    probability: f64,
}

impl RandomNotificationSource<StdRng> {
    /// Source seeded from OS entropy
    pub fn from_entropy(probability: f64) -> Self {
        Self::new(StdRng::from_entropy(), probability)
    }

    /// Reproducible source
    pub fn seeded(seed: u64, probability: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), probability)
    }
}

impl<R: Rng> RandomNotificationSource<R> {
    /// `probability` is clamped to `0.0..=1.0`; NaN counts as zero
    pub fn new(rng: R, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { rng, probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

const KINDS: [NotificationKind; 3] = [
    NotificationKind::AnswerPosted,
    NotificationKind::Mention,
    NotificationKind::AnswerAccepted,
];

impl<R: Rng + Send> NotificationSource for RandomNotificationSource<R> {
    fn poll(&mut self, viewer: &User, questions: &[Question]) -> Option<NewNotification> {
        if questions.is_empty() || !self.rng.gen_bool(self.probability) {
            return None;
        }

        let question = questions.choose(&mut self.rng)?;
        let kind = *KINDS.choose(&mut self.rng)?;
        let message = match kind {
            NotificationKind::AnswerPosted => format!("New answer on \"{}\"", question.title),
            NotificationKind::Mention => {
                format!("@{} you were mentioned in \"{}\"", viewer.name, question.title)
            }
            NotificationKind::AnswerAccepted => {
                format!("Your answer on \"{}\" was accepted", question.title)
            }
        };

        Some(NewNotification::new(kind, message, question.id))
    }
}

/// Poll `source` once and deliver the result to the current viewer
///
/// # Errors
/// Returns an error if reading questions or writing the feed fails
pub async fn run_tick(
    ctx: &ServiceContext,
    source: &mut dyn NotificationSource,
) -> ServiceResult<Option<Notification>> {
    let Some(viewer) = ctx.viewer() else {
        return Ok(None);
    };

    let questions = ctx.question_repo().list_all().await?;
    let Some(content) = source.poll(&viewer, &questions) else {
        return Ok(None);
    };

    let notification = NotificationService::new(ctx).deliver(viewer.id, content).await?;
    debug!(notification_id = %notification.id, "Background notification delivered");
    Ok(Some(notification))
}

/// Drive `source` every `period` until the task is aborted
pub fn spawn_notification_ticker<S>(
    ctx: Arc<ServiceContext>,
    mut source: S,
    period: Duration,
) -> JoinHandle<()>
where
    S: NotificationSource + 'static,
{
    info!(period_ms = period.as_millis() as u64, "Starting background notifications");

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = run_tick(&ctx, &mut source).await {
                warn!(error = %e, "Background notification tick failed");
            }
        }
    })
}
