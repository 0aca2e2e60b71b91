use crate::error::TriplineError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{TimeZone, Utc};
use futures::future::join_all;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, warn};
use tripline_api_structs::send_itinerary_reminders::*;
use tripline_domain::{EmailMessage, Itinerary, User};
use tripline_infra::{Config, TriplineContext};

/// Upper bound on how long one transport send may block, so that a single
/// slow send cannot stall the whole sweep
const SEND_TIMEOUT: Duration = Duration::from_secs(10);
/// How many owner notifications are dispatched concurrently
const SEND_CONCURRENCY: usize = 10;
/// Upper bound on how many due itineraries one sweep picks up. Anything
/// above this is still unflagged and will be selected by the next trigger.
const SWEEP_BATCH_LIMIT: i64 = 500;

fn trigger_secret_matches(config: &Config, provided: Option<&str>) -> bool {
    match &config.cron_secret {
        Some(secret) => provided == Some(secret.as_str()),
        // No secret configured means the endpoint is open
        None => true,
    }
}

pub async fn send_itinerary_reminders_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TriplineContext>,
) -> Result<HttpResponse, TriplineError> {
    if !trigger_secret_matches(&ctx.config, query_params.secret.as_deref()) {
        return Err(TriplineError::Unauthorized(
            "Invalid or missing secret query parameter".into(),
        ));
    }

    let usecase = SendItineraryRemindersUseCase {};

    match execute(usecase, &ctx).await {
        Ok(report) => Ok(HttpResponse::Ok().json(APIResponse::new(report.processed))),
        Err(_) => Ok(HttpResponse::InternalServerError().json(APIErrorResponse::new())),
    }
}

/// Notifies owners of itineraries whose trip starts within the configured
/// look ahead window and flags each notified itinerary so that later sweeps
/// skip it. One failing itinerary never aborts the batch.
#[derive(Debug)]
pub struct SendItineraryRemindersUseCase {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepReport {
    /// Itineraries that were notified and flagged
    pub processed: usize,
    /// Itineraries that were selected but could not be completed. They stay
    /// unflagged and are retried by the next sweep.
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TriplineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendItineraryRemindersUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendItineraryReminders";

    async fn execute(&mut self, ctx: &TriplineContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let until = now + ctx.config.reminder_lookahead_millis;
        let deadline = now + ctx.config.sweep_deadline_millis;

        // Only the selection query is fatal. Without it there is nothing
        // that can be processed safely.
        let due = ctx
            .repos
            .itineraries
            .find_due_for_reminder(now, until, SWEEP_BATCH_LIMIT)
            .await
            .map_err(|e| {
                error!("Querying due itineraries failed: {:?}", e);
                UseCaseError::StorageError
            })?;
        if due.len() as i64 == SWEEP_BATCH_LIMIT {
            warn!(
                "Sweep batch limit of {} reached, remaining due itineraries are deferred to the next trigger",
                SWEEP_BATCH_LIMIT
            );
        }

        let selected = due.len();
        let mut processed = 0;

        for chunk in due.chunks(SEND_CONCURRENCY) {
            if ctx.sys.get_timestamp_millis() >= deadline {
                warn!(
                    "Sweep deadline reached, {} due itineraries are deferred to the next trigger",
                    selected - processed
                );
                break;
            }

            let outcomes = join_all(chunk.iter().map(|itinerary| notify_owner(itinerary, now, ctx))).await;
            processed += outcomes.into_iter().filter(|notified| *notified).count();
        }

        Ok(SweepReport {
            processed,
            failed: selected - processed,
        })
    }
}

async fn notify_owner(itinerary: &Itinerary, now: i64, ctx: &TriplineContext) -> bool {
    let owner = match ctx.repos.users.find(&itinerary.user_id).await {
        Some(owner) => owner,
        None => {
            warn!(
                "Owner: {} of itinerary: {} no longer exists, not sending a reminder",
                itinerary.user_id, itinerary.id
            );
            return false;
        }
    };

    let message = render_reminder(itinerary, &owner, now);
    match timeout(SEND_TIMEOUT, ctx.mailer.send(&message)).await {
        Ok(Ok(())) => (),
        Ok(Err(e)) => {
            error!(
                "Sending reminder for itinerary: {} failed: {:?}",
                itinerary.id, e
            );
            return false;
        }
        Err(_) => {
            error!(
                "Sending reminder for itinerary: {} timed out after {:?}",
                itinerary.id, SEND_TIMEOUT
            );
            return false;
        }
    }

    // The flag is only set after the transport confirmed the send. When this
    // update fails the next sweep sends a duplicate reminder, which is
    // acceptable; a flagged itinerary whose owner was never notified is not.
    if let Err(e) = ctx.repos.itineraries.mark_reminder_sent(&itinerary.id).await {
        error!(
            "Reminder for itinerary: {} was sent but the itinerary could not be flagged: {:?}",
            itinerary.id, e
        );
        return false;
    }

    true
}

fn render_reminder(itinerary: &Itinerary, owner: &User, now: i64) -> EmailMessage {
    let start_date = Utc.timestamp_millis(itinerary.start_ts).format("%Y-%m-%d");
    let when = match itinerary.days_until_start(now) {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        days => format!("in {} days", days),
    };

    EmailMessage {
        to: owner.email.clone(),
        subject: format!("Your trip \"{}\" starts {}", itinerary.title, when),
        body: format!(
            "Hi {},\n\nYour trip \"{}\" to {} starts {} on {}.\n\nHave a great journey!\nThe Tripline team",
            owner.full_name, itinerary.title, itinerary.destination, when, start_date
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use tripline_domain::ID;
    use tripline_infra::{DeleteResult, IItineraryRepo, ISys, InMemoryMailer};

    const DAY: i64 = 1000 * 60 * 60 * 24;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn setup(now: i64) -> (TriplineContext, Arc<InMemoryMailer>) {
        let mut ctx = TriplineContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now));
        ctx.config.reminder_lookahead_millis = 3 * DAY;
        ctx.config.sweep_deadline_millis = 50 * 1000;
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        (ctx, mailer)
    }

    async fn insert_user(ctx: &TriplineContext, email: &str) -> User {
        let user = User::new(email.into(), "Globetrotter".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    async fn insert_itinerary(
        ctx: &TriplineContext,
        user: &User,
        start_ts: i64,
        reminder_sent: bool,
    ) -> Itinerary {
        let itinerary = Itinerary {
            id: Default::default(),
            user_id: user.id.clone(),
            title: "Island hopping".into(),
            destination: "Cyclades".into(),
            start_ts,
            end_ts: start_ts + 7 * DAY,
            reminder_sent,
            created: 0,
            updated: 0,
        };
        ctx.repos.itineraries.insert(&itinerary).await.unwrap();
        itinerary
    }

    async fn run_sweep(ctx: &TriplineContext) -> SweepReport {
        execute(SendItineraryRemindersUseCase {}, ctx)
            .await
            .expect("Sweep to complete")
    }

    #[actix_web::main]
    #[test]
    async fn notifies_only_due_itineraries() {
        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (ctx, mailer) = setup(now);
        let user = insert_user(&ctx, "globetrotter@example.com").await;

        let due = insert_itinerary(
            &ctx,
            &user,
            Utc.ymd(2024, 6, 2).and_hms(0, 0, 0).timestamp_millis(),
            false,
        )
        .await;
        let too_far = insert_itinerary(
            &ctx,
            &user,
            Utc.ymd(2024, 6, 10).and_hms(0, 0, 0).timestamp_millis(),
            false,
        )
        .await;
        let already_notified = insert_itinerary(
            &ctx,
            &user,
            Utc.ymd(2024, 6, 2).and_hms(0, 0, 0).timestamp_millis(),
            true,
        )
        .await;

        let report = run_sweep(&ctx).await;
        assert_eq!(report, SweepReport { processed: 1, failed: 0 });

        assert!(ctx.repos.itineraries.find(&due.id).await.unwrap().reminder_sent);
        assert!(!ctx.repos.itineraries.find(&too_far.id).await.unwrap().reminder_sent);
        assert!(ctx
            .repos
            .itineraries
            .find(&already_notified.id)
            .await
            .unwrap()
            .reminder_sent);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "globetrotter@example.com");
        assert!(sent[0].subject.contains("Island hopping"));
        assert!(sent[0].subject.contains("tomorrow"));
        assert!(sent[0].body.contains("2024-06-02"));
    }

    #[actix_web::main]
    #[test]
    async fn running_twice_does_not_notify_again() {
        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (ctx, mailer) = setup(now);
        let user = insert_user(&ctx, "globetrotter@example.com").await;
        insert_itinerary(&ctx, &user, now + DAY, false).await;

        let first = run_sweep(&ctx).await;
        assert_eq!(first, SweepReport { processed: 1, failed: 0 });

        let second = run_sweep(&ctx).await;
        assert_eq!(second, SweepReport { processed: 0, failed: 0 });
        assert_eq!(mailer.sent_count(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn one_failing_notification_does_not_abort_the_batch() {
        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (ctx, mailer) = setup(now);
        let flaky = insert_user(&ctx, "flaky@example.com").await;
        let stable = insert_user(&ctx, "stable@example.com").await;
        let flaky_trip = insert_itinerary(&ctx, &flaky, now + DAY, false).await;
        let stable_trip = insert_itinerary(&ctx, &stable, now + 2 * DAY, false).await;
        mailer.reject_recipient("flaky@example.com");

        let report = run_sweep(&ctx).await;
        assert_eq!(report, SweepReport { processed: 1, failed: 1 });
        assert!(!ctx.repos.itineraries.find(&flaky_trip.id).await.unwrap().reminder_sent);
        assert!(ctx.repos.itineraries.find(&stable_trip.id).await.unwrap().reminder_sent);

        // The failed itinerary is retried once the transport recovers
        mailer.clear_rejects();
        let report = run_sweep(&ctx).await;
        assert_eq!(report, SweepReport { processed: 1, failed: 0 });
        assert!(ctx.repos.itineraries.find(&flaky_trip.id).await.unwrap().reminder_sent);
        assert_eq!(mailer.sent_count(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn missing_owner_counts_as_failed() {
        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (ctx, mailer) = setup(now);
        let ghost = User::new("ghost@example.com".into(), "Ghost".into(), 0);
        // The owner is never inserted
        insert_itinerary(&ctx, &ghost, now + DAY, false).await;

        let report = run_sweep(&ctx).await;
        assert_eq!(report, SweepReport { processed: 0, failed: 1 });
        assert_eq!(mailer.sent_count(), 0);
    }

    /// Store wrapper whose reminder flag updates always fail
    struct BrokenFlagItineraryRepo {
        inner: Arc<dyn IItineraryRepo>,
    }

    #[async_trait::async_trait]
    impl IItineraryRepo for BrokenFlagItineraryRepo {
        async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
            self.inner.insert(itinerary).await
        }
        async fn save(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
            self.inner.save(itinerary).await
        }
        async fn find(&self, itinerary_id: &ID) -> Option<Itinerary> {
            self.inner.find(itinerary_id).await
        }
        async fn find_by_user(&self, user_id: &ID) -> Vec<Itinerary> {
            self.inner.find_by_user(user_id).await
        }
        async fn find_due_for_reminder(
            &self,
            from: i64,
            until: i64,
            limit: i64,
        ) -> anyhow::Result<Vec<Itinerary>> {
            self.inner.find_due_for_reminder(from, until, limit).await
        }
        async fn mark_reminder_sent(&self, _itinerary_id: &ID) -> anyhow::Result<()> {
            anyhow::bail!("flag update failure")
        }
        async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary> {
            self.inner.delete(itinerary_id).await
        }
        async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
            self.inner.delete_by_user(user_id).await
        }
    }

    #[actix_web::main]
    #[test]
    async fn failing_flag_update_counts_as_failed_but_still_sends() {
        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (mut ctx, mailer) = setup(now);
        ctx.repos.itineraries = Arc::new(BrokenFlagItineraryRepo {
            inner: ctx.repos.itineraries.clone(),
        });
        let user = insert_user(&ctx, "globetrotter@example.com").await;
        let itinerary = insert_itinerary(&ctx, &user, now + DAY, false).await;

        let report = run_sweep(&ctx).await;
        // At-least-once: the email went out, the itinerary stays unflagged
        // and will be retried by the next sweep.
        assert_eq!(report, SweepReport { processed: 0, failed: 1 });
        assert_eq!(mailer.sent_count(), 1);
        assert!(!ctx.repos.itineraries.find(&itinerary.id).await.unwrap().reminder_sent);
    }

    #[actix_web::main]
    #[test]
    async fn fatal_selection_error_is_surfaced() {
        struct BrokenSelectionRepo {
            inner: Arc<dyn IItineraryRepo>,
        }

        #[async_trait::async_trait]
        impl IItineraryRepo for BrokenSelectionRepo {
            async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
                self.inner.insert(itinerary).await
            }
            async fn save(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
                self.inner.save(itinerary).await
            }
            async fn find(&self, itinerary_id: &ID) -> Option<Itinerary> {
                self.inner.find(itinerary_id).await
            }
            async fn find_by_user(&self, user_id: &ID) -> Vec<Itinerary> {
                self.inner.find_by_user(user_id).await
            }
            async fn find_due_for_reminder(
                &self,
                _from: i64,
                _until: i64,
                _limit: i64,
            ) -> anyhow::Result<Vec<Itinerary>> {
                anyhow::bail!("store unavailable")
            }
            async fn mark_reminder_sent(&self, itinerary_id: &ID) -> anyhow::Result<()> {
                self.inner.mark_reminder_sent(itinerary_id).await
            }
            async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary> {
                self.inner.delete(itinerary_id).await
            }
            async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
                self.inner.delete_by_user(user_id).await
            }
        }

        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (mut ctx, mailer) = setup(now);
        ctx.repos.itineraries = Arc::new(BrokenSelectionRepo {
            inner: ctx.repos.itineraries.clone(),
        });

        let res = execute(SendItineraryRemindersUseCase {}, &ctx).await;
        assert!(matches!(res.unwrap_err(), UseCaseError::StorageError));
        assert_eq!(mailer.sent_count(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn exhausted_deadline_defers_unstarted_items() {
        let now = Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis();
        let (mut ctx, mailer) = setup(now);
        // The budget is already spent when the sweep starts
        ctx.config.sweep_deadline_millis = 0;
        let user = insert_user(&ctx, "globetrotter@example.com").await;
        let itinerary = insert_itinerary(&ctx, &user, now + DAY, false).await;

        let report = run_sweep(&ctx).await;
        assert_eq!(report, SweepReport { processed: 0, failed: 1 });
        assert_eq!(mailer.sent_count(), 0);
        assert!(!ctx.repos.itineraries.find(&itinerary.id).await.unwrap().reminder_sent);
    }

    #[test]
    fn trigger_secret_check() {
        let mut config = Config::new();

        config.cron_secret = Some("abc".into());
        assert!(trigger_secret_matches(&config, Some("abc")));
        assert!(!trigger_secret_matches(&config, Some("wrong")));
        assert!(!trigger_secret_matches(&config, None));

        config.cron_secret = None;
        assert!(trigger_secret_matches(&config, None));
        assert!(trigger_secret_matches(&config, Some("anything")));
    }

    #[test]
    fn renders_days_until_start() {
        let now = Utc.ymd(2024, 6, 1).and_hms(12, 0, 0).timestamp_millis();
        let owner = User::new("globetrotter@example.com".into(), "Globetrotter".into(), 0);
        let mut itinerary = Itinerary {
            id: Default::default(),
            user_id: owner.id.clone(),
            title: "Island hopping".into(),
            destination: "Cyclades".into(),
            start_ts: now + 3 * DAY,
            end_ts: now + 10 * DAY,
            reminder_sent: false,
            created: 0,
            updated: 0,
        };

        let message = render_reminder(&itinerary, &owner, now);
        assert_eq!(message.to, "globetrotter@example.com");
        assert!(message.subject.contains("in 3 days"));
        assert!(message.body.contains("Cyclades"));

        itinerary.start_ts = now;
        let message = render_reminder(&itinerary, &owner, now);
        assert!(message.subject.contains("starts today"));
    }
}
