use crate::reminder::SendItineraryRemindersUseCase;
use crate::shared::usecase::execute;
use std::time::Duration;
use tracing::info;
use tripline_infra::TriplineContext;

/// Deployments without an external cron scheduler can set
/// REMINDER_JOB_INTERVAL_SECS to run the sweep in-process instead. The
/// reminder flag keeps overlapping triggers from double notifying.
pub fn start_reminder_sweep_job(ctx: TriplineContext) {
    let interval_secs = match ctx.config.reminder_job_interval_secs {
        Some(secs) => secs,
        None => return,
    };

    info!(
        "Starting in-process reminder sweep job with an interval of {} seconds",
        interval_secs
    );
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;

            let usecase = SendItineraryRemindersUseCase {};
            if let Ok(report) = execute(usecase, &ctx).await {
                info!(
                    "Reminder sweep job processed {} itineraries ({} failed)",
                    report.processed, report.failed
                );
            }
        }
    });
}
