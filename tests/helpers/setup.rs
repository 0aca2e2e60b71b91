use std::sync::Arc;
use tripline_api::Application;
use tripline_infra::{InMemoryMailer, TriplineContext};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_CRON_SECRET: &str = "test-cron-secret";

pub struct TestApp {
    /// Shares the repositories with the running application so that tests
    /// can inspect store state directly
    pub ctx: TriplineContext,
    pub mailer: Arc<InMemoryMailer>,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = TriplineContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.api_secret_key = TEST_API_KEY.into();
    ctx.config.cron_secret = Some(TEST_CRON_SECRET.into());
    ctx.config.reminder_job_interval_secs = None;
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");
    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        ctx,
        mailer,
        address,
    }
}
