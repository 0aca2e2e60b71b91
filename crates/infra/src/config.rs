use tripline_utils::create_random_secret;
use tracing::{info, warn};

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

#[derive(Debug, Clone)]
pub struct Config {
    /// Api key that callers of the `/api/v1` routes must provide in the
    /// `Authorization` header
    pub api_secret_key: String,
    /// Optional secret gating the reminder trigger endpoint. When not
    /// configured the endpoint performs no access check.
    pub cron_secret: Option<String>,
    /// Port for the application to run on
    pub port: usize,
    /// How far ahead of now the reminder sweep looks for trips that are
    /// about to start
    pub reminder_lookahead_millis: i64,
    /// Upper bound on the wall clock time of a single sweep. When the
    /// deadline passes, in-flight reminders finish but no new ones are
    /// started; the rest is left for the next trigger.
    pub sweep_deadline_millis: i64,
    /// When set, an in-process job triggers the sweep at this interval in
    /// addition to the HTTP trigger. The reminder flag makes the overlap
    /// between the two triggers safe.
    pub reminder_job_interval_secs: Option<u64>,
    /// Mail transport settings. When absent, reminders are logged and
    /// dropped so that the service can still boot.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender: String,
}

impl Config {
    pub fn new() -> Self {
        let api_secret_key = match std::env::var("API_SECRET_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find API_SECRET_KEY environment variable. Going to create one.");
                let key = create_random_secret(30);
                info!("Api key for this instance was generated and set to: {}", key);
                key
            }
        };

        let cron_secret = std::env::var("CRON_SECRET").ok();
        if cron_secret.is_none() {
            warn!("CRON_SECRET is not set. The reminder trigger endpoint will not require a secret.");
        }

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let default_lookahead_days = 3;
        let lookahead_days = match std::env::var("REMINDER_LOOKAHEAD_DAYS") {
            Ok(days) => match days.parse::<i64>() {
                Ok(days) if days > 0 => days,
                _ => {
                    warn!(
                        "The given REMINDER_LOOKAHEAD_DAYS: {} is not valid, falling back to the default: {} days.",
                        days, default_lookahead_days
                    );
                    default_lookahead_days
                }
            },
            Err(_) => default_lookahead_days,
        };

        let default_sweep_deadline_millis = 50 * 1000;
        let sweep_deadline_millis = std::env::var("REMINDER_SWEEP_DEADLINE_MILLIS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(default_sweep_deadline_millis);

        let reminder_job_interval_secs = std::env::var("REMINDER_JOB_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0);

        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => {
                let port = std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse::<u16>().ok())
                    .unwrap_or(25);
                let sender = std::env::var("EMAIL_SENDER")
                    .unwrap_or_else(|_| "reminders@tripline.app".into());
                Some(SmtpConfig { host, port, sender })
            }
            Err(_) => None,
        };

        Self {
            api_secret_key,
            cron_secret,
            port,
            reminder_lookahead_millis: lookahead_days * DAY_MILLIS,
            sweep_deadline_millis,
            reminder_job_interval_secs,
            smtp,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
