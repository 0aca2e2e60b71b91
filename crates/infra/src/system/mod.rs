use chrono::Utc;

// Time is injected through this trait so that the reminder sweep and its
// tests can run against an arbitrary clock.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that reads the real clock, used outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
