use punchcard_core::rate_limit::PinRateLimiter;
use sea_orm::DatabaseConnection;

/// Shared application state
pub struct AppState {
    /// Sea-ORM database connection pool
    pub db: DatabaseConnection,

    /// Per-employee wrong-PIN throttle.
    ///
    /// Process-local: counters reset on restart and are not shared between
    /// instances. Single-instance deployments only.
    pub rate_limiter: PinRateLimiter,
}
