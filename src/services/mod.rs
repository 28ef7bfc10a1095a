/// HTTP health and readiness endpoints
pub mod health;
/// Periodic self-ping for sleeping hosts
pub mod keep_alive;
