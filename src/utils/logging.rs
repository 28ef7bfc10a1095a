use tracing::{debug, error, info, warn};

/// Logs an admin action with consistent format
pub fn log_admin_action(action: &str, admin_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("ADMIN: {} by {} - {}", action, admin_id, d),
        None => info!("ADMIN: {} by {}", action, admin_id),
    }
}

/// Logs an admin wizard step change
pub fn log_authoring_step(admin_id: i64, step: &str) {
    debug!("AUTHORING: admin {} now at {}", admin_id, step);
}

/// Logs a recorded guest response
pub fn log_guest_response(inv_id: &str, user_id: i64, name: &str, response: &str) {
    info!(
        "RSVP: {}({}) answered '{}' to invitation {}",
        name, user_id, response, inv_id
    );
}

/// Logs a rejected guest response
pub fn log_guest_rejected(inv_id: &str, user_id: i64, reason: &str) {
    warn!(
        "RSVP_REJECTED: user {} on invitation {} - {}",
        user_id, inv_id, reason
    );
}

/// Logs a non-admin user trying an admin action
pub fn log_unauthorized(action: &str, user: &str, user_id: i64) {
    warn!("UNAUTHORIZED: {} attempted by {}({})", action, user, user_id);
}

/// Logs a successful persistence write
pub fn log_store_write(operation: &str, sink: &str, key: &str) {
    debug!("STORE_WRITE: {} to {} - {}", operation, sink, key);
}

/// Logs a failed persistence operation
pub fn log_store_error(operation: &str, sink: &str, error: &str) {
    error!("STORE_ERROR: {} on {} failed: {}", operation, sink, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
