//! Process-wide tenant selection.
//!
//! The selected tenant (fire department / organization) is written by the
//! tenant picker and read by the HTTP transport, which attaches it to every
//! outgoing request. This is the only process-wide mutable state in the
//! client; it is reachable only through the accessors below.

use once_cell::sync::Lazy;
use std::sync::RwLock;
use tracing::info;

static CURRENT_TENANT: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// Select the tenant attached to subsequent requests.
pub fn set_current_tenant(tenant_id: impl Into<String>) {
    let tenant_id = tenant_id.into();
    if let Ok(mut current) = CURRENT_TENANT.write() {
        info!(tenant = %tenant_id, "Tenant selected");
        *current = Some(tenant_id);
    }
}

/// The currently selected tenant, if any.
///
/// A poisoned lock reads as "no tenant".
pub fn current_tenant() -> Option<String> {
    CURRENT_TENANT
        .read()
        .ok()
        .and_then(|current| current.clone())
}

/// Forget the selected tenant.
pub fn clear_current_tenant() {
    if let Ok(mut current) = CURRENT_TENANT.write() {
        if current.take().is_some() {
            info!("Tenant cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests share the process-wide cell
    static TENANT_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_and_read_tenant() {
        let _guard = TENANT_MUTEX.lock().unwrap();
        set_current_tenant("ff-north");
        assert_eq!(current_tenant(), Some("ff-north".to_string()));
        clear_current_tenant();
    }

    #[test]
    fn test_clear_tenant() {
        let _guard = TENANT_MUTEX.lock().unwrap();
        set_current_tenant("ff-south");
        clear_current_tenant();
        assert_eq!(current_tenant(), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let _guard = TENANT_MUTEX.lock().unwrap();
        set_current_tenant("first");
        set_current_tenant("second");
        assert_eq!(current_tenant(), Some("second".to_string()));
        clear_current_tenant();
    }
}
