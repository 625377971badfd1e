//! The admin session flag and the password gate in front of it.
//!
//! This is cosmetic access control: one shared string compared for equality, and a flag that
//! anyone with access to the home directory can set. It only hides the admin panel.

use crate::store::KeyValue;
use crate::Result;
use std::sync::Arc;

const ADMIN_AUTH: &str = "adminAuth";

/// Compares a password attempt with the configured shared secret.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn check(&self, password: &str) -> bool {
        password == self.secret
    }
}

/// Session-scoped flags, cleared on logout.
#[derive(Debug, Clone)]
pub struct Session {
    storage: Arc<dyn KeyValue>,
}

impl Session {
    pub fn new(storage: impl KeyValue + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Whether the admin flag is set. An unreadable flag counts as unset.
    pub async fn is_admin(&self) -> bool {
        matches!(self.storage.get(ADMIN_AUTH).await, Ok(Some(v)) if v.trim() == "true")
    }

    pub async fn set_admin(&self) -> Result<()> {
        self.storage.set(ADMIN_AUTH, "true".to_string()).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.storage.remove(ADMIN_AUTH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn test_gate() {
        let gate = AdminGate::new("admin123");
        assert!(gate.check("admin123"));
        assert!(!gate.check("admin1234"));
        assert!(!gate.check(""));
    }

    #[tokio::test]
    async fn test_session_flag() {
        let session = Session::new(MemoryStorage::new());
        assert!(!session.is_admin().await);
        session.set_admin().await.unwrap();
        assert!(session.is_admin().await);
        session.clear().await.unwrap();
        assert!(!session.is_admin().await);
        session.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_session_flag_other_value() {
        let storage = MemoryStorage::new();
        storage.set(ADMIN_AUTH, "yes".into()).await.unwrap();
        assert!(!Session::new(storage).is_admin().await);
    }
}
