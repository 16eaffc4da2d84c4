// File: ./src/session.rs
// Who is signed in on this machine.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use crate::store::EventStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Authenticated identity attached to an upload or a dashboard request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(anyhow::anyhow!("'{}' is not a valid email address", email)),
    }
}

/// Signs in as `email`, creating the account on first use.
pub fn login(ctx: &dyn AppContext, store: &dyn EventStore, email: &str) -> Result<Identity> {
    let email = validate_email(email)?;
    let account = store.find_or_create_account(email)?;
    let identity = Identity {
        user_id: account.id,
        email: account.email,
    };

    let path = ctx.get_session_path()?;
    LocalStorage::with_lock(&path, || {
        let json = serde_json::to_string_pretty(&identity)?;
        LocalStorage::atomic_write(&path, json)?;
        Ok(())
    })?;
    log::info!("Signed in as {}", identity.email);
    Ok(identity)
}

/// `None` when nobody is signed in.
pub fn current(ctx: &dyn AppContext) -> Result<Option<Identity>> {
    let path = ctx.get_session_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let identity = LocalStorage::with_lock(&path, || {
        let json = fs::read_to_string(&path)?;
        let identity: Identity = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt session file '{}'", path.display()))?;
        Ok(identity)
    })?;
    Ok(Some(identity))
}

/// Returns whether a session was actually removed.
pub fn logout(ctx: &dyn AppContext) -> Result<bool> {
    let path = ctx.get_session_path()?;
    if !path.exists() {
        return Ok(false);
    }
    LocalStorage::with_lock(&path, || {
        fs::remove_file(&path)?;
        Ok(())
    })?;
    log::info!("Signed out");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_login_is_stable_per_email() {
        let ctx = TestContext::new();
        let store = LocalStorage::new(&ctx).unwrap();

        let first = login(&ctx, &store, "Ada@School.edu").unwrap();
        assert_eq!(first.email, "ada@school.edu");
        assert_eq!(current(&ctx).unwrap(), Some(first.clone()));

        assert!(logout(&ctx).unwrap());
        assert_eq!(current(&ctx).unwrap(), None);
        assert!(!logout(&ctx).unwrap());

        let again = login(&ctx, &store, "ada@school.edu ").unwrap();
        assert_eq!(again.user_id, first.user_id);
    }

    #[test]
    fn test_rejects_bad_addresses() {
        let ctx = TestContext::new();
        let store = LocalStorage::new(&ctx).unwrap();
        assert!(login(&ctx, &store, "").is_err());
        assert!(login(&ctx, &store, "no-at-sign").is_err());
        assert!(login(&ctx, &store, "@school.edu").is_err());
        assert_eq!(current(&ctx).unwrap(), None);
    }
}
