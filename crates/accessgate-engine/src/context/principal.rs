use accessgate_core::error::{AccessError, Result};
use accessgate_core::model::Principal;

use crate::store::MembershipStore;

/// Resolve the acting principal from an authenticated user id.
///
/// Unknown and deactivated users are auth failures rather than lookups
/// the caller can distinguish.
pub async fn resolve_principal(members: &dyn MembershipStore, user_id: &str) -> Result<Principal> {
    let user = members.get_user(user_id).await.map_err(|e| match e {
        AccessError::NotFound { .. } => AccessError::AuthFailed(format!("unregistered user: {user_id}")),
        other => other,
    })?;

    if !user.active {
        return Err(AccessError::AuthFailed(format!("user inactive: {user_id}")));
    }
    Ok(user.principal())
}
