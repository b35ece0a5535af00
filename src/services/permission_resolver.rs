use std::sync::Arc;

use crate::errors::AuthError;
use crate::stores::{CredentialStore, GrantRow};
use crate::types::db::role;
use crate::types::internal::PermissionMap;

/// Resolves a user's effective permission map from the two-tier model.
///
/// Role grants aggregate by MAX across all assigned roles; a per-user
/// override then replaces the role-derived level outright, even when the
/// override is lower. Keys are `module.action`.
pub struct PermissionResolver {
    store: Arc<CredentialStore>,
}

impl PermissionResolver {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    /// Resolve the effective permission map for a user
    pub async fn resolve(&self, user_id: &str) -> Result<PermissionMap, AuthError> {
        let (_roles, permissions) = self.resolve_with_roles(user_id).await?;
        Ok(permissions)
    }

    /// Resolve the effective permission map along with the user's roles.
    ///
    /// Login and refresh both need the role list for the token snapshot, so
    /// this avoids querying roles twice.
    pub async fn resolve_with_roles(
        &self,
        user_id: &str,
    ) -> Result<(Vec<role::Model>, PermissionMap), AuthError> {
        let roles = self.store.roles_for_user(user_id).await?;
        let role_ids: Vec<String> = roles.iter().map(|r| r.id.clone()).collect();

        let role_grants = self.store.role_grants(&role_ids).await?;
        let overrides = self.store.user_overrides(user_id).await?;

        Ok((roles, merge_grants(&role_grants, &overrides)))
    }
}

fn merge_grants(role_grants: &[GrantRow], overrides: &[GrantRow]) -> PermissionMap {
    let mut map = PermissionMap::new();

    for grant in role_grants {
        let key = format!("{}.{}", grant.module, grant.action);
        map.entry(key)
            .and_modify(|level| *level = (*level).max(grant.value))
            .or_insert(grant.value);
    }

    // Overrides replace, they do not aggregate
    for grant in overrides {
        let key = format!("{}.{}", grant.module, grant.action);
        map.insert(key, grant.value);
    }

    map
}
