use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::errors::AuthError;
use crate::types::db::{
    permission, refresh_token, role, role_permission, user, user_permission, user_role,
};

/// One module.action grant with its level, as read from the database.
#[derive(Debug, Clone, FromQueryResult)]
pub struct GrantRow {
    pub module: String,
    pub action: String,
    pub value: i32,
}

/// CredentialStore manages users, roles, permission grants, and refresh
/// tokens in the database.
///
/// Time-sensitive methods take an explicit `now` timestamp so expiry
/// boundaries can be tested deterministically.
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key used for password hashing (from SecretManager)
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, AuthError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| AuthError::PasswordHashingFailed(e.to_string()))
    }

    /// Hash a plaintext password with Argon2id, peppered
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashingFailed(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Burn one hashing round so the unknown-login and wrong-password paths
    /// take comparable effort.
    fn burn_hash_round(&self, password: &str) {
        if let Ok(argon2) = self.argon2() {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            let _ = argon2.hash_password(password.as_bytes(), &salt);
        }
    }

    /// Verify user credentials and return the user record on success
    ///
    /// Unknown login, inactive account, and wrong password all collapse to
    /// the same `InvalidCredentials` error.
    ///
    /// # Arguments
    /// * `login` - The login name to verify
    /// * `password` - The plaintext password to verify
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The user record if credentials are valid
    /// * `Err(AuthError::InvalidCredentials)` - Any verification failure
    pub async fn verify_credentials(
        &self,
        login: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let found = user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await?;

        let found = match found {
            Some(u) if u.is_active => u,
            _ => {
                self.burn_hash_round(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let parsed_hash = PasswordHash::new(&found.password_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(found)
    }

    /// Add a new user to the database
    ///
    /// # Arguments
    /// * `login` - Unique login name
    /// * `password` - Plaintext password to hash and store
    /// * `first_name`, `last_name`, `email` - Profile fields
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    pub async fn create_user(
        &self,
        login: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<user::Model, AuthError> {
        let password_hash = self.hash_password(password)?;
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            login: Set(login.to_owned()),
            password_hash: Set(password_hash),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            email: Set(email.to_owned()),
            is_active: Set(true),
            last_login: Set(None),
            last_activity: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_user.insert(&self.db).await?;
        Ok(created)
    }

    /// Look up a user by id
    pub async fn find_user_by_id(&self, user_id: &str) -> Result<Option<user::Model>, AuthError> {
        let found = user::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(found)
    }

    /// Count all users; used to decide whether to seed the bootstrap admin
    pub async fn count_users(&self) -> Result<u64, AuthError> {
        use sea_orm::PaginatorTrait;
        let count = user::Entity::find().count(&self.db).await?;
        Ok(count)
    }

    /// Record a successful login
    pub async fn touch_last_login(&self, user_id: &str, now: i64) -> Result<(), AuthError> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLogin, Expr::value(now))
            .col_expr(user::Column::LastActivity, Expr::value(now))
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Record activity on an authenticated call
    pub async fn touch_last_activity(&self, user_id: &str, now: i64) -> Result<(), AuthError> {
        user::Entity::update_many()
            .col_expr(user::Column::LastActivity, Expr::value(now))
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // --- Roles and permission grants ---

    /// All roles assigned to a user
    pub async fn roles_for_user(&self, user_id: &str) -> Result<Vec<role::Model>, AuthError> {
        let role_ids: Vec<String> = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|ur| ur.role_id)
            .collect();

        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let roles = role::Entity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .all(&self.db)
            .await?;
        Ok(roles)
    }

    /// All grants the given roles carry, joined against the permission catalog
    ///
    /// # Arguments
    /// * `role_ids` - Roles whose grants to collect
    ///
    /// # Returns
    /// * `Ok(Vec<GrantRow>)` - One row per (role, permission) pair; the same
    ///   module.action may appear multiple times across roles
    pub async fn role_grants(&self, role_ids: &[String]) -> Result<Vec<GrantRow>, AuthError> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.is_in(role_ids.to_vec()))
            .join(
                JoinType::InnerJoin,
                role_permission::Relation::Permission.def(),
            )
            .select_only()
            .column_as(permission::Column::Module, "module")
            .column_as(permission::Column::Action, "action")
            .column_as(role_permission::Column::Value, "value")
            .into_model::<GrantRow>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Per-user overrides, joined against the permission catalog
    pub async fn user_overrides(&self, user_id: &str) -> Result<Vec<GrantRow>, AuthError> {
        let rows = user_permission::Entity::find()
            .filter(user_permission::Column::UserId.eq(user_id))
            .join(
                JoinType::InnerJoin,
                user_permission::Relation::Permission.def(),
            )
            .select_only()
            .column_as(permission::Column::Module, "module")
            .column_as(permission::Column::Action, "action")
            .column_as(user_permission::Column::Value, "value")
            .into_model::<GrantRow>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    // --- Refresh token lifecycle ---

    /// Store a refresh token record
    ///
    /// # Arguments
    /// * `token_hash` - HMAC-SHA256 hash of the refresh token
    /// * `token_id` - The jti claim embedded in the token
    /// * `user_id` - Owner of the token
    /// * `expires_at` - Unix timestamp when the token expires
    /// * `now` - Current Unix timestamp, recorded as created_at
    pub async fn insert_refresh_token(
        &self,
        token_hash: &str,
        token_id: &str,
        user_id: &str,
        expires_at: i64,
        now: i64,
    ) -> Result<(), AuthError> {
        let new_token = refresh_token::ActiveModel {
            token_hash: Set(token_hash.to_owned()),
            token_id: Set(token_id.to_owned()),
            user_id: Set(user_id.to_owned()),
            expires_at: Set(expires_at),
            revoked: Set(false),
            created_at: Set(now),
        };

        new_token.insert(&self.db).await?;
        Ok(())
    }

    /// Atomically consume a refresh token for rotation.
    ///
    /// Flips `revoked` to true in a single conditional UPDATE. The filters
    /// require the row to be live (not revoked, strictly unexpired) and owned
    /// by `user_id`, so two concurrent rotations of the same token can never
    /// both succeed: exactly one UPDATE matches the row.
    ///
    /// # Returns
    /// * `Ok(())` - This caller won the rotation
    /// * `Err(AuthError::RevokedOrExpired)` - Token unknown, already rotated,
    ///   revoked, expired, or owned by a different user
    pub async fn consume_refresh_token(
        &self,
        token_hash: &str,
        user_id: &str,
        now: i64,
    ) -> Result<(), AuthError> {
        let result = refresh_token::Entity::update_many()
            .col_expr(refresh_token::Column::Revoked, Expr::value(true))
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .filter(refresh_token::Column::UserId.eq(user_id))
            .filter(refresh_token::Column::Revoked.eq(false))
            .filter(refresh_token::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AuthError::RevokedOrExpired);
        }
        Ok(())
    }

    /// Revoke a refresh token without checking its state.
    ///
    /// Used by logout. Unknown or already-revoked tokens are a no-op so that
    /// logout never fails.
    pub async fn revoke_refresh_token(&self, token_hash: &str) -> Result<(), AuthError> {
        refresh_token::Entity::update_many()
            .col_expr(refresh_token::Column::Revoked, Expr::value(true))
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // --- Role / permission administration ---

    /// Create a role
    pub async fn create_role(
        &self,
        name: &str,
        description: Option<&str>,
        is_super_admin: bool,
    ) -> Result<role::Model, AuthError> {
        let new_role = role::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_owned()),
            description: Set(description.map(str::to_owned)),
            is_super_admin: Set(is_super_admin),
        };
        let created = new_role.insert(&self.db).await?;
        Ok(created)
    }

    /// Assign a role to a user
    pub async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<(), AuthError> {
        let link = user_role::ActiveModel {
            user_id: Set(user_id.to_owned()),
            role_id: Set(role_id.to_owned()),
        };
        link.insert(&self.db).await?;
        Ok(())
    }

    /// Create a permission catalog entry
    pub async fn create_permission(
        &self,
        module: &str,
        action: &str,
        description: Option<&str>,
    ) -> Result<permission::Model, AuthError> {
        let new_permission = permission::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            module: Set(module.to_owned()),
            action: Set(action.to_owned()),
            description: Set(description.map(str::to_owned)),
        };
        let created = new_permission.insert(&self.db).await?;
        Ok(created)
    }

    /// Set the level a role grants for a permission, inserting or updating
    pub async fn set_role_permission(
        &self,
        role_id: &str,
        permission_id: &str,
        value: i32,
    ) -> Result<(), AuthError> {
        let existing = role_permission::Entity::find_by_id((
            role_id.to_owned(),
            permission_id.to_owned(),
        ))
        .one(&self.db)
        .await?;

        match existing {
            Some(row) => {
                let mut active: role_permission::ActiveModel = row.into();
                active.value = Set(value);
                active.update(&self.db).await?;
            }
            None => {
                let link = role_permission::ActiveModel {
                    role_id: Set(role_id.to_owned()),
                    permission_id: Set(permission_id.to_owned()),
                    value: Set(value),
                };
                link.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    /// Set a per-user override for a permission, inserting or updating
    pub async fn set_user_permission(
        &self,
        user_id: &str,
        permission_id: &str,
        value: i32,
    ) -> Result<(), AuthError> {
        let existing = user_permission::Entity::find_by_id((
            user_id.to_owned(),
            permission_id.to_owned(),
        ))
        .one(&self.db)
        .await?;

        match existing {
            Some(row) => {
                let mut active: user_permission::ActiveModel = row.into();
                active.value = Set(value);
                active.update(&self.db).await?;
            }
            None => {
                let link = user_permission::ActiveModel {
                    user_id: Set(user_id.to_owned()),
                    permission_id: Set(permission_id.to_owned()),
                    value: Set(value),
                };
                link.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    /// Remove a per-user override, restoring role-derived resolution
    pub async fn remove_user_permission(
        &self,
        user_id: &str,
        permission_id: &str,
    ) -> Result<(), AuthError> {
        user_permission::Entity::delete_many()
            .filter(user_permission::Column::UserId.eq(user_id))
            .filter(user_permission::Column::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CredentialStore {{ db: <connection>, password_pepper: <redacted> }}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_db() -> (DatabaseConnection, CredentialStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let password_pepper = "test-pepper-for-unit-tests".to_string();
        let credential_store = CredentialStore::new(db.clone(), password_pepper);

        (db, credential_store)
    }

    async fn add_user(store: &CredentialStore, login: &str, password: &str) -> user::Model {
        store
            .create_user(login, password, "Test", "User", "test@example.com")
            .await
            .expect("Failed to create user")
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let (db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "mysecretpassword").await;

        let stored = user::Entity::find_by_id(&created.id)
            .one(&db)
            .await
            .expect("Failed to query user")
            .expect("User not found");

        assert_ne!(stored.password_hash, "mysecretpassword");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_verify_credentials_succeeds_with_correct_password() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "correctpass").await;

        let result = store.verify_credentials("alice", "correctpass").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_verify_credentials_fails_with_incorrect_password() {
        let (_db, store) = setup_test_db().await;

        add_user(&store, "alice", "correctpass").await;

        let result = store.verify_credentials("alice", "wrongpass").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_fails_for_unknown_login() {
        let (_db, store) = setup_test_db().await;

        let result = store.verify_credentials("nonexistent", "anypassword").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_inactive_user_gets_same_error_as_wrong_password() {
        let (db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "correctpass").await;

        user::Entity::update_many()
            .col_expr(user::Column::IsActive, Expr::value(false))
            .filter(user::Column::Id.eq(created.id))
            .exec(&db)
            .await
            .expect("Failed to deactivate user");

        let result = store.verify_credentials("alice", "correctpass").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_different_peppers_reject_each_others_hashes() {
        let (db, _store) = setup_test_db().await;

        let store1 = CredentialStore::new(db.clone(), "pepper-one-secret-key".to_string());
        let store2 = CredentialStore::new(db.clone(), "pepper-two-secret-key".to_string());

        add_user(&store1, "alice", "same-password").await;

        assert!(store1.verify_credentials("alice", "same-password").await.is_ok());
        assert!(matches!(
            store2.verify_credentials("alice", "same-password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_touch_last_login_updates_both_timestamps() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        assert!(created.last_login.is_none());

        store
            .touch_last_login(&created.id, 1_700_000_000)
            .await
            .expect("Failed to touch last login");

        let updated = store
            .find_user_by_id(&created.id)
            .await
            .expect("Failed to query user")
            .expect("User not found");
        assert_eq!(updated.last_login, Some(1_700_000_000));
        assert_eq!(updated.last_activity, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn test_role_grants_join_permission_catalog() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        let admin = store
            .create_role("Administrator", None, false)
            .await
            .expect("Failed to create role");
        store
            .assign_role(&created.id, &admin.id)
            .await
            .expect("Failed to assign role");

        let perm = store
            .create_permission("users", "read", None)
            .await
            .expect("Failed to create permission");
        store
            .set_role_permission(&admin.id, &perm.id, 2)
            .await
            .expect("Failed to set role permission");

        let roles = store
            .roles_for_user(&created.id)
            .await
            .expect("Failed to query roles");
        assert_eq!(roles.len(), 1);

        let grants = store
            .role_grants(&[admin.id])
            .await
            .expect("Failed to query grants");
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].module, "users");
        assert_eq!(grants[0].action, "read");
        assert_eq!(grants[0].value, 2);
    }

    #[tokio::test]
    async fn test_user_overrides_are_separate_from_role_grants() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        let perm = store
            .create_permission("orders", "write", None)
            .await
            .expect("Failed to create permission");
        store
            .set_user_permission(&created.id, &perm.id, 0)
            .await
            .expect("Failed to set override");

        let overrides = store
            .user_overrides(&created.id)
            .await
            .expect("Failed to query overrides");
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].module, "orders");
        assert_eq!(overrides[0].value, 0);

        store
            .remove_user_permission(&created.id, &perm.id)
            .await
            .expect("Failed to remove override");
        let overrides = store
            .user_overrides(&created.id)
            .await
            .expect("Failed to query overrides");
        assert!(overrides.is_empty());
    }

    #[tokio::test]
    async fn test_set_role_permission_updates_existing_row() {
        let (_db, store) = setup_test_db().await;

        let admin = store
            .create_role("Administrator", None, false)
            .await
            .expect("Failed to create role");
        let perm = store
            .create_permission("users", "read", None)
            .await
            .expect("Failed to create permission");

        store
            .set_role_permission(&admin.id, &perm.id, 1)
            .await
            .expect("Failed to set role permission");
        store
            .set_role_permission(&admin.id, &perm.id, 2)
            .await
            .expect("Failed to update role permission");

        let grants = store
            .role_grants(std::slice::from_ref(&admin.id))
            .await
            .expect("Failed to query grants");
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].value, 2);
    }

    #[tokio::test]
    async fn test_consume_refresh_token_succeeds_once() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        let now = 1_700_000_000;

        store
            .insert_refresh_token("hash-1", "jti-1", &created.id, now + 3600, now)
            .await
            .expect("Failed to insert token");

        let first = store.consume_refresh_token("hash-1", &created.id, now).await;
        assert!(first.is_ok());

        let second = store.consume_refresh_token("hash-1", &created.id, now).await;
        assert!(matches!(second, Err(AuthError::RevokedOrExpired)));
    }

    #[tokio::test]
    async fn test_consume_refresh_token_rejects_expiry_boundary() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        let now = 1_700_000_000;

        // expires_at == now must already count as expired
        store
            .insert_refresh_token("hash-boundary", "jti-b", &created.id, now, now - 3600)
            .await
            .expect("Failed to insert token");

        let result = store
            .consume_refresh_token("hash-boundary", &created.id, now)
            .await;
        assert!(matches!(result, Err(AuthError::RevokedOrExpired)));

        // One second earlier the same row is still live
        let result = store
            .consume_refresh_token("hash-boundary", &created.id, now - 1)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_consume_refresh_token_checks_ownership() {
        let (_db, store) = setup_test_db().await;

        let alice = add_user(&store, "alice", "pass").await;
        let bob = add_user(&store, "bob", "pass").await;
        let now = 1_700_000_000;

        store
            .insert_refresh_token("hash-alice", "jti-a", &alice.id, now + 3600, now)
            .await
            .expect("Failed to insert token");

        let result = store.consume_refresh_token("hash-alice", &bob.id, now).await;
        assert!(matches!(result, Err(AuthError::RevokedOrExpired)));
    }

    #[tokio::test]
    async fn test_consumed_token_row_is_kept_not_deleted() {
        let (db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        let now = 1_700_000_000;

        store
            .insert_refresh_token("hash-keep", "jti-k", &created.id, now + 3600, now)
            .await
            .expect("Failed to insert token");
        store
            .consume_refresh_token("hash-keep", &created.id, now)
            .await
            .expect("Failed to consume token");

        let row = refresh_token::Entity::find_by_id("hash-keep")
            .one(&db)
            .await
            .expect("Failed to query token")
            .expect("Token row should still exist");
        assert!(row.revoked);
    }

    #[tokio::test]
    async fn test_revoke_refresh_token_is_idempotent() {
        let (_db, store) = setup_test_db().await;

        let created = add_user(&store, "alice", "pass").await;
        let now = 1_700_000_000;

        store
            .insert_refresh_token("hash-revoke", "jti-r", &created.id, now + 3600, now)
            .await
            .expect("Failed to insert token");

        assert!(store.revoke_refresh_token("hash-revoke").await.is_ok());
        assert!(store.revoke_refresh_token("hash-revoke").await.is_ok());
        assert!(store.revoke_refresh_token("never-existed").await.is_ok());

        let result = store
            .consume_refresh_token("hash-revoke", &created.id, now)
            .await;
        assert!(matches!(result, Err(AuthError::RevokedOrExpired)));
    }

    #[tokio::test]
    async fn test_debug_trait_does_not_expose_password_pepper() {
        let (_db, store) = setup_test_db().await;

        let debug_output = format!("{:?}", store);
        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains("test-pepper-for-unit-tests"));
    }
}
