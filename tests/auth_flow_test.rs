// End-to-end session lifecycle against the full service stack

mod common;

use common::{seed_admin, setup_test_app};
use prodflow_backend::errors::AuthError;
use prodflow_backend::services::AuthGate;

#[tokio::test]
async fn seeded_admin_can_log_in_and_bypasses_all_checks() {
    let app = setup_test_app().await;
    seed_admin(&app).await;

    let outcome = app
        .session_manager
        .login("admin", "admin123")
        .await
        .expect("Admin login should succeed");

    let claims = app
        .codec
        .verify_access(&outcome.access_token)
        .expect("Access token should verify");
    assert!(claims.super_admin);
    assert_eq!(claims.roles, vec!["Super Admin".to_string()]);

    // Super admin needs no explicit grants
    assert!(claims.permissions.is_empty());
    assert!(AuthGate::authorize(&claims, "users", "delete", 2).is_ok());
    assert!(AuthGate::authorize(&claims, "production", "write", 2).is_ok());
}

#[tokio::test]
async fn admin_without_roles_gets_empty_authorization_state() {
    let app = setup_test_app().await;

    app.store
        .create_user("admin", "admin123", "System", "Administrator", "admin@localhost")
        .await
        .unwrap();

    let outcome = app.session_manager.login("admin", "admin123").await.unwrap();
    assert_eq!(outcome.user.login, "admin");

    let claims = app.codec.verify_access(&outcome.access_token).unwrap();
    let (_user, roles, permissions) = app
        .session_manager
        .get_user_details(&claims.sub)
        .await
        .unwrap();
    assert!(roles.is_empty());
    assert!(permissions.is_empty());
    assert!(!claims.super_admin);
}

#[tokio::test]
async fn regular_user_sees_resolved_grants_in_token_and_gate() {
    let app = setup_test_app().await;

    let user = app
        .store
        .create_user("worker", "secret-pass", "Wendy", "Worker", "wendy@example.com")
        .await
        .unwrap();
    let operators = app.store.create_role("Operators", None, false).await.unwrap();
    app.store.assign_role(&user.id, &operators.id).await.unwrap();

    let users_read = app.store.create_permission("users", "read", None).await.unwrap();
    let prod_write = app
        .store
        .create_permission("production", "write", None)
        .await
        .unwrap();
    app.store.set_role_permission(&operators.id, &users_read.id, 2).await.unwrap();
    app.store.set_role_permission(&operators.id, &prod_write.id, 1).await.unwrap();

    // Override raises production.write above the role grant
    app.store.set_user_permission(&user.id, &prod_write.id, 2).await.unwrap();

    let outcome = app.session_manager.login("worker", "secret-pass").await.unwrap();
    let claims = app.codec.verify_access(&outcome.access_token).unwrap();

    assert!(!claims.super_admin);
    assert_eq!(claims.permissions.get("users.read"), Some(&2));
    assert_eq!(claims.permissions.get("production.write"), Some(&2));

    assert!(AuthGate::authorize(&claims, "users", "read", 2).is_ok());
    assert!(AuthGate::authorize(&claims, "production", "write", 2).is_ok());
    // Nothing was granted for this one
    assert!(matches!(
        AuthGate::authorize(&claims, "reports", "export", 1),
        Err(AuthError::Forbidden { .. })
    ));
}

#[tokio::test]
async fn full_session_lifecycle_login_refresh_logout() {
    let app = setup_test_app().await;
    seed_admin(&app).await;

    let login = app.session_manager.login("admin", "admin123").await.unwrap();

    // Rotate once
    let rotated = app
        .session_manager
        .refresh(&login.refresh_token)
        .await
        .expect("First refresh should succeed");
    assert_ne!(rotated.refresh_token, login.refresh_token);

    // The original token is spent
    assert!(matches!(
        app.session_manager.refresh(&login.refresh_token).await,
        Err(AuthError::RevokedOrExpired)
    ));

    // Logout kills the current token
    app.session_manager.logout(Some(&rotated.refresh_token)).await;
    assert!(matches!(
        app.session_manager.refresh(&rotated.refresh_token).await,
        Err(AuthError::RevokedOrExpired)
    ));

    // A fresh login still works afterwards
    let again = app.session_manager.login("admin", "admin123").await;
    assert!(again.is_ok());
}

#[tokio::test]
async fn permission_change_takes_effect_on_refresh_not_midsession() {
    let app = setup_test_app().await;

    let user = app
        .store
        .create_user("worker", "secret-pass", "Wendy", "Worker", "wendy@example.com")
        .await
        .unwrap();
    let operators = app.store.create_role("Operators", None, false).await.unwrap();
    app.store.assign_role(&user.id, &operators.id).await.unwrap();
    let perm = app.store.create_permission("users", "read", None).await.unwrap();
    app.store.set_role_permission(&operators.id, &perm.id, 2).await.unwrap();

    let login = app.session_manager.login("worker", "secret-pass").await.unwrap();
    let claims = app.codec.verify_access(&login.access_token).unwrap();
    assert!(AuthGate::authorize(&claims, "users", "read", 2).is_ok());

    // Revoke the grant; the live token is unaffected by design
    app.store.set_role_permission(&operators.id, &perm.id, 0).await.unwrap();
    assert!(AuthGate::authorize(&claims, "users", "read", 2).is_ok());

    // The refreshed token sees the revocation
    let rotated = app.session_manager.refresh(&login.refresh_token).await.unwrap();
    let new_claims = app.codec.verify_access(&rotated.access_token).unwrap();
    assert!(matches!(
        AuthGate::authorize(&new_claims, "users", "read", 2),
        Err(AuthError::Forbidden { .. })
    ));
}

#[tokio::test]
async fn concurrent_rotation_of_one_token_has_a_single_winner() {
    let app = setup_test_app().await;
    seed_admin(&app).await;

    let login = app.session_manager.login("admin", "admin123").await.unwrap();

    let manager1 = app.session_manager.clone();
    let manager2 = app.session_manager.clone();
    let token1 = login.refresh_token.clone();
    let token2 = login.refresh_token.clone();

    let (first, second) = tokio::join!(manager1.refresh(&token1), manager2.refresh(&token2));

    let successes = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1, "Exactly one rotation may win");

    let loser = if first.is_err() { first } else { second };
    assert!(matches!(loser, Err(AuthError::RevokedOrExpired)));
}

#[tokio::test]
async fn every_issued_refresh_token_leaves_a_row_behind() {
    use prodflow_backend::types::db::refresh_token;
    use sea_orm::EntityTrait;

    let app = setup_test_app().await;
    seed_admin(&app).await;

    let login = app.session_manager.login("admin", "admin123").await.unwrap();
    let rotated = app.session_manager.refresh(&login.refresh_token).await.unwrap();
    app.session_manager.logout(Some(&rotated.refresh_token)).await;

    // Two issued tokens, both rows retained, both now revoked
    let rows = refresh_token::Entity::find().all(&app.db).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.revoked));
}
