use common::UserRole;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use serde_json::json;
use stockroom::entity::user;
use stockroom::error::AppError;
use stockroom::service::auth::map_user_insert_error;

use crate::common::{JWT_SECRET, TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_details() {
        let app = TestApp::spawn().await;

        let res = app.register("bob", "pw1", UserRole::Employee).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "User registered successfully");
        assert_eq!(res.body["role"], "Employee");
        assert!(res.body["id"].is_number());
    }

    #[tokio::test]
    async fn procurement_manager_role_uses_its_wire_name() {
        let app = TestApp::spawn().await;

        let res = app
            .register("jane", "pw1", UserRole::ProcurementManager)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["role"], "Procurement_Manager");
    }

    #[tokio::test]
    async fn cannot_register_the_same_username_twice() {
        let app = TestApp::spawn().await;

        let first = app.register("bob", "pw1", UserRole::Employee).await;
        assert_eq!(first.status, 201, "First registration failed: {}", first.text);

        let res = app.register("bob", "other", UserRole::Admin).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
        assert!(res.body["msg"].is_string());
    }

    #[tokio::test]
    async fn concurrent_registrations_of_one_username_admit_exactly_one() {
        let app = TestApp::spawn().await;

        let (a, b, c) = tokio::join!(
            app.register("bob", "pw1", UserRole::Employee),
            app.register("bob", "pw2", UserRole::Employee),
            app.register("bob", "pw3", UserRole::Admin),
        );

        let responses = [a, b, c];
        let created = responses.iter().filter(|r| r.status == 201).count();
        assert_eq!(created, 1);
        for res in responses.iter().filter(|r| r.status != 201) {
            assert_eq!(res.status, 400, "{}", res.text);
            assert_eq!(res.body["code"], "USERNAME_TAKEN");
        }

        let alice = app.create_employee("alice").await;
        let users = app.get_with_token(routes::USERS, &alice.token).await;
        let bobs = users
            .body
            .as_array()
            .unwrap()
            .iter()
            .filter(|u| u["username"] == "bob")
            .count();
        assert_eq!(bobs, 1);
    }

    #[tokio::test]
    async fn duplicate_username_rejected_by_the_store_maps_to_username_taken() {
        let app = TestApp::spawn().await;
        app.create_employee("bob").await;

        let err = user::ActiveModel {
            username: Set("bob".to_string()),
            password: Set("not-a-hash".to_string()),
            role: Set(UserRole::Admin),
            email: Set("other@example.com".to_string()),
            ..Default::default()
        }
        .insert(&app.db)
        .await
        .unwrap_err();

        assert!(matches!(map_user_insert_error(err), AppError::UsernameTaken));
    }

    #[test]
    fn other_insert_failures_stay_internal() {
        let err = DbErr::Custom("disk full".to_string());

        assert!(matches!(map_user_insert_error(err), AppError::Internal(_)));
    }

    #[tokio::test]
    async fn cannot_register_with_an_unknown_role() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "bob",
                    "password": "pw1",
                    "role": "Intern",
                    "email": "b@x.com",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["msg"].as_str().unwrap().contains("role"));
    }

    #[tokio::test]
    async fn cannot_register_with_missing_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "bob", "password": "pw1"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn non_json_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::REGISTER))
            .body("username=bob")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn password_is_never_returned() {
        let app = TestApp::spawn().await;
        let user = app.create_employee("bob").await;

        let res = app.get_with_token(&routes::user(user.id), &user.token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "bob");
        assert!(res.body.get("password").is_none());
    }

    #[tokio::test]
    async fn serialized_user_row_omits_password_hash() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let row = user::Entity::find_by_id(bob.id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert!(row.password.starts_with("$argon2"));

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["username"], "bob");
        assert!(value.get("password").is_none());
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn login_returns_a_token_carrying_the_stored_identity() {
        let app = TestApp::spawn().await;
        let reg = app.register("bob", "pw1", UserRole::Employee).await;
        let id = reg.id();

        let res = app.login("bob", "pw1").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["token_type"], "Bearer");
        assert_eq!(res.body["expires_in"], 3600);

        let token = res.body["access_token"].as_str().unwrap();
        let claims = stockroom::utils::jwt::verify(token, JWT_SECRET).unwrap();
        assert_eq!(claims.uid, id);
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.role, UserRole::Employee);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically() {
        let app = TestApp::spawn().await;
        app.register("bob", "pw1", UserRole::Employee).await;

        let wrong_password = app.login("bob", "wrong").await;
        let unknown_user = app.login("nobody", "pw1").await;

        assert_eq!(wrong_password.status, 401);
        assert_eq!(unknown_user.status, 401);
        assert_eq!(wrong_password.body, unknown_user.body);
        assert_eq!(wrong_password.body["msg"], "Bad username or password");
    }

    #[tokio::test]
    async fn login_without_password_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "bob"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn logout_acknowledges_without_a_token() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::LOGOUT, &json!({})).await;

        assert_eq!(res.status, 200);
        assert!(res.body["message"].is_string());
    }

    #[tokio::test]
    async fn token_stays_valid_after_logout() {
        let app = TestApp::spawn().await;
        let user = app.create_employee("bob").await;

        let res = app
            .post_with_token(routes::LOGOUT, &json!({}), &user.token)
            .await;
        assert_eq!(res.status, 200);

        let me = app.get_with_token(routes::ME, &user.token).await;
        assert_eq!(me.status, 200);
    }
}

mod current_user {
    use super::*;

    #[tokio::test]
    async fn me_returns_the_token_identity() {
        let app = TestApp::spawn().await;
        let user = app.create_manager("jane").await;

        let res = app.get_with_token(routes::ME, &user.token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], user.id);
        assert_eq!(res.body["username"], "jane");
        assert_eq!(res.body["role"], "Procurement_Manager");
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = TestApp::spawn().await;

        for path in [
            routes::ME,
            routes::USERS,
            routes::CATEGORIES,
            routes::ASSETS,
            routes::REQUESTS,
        ] {
            let res = app.get_without_token(path).await;
            assert_eq!(res.status, 401, "{path}");
            assert_eq!(res.body["code"], "TOKEN_MISSING", "{path}");
        }
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let app = TestApp::spawn().await;
        let forged =
            stockroom::utils::jwt::sign(1, "bob", UserRole::Admin, "some-other-secret", 3600)
                .unwrap();

        let res = app.get_with_token(routes::ME, &forged).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}

mod meta {
    use super::*;

    #[tokio::test]
    async fn index_greets() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::INDEX).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Welcome to the API!");
    }

    #[tokio::test]
    async fn unknown_path_returns_not_found_body() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/api/does-not-exist").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Not found");
    }

    #[tokio::test]
    async fn non_numeric_id_returns_not_found_body() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app.get_with_token("/api/users/abc", &bob.token).await;

        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["error"], "Not found");
    }

    #[tokio::test]
    async fn out_of_range_id_returns_not_found_body() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .delete_with_token("/api/requests/99999999999", &bob.token)
            .await;

        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn unsupported_method_returns_json_body() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .patch(format!("http://{}{}", app.addr, routes::REQUESTS))
            .send()
            .await
            .unwrap();
        let res = crate::common::TestResponse::from_response(res).await;

        assert_eq!(res.status, 405, "{}", res.text);
        assert_eq!(res.body["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(res.body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        assert!(res.body["paths"]["/api/requests"].is_object());
    }
}
