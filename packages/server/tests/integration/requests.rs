use common::AssetStatus;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use stockroom::entity::request_history;

use crate::common::{TestApp, routes};

async fn history_rows(app: &TestApp, request_id: i32) -> u64 {
    request_history::Entity::find()
        .filter(request_history::Column::RequestId.eq(request_id))
        .count(&app.db)
        .await
        .expect("Failed to count history rows")
}

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn register_login_file_and_list_a_request() {
        let app = TestApp::spawn().await;

        let reg = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "username": "bob",
                    "password": "pw1",
                    "role": "Employee",
                    "email": "b@x.com",
                }),
            )
            .await;
        assert_eq!(reg.status, 201, "{}", reg.text);

        let login = app.login("bob", "pw1").await;
        assert_eq!(login.status, 200);
        let token = login.body["access_token"].as_str().unwrap().to_string();

        let bad_login = app.login("bob", "wrong").await;
        assert_eq!(bad_login.status, 401);

        let created = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "asset_id": null,
                    "urgency_level": "High",
                    "status": "Pending",
                    "request_type": "New_Asset",
                }),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["msg"], "Request created successfully");
        let request_id = created.body["request_id"].as_i64().unwrap();

        let list = app.get_with_token(routes::REQUESTS, &token).await;
        assert_eq!(list.status, 200);
        let filed = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["id"] == request_id)
            .expect("created request should be listed");
        assert_eq!(filed["status"], "Pending");
        assert_eq!(filed["quantity"], 1);
        assert_eq!(filed["urgency_level"], "High");
        assert!(filed["asset_id"].is_null());
    }
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn creating_a_request_records_the_initial_history_entry() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app
            .get_with_token(&routes::request_history(id), &bob.token)
            .await;
        assert_eq!(res.status, 200);
        let history = res.body.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["status"], "Pending");
        assert_eq!(history[0]["comment"], "Request created");
    }

    #[tokio::test]
    async fn invalid_urgency_is_rejected_and_nothing_is_stored() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "asset_id": null,
                    "urgency_level": "Extreme",
                    "status": "Pending",
                    "request_type": "New_Asset",
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let list = app.get_with_token(routes::REQUESTS, &bob.token).await;
        assert!(list.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "urgency_level": "Low",
                    "status": "Pending",
                    "request_type": "New_Asset",
                    "quantity": 0,
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let app = TestApp::spawn().await;
        let jane = app.create_manager("jane").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "ghost",
                    "urgency_level": "Low",
                    "status": "Pending",
                    "request_type": "New_Asset",
                }),
                &jane.token,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["msg"], "User not found");
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "asset_id": 9999,
                    "urgency_level": "Low",
                    "status": "Pending",
                    "request_type": "Repair",
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["msg"], "Asset not found");
    }

    #[tokio::test]
    async fn repair_request_needs_an_asset() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "urgency_level": "Low",
                    "status": "Pending",
                    "request_type": "Repair",
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn employee_cannot_file_for_someone_else() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        app.create_employee("alice").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "alice",
                    "urgency_level": "Low",
                    "status": "Pending",
                    "request_type": "New_Asset",
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn employee_cannot_file_a_pre_approved_request() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "urgency_level": "Low",
                    "status": "Approved",
                    "request_type": "New_Asset",
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn manager_can_file_for_an_employee() {
        let app = TestApp::spawn().await;
        let jane = app.create_manager("jane").await;
        let bob = app.create_employee("bob").await;
        let category = app.insert_category("Electronics").await;
        let monitor = app
            .insert_asset(category, "Monitor", AssetStatus::Available)
            .await;

        let res = app
            .post_with_token(
                routes::REQUESTS,
                &json!({
                    "username": "bob",
                    "asset_id": monitor,
                    "urgency_level": "Medium",
                    "status": "Pending",
                    "request_type": "Repair",
                    "reason": "Screen flickers",
                    "quantity": 2,
                }),
                &jane.token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let id = res.body["request_id"].as_i64().unwrap() as i32;
        let request = app.get_with_token(&routes::request(id), &jane.token).await;
        assert_eq!(request.body["user_id"], bob.id);
        assert_eq!(request.body["asset_id"], monitor);
        assert_eq!(request.body["quantity"], 2);
        assert_eq!(request.body["reason"], "Screen flickers");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn owner_can_edit_content_without_touching_status() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request(id),
                &json!({"request_type": "New_Asset", "reason": "Need two", "quantity": 2}),
                &bob.token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["msg"], "Request updated successfully");

        let request = app.get_with_token(&routes::request(id), &bob.token).await;
        assert_eq!(request.body["quantity"], 2);
        assert_eq!(request.body["reason"], "Need two");
        assert_eq!(request.body["status"], "Pending");
    }

    #[tokio::test]
    async fn editing_a_missing_request_is_not_found() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app
            .put_with_token(
                &routes::request(9999),
                &json!({"request_type": "New_Asset", "reason": "x", "quantity": 1}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn edit_requires_all_fields() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request(id),
                &json!({"request_type": "New_Asset", "reason": "x"}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn switching_to_repair_without_an_asset_is_rejected() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request(id),
                &json!({"request_type": "Repair", "reason": "Broken", "quantity": 1}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn employee_cannot_edit_someone_elses_request() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let alice = app.create_employee("alice").await;
        let id = app.create_request(&alice, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request(id),
                &json!({"request_type": "New_Asset", "reason": "Mine now", "quantity": 1}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 403);
    }
}

mod review {
    use super::*;

    #[tokio::test]
    async fn manager_approves_a_pending_request() {
        let app = TestApp::spawn().await;
        let jane = app.create_manager("jane").await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request_status(id),
                &json!({"status": "Approved", "comment": "Budget approved"}),
                &jane.token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "Approved");

        let history = app
            .get_with_token(&routes::request_history(id), &bob.token)
            .await;
        let entries = history.body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "Pending");
        assert_eq!(entries[1]["status"], "Approved");
        assert_eq!(entries[1]["comment"], "Budget approved");
    }

    #[tokio::test]
    async fn decided_requests_cannot_be_reopened_or_redecided() {
        let app = TestApp::spawn().await;
        let jane = app.create_manager("jane").await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let rejected = app
            .put_with_token(
                &routes::request_status(id),
                &json!({"status": "Rejected"}),
                &jane.token,
            )
            .await;
        assert_eq!(rejected.status, 200);

        for status in ["Pending", "Approved", "Rejected"] {
            let res = app
                .put_with_token(
                    &routes::request_status(id),
                    &json!({"status": status}),
                    &jane.token,
                )
                .await;
            assert_eq!(res.status, 409, "{status}");
            assert_eq!(res.body["code"], "CONFLICT");
        }

        assert_eq!(history_rows(&app, id).await, 2);
    }

    #[tokio::test]
    async fn pending_to_pending_is_a_conflict() {
        let app = TestApp::spawn().await;
        let jane = app.create_manager("jane").await;
        let id = app.create_request(&jane, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request_status(id),
                &json!({"status": "Pending"}),
                &jane.token,
            )
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn employee_cannot_review() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app
            .put_with_token(
                &routes::request_status(id),
                &json!({"status": "Approved"}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(history_rows(&app, id).await, 1);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_a_request_removes_its_history() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;
        assert_eq!(history_rows(&app, id).await, 1);

        let res = app.delete_with_token(&routes::request(id), &bob.token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["msg"], "Request deleted successfully");

        let gone = app.get_with_token(&routes::request(id), &bob.token).await;
        assert_eq!(gone.status, 404);
        assert_eq!(history_rows(&app, id).await, 0);
    }

    #[tokio::test]
    async fn deleting_a_missing_request_is_not_found() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;

        let res = app.delete_with_token(&routes::request(9999), &bob.token).await;

        assert_eq!(res.status, 404);
        assert!(res.body["msg"].is_string());
    }

    #[tokio::test]
    async fn employee_cannot_delete_someone_elses_request() {
        let app = TestApp::spawn().await;
        let bob = app.create_employee("bob").await;
        let alice = app.create_employee("alice").await;
        let id = app.create_request(&alice, "New_Asset", None).await;

        let res = app.delete_with_token(&routes::request(id), &bob.token).await;

        assert_eq!(res.status, 403);
        let still_there = app.get_with_token(&routes::request(id), &alice.token).await;
        assert_eq!(still_there.status, 200);
    }

    #[tokio::test]
    async fn manager_can_delete_any_request() {
        let app = TestApp::spawn().await;
        let jane = app.create_manager("jane").await;
        let bob = app.create_employee("bob").await;
        let id = app.create_request(&bob, "New_Asset", None).await;

        let res = app.delete_with_token(&routes::request(id), &jane.token).await;

        assert_eq!(res.status, 200);
    }
}
