//! Order endpoints driven through the assembled router
//! Run: cargo test -p cafe-server --test order_lifecycle

mod common;

use common::{TestApp, get_request, json_request};
use http::StatusCode;
use serde_json::{Value, json};
use shared::models::{OrderStatus, Role};

use cafe_server::db::repository::OrderRepository;

const CUSTOMER_PHONE: &str = "6281234567890";

fn draft(payment_method: &str) -> Value {
    json!({
        "order_number": "A-001",
        "queue_number": 7,
        "user_info": {"name": "Budi", "whatsapp": "6281234567890", "note": "less sugar"},
        "orders": [{"menu_id": "M1", "quantity": 2, "price": 25000, "menu_name": "Es Kopi Susu"}],
        "total": 50000,
        "payment_method": payment_method
    })
}

async fn create_order(app: &TestApp, token: &str) -> String {
    let (status, body) = app
        .send(json_request("POST", "/api/order", Some(token), draft("Cash")))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_order_starts_as_terkirim() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;

    let (status, body) = app
        .send(json_request("POST", "/api/order", Some(&token), draft("Cash")))
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let order = &body["data"];
    assert_eq!(order["status"], "terkirim");
    assert_eq!(order["total"], "Rp 50000.00");
    assert_eq!(order["created_by"], "Budi");
    assert_eq!(order["created_by_role"], "user");
    assert_eq!(order["orders"][0]["quantity"], 2);
    assert_eq!(order["user_info"]["note"], "less sugar");
    assert!(order.get("updated_by").is_none());
}

#[tokio::test]
async fn test_create_rejects_non_cash_payment() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;

    let (status, _) = app
        .send(json_request("POST", "/api/order", Some(&token), draft("QRIS")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // nothing was stored
    let (status, _) = app.send(get_request("/api/order", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_customer_name_and_whatsapp() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;

    let mut payload = draft("Cash");
    payload["user_info"]["whatsapp"] = json!("  ");
    let (status, body) = app
        .send(json_request("POST", "/api/order", Some(&token), payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn test_requests_without_token_are_forbidden() {
    let app = TestApp::new().await;

    let (status, _) = app.send(get_request("/api/order", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(json_request("POST", "/api/order", None, draft("Cash")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(get_request("/api/order", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_order_list_is_not_found() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;

    let (status, body) = app.send(get_request("/api/order", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No orders found");
}

#[tokio::test]
async fn test_get_by_path_and_query() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let id = create_order(&app, &token).await;

    let (status, body) = app
        .send(get_request(&format!("/api/order/{id}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = app
        .send(get_request(&format!("/api/order/by-id?id={id}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_number"], "A-001");

    let (status, body) = app.send(get_request("/api/order", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_and_unknown_ids() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;

    let (status, _) = app
        .send(get_request("/api/order/not-an-id", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = app
        .send(get_request(&format!("/api/order/{unknown}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_flow_and_cancel_rules() {
    let app = TestApp::new().await;
    let customer = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let cashier = app.login_as("Sari", "6289876543210", Role::Cashier).await;
    let id = create_order(&app, &customer).await;
    let uri = format!("/api/order/{id}");

    let (status, body) = app
        .send(json_request("PUT", &uri, Some(&cashier), json!({"status": "diproses"})))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "diproses");
    assert_eq!(body["data"]["updated_by"], "Sari");
    assert_eq!(body["data"]["updated_by_role"], "cashier");

    // an order in progress can no longer be cancelled
    let (status, body) = app
        .send(json_request("PUT", &uri, Some(&customer), json!({"status": "dibatalkan"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["current_status"], "diproses");

    let (_, body) = app.send(get_request(&uri, Some(&customer))).await;
    assert_eq!(body["data"]["status"], "diproses");

    let (status, _) = app
        .send(json_request("PUT", &uri, Some(&cashier), json!({"status": "selesai"})))
        .await;
    assert_eq!(status, StatusCode::OK);

    // terminal
    let (status, body) = app
        .send(json_request("PUT", &uri, Some(&cashier), json!({"status": "diproses"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["current_status"], "selesai");
}

#[tokio::test]
async fn test_cancel_from_terkirim() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let id = create_order(&app, &token).await;

    let (status, body) = app
        .send(json_request(
            "PUT",
            &format!("/api/order/{id}"),
            Some(&token),
            json!({"status": "dibatalkan"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "dibatalkan");
}

#[tokio::test]
async fn test_update_rejections() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let id = create_order(&app, &token).await;
    let uri = format!("/api/order/{id}");

    let (status, _) = app
        .send(json_request("PUT", &uri, Some(&token), json!({"queue_number": 99})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(json_request("PUT", &uri, Some(&token), json!({"status": "terkirim"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(json_request("PUT", &uri, Some(&token), json!({"status": "dikirim"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send(json_request("PUT", &uri, Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.send(get_request(&uri, Some(&token))).await;
    assert_eq!(body["data"]["queue_number"], 7);
    assert_eq!(body["data"]["status"], "terkirim");
}

#[tokio::test]
async fn test_update_customer_details_without_status() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let id = create_order(&app, &token).await;

    let (status, body) = app
        .send(json_request(
            "PUT",
            &format!("/api/order/{id}"),
            Some(&token),
            json!({"user_info": {"name": "Budi S", "whatsapp": "6281234567890"}}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "terkirim");
    assert_eq!(body["data"]["user_info"]["name"], "Budi S");
}

#[tokio::test]
async fn test_delete_order() {
    let app = TestApp::new().await;
    let token = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let id = create_order(&app, &token).await;
    let uri = format!("/api/order/{id}");

    let (status, body) = app
        .send(json_request("DELETE", &uri, Some(&token), json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["deleted_by"], "Budi");

    let (status, _) = app.send(get_request(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(json_request("DELETE", &uri, Some(&token), json!({})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resubmitted_status_restamps_updater() {
    let app = TestApp::new().await;
    let customer = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let cashier = app.login_as("Sari", "6289876543210", Role::Cashier).await;
    let admin = app.login_as("Rina", "6285555555555", Role::Admin).await;
    let id = create_order(&app, &customer).await;
    let uri = format!("/api/order/{id}");

    let (status, _) = app
        .send(json_request("PUT", &uri, Some(&cashier), json!({"status": "diproses"})))
        .await;
    assert_eq!(status, StatusCode::OK);

    // same status again is accepted and records the new updater
    let (status, body) = app
        .send(json_request("PUT", &uri, Some(&admin), json!({"status": "diproses"})))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "diproses");
    assert_eq!(body["data"]["updated_by"], "Rina");
    assert_eq!(body["data"]["updated_by_role"], "admin");
    assert!(body["data"]["updated_at"].as_str().is_some());

    let (_, body) = app.send(get_request(&uri, Some(&customer))).await;
    assert_eq!(body["data"]["updated_by"], "Rina");
}

#[tokio::test]
async fn test_guarded_write_skips_when_status_moved_on() {
    let app = TestApp::new().await;
    let customer = app.login_as("Budi", CUSTOMER_PHONE, Role::User).await;
    let cashier = app.login_as("Sari", "6289876543210", Role::Cashier).await;
    let id = create_order(&app, &customer).await;

    let (status, _) = app
        .send(json_request(
            "PUT",
            &format!("/api/order/{id}"),
            Some(&cashier),
            json!({"status": "diproses"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let orders = OrderRepository::new(app.state.store.clone());
    let written = orders
        .merge_if_status(&id, OrderStatus::Terkirim, json!({"status": "selesai"}))
        .await
        .unwrap();
    assert!(written.is_none());

    let stored = orders.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Diproses);
}

#[tokio::test]
async fn test_create_by_unregistered_caller_is_not_found() {
    let app = TestApp::new().await;
    let token = app
        .state
        .jwt_service
        .generate_token("6280000000001", "Tamu", Role::User)
        .unwrap();

    let (status, _) = app
        .send(json_request("POST", "/api/order", Some(&token), draft("Cash")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
