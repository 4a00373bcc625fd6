//! Shared helpers for the HTTP integration suites

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use chrono::{Months, Utc};
use gymdesk::prelude::*;
use serde_json::{Value, json};

pub const STAFF_PASSWORD: &str = "Secret#Pass1";

/// Defaults plus a signing secret and the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = "integration-secret".to_string();
    config.auth.bcrypt_cost = 4;
    config
}

pub fn test_server() -> TestServer {
    let app = ServerBuilder::new(test_config())
        .with_stores(Stores::in_memory())
        .build()
        .expect("Failed to build app");

    TestServer::new(app)
}

/// Bootstrap the admin account and return its session cookie and password
pub async fn bootstrap_admin(server: &TestServer) -> (Cookie<'static>, String) {
    let response = server.post("/api/auth/create-admin").await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let password = body["adminCredentials"]["password"]
        .as_str()
        .expect("password in response")
        .to_string();
    (response.cookie("token"), password)
}

pub async fn admin_session(server: &TestServer) -> Cookie<'static> {
    bootstrap_admin(server).await.0
}

pub fn birth_date_aged(years: u32) -> String {
    (Utc::now().date_naive() - Months::new(12 * years))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn user_payload(user_name: &str, phone_number: &str, role: &str) -> Value {
    json!({
        "firstName": "Sam",
        "lastName": "Reyes",
        "gender": "Other",
        "birthDate": birth_date_aged(25),
        "address": "1 Main St",
        "phoneNumber": phone_number,
        "userName": user_name,
        "password": STAFF_PASSWORD,
        "role": role
    })
}

/// Create a user through the admin API and return that user's id
pub async fn create_user(
    server: &TestServer,
    admin: &Cookie<'static>,
    user_name: &str,
    phone_number: &str,
    role: &str,
) -> String {
    server
        .post("/api/admin/create-user")
        .add_cookie(admin.clone())
        .json(&user_payload(user_name, phone_number, role))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({"userName": user_name, "password": STAFF_PASSWORD}))
        .await;
    let body: Value = response.json();
    body["user"]["_id"].as_str().expect("user id").to_string()
}

pub async fn login(server: &TestServer, user_name: &str, password: &str) -> Cookie<'static> {
    let response = server
        .post("/api/auth/login")
        .json(&json!({"userName": user_name, "password": password}))
        .await;
    response.assert_status_ok();
    response.cookie("token")
}

/// Create a validity and return its id
pub async fn create_validity(
    server: &TestServer,
    admin: &Cookie<'static>,
    months: u32,
    days: u32,
) -> String {
    let response = server
        .post("/api/admin/create-validity")
        .add_cookie(admin.clone())
        .json(&json!({"months": months, "days": days}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    body["data"]["_id"].as_str().expect("validity id").to_string()
}

/// Create a rate and return its id
pub async fn create_rate(
    server: &TestServer,
    admin: &Cookie<'static>,
    name: &str,
    amount: f64,
    validity: &str,
) -> String {
    let response = server
        .post("/api/admin/create-rate")
        .add_cookie(admin.clone())
        .json(&json!({"name": name, "amount": amount, "validity": validity}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    body["data"]["_id"].as_str().expect("rate id").to_string()
}
