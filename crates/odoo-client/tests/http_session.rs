//! End-to-end session tests over the real HTTP transport.
//!
//! An in-process axum server plays the Odoo side: authenticate, logout,
//! and a small module registry behind `call_kw`.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{Json, Router, routing::post};
use odoo::{Client, ClientConfig, Config, ConnectionStatus, ModuleConfig, OutcomeKind};
use serde_json::{Value, json};

fn rpc_result(value: Value) -> Json<Value> {
    Json(json!({"jsonrpc": "2.0", "id": null, "result": value}))
}

async fn authenticate(Json(body): Json<Value>) -> Json<Value> {
    let params = &body["params"];
    if params["login"] == "admin" && params["password"] == "secret" {
        rpc_result(json!({"uid": 2, "name": "Mitchell Admin", "db": params["db"]}))
    } else {
        // Odoo reports bad credentials as uid: false, not as a fault.
        rpc_result(json!({"uid": false}))
    }
}

async fn destroy(Json(_body): Json<Value>) -> Json<Value> {
    rpc_result(json!(true))
}

async fn call_kw(Json(body): Json<Value>) -> Json<Value> {
    let params = &body["params"];
    match params["model"].as_str().unwrap_or_default() {
        "ir.module.module" => {
            let name = params["args"][0][0][2].as_str().unwrap_or_default();
            match name {
                "base" => rpc_result(json!([
                    {"name": "base", "state": "installed", "installed_version": "17.0.1.3"}
                ])),
                "sale" => rpc_result(json!([
                    {"name": "sale", "state": "uninstalled", "installed_version": false}
                ])),
                _ => rpc_result(json!([])),
            }
        }
        "res.users" => rpc_result(json!([2])),
        _ => Json(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": {"name": "builtins.KeyError", "message": "unknown model"}
            }
        })),
    }
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/web/session/authenticate", post(authenticate))
        .route("/web/session/destroy", post(destroy))
        .route("/web/dataset/call_kw", post(call_kw));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> Config {
    Config {
        client: ClientConfig::default()
            .with_server_url(format!("http://{addr}"))
            .with_max_retries(0),
        modules: ModuleConfig::default()
            .with_required(["base", "sale", "ghost"])
            .with_load_order(["base", "sale", "ghost"])
            .with_pace_delay(Duration::from_millis(1)),
    }
}

#[tokio::test]
async fn full_session_lifecycle() {
    let addr = spawn_server().await;
    let client = Client::new(config_for(addr)).unwrap();

    let identity = client.connect("admin", "secret").await.unwrap();
    assert_eq!(identity.uid, 2);
    assert_eq!(identity.display_name, "Mitchell Admin");
    assert!(client.is_connected());

    let summary = client.load_required_modules().await;
    assert_eq!(summary.total, 3);
    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.not_installed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.results[0].outcome, OutcomeKind::Loaded);
    assert_eq!(
        summary.results[0].status.version.as_deref(),
        Some("17.0.1.3")
    );

    let snapshot = client.snapshot();
    assert_eq!(snapshot.verified_modules, vec!["base"]);

    let probe = client
        .call_method("res.users", "search", vec![json!([["id", "=", 2]])], json!({}))
        .await
        .unwrap();
    assert_eq!(probe, json!([2]));

    client.disconnect().await;
    let snapshot = client.snapshot();
    assert_eq!(snapshot.status, ConnectionStatus::Disconnected);
    assert!(snapshot.identity.is_none());
    assert!(snapshot.verified_modules.is_empty());

    let err = client
        .call_method("res.users", "search", vec![], json!({}))
        .await
        .unwrap_err();
    assert!(err.is_not_connected());
}

#[tokio::test]
async fn bad_credentials_are_an_auth_failure() {
    let addr = spawn_server().await;
    let client = Client::new(config_for(addr)).unwrap();

    let failure = client.connect("admin", "wrong").await.unwrap_err();

    assert!(failure.error.is_auth());
    assert_eq!(client.status(), ConnectionStatus::Error);
    assert!(client.snapshot().last_error.is_some());
}

#[tokio::test]
async fn server_fault_surfaces_its_message() {
    let addr = spawn_server().await;
    let client = Client::new(config_for(addr)).unwrap();
    client.connect("admin", "secret").await.unwrap();

    let err = client
        .call_method("res.partner", "read", vec![], json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.rpc_message(), Some("unknown model"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    // Nothing is listening on this address.
    let config = Config {
        client: ClientConfig::default()
            .with_server_url("http://127.0.0.1:1")
            .with_max_retries(0),
        modules: ModuleConfig::default(),
    };
    let client = Client::new(config).unwrap();

    let failure = client.connect("admin", "secret").await.unwrap_err();

    assert!(!failure.error.is_auth());
    assert_eq!(client.status(), ConnectionStatus::Error);
}
