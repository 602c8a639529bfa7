//! Command integration tests
//!
//! Tests for the add-user and export commands including:
//! - Property 5: Successful user creation resets the form (scenario B)
//! - Property 6: Failed user creation keeps the fields and reports an error
//! - Property 7: Unknown bills are reported without writing any file
//! - Property 8: Print documents contain only the selected bills
//! - Property 9: Exported PDFs are named after the bill and span pages

use std::path::{Path, PathBuf};

use serde_json::json;
use shared::{Role, UserCreationRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stock_withdrawal_client::export::Exporter;
use stock_withdrawal_client::external::StockApiClient;
use stock_withdrawal_client::handlers::{add_user, export_pdf, print_bills};
use stock_withdrawal_client::services::user_form::{USER_CREATED_TH, USER_CREATE_FAILED_TH};
use stock_withdrawal_client::services::{FormStatus, NotificationKind, Notifier, SubmitOutcome};
use stock_withdrawal_client::{AppError, Config};

fn history_body() -> serde_json::Value {
    json!({
        "history": [
            {
                "_id": "1", "billId": "B1", "date": "2024-01-01T03:00:00.000Z",
                "location": "คลังกลาง", "username": "somchai", "productName": "กาแฟ",
                "quantity": 2, "description": "", "total": 100
            },
            {
                "_id": "2", "billId": "B2", "date": "2024-01-05T03:00:00.000Z",
                "location": "คลังกลาง", "username": "malee", "productName": "นม",
                "quantity": 4, "description": "แช่เย็น", "total": 200
            }
        ]
    })
}

async fn history_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock-history/withdraw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .mount(&server)
        .await;
    server
}

fn fixture_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans.ttf")
}

fn exporter_without_viewer(font_path: PathBuf) -> Exporter {
    let mut config = Config::default();
    config.export.font_path = font_path;
    config.export.font_fallbacks.clear();
    config.export.open_print_document = false;
    Exporter::new(&config)
}

// ============================================================================
// Add user
// ============================================================================

#[tokio::test]
async fn test_scenario_b_success_resets_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "username": "alice",
            "password": "secret",
            "role": "user"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let api = StockApiClient::with_base_url(server.uri());
    let mut notifier = Notifier::default();

    let (form, outcome) = add_user(&api, "alice", "secret", Role::User, &mut notifier).await;

    assert_eq!(outcome, SubmitOutcome::Created);
    assert_eq!(form.username, "");
    assert_eq!(form.password, "");
    assert_eq!(form.role, Role::User);
    assert_eq!(form.status(), FormStatus::Idle);
    assert!(form.error().is_none());

    let active = notifier.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Success);
    assert_eq!(active[0].message, USER_CREATED_TH);
    server.verify().await;
}

#[tokio::test]
async fn test_scenario_b_failure_keeps_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let api = StockApiClient::with_base_url(server.uri());
    let mut notifier = Notifier::default();

    let (form, outcome) = add_user(&api, "alice", "secret", Role::Admin, &mut notifier).await;

    assert_eq!(outcome, SubmitOutcome::Failed(USER_CREATE_FAILED_TH.to_string()));
    assert_eq!(form.username, "alice");
    assert_eq!(form.password, "secret");
    assert_eq!(form.role, Role::Admin);
    assert_eq!(form.error(), Some(USER_CREATE_FAILED_TH));
    assert!(form.can_submit());
    assert!(notifier.active().is_empty());
}

#[tokio::test]
async fn test_empty_password_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let api = StockApiClient::with_base_url(server.uri());
    let mut notifier = Notifier::default();

    let (form, outcome) = add_user(&api, "alice", "", Role::User, &mut notifier).await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(form.username, "alice");
    server.verify().await;
}

#[tokio::test]
async fn test_request_body_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let api = StockApiClient::with_base_url(server.uri());
    let mut notifier = Notifier::default();

    add_user(&api, "bob", "pw", Role::Admin, &mut notifier).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: UserCreationRequest = requests[0].body_json().unwrap();
    assert_eq!(sent.username, "bob");
    assert_eq!(sent.role, Role::Admin);
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_unknown_bill() {
    let server = history_server().await;
    let api = StockApiClient::with_base_url(server.uri());
    let out = tempfile::tempdir().unwrap();
    let exporter = exporter_without_viewer(PathBuf::from("/nonexistent/font.ttf"));

    let err = export_pdf(&api, &exporter, "NOPE", Some(out.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BillNotFound(ref id) if id == "NOPE"));
    assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_export_without_font_is_export_error() {
    let server = history_server().await;
    let api = StockApiClient::with_base_url(server.uri());
    let out = tempfile::tempdir().unwrap();
    let exporter = exporter_without_viewer(out.path().join("missing.ttf"));

    let err = export_pdf(&api, &exporter, "B1", Some(out.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Export(_)));
}

#[tokio::test]
async fn test_export_pdf_writes_bill() {
    let server = history_server().await;
    let api = StockApiClient::with_base_url(server.uri());
    let out = tempfile::tempdir().unwrap();
    let exporter = exporter_without_viewer(fixture_font());

    let path = export_pdf(&api, &exporter, "B1", Some(out.path())).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "B1-order-history.pdf");
    assert_eq!(path.parent().unwrap(), out.path());
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_pdf_long_bill() {
    let lines: Vec<serde_json::Value> = (0..80)
        .map(|i| {
            json!({
                "_id": i.to_string(), "billId": "B1", "date": "2024-01-01T03:00:00.000Z",
                "location": "คลังกลาง", "username": "somchai",
                "productName": format!("สินค้า {}", i),
                "quantity": 1, "description": "", "total": 10
            })
        })
        .collect();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock-history/withdraw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "history": lines })))
        .mount(&server)
        .await;
    let api = StockApiClient::with_base_url(server.uri());
    let out = tempfile::tempdir().unwrap();
    let exporter = exporter_without_viewer(fixture_font());

    let path = export_pdf(&api, &exporter, "B1", Some(out.path())).await.unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_print_selected_bill() {
    let server = history_server().await;
    let api = StockApiClient::with_base_url(server.uri());
    let exporter = exporter_without_viewer(PathBuf::from("unused.ttf"));

    let path = print_bills(&api, &exporter, &["B2".to_string()]).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "B2-order-history-print.html");
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains(r#"data-bill-id="B2""#));
    assert!(!html.contains(r#"data-bill-id="B1""#));
    assert!(html.contains("แช่เย็น"));
}

#[tokio::test]
async fn test_print_all_bills() {
    let server = history_server().await;
    let api = StockApiClient::with_base_url(server.uri());
    let exporter = exporter_without_viewer(PathBuf::from("unused.ttf"));

    let path = print_bills(&api, &exporter, &[]).await.unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    let b2 = html.find(r#"data-bill-id="B2""#).unwrap();
    let b1 = html.find(r#"data-bill-id="B1""#).unwrap();
    assert!(b2 < b1);
}

#[tokio::test]
async fn test_print_unknown_bill() {
    let server = history_server().await;
    let api = StockApiClient::with_base_url(server.uri());
    let exporter = exporter_without_viewer(PathBuf::from("unused.ttf"));

    let err = print_bills(&api, &exporter, &["B1".to_string(), "X".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BillNotFound(ref id) if id == "X"));
}
