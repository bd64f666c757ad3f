use super::*;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Router,
};
use shared::domain::{Gender, MaritalStatus};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    draft::RegistrationDraft, error::SubmissionError, fakes::jpeg_of_size,
    submission::SubmissionCoordinator,
};

const ANON_KEY: &str = "test-anon-key";

#[derive(Debug, Clone)]
struct CapturedRequest {
    path: String,
    apikey: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
    prefer: Option<String>,
    upsert: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    storage_reply: (StatusCode, String),
    table_reply: (StatusCode, String),
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle_post(
    State(state): State<ServerState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let path = uri.path().to_string();
    let reply = if path.starts_with("/storage/") {
        state.storage_reply.clone()
    } else {
        state.table_reply.clone()
    };
    state.captured.lock().await.push(CapturedRequest {
        path,
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        content_type: header(&headers, "content-type"),
        prefer: header(&headers, "prefer"),
        upsert: header(&headers, "x-upsert"),
        body: body.to_vec(),
    });
    reply
}

async fn spawn_backend_server(
    storage_reply: (StatusCode, &str),
    table_reply: (StatusCode, &str),
) -> Result<(String, Arc<Mutex<Vec<CapturedRequest>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        captured: captured.clone(),
        storage_reply: (storage_reply.0, storage_reply.1.to_string()),
        table_reply: (table_reply.0, table_reply.1.to_string()),
    };
    let app = Router::new()
        .route("/storage/v1/object/:bucket/:key", post(handle_post))
        .route("/rest/v1/:table", post(handle_post))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), captured))
}

fn settings_for(server_url: &str) -> BackendSettings {
    BackendSettings {
        supabase_url: server_url.to_string(),
        supabase_anon_key: ANON_KEY.to_string(),
        ..BackendSettings::default()
    }
}

fn sample_row(photo_path: &str) -> RegistrationRow {
    RegistrationDraft {
        first_name: Some("Alice".into()),
        last_name: Some("Mbala".into()),
        gender: Gender::Female,
        marital_status: MaritalStatus::Married,
        email: Some("alice.mbala@example.org".into()),
        target_faculty: Some("Médecine".into()),
        target_department: Some("Chirurgie".into()),
        ..RegistrationDraft::default()
    }
    .to_row(photo_path)
}

#[tokio::test]
async fn upload_posts_bytes_to_bucket_object_path() {
    let (server_url, captured) = spawn_backend_server(
        (StatusCode::OK, r#"{"Key":"passport_photos/1-abc.jpg"}"#),
        (StatusCode::CREATED, ""),
    )
    .await
    .expect("spawn server");
    let backend = SupabaseBackend::new(settings_for(&server_url)).expect("client");
    assert!(backend.is_configured());

    let stored = backend
        .upload("passport_photos", "1-abc.jpg", b"jpeg-bytes", "image/jpeg")
        .await
        .expect("upload");
    assert_eq!(stored.path, "1-abc.jpg");

    let requests = captured.lock().await.clone();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/storage/v1/object/passport_photos/1-abc.jpg");
    assert_eq!(request.apikey.as_deref(), Some(ANON_KEY));
    assert_eq!(
        request.authorization.as_deref(),
        Some("Bearer test-anon-key")
    );
    assert_eq!(request.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(request.upsert.as_deref(), Some("false"));
    assert_eq!(request.body, b"jpeg-bytes");
}

#[tokio::test]
async fn insert_posts_single_row_array_with_minimal_return() {
    let (server_url, captured) =
        spawn_backend_server((StatusCode::OK, "{}"), (StatusCode::CREATED, ""))
            .await
            .expect("spawn server");
    let backend = SupabaseBackend::new(settings_for(&format!("{server_url}/"))).expect("client");

    backend
        .insert("registrations", &sample_row("1-abc.jpg"))
        .await
        .expect("insert");

    let requests = captured.lock().await.clone();
    let request = &requests[0];
    assert_eq!(request.path, "/rest/v1/registrations");
    assert_eq!(request.prefer.as_deref(), Some("return=minimal"));
    assert_eq!(request.apikey.as_deref(), Some(ANON_KEY));

    let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
    let rows = body.as_array().expect("array payload");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["first_name"], "Alice");
    assert_eq!(row["gender"], "F");
    assert_eq!(row["marital_status"], "Marié(e)");
    assert_eq!(row["target_faculty"], "Médecine");
    assert_eq!(row["passport_photo_url"], "1-abc.jpg");
    assert!(row.get("previous_school").is_none());
}

#[tokio::test]
async fn upload_error_carries_storage_message() {
    let (server_url, _captured) = spawn_backend_server(
        (
            StatusCode::BAD_REQUEST,
            r#"{"statusCode":"404","error":"Bucket not found","message":"Bucket not found"}"#,
        ),
        (StatusCode::CREATED, ""),
    )
    .await
    .expect("spawn server");
    let backend = SupabaseBackend::new(settings_for(&server_url)).expect("client");

    let err = backend
        .upload("passport_photos", "1-abc.jpg", b"x", "image/jpeg")
        .await
        .expect_err("bucket missing");
    assert_eq!(err.to_string(), "Bucket not found");
}

#[tokio::test]
async fn insert_conflict_surfaces_backend_message_through_coordinator() {
    let (server_url, captured) = spawn_backend_server(
        (StatusCode::OK, "{}"),
        (
            StatusCode::CONFLICT,
            r#"{"code":"23505","details":null,"hint":null,"message":"duplicate email"}"#,
        ),
    )
    .await
    .expect("spawn server");
    let coordinator = SubmissionCoordinator::new(connect_backend(&settings_for(&server_url)));
    let draft = RegistrationDraft {
        first_name: Some("Alice".into()),
        photo: Some(jpeg_of_size("portrait.jpg", 64)),
        ..RegistrationDraft::default()
    };

    let err = coordinator.submit(&draft).await.expect_err("conflict");
    assert_eq!(err, SubmissionError::Insert("duplicate email".into()));

    let requests = captured.lock().await.clone();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].path.starts_with("/storage/v1/object/passport_photos/"));
    assert_eq!(requests[1].path, "/rest/v1/registrations");
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let backend = SupabaseBackend::new(settings_for(&format!("http://{addr}"))).expect("client");
    let result = backend.insert("registrations", &sample_row("")).await;
    assert!(result.is_err());
}

#[test]
fn placeholder_settings_yield_unconfigured_backend() {
    let backend = connect_backend(&BackendSettings::default());
    assert!(!backend.is_configured());
}
