mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode as HttpStatusCode, header};
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use common::memory_context;
use ignitor::middleware::REQUEST_ID_HEADER;
use ignitor::persistence::{MemoryDatabase, MemoryTable};
use ignitor::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Note {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Auditable for Note {
    fn stamp_audit_fields(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }
}

#[derive(Deserialize)]
struct NewNote {
    id: String,
    title: String,
}

struct NoteController {
    service: DataService<MemoryTable<Note>>,
}

impl Controller for NoteController {}

async fn create_note(
    State(controller): State<Arc<NoteController>>,
    channel: ResponseChannel,
    Json(input): Json<NewNote>,
) -> ignitor::Result<ApiResponse<Note>> {
    let note = Note {
        id: input.id,
        title: input.title,
        created_at: None,
        updated_at: None,
    };
    let note = controller.service.create(note, None).await?;
    Ok(controller.send_created_response(channel, note, None))
}

async fn get_note(
    State(controller): State<Arc<NoteController>>,
    channel: ResponseChannel,
    Path(id): Path<String>,
) -> ignitor::Result<ApiResponse<Note>> {
    let note = controller
        .service
        .find_one(Box::new(move |n: &Note| n.id == id), None)
        .await?
        .ok_or_else(|| IgnitorError::not_found("Note not found"))?;
    Ok(controller.send_response(channel, Some("Note fetched".into()), StatusCode::Ok, Some(note)))
}

#[derive(Default)]
struct NotesModule {
    controller: Option<Arc<NoteController>>,
}

#[async_trait]
impl Module for NotesModule {
    fn name(&self) -> &str {
        "notes"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    async fn setup_services(&mut self, ctx: &Arc<Context>) -> ignitor::Result<()> {
        let table = ctx
            .database::<MemoryDatabase>()?
            .table::<Note>("notes")
            .map_err(|e| IgnitorError::Internal(e.to_string()))?;
        let options = ServiceOptions {
            enable_audit_fields: true,
            ..ServiceOptions::default()
        };
        self.controller = Some(Arc::new(NoteController {
            service: DataService::with_options(table, "Note", options),
        }));
        Ok(())
    }

    async fn setup_routes(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<Router> {
        let controller = self
            .controller
            .clone()
            .ok_or_else(|| IgnitorError::Internal("services not set up".into()))?;
        Ok(Router::new()
            .route("/notes", post(create_note))
            .route("/notes/{id}", get(get_note))
            .with_state(controller))
    }
}

async fn app() -> (Application, Router) {
    let app = Application::builder()
        .context(memory_context())
        .module(NotesModule::default())
        .build()
        .await
        .unwrap();
    let router = app.router().layer(RequestIdLayer);
    (app, router)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_request(request_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/notes").header(header::CONTENT_TYPE, "application/json");
    if let Some(id) = request_id {
        builder = builder.header(REQUEST_ID_HEADER, id);
    }
    builder
        .body(Body::from(r#"{"id":"n-1","title":"Groceries"}"#))
        .unwrap()
}

#[tokio::test]
async fn created_envelope_carries_request_id_and_audit_fields() {
    let (_app, router) = app().await;

    let response = router.oneshot(create_request(Some("req-123"))).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::CREATED);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Resource created successfully");
    assert_eq!(body["meta"]["requestId"], "req-123");
    assert!(body["meta"]["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(body["data"]["title"], "Groceries");
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let (_app, router) = app().await;

    let response = router.oneshot(create_request(None)).await.unwrap();
    let echoed = response.headers()[REQUEST_ID_HEADER]
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&echoed).is_ok());

    let body = body_json(response).await;
    assert_eq!(body["meta"]["requestId"], echoed.as_str());
}

#[tokio::test]
async fn created_record_can_be_fetched() {
    let (_app, router) = app().await;

    router.clone().oneshot(create_request(None)).await.unwrap();
    let response = router
        .oneshot(Request::get("/notes/n-1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Note fetched");
    assert_eq!(body["data"]["id"], "n-1");
}

#[tokio::test]
async fn missing_record_is_a_404_error_envelope() {
    let (_app, router) = app().await;

    let response = router
        .oneshot(Request::get("/notes/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Note not found");
}

#[tokio::test]
async fn requests_fail_as_database_errors_after_shutdown() {
    let (mut app, router) = app().await;
    app.shutdown().await.unwrap();

    let response = router.oneshot(create_request(None)).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Database operation failed: Note.create");
    assert!(body["error"].get("details").is_none());
}
