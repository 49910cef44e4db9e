//! REST API endpoints.

use crate::state::{AppState, QueryError};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kgassist_core::prelude::{AssistError, QueryOutcome, SearchMethod};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// An error rendered as `{ "error": <code>, "message": <text> }`.
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl From<AssistError> for ApiError {
    fn from(e: AssistError) -> Self {
        let (status, code) = match &e {
            AssistError::ProjectRootMissing(_) | AssistError::NoDocuments { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "no_documents")
            }
            AssistError::UnknownDocument(_) => (StatusCode::NOT_FOUND, "unknown_document"),
            AssistError::EmptyQuestion => (StatusCode::BAD_REQUEST, "empty_question"),
            AssistError::InvalidMethod(_) => (StatusCode::BAD_REQUEST, "invalid_method"),
            AssistError::ToolNotFound(_) | AssistError::ToolSpawn { .. } => {
                (StatusCode::BAD_GATEWAY, "tool_unavailable")
            }
            AssistError::Config(_) | AssistError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        let message = match e {
            AssistError::EmptyQuestion => "Please enter a question.".to_string(),
            other => other.to_string(),
        };
        Self { status, code, message }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Assist(e) => e.into(),
            QueryError::Join(e) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "internal",
                message: e.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_request",
            message: e.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(code = self.code, "{}", self.message);
        }
        (
            self.status,
            Json(json!({ "error": self.code, "message": self.message })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentInfo {
    pub name: String,
    pub has_graph: bool,
}

#[derive(Debug, Serialize)]
pub struct MethodInfo {
    pub name: SearchMethod,
    pub help: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<DocumentInfo>,
    pub methods: Vec<MethodInfo>,
    pub default_method: SearchMethod,
}

/// List available documents.
pub async fn get_documents(State(state): State<AppState>) -> Result<Json<DocumentsResponse>, ApiError> {
    let catalog = state.catalog()?;
    let documents = catalog
        .documents()
        .iter()
        .map(|doc| DocumentInfo {
            name: doc.name.clone(),
            has_graph: catalog.find_graph_image(doc, &state.config().graph).is_some(),
        })
        .collect();

    Ok(Json(DocumentsResponse {
        documents,
        methods: SearchMethod::ALL
            .iter()
            .map(|m| MethodInfo { name: *m, help: m.help() })
            .collect(),
        default_method: SearchMethod::default(),
    }))
}

/// Query request body.
#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// Defaults to the first available document.
    #[serde(default)]
    pub document: Option<String>,
    /// Case-insensitive; defaults to `global`.
    #[serde(default)]
    pub method: Option<String>,
    pub question: String,
}

impl QueryBody {
    fn method(&self) -> Result<SearchMethod, AssistError> {
        match self.method.as_deref() {
            Some(m) => m.parse(),
            None => Ok(SearchMethod::default()),
        }
    }
}

/// Query response: the tool's answer or its error output.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryResponse {
    Answer {
        document: String,
        method: SearchMethod,
        answer: String,
    },
    Error {
        document: String,
        method: SearchMethod,
        code: Option<i32>,
        stderr: String,
    },
}

/// Forward a question to the query tool.
pub async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(body) = body?;
    let method = body.method()?;
    let (doc, outcome) = state
        .query(body.document.as_deref(), method, body.question)
        .await?;

    Ok(Json(match outcome {
        QueryOutcome::Answer(answer) => QueryResponse::Answer {
            document: doc.name,
            method,
            answer,
        },
        QueryOutcome::Failed { code, stderr } => QueryResponse::Error {
            document: doc.name,
            method,
            code,
            stderr,
        },
    }))
}

/// Serve a document's knowledge graph image.
pub async fn get_graph(
    State(state): State<AppState>,
    Path(document): Path<String>,
) -> Result<Response, ApiError> {
    let Some(path) = state.graph_image(&document)? else {
        return Err(ApiError {
            status: StatusCode::NOT_FOUND,
            code: "graph_not_found",
            message: "Knowledge graph image not found.".to_string(),
        });
    };

    let bytes = tokio::fs::read(&path).await.map_err(AssistError::from)?;
    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
