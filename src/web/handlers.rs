//! # Handlers HTTP — Os Endpoints de Extração
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma
//! rota em [`super::create_router()`]. Todos respondem JSON.
//!
//! | Handler | Método | Entrada | Retorno |
//! |---------|--------|---------|---------|
//! | `status` | GET | — | `{ready, modos, entrada_executivo}` |
//! | `extract_legislative` | POST | multipart `pdf` ou `texto` | [`LegislativeReport`] |
//! | `extract_administrative` | POST | multipart `pdf` | `[NormRecord]` |
//! | `extract_executive` | POST | JSON [`PreparedLayout`] | [`ExecutiveReport`] |
//!
//! ## CPU fora do runtime
//!
//! Extração de PDF e varredura de regex são CPU-bound: rodam em
//! `tokio::task::spawn_blocking`, com o motor clonado via `Arc`.
//!
//! ## Erros
//!
//! [`ApiError`] vira `{ "erro": "..." }`: 400 para entrada inválida, 422
//! quando a extração falha (PDF ilegível, coluna ausente).

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use super::state::AppState;
use crate::error::ExtractError;
use crate::executive::ExecutiveReport;
use crate::legislative::LegislativeReport;
use crate::pdf::{legislative_text, PdfDocument};
use crate::records::NormRecord;
use crate::source::PreparedLayout;
use crate::text::{collapse_layout, normalize_unicode};

pub const MODES: [&str; 3] = ["legislativo", "administrativo", "executivo"];

/// Entrada aceita pelo Executivo: o servidor não divide páginas em colunas.
pub const EXECUTIVE_INPUT: &str =
    "JSON PreparedLayout {pages, columns: [{page, column, text}]}; colunas já separadas, PDF não é aceito";

/// Resposta do endpoint `/status`.
#[derive(Serialize)]
pub struct StatusResponse {
    pub ready: bool,
    pub modos: Vec<&'static str>,
    pub entrada_executivo: &'static str,
}

/// Falha de uma requisição de extração.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("tarefa de extração interrompida: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(format!("multipart inválido: {e}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(format!("layout inválido: {}", e.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Falha na extração");
        } else {
            tracing::warn!(error = %self, "Requisição de extração recusada");
        }
        (status, Json(serde_json::json!({ "erro": self.to_string() }))).into_response()
    }
}

/// Conteúdo enviado num formulário multipart.
enum Upload {
    Pdf(Vec<u8>),
    Text(String),
}

/// Lê o primeiro campo `pdf` (ou, se `accept_text`, `texto`) do formulário.
async fn read_upload(multipart: &mut Multipart, accept_text: bool) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("diario.pdf").to_string();
                let bytes = field.bytes().await?;
                tracing::info!(size_bytes = bytes.len(), filename = %filename, "PDF recebido");
                return Ok(Upload::Pdf(bytes.to_vec()));
            }
            "texto" if accept_text => {
                let text = field.text().await?;
                tracing::info!(chars = text.chars().count(), "Texto recebido");
                return Ok(Upload::Text(text));
            }
            _ => continue,
        }
    }
    let expected = if accept_text { "'pdf' ou 'texto'" } else { "'pdf'" };
    Err(ApiError::BadRequest(format!("nenhum campo {expected} no formulário")))
}

/// Roda `job` no pool de threads bloqueantes.
async fn blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ExtractError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

/// GET `/status` — o servidor só escuta depois que os motores existem.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: true,
        modos: MODES.to_vec(),
        entrada_executivo: EXECUTIVE_INPUT,
    })
}

/// POST `/extrair/legislativo` — PDF ou texto corrido do Diário do Legislativo.
pub async fn extract_legislative(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LegislativeReport>, ApiError> {
    let upload = read_upload(&mut multipart, true).await?;
    let engine = state.legislative.clone();

    let report = blocking(move || {
        let text = match upload {
            Upload::Pdf(bytes) => legislative_text(PdfDocument::from_bytes(&bytes)?.pages()),
            Upload::Text(raw) => collapse_layout(&normalize_unicode(&raw)),
        };
        Ok(engine.process(&text))
    })
    .await?;
    Ok(Json(report))
}

/// POST `/extrair/administrativo` — PDF do Diário Administrativo.
pub async fn extract_administrative(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<NormRecord>>, ApiError> {
    let Upload::Pdf(bytes) = read_upload(&mut multipart, false).await? else {
        return Err(ApiError::BadRequest("campo 'pdf' obrigatório".into()));
    };
    let engine = state.administrative.clone();

    let rows = blocking(move || {
        let document = PdfDocument::from_bytes(&bytes)?;
        engine.process(&document)
    })
    .await?;
    Ok(Json(rows))
}

/// POST `/extrair/executivo` — layout em colunas já extraído.
///
/// Diferente das outras rotas, não recebe o PDF: `pdf_extract` não expõe
/// coordenadas, então a divisão em colunas 1 e 2 fica com quem chama
/// (ver [`EXECUTIVE_INPUT`]).
pub async fn extract_executive(
    State(state): State<AppState>,
    payload: Result<Json<PreparedLayout>, JsonRejection>,
) -> Result<Json<ExecutiveReport>, ApiError> {
    let Json(layout) = payload?;
    tracing::info!(
        pages = layout.pages.len(),
        columns = layout.columns.len(),
        "Layout do Executivo recebido"
    );
    let engine = state.executive.clone();

    let report = blocking(move || engine.process(&layout)).await?;
    Ok(Json(report))
}
