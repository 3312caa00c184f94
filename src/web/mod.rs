//! # Módulo Web — API de Extração dos Diários
//!
//! Camada fina sobre os motores: recebe o documento, delega a extração e
//! devolve os registros em JSON. Planilhas, links e interface ficam com
//! quem consome a API.
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ Cliente (interface, planilha, script)                          │
//! ├───────────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                                      │
//! │  ├── GET  /status                 → JSON: pronto/modos/entrada │
//! │  ├── POST /extrair/legislativo    → multipart pdf | texto      │
//! │  ├── POST /extrair/administrativo → multipart pdf              │
//! │  └── POST /extrair/executivo      → JSON PreparedLayout        │
//! ├───────────────────────────────────────────────────────────────┤
//! │ DefaultBodyLimit (EXTRATOR_MAX_UPLOAD_MB) + CORS permissivo    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState` com os motores) |
//! | [`handlers`] | Handlers Axum e mapeamento de erros |

pub mod handlers;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
///
/// `max_upload_bytes` limita o corpo de qualquer requisição (PDFs do
/// Legislativo passam fácil dos 10MB).
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        // ── Saúde ─────────────────────────────────────────────
        .route("/status", get(handlers::status))
        // ── Extração ──────────────────────────────────────────
        .route("/extrair/legislativo", post(handlers::extract_legislative))
        .route("/extrair/administrativo", post(handlers::extract_administrative))
        .route("/extrair/executivo", post(handlers::extract_executive))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;

    const BOUNDARY: &str = "limite-do-formulario";

    fn router() -> Router {
        let state = AppState::new(Arc::new(Catalog::default())).unwrap();
        create_router(state, 1024 * 1024)
    }

    fn multipart(uri: &str, field: &str, value: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ─── status ────────────────────────────────────────────────

    #[tokio::test]
    async fn status_lists_modes() {
        let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
        assert_eq!(body["modos"], json!(["legislativo", "administrativo", "executivo"]));
        assert!(body["entrada_executivo"].as_str().unwrap().contains("PreparedLayout"));
    }

    // ─── legislativo ───────────────────────────────────────────

    #[tokio::test]
    async fn legislative_text_field_is_extracted() {
        let text = "LEI Nº 12.345, DE 10 DE MAIO DE 2020\n\n\nRESOLUÇÃO  Nº 5.678/2021";
        let (status, body) = send(multipart("/extrair/legislativo", "texto", text)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["normas"],
            json!([
                {"code": "LEI", "number": "12345", "year": "2020"},
                {"code": "RAL", "number": "5678", "year": "2021"}
            ])
        );
        assert_eq!(body["pareceres"], json!([]));
    }

    #[tokio::test]
    async fn form_without_known_field_is_bad_request() {
        let (status, body) = send(multipart("/extrair/legislativo", "outro", "x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["erro"].as_str().unwrap().contains("pdf"));
    }

    // ─── administrativo ────────────────────────────────────────

    #[tokio::test]
    async fn administrative_rejects_text_field() {
        let (status, _) = send(multipart("/extrair/administrativo", "texto", "PORTARIA DGE Nº 1/2024")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreadable_pdf_is_unprocessable() {
        let (status, body) = send(multipart("/extrair/administrativo", "pdf", "não é pdf")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["erro"].as_str().unwrap().contains("PDF"));
    }

    // ─── executivo ─────────────────────────────────────────────

    #[tokio::test]
    async fn executive_layout_is_scanned() {
        let layout = json!({
            "pages": ["Leis e Decretos ... Atos do Governador"],
            "columns": [
                {"page": 1, "column": 1, "text": "LEI Nº 100, DE 1 DE JANEIRO DE 2020 Art. 1º"},
                {"page": 1, "column": 2, "text": "Ficam revogados a LEI Nº 90/2010 e o DECRETO Nº 80/2009."}
            ]
        });
        let (status, body) = send(json_request("/extrair/executivo", layout.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["warning"], Value::Null);
        assert_eq!(body["rows"][0]["row"], "primary");
        assert_eq!(body["rows"][0]["sanction_date"], "01/01/2020");
        assert_eq!(body["rows"][0]["amendments"], "LEI 90 2010");
        assert_eq!(body["rows"][1], json!({"row": "continuation", "amendment": "DEC 80 2009"}));
    }

    #[tokio::test]
    async fn executive_without_section_returns_warning() {
        let layout = json!({"pages": ["nada aqui"]});
        let (status, body) = send(json_request("/extrair/executivo", layout.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"], json!([]));
        assert!(body["warning"].as_str().unwrap().contains("Leis e Decretos"));
    }

    #[tokio::test]
    async fn executive_missing_column_is_unprocessable() {
        let layout = json!({"pages": ["Leis e Decretos; Atos do Governador"], "columns": []});
        let (status, body) = send(json_request("/extrair/executivo", layout.to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["erro"].as_str().unwrap().contains("coluna 1"));
    }

    #[tokio::test]
    async fn malformed_layout_is_bad_request() {
        let (status, body) = send(json_request("/extrair/executivo", "{\"pages\": 3}".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["erro"].as_str().unwrap().starts_with("layout inválido"));
    }
}
