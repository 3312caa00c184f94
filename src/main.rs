#![allow(dead_code)]
#![allow(rustdoc::broken_intra_doc_links, rustdoc::invalid_html_tags)]
//! # Extrator de Diários Oficiais
//!
//! **Ponto de entrada** do serviço que transforma diários oficiais
//! (Legislativo, Administrativo, Executivo) em registros tabulares.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ web (axum)  → handlers → spawn_blocking                   │
//! ├───────────────────────────────────────────────────────────┤
//! │ pdf / source  → texto por página, por coluna              │
//! ├───────────────────────────────────────────────────────────┤
//! │ legislative │ administrative │ executive   (motores)      │
//! ├───────────────────────────────────────────────────────────┤
//! │ matcher · disambiguator · text · records                  │
//! ├───────────────────────────────────────────────────────────┤
//! │ catalog  (tabelas fixas, Arc compartilhado)               │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG)
//!   ├── Lê ServerConfig do ambiente
//!   ├── Monta Catalog (Arc) e os três motores
//!   ├── Monta AppState e Router
//!   └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Logs de cada varredura
//! RUST_LOG=debug cargo run
//!
//! # Extrair normas de um Diário do Legislativo
//! curl -F pdf=@diario.pdf http://localhost:3000/extrair/legislativo
//! ```

/// Módulo `administrative` — motor do Diário Administrativo (atos + DCS).
mod administrative;

/// Módulo `catalog` — tabelas fixas: tipos de ato, meses, classificações.
mod catalog;

/// Módulo `config` — configuração do servidor via variáveis de ambiente.
mod config;

/// Módulo `disambiguator` — regras de contexto e resolução por proximidade.
mod disambiguator;

/// Módulo `error` — erros estruturais de extração.
mod error;

/// Módulo `executive` — motor com estado do Diário do Executivo.
mod executive;

/// Módulo `legislative` — normas, proposições, requerimentos e pareceres.
mod legislative;

/// Módulo `matcher` — busca primitiva de padrões com offsets.
mod matcher;

/// Módulo `pdf` — extração de texto por página e montagem do texto corrido.
mod pdf;

/// Módulo `records` — registros emitidos pelos motores.
mod records;

/// Módulo `source` — traits de fonte de texto e layouts pré-extraídos.
mod source;

/// Módulo `text` — normalização e janelas de contexto.
mod text;

/// Módulo `web` — servidor axum e handlers JSON.
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Exemplo: RUST_LOG=extrator_diarios=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("📰 Extrator de Diários — Starting...");

    let config = ServerConfig::from_env()?;

    // Catálogo imutável, compartilhado por todos os motores.
    let catalog = Arc::new(Catalog::default());
    let state = AppState::new(catalog).context("Falha ao compilar os padrões do catálogo")?;

    let app = web::create_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Falha ao escutar em {}", config.addr))?;
    tracing::info!(
        addr = %config.addr,
        max_upload_bytes = config.max_upload_bytes,
        "🚀 Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
