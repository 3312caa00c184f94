//! # Estado da Aplicação Web
//!
//! Os três motores são montados uma única vez na inicialização, sobre o
//! mesmo [`Catalog`] imutável, e compartilhados por todos os handlers.
//!
//! ```text
//! Arc<Catalog> ──┬──▶ LegislativeEngine    ┐
//!                ├──▶ AdministrativeEngine ├──▶ AppState (Clone, Arcs)
//!                └──▶ ExecutiveEngine      ┘
//! ```
//!
//! Nenhum motor guarda estado entre chamadas: o estado da varredura do
//! Executivo nasce dentro de cada `process`, então requisições simultâneas
//! podem usar o mesmo `Arc` sem trava.

use std::sync::Arc;

use crate::administrative::AdministrativeEngine;
use crate::catalog::Catalog;
use crate::error::ExtractError;
use crate::executive::ExecutiveEngine;
use crate::legislative::LegislativeEngine;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    pub legislative: Arc<LegislativeEngine>,
    pub administrative: Arc<AdministrativeEngine>,
    pub executive: Arc<ExecutiveEngine>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, ExtractError> {
        Ok(Self {
            legislative: Arc::new(LegislativeEngine::new(Arc::clone(&catalog))?),
            administrative: Arc::new(AdministrativeEngine::new(&catalog)?),
            executive: Arc::new(ExecutiveEngine::new(catalog)?),
        })
    }
}
