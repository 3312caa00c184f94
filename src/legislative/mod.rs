//! # Motor do Diário do Legislativo
//!
//! Quatro varreduras independentes sobre o mesmo texto corrido, cada uma
//! com seu próprio pipeline e política de deduplicação:
//!
//! ```text
//!                         ┌─▶ NormScanner        ──▶ normas
//! texto (legislative_text)├─▶ PropositionScanner ──▶ proposições
//!                         ├─▶ RequestScanner     ──▶ requerimentos
//!                         └─▶ OpinionScanner     ──▶ pareceres
//! ```
//!
//! | Família | Âncora | Desambiguação | Dedup |
//! |---------|--------|---------------|-------|
//! | Normas | início de linha | exige ano | primeira ocorrência |
//! | Proposições | início de parágrafo | [`ContextDisambiguator`](crate::disambiguator::ContextDisambiguator) | primeira aceita |
//! | Requerimentos | frases e blocos | conjunto de exclusão | primeira na ordem das varreduras |
//! | Pareceres | seção de tramitação | âncora "Conclusão" anterior | conjunto de tipos por projeto |
//!
//! O motor não guarda estado entre chamadas: `process` é uma função pura
//! do texto.

pub mod normas;
pub mod pareceres;
pub mod proposicoes;
pub mod requerimentos;

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::ExtractError;
use crate::records::{NormRecord, OpinionRecord, PropositionRecord, RequestRecord};

use normas::NormScanner;
use pareceres::OpinionScanner;
use proposicoes::PropositionScanner;
use requerimentos::RequestScanner;

/// As quatro tabelas extraídas de um diário.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LegislativeReport {
    pub normas: Vec<NormRecord>,
    pub proposicoes: Vec<PropositionRecord>,
    pub requerimentos: Vec<RequestRecord>,
    pub pareceres: Vec<OpinionRecord>,
}

pub struct LegislativeEngine {
    normas: NormScanner,
    proposicoes: PropositionScanner,
    requerimentos: RequestScanner,
    pareceres: OpinionScanner,
}

impl LegislativeEngine {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, ExtractError> {
        Ok(Self {
            normas: NormScanner::new(&catalog)?,
            proposicoes: PropositionScanner::new(&catalog)?,
            requerimentos: RequestScanner::new(Arc::clone(&catalog))?,
            pareceres: OpinionScanner::new(catalog)?,
        })
    }

    pub fn process(&self, text: &str) -> LegislativeReport {
        let span = tracing::info_span!("legislative_extraction", chars = text.chars().count());
        let _guard = span.enter();

        let report = LegislativeReport {
            normas: self.normas.extract(text),
            proposicoes: self.proposicoes.extract(text),
            requerimentos: self.requerimentos.extract(text),
            pareceres: self.pareceres.extract(text),
        };

        tracing::info!(
            normas = report.normas.len(),
            proposicoes = report.proposicoes.len(),
            requerimentos = report.requerimentos.len(),
            pareceres = report.pareceres.len(),
            "Diário do Legislativo processado"
        );
        report
    }
}
