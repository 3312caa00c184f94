//! # Motor do Diário Administrativo
//!
//! Varredura página a página, sem estado entre páginas:
//!
//! ```text
//! página ──▶ colapsa espaços ──┬──▶ <ATO> Nº N/AAAA  ──▶ DLB | PRT | OSV
//!                              └──▶ DECISÃO DA 1ª-SECRETARIA? ──▶ uma linha DCS
//! ```
//!
//! A linha sentinela `DCS` (sem número nem ano) sai **uma vez por página**
//! em que a frase aparece, depois dos atos daquela página, mesmo que a
//! frase se repita na mesma página.

use regex::Regex;

use crate::catalog::{Catalog, TypeTable};
use crate::error::ExtractError;
use crate::matcher::{compile, PatternSet};
use crate::records::NormRecord;
use crate::source::PageSource;
use crate::text::{collapse_whitespace, strip_separators};

/// Sigla da linha sentinela das decisões da 1ª-Secretaria.
pub const SECRETARIAT_DECISION: &str = "DCS";

pub struct AdministrativeEngine {
    acts: PatternSet,
    sentinel: Regex,
    types: TypeTable,
}

impl AdministrativeEngine {
    pub fn new(catalog: &Catalog) -> Result<Self, ExtractError> {
        let act = compile(&format!(
            r"({})\s+Nº\s+([\d\.]+)/(\d{{4}})",
            catalog.administrative_types.alternation(false)
        ))?;
        Ok(Self {
            acts: PatternSet::new().with("ato", act),
            sentinel: compile(r"DECIS[ÃA]O DA 1ª-SECRETARIA")?,
            types: catalog.administrative_types.clone(),
        })
    }

    pub fn process(&self, source: &impl PageSource) -> Result<Vec<NormRecord>, ExtractError> {
        let span = tracing::info_span!("administrative_extraction", pages = source.page_count());
        let _guard = span.enter();

        let mut rows = Vec::new();
        for index in 0..source.page_count() {
            let text = collapse_whitespace(&source.page_text(index)?);
            let before = rows.len();
            self.scan_page(&text, &mut rows);
            tracing::debug!(page = index + 1, rows = rows.len() - before, "Página processada");
        }

        tracing::info!(rows = rows.len(), "Diário Administrativo processado");
        Ok(rows)
    }

    fn scan_page(&self, text: &str, rows: &mut Vec<NormRecord>) {
        for span in self.acts.find_all(text) {
            let Some(code) = self.types.code_for(span.group_or_empty(1)) else {
                continue;
            };
            rows.push(NormRecord::new(
                code,
                strip_separators(span.group_or_empty(2)),
                span.group_or_empty(3),
            ));
        }
        if self.sentinel.is_match(text) {
            rows.push(NormRecord::new(SECRETARIAT_DECISION, "", ""));
        }
    }
}
