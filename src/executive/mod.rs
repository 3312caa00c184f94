//! # Motor do Diário do Executivo
//!
//! O único motor com estado: acompanha a "norma atual" enquanto percorre
//! as colunas do diário e anexa a ela as normas que cada comando altera ou
//! revoga.
//!
//! ## Pipeline
//!
//! ```text
//! LayoutSource
//!   ├── 1. PageLocator::discover_range → "Leis e Decretos" ..= "Atos do Governador"
//!   │        └── ausente → relatório vazio + aviso
//!   ├── 2. para cada página, coluna 1 e 2 → colapsa espaços
//!   ├── 3. eventos por posição: publicação | comando
//!   └── 4. ScanState::process_event → linhas primárias e de continuação
//! ```
//!
//! ## Comandos
//!
//! Cada comando abre uma janela de ±150 caracteres em volta de si e
//! procura referências a normas:
//!
//! | Comando | Referências anexadas |
//! |---------|----------------------|
//! | `Ficam revogados` | todas da janela |
//! | demais (`passa a vigorar`, `Fica acrescentado`…) | só a mais próxima |
//!
//! O estado atravessa colunas e páginas (uma revogação no topo da coluna 2
//! pertence à lei publicada no fim da coluna 1) e nasce vazio a cada
//! chamada de [`ExecutiveEngine::process`].

pub mod pages;
pub mod state;

use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::disambiguator::nearest_by_distance;
use crate::error::ExtractError;
use crate::matcher::{compile, PatternSet, Span};
use crate::records::ExecutiveRow;
use crate::source::{Column, LayoutSource};
use crate::text::{back_chars, collapse_whitespace, forward_chars, strip_separators};

use pages::PageLocator;
use state::{Publication, Reference, ScanEvent, ScanState};

/// Raio, em caracteres, da janela em volta de cada comando.
pub const COMMAND_RADIUS: usize = 150;

pub const MISSING_SECTION_WARNING: &str =
    "Não foi encontrado o trecho de 'Leis e Decretos' ou 'Atos do Governador' para delimitar a seção.";

/// Linhas extraídas e, quando a seção não pôde ser delimitada, o aviso.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecutiveReport {
    pub rows: Vec<ExecutiveRow>,
    pub warning: Option<String>,
}

pub struct ExecutiveEngine {
    catalog: Arc<Catalog>,
    locator: PageLocator,
    events: PatternSet,
    reference: Regex,
}

impl ExecutiveEngine {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, ExtractError> {
        let types = catalog.executive_types.alternation(true);
        let publication = compile(&format!(
            r"\b({types})\s+N[º°]\s*([\d\s\.]+),\s*DE\s+([A-ZÇ\s\d]+)\b"
        ))?;
        let command = compile(
            r"(?i)(Ficam\s+revogados|Fica\s+acrescentado|Ficam\s+alterados|passando\s+o\s+item|passa\s+a\s+vigorar|passam\s+a\s+vigorar)",
        )?;
        let reference = compile(&format!(
            r"(?i)({types})\s+N[º°]?\s*([\d\s\./]+)(?:,\s*de\s*(.*?\d{{4}})?)?"
        ))?;

        Ok(Self {
            catalog,
            locator: PageLocator::new()?,
            events: PatternSet::new()
                .with("publicacao", publication)
                .with("comando", command),
            reference,
        })
    }

    pub fn process(&self, source: &impl LayoutSource) -> Result<ExecutiveReport, ExtractError> {
        let span = tracing::info_span!("executive_extraction", pages = source.page_count());
        let _guard = span.enter();

        let Some(range) = self.locator.discover_range(source)? else {
            tracing::warn!("{MISSING_SECTION_WARNING}");
            return Ok(ExecutiveReport {
                rows: Vec::new(),
                warning: Some(MISSING_SECTION_WARNING.to_string()),
            });
        };

        let mut state = ScanState::new();
        for index in range {
            for column in Column::BOTH {
                let text = collapse_whitespace(&source.column_text(index, column)?);
                self.scan_column(&text, index + 1, column, &mut state);
            }
        }

        let rows = state.into_rows();
        tracing::info!(rows = rows.len(), "Diário do Executivo processado");
        Ok(ExecutiveReport {
            rows,
            warning: None,
        })
    }

    fn scan_column(&self, text: &str, page: usize, column: Column, state: &mut ScanState) {
        for found in self.events.find_all(text) {
            let event = match found.pattern {
                "publicacao" => ScanEvent::Published(self.publication(&found, page, column)),
                _ => {
                    if !state.has_current() {
                        continue;
                    }
                    let repeal = found.as_str().to_lowercase().contains("revogado");
                    ScanEvent::Command(self.references_near(text, found.start(), repeal))
                }
            };
            state.process_event(event);
        }
    }

    fn publication(&self, span: &Span<'_>, page: usize, column: Column) -> Publication {
        Publication {
            page,
            column,
            sanction_date: self.sanction_date(span.group_or_empty(3)),
            code: self.normalize_type(span.group_or_empty(1)),
            number: strip_separators(span.group_or_empty(2)),
        }
    }

    /// Referências na janela do comando em `position`: todas, se `repeal`;
    /// senão apenas a de início mais próximo.
    ///
    /// A proximidade é medida em caracteres, como o raio da janela: `º`,
    /// `ç` e `ã` ocupam mais de um byte.
    fn references_near(&self, text: &str, position: usize, repeal: bool) -> Vec<Reference> {
        let window_start = back_chars(text, position, COMMAND_RADIUS);
        let window_end = forward_chars(text, position, COMMAND_RADIUS);
        let window = &text[window_start..window_end];
        let command_char = window[..position - window_start].chars().count();

        let candidates: Vec<(usize, Reference)> = self
            .reference
            .captures_iter(window)
            .filter_map(|caps| {
                let start = window[..caps.get(0)?.start()].chars().count();
                let reference = self.reference_from(
                    caps.get(1).map_or("", |m| m.as_str()),
                    caps.get(2).map_or("", |m| m.as_str()),
                    caps.get(3).map(|m| m.as_str()),
                )?;
                Some((start, reference))
            })
            .collect();

        if repeal {
            candidates.into_iter().map(|(_, reference)| reference).collect()
        } else {
            nearest_by_distance(&candidates, command_char, |(start, _)| *start)
                .map(|(_, reference)| vec![reference.clone()])
                .unwrap_or_default()
        }
    }

    /// Monta a referência; números vazios não formam referência.
    ///
    /// `N/AAAA` vira número e ano; um ano na data por extenso prevalece.
    fn reference_from(&self, raw_type: &str, raw_number: &str, date: Option<&str>) -> Option<Reference> {
        let compact = strip_separators(raw_number);
        let (number, slash_year) = match compact.split_once('/') {
            Some((number, rest)) => (number.to_string(), rest.replace('/', "")),
            None => (compact.clone(), String::new()),
        };
        if number.is_empty() {
            return None;
        }
        let year = date
            .and_then(first_year)
            .or_else(|| is_year(&slash_year).then_some(slash_year))
            .unwrap_or_default();

        Some(Reference {
            code: self.normalize_type(raw_type),
            number,
            year,
        })
    }

    fn normalize_type(&self, raw: &str) -> String {
        let name = collapse_whitespace(raw).to_uppercase();
        self.catalog
            .executive_types
            .code_for(&name)
            .map(str::to_string)
            .unwrap_or_else(|| raw.trim().to_string())
    }

    /// `1 DE JANEIRO DE 2020` → `01/01/2020`; qualquer falha → vazio.
    fn sanction_date(&self, raw: &str) -> String {
        self.parse_date(raw.trim()).unwrap_or_default()
    }

    fn parse_date(&self, raw: &str) -> Option<String> {
        let mut parts = raw.split(" DE ");
        let day = parts.next()?.trim();
        let month = parts.next()?.trim();
        let year = parts.next()?.trim();

        if day.is_empty() || !day.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let month = self.catalog.month_number(&month.to_uppercase())?;
        let year = year.get(..4).filter(|y| is_year(y))?;
        Some(format!("{day:0>2}/{month}/{year}"))
    }
}

fn is_year(candidate: &str) -> bool {
    candidate.len() == 4 && candidate.chars().all(|c| c.is_ascii_digit())
}

/// Primeiro ano de quatro dígitos num fragmento de data.
fn first_year(fragment: &str) -> Option<String> {
    let bytes = fragment.as_bytes();
    bytes
        .windows(4)
        .position(|w| w.iter().all(u8::is_ascii_digit))
        .map(|i| fragment[i..i + 4].to_string())
}
