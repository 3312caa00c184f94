//! Descoberta do intervalo de páginas das leis e decretos.
//!
//! A seção começa na primeira página com o título "Leis e Decretos" e
//! termina (inclusive) na primeira página, a partir dela, com "Atos do
//! Governador". Páginas sem texto são puladas.

use std::ops::RangeInclusive;

use regex::Regex;

use crate::error::ExtractError;
use crate::matcher::compile;
use crate::source::PageSource;

pub struct PageLocator {
    laws_and_decrees: Regex,
    governor_acts: Regex,
}

impl PageLocator {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            laws_and_decrees: compile(r"(?i)Leis\s*e\s*Decretos")?,
            governor_acts: compile(r"(?i)Atos\s*do\s*Governador")?,
        })
    }

    /// Índices (base 0) das páginas a varrer, ou `None` se algum dos
    /// títulos faltar.
    pub fn discover_range(
        &self,
        source: &impl PageSource,
    ) -> Result<Option<RangeInclusive<usize>>, ExtractError> {
        let mut start = None;
        for index in 0..source.page_count() {
            let text = source.page_text(index)?;
            if text.trim().is_empty() {
                continue;
            }
            if start.is_none() && self.laws_and_decrees.is_match(&text) {
                start = Some(index);
            }
            if let Some(first) = start {
                if self.governor_acts.is_match(&text) {
                    tracing::debug!(first = first + 1, last = index + 1, "Seção do Executivo delimitada");
                    return Ok(Some(first..=index));
                }
            }
        }
        Ok(None)
    }
}
