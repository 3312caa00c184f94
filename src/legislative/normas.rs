//! # Normas — Leis e Resoluções Publicadas
//!
//! Uma norma por linha, no formato impresso pelo Diário do Legislativo:
//!
//! ```text
//! LEI Nº 12.345, DE 10 DE MAIO DE 2020        → LEI 12345 2020
//! RESOLUÇÃO Nº 5.678/2021                     → RAL 5678  2021
//! LEI COMPLEMENTAR Nº 170                     → (descartada: sem ano)
//! ```
//!
//! O ano vem do sufixo `/AAAA` ou da data por extenso; linhas sem ano são
//! ruído e caem fora. Repetições da mesma `(sigla, número, ano)` ficam só
//! na primeira ocorrência.

use std::collections::HashSet;

use regex::Regex;

use crate::catalog::{Catalog, TypeTable};
use crate::error::ExtractError;
use crate::matcher::{compile, PatternSet};
use crate::records::NormRecord;
use crate::text::strip_separators;

pub struct NormScanner {
    patterns: PatternSet,
    types: TypeTable,
}

impl NormScanner {
    pub fn new(catalog: &Catalog) -> Result<Self, ExtractError> {
        let norm: Regex = compile(&format!(
            r"(?m)^({}) Nº (\d{{1,5}}(?:\.\d{{0,3}})?)(?:/(\d{{4}}))?(?:, DE .+ DE (\d{{4}}))?$",
            catalog.norm_types.alternation(false)
        ))?;
        Ok(Self {
            patterns: PatternSet::new().with("norma", norm),
            types: catalog.norm_types.clone(),
        })
    }

    pub fn extract(&self, text: &str) -> Vec<NormRecord> {
        let mut seen = HashSet::new();
        let mut normas = Vec::new();

        for span in self.patterns.find_all(text) {
            let Some(year) = span.group(3).or(span.group(4)) else {
                continue;
            };
            let Some(code) = self.types.code_for(span.group_or_empty(1)) else {
                continue;
            };
            let record = NormRecord::new(code, strip_separators(span.group_or_empty(2)), year);
            if seen.insert(record.key()) {
                normas.push(record);
            }
        }

        tracing::debug!(normas = normas.len(), "Normas extraídas");
        normas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<NormRecord> {
        NormScanner::new(&Catalog::default()).unwrap().extract(text)
    }

    #[test]
    fn full_date_line_yields_one_norm() {
        let normas = scan("LEI Nº 12.345, DE 10 DE MAIO DE 2020");
        assert_eq!(normas, vec![NormRecord::new("LEI", "12345", "2020")]);
    }

    #[test]
    fn slash_year_is_accepted() {
        let normas = scan("texto\nRESOLUÇÃO Nº 5.678/2021\nmais texto");
        assert_eq!(normas, vec![NormRecord::new("RAL", "5678", "2021")]);
    }

    #[test]
    fn line_without_year_is_dropped() {
        assert!(scan("LEI COMPLEMENTAR Nº 170").is_empty());
    }

    #[test]
    fn complementary_law_is_not_read_as_plain_law() {
        let normas = scan("LEI COMPLEMENTAR Nº 170, DE 2 DE JUNHO DE 2023");
        assert_eq!(normas, vec![NormRecord::new("LCP", "170", "2023")]);
    }

    #[test]
    fn mid_line_mention_is_ignored() {
        assert!(scan("conforme a LEI Nº 1.000/2019 dispõe").is_empty());
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let text = "DELIBERAÇÃO DA MESA Nº 2.800/2024\nEMENDA À CONSTITUIÇÃO Nº 115/2024\nDELIBERAÇÃO DA MESA Nº 2.800/2024";
        let normas = scan(text);
        assert_eq!(
            normas,
            vec![
                NormRecord::new("DLB", "2800", "2024"),
                NormRecord::new("EMC", "115", "2024"),
            ]
        );
    }
}
