//! # Pareceres — Projetos que Receberam Emenda ou Substitutivo
//!
//! Só interessa a região depois de `TRAMITAÇÃO DE PROPOSIÇÕES`, e dela
//! são removidos os trechos "Votação do Requerimento…", que citam projetos
//! sem relação com emendas.
//!
//! ## Fontes de evidência
//!
//! | Passo | Padrão | Resultado |
//! |-------|--------|-----------|
//! | a | `EMENDAS AO PROJETO DE LEI Nº N/AAAA` | PL → EMENDA |
//! | b | `EMENDA Nº K AO [SUBSTITUTIVO Nº J AO] PROJETO DE LEI [COMPLEMENTAR] Nº N/AAAA` | PL/PLC → EMENDA |
//! | c | título `EMENDA Nº K` / `SUBSTITUTIVO Nº K` | âncora `Conclusão … <tipo> Nº N/AAAA` mais próxima antes do título |
//! | d | repete (a) | idempotente |
//!
//! Cada projeto acumula um **conjunto** de tipos; no fim, mais de um tipo
//! distinto vira `SUB/EMENDA`. A ordem das menções não importa.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use regex::Regex;

use crate::catalog::Catalog;
use crate::disambiguator::nearest_preceding;
use crate::error::ExtractError;
use crate::matcher::{compile, PatternSet};
use crate::records::{OpinionKind, OpinionRecord, RecordKey};
use crate::text::strip_separators;

const SECTION_START: &str = "TRAMITAÇÃO DE PROPOSIÇÕES";

pub struct OpinionScanner {
    catalog: Arc<Catalog>,
    vote_start: Regex,
    vote_stop: Regex,
    amendments_to_bill: Regex,
    amendment_to_bill: Regex,
    titles: PatternSet,
    conclusion: Regex,
}

/// Âncora "Conclusão": projeto e offset onde o match termina.
struct Anchor {
    end: usize,
    key: RecordKey,
}

/// Mapa projeto → tipos, preservando a ordem da primeira menção.
#[derive(Default)]
struct KindMap {
    order: Vec<RecordKey>,
    kinds: HashMap<RecordKey, BTreeSet<OpinionKind>>,
}

impl KindMap {
    fn add(&mut self, key: RecordKey, kind: OpinionKind) {
        if !self.kinds.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.kinds.entry(key).or_default().insert(kind);
    }

    fn into_records(mut self) -> Vec<OpinionRecord> {
        self.order
            .into_iter()
            .filter_map(|key| {
                let kinds = self.kinds.remove(&key)?;
                let kind = if kinds.len() > 1 {
                    OpinionKind::AmendmentAndSubstitute
                } else {
                    kinds.into_iter().next()?
                };
                let (code, number, year) = key;
                Some(OpinionRecord {
                    code,
                    number,
                    year,
                    kind,
                })
            })
            .collect()
    }
}

impl OpinionScanner {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, ExtractError> {
        let conclusion = compile(&format!(
            r"(?is)Conclusão\s*([\s\S]*?)({})\s+(?:nº|Nº)?\s*(\d{{1,4}}(?:\.\d{{1,3}})?)\s*/\s*(\d{{4}})",
            catalog.opinion_types.alternation(false)
        ))?;
        Ok(Self {
            vote_start: compile(r"(?i)Votação do Requerimento")?,
            vote_stop: compile(
                r"(?i)Votação do Requerimento|Diário do Legislativo|Projetos de Lei Complementar",
            )?,
            amendments_to_bill: compile(r"(?i)EMENDAS AO PROJETO DE LEI Nº (\d{1,4}\.?\d{0,3})/(\d{4})")?,
            amendment_to_bill: compile(
                r"(?i)EMENDA Nº (\d+)\s+AO\s+(?:SUBSTITUTIVO Nº \d+\s+AO\s+)?PROJETO DE LEI( COMPLEMENTAR)? Nº (\d{1,4}\.?\d{0,3})/(\d{4})",
            )?,
            titles: PatternSet::new()
                .with("emenda", compile(r"(?m)^\s*EMENDA Nº (\d+)\s*")?)
                .with("substitutivo", compile(r"(?m)^\s*SUBSTITUTIVO Nº (\d+)\s*")?),
            conclusion,
            catalog,
        })
    }

    pub fn extract(&self, text: &str) -> Vec<OpinionRecord> {
        let Some(start) = text.find(SECTION_START) else {
            tracing::debug!("Seção de tramitação ausente; nenhum parecer");
            return Vec::new();
        };
        let region = self.strip_votes(&text[start + SECTION_START.len()..]);
        let mut map = KindMap::default();

        self.scan_amendments_to_bill(&region, &mut map);
        self.scan_amendment_to_bill(&region, &mut map);
        self.scan_titles(&region, &mut map);
        self.scan_amendments_to_bill(&region, &mut map);

        let pareceres = map.into_records();
        tracing::debug!(pareceres = pareceres.len(), "Pareceres extraídos");
        pareceres
    }

    /// Remove cada trecho "Votação do Requerimento" até o próximo marcador
    /// de parada (ou o fim do texto).
    fn strip_votes(&self, region: &str) -> String {
        let mut kept = String::with_capacity(region.len());
        let mut pos = 0;
        while let Some(vote) = self.vote_start.find_at(region, pos) {
            kept.push_str(&region[pos..vote.start()]);
            pos = self
                .vote_stop
                .find_at(region, vote.end())
                .map(|stop| stop.start())
                .unwrap_or(region.len());
        }
        kept.push_str(&region[pos..]);
        kept
    }

    fn scan_amendments_to_bill(&self, region: &str, map: &mut KindMap) {
        for caps in self.amendments_to_bill.captures_iter(region) {
            let key = ("PL".to_string(), strip_separators(&caps[1]), caps[2].to_string());
            map.add(key, OpinionKind::Amendment);
        }
    }

    fn scan_amendment_to_bill(&self, region: &str, map: &mut KindMap) {
        for caps in self.amendment_to_bill.captures_iter(region) {
            let code = if caps.get(2).is_some() { "PLC" } else { "PL" };
            let key = (code.to_string(), strip_separators(&caps[3]), caps[4].to_string());
            map.add(key, OpinionKind::Amendment);
        }
    }

    /// Títulos soltos herdam o projeto da última "Conclusão" antes deles.
    fn scan_titles(&self, region: &str, map: &mut KindMap) {
        let anchors: Vec<Anchor> = self
            .conclusion
            .captures_iter(region)
            .filter_map(|caps| {
                let end = caps.get(0)?.end();
                let raw = &caps[2];
                let code = self
                    .catalog
                    .opinion_types
                    .code_for(&raw.to_lowercase())
                    .map(str::to_string)
                    .unwrap_or_else(|| raw.to_uppercase());
                Some(Anchor {
                    end,
                    key: (code, strip_separators(&caps[3]), caps[4].to_string()),
                })
            })
            .collect();

        for title in self.titles.find_all(region) {
            let Some(anchor) = nearest_preceding(&anchors, title.start(), |a| a.end) else {
                tracing::trace!(titulo = title.as_str().trim(), "Título sem conclusão anterior");
                continue;
            };
            let kind = match title.pattern {
                "substitutivo" => OpinionKind::Substitute,
                _ => OpinionKind::Amendment,
            };
            map.add(anchor.key.clone(), kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<OpinionRecord> {
        OpinionScanner::new(Arc::new(Catalog::default()))
            .unwrap()
            .extract(text)
    }

    fn rec(code: &str, number: &str, year: &str, kind: OpinionKind) -> OpinionRecord {
        OpinionRecord {
            code: code.into(),
            number: number.into(),
            year: year.into(),
            kind,
        }
    }

    // ─── região ────────────────────────────────────────────────

    #[test]
    fn nothing_before_section_start_counts() {
        let text = "EMENDAS AO PROJETO DE LEI Nº 10/2020\nTRAMITAÇÃO DE PROPOSIÇÕES\nnada";
        assert!(scan(text).is_empty());
        assert!(scan("EMENDAS AO PROJETO DE LEI Nº 10/2020").is_empty());
    }

    #[test]
    fn vote_sections_are_stripped() {
        let text = "\
TRAMITAÇÃO DE PROPOSIÇÕES
Votação do Requerimento nº 3/2024
EMENDAS AO PROJETO DE LEI Nº 99/2024
Diário do Legislativo
EMENDAS AO PROJETO DE LEI Nº 10/2024";
        assert_eq!(scan(text), vec![rec("PL", "10", "2024", OpinionKind::Amendment)]);
    }

    #[test]
    fn strip_runs_to_end_without_stop_marker() {
        let scanner = OpinionScanner::new(Arc::new(Catalog::default())).unwrap();
        assert_eq!(scanner.strip_votes("antes Votação do Requerimento resto"), "antes ");
        assert_eq!(
            scanner.strip_votes("a votação do requerimento x Votação do Requerimento y Projetos de Lei Complementar z"),
            "a Projetos de Lei Complementar z"
        );
    }

    // ─── padrões ───────────────────────────────────────────────

    #[test]
    fn amendment_to_complementary_bill_uses_plc() {
        let text = "TRAMITAÇÃO DE PROPOSIÇÕES\n\
                    Parecer sobre a EMENDA Nº 2 AO SUBSTITUTIVO Nº 1 AO PROJETO DE LEI COMPLEMENTAR Nº 1.234/2023";
        assert_eq!(scan(text), vec![rec("PLC", "1234", "2023", OpinionKind::Amendment)]);
    }

    #[test]
    fn titles_attach_to_nearest_preceding_conclusion() {
        let text = "\
TRAMITAÇÃO DE PROPOSIÇÕES
Conclusão
Somos pela aprovação do Projeto de Lei nº 100/2024.
SUBSTITUTIVO Nº 1
Conclusão
Opinamos pela aprovação do PRE 7/2024.
EMENDA Nº 1
Texto da emenda.";
        assert_eq!(
            scan(text),
            vec![
                rec("PL", "100", "2024", OpinionKind::Substitute),
                rec("PRE", "7", "2024", OpinionKind::Amendment),
            ]
        );
    }

    #[test]
    fn title_without_anchor_is_ignored() {
        let text = "TRAMITAÇÃO DE PROPOSIÇÕES\nEMENDA Nº 3\nTexto.";
        assert!(scan(text).is_empty());
    }

    // ─── tipos combinados ──────────────────────────────────────

    #[test]
    fn amendment_and_substitute_merge_in_any_order() {
        let substitute_first = "\
TRAMITAÇÃO DE PROPOSIÇÕES
Conclusão
Pela aprovação do Projeto de Lei nº 1.000/2021.
SUBSTITUTIVO Nº 1
EMENDAS AO PROJETO DE LEI Nº 1.000/2021";
        let amendment_first = "\
TRAMITAÇÃO DE PROPOSIÇÕES
EMENDAS AO PROJETO DE LEI Nº 1.000/2021
Conclusão
Pela aprovação do Projeto de Lei nº 1.000/2021.
SUBSTITUTIVO Nº 1";
        let expected = vec![rec("PL", "1000", "2021", OpinionKind::AmendmentAndSubstitute)];
        assert_eq!(scan(substitute_first), expected);
        assert_eq!(scan(amendment_first), expected);
    }

    #[test]
    fn repeated_amendment_mentions_stay_single_kind() {
        let text = "\
TRAMITAÇÃO DE PROPOSIÇÕES
EMENDAS AO PROJETO DE LEI Nº 5/2022
EMENDA Nº 1 AO PROJETO DE LEI Nº 5/2022";
        assert_eq!(scan(text), vec![rec("PL", "5", "2022", OpinionKind::Amendment)]);
    }
}
