//! # Requerimentos — Cinco Varreduras e um Conjunto de Exclusão
//!
//! Requerimentos aparecem no diário de formas muito diferentes; cada forma
//! tem sua própria varredura, e todas alimentam uma única lista:
//!
//! ```text
//!                 ┌────────────────────────────────────────┐
//! texto ─────────▶│ conjunto de exclusão (Ofício, Comissão)│
//!   │             └───────────────────┬────────────────────┘
//!   │                                 │ suprime (número, ano)
//!   ├── RECEBIMENTO DE PROPOSIÇÃO ────┤──▶ RQN  Recebido
//!   ├── "submetido a votação e aprovado" ─▶ RQC  Aprovado
//!   ├── "para posterior apreciação" ──────▶ RQC  Recebido para apreciação
//!   ├── linhas "Nº 12.345/2024, do"  ─────▶ RQN  classificação do bloco
//!   ├── linhas "nº 12.345/2024, da"  ─────▶ RQC  classificação do bloco
//!   └── bloco PROPOSIÇÕES NÃO RECEBIDAS ──▶ RQN  NÃO RECEBIDO
//!                                         │
//!                          dedup: primeira ocorrência de (sigla, número, ano)
//! ```
//!
//! A ordem das varreduras é a ordem de prioridade: um recebimento
//! explícito vence a mesma chave encontrada depois num bloco de numeração.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;

use crate::catalog::Catalog;
use crate::error::ExtractError;
use crate::matcher::compile;
use crate::records::RequestRecord;
use crate::text::{next_char_boundary, strip_separators};

pub const RECEIVED: &str = "Recebido";
pub const APPROVED: &str = "Aprovado";
pub const RECEIVED_FOR_REVIEW: &str = "Recebido para apreciação";
pub const NOT_RECEIVED: &str = "NÃO RECEBIDO";

/// `(número sem separadores, ano)`.
type NumberYear = (String, String);

pub struct RequestScanner {
    catalog: Arc<Catalog>,
    office_reply: Regex,
    committee_approved: Regex,
    receipt: Regex,
    floor_approval: Regex,
    later_review: Regex,
    legacy_upper: Regex,
    legacy_lower: Regex,
    legacy_any: Regex,
    not_received_header: Regex,
    not_received_item: Regex,
}

impl RequestScanner {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, ExtractError> {
        Ok(Self {
            catalog,
            office_reply: compile(
                r"(?is)Ofício nº .*?,.*?relativas ao Requerimento\s*nº (\d{1,4}\.?\d{0,3}/\d{4})",
            )?,
            committee_approved: compile(
                r"(?is)da Comissão.*?, informando que, na.*?foi aprovado o Requerimento\s*nº (\d{1,5}(?:\.\d{0,3})?)/(\d{4})",
            )?,
            receipt: compile(
                r"(?i)RECEBIMENTO DE PROPOSIÇÃO[\s\S]*?REQUERIMENTO Nº (\d{1,5}(?:\.\d{0,3})?)/(\d{4})",
            )?,
            floor_approval: compile(
                r"(?i)É\s+recebido\s+pela\s+presidência,\s+submetido\s+a\s+votação\s+e\s+aprovado\s+o\s+Requerimentos?(?: nº| Nº| n°)?\s*(\d{1,5}(?:\.\d{0,3})?)/\s*(\d{4})",
            )?,
            later_review: compile(
                r"(?is)É recebido pela\s+presidência, para posterior apreciação, o Requerimento(?: nº| Nº)?\s*(\d{1,5}(?:\.\d{0,3})?)/(\d{4})",
            )?,
            legacy_upper: compile(r"(?m)^\s*Nº\s+(\d{2}\.?\d{3}/\d{4})\s*,\s*(?:do|da)")?,
            legacy_lower: compile(r"(?m)^\s*nº\s+(\d{2}\.?\d{3}/\d{4})\s*,\s*(?:do|da)")?,
            legacy_any: compile(r"(?m)^\s*(?:Nº|nº)\s+\d{2}\.?\d{3}/\d{4}")?,
            not_received_header: compile(r"(?i)PROPOSIÇÕES\s*NÃO\s*RECEBIDAS")?,
            not_received_item: compile(r"(?i)REQUERIMENTO Nº (\d{2}\.?\d{3}/\d{4})")?,
        })
    }

    pub fn extract(&self, text: &str) -> Vec<RequestRecord> {
        let ignored = self.ignore_set(text);
        let mut candidates = Vec::new();

        self.scan_pairs(&self.receipt, text, "RQN", RECEIVED, &mut candidates);
        self.scan_pairs(&self.floor_approval, text, "RQC", APPROVED, &mut candidates);
        self.scan_pairs(&self.later_review, text, "RQC", RECEIVED_FOR_REVIEW, &mut candidates);
        self.scan_legacy(&self.legacy_upper, text, "RQN", &mut candidates);
        self.scan_legacy(&self.legacy_lower, text, "RQC", &mut candidates);
        self.scan_not_received(text, &mut candidates);

        let mut seen = HashSet::new();
        let mut suppressed = 0usize;
        let requerimentos: Vec<RequestRecord> = candidates
            .into_iter()
            .filter(|r| {
                if ignored.contains(&(r.number.clone(), r.year.clone())) {
                    suppressed += 1;
                    return false;
                }
                seen.insert(r.key())
            })
            .collect();

        tracing::debug!(
            requerimentos = requerimentos.len(),
            ignorados = ignored.len(),
            suprimidos = suppressed,
            "Requerimentos extraídos"
        );
        requerimentos
    }

    /// Requerimentos citados em respostas a ofícios ou já aprovados em
    /// comissão: não contam em nenhuma varredura.
    fn ignore_set(&self, text: &str) -> HashSet<NumberYear> {
        let mut ignored = HashSet::new();
        for caps in self.office_reply.captures_iter(text) {
            let joined = strip_separators(&caps[1]);
            if let Some((number, year)) = joined.split_once('/') {
                ignored.insert((number.to_string(), year.to_string()));
            }
        }
        for caps in self.committee_approved.captures_iter(text) {
            ignored.insert((strip_separators(&caps[1]), caps[2].to_string()));
        }
        ignored
    }

    /// Varredura com número e ano em grupos separados (1 e 2).
    fn scan_pairs(
        &self,
        pattern: &Regex,
        text: &str,
        code: &str,
        status: &str,
        out: &mut Vec<RequestRecord>,
    ) {
        for caps in pattern.captures_iter(text) {
            out.push(RequestRecord::new(
                code,
                strip_separators(&caps[1]),
                &caps[2],
                status,
            ));
        }
    }

    /// Numeração antiga: cada linha abre um bloco que vai até a próxima
    /// linha de numeração (de qualquer estilo). O texto do bloco decide a
    /// classificação.
    fn scan_legacy(&self, pattern: &Regex, text: &str, code: &str, out: &mut Vec<RequestRecord>) {
        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let start = whole.start();
            let end = self
                .legacy_any
                .find_at(text, next_char_boundary(text, start))
                .map(|m| m.start())
                .unwrap_or(text.len());
            let block = text[start..end].trim();

            let joined = strip_separators(&caps[1]);
            let Some((number, year)) = joined.split_once('/') else {
                continue;
            };
            out.push(RequestRecord::new(
                code,
                number,
                year,
                self.catalog.classify_request(block),
            ));
        }
    }

    /// Bloco "PROPOSIÇÕES NÃO RECEBIDAS": do cabeçalho até a próxima linha
    /// de título de seção.
    fn scan_not_received(&self, text: &str, out: &mut Vec<RequestRecord>) {
        let Some(header) = self.not_received_header.find(text) else {
            return;
        };
        let start = header.end();
        let end = next_heading(text, start).unwrap_or(text.len());

        for caps in self.not_received_item.captures_iter(&text[start..end]) {
            let joined = strip_separators(&caps[1]);
            if let Some((number, year)) = joined.split_once('/') {
                out.push(RequestRecord::new("RQN", number, year, NOT_RECEIVED));
            }
        }
    }
}

/// Offset da primeira linha de título depois da linha que contém `from`.
///
/// Título é uma linha emoldurada por asteriscos (`* * *`, `*Atas*`) ou
/// uma linha em caixa alta sem dígitos.
fn next_heading(text: &str, from: usize) -> Option<usize> {
    let line_end = text[from..].find('\n')? + from + 1;
    let mut offset = line_end;
    for line in text[line_end..].split_inclusive('\n') {
        if is_heading(line.trim()) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

fn is_heading(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if line.starts_with('*') && line.ends_with('*') {
        return true;
    }
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && !line.chars().any(|c| c.is_numeric() || c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<RequestRecord> {
        RequestScanner::new(Arc::new(Catalog::default()))
            .unwrap()
            .extract(text)
    }

    fn keys(reqs: &[RequestRecord]) -> Vec<(&str, &str, &str, &str)> {
        reqs.iter()
            .map(|r| (r.code.as_str(), r.number.as_str(), r.year.as_str(), r.status.as_str()))
            .collect()
    }

    // ─── varreduras ────────────────────────────────────────────

    #[test]
    fn receipt_notice_takes_first_request_after_header() {
        let text = "RECEBIMENTO DE PROPOSIÇÃO\nA presidência recebeu:\nREQUERIMENTO Nº 12.345/2024\nDo deputado Fulano.";
        let reqs = scan(text);
        assert_eq!(keys(&reqs), vec![("RQN", "12345", "2024", RECEIVED)]);
        assert!(reqs[0].col4.is_empty() && reqs[0].col5.is_empty());
    }

    #[test]
    fn floor_approval_is_rqc_approved() {
        let text = "É recebido pela presidência, submetido a votação e aprovado o Requerimento nº 1.234/2023, do deputado X.";
        assert_eq!(keys(&scan(text)), vec![("RQC", "1234", "2023", APPROVED)]);
    }

    #[test]
    fn later_review_notice() {
        let text = "É recebido pela presidência, para posterior apreciação, o Requerimento nº 77/2023, da Comissão.";
        assert_eq!(keys(&scan(text)), vec![("RQC", "77", "2023", RECEIVED_FOR_REVIEW)]);
    }

    #[test]
    fn legacy_blocks_are_classified_by_their_own_text() {
        let text = "\
Nº 12.345/2024, do deputado A
Requer seja formulado voto de congratulações ao município.
nº 11.111/2024, da deputada B
Requer seja formulada manifestação de pesar pelo falecimento.
Nº 10.000/2024, do deputado C
Requer informações à secretaria.";
        assert_eq!(
            keys(&scan(text)),
            vec![
                ("RQN", "12345", "2024", "Voto de congratulações"),
                ("RQN", "10000", "2024", ""),
                ("RQC", "11111", "2024", "Manifestação de pesar"),
            ]
        );
    }

    #[test]
    fn not_received_block_stops_at_next_heading() {
        let text = "\
PROPOSIÇÕES NÃO RECEBIDAS
REQUERIMENTO Nº 15.001/2024, do deputado A.
REQUERIMENTO Nº 15.002/2024, do deputado B.
* * *
REQUERIMENTO Nº 15.003/2024, do deputado C.";
        assert_eq!(
            keys(&scan(text)),
            vec![
                ("RQN", "15001", "2024", NOT_RECEIVED),
                ("RQN", "15002", "2024", NOT_RECEIVED),
            ]
        );
    }

    #[test]
    fn uppercase_title_line_is_a_heading() {
        assert!(is_heading("ATAS"));
        assert!(is_heading("* Ordem do Dia *"));
        assert!(!is_heading("REQUERIMENTO Nº 15.003/2024"));
        assert!(!is_heading("do deputado C."));
        assert!(!is_heading("-"));
    }

    // ─── exclusão e dedup ──────────────────────────────────────

    #[test]
    fn office_reply_suppresses_key_everywhere() {
        let text = "\
Ofício nº 10/2022, da Secretaria de Saúde, com informações relativas ao Requerimento nº 50/2022.
É recebido pela presidência, submetido a votação e aprovado o Requerimento nº 50/2022.
É recebido pela presidência, submetido a votação e aprovado o Requerimento nº 51/2022.";
        assert_eq!(keys(&scan(text)), vec![("RQC", "51", "2022", APPROVED)]);
    }

    #[test]
    fn committee_approval_suppresses_key() {
        let text = "\
Ofício da Comissão de Saúde, informando que, na reunião de ontem, foi aprovado o Requerimento nº 12.000/2024.
RECEBIMENTO DE PROPOSIÇÃO
REQUERIMENTO Nº 12.000/2024";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn receipt_wins_over_later_legacy_block() {
        let text = "\
RECEBIMENTO DE PROPOSIÇÃO
REQUERIMENTO Nº 12.345/2024
Nº 12.345/2024, do deputado A
Requer moção de aplauso.";
        assert_eq!(keys(&scan(text)), vec![("RQN", "12345", "2024", RECEIVED)]);
    }
}
