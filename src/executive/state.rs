//! # ScanState — Acumulador da Varredura do Executivo
//!
//! A varredura é uma sequência de eventos em ordem de documento
//! (página → coluna → posição). O estado carregado entre eventos é
//! explícito e pertence a **uma** varredura:
//!
//! ```text
//! sem norma ──Command──▶ sem norma            (ignorado)
//! sem norma ──Published─▶ norma atual          (nova linha primária)
//! norma atual ─Command──▶ norma atual          (anexa, dedup por norma)
//! norma atual ─Published▶ nova norma atual     (vistos zerados)
//! ```
//!
//! - `Published` abre uma linha primária e fecha a anterior: daí em diante
//!   nenhuma alteração é anexada a ela.
//! - `Command` anexa referências à norma atual. A primeira preenche a
//!   coluna de alterações da linha primária; as seguintes viram linhas de
//!   continuação logo depois dela.

use std::collections::HashSet;

use crate::records::ExecutiveRow;
use crate::source::Column;

/// Lei ou decreto publicado no diário.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Publication {
    pub page: usize,
    pub column: Column,
    pub sanction_date: String,
    pub code: String,
    pub number: String,
}

/// Norma citada por um comando de alteração ou revogação.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub code: String,
    pub number: String,
    pub year: String,
}

impl Reference {
    /// Chave `TIPO NÚMERO [ANO]` usada na coluna de alterações.
    pub fn key(&self) -> String {
        if self.year.is_empty() {
            format!("{} {}", self.code, self.number)
        } else {
            format!("{} {} {}", self.code, self.number, self.year)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    Published(Publication),
    /// Referências já escolhidas para o comando (todas, em revogações;
    /// a mais próxima, nos demais).
    Command(Vec<Reference>),
}

/// Norma atual: índice da linha primária e alterações já vistas.
#[derive(Debug)]
struct CurrentNorm {
    row: usize,
    code: String,
    number: String,
    seen: HashSet<String>,
}

/// Estado de uma varredura. Criado vazio por documento e nunca reutilizado.
#[derive(Debug, Default)]
pub struct ScanState {
    rows: Vec<ExecutiveRow>,
    current: Option<CurrentNorm>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    pub fn process_event(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Published(publication) => self.publish(publication),
            ScanEvent::Command(references) => {
                for reference in references {
                    self.attach(reference);
                }
            }
        }
    }

    fn publish(&mut self, publication: Publication) {
        self.current = Some(CurrentNorm {
            row: self.rows.len(),
            code: publication.code.clone(),
            number: publication.number.clone(),
            seen: HashSet::new(),
        });
        self.rows.push(ExecutiveRow::Primary {
            page: publication.page,
            column: publication.column,
            sanction_date: publication.sanction_date,
            code: publication.code,
            number: publication.number,
            amendments: String::new(),
        });
    }

    fn attach(&mut self, reference: Reference) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if reference.code == current.code && reference.number == current.number {
            return;
        }
        let key = reference.key();
        if !current.seen.insert(key.clone()) {
            return;
        }

        if let Some(ExecutiveRow::Primary { amendments, .. }) = self.rows.get_mut(current.row) {
            if amendments.is_empty() {
                *amendments = key;
                return;
            }
        }
        self.rows.push(ExecutiveRow::Continuation { amendment: key });
    }

    pub fn into_rows(self) -> Vec<ExecutiveRow> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published(code: &str, number: &str) -> ScanEvent {
        ScanEvent::Published(Publication {
            page: 3,
            column: Column::Left,
            sanction_date: "01/01/2020".into(),
            code: code.into(),
            number: number.into(),
        })
    }

    fn reference(code: &str, number: &str, year: &str) -> Reference {
        Reference {
            code: code.into(),
            number: number.into(),
            year: year.into(),
        }
    }

    fn amendments(rows: &[ExecutiveRow]) -> Vec<&str> {
        rows.iter().map(ExecutiveRow::amendment).collect()
    }

    #[test]
    fn key_omits_missing_year() {
        assert_eq!(reference("LEI", "90", "2010").key(), "LEI 90 2010");
        assert_eq!(reference("DEC", "80", "").key(), "DEC 80");
    }

    #[test]
    fn command_before_any_publication_is_ignored() {
        let mut state = ScanState::new();
        state.process_event(ScanEvent::Command(vec![reference("LEI", "90", "2010")]));
        assert!(!state.has_current());
        assert!(state.into_rows().is_empty());
    }

    #[test]
    fn first_attachment_inline_then_continuations() {
        let mut state = ScanState::new();
        state.process_event(published("LEI", "100"));
        state.process_event(ScanEvent::Command(vec![
            reference("LEI", "90", "2010"),
            reference("DEC", "80", "2009"),
        ]));
        state.process_event(ScanEvent::Command(vec![reference("LCP", "7", "")]));
        let rows = state.into_rows();
        assert_eq!(amendments(&rows), vec!["LEI 90 2010", "DEC 80 2009", "LCP 7"]);
        assert!(matches!(rows[1], ExecutiveRow::Continuation { .. }));
    }

    #[test]
    fn repeated_reference_is_attached_once() {
        let mut state = ScanState::new();
        state.process_event(published("LEI", "100"));
        for _ in 0..3 {
            state.process_event(ScanEvent::Command(vec![reference("LEI", "90", "2010")]));
        }
        assert_eq!(amendments(&state.into_rows()), vec!["LEI 90 2010"]);
    }

    #[test]
    fn self_reference_is_skipped() {
        let mut state = ScanState::new();
        state.process_event(published("LEI", "100"));
        state.process_event(ScanEvent::Command(vec![reference("LEI", "100", "2020")]));
        assert_eq!(amendments(&state.into_rows()), vec![""]);
    }

    #[test]
    fn new_publication_closes_previous_row_and_resets_seen() {
        let mut state = ScanState::new();
        state.process_event(published("LEI", "100"));
        state.process_event(ScanEvent::Command(vec![reference("LEI", "90", "2010")]));
        state.process_event(published("DEC", "200"));
        state.process_event(ScanEvent::Command(vec![reference("LEI", "90", "2010")]));
        let rows = state.into_rows();
        assert_eq!(amendments(&rows), vec!["LEI 90 2010", "LEI 90 2010"]);
        assert!(matches!(&rows[1], ExecutiveRow::Primary { code, .. } if code == "DEC"));
    }
}
