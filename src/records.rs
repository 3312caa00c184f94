//! # Registros Extraídos
//!
//! Tuplas normalizadas emitidas pelos motores, uma struct por família.
//! Todos os campos são texto: números sem separadores de milhar, anos com
//! quatro dígitos ou vazios.
//!
//! | Família | Tipo | Colunas |
//! |---------|------|---------|
//! | Normas | [`NormRecord`] | sigla, número, ano |
//! | Proposições | [`PropositionRecord`] | sigla, número, ano, categoria |
//! | Requerimentos | [`RequestRecord`] | sigla, número, ano, col4, col5, classificação |
//! | Pareceres | [`OpinionRecord`] | sigla, número, ano, tipo |
//! | Executivo | [`ExecutiveRow`] | página, coluna, sanção, tipo, número, alterações |

use serde::Serialize;

use crate::source::Column;

/// Chave `(sigla, número, ano)` que identifica um registro no documento.
pub type RecordKey = (String, String, String);

/// Lei, resolução ou ato administrativo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormRecord {
    pub code: String,
    pub number: String,
    pub year: String,
}

impl NormRecord {
    pub fn new(code: &str, number: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            number: number.into(),
            year: year.into(),
        }
    }

    pub fn key(&self) -> RecordKey {
        (self.code.clone(), self.number.clone(), self.year.clone())
    }
}

/// Proposição em tramitação; `category` é `UP` para utilidade pública.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropositionRecord {
    pub code: String,
    pub number: String,
    pub year: String,
    pub category: Option<String>,
}

impl PropositionRecord {
    pub fn key(&self) -> RecordKey {
        (self.code.clone(), self.number.clone(), self.year.clone())
    }
}

/// Requerimento com sua situação.
///
/// `col4`/`col5` ficam sempre vazias: existem para manter o layout da
/// planilha consumida a jusante.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestRecord {
    pub code: String,
    pub number: String,
    pub year: String,
    pub col4: String,
    pub col5: String,
    pub status: String,
}

impl RequestRecord {
    pub fn new(code: &str, number: impl Into<String>, year: impl Into<String>, status: &str) -> Self {
        Self {
            code: code.to_string(),
            number: number.into(),
            year: year.into(),
            col4: String::new(),
            col5: String::new(),
            status: status.to_string(),
        }
    }

    pub fn key(&self) -> RecordKey {
        (self.code.clone(), self.number.clone(), self.year.clone())
    }
}

/// O que um projeto recebeu nos pareceres.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OpinionKind {
    #[serde(rename = "EMENDA")]
    Amendment,
    #[serde(rename = "SUBSTITUTIVO")]
    Substitute,
    #[serde(rename = "SUB/EMENDA")]
    AmendmentAndSubstitute,
}

/// Projeto que recebeu emenda e/ou substitutivo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpinionRecord {
    pub code: String,
    pub number: String,
    pub year: String,
    pub kind: OpinionKind,
}

/// Linha da tabela do Executivo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum ExecutiveRow {
    /// Lei ou decreto publicado; `amendments` guarda a primeira norma
    /// alterada/revogada (ou vazio).
    Primary {
        page: usize,
        column: Column,
        sanction_date: String,
        code: String,
        number: String,
        amendments: String,
    },
    /// Alteração adicional da última linha primária.
    Continuation { amendment: String },
}

impl ExecutiveRow {
    /// Alteração carregada pela linha (vazio em primária sem alteração).
    pub fn amendment(&self) -> &str {
        match self {
            ExecutiveRow::Primary { amendments, .. } => amendments,
            ExecutiveRow::Continuation { amendment } => amendment,
        }
    }
}
