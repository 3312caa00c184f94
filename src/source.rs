//! # Fontes de Texto — Fronteira com a Extração de PDF
//!
//! Os motores não abrem PDFs: recebem texto já materializado por um
//! colaborador externo, através de dois traits.
//!
//! ```text
//! PageSource            texto por página, em ordem       (Administrativo, Executivo)
//!   └── LayoutSource    + texto por meia-página/coluna   (Executivo)
//! ```
//!
//! Implementações incluídas:
//!
//! | Tipo | Origem |
//! |------|--------|
//! | [`TextPages`] | `Vec<String>` em memória |
//! | [`PreparedLayout`] | JSON com páginas e colunas pré-extraídas |
//! | [`PdfDocument`](crate::pdf::PdfDocument) | bytes de PDF via `pdf_extract` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Texto por página física, índice base 0.
pub trait PageSource {
    fn page_count(&self) -> usize;

    fn page_text(&self, index: usize) -> Result<String, ExtractError>;
}

/// Fonte com consciência de diagramação: cada página dividida no ponto
/// médio horizontal em duas colunas.
pub trait LayoutSource: PageSource {
    fn column_text(&self, index: usize, column: Column) -> Result<String, ExtractError>;
}

/// Meia-página esquerda (1) ou direita (2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Column {
    Left,
    Right,
}

impl Column {
    pub const BOTH: [Column; 2] = [Column::Left, Column::Right];

    pub fn number(self) -> u8 {
        match self {
            Column::Left => 1,
            Column::Right => 2,
        }
    }
}

impl From<Column> for u8 {
    fn from(column: Column) -> u8 {
        column.number()
    }
}

impl TryFrom<u8> for Column {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Column::Left),
            2 => Ok(Column::Right),
            other => Err(format!("coluna inválida: {other} (esperado 1 ou 2)")),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Páginas já extraídas, mantidas em memória.
#[derive(Clone, Debug, Default)]
pub struct TextPages(pub Vec<String>);

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractError> {
        self.0
            .get(index)
            .cloned()
            .ok_or(ExtractError::PageOutOfRange {
                page: index + 1,
                pages: self.0.len(),
            })
    }
}

/// Texto de uma coluna; `page` é base 1, como impresso no diário.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnChunk {
    pub page: usize,
    pub column: Column,
    pub text: String,
}

/// Documento do Executivo com a diagramação já resolvida por fora.
///
/// ```json
/// {
///   "pages": ["...texto da página 1...", "..."],
///   "columns": [{ "page": 1, "column": 1, "text": "..." }]
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PreparedLayout {
    pub pages: Vec<String>,
    #[serde(default)]
    pub columns: Vec<ColumnChunk>,
}

impl PageSource for PreparedLayout {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractError> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(ExtractError::PageOutOfRange {
                page: index + 1,
                pages: self.pages.len(),
            })
    }
}

impl LayoutSource for PreparedLayout {
    fn column_text(&self, index: usize, column: Column) -> Result<String, ExtractError> {
        let page = index + 1;
        self.columns
            .iter()
            .find(|chunk| chunk.page == page && chunk.column == column)
            .map(|chunk| chunk.text.clone())
            .ok_or(ExtractError::MissingColumn { page, column })
    }
}
