//! # Ingestão de PDF — Dos Bytes ao Texto por Página
//!
//! Os motores trabalham sobre texto; este módulo é a ponte com os PDFs
//! enviados pela interface web.
//!
//! ## Pipeline
//!
//! ```text
//! Upload PDF (bytes)
//!   ├── 1. Extrair texto por página → pdf_extract
//!   ├── 2. Normalizar PT-BR → NFC + quebras de linha unificadas
//!   └── 3a. PdfDocument (PageSource)      → motor Administrativo
//!       3b. legislative_text(páginas)      → motor Legislativo
//! ```
//!
//! ## NFC
//!
//! Caracteres como "ã" podem vir de duas formas:
//! - **NFC** (precomposto): U+00E3
//! - **NFD** (decomposto): U+0061 + U+0303
//!
//! Os nomes do catálogo (`RESOLUÇÃO`, `INDICAÇÃO`) estão em NFC; sem a
//! normalização, metade dos diários não casaria com nada.
//!
//! A divisão das páginas em colunas (Executivo) depende de coordenadas que
//! `pdf_extract` não expõe: o Executivo recebe um
//! [`PreparedLayout`](crate::source::PreparedLayout) já montado.

use crate::error::ExtractError;
use crate::source::PageSource;
use crate::text::{collapse_layout, normalize_unicode};

/// PDF já convertido em texto, uma entrada por página física.
#[derive(Clone, Debug)]
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        let span = tracing::info_span!("pdf_extraction", bytes = bytes.len());
        let _guard = span.enter();

        let raw_pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
        let pages: Vec<String> = raw_pages.iter().map(|page| normalize_unicode(page)).collect();

        tracing::info!(pages = pages.len(), "Texto extraído do PDF");
        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl PageSource for PdfDocument {
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

/// Texto corrido do Diário do Legislativo.
///
/// Páginas vazias somem; as demais terminam em quebra de linha. Depois,
/// espaços/tabs repetidos viram um espaço e linhas em branco são removidas.
pub fn legislative_text(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|page| !page.is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    collapse_layout(&text)
}
