//! # Erros de Extração
//!
//! Apenas falhas **estruturais** viram [`ExtractError`]: PDF ilegível,
//! página ou coluna inexistente, padrão de catálogo que não compila.
//!
//! Ausência de matches e datas/números malformados não são erros: a
//! extração segue com o campo vazio ou com a coleção vazia.

use thiserror::Error;

use crate::source::Column;

/// Falha que interrompe uma extração inteira.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("falha ao extrair texto do PDF: {0}")]
    Pdf(String),

    #[error("página {page} fora do documento ({pages} páginas)")]
    PageOutOfRange { page: usize, pages: usize },

    #[error("coluna {column} da página {page} indisponível")]
    MissingColumn { page: usize, column: Column },

    #[error("padrão inválido no catálogo: {0}")]
    Pattern(#[from] regex::Error),
}
