//! # Utilidades de Texto
//!
//! Normalizações aplicadas ao texto extraído dos PDFs e recortes de
//! janelas de contexto medidas em **caracteres** (não bytes), já que o
//! texto é PT-BR com acentos multibyte.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid space regex"));
static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("valid newline regex"));

/// Recompõe caracteres decompostos (NFC) e unifica quebras de linha.
///
/// "ã" pode vir do PDF como U+00E3 ou como "a" + U+0303; os padrões do
/// catálogo esperam a forma precomposta.
pub fn normalize_unicode(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    normalized.replace("\r\n", "\n").replace('\r', "\n")
}

/// Colapsa toda sequência de espaços em branco (inclusive `\n`) em um
/// espaço e apara as pontas.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalização do texto corrido do Legislativo: espaços/tabs repetidos
/// viram um espaço e linhas em branco somem. As quebras de linha
/// sobrevivem porque normas e requerimentos são ancorados em início de linha.
pub fn collapse_layout(text: &str) -> String {
    let text = SPACE_RUN.replace_all(text, " ");
    NEWLINE_RUN.replace_all(&text, "\n").into_owned()
}

/// Remove separadores de milhar e espaços de um número (`12.345` → `12345`).
pub fn strip_separators(number: &str) -> String {
    number
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect()
}

/// Offset em bytes `n` caracteres antes de `pos` (saturando no início).
pub fn back_chars(text: &str, pos: usize, n: usize) -> usize {
    if n == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Offset em bytes `n` caracteres depois de `pos` (saturando no fim).
pub fn forward_chars(text: &str, pos: usize, n: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Até `n` caracteres imediatamente antes de `pos`.
pub fn leading_window(text: &str, pos: usize, n: usize) -> &str {
    &text[back_chars(text, pos, n)..pos]
}

/// Até `n` caracteres a partir de `pos`.
pub fn trailing_window(text: &str, pos: usize, n: usize) -> &str {
    &text[pos..forward_chars(text, pos, n)]
}

/// Offset do caractere seguinte a `pos`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
