//! # SpanMatcher — Busca Primitiva de Padrões
//!
//! Passo de busca comum a todos os motores: dado um texto e um
//! [`PatternSet`], devolve todas as ocorrências como [`Span`]s ordenados
//! por posição.
//!
//! ## Sobreposição
//!
//! - Ocorrências do **mesmo** padrão nunca se sobrepõem (varredura
//!   esquerda → direita, como `Regex::captures_iter`).
//! - Padrões **distintos** podem reportar spans sobrepostos; quem chama
//!   decide o que fazer com eles.
//!
//! Empates de posição mantêm a ordem em que os padrões foram registrados.

use regex::{Captures, Regex};

use crate::error::ExtractError;

/// Compila um padrão do catálogo.
pub fn compile(pattern: &str) -> Result<Regex, ExtractError> {
    Ok(Regex::new(pattern)?)
}

/// Conjunto ordenado de padrões nomeados.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<(&'static str, Regex)>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &'static str, regex: Regex) -> Self {
        self.patterns.push((id, regex));
        self
    }

    /// Todas as ocorrências de todos os padrões, ordenadas por início.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<Span<'t>> {
        let mut spans: Vec<Span<'t>> = self
            .patterns
            .iter()
            .flat_map(|(id, regex)| {
                let id = *id;
                regex.captures_iter(text).filter_map(move |captures| {
                    let whole = captures.get(0)?;
                    Some(Span {
                        pattern: id,
                        start: whole.start(),
                        end: whole.end(),
                        matched: whole.as_str(),
                        captures,
                    })
                })
            })
            .collect();
        // sort estável: empates seguem a ordem de registro
        spans.sort_by_key(|span| span.start());
        spans
    }
}

/// Uma ocorrência: padrão de origem, offsets em bytes e grupos capturados.
#[derive(Debug)]
pub struct Span<'t> {
    pub pattern: &'static str,
    start: usize,
    end: usize,
    matched: &'t str,
    captures: Captures<'t>,
}

impl<'t> Span<'t> {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn as_str(&self) -> &'t str {
        self.matched
    }

    /// Grupo capturado `i`, se participou do match.
    pub fn group(&self, i: usize) -> Option<&'t str> {
        self.captures.get(i).map(|m| m.as_str())
    }

    /// Grupo capturado `i`, ou vazio.
    pub fn group_or_empty(&self, i: usize) -> &'t str {
        self.group(i).unwrap_or("")
    }
}
