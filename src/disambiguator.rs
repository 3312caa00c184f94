//! # ContextDisambiguator — Aceitar, Rejeitar ou Marcar um Match
//!
//! Um match de padrão no diário nem sempre é o registro que procuramos:
//! o número de um projeto reaparece em notas de epígrafe, em pareceres de
//! redação final, em republicações. O desambiguador olha uma janela fixa
//! de texto **antes** (≈200 caracteres) e **depois** (≈250 caracteres) do
//! match e aplica uma lista ordenada de regras.
//!
//! ## Avaliação
//!
//! ```text
//! match (start, end)
//!   ├── regras de rejeição, em ordem → a primeira que casar rejeita
//!   └── nenhuma casou → aceita
//!         └── regras de marcação → a primeira que casar define a categoria
//! ```
//!
//! As regras são dados ([`Rule`]) e não condicionais aninhadas: novas
//! frases desqualificadoras entram com um `with_rule`.
//!
//! ## Resolução por Proximidade
//!
//! Duas utilidades compartilhadas entre pareceres e Executivo:
//!
//! - [`nearest_preceding`]: a âncora mais recente que termina antes do alvo
//! - [`nearest_by_distance`]: o candidato mais próximo em distância absoluta

use regex::Regex;

use crate::text::{leading_window, trailing_window};

/// Tamanho padrão da janela anterior, em caracteres.
pub const LEADING_WINDOW: usize = 200;
/// Tamanho padrão da janela posterior, em caracteres.
pub const TRAILING_WINDOW: usize = 250;

/// Qual janela uma regra inspeciona.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    Leading,
    Trailing,
}

/// Regra de rejeição: se `pattern` casar na janela, o match é descartado.
#[derive(Clone, Debug)]
pub struct Rule {
    pub name: &'static str,
    pub window: Window,
    pub pattern: Regex,
}

/// Regra de marcação: se `pattern` casar na janela, o match recebe `tag`.
#[derive(Clone, Debug)]
pub struct TagRule {
    pub tag: &'static str,
    pub window: Window,
    pub pattern: Regex,
}

/// Resultado da avaliação de um match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Aceito, com a categoria opcional encontrada.
    Accept(Option<&'static str>),
    /// Rejeitado pela regra nomeada.
    Reject(&'static str),
}

/// Avaliador ordenado de regras de contexto.
#[derive(Clone, Debug)]
pub struct ContextDisambiguator {
    leading: usize,
    trailing: usize,
    rules: Vec<Rule>,
    tags: Vec<TagRule>,
}

impl Default for ContextDisambiguator {
    fn default() -> Self {
        Self::new(LEADING_WINDOW, TRAILING_WINDOW)
    }
}

impl ContextDisambiguator {
    pub fn new(leading: usize, trailing: usize) -> Self {
        Self {
            leading,
            trailing,
            rules: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_rule(mut self, name: &'static str, window: Window, pattern: Regex) -> Self {
        self.rules.push(Rule {
            name,
            window,
            pattern,
        });
        self
    }

    pub fn with_tag(mut self, tag: &'static str, window: Window, pattern: Regex) -> Self {
        self.tags.push(TagRule {
            tag,
            window,
            pattern,
        });
        self
    }

    /// Decide sobre o match `text[start..end]`.
    pub fn decide(&self, text: &str, start: usize, end: usize) -> Verdict {
        let before = leading_window(text, start, self.leading);
        let after = trailing_window(text, end, self.trailing);
        let window = |w: Window| match w {
            Window::Leading => before,
            Window::Trailing => after,
        };

        if let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.pattern.is_match(window(rule.window)))
        {
            return Verdict::Reject(rule.name);
        }

        let tag = self
            .tags
            .iter()
            .find(|t| t.pattern.is_match(window(t.window)))
            .map(|t| t.tag);
        Verdict::Accept(tag)
    }
}

/// Âncora mais recente cujo fim não passa de `target`, isto é, a última
/// vista em ordem de documento antes do alvo.
pub fn nearest_preceding<T>(
    anchors: &[T],
    target: usize,
    end_of: impl Fn(&T) -> usize,
) -> Option<&T> {
    anchors
        .iter()
        .filter(|anchor| end_of(*anchor) <= target)
        .max_by_key(|anchor| end_of(*anchor))
}

/// Candidato com início mais próximo de `position`, em distância absoluta
/// (sem considerar direção). Empates ficam com o primeiro candidato.
pub fn nearest_by_distance<T>(
    candidates: &[T],
    position: usize,
    start_of: impl Fn(&T) -> usize,
) -> Option<&T> {
    candidates
        .iter()
        .min_by_key(|candidate| start_of(*candidate).abs_diff(position))
}
