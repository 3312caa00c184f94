//! # Proposições — Projetos, Indicações, Mensagens e Vetos
//!
//! Cada `<TIPO> Nº N/AAAA` no início de um parágrafo é candidato. O mesmo
//! número reaparece em contextos que **não** são a proposição em si, por
//! isso cada candidato passa pelo [`ContextDisambiguator`]:
//!
//! | Ordem | Janela | Frase | Efeito |
//! |-------|--------|-------|--------|
//! | 1 | depois | "Na publicação da matéria em epígrafe" | rejeita |
//! | 2 | antes | "…seguinte redação final" | rejeita |
//! | 2 | depois | "foi publicada na edição anterior." | rejeita |
//! | 3 | depois | "(Redação do Vencido)" | rejeita |
//! | 4 | depois | "Declara de utilidade pública" | categoria `UP` |
//!
//! Candidatos rejeitados somem antes da deduplicação; entre os aceitos,
//! vale a primeira ocorrência de cada `(sigla, número, ano)`.

use std::collections::HashSet;

use crate::catalog::{Catalog, TypeTable};
use crate::disambiguator::{ContextDisambiguator, Verdict, Window};
use crate::error::ExtractError;
use crate::matcher::{compile, PatternSet};
use crate::records::PropositionRecord;
use crate::text::strip_separators;

pub struct PropositionScanner {
    patterns: PatternSet,
    context: ContextDisambiguator,
    types: TypeTable,
}

impl PropositionScanner {
    pub fn new(catalog: &Catalog) -> Result<Self, ExtractError> {
        let proposition = compile(&format!(
            r"(?m)^\s*(?:- )?\s*({}) Nº (\d{{1,4}}\.?\d{{0,3}}/\d{{4}})",
            catalog.proposition_types.alternation(false)
        ))?;
        let phrases = &catalog.proposition_phrases;
        let context = ContextDisambiguator::default()
            .with_rule("epigrafe", Window::Trailing, compile(phrases.epigraph)?)
            .with_rule("redacao_final", Window::Leading, compile(phrases.final_wording)?)
            .with_rule("edicao_anterior", Window::Trailing, compile(phrases.published_before)?)
            .with_rule("redacao_vencido", Window::Trailing, compile(phrases.defeated_wording)?)
            .with_tag("UP", Window::Trailing, compile(phrases.public_utility)?);

        Ok(Self {
            patterns: PatternSet::new().with("proposicao", proposition),
            context,
            types: catalog.proposition_types.clone(),
        })
    }

    pub fn extract(&self, text: &str) -> Vec<PropositionRecord> {
        let mut seen = HashSet::new();
        let mut proposicoes = Vec::new();
        let mut rejected = 0usize;

        for span in self.patterns.find_all(text) {
            let category = match self.context.decide(text, span.start(), span.end()) {
                Verdict::Accept(tag) => tag,
                Verdict::Reject(rule) => {
                    tracing::trace!(rule, trecho = span.as_str(), "Proposição descartada");
                    rejected += 1;
                    continue;
                }
            };
            let Some(code) = self.types.code_for(span.group_or_empty(1)) else {
                continue;
            };
            let number_year = strip_separators(span.group_or_empty(2));
            let Some((number, year)) = number_year.split_once('/') else {
                continue;
            };

            let record = PropositionRecord {
                code: code.to_string(),
                number: number.to_string(),
                year: year.to_string(),
                category: category.map(str::to_string),
            };
            if seen.insert(record.key()) {
                proposicoes.push(record);
            }
        }

        tracing::debug!(proposicoes = proposicoes.len(), rejected, "Proposições extraídas");
        proposicoes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<PropositionRecord> {
        PropositionScanner::new(&Catalog::default()).unwrap().extract(text)
    }

    fn prop(code: &str, number: &str, year: &str, category: Option<&str>) -> PropositionRecord {
        PropositionRecord {
            code: code.into(),
            number: number.into(),
            year: year.into(),
            category: category.map(Into::into),
        }
    }

    #[test]
    fn plain_bill_is_extracted() {
        let props = scan("PROJETO DE LEI Nº 1.000/2021\nDispõe sobre a merenda escolar.");
        assert_eq!(props, vec![prop("PL", "1000", "2021", None)]);
    }

    #[test]
    fn dash_prefixed_paragraph_is_accepted() {
        let props = scan("- INDICAÇÃO Nº 45/2023, do deputado Fulano");
        assert_eq!(props, vec![prop("IND", "45", "2023", None)]);
    }

    #[test]
    fn public_utility_sets_category() {
        let props = scan(
            "PROJETO DE LEI Nº 2.100/2024\nDeclara de utilidade pública a Associação Comunitária.",
        );
        assert_eq!(props, vec![prop("PL", "2100", "2024", Some("UP"))]);
    }

    #[test]
    fn republished_mention_is_suppressed_not_deduplicated() {
        let text = format!(
            "PROJETO DE LEI Nº 1.000/2021\nDispõe sobre a merenda escolar. {}\n\
             PROJETO DE LEI Nº 1.000/2021\nO parecer foi publicado na edição anterior.",
            "Texto do projeto. ".repeat(20)
        );
        let props = scan(&text);
        assert_eq!(props, vec![prop("PL", "1000", "2021", None)]);
    }

    #[test]
    fn only_republished_mention_yields_nothing() {
        let text = "PROJETO DE LEI Nº 1.000/2021\nA matéria foi publicada na edição anterior.";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn final_wording_opinion_is_rejected() {
        let text = "Opinamos por se dar à proposição a seguinte redação final:\nPROJETO DE RESOLUÇÃO Nº 12/2022";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn epigraph_note_is_rejected() {
        let text = "PROPOSTA DE EMENDA À CONSTITUIÇÃO Nº 7/2023\nErrata. Na publicação da matéria em epígrafe, onde se lê";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn defeated_wording_is_rejected() {
        let text = "PROJETO DE LEI COMPLEMENTAR Nº 30/2022\n(Redação do Vencido)";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn complementary_bill_gets_its_own_code() {
        let props = scan("PROJETO DE LEI COMPLEMENTAR Nº 30/2022\nAltera a Lei Complementar nº 64.");
        assert_eq!(props, vec![prop("PLC", "30", "2022", None)]);
    }
}
