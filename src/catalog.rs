//! # Catálogo — Tabelas Fixas dos Diários Oficiais
//!
//! Dados puros, sem comportamento além de lookup. O [`Catalog`] é montado
//! uma vez na inicialização, embrulhado em `Arc` e injetado em cada motor
//! de extração; testes podem injetar catálogos alternativos.
//!
//! ## Conteúdo
//!
//! | Tabela | Uso | Exemplo |
//! |--------|-----|---------|
//! | `norm_types` | Normas do Legislativo | `RESOLUÇÃO` → `RAL` |
//! | `proposition_types` | Proposições | `PROJETO DE LEI` → `PL` |
//! | `opinion_types` | Âncoras "Conclusão" dos pareceres | `pec` → `PEC` |
//! | `administrative_types` | Atos do Administrativo | `PORTARIA DGE` → `PRT` |
//! | `executive_types` | Leis e decretos do Executivo | `DECRETO NE` → `DNE` |
//! | `months` | Datas por extenso | `MARÇO` → `03` |
//! | `request_classes` | Classificação livre de requerimentos | voto de congratulações |
//! | `proposition_phrases` | Desqualificadores de proposições | redação final |

/// Tabela nome-por-extenso → sigla, preservando a ordem de declaração.
#[derive(Clone, Debug)]
pub struct TypeTable {
    entries: Vec<(&'static str, &'static str)>,
}

impl TypeTable {
    pub fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// Sigla para o nome exato, se catalogado.
    pub fn code_for(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| *code)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Alternação regex com os nomes do catálogo, os mais longos primeiro
    /// (`LEI COMPLEMENTAR` antes de `LEI`).
    ///
    /// Com `flexible_spaces`, cada espaço vira `\s+`, útil no texto do
    /// Executivo, onde a diagramação em colunas quebra os nomes.
    pub fn alternation(&self, flexible_spaces: bool) -> String {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        names
            .iter()
            .map(|name| {
                let escaped = regex::escape(name);
                if flexible_spaces {
                    escaped.replace(' ', r"\s+")
                } else {
                    escaped
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Frases que invalidam ou marcam uma proposição, em forma de regex.
#[derive(Clone, Debug)]
pub struct PropositionPhrases {
    /// Menção em nota de epígrafe (janela posterior).
    pub epigraph: &'static str,
    /// Parecer de redação final (janela anterior).
    pub final_wording: &'static str,
    /// Matéria já publicada em edição anterior (janela posterior).
    pub published_before: &'static str,
    /// Versão vencida do texto (janela posterior, literal).
    pub defeated_wording: &'static str,
    /// Declaração de utilidade pública (janela posterior).
    pub public_utility: &'static str,
}

/// Catálogo completo, imutável após a construção.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub norm_types: TypeTable,
    pub proposition_types: TypeTable,
    pub opinion_types: TypeTable,
    pub administrative_types: TypeTable,
    pub executive_types: TypeTable,
    pub months: TypeTable,
    /// Frase (minúscula) → rótulo, na ordem de verificação.
    pub request_classes: Vec<(&'static str, &'static str)>,
    pub proposition_phrases: PropositionPhrases,
}

impl Catalog {
    /// Mês por extenso (maiúsculo) → número com dois dígitos.
    pub fn month_number(&self, name: &str) -> Option<&'static str> {
        self.months.code_for(name)
    }

    /// Classifica o texto livre de um bloco de requerimento.
    ///
    /// A primeira frase encontrada vence; sem match, rótulo vazio.
    pub fn classify_request(&self, block: &str) -> &'static str {
        let lower = block.to_lowercase();
        self.request_classes
            .iter()
            .find(|(phrase, _)| lower.contains(phrase))
            .map(|(_, label)| *label)
            .unwrap_or("")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            norm_types: TypeTable::new(&[
                ("LEI", "LEI"),
                ("RESOLUÇÃO", "RAL"),
                ("LEI COMPLEMENTAR", "LCP"),
                ("EMENDA À CONSTITUIÇÃO", "EMC"),
                ("DELIBERAÇÃO DA MESA", "DLB"),
            ]),
            proposition_types: TypeTable::new(&[
                ("PROJETO DE LEI", "PL"),
                ("PROJETO DE LEI COMPLEMENTAR", "PLC"),
                ("INDICAÇÃO", "IND"),
                ("PROJETO DE RESOLUÇÃO", "PRE"),
                ("PROPOSTA DE EMENDA À CONSTITUIÇÃO", "PEC"),
                ("MENSAGEM", "MSG"),
                ("VETO", "VET"),
            ]),
            opinion_types: TypeTable::new(&[
                ("requerimento", "RQN"),
                ("projeto de lei", "PL"),
                ("pl", "PL"),
                ("projeto de resolução", "PRE"),
                ("pre", "PRE"),
                ("proposta de emenda à constituição", "PEC"),
                ("pec", "PEC"),
                ("projeto de lei complementar", "PLC"),
                ("plc", "PLC"),
            ]),
            administrative_types: TypeTable::new(&[
                ("DELIBERAÇÃO DA MESA", "DLB"),
                ("PORTARIA DGE", "PRT"),
                ("ORDEM DE SERVIÇO PRES/PSEC", "OSV"),
            ]),
            executive_types: TypeTable::new(&[
                ("LEI", "LEI"),
                ("LEI COMPLEMENTAR", "LCP"),
                ("DECRETO", "DEC"),
                ("DECRETO NE", "DNE"),
            ]),
            months: TypeTable::new(&[
                ("JANEIRO", "01"),
                ("FEVEREIRO", "02"),
                ("MARÇO", "03"),
                ("MARCO", "03"),
                ("ABRIL", "04"),
                ("MAIO", "05"),
                ("JUNHO", "06"),
                ("JULHO", "07"),
                ("AGOSTO", "08"),
                ("SETEMBRO", "09"),
                ("OUTUBRO", "10"),
                ("NOVEMBRO", "11"),
                ("DEZEMBRO", "12"),
            ]),
            request_classes: vec![
                ("seja formulado voto de congratulações", "Voto de congratulações"),
                ("manifestação de pesar", "Manifestação de pesar"),
                ("manifestação de repúdio", "Manifestação de repúdio"),
                ("moção de aplauso", "Moção de aplauso"),
                // o "r" final de "requer" faz parte da frase
                ("r seja formulada manifestação de apoio", "Manifestação de apoio"),
            ],
            proposition_phrases: PropositionPhrases {
                epigraph: r"(?i)Na publicação da matéria em epígrafe",
                final_wording: r"(?i)opinamos por se dar à proposição a seguinte redação final",
                published_before: r"(?i)foi publicad[ao] na edição anterior\.",
                defeated_wording: r"\(Redação do Vencido\)",
                public_utility: r"(?i)Declara de utilidade pública",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_puts_longer_names_first() {
        let catalog = Catalog::default();
        let alt = catalog.norm_types.alternation(false);
        let complementar = alt.find("LEI COMPLEMENTAR").unwrap();
        assert!(alt.ends_with("|LEI"), "{alt}");
        assert!(complementar < alt.len() - "LEI".len());
    }

    #[test]
    fn flexible_alternation_allows_broken_spacing() {
        let catalog = Catalog::default();
        let re = regex::Regex::new(&format!("^(?:{})$", catalog.executive_types.alternation(true)))
            .unwrap();
        assert!(re.is_match("DECRETO   NE"));
        assert!(re.is_match("LEI\nCOMPLEMENTAR"));
    }

    #[test]
    fn month_lookup_accepts_both_spellings_of_march() {
        let catalog = Catalog::default();
        assert_eq!(catalog.month_number("MARÇO"), Some("03"));
        assert_eq!(catalog.month_number("MARCO"), Some("03"));
        assert_eq!(catalog.month_number("BRUMÁRIO"), None);
    }

    #[test]
    fn request_classification_respects_check_order() {
        let catalog = Catalog::default();
        let block = "Requer seja formulada manifestação de pesar e moção de aplauso.";
        assert_eq!(catalog.classify_request(block), "Manifestação de pesar");
        assert_eq!(
            catalog.classify_request("requer seja formulada manifestação de apoio"),
            "Manifestação de apoio"
        );
        assert_eq!(catalog.classify_request("pedido de informação"), "");
    }
}
