//! # Localizador de Artigos
//!
//! Encontra o artigo cuja rubrica melhor corresponde ao nome de crime
//! digitado pelo usuário.
//!
//! ## Algoritmo (versão [`SCORING_VERSION`])
//!
//! 1. Normaliza consulta, rubricas e as primeiras linhas de cada corpo
//!    ([`crate::normalize::terms`]).
//! 2. Para cada artigo, cada termo distinto da consulta vale **2 pontos** se
//!    aparece na rubrica ou **1 ponto** se aparece apenas nas linhas iniciais.
//! 3. Candidatos precisam de ao menos um termo na rubrica, `min_overlap`
//!    termos no total e cobertura mínima `min_coverage` da consulta.
//! 4. Desempate determinístico: maior pontuação → menor corpo (o artigo mais
//!    específico) → primeiro na ordem do documento.
//!
//! Sem candidato, o resultado é [`Lookup::NotFound`], um valor e não um erro.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::{ArticleEntry, LegalDocument};
use crate::normalize::{distinct_terms, terms};

/// Versão da função de pontuação. Alterar pesos ou critérios exige incrementá-la.
pub const SCORING_VERSION: u32 = 1;

const HEADING_WEIGHT: u32 = 2;
const LEAD_WEIGHT: u32 = 1;

/// Parâmetros do localizador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Quantas linhas iniciais do corpo também contam como contexto.
    pub lead_lines: usize,
    /// Mínimo de termos distintos da consulta encontrados.
    pub min_overlap: usize,
    /// Fração mínima dos termos da consulta encontrados (0.0–1.0).
    pub min_coverage: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            lead_lines: 1,
            min_overlap: 1,
            min_coverage: 0.5,
        }
    }
}

/// Artigo encontrado para uma consulta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMatch {
    pub article_id: String,
    pub heading: String,
    pub body: String,
    /// Termos da consulta que casaram (rubrica ou linhas iniciais).
    pub matched_terms: Vec<String>,
    /// Termos da consulta sem correspondência.
    pub missing_terms: Vec<String>,
    pub score: u32,
    /// Fração dos termos da consulta encontrados.
    pub coverage: f64,
    pub scoring_version: u32,
    /// Posição do artigo no documento.
    pub position: usize,
}

/// Resultado de uma busca.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Lookup {
    Found(ArticleMatch),
    NotFound { query: String },
}

impl Lookup {
    pub fn found(&self) -> Option<&ArticleMatch> {
        match self {
            Lookup::Found(m) => Some(m),
            Lookup::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Localizador configurável. Não guarda estado entre buscas.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    pub config: LocatorConfig,
}

/// Pontuação de um artigo para uma consulta
struct Candidate<'a> {
    position: usize,
    article: &'a ArticleEntry,
    score: u32,
    matched: Vec<String>,
    missing: Vec<String>,
}

impl Locator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Busca o artigo que melhor corresponde à consulta.
    pub fn locate(&self, document: &LegalDocument, query: &str) -> Lookup {
        let query_terms = distinct_terms(query);
        if query_terms.is_empty() {
            tracing::debug!(query, "consulta sem termos significativos");
            return Lookup::NotFound { query: query.to_string() };
        }

        let mut best: Option<Candidate> = None;
        for (position, article) in document.articles().iter().enumerate() {
            let Some(candidate) = self.score(position, article, &query_terms) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some(current) => {
                    candidate.score > current.score
                        || (candidate.score == current.score
                            && candidate.article.body.len() < current.article.body.len())
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        match best {
            Some(c) => {
                let coverage = c.matched.len() as f64 / query_terms.len() as f64;
                tracing::debug!(
                    query,
                    article = %c.article.id,
                    score = c.score,
                    coverage,
                    "artigo localizado"
                );
                Lookup::Found(ArticleMatch {
                    article_id: c.article.id.clone(),
                    heading: c.article.heading.clone(),
                    body: c.article.body.clone(),
                    matched_terms: c.matched,
                    missing_terms: c.missing,
                    score: c.score,
                    coverage,
                    scoring_version: SCORING_VERSION,
                    position: c.position,
                })
            }
            None => {
                tracing::debug!(query, "nenhum artigo acima do limiar");
                Lookup::NotFound { query: query.to_string() }
            }
        }
    }

    fn score<'a>(
        &self,
        position: usize,
        article: &'a ArticleEntry,
        query_terms: &[String],
    ) -> Option<Candidate<'a>> {
        let heading: HashSet<String> = terms(&article.heading).into_iter().collect();
        if heading.is_empty() {
            return None;
        }
        let lead_text: Vec<&str> = article.body.lines().take(self.config.lead_lines).collect();
        let lead: HashSet<String> = terms(&lead_text.join(" ")).into_iter().collect();

        let mut score = 0;
        let mut heading_hits = 0;
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        for term in query_terms {
            if heading.contains(term) {
                score += HEADING_WEIGHT;
                heading_hits += 1;
                matched.push(term.clone());
            } else if lead.contains(term) {
                score += LEAD_WEIGHT;
                matched.push(term.clone());
            } else {
                missing.push(term.clone());
            }
        }

        let coverage = matched.len() as f64 / query_terms.len() as f64;
        if heading_hits == 0
            || matched.len() < self.config.min_overlap
            || coverage < self.config.min_coverage
        {
            return None;
        }
        Some(Candidate { position, article, score, matched, missing })
    }
}

/// Busca com a configuração padrão.
pub fn locate(document: &LegalDocument, query: &str) -> Lookup {
    Locator::default().locate(document, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, heading: &str, body: &str) -> ArticleEntry {
        ArticleEntry {
            id: id.to_string(),
            heading: heading.to_string(),
            body: body.to_string(),
        }
    }

    fn doc() -> LegalDocument {
        LegalDocument::new(vec![
            entry("121", "Homicídio simples", "Matar alguém:\nPena - reclusão, de seis a vinte anos."),
            entry("129", "Lesão corporal", "Ofender a integridade corporal ou a saúde de outrem:\nPena - detenção, de três meses a um ano."),
            entry("155", "Furto", "Subtrair, para si ou para outrem, coisa alheia móvel:\nPena - reclusão, de um a quatro anos, e multa."),
            entry("155-Q", "Furto qualificado", "A pena é de reclusão de dois a oito anos, e multa, se o crime é cometido com destruição ou rompimento de obstáculo à subtração da coisa."),
            entry("157", "Roubo", "Subtrair coisa móvel alheia, para si ou para outrem, mediante grave ameaça ou violência a pessoa:\nPena - reclusão, de quatro a dez anos, e multa."),
        ])
        .unwrap()
    }

    #[test]
    fn test_locate_homicidio_scenario() {
        let doc = LegalDocument::new(vec![entry(
            "121",
            "Homicídio simples",
            "Matar alguém: Pena - reclusão, de seis a vinte anos.",
        )])
        .unwrap();
        let m = locate(&doc, "homicidio simples");
        let m = m.found().unwrap();
        assert_eq!(m.article_id, "121");
        assert_eq!(m.matched_terms, vec!["homicidio", "simples"]);
        assert_eq!(m.coverage, 1.0);
        assert_eq!(m.scoring_version, SCORING_VERSION);
    }

    #[test]
    fn test_query_is_case_and_accent_insensitive() {
        let m = locate(&doc(), "LESÃO CORPORAL");
        assert_eq!(m.found().unwrap().article_id, "129");
    }

    #[test]
    fn test_zero_overlap_is_not_found() {
        let lookup = locate(&doc(), "estelionato");
        assert_eq!(lookup, Lookup::NotFound { query: "estelionato".to_string() });
    }

    #[test]
    fn test_body_only_overlap_is_not_found() {
        // "subtrair" aparece nos corpos, mas em nenhuma rubrica
        assert!(!locate(&doc(), "subtrair").is_found());
    }

    #[test]
    fn test_stopword_query_is_not_found() {
        assert!(!locate(&doc(), "de a o").is_found());
        assert!(!locate(&doc(), "").is_found());
    }

    #[test]
    fn test_extra_words_in_query() {
        // "simples" não aparece em "Furto", mas cobertura 1/2 atinge o limiar
        let m = locate(&doc(), "furto simples");
        assert_eq!(m.found().unwrap().article_id, "155");
        assert_eq!(m.found().unwrap().missing_terms, vec!["simples"]);
    }

    #[test]
    fn test_low_coverage_is_not_found() {
        assert!(!locate(&doc(), "roubo seguido de morte com arma").is_found());
    }

    #[test]
    fn test_more_specific_heading_wins_by_score() {
        let m = locate(&doc(), "furto qualificado");
        assert_eq!(m.found().unwrap().article_id, "155-Q");
    }

    #[test]
    fn test_tie_prefers_smaller_body() {
        // "furto" casa as duas rubricas com a mesma pontuação; o corpo de 155 é menor
        let m = locate(&doc(), "furto");
        assert_eq!(m.found().unwrap().article_id, "155");
    }

    #[test]
    fn test_tie_with_equal_bodies_prefers_document_order() {
        let doc = LegalDocument::new(vec![
            entry("10", "Dano", "Pena - detenção."),
            entry("20", "Dano", "Pena - detenção."),
        ])
        .unwrap();
        assert_eq!(locate(&doc, "dano").found().unwrap().article_id, "10");
    }

    #[test]
    fn test_lead_lines_boost_score() {
        let doc = LegalDocument::new(vec![
            entry("1", "Furto", "Subtrair coisa alheia de uso."),
            entry("2", "Furto de uso", "Subtrair coisa alheia para uso momentâneo."),
        ])
        .unwrap();
        let m = locate(&doc, "furto de coisa");
        // artigo 1: furto(2) + coisa(1) = 3; artigo 2: furto(2) + coisa(1) = 3 → menor corpo
        assert_eq!(m.found().unwrap().article_id, "1");
        assert_eq!(m.found().unwrap().score, 3);
    }

    #[test]
    fn test_locate_is_pure() {
        let d = doc();
        assert_eq!(locate(&d, "roubo"), locate(&d, "roubo"));
    }
}
