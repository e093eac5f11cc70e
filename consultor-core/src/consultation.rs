//! # Consulta — Orquestrador Localizador → Extrator
//!
//! O [`Consultant`] conecta as etapas do pipeline sobre códigos já carregados:
//!
//! 1. **Localização** ([`crate::locator`]): consulta → artigo do CP.
//! 2. **Extração** ([`crate::extractor`]): corpo do artigo → fatos penais.
//! 3. **Comparação**: várias consultas → linhas tabulares para gráficos e
//!    exportação (feitos por quem consome o resultado).
//!
//! Quando o CPP é informado, o limiar de fiança da tabela processual é lido
//! do art. 322; caso contrário vale o padrão embutido.

use serde::{Deserialize, Serialize};

use crate::document::LegalDocument;
use crate::extractor::Extractor;
use crate::facts::{Eligibility, PenaltyFacts, HEURISTIC_NOTICE};
use crate::locator::{ArticleMatch, Locator, Lookup};
use crate::normalize::query_key;
use crate::rules::BailRuleTable;

/// Resultado completo de uma consulta bem-sucedida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub query: String,
    pub article: ArticleMatch,
    pub facts: PenaltyFacts,
    pub notice: String,
}

/// Consulta encontrada ou não: "sem artigo" é um resultado, não um erro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConsultOutcome {
    Found(Consultation),
    NotFound { query: String },
}

impl ConsultOutcome {
    pub fn consultation(&self) -> Option<&Consultation> {
        match self {
            ConsultOutcome::Found(c) => Some(c),
            ConsultOutcome::NotFound { .. } => None,
        }
    }
}

/// Uma linha do comparador de crimes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub query: String,
    pub found: bool,
    pub article_id: Option<String>,
    pub heading: Option<String>,
    pub min_months: Option<u32>,
    pub max_months: Option<u32>,
    pub min_years: Option<f64>,
    pub max_years: Option<f64>,
    pub regime: Option<String>,
    pub bail: String,
    pub substitution: String,
}

/// Tabela de comparação entre crimes, na ordem das consultas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub notice: String,
}

impl Comparison {
    /// Linhas com artigo encontrado.
    pub fn found_rows(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows.iter().filter(|r| r.found)
    }
}

/// Consultor sobre o Código Penal, com CPP opcional.
///
/// Não guarda estado mutável: pode ser compartilhado entre threads (`Arc`).
#[derive(Debug, Clone)]
pub struct Consultant {
    penal_code: LegalDocument,
    procedure_code: Option<LegalDocument>,
    locator: Locator,
    extractor: Extractor,
}

impl Consultant {
    /// Consultor com localizador padrão e tabela de fiança padrão do CPP.
    pub fn new(penal_code: LegalDocument) -> Self {
        Self {
            penal_code,
            procedure_code: None,
            locator: Locator::default(),
            extractor: Extractor::default(),
        }
    }

    /// Anexa o CPP e, se possível, lê dele o limiar de fiança (art. 322).
    pub fn with_procedure_code(mut self, procedure_code: LegalDocument) -> Self {
        match BailRuleTable::from_procedure_code(&procedure_code) {
            Some(table) => self.extractor.bail_rules = table,
            None => tracing::warn!("CPP sem limiar reconhecível no art. 322; mantendo tabela padrão"),
        }
        self.procedure_code = Some(procedure_code);
        self
    }

    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn penal_code(&self) -> &LegalDocument {
        &self.penal_code
    }

    pub fn procedure_code(&self) -> Option<&LegalDocument> {
        self.procedure_code.as_ref()
    }

    pub fn bail_rules(&self) -> &BailRuleTable {
        &self.extractor.bail_rules
    }

    /// Localiza o crime e extrai seus fatos.
    pub fn consult(&self, query: &str) -> ConsultOutcome {
        match self.locator.locate(&self.penal_code, query) {
            Lookup::Found(article) => {
                let facts = self.extractor.extract(&article.body);
                tracing::info!(query, article = %article.article_id, "consulta resolvida");
                ConsultOutcome::Found(Consultation {
                    query: query.to_string(),
                    article,
                    facts,
                    notice: HEURISTIC_NOTICE.to_string(),
                })
            }
            Lookup::NotFound { query } => {
                tracing::info!(query = %query, "consulta sem artigo correspondente");
                ConsultOutcome::NotFound { query }
            }
        }
    }

    /// Compara várias consultas. Consultas equivalentes após normalização
    /// ("Furto" e "furto") aparecem uma única vez, na posição da primeira.
    pub fn compare<S: AsRef<str>>(&self, queries: &[S]) -> Comparison {
        let mut seen: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for query in queries {
            let query = query.as_ref().trim();
            let key = query_key(query);
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            rows.push(row_for(query, &self.consult(query)));
        }
        Comparison {
            rows,
            notice: HEURISTIC_NOTICE.to_string(),
        }
    }
}

fn row_for(query: &str, outcome: &ConsultOutcome) -> ComparisonRow {
    match outcome.consultation() {
        Some(c) => ComparisonRow {
            query: query.to_string(),
            found: true,
            article_id: Some(c.article.article_id.clone()),
            heading: Some(c.article.heading.clone()),
            min_months: c.facts.min_months.months(),
            max_months: c.facts.max_months.months(),
            min_years: c.facts.min_months.years(),
            max_years: c.facts.max_months.years(),
            regime: c.facts.regime.map(|r| r.label().to_string()),
            bail: c.facts.bail.label().to_string(),
            substitution: c.facts.substitution.label().to_string(),
        },
        None => ComparisonRow {
            query: query.to_string(),
            found: false,
            article_id: None,
            heading: None,
            min_months: None,
            max_months: None,
            min_years: None,
            max_years: None,
            regime: None,
            bail: Eligibility::Unknown.label().to_string(),
            substitution: Eligibility::Unknown.label().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ArticleEntry;
    use crate::facts::{Regime, SentenceBound};
    use crate::samples::{SAMPLE_PENAL_CODE, SAMPLE_PROCEDURE_CODE};

    fn consultant() -> Consultant {
        Consultant::new(LegalDocument::parse(SAMPLE_PENAL_CODE).unwrap())
            .with_procedure_code(LegalDocument::parse(SAMPLE_PROCEDURE_CODE).unwrap())
    }

    #[test]
    fn test_homicidio_scenario_end_to_end() {
        let doc = LegalDocument::new(vec![ArticleEntry {
            id: "121".into(),
            heading: "Homicídio simples".into(),
            body: "Matar alguém: Pena - reclusão, de seis a vinte anos.".into(),
        }])
        .unwrap();
        let outcome = Consultant::new(doc).consult("homicidio simples");
        let c = outcome.consultation().unwrap();
        assert_eq!(c.article.article_id, "121");
        assert_eq!(c.facts.min_months, SentenceBound::Known(72));
        assert_eq!(c.facts.max_months, SentenceBound::Known(240));
        assert_eq!(c.facts.regime, Some(Regime::Closed));
        assert_eq!(c.facts.bail, Eligibility::Unknown);
        assert_eq!(c.facts.substitution, Eligibility::Ineligible);
        assert_eq!(c.notice, HEURISTIC_NOTICE);
    }

    #[test]
    fn test_sample_corpus_consultations() {
        let consultant = consultant();

        let furto = consultant.consult("furto");
        let furto = furto.consultation().unwrap();
        assert_eq!(furto.article.article_id, "155");
        assert_eq!(furto.facts.max_months, SentenceBound::Known(48));
        assert_eq!(furto.facts.bail, Eligibility::Eligible);
        assert_eq!(furto.facts.substitution, Eligibility::Eligible);

        let roubo = consultant.consult("Roubo");
        let roubo = roubo.consultation().unwrap();
        assert_eq!(roubo.article.article_id, "157");
        assert_eq!(roubo.facts.substitution, Eligibility::Ineligible);

        let lesao = consultant.consult("lesão corporal");
        let lesao = lesao.consultation().unwrap();
        assert_eq!(lesao.facts.min_months, SentenceBound::Known(3));
        assert_eq!(lesao.facts.regime, Some(Regime::SemiOpen));
    }

    #[test]
    fn test_procedure_code_sets_bail_threshold() {
        let consultant = consultant();
        assert_eq!(consultant.bail_rules().rules[0].up_to_months, 48);
        assert!(consultant.procedure_code().is_some());
    }

    #[test]
    fn test_procedure_code_without_article_322_keeps_default() {
        let cpp = LegalDocument::parse("Art. 1º O processo penal reger-se-á por este Código.").unwrap();
        let consultant = Consultant::new(LegalDocument::parse(SAMPLE_PENAL_CODE).unwrap())
            .with_procedure_code(cpp);
        assert_eq!(consultant.bail_rules(), &BailRuleTable::cpp_default());
    }

    #[test]
    fn test_not_found_is_a_value() {
        let outcome = consultant().consult("sonegação fiscal");
        assert_eq!(outcome, ConsultOutcome::NotFound { query: "sonegação fiscal".to_string() });
    }

    #[test]
    fn test_compare_dedups_and_keeps_order() {
        let comparison = consultant().compare(&["Roubo", "furto", "ROUBO", "pirataria"]);
        let queries: Vec<&str> = comparison.rows.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["Roubo", "furto", "pirataria"]);

        assert_eq!(comparison.found_rows().count(), 2);
        let roubo = &comparison.rows[0];
        assert_eq!(roubo.article_id.as_deref(), Some("157"));
        assert_eq!(roubo.min_years, Some(4.0));
        assert_eq!(roubo.max_years, Some(10.0));
        assert_eq!(roubo.regime.as_deref(), Some("reclusão"));
        assert_eq!(roubo.substitution, "não");

        let missing = &comparison.rows[2];
        assert!(!missing.found);
        assert_eq!(missing.bail, "não determinado");
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(consultant().consult("pirataria")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "not_found", "query": "pirataria"}));
    }
}
