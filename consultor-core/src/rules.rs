//! # Motor de Regras — Fiança e Substituição da Pena
//!
//! Complementa a extração numérica com conhecimento legal explícito:
//!
//! - **Frases de fiança**: expressões como "inafiançável" ou "admite fiança"
//!   presentes no próprio artigo decidem diretamente.
//! - **Tabela processual** ([`BailRuleTable`]): limiares de pena máxima
//!   definidos pelo CPP (art. 322). É dado externo, substituível por JSON.
//! - **Substituição** (CP art. 44): pena máxima ≤ 4 anos e crime sem
//!   violência ou grave ameaça.
//!
//! Todas as regras operam sobre texto dobrado ([`crate::normalize::fold`]).
//! São aproximações: reincidência, causas de aumento e demais exceções não
//! são avaliadas, e a resposta cai para `Unknown` sempre que a regra não se
//! aplica com segurança.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::LegalDocument;
use crate::error::Result;
use crate::facts::{BailBasis, Eligibility, SentenceBound};
use crate::normalize::fold;
use crate::numerals::{parse_numeral, word_alternation};

/// Pena máxima (meses) até a qual a substituição é admitida (CP art. 44, I)
pub const SUBSTITUTION_MAX_MONTHS: u32 = 48;

/// Expressões que negam fiança. Verificadas antes das afirmativas, pois
/// "inafiancavel" contém "afiancavel" e "nao admite fianca" contém "admite fianca".
const DENIAL_PHRASES: &[&str] = &[
    "nao admite fianca",
    "nao admitem fianca",
    "nao sera concedida fianca",
    "insuscetivel de fianca",
    "insuscetiveis de fianca",
    "inafiancaveis",
    "inafiancavel",
];

const GRANT_PHRASES: &[&str] = &["admite fianca", "admitem fianca", "afiancaveis", "afiancavel"];

/// Negação a até duas palavras de uma expressão afirmativa:
/// "nao se admite fianca", "nao e afiancavel", "nao sera concedida fianca"
static NEGATED_GRANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bnao\s+(?:\w+\s+){0,2}?(?:admitem?\s+fianca|concedida\s+fianca|afiancave(?:l|is)\b)")
        .expect("padrão de negação válido")
});

/// Indicadores de crime cometido com violência ou grave ameaça
const VIOLENCE_TERMS: &[&str] = &["violencia", "grave ameaca"];

/// Uma linha da tabela processual de fiança.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BailRule {
    /// Aplica-se quando a pena máxima é menor ou igual a este valor (meses).
    pub up_to_months: u32,
    pub eligibility: Eligibility,
    /// Fundamento exibido ao usuário (ex: "CPP art. 322").
    pub basis: String,
}

/// Tabela de regras de fiança indexada por limiares de pena máxima.
///
/// A primeira regra cujo limiar cobre a pena máxima decide. Se o corpo do
/// artigo mencionar alguma das `exceptions` (crimes inafiançáveis do CPP
/// art. 323), a tabela se abstém.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BailRuleTable {
    pub rules: Vec<BailRule>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

static CPP_322_THRESHOLD: LazyLock<Regex> = LazyLock::new(|| {
    let words = word_alternation();
    Regex::new(&format!(
        r"superior\s+a\s+(\d+(?:\s*\([a-z ]+\))?|(?:{words})(?:\s+e\s+(?:{words}))?)\s+anos?\b"
    ))
    .expect("padrão do art. 322 válido")
});

impl BailRuleTable {
    /// Tabela vazia: nunca resolve, a fiança fica `Unknown` sem frase explícita.
    pub fn empty() -> Self {
        Self { rules: vec![], exceptions: vec![] }
    }

    /// Tabela padrão do CPP: a autoridade policial concede fiança quando a pena
    /// máxima não excede 4 anos (art. 322), salvo os crimes do art. 323.
    pub fn cpp_default() -> Self {
        Self::with_police_threshold(48)
    }

    fn with_police_threshold(months: u32) -> Self {
        Self {
            rules: vec![BailRule {
                up_to_months: months,
                eligibility: Eligibility::Eligible,
                basis: format!(
                    "CPP art. 322: fiança arbitrável pela autoridade policial (pena máxima até {} meses)",
                    months
                ),
            }],
            exceptions: [
                "racismo",
                "tortura",
                "trafico ilicito de entorpecentes",
                "trafico ilicito de drogas",
                "trafico de drogas",
                "terrorismo",
                "hediondo",
                "grupos armados",
            ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Lê o limiar do art. 322 de um CPP carregado; `None` se o artigo não
    /// existir ou não trouxer um limiar reconhecível.
    pub fn from_procedure_code(cpp: &LegalDocument) -> Option<Self> {
        let article = cpp.article("322")?;
        let folded = fold(&article.body);
        let caps = CPP_322_THRESHOLD.captures(&folded)?;
        let years = parse_numeral(&caps[1])?;
        let months = years.checked_mul(12)?;
        tracing::debug!(months, "limiar de fiança lido do CPP art. 322");
        Some(Self::with_police_threshold(months))
    }

    /// Carrega uma tabela a partir de JSON (dado externo).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Avalia a tabela para a pena máxima extraída.
    pub fn evaluate(&self, max: SentenceBound, folded_body: &str) -> Option<&BailRule> {
        let max = max.months()?;
        if self.exceptions.iter().any(|e| folded_body.contains(e.as_str())) {
            return None;
        }
        self.rules.iter().find(|r| max <= r.up_to_months)
    }
}

impl Default for BailRuleTable {
    fn default() -> Self {
        Self::cpp_default()
    }
}

/// Procura frases explícitas de fiança no corpo dobrado. Negações vêm
/// primeiro, pois toda frase negativa contém uma afirmativa.
pub fn explicit_bail_phrase(folded_body: &str) -> Option<(Eligibility, String)> {
    if let Some(m) = NEGATED_GRANT.find(folded_body) {
        return Some((Eligibility::Ineligible, m.as_str().to_string()));
    }
    if let Some(p) = DENIAL_PHRASES.iter().find(|p| folded_body.contains(*p)) {
        return Some((Eligibility::Ineligible, p.to_string()));
    }
    GRANT_PHRASES
        .iter()
        .find(|p| folded_body.contains(*p))
        .map(|p| (Eligibility::Eligible, p.to_string()))
}

/// Decide a fiança: frase explícita, depois tabela, senão `Unknown`.
pub fn bail_eligibility(
    folded_body: &str,
    max: SentenceBound,
    table: &BailRuleTable,
) -> (Eligibility, BailBasis) {
    if let Some((eligibility, phrase)) = explicit_bail_phrase(folded_body) {
        return (eligibility, BailBasis::ExplicitPhrase(phrase));
    }
    match table.evaluate(max, folded_body) {
        Some(rule) => (rule.eligibility, BailBasis::RuleTable(rule.basis.clone())),
        None => (Eligibility::Unknown, BailBasis::Unresolved),
    }
}

/// Termos de violência presentes no texto dobrado. Ocorrências negadas
/// ("sem violencia") não contam.
pub fn violence_terms(folded_text: &str) -> Vec<String> {
    VIOLENCE_TERMS
        .iter()
        .filter(|t| {
            folded_text
                .match_indices(*t)
                .any(|(pos, _)| !folded_text[..pos].trim_end().ends_with("sem"))
        })
        .map(|t| t.to_string())
        .collect()
}

/// CP art. 44: pena máxima ≤ 4 anos E crime sem violência ou grave ameaça.
///
/// Conjunção tri-valorada: violência presente decide `Ineligible` mesmo sem
/// pena conhecida; sem violência, pena máxima desconhecida dá `Unknown`.
pub fn substitution_eligibility(max: SentenceBound, violent: bool) -> Eligibility {
    let by_sentence = match max.months() {
        Some(m) => Eligibility::from_bool(m <= SUBSTITUTION_MAX_MONTHS),
        None => Eligibility::Unknown,
    };
    by_sentence.and(Eligibility::from_bool(!violent))
}
