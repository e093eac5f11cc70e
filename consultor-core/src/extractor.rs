//! # Extrator de Fatos Penais
//!
//! Deriva, do corpo de um artigo, a faixa de pena, o regime e a elegibilidade
//! para fiança e substituição.
//!
//! ## Heurísticas
//!
//! | Fato         | Regra                                                                  |
//! |--------------|------------------------------------------------------------------------|
//! | Faixa        | primeira "[de] N [unidade] a M unidade" do caput, a partir de "Pena"   |
//! | Unidades     | anos ×12, meses ×1, dias ÷30 (apenas quando exato)                     |
//! | Regime       | primeira ocorrência de "reclusão" ou "detenção" no corpo              |
//! | Fiança       | frase explícita → tabela processual → não determinado                  |
//! | Substituição | máximo ≤ 48 meses E caput sem violência/grave ameaça (tri-valorada)   |
//!
//! Parágrafos (`§`, "Parágrafo único") são modificadores aninhados e ficam de
//! fora da faixa. O resultado é uma aproximação (ver
//! [`crate::facts::HEURISTIC_NOTICE`]) e nunca uma interpretação jurídica.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use consultor_core::extractor::extract;
//! use consultor_core::facts::{Regime, SentenceBound};
//!
//! let facts = extract("Subtrair coisa alheia móvel: Pena - reclusão, de um a quatro anos, e multa.");
//! assert_eq!(facts.min_months, SentenceBound::Known(12));
//! assert_eq!(facts.max_months, SentenceBound::Known(48));
//! assert_eq!(facts.regime, Some(Regime::Closed));
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::facts::{reconcile_bounds, Evidence, PenaltyFacts, Regime};
use crate::normalize::fold;
use crate::numerals::{parse_numeral, word_alternation};
use crate::rules::{bail_eligibility, substitution_eligibility, violence_terms, BailRuleTable};

static SENTENCE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let words = word_alternation();
    let num = format!(r"(?:\d+(?:\s*\([a-z ]+\))?|\b(?:{words})\b(?:\s+e\s+(?:{words})\b)?)");
    let unit = r"(?:anos?|meses|mes|dias?)\b";
    Regex::new(&format!(
        r"(?:\bde\s+)?(?P<min>{num})(?:\s+(?P<min_unit>{unit}))?\s+a\s+(?P<max>{num})\s+(?P<max_unit>{unit})"
    ))
    .expect("padrão de faixa de pena válido")
});

/// Início dos dispositivos aninhados
const NESTED_MARKERS: &[&str] = &["§", "paragrafo unico"];

/// Extrator configurável. Sem estado entre chamadas.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    pub bail_rules: BailRuleTable,
}

impl Extractor {
    pub fn new(bail_rules: BailRuleTable) -> Self {
        Self { bail_rules }
    }

    /// Extrai todos os fatos de um corpo de artigo. Nunca falha.
    pub fn extract(&self, body: &str) -> PenaltyFacts {
        let folded = fold(body);

        let range = first_top_level_range(&folded);
        let (min_raw, max_raw, range_text) = match &range {
            Some(r) => (r.min, r.max, Some(r.text.clone())),
            None => (None, None, None),
        };
        let (min_months, max_months) = reconcile_bounds(min_raw, max_raw);
        if let (Some(lo), Some(hi)) = (min_raw, max_raw) {
            if lo > hi {
                tracing::warn!(min = lo, max = hi, "faixa de pena invertida marcada como inconsistente");
            }
        }

        let regime = first_regime(&folded);
        let (bail, bail_basis) = bail_eligibility(&folded, max_months, &self.bail_rules);
        let violence = violence_terms(offence_text(&folded));
        let substitution = substitution_eligibility(max_months, !violence.is_empty());

        tracing::debug!(
            ?min_months,
            ?max_months,
            ?regime,
            ?bail,
            ?substitution,
            "fatos extraídos"
        );

        PenaltyFacts {
            min_months,
            max_months,
            regime,
            bail,
            substitution,
            evidence: Evidence {
                range_text,
                bail_basis,
                violence_terms: violence,
            },
        }
    }
}

/// Extrai com a tabela processual padrão do CPP.
pub fn extract(body: &str) -> PenaltyFacts {
    Extractor::default().extract(body)
}

/// Faixa encontrada no texto dobrado; limites já convertidos em meses.
#[derive(Debug, Clone, PartialEq)]
struct RawRange {
    min: Option<u32>,
    max: Option<u32>,
    text: String,
}

/// Texto antes do primeiro parágrafo.
fn caput(folded: &str) -> &str {
    let cut = NESTED_MARKERS
        .iter()
        .filter_map(|m| folded.find(m))
        .min()
        .unwrap_or(folded.len());
    &folded[..cut]
}

/// Descrição do crime até o fim da linha da pena. O que vem depois é
/// rubrica ou dispositivo aninhado.
fn offence_text(folded: &str) -> &str {
    let top = caput(folded);
    match top.find("pena") {
        Some(start) => {
            let end = top[start..].find('\n').map_or(top.len(), |i| start + i);
            &top[..end]
        }
        None => top,
    }
}

/// Procura a faixa no caput a partir de "pena".
fn first_top_level_range(folded: &str) -> Option<RawRange> {
    let top = caput(folded);
    let start = top.find("pena").unwrap_or(0);
    let caps = SENTENCE_RANGE.captures(&top[start..])?;
    Some(range_from_captures(&caps))
}

fn range_from_captures(caps: &Captures) -> RawRange {
    let max_unit = caps.name("max_unit").map(|m| m.as_str()).unwrap_or_default();
    // "de um a quatro anos": o mínimo herda a unidade do máximo
    let min_unit = caps.name("min_unit").map(|m| m.as_str()).unwrap_or(max_unit);

    let min = caps
        .name("min")
        .and_then(|m| parse_numeral(m.as_str()))
        .and_then(|v| to_months(v, min_unit));
    let max = caps
        .name("max")
        .and_then(|m| parse_numeral(m.as_str()))
        .and_then(|v| to_months(v, max_unit));

    RawRange {
        min,
        max,
        text: caps[0].trim().to_string(),
    }
}

/// Converte para meses; dias só quando formam meses inteiros.
fn to_months(value: u32, unit: &str) -> Option<u32> {
    match unit {
        "ano" | "anos" => value.checked_mul(12),
        "mes" | "meses" => Some(value),
        "dia" | "dias" if value % 30 == 0 => Some(value / 30),
        _ => None,
    }
}

/// Primeira palavra-chave de regime no corpo inteiro.
fn first_regime(folded: &str) -> Option<Regime> {
    [Regime::Closed, Regime::SemiOpen]
        .into_iter()
        .filter_map(|r| folded.find(r.keyword()).map(|pos| (pos, r)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, r)| r)
}
