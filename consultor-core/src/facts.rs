//! # Fatos Penais Extraídos
//!
//! Tipos do registro produzido pelo extrator. Todo campo admite explicitamente
//! o estado "não determinado": as heurísticas frequentemente não conseguem
//! decidir, e quem consome o registro deve tratar esse caso em vez de receber
//! um `false` silencioso.
//!
//! | Campo          | Valores                                         |
//! |----------------|-------------------------------------------------|
//! | pena mínima    | `Known(meses)`, `Unknown`, `Unreliable`         |
//! | pena máxima    | `Known(meses)`, `Unknown`, `Unreliable`         |
//! | regime         | `Some(Closed)` (reclusão), `Some(SemiOpen)` (detenção), `None` |
//! | fiança         | `Eligible`, `Ineligible`, `Unknown`             |
//! | substituição   | `Eligible`, `Ineligible`, `Unknown`             |

use serde::{Deserialize, Serialize};

/// Aviso anexado a toda saída: os fatos são aproximações heurísticas.
pub const HEURISTIC_NOTICE: &str = "Estimativa heurística para fins acadêmicos, não constitui \
interpretação jurídica. Considera apenas a primeira faixa de pena do caput e ignora \
qualificadoras, causas de aumento e exceções legais; violência ou grave ameaça só é \
considerada quando mencionada no caput. Confirme sempre no texto legal.";

/// Limite de uma pena, em meses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "months", rename_all = "snake_case")]
pub enum SentenceBound {
    /// Valor extraído e consistente.
    Known(u32),
    /// Nenhum valor pôde ser extraído.
    Unknown,
    /// Valor extraído mas incoerente com o outro limite (mínimo > máximo).
    Unreliable,
}

impl SentenceBound {
    /// Meses, apenas quando o valor é confiável.
    pub fn months(&self) -> Option<u32> {
        match self {
            SentenceBound::Known(m) => Some(*m),
            _ => None,
        }
    }

    /// Anos (fracionários), para gráficos de faixa de pena.
    pub fn years(&self) -> Option<f64> {
        self.months().map(|m| f64::from(m) / 12.0)
    }

    pub fn from_option(months: Option<u32>) -> Self {
        months.map_or(SentenceBound::Unknown, SentenceBound::Known)
    }

    /// Rótulo para exibição ("6 anos", "8 meses", "não determinado").
    pub fn label(&self) -> String {
        match self {
            SentenceBound::Known(m) if m % 12 == 0 => {
                let years = m / 12;
                if years == 1 { "1 ano".to_string() } else { format!("{years} anos") }
            }
            SentenceBound::Known(m) => {
                if *m == 1 { "1 mês".to_string() } else { format!("{m} meses") }
            }
            SentenceBound::Unknown => "não determinado".to_string(),
            SentenceBound::Unreliable => "inconsistente".to_string(),
        }
    }
}

/// Regime prisional associado à espécie de pena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// **Reclusão**: admite início em regime fechado.
    Closed,
    /// **Detenção**: início em regime semiaberto ou aberto.
    SemiOpen,
}

impl Regime {
    /// Palavra-chave (dobrada) que identifica o regime no texto legal
    pub fn keyword(&self) -> &'static str {
        match self {
            Regime::Closed => "reclusao",
            Regime::SemiOpen => "detencao",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Regime::Closed => "reclusão",
            Regime::SemiOpen => "detenção",
        }
    }
}

/// Resposta tri-valorada para fiança e substituição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Ineligible,
    /// A heurística não conseguiu decidir; nunca equivale a `Ineligible`.
    Unknown,
}

impl Eligibility {
    pub fn from_bool(value: bool) -> Self {
        if value { Eligibility::Eligible } else { Eligibility::Ineligible }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Eligibility::Eligible => Some(true),
            Eligibility::Ineligible => Some(false),
            Eligibility::Unknown => None,
        }
    }

    /// Conjunção de Kleene: `Ineligible` domina, depois `Unknown`.
    pub fn and(self, other: Eligibility) -> Eligibility {
        match (self, other) {
            (Eligibility::Ineligible, _) | (_, Eligibility::Ineligible) => Eligibility::Ineligible,
            (Eligibility::Unknown, _) | (_, Eligibility::Unknown) => Eligibility::Unknown,
            _ => Eligibility::Eligible,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "sim",
            Eligibility::Ineligible => "não",
            Eligibility::Unknown => "não determinado",
        }
    }
}

/// De onde veio a conclusão sobre a fiança.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum BailBasis {
    /// Frase explícita no próprio artigo (ex: "inafiançável").
    ExplicitPhrase(String),
    /// Regra da tabela processual (ex: "CPP art. 322").
    RuleTable(String),
    /// Nenhuma fonte resolveu.
    Unresolved,
}

/// Trechos que fundamentam cada fato, para auditoria na interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Trecho (dobrado) da faixa de pena considerada.
    pub range_text: Option<String>,
    pub bail_basis: BailBasis,
    /// Termos de violência encontrados no corpo.
    pub violence_terms: Vec<String>,
}

/// Registro completo de fatos heurísticos de um artigo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyFacts {
    pub min_months: SentenceBound,
    pub max_months: SentenceBound,
    pub regime: Option<Regime>,
    pub bail: Eligibility,
    pub substitution: Eligibility,
    pub evidence: Evidence,
}

impl PenaltyFacts {
    /// Registro sem nenhum fato determinado.
    pub fn unknown() -> Self {
        Self {
            min_months: SentenceBound::Unknown,
            max_months: SentenceBound::Unknown,
            regime: None,
            bail: Eligibility::Unknown,
            substitution: Eligibility::Unknown,
            evidence: Evidence {
                range_text: None,
                bail_basis: BailBasis::Unresolved,
                violence_terms: Vec::new(),
            },
        }
    }
}

/// Aplica o invariante mínimo ≤ máximo: limites incoerentes viram `Unreliable`.
pub fn reconcile_bounds(min: Option<u32>, max: Option<u32>) -> (SentenceBound, SentenceBound) {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => (SentenceBound::Unreliable, SentenceBound::Unreliable),
        _ => (SentenceBound::from_option(min), SentenceBound::from_option(max)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_marks_inverted_bounds_unreliable() {
        let (lo, hi) = reconcile_bounds(Some(60), Some(12));
        assert_eq!(lo, SentenceBound::Unreliable);
        assert_eq!(hi, SentenceBound::Unreliable);
        assert_eq!(lo.months(), None);
    }

    #[test]
    fn test_reconcile_keeps_consistent_and_partial_bounds() {
        assert_eq!(
            reconcile_bounds(Some(12), Some(48)),
            (SentenceBound::Known(12), SentenceBound::Known(48))
        );
        assert_eq!(
            reconcile_bounds(None, Some(48)),
            (SentenceBound::Unknown, SentenceBound::Known(48))
        );
    }

    #[test]
    fn test_kleene_and() {
        use Eligibility::*;
        assert_eq!(Eligible.and(Eligible), Eligible);
        assert_eq!(Eligible.and(Unknown), Unknown);
        assert_eq!(Unknown.and(Ineligible), Ineligible);
        assert_eq!(Ineligible.and(Eligible), Ineligible);
    }

    #[test]
    fn test_bound_labels() {
        assert_eq!(SentenceBound::Known(72).label(), "6 anos");
        assert_eq!(SentenceBound::Known(12).label(), "1 ano");
        assert_eq!(SentenceBound::Known(6).label(), "6 meses");
        assert_eq!(SentenceBound::Unknown.label(), "não determinado");
        assert_eq!(SentenceBound::Known(18).years(), Some(1.5));
    }

    #[test]
    fn test_bound_serializes_with_status() {
        let json = serde_json::to_value(SentenceBound::Known(48)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "known", "months": 48}));
        let json = serde_json::to_value(SentenceBound::Unknown).unwrap();
        assert_eq!(json, serde_json::json!({"status": "unknown"}));
    }
}
