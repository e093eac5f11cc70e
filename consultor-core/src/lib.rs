//! # consultor-core — Consultor Jurídico Automatizado (CP/CPP)
//!
//! Este crate localiza um crime no texto consolidado do Código Penal e estima,
//! por heurísticas, a faixa de pena, o regime e a possibilidade de fiança e de
//! substituição da pena. É um projeto acadêmico: os resultados são aproximações
//! e devem sempre ser conferidos no texto legal.
//!
//! ## Arquitetura do Sistema
//!
//! O pipeline é uma sequência de transformações puras sobre texto:
//!
//! 1.  **Entrada**: texto ou HTML do código, obtido por quem usa o crate ([`html`]).
//! 2.  **Documento** ([`document`]): artigos `(id, rubrica, corpo)` imutáveis.
//! 3.  **Normalização** ([`normalize`]): minúsculas, sem acentos, sem pontuação.
//! 4.  **Localização** ([`locator`]): consulta → artigo, por sobreposição de termos.
//! 5.  **Extração** ([`extractor`], [`rules`], [`numerals`]): corpo → [`PenaltyFacts`].
//! 6.  **Saída** ([`consultation`]): registros serializáveis para gráficos e exportação.
//!
//! Falhas de busca e de extração são valores (`NotFound`, `Unknown`), nunca erros.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use consultor_core::{Consultant, LegalDocument};
//! use consultor_core::samples::SAMPLE_PENAL_CODE;
//!
//! let penal_code = LegalDocument::parse(SAMPLE_PENAL_CODE).unwrap();
//! let consultant = Consultant::new(penal_code);
//!
//! let outcome = consultant.consult("homicídio simples");
//! let consultation = outcome.consultation().unwrap();
//! assert_eq!(consultation.article.article_id, "121");
//! println!("Pena máxima: {}", consultation.facts.max_months.label());
//! ```

pub mod consultation;
pub mod document;
pub mod error;
pub mod extractor;
pub mod facts;
pub mod html;
pub mod locator;
pub mod normalize;
pub mod numerals;
pub mod rules;
pub mod samples;

pub use consultation::{Comparison, ComparisonRow, ConsultOutcome, Consultant, Consultation};
pub use document::{ArticleEntry, LegalDocument};
pub use error::ConsultorError;
pub use extractor::{extract, Extractor};
pub use facts::{Eligibility, PenaltyFacts, Regime, SentenceBound, HEURISTIC_NOTICE};
pub use locator::{locate, ArticleMatch, Locator, LocatorConfig, Lookup};
pub use rules::BailRuleTable;
