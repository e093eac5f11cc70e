//! Erros de construção do consultor.
//!
//! O pipeline de consulta em si não falha: ausência de artigo e fatos não
//! determinados são valores ([`crate::locator::Lookup::NotFound`],
//! [`crate::facts::Eligibility::Unknown`]). Os erros abaixo surgem apenas ao
//! montar documentos e tabelas de regras.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsultorError {
    /// Documento construído sem nenhum artigo
    #[error("documento legal vazio")]
    EmptyDocument,

    /// Texto de entrada sem nenhuma linha "Art. N"
    #[error("nenhum artigo encontrado no texto ({0} linhas analisadas)")]
    NoArticles(usize),

    /// Tabela de regras de fiança inválida
    #[error("tabela de regras de fiança inválida: {0}")]
    InvalidRuleTable(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConsultorError>;
