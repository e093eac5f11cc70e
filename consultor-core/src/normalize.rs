//! # Normalização de Texto Jurídico
//!
//! Transforma títulos de artigos, corpos e consultas em uma forma canônica
//! comparável: minúsculas, sem acentos e sem pontuação.
//!
//! ## Etapas
//!
//! 1. **Dobra de acentos** ([`fold`]): decomposição NFD e remoção das marcas
//!    combinantes ("Homicídio" → "homicidio"). A pontuação é preservada, o que
//!    permite ao extrator de fatos enxergar "§" e "12 (doze)".
//! 2. **Termos** ([`terms`]): palavras da forma dobrada, sem pontuação e sem
//!    palavras funcionais ("de", "a", "do"...).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use consultor_core::normalize::terms;
//!
//! let t = terms("Furto qualificado (art. 155, § 4º)");
//! assert_eq!(t, vec!["furto", "qualificado", "155", "4o"]);
//! ```

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Um termo normalizado com sua posição (índice de palavra) no texto de origem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    /// Forma normalizada (ex: "homicidio").
    pub text: String,
    /// Índice sequencial da palavra no texto dobrado (contando palavras funcionais).
    pub index: usize,
}

/// Palavras funcionais do português que não contribuem para a identificação de um crime.
const STOPWORDS: &[&str] = &[
    "a", "o", "as", "os", "ao", "aos", "de", "da", "do", "das", "dos", "e", "em", "no", "na",
    "nos", "nas", "num", "numa", "por", "pela", "pelo", "para", "com", "um", "uma", "ou", "que",
    "se", "art", "artigo",
];

/// Minúsculas sem diacríticos, preservando pontuação e espaços.
///
/// Ordinais tipográficos ("º", "ª", "°") viram "o"/"a" e o espaço
/// inseparável vira espaço comum.
pub fn fold(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'º' | '°' => 'o',
            'ª' => 'a',
            '\u{a0}' => ' ',
            other => other,
        })
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Verifica se uma palavra (já dobrada) é funcional.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Termos significativos de um texto, na ordem em que aparecem (com repetições).
pub fn terms(text: &str) -> Vec<String> {
    indexed_terms(text).into_iter().map(|t| t.text).collect()
}

/// Como [`terms`], mas guardando o índice de palavra de cada termo.
pub fn indexed_terms(text: &str) -> Vec<Term> {
    let folded = fold(text);
    folded
        .unicode_words()
        .enumerate()
        .filter(|(_, w)| !is_stopword(w))
        .map(|(index, w)| Term {
            text: w.to_string(),
            index,
        })
        .collect()
}

/// Termos distintos, preservando a ordem da primeira ocorrência.
pub fn distinct_terms(text: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for term in terms(text) {
        if !seen.contains(&term) {
            seen.push(term);
        }
    }
    seen
}

/// Chave canônica de uma consulta: termos distintos unidos por espaço.
///
/// "Furto  SIMPLES" e "furto simples" produzem a mesma chave.
pub fn query_key(query: &str) -> String {
    distinct_terms(query).join(" ")
}
