//! # Numerais em Português
//!
//! Os códigos escrevem quantidades por extenso ("de seis a vinte anos"),
//! em algarismos ("de 6 a 10 anos") ou em ambos ("de 12 (doze) a 30 (trinta) anos").
//! Este módulo converte essas três formas em `u32`, sempre sobre texto já
//! dobrado por [`crate::normalize::fold`] (sem acentos, minúsculo).

/// Numerais por extenso reconhecidos, já sem acentos.
const NUMERAL_WORDS: &[(&str, u32)] = &[
    ("um", 1), ("uma", 1), ("dois", 2), ("duas", 2), ("tres", 3), ("quatro", 4), ("cinco", 5),
    ("seis", 6), ("sete", 7), ("oito", 8), ("nove", 9), ("dez", 10), ("onze", 11), ("doze", 12),
    ("treze", 13), ("quatorze", 14), ("catorze", 14), ("quinze", 15), ("dezesseis", 16),
    ("dezasseis", 16), ("dezessete", 17), ("dezoito", 18), ("dezenove", 19), ("vinte", 20),
    ("trinta", 30), ("quarenta", 40), ("cinquenta", 50), ("sessenta", 60), ("setenta", 70),
    ("oitenta", 80), ("noventa", 90), ("cem", 100), ("cento", 100),
];

/// Valor de um único numeral por extenso.
pub fn word_value(word: &str) -> Option<u32> {
    NUMERAL_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, v)| *v)
}

/// Alternância regex com todos os numerais, dos mais longos para os mais curtos,
/// para que "dezessete" seja preferido a "dez".
pub fn word_alternation() -> String {
    let mut words: Vec<&str> = NUMERAL_WORDS.iter().map(|(w, _)| *w).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.join("|")
}

/// Interpreta um numeral em qualquer das formas aceitas.
///
/// - `"4"` → 4
/// - `"12 (doze)"` → 12 (os algarismos prevalecem)
/// - `"quarenta e oito"` → 48
///
/// Retorna `None` para qualquer coisa não reconhecida, nunca entra em pânico.
pub fn parse_numeral(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        return digits.parse().ok();
    }

    let mut total: u32 = 0;
    let mut parts = 0;
    for part in text.split(" e ") {
        let value = word_value(part.trim())?;
        total = total.checked_add(value)?;
        parts += 1;
    }
    if parts == 0 {
        None
    } else {
        Some(total)
    }
}
