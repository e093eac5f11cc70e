//! # Documento Legal
//!
//! Representação imutável de um código (CP ou CPP) como sequência ordenada de
//! artigos `(id, rubrica, corpo)`. O documento é montado uma única vez a partir
//! do texto consolidado e nunca mais alterado; localizador e extrator apenas o
//! leem.
//!
//! ## Layout esperado do texto
//!
//! ```text
//! TÍTULO I                              ← estrutural, descartado
//! DOS CRIMES CONTRA A PESSOA            ← estrutural, descartado
//! Homicídio simples                     ← rubrica do artigo seguinte
//! Art. 121. Matar alguém:               ← início do artigo 121
//! Pena - reclusão, de seis a vinte anos.
//! § 1º Se o agente comete o crime ...   ← parágrafo, continua no corpo
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConsultorError, Result};
use crate::html;
use crate::normalize::fold;

/// Um artigo do código.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEntry {
    /// Número do artigo, com sufixo quando houver (ex: "121", "121-A").
    pub id: String,
    /// Rubrica (nome do crime) que antecede o artigo; vazia quando ausente.
    pub heading: String,
    /// Texto do artigo, uma linha por dispositivo (caput, incisos, parágrafos).
    pub body: String,
}

/// Código legal imutável e não vazio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalDocument {
    articles: Vec<ArticleEntry>,
}

/// "Art. 121.", "Art. 1º", "Art. 1o -", "Art. 121-A." → (número, sufixo, resto)
static ARTICLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Art|ART)\.?\s*(\d+)(?:[º°]|o\b)?(?:-([A-Z])\b)?\s*[.\-–—:]*\s*(.*)$")
        .expect("padrão de artigo válido")
});

/// Notas editoriais da compilação: "(Redação dada pela Lei nº 7.209, de 1984)"
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(\s*(?:Reda[cç][aã]o|Inclu[ií]d[oa]|Vide|Revogad[oa]|Vig[eê]ncia|Renumerad[oa]|Acrescentad[oa])[^)]*\)",
    )
    .expect("padrão de anotação válido")
});

/// Incisos e alíneas: "I - ", "IV –", "a)"
static ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[IVXLC]+\s*[-–—]|[a-z]\))").expect("padrão de inciso válido")
});

const STRUCTURAL_PREFIXES: &[&str] = &["titulo ", "capitulo ", "secao ", "subsecao ", "livro ", "parte "];

/// Maior rubrica aceita, em palavras
const MAX_RUBRIC_WORDS: usize = 12;

impl LegalDocument {
    /// Monta um documento a partir de artigos já separados.
    pub fn new(articles: Vec<ArticleEntry>) -> Result<Self> {
        if articles.is_empty() {
            return Err(ConsultorError::EmptyDocument);
        }
        Ok(Self { articles })
    }

    /// Interpreta o texto consolidado (uma linha por dispositivo).
    pub fn parse(text: &str) -> Result<Self> {
        let mut articles = Vec::new();
        let mut preamble: Vec<String> = Vec::new();
        let mut current: Option<OpenArticle> = None;
        let mut line_count = 0;

        for raw in text.lines() {
            let line = clean_line(raw);
            if line.is_empty() {
                continue;
            }
            line_count += 1;
            if is_structural(&line) {
                continue;
            }

            let Some((id, rest)) = article_start(&line) else {
                match current.as_mut() {
                    Some(open) => open.lines.push(line),
                    None => preamble.push(line),
                }
                continue;
            };

            // A rubrica é a última linha acumulada antes do "Art."
            let buffer = match current.as_mut() {
                Some(open) => &mut open.lines,
                None => &mut preamble,
            };
            let take_rubric = buffer.last().is_some_and(|l| is_rubric(l));
            let heading = if take_rubric { buffer.pop().unwrap_or_default() } else { String::new() };

            if let Some(done) = current.take() {
                articles.push(done.finish());
            }

            current = Some(OpenArticle {
                id,
                heading,
                lines: if rest.is_empty() { vec![] } else { vec![rest] },
            });
        }

        if let Some(done) = current.take() {
            articles.push(done.finish());
        }
        if articles.is_empty() {
            return Err(ConsultorError::NoArticles(line_count));
        }

        tracing::debug!(articles = articles.len(), lines = line_count, "documento legal interpretado");
        Ok(Self { articles })
    }

    /// Converte a página HTML e interpreta o texto resultante.
    pub fn from_html(page: &str) -> Result<Self> {
        Self::parse(&html::to_text(page))
    }

    /// Decodifica o arquivo (ver [`html::decode_bytes`]) e escolhe entre HTML
    /// e texto puro pelo conteúdo.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = html::decode_bytes(bytes);
        if text.trim_start().starts_with('<') {
            Self::from_html(&text)
        } else {
            Self::parse(&text)
        }
    }

    pub fn articles(&self) -> &[ArticleEntry] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Sempre `false`: documentos vazios não podem ser construídos.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Primeiro artigo com o número informado ("121", "121-a" e "121-A" equivalem).
    pub fn article(&self, id: &str) -> Option<&ArticleEntry> {
        let wanted = id.trim();
        self.articles.iter().find(|a| a.id.eq_ignore_ascii_case(wanted))
    }
}

/// Artigo em construção durante o `parse`.
struct OpenArticle {
    id: String,
    heading: String,
    lines: Vec<String>,
}

impl OpenArticle {
    fn finish(self) -> ArticleEntry {
        ArticleEntry {
            id: self.id,
            heading: self.heading,
            body: self.lines.join("\n"),
        }
    }
}

/// Número do artigo e o texto que o segue na mesma linha.
fn article_start(line: &str) -> Option<(String, String)> {
    let caps = ARTICLE_LINE.captures(line)?;
    let id = match caps.get(2) {
        Some(suffix) => format!("{}-{}", &caps[1], suffix.as_str()),
        None => caps[1].to_string(),
    };
    let rest = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
    Some((id, rest.to_string()))
}

fn clean_line(raw: &str) -> String {
    let without_notes = ANNOTATION.replace_all(raw, "");
    without_notes
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Títulos, capítulos e nomes de divisões em caixa alta.
fn is_structural(line: &str) -> bool {
    let folded = fold(line);
    if STRUCTURAL_PREFIXES.iter().any(|p| folded.starts_with(p)) {
        return true;
    }
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
}

/// Linha curta, sem pontuação final, que não é parágrafo, inciso nem pena.
fn is_rubric(line: &str) -> bool {
    let Some(last) = line.chars().last() else {
        return false;
    };
    if matches!(last, '.' | ':' | ';' | ',') {
        return false;
    }
    let folded = fold(line);
    if folded.starts_with('§') || folded.starts_with("pena") || folded.starts_with("paragrafo") {
        return false;
    }
    if ITEM_LINE.is_match(line) {
        return false;
    }
    let words = line.split_whitespace().count();
    words <= MAX_RUBRIC_WORDS && line.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCERPT: &str = "\
CÓDIGO PENAL
Decreto-Lei nº 2.848, de 7 de dezembro de 1940
TÍTULO I
DOS CRIMES CONTRA A PESSOA
Homicídio simples
Art. 121. Matar alguém:
Pena - reclusão, de seis a vinte anos.
Caso de diminuição de pena
§ 1º Se o agente comete o crime impelido por motivo de relevante valor social ou moral, o juiz pode reduzir a pena de um sexto a um terço.
Induzimento, instigação ou auxílio a suicídio ou a automutilação
Art. 122. Induzir ou instigar alguém a suicidar-se ou a praticar automutilação: (Redação dada pela Lei nº 13.968, de 2019)
Pena - reclusão, de 6 (seis) meses a 2 (dois) anos.
Feminicídio
Art. 121-A. Matar mulher por razões da condição do sexo feminino:
Pena - reclusão, de 20 (vinte) a 40 (quarenta) anos.
";

    #[test]
    fn test_parse_articles_and_rubrics() {
        let doc = LegalDocument::parse(EXCERPT).unwrap();
        assert_eq!(doc.len(), 3);

        let a121 = &doc.articles()[0];
        assert_eq!(a121.id, "121");
        assert_eq!(a121.heading, "Homicídio simples");
        assert!(a121.body.starts_with("Matar alguém:\nPena - reclusão"));
        // Rubrica interna ("Caso de diminuição de pena") segue no corpo
        assert!(a121.body.contains("Caso de diminuição de pena"));
        // A rubrica do artigo seguinte não fica no corpo do anterior
        assert!(!a121.body.contains("Induzimento"));

        let a122 = &doc.articles()[1];
        assert_eq!(a122.heading, "Induzimento, instigação ou auxílio a suicídio ou a automutilação");
        assert!(!a122.body.contains("Redação dada"));
    }

    #[test]
    fn test_parse_suffixed_article_id() {
        let doc = LegalDocument::parse(EXCERPT).unwrap();
        let fem = doc.article("121-a").unwrap();
        assert_eq!(fem.id, "121-A");
        assert_eq!(fem.heading, "Feminicídio");
    }

    #[test]
    fn test_structural_lines_are_dropped() {
        let doc = LegalDocument::parse(EXCERPT).unwrap();
        assert!(doc.articles().iter().all(|a| !a.body.contains("DOS CRIMES")));
        assert!(doc.articles().iter().all(|a| a.heading != "DOS CRIMES CONTRA A PESSOA"));
    }

    #[test]
    fn test_ordinal_article_numbers() {
        let doc = LegalDocument::parse("Anterioridade da Lei\nArt. 1º - Não há crime sem lei anterior que o defina.\nArt. 2o Ninguém pode ser punido.").unwrap();
        assert_eq!(doc.articles()[0].id, "1");
        assert_eq!(doc.articles()[0].heading, "Anterioridade da Lei");
        assert_eq!(doc.articles()[0].body, "Não há crime sem lei anterior que o defina.");
        assert_eq!(doc.articles()[1].id, "2");
        assert_eq!(doc.articles()[1].heading, "");
    }

    #[test]
    fn test_text_without_articles_is_an_error() {
        let err = LegalDocument::parse("apenas um texto\nsem dispositivos").unwrap_err();
        assert!(matches!(err, ConsultorError::NoArticles(2)));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        assert!(matches!(LegalDocument::new(vec![]), Err(ConsultorError::EmptyDocument)));
    }

    #[test]
    fn test_from_html() {
        let page = "<p>Furto</p><p>Art. 155 - Subtrair, para si ou para outrem, coisa alheia m&oacute;vel:</p><p>Pena - reclus&atilde;o, de um a quatro anos, e multa.</p>";
        let doc = LegalDocument::from_html(page).unwrap();
        let furto = doc.article("155").unwrap();
        assert_eq!(furto.heading, "Furto");
        assert!(furto.body.contains("coisa alheia móvel"));
    }

    #[test]
    fn test_from_bytes_windows_1252_page() {
        let page = b"<p>Homic\xEDdio simples</p><p>Art. 121. Matar algu\xE9m:</p><p>Pena - reclus\xE3o, de seis a vinte anos.</p>";
        let doc = LegalDocument::from_bytes(page).unwrap();
        let a121 = doc.article("121").unwrap();
        assert_eq!(a121.heading, "Homicídio simples");
        assert!(a121.body.contains("reclusão"));
    }

    #[test]
    fn test_from_bytes_plain_text() {
        let doc = LegalDocument::from_bytes("Furto\nArt. 155 - Subtrair coisa alheia móvel:".as_bytes()).unwrap();
        assert_eq!(doc.article("155").unwrap().heading, "Furto");
    }
}
