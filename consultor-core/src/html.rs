//! # Conversão HTML → Texto
//!
//! As compilações oficiais do CP e do CPP são publicadas como HTML sem
//! estrutura estável e, nas versões antigas, em windows-1252. Este módulo
//! decodifica os bytes e reduz a página a texto puro, uma linha por bloco,
//! para que [`crate::document::LegalDocument::parse`] trabalhe apenas com
//! linhas e nunca com marcação.
//!
//! Dispositivos revogados aparecem riscados (`<strike>`) nas compilações e
//! são descartados junto com o conteúdo.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::bytes::Regex as BytesRegex;
use scraper::{ElementRef, Html, Node};

/// Subárvores descartadas por inteiro
const SKIPPED: &[&str] = &["head", "title", "script", "style", "noscript", "strike", "s", "del"];

/// Elementos que delimitam linhas
const BLOCKS: &[&str] = &[
    "p", "div", "tr", "li", "ul", "ol", "table", "blockquote", "center", "body", "h1", "h2",
    "h3", "h4", "h5", "h6",
];

/// Declaração de charset no início da página
static META_CHARSET: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r#"(?i-u)<meta[^>]*charset\s*=\s*["']?\s*([a-z0-9_.:\-]+)"#)
        .expect("padrão de charset válido")
});

/// Até onde procurar a declaração de charset
const SNIFF_LEN: usize = 2048;

/// Decodifica o conteúdo de um arquivo baixado.
///
/// Ordem: BOM, UTF-8 válido, charset declarado em `<meta>`, windows-1252.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (text, _, _) = encoding.decode(bytes);
        return text.into_owned();
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let declared = META_CHARSET
        .captures(head)
        .and_then(|caps| Encoding::for_label(&caps[1]));
    // Páginas que se dizem UTF-8 mas não são caem no padrão do Planalto
    let encoding = declared.filter(|e| *e != UTF_8).unwrap_or(WINDOWS_1252);

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = encoding.name(), "bytes inválidos substituídos na decodificação");
    }
    tracing::debug!(encoding = encoding.name(), "página decodificada");
    text.into_owned()
}

/// Converte uma página HTML em texto puro, uma linha por bloco.
pub fn to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            // Quebras de linha do código-fonte não são quebras de parágrafo
            Node::Text(text) => out.push_str(&text.replace(['\n', '\r'], " ")),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child.value().name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let block = BLOCKS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let html = "<html><head><title>CP</title></head><body>\n<p>Homic&iacute;dio simples</p>\n<p>Art. 121. Matar\nalgu&eacute;m:</p><p>Pena - reclus&atilde;o, de seis a vinte anos.</p></body></html>";
        let text = to_text(html);
        assert_eq!(
            text,
            "Homicídio simples\nArt. 121. Matar alguém:\nPena - reclusão, de seis a vinte anos."
        );
    }

    #[test]
    fn test_revoked_text_is_dropped() {
        let html = "<p><strike>Art. 240 - Cometer adult&eacute;rio:</strike></p><p>Art. 241 - Promover registro</p>";
        let text = to_text(html);
        assert!(!text.contains("240"));
        assert!(text.contains("Art. 241"));
    }

    #[test]
    fn test_entities_are_decoded_by_the_parser() {
        let text = to_text("<p>Art. 1&#186; &#xA7; 2&ordm; NA&Iuml;VE x&sup1; &acute;</p>");
        assert_eq!(text, "Art. 1º § 2º NAÏVE x¹ ´");
    }

    #[test]
    fn test_line_breaks_and_inline_tags() {
        let text = to_text("<p>Pena - <b>reclus&atilde;o</b>,<br>de um a&nbsp;quatro anos</p>");
        assert_eq!(text, "Pena - reclusão,\nde um a quatro anos");
    }

    #[test]
    fn test_scripts_and_comments_are_removed() {
        let html = "<script>var a = '<p>x</p>';</script><!-- Art. 1 --><div>Art. 2. Texto</div>";
        assert_eq!(to_text(html), "Art. 2. Texto");
    }

    #[test]
    fn test_decode_windows_1252_without_declaration() {
        let bytes = b"<p>Homic\xEDdio simples</p><p>Pena - reclus\xE3o</p>";
        assert_eq!(decode_bytes(bytes), "<p>Homicídio simples</p><p>Pena - reclusão</p>");
    }

    #[test]
    fn test_decode_honours_meta_charset() {
        // 0xA4 é "€" em ISO-8859-15 e "¤" em windows-1252
        let bytes = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=iso-8859-15\"></head><body>\xA4 multa</body></html>";
        assert!(decode_bytes(bytes).contains("€ multa"));
    }

    #[test]
    fn test_decode_keeps_valid_utf8() {
        let text = "<meta charset=\"windows-1252\"><p>Injúria</p>";
        assert_eq!(decode_bytes(text.as_bytes()), text);
    }

    #[test]
    fn test_decode_false_utf8_declaration_falls_back() {
        let bytes = b"<meta charset=\"utf-8\"><p>Les\xE3o corporal</p>";
        assert!(decode_bytes(bytes).contains("Lesão corporal"));
    }
}
