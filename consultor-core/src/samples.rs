//! # Trechos do CP e do CPP para Demonstração
//!
//! Excertos no mesmo layout do texto consolidado publicado pelo Planalto
//! (uma linha por dispositivo, rubrica antes do artigo). Servem para testes e
//! como reserva offline quando as compilações completas não estão disponíveis.
//!
//! ## Artigos incluídos
//!
//! - **CP**: 121 (homicídio), 129 (lesão corporal), 140 (injúria),
//!   147 (ameaça), 155 (furto), 157 (roubo), 171 (estelionato),
//!   180 (receptação), 213 (estupro)
//! - **CPP**: 322 e 323 (fiança)

/// Excerto do Código Penal (Decreto-Lei nº 2.848/1940).
pub const SAMPLE_PENAL_CODE: &str = "\
CÓDIGO PENAL
PARTE ESPECIAL
TÍTULO I
DOS CRIMES CONTRA A PESSOA
CAPÍTULO I
DOS CRIMES CONTRA A VIDA
Homicídio simples
Art. 121. Matar alguém:
Pena - reclusão, de seis a vinte anos.
Caso de diminuição de pena
§ 1º Se o agente comete o crime impelido por motivo de relevante valor social ou moral, ou sob o domínio de violenta emoção, logo em seguida a injusta provocação da vítima, o juiz pode reduzir a pena de um sexto a um terço.
Homicídio qualificado
§ 2° Se o homicídio é cometido:
I - mediante paga ou promessa de recompensa, ou por outro motivo torpe;
II - por motivo futil;
Pena - reclusão, de doze a trinta anos.
Homicídio culposo
§ 3º Se o homicídio é culposo: (Vide Lei nº 4.611, de 1965)
Pena - detenção, de um a três anos.
CAPÍTULO II
DAS LESÕES CORPORAIS
Lesão corporal
Art. 129. Ofender a integridade corporal ou a saúde de outrem:
Pena - detenção, de três meses a um ano.
Lesão corporal de natureza grave
§ 1º Se resulta:
I - Incapacidade para as ocupações habituais, por mais de trinta dias;
Pena - reclusão, de um a cinco anos.
CAPÍTULO V
DOS CRIMES CONTRA A HONRA
Injúria
Art. 140 - Injuriar alguém, ofendendo-lhe a dignidade ou o decoro:
Pena - detenção, de um a seis meses, ou multa.
CAPÍTULO VI
DOS CRIMES CONTRA A LIBERDADE INDIVIDUAL
Ameaça
Art. 147 - Ameaçar alguém, por palavra, escrito ou gesto, ou qualquer outro meio simbólico, de causar-lhe mal injusto e grave:
Pena - detenção, de um a seis meses, ou multa.
TÍTULO II
DOS CRIMES CONTRA O PATRIMÔNIO
CAPÍTULO I
DO FURTO
Furto
Art. 155 - Subtrair, para si ou para outrem, coisa alheia móvel:
Pena - reclusão, de um a quatro anos, e multa.
§ 1º - A pena aumenta-se de um terço, se o crime é praticado durante o repouso noturno.
Furto qualificado
§ 4º - A pena é de reclusão de dois a oito anos, e multa, se o crime é cometido:
I - com destruição ou rompimento de obstáculo à subtração da coisa;
CAPÍTULO II
DO ROUBO E DA EXTORSÃO
Roubo
Art. 157 - Subtrair coisa móvel alheia, para si ou para outrem, mediante grave ameaça ou violência a pessoa, ou depois de havê-la, por qualquer meio, reduzido à impossibilidade de resistência:
Pena - reclusão, de quatro a dez anos, e multa.
CAPÍTULO VI
DO ESTELIONATO E OUTRAS FRAUDES
Estelionato
Art. 171 - Obter, para si ou para outrem, vantagem ilícita, em prejuízo alheio, induzindo ou mantendo alguém em erro, mediante artifício, ardil, ou qualquer outro meio fraudulento:
Pena - reclusão, de um a cinco anos, e multa.
CAPÍTULO VII
DA RECEPTAÇÃO
Receptação
Art. 180 - Adquirir, receber, transportar, conduzir ou ocultar, em proveito próprio ou alheio, coisa que sabe ser produto de crime, ou influir para que terceiro, de boa-fé, a adquira, receba ou oculte: (Redação dada pela Lei nº 9.426, de 1996)
Pena - reclusão, de um a quatro anos, e multa. (Redação dada pela Lei nº 9.426, de 1996)
TÍTULO VI
DOS CRIMES CONTRA A DIGNIDADE SEXUAL
Estupro
Art. 213. Constranger alguém, mediante violência ou grave ameaça, a ter conjunção carnal ou a praticar ou permitir que com ele se pratique outro ato libidinoso: (Redação dada pela Lei nº 12.015, de 2009)
Pena - reclusão, de 6 (seis) a 10 (dez) anos. (Redação dada pela Lei nº 12.015, de 2009)
";

/// Excerto do Código de Processo Penal (Decreto-Lei nº 3.689/1941).
pub const SAMPLE_PROCEDURE_CODE: &str = "\
CÓDIGO DE PROCESSO PENAL
CAPÍTULO VI
DA LIBERDADE PROVISÓRIA, COM OU SEM FIANÇA
Art. 322. A autoridade policial somente poderá conceder fiança nos casos de infração cuja pena privativa de liberdade máxima não seja superior a 4 (quatro) anos. (Redação dada pela Lei nº 12.403, de 2011).
Parágrafo único. Nos demais casos, a fiança será requerida ao juiz, que decidirá em 48 (quarenta e oito) horas. (Redação dada pela Lei nº 12.403, de 2011).
Art. 323. Não será concedida fiança: (Redação dada pela Lei nº 12.403, de 2011).
I - nos crimes de racismo;
II - nos crimes de tortura, tráfico ilícito de entorpecentes e drogas afins, terrorismo e nos definidos como crimes hediondos;
III - nos crimes cometidos por grupos armados, civis ou militares, contra a ordem constitucional e o Estado Democrático;
";

/// Consultas de demonstração para o comparador.
pub fn sample_queries() -> Vec<&'static str> {
    vec![
        "homicídio simples",
        "lesão corporal",
        "furto",
        "roubo",
        "estelionato",
        "receptação",
        "estupro",
        "ameaça",
        "injúria",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LegalDocument;

    #[test]
    fn test_sample_penal_code_parses() {
        let doc = LegalDocument::parse(SAMPLE_PENAL_CODE).unwrap();
        let ids: Vec<&str> = doc.articles().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["121", "129", "140", "147", "155", "157", "171", "180", "213"]);
        assert!(doc.articles().iter().all(|a| !a.heading.is_empty()));
    }

    #[test]
    fn test_sample_procedure_code_parses() {
        let doc = LegalDocument::parse(SAMPLE_PROCEDURE_CODE).unwrap();
        assert!(doc.article("322").is_some());
        assert!(doc.article("323").unwrap().body.contains("racismo"));
    }
}
