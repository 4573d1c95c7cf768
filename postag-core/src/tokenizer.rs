//! # Tokenizador para Português Brasileiro
//!
//! Divide o texto bruto em tokens (palavras, números, pontuação) preservando
//! a posição original de cada um (offset em bytes), para que a interface web
//! destaque os tokens no texto sem alterar a formatação.
//!
//! A segmentação segue as fronteiras de palavra do Unicode (UAX #29), que já
//! mantém juntos números com separadores ("1.234", "10,5") e palavras
//! acentuadas. Compostos hifenizados do português ("Covid-19", "bem-estar"),
//! que o padrão separa no hífen, são re-unidos em um pós-processamento.
//!
//! As APIs de decodificação do modelo continuam aceitando sequências já
//! tokenizadas; este módulo atende apenas o caminho de texto bruto do
//! pipeline.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
///
/// `start`/`end` são offsets de byte no texto de entrada (início inclusivo,
/// fim exclusivo), cruciais para o destaque na interface gráfica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// O texto do token (ex: "gato", ",", "1.234").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Forma de um composto hifenizado: segmentos de letras/dígitos unidos por
/// hífens ("Covid-19", "segunda-feira", "guarda-chuva").
fn compound_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{N}]+(?:-[\p{L}\p{N}]+)+$")
            .expect("padrão de composto hifenizado inválido")
    })
}

/// Tokeniza um texto preservando offsets.
pub fn tokenize(text: &str) -> Vec<Token> {
    let segments: Vec<(usize, &str)> = text
        .split_word_bound_indices()
        .filter(|(_, seg)| !seg.trim().is_empty())
        .collect();

    let mut tokens: Vec<Token> = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        let (start, seg) = segments[i];
        let mut end = start + seg.len();

        // Re-une compostos hifenizados: palavra "-" palavra, adjacentes em
        // bytes, enquanto o resultado mantiver a forma de composto.
        let mut j = i;
        while j + 2 < segments.len() {
            let (h_start, h_seg) = segments[j + 1];
            let (w_start, w_seg) = segments[j + 2];
            let adjacent = h_start == end && w_start == h_start + h_seg.len();
            if adjacent
                && h_seg == "-"
                && compound_pattern().is_match(&text[start..w_start + w_seg.len()])
            {
                end = w_start + w_seg.len();
                j += 2;
            } else {
                break;
            }
        }

        tokens.push(Token {
            text: text[start..end].to_string(),
            start,
            end,
            index: tokens.len(),
        });
        i = j + 1;
    }
    tokens
}

/// Apenas os textos dos tokens, na ordem — a forma que o modelo consome.
pub fn token_texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("O gato corre.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["O", "gato", "corre", "."]);
    }

    #[test]
    fn test_offsets_match_original_text() {
        let text = "A menina canta, não é?";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_numbers_with_separators_stay_joined() {
        let tokens = tokenize("O lucro foi de 1.234 reais e subiu 10,5%.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"1.234"));
        assert!(texts.contains(&"10,5"));
    }

    #[test]
    fn test_hyphenated_compounds_are_rejoined() {
        let tokens = tokenize("A Covid-19 mudou o bem-estar de segunda-feira.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"Covid-19"));
        assert!(texts.contains(&"bem-estar"));
        assert!(texts.contains(&"segunda-feira"));
    }

    #[test]
    fn test_indices_are_sequential() {
        let tokens = tokenize("um dois três");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index, i);
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
