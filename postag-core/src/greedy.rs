//! # Decodificador Guloso
//!
//! Em cada posição escolhe a tag que maximiza
//! `log(transição | história) + log(emissão)`, dadas apenas as tags já
//! comprometidas para as uma ou duas posições anteriores. Sem retrocesso nem
//! revisão: `O(T × N)` de tempo, memória extra constante além da saída.
//!
//! Não é globalmente ótimo — serve como baseline rápido e como teste de
//! estresse da política numérica compartilhada (piso + log-space).

use crate::model::{log_floor, TrigramHmm};

/// Decodifica uma sequência de palavras com argmax local por posição.
///
/// Retorna índices de tags alinhados às palavras de entrada.
pub fn decode(model: &TrigramHmm, words: &[String]) -> Vec<usize> {
    let n_tags = model.n_tags();
    let mut tags: Vec<usize> = Vec::with_capacity(words.len());

    for word in words {
        let emission = model.emission_distribution(word);
        let mut best_tag = 0;
        let mut best_score = f64::NEG_INFINITY;

        for v in 0..n_tags {
            let score = model.transition_log_prob(&tags, v) + log_floor(emission[v]);
            if score > best_score {
                best_score = score;
                best_tag = v;
            }
        }
        tags.push(best_tag);
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaggerConfig;

    fn sent(words: &[&str], tags: &[&str]) -> (Vec<String>, Vec<String>) {
        (
            words.iter().map(|w| w.to_string()).collect(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_greedy_reproduces_unambiguous_training_pattern() {
        let data: Vec<_> = (0..5)
            .map(|_| sent(&["o", "gato", "corre"], &["DET", "NOUN", "VERB"]))
            .collect();
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        let words: Vec<String> = ["o", "gato", "corre"].iter().map(|s| s.to_string()).collect();
        let idxs = decode(&model, &words);
        let tags: Vec<&str> = idxs.iter().map(|&i| model.tags()[i].as_str()).collect();
        assert_eq!(tags, vec!["DET", "NOUN", "VERB"]);
    }

    #[test]
    fn test_greedy_output_is_aligned() {
        let data = vec![sent(&["ele", "fala"], &["PRON", "VERB"])];
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        let words: Vec<String> = ["ele", "fala", "muito", "hoje"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(decode(&model, &words).len(), 4);
    }
}
