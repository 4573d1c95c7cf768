//! # Algoritmo de Viterbi de Segunda Ordem — Decodificação Exata
//!
//! Em um HMM de trigramas a transição depende das **duas** tags anteriores,
//! então o estado da programação dinâmica é o **par ordenado** (tag anterior,
//! tag atual), não uma tag isolada.
//!
//! ## Algoritmo
//!
//! ```text
//! Trellis: pi[t][u][v] = melhor log-prob de uma sequência de t+1 tags
//!          terminando com a tag u na posição t-1 e a tag v na posição t
//!
//! Inicialização: pi[0][0][v] = log(unigrama[v]) + log(emissão(w_0)[v])
//!                (u fixo no dummy 0: não existe posição -1)
//!
//! Posição 1:     pi[1][u][v] = pi[0][0][u] + log(bigrama[u][v]) + log(emissão(w_1)[v])
//!
//! Posição t ≥ 2: pi[t][u][v] = max_w ( pi[t-1][w][u] + log(trigrama[w][u][v]) )
//!                              + log(emissão(w_t)[v])
//!
//! Backtracking: (u*, v*) = argmax pi[T-1][u][v]; as duas últimas tags são
//!               u* e v*; tag[t] = backptr[t+2][tag[t+1]][tag[t+2]]
//! ```
//!
//! ## Complexidade
//! `O(T × N³)` de tempo e `O(T × N²)` de espaço; o fator cúbico é o custo
//! dominante do sistema. Em troca, o resultado é **globalmente ótimo** sob o
//! modelo treinado: é a referência contra a qual o guloso e o feixe são
//! comparados.

use crate::model::{log_floor, TrigramHmm};

/// Decodifica a sequência de tags globalmente ótima sob o modelo.
///
/// Retorna índices de tags alinhados às palavras de entrada.
pub fn decode(model: &TrigramHmm, words: &[String]) -> Vec<usize> {
    let t_len = words.len();
    if t_len == 0 {
        return Vec::new();
    }
    let n = model.n_tags();

    // Emissões pré-calculadas: emissions[t][v]
    let emissions: Vec<Vec<f64>> = words
        .iter()
        .map(|w| model.emission_distribution(w))
        .collect();

    let mut pi = vec![vec![vec![f64::NEG_INFINITY; n]; n]; t_len];
    let mut backptr = vec![vec![vec![0usize; n]; n]; t_len];

    // Inicialização: primeiro índice preso no dummy 0
    for v in 0..n {
        pi[0][0][v] = log_floor(model.unigram[v]) + log_floor(emissions[0][v]);
    }

    if t_len == 1 {
        // Sequência de uma palavra: terminação direta sobre pi[0][0]
        let (best_v, _) = argmax(&pi[0][0]);
        return vec![best_v];
    }

    // Posição 1: bigrama a partir do prefixo de uma tag
    for u in 0..n {
        for v in 0..n {
            pi[1][u][v] =
                pi[0][0][u] + log_floor(model.bigram[u][v]) + log_floor(emissions[1][v]);
        }
    }

    // Posições t >= 2: recorrência cúbica sobre a tag w em t-2
    for t in 2..t_len {
        for u in 0..n {
            for v in 0..n {
                let mut best_score = f64::NEG_INFINITY;
                let mut best_w = 0;
                for w in 0..n {
                    let score = pi[t - 1][w][u] + log_floor(model.trigram[w][u][v]);
                    if score > best_score {
                        best_score = score;
                        best_w = w;
                    }
                }
                pi[t][u][v] = best_score + log_floor(emissions[t][v]);
                backptr[t][u][v] = best_w;
            }
        }
    }

    // Terminação: melhor par final (u*, v*)
    let mut best_u = 0;
    let mut best_v = 0;
    let mut best_score = f64::NEG_INFINITY;
    for u in 0..n {
        for v in 0..n {
            if pi[t_len - 1][u][v] > best_score {
                best_score = pi[t_len - 1][u][v];
                best_u = u;
                best_v = v;
            }
        }
    }

    // Backtracking a partir do par final
    let mut tags = vec![0usize; t_len];
    tags[t_len - 1] = best_v;
    tags[t_len - 2] = best_u;
    for t in (0..t_len - 2).rev() {
        tags[t] = backptr[t + 2][tags[t + 1]][tags[t + 2]];
    }
    tags
}

/// Retorna (índice, valor) do máximo em um slice.
fn argmax(scores: &[f64]) -> (usize, f64) {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, &v)| (i, v))
        .unwrap_or((0, f64::NEG_INFINITY))
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

    fn to_words(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn tag_names(model: &TrigramHmm, idxs: &[usize]) -> Vec<String> {
        idxs.iter().map(|&i| model.tags()[i].to_string()).collect()
    }

    #[test]
    fn test_two_tag_scenario() {
        // {N, V}, "dog runs" repetido 10 vezes, aditivo com k = 1:
        // a decodificação de ["dog", "runs"] tem que devolver ["N", "V"].
        let data: Vec<_> = (0..10)
            .map(|_| sent(&["dog", "runs"], &["N", "V"]))
            .collect();
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            additive_constant: 1.0,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        let idxs = decode(&model, &to_words(&["dog", "runs"]));
        assert_eq!(tag_names(&model, &idxs), vec!["N", "V"]);
    }

    #[test]
    fn test_single_word_sequence() {
        let data: Vec<_> = (0..5)
            .map(|_| sent(&["sim", "senhor"], &["ADV", "NOUN"]))
            .collect();
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        let idxs = decode(&model, &to_words(&["sim"]));
        assert_eq!(tag_names(&model, &idxs), vec!["ADV"]);
    }

    #[test]
    fn test_viterbi_is_globally_optimal() {
        // Corpus com ambiguidade real ("corre" aparece após substantivo e
        // como primeira palavra): o guloso e o feixe estreito podem se
        // comprometer cedo demais; o Viterbi nunca pontua pior.
        let data = vec![
            sent(&["o", "gato", "corre"], &["DET", "NOUN", "VERB"]),
            sent(&["o", "cão", "late"], &["DET", "NOUN", "VERB"]),
            sent(&["corre", "muito"], &["VERB", "ADV"]),
            sent(&["a", "corrida", "longa"], &["DET", "NOUN", "ADJ"]),
            sent(&["gato", "preto"], &["NOUN", "ADJ"]),
        ];
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        for words in [
            to_words(&["o", "gato", "corre", "muito"]),
            to_words(&["corre", "o", "cão"]),
            to_words(&["gato", "preto", "late"]),
            to_words(&["a", "palavra", "inédita"]),
        ] {
            let viterbi_tags = tag_names(&model, &decode(&model, &words));
            let viterbi_score = model
                .sequence_log_probability(&words, &viterbi_tags)
                .unwrap();

            let greedy_tags = tag_names(&model, &crate::greedy::decode(&model, &words));
            let greedy_score = model
                .sequence_log_probability(&words, &greedy_tags)
                .unwrap();
            assert!(viterbi_score >= greedy_score - 1e-9);

            for width in [1, 2, 3, 8] {
                let beam_tags =
                    tag_names(&model, &crate::beam::decode(&model, &words, width));
                let beam_score = model
                    .sequence_log_probability(&words, &beam_tags)
                    .unwrap();
                assert!(viterbi_score >= beam_score - 1e-9);
            }
        }
    }

    #[test]
    fn test_round_trip_on_single_pattern_corpus() {
        // Um único padrão de treino: decodificar as próprias palavras de
        // treino reproduz as tags originais com constante aditiva pequena
        // (aproximando máxima verossimilhança).
        let data: Vec<_> = (0..8)
            .map(|_| sent(&["ela", "canta", "bem"], &["PRON", "VERB", "ADV"]))
            .collect();
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            additive_constant: 1e-6,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        let idxs = decode(&model, &to_words(&["ela", "canta", "bem"]));
        assert_eq!(tag_names(&model, &idxs), vec!["PRON", "VERB", "ADV"]);
    }
}
