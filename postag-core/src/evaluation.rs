//! # Avaliação do Etiquetador
//!
//! Mede a qualidade de um modelo treinado sobre um conjunto de teste
//! anotado: acurácia por token, acurácia restrita a tokens desconhecidos
//! (fora do vocabulário de treino), acurácia por sentença inteira e a
//! log-probabilidade média das sequências preditas.
//!
//! Como o modelo treinado é imutável e a decodificação é uma leitura pura,
//! as sentenças são avaliadas em paralelo com `rayon` sem nenhuma
//! sincronização.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggerError};
use crate::model::{DecodingMethod, TrigramHmm};

/// Métricas agregadas de uma avaliação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Método de decodificação avaliado.
    pub method: DecodingMethod,
    /// Fração de tokens com a tag correta.
    pub token_accuracy: f64,
    /// Fração de tokens *desconhecidos* (fora do vocabulário) com a tag
    /// correta. Vale 1.0 quando o conjunto de teste não tem desconhecidos.
    pub unknown_token_accuracy: f64,
    /// Fração de sentenças etiquetadas inteiramente corretas.
    pub sentence_accuracy: f64,
    /// Média, por sentença, da log-probabilidade da sequência predita.
    pub mean_log_probability: f64,
    /// Total de tokens avaliados.
    pub total_tokens: usize,
    /// Total de tokens fora do vocabulário de treino.
    pub unknown_tokens: usize,
    /// Total de sentenças avaliadas.
    pub total_sentences: usize,
}

struct SentenceStats {
    correct: usize,
    tokens: usize,
    unknown_correct: usize,
    unknown: usize,
    exact: bool,
    log_prob: f64,
}

/// Avalia o modelo sobre pares (palavras, tags-ouro) com o método dado.
///
/// # Erros
/// [`TaggerError::LengthMismatch`] para sentenças de teste mal formadas.
pub fn evaluate(
    model: &TrigramHmm,
    data: &[(Vec<String>, Vec<String>)],
    method: DecodingMethod,
) -> Result<EvaluationReport> {
    let stats: Vec<SentenceStats> = data
        .par_iter()
        .map(|(words, gold)| -> Result<SentenceStats> {
            if words.len() != gold.len() {
                return Err(TaggerError::LengthMismatch {
                    words: words.len(),
                    tags: gold.len(),
                });
            }

            let predicted = model.inference(method, words);
            let mut correct = 0;
            let mut unknown = 0;
            let mut unknown_correct = 0;
            for ((word, gold_tag), pred_tag) in words.iter().zip(gold).zip(&predicted) {
                let hit = gold_tag == pred_tag;
                if hit {
                    correct += 1;
                }
                if !model.is_known_word(word) {
                    unknown += 1;
                    if hit {
                        unknown_correct += 1;
                    }
                }
            }
            // Tags preditas vêm do conjunto do modelo: o score nunca falha
            // por tag desconhecida.
            let log_prob = model.sequence_log_probability(words, &predicted)?;

            Ok(SentenceStats {
                correct,
                tokens: words.len(),
                unknown_correct,
                unknown,
                exact: correct == words.len(),
                log_prob,
            })
        })
        .collect::<Result<_>>()?;

    let total_tokens: usize = stats.iter().map(|s| s.tokens).sum();
    let total_correct: usize = stats.iter().map(|s| s.correct).sum();
    let unknown_tokens: usize = stats.iter().map(|s| s.unknown).sum();
    let unknown_correct: usize = stats.iter().map(|s| s.unknown_correct).sum();
    let exact_sentences = stats.iter().filter(|s| s.exact).count();
    let total_sentences = stats.len();

    let report = EvaluationReport {
        method,
        token_accuracy: ratio(total_correct, total_tokens),
        unknown_token_accuracy: if unknown_tokens > 0 {
            ratio(unknown_correct, unknown_tokens)
        } else {
            1.0
        },
        sentence_accuracy: ratio(exact_sentences, total_sentences),
        mean_log_probability: if total_sentences > 0 {
            stats.iter().map(|s| s.log_prob).sum::<f64>() / total_sentences as f64
        } else {
            0.0
        },
        total_tokens,
        unknown_tokens,
        total_sentences,
    };

    info!(
        "Avaliação ({:?}): {:.2}% tokens, {:.2}% desconhecidos, {:.2}% sentenças ({} sentenças, {} tokens)",
        method,
        report.token_accuracy * 100.0,
        report.unknown_token_accuracy * 100.0,
        report.sentence_accuracy * 100.0,
        total_sentences,
        total_tokens,
    );
    Ok(report)
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
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
    fn test_perfect_on_unambiguous_pattern() {
        let data: Vec<_> = (0..6)
            .map(|_| sent(&["o", "gato", "corre"], &["DET", "NOUN", "VERB"]))
            .collect();
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&data, config).unwrap();

        let report = evaluate(&model, &data, DecodingMethod::Viterbi).unwrap();
        assert!((report.token_accuracy - 1.0).abs() < 1e-12);
        assert!((report.sentence_accuracy - 1.0).abs() < 1e-12);
        assert_eq!(report.unknown_tokens, 0);
        assert!(report.mean_log_probability < 0.0);
        assert_eq!(report.total_tokens, 18);
    }

    #[test]
    fn test_unknown_tokens_are_counted_separately() {
        let train: Vec<_> = (0..4)
            .map(|_| sent(&["ele", "cantava", "bem"], &["PRON", "VERB", "ADV"]))
            .collect();
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&train, config).unwrap();

        // "pulava" está fora do vocabulário de treino
        let test = vec![sent(&["ele", "pulava", "bem"], &["PRON", "VERB", "ADV"])];
        let report = evaluate(&model, &test, DecodingMethod::Viterbi).unwrap();
        assert_eq!(report.unknown_tokens, 1);
        assert_eq!(report.total_tokens, 3);
    }

    #[test]
    fn test_malformed_test_sentence_is_rejected() {
        let train = vec![sent(&["oi"], &["INTJ"])];
        let config = TaggerConfig {
            unknown_word_threshold: 1,
            ..TaggerConfig::default()
        };
        let model = TrigramHmm::train(&train, config).unwrap();

        let bad = vec![sent(&["oi", "tudo"], &["INTJ"])];
        let err = evaluate(&model, &bad, DecodingMethod::Greedy).unwrap_err();
        assert!(matches!(err, TaggerError::LengthMismatch { .. }));
    }
}
