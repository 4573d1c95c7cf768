//! # Motor de Smoothing — De Contagens a Probabilidades
//!
//! Converte as tabelas de contagem brutas em tabelas de probabilidade
//! normalizadas, usando uma de três estratégias intercambiáveis:
//!
//! 1. **Aditiva (Laplace)**: `p = (c + k) / (total + k·V)`. Garante
//!    probabilidade estritamente positiva em toda parte.
//! 2. **Interpolação linear**: combinação convexa das estimativas de máxima
//!    verossimilhança da ordem atual e das ordens inferiores, com pesos fixos.
//!    Cada MLE leva um epsilon no numerador e no denominador para nunca
//!    dividir por zero — um estimador enviesado, porém sempre definido.
//! 3. **Good-Turing**: re-estima contagens pela frequência das frequências:
//!    `c* = (c+1)·N_{c+1}/N_c` para `c` abaixo da contagem máxima observada,
//!    com `N_0` = número de n-gramas possíveis nunca vistos. Contagens na
//!    máxima observada ficam intactas: não há `N_{c+1}` para extrapolar além
//!    dos dados.
//!
//! Política de borda comum: toda tabela finalizada é normalizada por linha;
//! linhas de massa zero viram distribuição uniforme, de modo que qualquer
//! log-probabilidade subsequente esteja sempre definida.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::counts::CountTables;
use crate::model::TaggerConfig;

/// Estratégia de smoothing, escolhida uma única vez no treino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingStrategy {
    /// Add-k (Laplace). `k` configurável para bigramas/trigramas.
    Additive,
    /// Interpolação linear entre as ordens de n-grama.
    Interpolation,
    /// Good-Turing por frequência das frequências.
    GoodTuring,
}

impl Default for SmoothingStrategy {
    fn default() -> Self {
        SmoothingStrategy::Additive
    }
}

/// Epsilon das MLEs interpoladas (numerador e denominador).
pub(crate) const EPSILON: f64 = 1e-8;

/// Probabilidades de unigrama P(tag).
///
/// Sob interpolação a ordem 1 não tem ordem inferior para recuar, então
/// recai em Laplace com `k = 1`.
pub fn unigram_probs(counts: &CountTables, config: &TaggerConfig) -> Vec<f64> {
    let n = counts.unigram.len();
    let total: u64 = counts.unigram.iter().sum();

    let mut probs: Vec<f64> = match config.smoothing {
        SmoothingStrategy::Additive | SmoothingStrategy::Interpolation => counts
            .unigram
            .iter()
            .map(|&c| (c as f64 + 1.0) / (total as f64 + n as f64))
            .collect(),
        SmoothingStrategy::GoodTuring => good_turing_adjust(&counts.unigram),
    };

    normalize_row(&mut probs);
    probs
}

/// Probabilidades de bigrama P(tag₂ | tag₁), linha-estocásticas.
pub fn bigram_probs(counts: &CountTables, config: &TaggerConfig) -> Vec<Vec<f64>> {
    let n = counts.unigram.len();

    let mut table: Vec<Vec<f64>> = match config.smoothing {
        SmoothingStrategy::Additive => {
            let k = config.additive_constant;
            counts
                .bigram
                .iter()
                .map(|row| {
                    let row_total: u64 = row.iter().sum();
                    row.iter()
                        .map(|&c| (c as f64 + k) / (row_total as f64 + k * n as f64))
                        .collect()
                })
                .collect()
        }
        SmoothingStrategy::Interpolation => {
            let [l1, l2] = config.bigram_lambdas;
            let total_uni: f64 = counts.unigram.iter().sum::<u64>() as f64;
            counts
                .bigram
                .iter()
                .map(|row| {
                    let row_total: f64 = row.iter().sum::<u64>() as f64;
                    row.iter()
                        .enumerate()
                        .map(|(j, &c)| {
                            let p_bigram = (c as f64 + EPSILON) / (row_total + EPSILON);
                            let p_unigram =
                                (counts.unigram[j] as f64 + EPSILON) / (total_uni + EPSILON);
                            l1 * p_bigram + l2 * p_unigram
                        })
                        .collect()
                })
                .collect()
        }
        SmoothingStrategy::GoodTuring => {
            let flat: Vec<u64> = counts.bigram.iter().flatten().copied().collect();
            let adjusted = good_turing_adjust(&flat);
            adjusted.chunks(n).map(|chunk| chunk.to_vec()).collect()
        }
    };

    for row in &mut table {
        normalize_row(row);
    }
    table
}

/// Probabilidades de trigrama P(tag₃ | tag₁, tag₂), linha-estocásticas no
/// último eixo.
pub fn trigram_probs(counts: &CountTables, config: &TaggerConfig) -> Vec<Vec<Vec<f64>>> {
    let n = counts.unigram.len();

    let mut table: Vec<Vec<Vec<f64>>> = match config.smoothing {
        SmoothingStrategy::Additive => {
            let k = config.additive_constant;
            counts
                .trigram
                .iter()
                .map(|plane| {
                    plane
                        .iter()
                        .map(|row| {
                            let row_total: u64 = row.iter().sum();
                            row.iter()
                                .map(|&c| (c as f64 + k) / (row_total as f64 + k * n as f64))
                                .collect()
                        })
                        .collect()
                })
                .collect()
        }
        SmoothingStrategy::Interpolation => {
            let [l1, l2, l3] = config.trigram_lambdas;
            let total_uni: f64 = counts.unigram.iter().sum::<u64>() as f64;
            counts
                .trigram
                .iter()
                .enumerate()
                .map(|(_i, plane)| {
                    plane
                        .iter()
                        .enumerate()
                        .map(|(j, row)| {
                            let row_total: f64 = row.iter().sum::<u64>() as f64;
                            let bigram_row_total: f64 =
                                counts.bigram[j].iter().sum::<u64>() as f64;
                            row.iter()
                                .enumerate()
                                .map(|(k_idx, &c)| {
                                    let p_trigram =
                                        (c as f64 + EPSILON) / (row_total + EPSILON);
                                    let p_bigram = (counts.bigram[j][k_idx] as f64 + EPSILON)
                                        / (bigram_row_total + EPSILON);
                                    let p_unigram = (counts.unigram[k_idx] as f64 + EPSILON)
                                        / (total_uni + EPSILON);
                                    l1 * p_trigram + l2 * p_bigram + l3 * p_unigram
                                })
                                .collect()
                        })
                        .collect()
                })
                .collect()
        }
        SmoothingStrategy::GoodTuring => {
            let flat: Vec<u64> = counts
                .trigram
                .iter()
                .flat_map(|plane| plane.iter().flatten())
                .copied()
                .collect();
            let adjusted = good_turing_adjust(&flat);
            adjusted
                .chunks(n * n)
                .map(|plane| plane.chunks(n).map(|row| row.to_vec()).collect())
                .collect()
        }
    };

    for plane in &mut table {
        for row in plane.iter_mut() {
            normalize_row(row);
        }
    }
    table
}

/// Probabilidades lexicais P(palavra | tag), linha-estocásticas por tag.
///
/// Sob interpolação a "ordem inferior" da emissão é a distribuição de
/// unigramas de *palavras* (frequência relativa no treino, incluindo as
/// palavras raras no denominador).
pub fn lexical_probs(counts: &CountTables, config: &TaggerConfig) -> Vec<Vec<f64>> {
    let n_words = counts.word_freq.len();

    let mut table: Vec<Vec<f64>> = match config.smoothing {
        SmoothingStrategy::Additive => counts
            .lexical
            .iter()
            .map(|row| {
                let row_total: u64 = row.iter().sum();
                row.iter()
                    .map(|&c| (c as f64 + 1.0) / (row_total as f64 + n_words as f64))
                    .collect()
            })
            .collect(),
        SmoothingStrategy::Interpolation => {
            let [l1, l2] = config.bigram_lambdas;
            let total = counts.total_tokens as f64;
            let word_uni: Vec<f64> = counts
                .word_freq
                .iter()
                .map(|&c| (c as f64 + EPSILON) / (total + EPSILON))
                .collect();
            counts
                .lexical
                .iter()
                .map(|row| {
                    let row_total: f64 = row.iter().sum::<u64>() as f64;
                    row.iter()
                        .enumerate()
                        .map(|(j, &c)| {
                            let p_emission = (c as f64 + EPSILON) / (row_total + EPSILON);
                            l1 * p_emission + l2 * word_uni[j]
                        })
                        .collect()
                })
                .collect()
        }
        SmoothingStrategy::GoodTuring => {
            let flat: Vec<u64> = counts.lexical.iter().flatten().copied().collect();
            let adjusted = good_turing_adjust(&flat);
            adjusted
                .chunks(n_words)
                .map(|chunk| chunk.to_vec())
                .collect()
        }
    };

    for row in &mut table {
        normalize_row(row);
    }
    table
}

/// Re-estimação Good-Turing de um tensor de contagens achatado.
///
/// `N_0` (n-gramas nunca vistos) é o tamanho da tabela menos o número de
/// entradas não-zero; a fórmula `c* = (c+1)·N_{c+1}/N_c` vale para
/// `c < máximo observado` com `N_c > 0` (senão `c* = 0`); contagens na máxima
/// observada ficam inalteradas.
pub fn good_turing_adjust(flat: &[u64]) -> Vec<f64> {
    let mut n_c: HashMap<u64, u64> = HashMap::new();
    for &c in flat {
        *n_c.entry(c).or_insert(0) += 1;
    }

    let max_count = flat.iter().copied().max().unwrap_or(0);
    let total_types = flat.iter().filter(|&&c| c > 0).count() as u64;
    let n_0 = flat.len() as u64 - total_types;
    n_c.insert(0, n_0); // número de n-gramas não vistos

    flat.iter()
        .map(|&c| {
            if c < max_count {
                let nc = n_c.get(&c).copied().unwrap_or(0);
                let nc1 = n_c.get(&(c + 1)).copied().unwrap_or(0);
                if nc > 0 {
                    ((c + 1) as f64 * nc1 as f64) / nc as f64
                } else {
                    0.0
                }
            } else {
                c as f64
            }
        })
        .collect()
}

/// Normaliza uma linha para somar 1; linhas de massa zero viram uniforme.
pub(crate) fn normalize_row(row: &mut [f64]) {
    let total: f64 = row.iter().sum();
    if total > 0.0 {
        for p in row.iter_mut() {
            *p /= total;
        }
    } else {
        let uniform = 1.0 / row.len() as f64;
        for p in row.iter_mut() {
            *p = uniform;
        }
    }
}
