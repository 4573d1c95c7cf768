//! # Busca em Feixe (Beam Search)
//!
//! Mantém os `k` caminhos parciais de maior log-probabilidade em cada
//! posição. Na posição 0 pontua todos os caminhos de uma tag via unigrama;
//! nas seguintes expande cada sobrevivente por todas as tags, pontuando com
//! bigrama (posição 1) ou trigrama (posição ≥ 2) mais a emissão, e retém os
//! `k` melhores.
//!
//! Candidatos cuja transição ou emissão **bruta** é exatamente zero são
//! podados antes do piso numérico: transições genuinamente impossíveis não
//! ocupam lugar no feixe. Empates são resolvidos de forma determinística
//! pela ordem de inserção (ordenação estável).
//!
//! Se o feixe esvaziar (todos os candidatos podados), o fallback repete a
//! tag de maior probabilidade de unigrama pela sequência inteira.

use std::cmp::Ordering;

use crate::model::{log_floor, TrigramHmm};

/// Um caminho parcial de tags com seu score acumulado em log-space.
#[derive(Debug, Clone)]
struct Hypothesis {
    path: Vec<usize>,
    score: f64,
}

/// Decodifica uma sequência de palavras mantendo `width` hipóteses por
/// posição. Retorna índices de tags alinhados à entrada.
pub fn decode(model: &TrigramHmm, words: &[String], width: usize) -> Vec<usize> {
    let n_tags = model.n_tags();
    let mut beam = vec![Hypothesis {
        path: Vec::new(),
        score: 0.0,
    }];

    for word in words {
        let emission = model.emission_distribution(word);
        let mut candidates: Vec<Hypothesis> = Vec::with_capacity(beam.len() * n_tags);

        for hyp in &beam {
            for v in 0..n_tags {
                let transition = model.transition_prob(&hyp.path, v);
                // Poda em probabilidade bruta, antes do piso: zero real
                // significa transição/emissão impossível sob o modelo.
                if transition == 0.0 || emission[v] == 0.0 {
                    continue;
                }
                let mut path = hyp.path.clone();
                path.push(v);
                candidates.push(Hypothesis {
                    path,
                    score: hyp.score + log_floor(transition) + log_floor(emission[v]),
                });
            }
        }

        // sort_by é estável: empates preservam a ordem de inserção
        candidates.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
        });
        candidates.truncate(width);
        beam = candidates;

        if beam.is_empty() {
            break;
        }
    }

    match beam.into_iter().next() {
        Some(hyp) if hyp.path.len() == words.len() => hyp.path,
        _ => vec![argmax_unigram(model); words.len()],
    }
}

/// Índice da tag com maior probabilidade de unigrama.
fn argmax_unigram(model: &TrigramHmm) -> usize {
    model
        .unigram
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
