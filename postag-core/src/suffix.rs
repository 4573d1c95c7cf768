//! # Modelo de Sufixos para Palavras Desconhecidas
//!
//! Palavras fora do vocabulário não têm coluna na tabela lexical; em vez de
//! um chute uniforme cego, a distribuição de tags é estimada pelo sufixo da
//! palavra, no estilo TnT: sufixos são bons preditores de classe gramatical
//! em línguas com morfologia rica ("-ção" → substantivo, "-ava" → verbo,
//! "-mente" → advérbio).
//!
//! As estatísticas vêm exclusivamente das palavras *raras* do treino (abaixo
//! do limiar de frequência), que são as melhores aproximações de palavras
//! nunca vistas. Na consulta vale o sufixo mais longo presente na tabela;
//! sem nenhum sufixo conhecido, recua-se à distribuição uniforme.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::counts::{char_suffix, CountTables};
use crate::smoothing::normalize_row;

/// Distribuições P(tag | sufixo), congeladas no treino.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixModel {
    /// Sufixo → distribuição sobre tags (normalizada).
    probs: HashMap<String, Vec<f64>>,
    /// Fallback quando nenhum sufixo da palavra é conhecido.
    uniform: Vec<f64>,
    /// Comprimento máximo de sufixo considerado, em caracteres.
    max_len: usize,
}

impl SuffixModel {
    /// Constrói o modelo a partir das contagens sufixo × tag acumuladas
    /// sobre as palavras raras do treino.
    pub fn from_counts(counts: &CountTables, n_tags: usize, max_len: usize) -> Self {
        let mut probs: HashMap<String, Vec<f64>> =
            HashMap::with_capacity(counts.suffix_tag.len());
        for (suffix, tag_counts) in &counts.suffix_tag {
            let mut row: Vec<f64> = tag_counts.iter().map(|&c| c as f64).collect();
            normalize_row(&mut row);
            probs.insert(suffix.clone(), row);
        }

        let uniform = vec![1.0 / n_tags as f64; n_tags];
        Self {
            probs,
            uniform,
            max_len,
        }
    }

    /// Distribuição de tags para uma palavra desconhecida: vale o sufixo
    /// mais longo com estatísticas; sem nenhum, a uniforme.
    pub fn distribution(&self, word: &str) -> &[f64] {
        for m in (1..=self.max_len).rev() {
            if let Some(suffix) = char_suffix(word, m) {
                if let Some(row) = self.probs.get(suffix) {
                    return row;
                }
            }
        }
        &self.uniform
    }

    /// Número de sufixos distintos com estatísticas.
    pub fn n_suffixes(&self) -> usize {
        self.probs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Vocabulary;

    fn sent(words: &[&str], tags: &[&str]) -> (Vec<String>, Vec<String>) {
        (
            words.iter().map(|w| w.to_string()).collect(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn trained_model() -> (SuffixModel, Vocabulary) {
        let data = vec![
            sent(&["ele", "cantava"], &["PRON", "VERB"]),
            sent(&["ele", "pulava"], &["PRON", "VERB"]),
            sent(&["ele", "falava"], &["PRON", "VERB"]),
            sent(&["ele", "viu", "nação"], &["PRON", "VERB", "NOUN"]),
            sent(&["ele", "viu", "canção"], &["PRON", "VERB", "NOUN"]),
        ];
        // limiar 2: "ele" e "viu" entram; o resto alimenta os sufixos
        let vocab = Vocabulary::build(&data, 2).unwrap();
        let counts = CountTables::accumulate(&data, &vocab, 3).unwrap();
        let model = SuffixModel::from_counts(&counts, vocab.n_tags(), 3);
        (model, vocab)
    }

    #[test]
    fn test_longest_known_suffix_wins() {
        let (model, vocab) = trained_model();
        let idx_verb = vocab.tag_index("VERB").unwrap();
        let idx_noun = vocab.tag_index("NOUN").unwrap();

        // "ava" só ocorreu em verbos; "ção" só em substantivos
        let dist = model.distribution("gritava");
        assert!((dist[idx_verb] - 1.0).abs() < 1e-12);

        let dist = model.distribution("emoção");
        assert!((dist[idx_noun] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_suffix_falls_back_to_uniform() {
        let (model, vocab) = trained_model();
        let n = vocab.n_tags();
        let dist = model.distribution("xyz");
        for &p in dist {
            assert!((p - 1.0 / n as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_distributions_are_normalized() {
        let (model, _) = trained_model();
        for word in ["gritava", "emoção", "xyz", "pão"] {
            let total: f64 = model.distribution(word).iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
