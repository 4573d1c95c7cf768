//! # Vocabulário — Índices Densos de Tags e Palavras
//!
//! Constrói as bijeções tag ↔ índice e palavra ↔ índice usadas pelas tabelas
//! de contagem e probabilidade. O conjunto de tags é exatamente o conjunto de
//! tags distintas observadas no treino (ordenado para determinismo). O
//! conjunto de palavras inclui apenas palavras com frequência de treino maior
//! ou igual ao limiar configurado; todas as demais são dobradas no símbolo
//! reservado [`UNK_WORD`] (índice 0) — elas ainda alimentam as estatísticas de
//! sufixo para palavras desconhecidas (veja [`crate::suffix`]).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggerError};

/// Símbolo reservado para palavras fora do vocabulário.
pub const UNK_WORD: &str = "<UNK>";

/// Bijeções tag ↔ índice denso `[0, n_tags)` e palavra ↔ índice denso
/// `[0, n_words)`, fixadas no treino e imutáveis depois.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    tag2idx: HashMap<String, usize>,
    idx2tag: Vec<String>,
    word2idx: HashMap<String, usize>,
    idx2word: Vec<String>,
}

impl Vocabulary {
    /// Constrói o vocabulário a partir dos pares (palavras, tags) de treino.
    ///
    /// Uma palavra entra no vocabulário sse sua frequência total de treino é
    /// `>= unknown_word_threshold`; `<UNK>` sempre ocupa o índice 0.
    ///
    /// # Erros
    /// [`TaggerError::EmptyCorpus`] se nenhuma tag for observada.
    pub fn build(
        data: &[(Vec<String>, Vec<String>)],
        unknown_word_threshold: u64,
    ) -> Result<Self> {
        let mut tag_set: HashSet<String> = HashSet::new();
        let mut word_counts: HashMap<&str, u64> = HashMap::new();

        for (words, tags) in data {
            for tag in tags {
                tag_set.insert(tag.clone());
            }
            for word in words {
                *word_counts.entry(word.as_str()).or_insert(0) += 1;
            }
        }

        if tag_set.is_empty() {
            return Err(TaggerError::EmptyCorpus);
        }
        let mut tag_set: Vec<String> = tag_set.into_iter().collect();
        tag_set.sort(); // garante ordem determinística

        let tag2idx = tag_set
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        // <UNK> primeiro; depois as palavras frequentes em ordem determinística
        let mut frequent: Vec<&str> = word_counts
            .iter()
            .filter(|(_, &c)| c >= unknown_word_threshold)
            .map(|(&w, _)| w)
            .collect();
        frequent.sort();

        let mut idx2word = vec![UNK_WORD.to_string()];
        idx2word.extend(frequent.iter().map(|w| w.to_string()));
        let word2idx = idx2word
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        Ok(Self {
            tag2idx,
            idx2tag: tag_set,
            word2idx,
            idx2word,
        })
    }

    /// Número de tags distintas.
    pub fn n_tags(&self) -> usize {
        self.idx2tag.len()
    }

    /// Tamanho do vocabulário de palavras (inclui `<UNK>`).
    pub fn n_words(&self) -> usize {
        self.idx2word.len()
    }

    /// Índice denso de uma tag, se conhecida.
    pub fn tag_index(&self, tag: &str) -> Option<usize> {
        self.tag2idx.get(tag).copied()
    }

    /// Nome da tag no índice dado.
    pub fn tag_name(&self, idx: usize) -> &str {
        &self.idx2tag[idx]
    }

    /// Todas as tags, em ordem de índice.
    pub fn tags(&self) -> &[String] {
        &self.idx2tag
    }

    /// Índice de uma palavra conhecida. `None` para palavras fora do
    /// vocabulário (o chamador decide entre `<UNK>` e o modelo de sufixos).
    pub fn word_index(&self, word: &str) -> Option<usize> {
        self.word2idx.get(word).copied()
    }

    /// A palavra pertence ao vocabulário conhecido?
    pub fn is_known(&self, word: &str) -> bool {
        self.word2idx.contains_key(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(words: &[&str], tags: &[&str]) -> (Vec<String>, Vec<String>) {
        (
            words.iter().map(|w| w.to_string()).collect(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_tags_are_sorted_and_dense() {
        let data = vec![sent(&["gato", "corre"], &["NOUN", "VERB"])];
        let vocab = Vocabulary::build(&data, 1).unwrap();

        assert_eq!(vocab.n_tags(), 2);
        assert_eq!(vocab.tag_name(0), "NOUN");
        assert_eq!(vocab.tag_name(1), "VERB");
        assert_eq!(vocab.tag_index("VERB"), Some(1));
        assert_eq!(vocab.tag_index("ADJ"), None);
    }

    #[test]
    fn test_threshold_folds_rare_words_into_unk() {
        let data = vec![
            sent(&["o", "gato", "corre"], &["DET", "NOUN", "VERB"]),
            sent(&["o", "cão", "late"], &["DET", "NOUN", "VERB"]),
        ];
        let vocab = Vocabulary::build(&data, 2).unwrap();

        // "o" aparece 2x (entra); "gato"/"cão" aparecem 1x (viram <UNK>)
        assert!(vocab.is_known("o"));
        assert!(!vocab.is_known("gato"));
        assert!(!vocab.is_known("cão"));
        assert_eq!(vocab.word_index(UNK_WORD), Some(0));
        assert_eq!(vocab.n_words(), 2); // <UNK> + "o"
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = Vocabulary::build(&[], 1).unwrap_err();
        assert!(matches!(err, TaggerError::EmptyCorpus));
    }
}
