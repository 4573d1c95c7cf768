//! # Acumulador de Contagens
//!
//! Uma única passada sequencial pelo corpus de treino produz todas as
//! contagens brutas que o motor de smoothing consome:
//!
//! - **Unigramas/Bigramas/Trigramas de tags**: co-ocorrências de 1, 2 e 3
//!   tags consecutivas dentro de cada sentença.
//! - **Contagens lexicais**: co-ocorrências tag × palavra, apenas para
//!   palavras do vocabulário conhecido.
//! - **Contagens de sufixo**: co-ocorrências sufixo × tag, apenas para
//!   palavras abaixo do limiar de frequência (estilo TnT), sobre sufixos de
//!   comprimento `1..=max_suffix_len` em *caracteres*.
//!
//! Invariante: toda entrada é `>= 0` e a soma de cada tabela é igual ao
//! número de ocorrências observadas para aquela ordem de n-grama.

use std::collections::HashMap;

use crate::error::Result;
use crate::vocab::Vocabulary;

/// Tabelas de contagem brutas extraídas do corpus de treino.
#[derive(Debug, Clone)]
pub struct CountTables {
    /// Contagem de cada tag (comprimento `n_tags`).
    pub unigram: Vec<u64>,
    /// Contagem de pares de tags consecutivas (`n_tags × n_tags`).
    pub bigram: Vec<Vec<u64>>,
    /// Contagem de trios de tags consecutivas (`n_tags × n_tags × n_tags`).
    pub trigram: Vec<Vec<Vec<u64>>>,
    /// Contagem tag × palavra conhecida (`n_tags × n_words`).
    /// A coluna de `<UNK>` fica zerada: palavras raras alimentam apenas o
    /// modelo de sufixos.
    pub lexical: Vec<Vec<u64>>,
    /// Frequência de cada palavra conhecida (`n_words`; `<UNK>` fica em 0).
    pub word_freq: Vec<u64>,
    /// Total de ocorrências de palavras no treino, incluindo as raras.
    pub total_tokens: u64,
    /// Contagens sufixo → vetor de tags, só de palavras abaixo do limiar.
    pub suffix_tag: HashMap<String, Vec<u64>>,
}

impl CountTables {
    /// Acumula todas as contagens em uma passada pelo corpus.
    pub fn accumulate(
        data: &[(Vec<String>, Vec<String>)],
        vocab: &Vocabulary,
        max_suffix_len: usize,
    ) -> Result<Self> {
        let n_tags = vocab.n_tags();
        let n_words = vocab.n_words();

        let mut unigram = vec![0u64; n_tags];
        let mut bigram = vec![vec![0u64; n_tags]; n_tags];
        let mut trigram = vec![vec![vec![0u64; n_tags]; n_tags]; n_tags];
        let mut lexical = vec![vec![0u64; n_words]; n_tags];
        let mut word_freq = vec![0u64; n_words];
        let mut total_tokens = 0u64;
        let mut suffix_tag: HashMap<String, Vec<u64>> = HashMap::new();

        for (words, tags) in data {
            let idxs: Vec<usize> = tags
                .iter()
                .map(|t| {
                    vocab
                        .tag_index(t)
                        .ok_or_else(|| crate::error::TaggerError::UnknownTag(t.clone()))
                })
                .collect::<Result<_>>()?;

            for &i in &idxs {
                unigram[i] += 1;
            }
            for pair in idxs.windows(2) {
                bigram[pair[0]][pair[1]] += 1;
            }
            for trio in idxs.windows(3) {
                trigram[trio[0]][trio[1]][trio[2]] += 1;
            }

            for (word, &idx_tag) in words.iter().zip(&idxs) {
                total_tokens += 1;
                match vocab.word_index(word) {
                    Some(idx_word) => {
                        lexical[idx_tag][idx_word] += 1;
                        word_freq[idx_word] += 1;
                    }
                    None => {
                        // Palavra rara: coleta estatísticas de todos os
                        // sufixos de 1 até max_suffix_len caracteres.
                        for m in 1..=max_suffix_len {
                            if let Some(suffix) = char_suffix(word, m) {
                                suffix_tag
                                    .entry(suffix.to_string())
                                    .or_insert_with(|| vec![0u64; n_tags])[idx_tag] += 1;
                            }
                        }
                    }
                }
            }
        }

        Ok(Self {
            unigram,
            bigram,
            trigram,
            lexical,
            word_freq,
            total_tokens,
            suffix_tag,
        })
    }
}

/// Sufixo dos últimos `m` caracteres de `word`, ou `None` se a palavra for
/// mais curta que `m`. Opera sobre caracteres, não bytes.
pub(crate) fn char_suffix(word: &str, m: usize) -> Option<&str> {
    let n_chars = word.chars().count();
    if n_chars < m {
        return None;
    }
    let skip = n_chars - m;
    let start = word
        .char_indices()
        .nth(skip)
        .map(|(i, _)| i)
        .unwrap_or(0);
    Some(&word[start..])
}
