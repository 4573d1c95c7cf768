//! # Modelo HMM de Trigramas para POS Tagging
//!
//! O modelo de segunda ordem estende o HMM clássico condicionando cada tag às
//! **duas** tags anteriores:
//!
//! $$ P(y_t | y_{t-2}, y_{t-1}) $$
//!
//! O modelo aprende, no treino:
//! 1. Probabilidades de transição de unigrama, bigrama e trigrama de tags,
//!    suavizadas pela estratégia configurada (veja [`crate::smoothing`]).
//! 2. Probabilidades lexicais P(palavra | tag) para palavras do vocabulário.
//! 3. Um modelo de sufixos para palavras desconhecidas
//!    (veja [`crate::suffix`]).
//!
//! # Armazenamento
//! As tabelas guardam probabilidades lineares; a conversão para log-space
//! acontece na leitura, com piso numérico [`MIN_PROB`] antes do logaritmo,
//! de modo que transições nunca vistas degradem para um score muito negativo
//! em vez de `-inf` indefinido.
//!
//! Depois do treino o modelo é imutável: decodificação e pontuação são
//! leituras puras, então sentenças independentes podem ser processadas em
//! paralelo sem sincronização.

use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::counts::CountTables;
use crate::error::{Result, TaggerError};
use crate::smoothing::{self, SmoothingStrategy};
use crate::suffix::SuffixModel;
use crate::vocab::Vocabulary;
use crate::{beam, greedy, viterbi};

/// Piso aplicado a toda probabilidade antes do logaritmo.
pub const MIN_PROB: f64 = 1e-10;

/// Log-probabilidade com piso: `ln(max(p, MIN_PROB))`.
pub(crate) fn log_floor(p: f64) -> f64 {
    p.max(MIN_PROB).ln()
}

/// Hiperparâmetros do treino e da decodificação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Estratégia de smoothing das tabelas de probabilidade.
    pub smoothing: SmoothingStrategy,
    /// Frequência mínima de treino para uma palavra entrar no vocabulário.
    pub unknown_word_threshold: u64,
    /// Comprimento máximo de sufixo (em caracteres) do modelo de
    /// palavras desconhecidas.
    pub max_suffix_len: usize,
    /// Constante `k` do smoothing aditivo para bigramas e trigramas
    /// (unigramas e emissões usam sempre `k = 1`).
    pub additive_constant: f64,
    /// Pesos λ da interpolação de trigramas (trigrama, bigrama, unigrama).
    pub trigram_lambdas: [f64; 3],
    /// Pesos λ da interpolação de bigramas (bigrama, unigrama); também
    /// usados na interpolação das emissões.
    pub bigram_lambdas: [f64; 2],
    /// Número de hipóteses parciais mantidas pela busca em feixe.
    pub beam_width: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingStrategy::Additive,
            unknown_word_threshold: 2,
            max_suffix_len: 4,
            additive_constant: 1.0,
            trigram_lambdas: [0.8, 0.1, 0.1],
            bigram_lambdas: [0.9, 0.1],
            beam_width: 5,
        }
    }
}

impl TaggerConfig {
    /// Valida os hiperparâmetros uma única vez, antes do treino.
    pub fn validate(&self) -> Result<()> {
        if self.additive_constant <= 0.0 {
            return Err(TaggerError::InvalidConfig(format!(
                "additive_constant deve ser > 0, recebido {}",
                self.additive_constant
            )));
        }
        if self.max_suffix_len == 0 {
            return Err(TaggerError::InvalidConfig(
                "max_suffix_len deve ser >= 1".to_string(),
            ));
        }
        if self.beam_width == 0 {
            return Err(TaggerError::InvalidConfig(
                "beam_width deve ser >= 1".to_string(),
            ));
        }
        let tri_sum: f64 = self.trigram_lambdas.iter().sum();
        if self.trigram_lambdas.iter().any(|&l| l < 0.0) || (tri_sum - 1.0).abs() > 1e-6 {
            return Err(TaggerError::InvalidConfig(format!(
                "trigram_lambdas devem ser não-negativos e somar 1, recebido {:?}",
                self.trigram_lambdas
            )));
        }
        let bi_sum: f64 = self.bigram_lambdas.iter().sum();
        if self.bigram_lambdas.iter().any(|&l| l < 0.0) || (bi_sum - 1.0).abs() > 1e-6 {
            return Err(TaggerError::InvalidConfig(format!(
                "bigram_lambdas devem ser não-negativos e somar 1, recebido {:?}",
                self.bigram_lambdas
            )));
        }
        Ok(())
    }
}

/// Algoritmo de decodificação, selecionado por chamada de inferência.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodingMethod {
    /// Argmax local, sem retrocesso. O(T·N).
    Greedy,
    /// Busca em feixe com largura configurável. O(T·k·N).
    Beam,
    /// Programação dinâmica exata sobre pares de tags. O(T·N³).
    Viterbi,
}

impl FromStr for DecodingMethod {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greedy" => Ok(DecodingMethod::Greedy),
            "beam" => Ok(DecodingMethod::Beam),
            "viterbi" => Ok(DecodingMethod::Viterbi),
            other => Err(TaggerError::InvalidMethod(other.to_string())),
        }
    }
}

/// Modelo HMM de trigramas treinado. Imutável após o treino.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrigramHmm {
    pub(crate) vocab: Vocabulary,
    pub(crate) config: TaggerConfig,
    /// P(tag), comprimento `n_tags`.
    pub(crate) unigram: Vec<f64>,
    /// P(tag₂ | tag₁), `n_tags × n_tags`.
    pub(crate) bigram: Vec<Vec<f64>>,
    /// P(tag₃ | tag₁, tag₂), `n_tags × n_tags × n_tags`.
    pub(crate) trigram: Vec<Vec<Vec<f64>>>,
    /// P(palavra | tag), `n_tags × n_words`.
    pub(crate) lexical: Vec<Vec<f64>>,
    /// Modelo de sufixos para palavras desconhecidas.
    pub(crate) suffix: SuffixModel,
}

impl TrigramHmm {
    /// Treina o modelo a partir de pares (palavras, tags).
    ///
    /// # Processo
    /// 1. Valida a configuração e o formato dos dados.
    /// 2. Constrói o vocabulário de tags e palavras frequentes.
    /// 3. Acumula contagens de n-gramas, emissões e sufixos em uma passada.
    /// 4. Converte contagens em probabilidades pela estratégia configurada.
    ///
    /// # Erros
    /// [`TaggerError::InvalidConfig`] para hiperparâmetros fora do domínio,
    /// [`TaggerError::LengthMismatch`] para sentenças mal formadas e
    /// [`TaggerError::EmptyCorpus`] para treino sem nenhuma tag.
    pub fn train(data: &[(Vec<String>, Vec<String>)], config: TaggerConfig) -> Result<Self> {
        config.validate()?;
        for (words, tags) in data {
            if words.len() != tags.len() {
                return Err(TaggerError::LengthMismatch {
                    words: words.len(),
                    tags: tags.len(),
                });
            }
        }

        let vocab = Vocabulary::build(data, config.unknown_word_threshold)?;
        let counts = CountTables::accumulate(data, &vocab, config.max_suffix_len)?;

        let unigram = smoothing::unigram_probs(&counts, &config);
        let bigram = smoothing::bigram_probs(&counts, &config);
        let trigram = smoothing::trigram_probs(&counts, &config);
        let lexical = smoothing::lexical_probs(&counts, &config);
        let suffix = SuffixModel::from_counts(&counts, vocab.n_tags(), config.max_suffix_len);

        info!(
            "Modelo treinado: {} tags, {} palavras, {} sufixos, smoothing {:?}",
            vocab.n_tags(),
            vocab.n_words(),
            suffix.n_suffixes(),
            config.smoothing
        );

        Ok(Self {
            vocab,
            config,
            unigram,
            bigram,
            trigram,
            lexical,
            suffix,
        })
    }

    /// Número de tags do modelo.
    pub fn n_tags(&self) -> usize {
        self.vocab.n_tags()
    }

    /// Todas as tags, em ordem de índice.
    pub fn tags(&self) -> &[String] {
        self.vocab.tags()
    }

    /// Configuração usada no treino.
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    /// A palavra pertence ao vocabulário aprendido no treino?
    pub fn is_known_word(&self, word: &str) -> bool {
        self.vocab.is_known(word)
    }

    /// Distribuição de emissão da palavra sobre as tags.
    ///
    /// Palavra conhecida: a coluna dela na tabela lexical (P(palavra | tag)
    /// por tag). Palavra desconhecida: o modelo de sufixos, com recuo à
    /// distribuição uniforme.
    pub fn emission_distribution(&self, word: &str) -> Vec<f64> {
        match self.vocab.word_index(word) {
            Some(idx) => self.lexical.iter().map(|row| row[idx]).collect(),
            None => self.suffix.distribution(word).to_vec(),
        }
    }

    /// Probabilidade linear da tag na posição `t` dada a história `history`
    /// (índices das tags já atribuídas até `t - 1`): unigrama em `t = 0`,
    /// bigrama em `t = 1`, trigrama daí em diante. A busca em feixe lê a
    /// versão linear para podar candidatos de probabilidade exatamente zero
    /// antes do piso numérico.
    pub(crate) fn transition_prob(&self, history: &[usize], tag: usize) -> f64 {
        match history.len() {
            0 => self.unigram[tag],
            1 => self.bigram[history[0]][tag],
            t => self.trigram[history[t - 2]][history[t - 1]][tag],
        }
    }

    /// Versão em log-space de [`Self::transition_prob`], com piso.
    pub(crate) fn transition_log_prob(&self, history: &[usize], tag: usize) -> f64 {
        log_floor(self.transition_prob(history, tag))
    }

    /// Log-probabilidade conjunta de uma sentença etiquetada sob o modelo:
    /// soma, por posição, da log-emissão da palavra sob a tag alinhada mais
    /// a log-transição dada a história.
    ///
    /// # Erros
    /// [`TaggerError::LengthMismatch`] se as sequências diferem em tamanho;
    /// [`TaggerError::UnknownTag`] para tags fora do conjunto treinado.
    pub fn sequence_log_probability(&self, words: &[String], tags: &[String]) -> Result<f64> {
        if words.len() != tags.len() {
            return Err(TaggerError::LengthMismatch {
                words: words.len(),
                tags: tags.len(),
            });
        }

        let idxs: Vec<usize> = tags
            .iter()
            .map(|t| {
                self.vocab
                    .tag_index(t)
                    .ok_or_else(|| TaggerError::UnknownTag(t.clone()))
            })
            .collect::<Result<_>>()?;

        let mut total = 0.0;
        for (t, word) in words.iter().enumerate() {
            let emission = self.emission_distribution(word);
            total += self.transition_log_prob(&idxs[..t], idxs[t]);
            total += log_floor(emission[idxs[t]]);
        }
        Ok(total)
    }

    /// Decodifica uma sequência de palavras com o algoritmo escolhido.
    ///
    /// Retorna uma sequência de tags do mesmo comprimento da entrada
    /// (vazia para entrada vazia).
    pub fn inference(&self, method: DecodingMethod, words: &[String]) -> Vec<String> {
        if words.is_empty() {
            return Vec::new();
        }
        let idxs = match method {
            DecodingMethod::Greedy => greedy::decode(self, words),
            DecodingMethod::Beam => beam::decode(self, words, self.config.beam_width),
            DecodingMethod::Viterbi => viterbi::decode(self, words),
        };
        idxs.iter()
            .map(|&i| self.vocab.tag_name(i).to_string())
            .collect()
    }

    /// Serializa o modelo treinado como JSON (a persistência em disco fica
    /// a cargo do chamador).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reconstrói um modelo a partir do JSON de [`Self::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
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

    fn training_data() -> Vec<(Vec<String>, Vec<String>)> {
        vec![
            sent(&["o", "gato", "corre"], &["DET", "NOUN", "VERB"]),
            sent(&["o", "cão", "late"], &["DET", "NOUN", "VERB"]),
            sent(
                &["a", "menina", "canta", "bem"],
                &["DET", "NOUN", "VERB", "ADV"],
            ),
        ]
    }

    #[test]
    fn test_invalid_method_string_is_rejected() {
        let err = "fancy".parse::<DecodingMethod>().unwrap_err();
        assert!(matches!(err, TaggerError::InvalidMethod(m) if m == "fancy"));
        assert_eq!(
            "viterbi".parse::<DecodingMethod>().unwrap(),
            DecodingMethod::Viterbi
        );
    }

    #[test]
    fn test_invalid_config_is_rejected_before_training() {
        let config = TaggerConfig {
            additive_constant: 0.0,
            ..TaggerConfig::default()
        };
        let err = TrigramHmm::train(&training_data(), config).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidConfig(_)));

        let config = TaggerConfig {
            trigram_lambdas: [0.5, 0.5, 0.5],
            ..TaggerConfig::default()
        };
        let err = TrigramHmm::train(&training_data(), config).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidConfig(_)));
    }

    #[test]
    fn test_mismatched_sentence_is_rejected() {
        let data = vec![sent(&["o", "gato"], &["DET"])];
        let err = TrigramHmm::train(&data, TaggerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TaggerError::LengthMismatch { words: 2, tags: 1 }
        ));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = TrigramHmm::train(&[], TaggerConfig::default()).unwrap_err();
        assert!(matches!(err, TaggerError::EmptyCorpus));
    }

    #[test]
    fn test_score_rejects_length_mismatch_and_unknown_tag() {
        let model = TrigramHmm::train(&training_data(), TaggerConfig::default()).unwrap();

        let words = vec!["o".to_string(), "gato".to_string()];
        let err = model
            .sequence_log_probability(&words, &["DET".to_string()])
            .unwrap_err();
        assert!(matches!(err, TaggerError::LengthMismatch { .. }));

        let err = model
            .sequence_log_probability(&words, &["DET".to_string(), "XYZ".to_string()])
            .unwrap_err();
        assert!(matches!(err, TaggerError::UnknownTag(t) if t == "XYZ"));
    }

    #[test]
    fn test_inference_preserves_length_and_tag_set() {
        let model = TrigramHmm::train(&training_data(), TaggerConfig::default()).unwrap();
        let words: Vec<String> = ["o", "peixe", "nada"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for method in [
            DecodingMethod::Greedy,
            DecodingMethod::Beam,
            DecodingMethod::Viterbi,
        ] {
            let tags = model.inference(method, &words);
            assert_eq!(tags.len(), words.len());
            for tag in &tags {
                assert!(model.tags().contains(tag));
            }
        }
        assert!(model.inference(DecodingMethod::Viterbi, &[]).is_empty());
    }

    #[test]
    fn test_json_round_trip_preserves_decoding() {
        let model = TrigramHmm::train(&training_data(), TaggerConfig::default()).unwrap();
        let json = model.to_json().unwrap();
        let restored = TrigramHmm::from_json(&json).unwrap();

        let words: Vec<String> = ["a", "menina", "corre"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            model.inference(DecodingMethod::Viterbi, &words),
            restored.inference(DecodingMethod::Viterbi, &words)
        );
    }

    #[test]
    fn test_score_is_finite_and_negative() {
        let model = TrigramHmm::train(&training_data(), TaggerConfig::default()).unwrap();
        let (words, tags) = sent(&["o", "gato", "corre"], &["DET", "NOUN", "VERB"]);
        let score = model.sequence_log_probability(&words, &tags).unwrap();
        assert!(score.is_finite());
        assert!(score < 0.0);
    }
}
