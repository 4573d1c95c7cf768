//! # Pipeline de Etiquetagem — Orquestrador com Eventos Observáveis
//!
//! O pipeline conecta o tokenizador ao modelo treinado e emite eventos em
//! cada passo via um canal Rust (`mpsc`), permitindo que o servidor
//! WebSocket transmita o progresso em tempo real para o cliente: tokens
//! gerados, distribuição de emissão de cada palavra e a tag final atribuída
//! pelo algoritmo escolhido.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::corpus;
use crate::error::Result;
use crate::model::{log_floor, DecodingMethod, TaggerConfig, TrigramHmm};
use crate::tokenizer::{token_texts, tokenize, Token};

/// Um token com a tag atribuída e a confiança local da decisão.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    /// O token original, com offsets no texto.
    pub token: Token,
    /// A classe gramatical atribuída (ex: "NOUN").
    pub tag: String,
    /// Confiança local: probabilidade (softmax) do score da tag escolhida
    /// frente às alternativas naquela posição.
    pub confidence: f64,
}

/// Eventos emitidos pelo pipeline durante o processamento.
///
/// Permitem que a interface visualize o "raciocínio" do modelo
/// passo a passo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: Tokenização concluída.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: Distribuição de emissão calculada para um token.
    /// Mostra se a palavra é conhecida e as tags mais prováveis para ela.
    EmissionComputed {
        token_index: usize,
        token_text: String,
        known_word: bool,
        /// As 5 tags com maior probabilidade de emissão.
        top_tags: Vec<(String, f64)>,
    },
    /// **Passo 3**: Tag definitiva atribuída a um token pelo decodificador.
    TagAssigned {
        token_index: usize,
        token_text: String,
        tag: String,
        confidence: f64,
    },
    /// **Conclusão**: O processo terminou com sucesso.
    Done {
        tagged_tokens: Vec<TaggedToken>,
        method: DecodingMethod,
        total_tokens: usize,
        processing_ms: u64,
    },
}

/// O pipeline de etiquetagem principal.
///
/// # Modos de Uso
/// - **Sync**: método [`PosPipeline::analyze`] para scripts e chamadas
///   diretas.
/// - **Streaming**: método [`PosPipeline::analyze_streaming`] para UIs
///   reativas (via WebSocket).
pub struct PosPipeline {
    pub model: TrigramHmm,
}

impl PosPipeline {
    /// Cria o pipeline treinando o modelo sobre o corpus embutido com a
    /// configuração padrão.
    pub fn new() -> Result<Self> {
        Self::with_config(TaggerConfig::default())
    }

    /// Cria o pipeline treinando sobre o corpus embutido com a configuração
    /// dada.
    pub fn with_config(config: TaggerConfig) -> Result<Self> {
        let model = TrigramHmm::train(&corpus::training_pairs(), config)?;
        Ok(Self { model })
    }

    /// Embrulha um modelo já treinado pelo chamador.
    pub fn from_model(model: TrigramHmm) -> Self {
        Self { model }
    }

    /// Processa o texto de forma síncrona com Viterbi e retorna o resultado.
    pub fn analyze(&self, text: &str) -> Vec<TaggedToken> {
        self.analyze_with_method(text, DecodingMethod::Viterbi)
    }

    /// Processa o texto de forma síncrona com o método escolhido.
    pub fn analyze_with_method(&self, text: &str, method: DecodingMethod) -> Vec<TaggedToken> {
        let (tx, rx) = mpsc::channel();
        self.analyze_streaming(text, method, tx);

        let mut tagged = vec![];
        while let Ok(event) = rx.recv() {
            if let PipelineEvent::Done { tagged_tokens, .. } = event {
                tagged = tagged_tokens;
            }
        }
        tagged
    }

    /// Executa o pipeline enviando eventos de progresso em tempo real.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`: tokens gerados.
    /// 2. `EmissionComputed` (loop): emissão de cada token.
    /// 3. `TagAssigned` (loop): decisão final para cada token.
    /// 4. `Done`: resultado final consolidado.
    pub fn analyze_streaming(
        &self,
        text: &str,
        method: DecodingMethod,
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        let start = std::time::Instant::now();

        // === Passo 1: Tokenização ===
        let tokens = tokenize(text);
        let total = tokens.len();
        let _ = tx.send(PipelineEvent::TokenizationDone {
            tokens: tokens.clone(),
            total,
        });

        if tokens.is_empty() {
            let _ = tx.send(PipelineEvent::Done {
                tagged_tokens: vec![],
                method,
                total_tokens: 0,
                processing_ms: start.elapsed().as_millis() as u64,
            });
            return;
        }

        // === Passo 2: Emissões por token ===
        let words = token_texts(&tokens);
        for (i, word) in words.iter().enumerate() {
            let emission = self.model.emission_distribution(word);
            let mut top: Vec<(String, f64)> = self
                .model
                .tags()
                .iter()
                .zip(&emission)
                .map(|(tag, &p)| (tag.clone(), p))
                .collect();
            top.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            top.truncate(5);

            let _ = tx.send(PipelineEvent::EmissionComputed {
                token_index: i,
                token_text: word.clone(),
                known_word: self.model.is_known_word(word),
                top_tags: top,
            });
        }

        // === Passo 3: Decodificação e confiança local ===
        let predicted = self.model.inference(method, &words);
        let confidences = self.local_confidences(&words, &predicted);

        let tagged_tokens: Vec<TaggedToken> = tokens
            .iter()
            .zip(predicted.iter().zip(&confidences))
            .map(|(token, (tag, &confidence))| {
                let _ = tx.send(PipelineEvent::TagAssigned {
                    token_index: token.index,
                    token_text: token.text.clone(),
                    tag: tag.clone(),
                    confidence,
                });
                TaggedToken {
                    token: token.clone(),
                    tag: tag.clone(),
                    confidence,
                }
            })
            .collect();

        let _ = tx.send(PipelineEvent::Done {
            tagged_tokens,
            method,
            total_tokens: total,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }

    /// Confiança local por posição: softmax do score
    /// `log(transição | história predita) + log(emissão)` sobre todas as
    /// tags, avaliado na tag escolhida.
    fn local_confidences(&self, words: &[String], predicted: &[String]) -> Vec<f64> {
        let idxs: Vec<usize> = predicted
            .iter()
            .filter_map(|t| self.model.tags().iter().position(|m| m == t))
            .collect();

        words
            .iter()
            .enumerate()
            .map(|(t, word)| {
                let emission = self.model.emission_distribution(word);
                let scores: Vec<f64> = (0..self.model.n_tags())
                    .map(|v| {
                        self.model.transition_log_prob(&idxs[..t], v) + log_floor(emission[v])
                    })
                    .collect();
                softmax_at(&scores, idxs[t])
            })
            .collect()
    }
}

/// Probabilidade softmax do índice `at` em um vetor de log-scores.
fn softmax_at(scores: &[f64], at: usize) -> f64 {
    let max_score = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&s| (s - max_score).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 {
        return 1.0 / scores.len() as f64;
    }
    exps[at] / sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_basic() {
        let pipeline = PosPipeline::new().unwrap();
        let tagged = pipeline.analyze("O gato preto corre pelo jardim.");
        assert_eq!(tagged.len(), 7);
        assert_eq!(tagged[0].tag, "DET");
        assert_eq!(tagged[6].tag, "PUNCT");
        for tt in &tagged {
            assert!(tt.confidence > 0.0 && tt.confidence <= 1.0);
        }
    }

    #[test]
    fn test_pipeline_empty() {
        let pipeline = PosPipeline::new().unwrap();
        assert!(pipeline.analyze("").is_empty());
    }

    #[test]
    fn test_pipeline_events_streaming() {
        let pipeline = PosPipeline::new().unwrap();
        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming("A menina canta bem.", DecodingMethod::Viterbi, tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(!events.is_empty());
        assert!(
            matches!(&events[0], PipelineEvent::TokenizationDone { .. }),
            "primeiro evento deve ser TokenizationDone"
        );
        let last = events.last().unwrap();
        assert!(
            matches!(last, PipelineEvent::Done { .. }),
            "último evento deve ser Done"
        );
    }

    #[test]
    fn test_all_methods_produce_aligned_output() {
        let pipeline = PosPipeline::new().unwrap();
        for method in [
            DecodingMethod::Greedy,
            DecodingMethod::Beam,
            DecodingMethod::Viterbi,
        ] {
            let tagged = pipeline.analyze_with_method("O rio corta a cidade.", method);
            assert_eq!(tagged.len(), 6);
            // O ponto final é inequívoco sob qualquer decodificador
            assert_eq!(tagged[5].tag, "PUNCT");
        }
    }
}
