//! # Erros do Etiquetador
//!
//! Taxonomia de erros do núcleo:
//! - **Configuração**: estratégia de smoothing ou método de decodificação
//!   desconhecidos, parâmetros inválidos — fatais, sem resultado parcial.
//! - **Formato dos dados**: sequências de palavras e tags com tamanhos
//!   diferentes passadas ao treino ou ao cálculo de probabilidade.
//!
//! Condições degeneradas do modelo (linhas de probabilidade zeradas, beam
//! vazio) **não** são erros: são reparadas localmente com fallbacks uniformes,
//! pois o modelo deve operar de forma robusta para qualquer conjunto de tags.

use thiserror::Error;

/// Alias de `Result` usado em todo o crate.
pub type Result<T> = std::result::Result<T, TaggerError>;

/// Erros produzidos pelo núcleo do etiquetador.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// Corpus de treino sem nenhuma sentença ou sem nenhuma tag observada.
    /// Treinar com corpus vazio é erro de configuração e é rejeitado antes
    /// de qualquer chamada de decodificação.
    #[error("corpus de treino vazio: nenhuma tag para indexar")]
    EmptyCorpus,

    /// Nome de método de decodificação não reconhecido (esperado:
    /// "greedy", "beam" ou "viterbi").
    #[error("método de decodificação desconhecido: {0:?}")]
    InvalidMethod(String),

    /// Sequências de palavras e tags com tamanhos diferentes.
    #[error("sequências com tamanhos diferentes: {words} palavras vs {tags} tags")]
    LengthMismatch { words: usize, tags: usize },

    /// Tag ausente do conjunto aprendido no treino.
    #[error("tag desconhecida: {0:?}")]
    UnknownTag(String),

    /// Parâmetro de configuração fora do domínio válido.
    #[error("configuração inválida: {0}")]
    InvalidConfig(String),
}
