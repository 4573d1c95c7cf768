//! # postag-core — Etiquetagem Morfossintática com HMM de Trigramas
//!
//! Este crate implementa um etiquetador de classes gramaticais (POS tagger)
//! para Português Brasileiro baseado em um Hidden Markov Model de **segunda
//! ordem**: cada tag é condicionada às duas tags anteriores. Ele foi
//! projetado para ser didático e modular, permitindo a comparação entre
//! estratégias de smoothing e entre algoritmos de decodificação.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui pelos módulos nesta ordem:
//!
//! 1.  **Vocabulário** ([`vocab`]): tags e palavras frequentes ganham
//!     índices densos; palavras raras viram `<UNK>`.
//! 2.  **Contagens** ([`counts`]): uma passada pelo corpus acumula n-gramas
//!     de tags, emissões tag × palavra e estatísticas de sufixo.
//! 3.  **Smoothing** ([`smoothing`]): as contagens viram tabelas de
//!     probabilidade por uma de três estratégias (aditiva, interpolação
//!     linear, Good-Turing).
//! 4.  **Modelo** ([`model`]): o [`TrigramHmm`] treinado, imutável, com o
//!     modelo de sufixos ([`suffix`]) para palavras desconhecidas.
//! 5.  **Decodificação** ([`greedy`], [`beam`], [`viterbi`]): três
//!     algoritmos intercambiáveis, do baseline linear ao ótimo global.
//!
//! Ao redor do núcleo: [`tokenizer`] para o caminho de texto bruto,
//! [`corpus`] com sentenças PT-BR anotadas, [`evaluation`] com métricas
//! paralelizadas e [`pipeline`] com eventos observáveis para a interface
//! web.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use postag_core::{DecodingMethod, TaggerConfig, TrigramHmm};
//!
//! // 1. Treina sobre o corpus embutido
//! let model = TrigramHmm::train(
//!     &postag_core::corpus::training_pairs(),
//!     TaggerConfig::default(),
//! ).unwrap();
//!
//! // 2. Decodifica uma sentença já tokenizada
//! let words: Vec<String> = ["O", "gato", "corre", "."]
//!     .iter().map(|s| s.to_string()).collect();
//! let tags = model.inference(DecodingMethod::Viterbi, &words);
//! assert_eq!(tags.len(), words.len());
//! ```

pub mod beam;
pub mod corpus;
pub mod counts;
pub mod error;
pub mod evaluation;
pub mod greedy;
pub mod model;
pub mod pipeline;
pub mod smoothing;
pub mod suffix;
pub mod tokenizer;
pub mod viterbi;
pub mod vocab;

pub use error::{Result, TaggerError};
pub use evaluation::{evaluate, EvaluationReport};
pub use model::{DecodingMethod, TaggerConfig, TrigramHmm, MIN_PROB};
pub use pipeline::{PipelineEvent, PosPipeline, TaggedToken};
pub use smoothing::SmoothingStrategy;
pub use tokenizer::{tokenize, Token};
pub use vocab::{Vocabulary, UNK_WORD};
