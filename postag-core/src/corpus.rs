//! # Corpus em Português Brasileiro com Anotações Morfossintáticas
//!
//! Corpus anotado manualmente com as classes gramaticais do esquema
//! Universal Dependencies (DET, NOUN, VERB, ADJ, ADV, PRON, ADP, PROPN,
//! NUM, CCONJ, AUX, PUNCT), cobrindo domínios temáticos variados. Serve de
//! dado de treino para o modelo embutido e de material de demonstração para
//! a interface web.
//!
//! ## Domínios Cobertos
//! - Cotidiano
//! - Saúde
//! - Economia
//! - Esportes
//! - Ciência e educação
//! - Cultura
//! - Meio ambiente

/// Uma sentença anotada com classes gramaticais.
pub struct TaggedSentence {
    /// O texto completo da sentença.
    pub text: &'static str,
    /// Domínio temático (utilizado para análises de performance por área).
    pub domain: &'static str,
    /// Pares (palavra, classe gramatical).
    /// Exemplo: `[("O", "DET"), ("gato", "NOUN")]`
    pub annotations: &'static [(&'static str, &'static str)],
}

/// Retorna o corpus completo em PT-BR.
pub fn get_corpus() -> Vec<TaggedSentence> {
    vec![
        // ===== COTIDIANO =====
        TaggedSentence {
            text: "O gato preto corre pelo jardim.",
            domain: "cotidiano",
            annotations: &[
                ("O", "DET"), ("gato", "NOUN"), ("preto", "ADJ"), ("corre", "VERB"),
                ("pelo", "ADP"), ("jardim", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A menina canta muito bem.",
            domain: "cotidiano",
            annotations: &[
                ("A", "DET"), ("menina", "NOUN"), ("canta", "VERB"),
                ("muito", "ADV"), ("bem", "ADV"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Nós vamos ao mercado amanhã.",
            domain: "cotidiano",
            annotations: &[
                ("Nós", "PRON"), ("vamos", "VERB"), ("ao", "ADP"),
                ("mercado", "NOUN"), ("amanhã", "ADV"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "As crianças brincam no parque.",
            domain: "cotidiano",
            annotations: &[
                ("As", "DET"), ("crianças", "NOUN"), ("brincam", "VERB"),
                ("no", "ADP"), ("parque", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Ele trabalha na universidade federal.",
            domain: "cotidiano",
            annotations: &[
                ("Ele", "PRON"), ("trabalha", "VERB"), ("na", "ADP"),
                ("universidade", "NOUN"), ("federal", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O Brasil é um país tropical.",
            domain: "cotidiano",
            annotations: &[
                ("O", "DET"), ("Brasil", "PROPN"), ("é", "AUX"), ("um", "DET"),
                ("país", "NOUN"), ("tropical", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Maria comprou dois livros novos.",
            domain: "cotidiano",
            annotations: &[
                ("Maria", "PROPN"), ("comprou", "VERB"), ("dois", "NUM"),
                ("livros", "NOUN"), ("novos", "ADJ"), (".", "PUNCT"),
            ],
        },

        // ===== SAÚDE =====
        TaggedSentence {
            text: "O médico examinou o paciente com cuidado.",
            domain: "saúde",
            annotations: &[
                ("O", "DET"), ("médico", "NOUN"), ("examinou", "VERB"), ("o", "DET"),
                ("paciente", "NOUN"), ("com", "ADP"), ("cuidado", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A vacina protege contra doenças graves.",
            domain: "saúde",
            annotations: &[
                ("A", "DET"), ("vacina", "NOUN"), ("protege", "VERB"),
                ("contra", "ADP"), ("doenças", "NOUN"), ("graves", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O hospital atende pacientes todos os dias.",
            domain: "saúde",
            annotations: &[
                ("O", "DET"), ("hospital", "NOUN"), ("atende", "VERB"),
                ("pacientes", "NOUN"), ("todos", "DET"), ("os", "DET"),
                ("dias", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A enfermeira aplicou a injeção rapidamente.",
            domain: "saúde",
            annotations: &[
                ("A", "DET"), ("enfermeira", "NOUN"), ("aplicou", "VERB"),
                ("a", "DET"), ("injeção", "NOUN"), ("rapidamente", "ADV"), (".", "PUNCT"),
            ],
        },

        // ===== ECONOMIA =====
        TaggedSentence {
            text: "A empresa anunciou lucro recorde neste trimestre.",
            domain: "economia",
            annotations: &[
                ("A", "DET"), ("empresa", "NOUN"), ("anunciou", "VERB"),
                ("lucro", "NOUN"), ("recorde", "NOUN"), ("neste", "ADP"),
                ("trimestre", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O banco central manteve a taxa de juros.",
            domain: "economia",
            annotations: &[
                ("O", "DET"), ("banco", "NOUN"), ("central", "ADJ"), ("manteve", "VERB"),
                ("a", "DET"), ("taxa", "NOUN"), ("de", "ADP"), ("juros", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Os investidores compraram ações ontem.",
            domain: "economia",
            annotations: &[
                ("Os", "DET"), ("investidores", "NOUN"), ("compraram", "VERB"),
                ("ações", "NOUN"), ("ontem", "ADV"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O mercado financeiro reagiu mal à notícia.",
            domain: "economia",
            annotations: &[
                ("O", "DET"), ("mercado", "NOUN"), ("financeiro", "ADJ"),
                ("reagiu", "VERB"), ("mal", "ADV"), ("à", "ADP"),
                ("notícia", "NOUN"), (".", "PUNCT"),
            ],
        },

        // ===== ESPORTES =====
        TaggedSentence {
            text: "O time venceu o campeonato nacional.",
            domain: "esportes",
            annotations: &[
                ("O", "DET"), ("time", "NOUN"), ("venceu", "VERB"), ("o", "DET"),
                ("campeonato", "NOUN"), ("nacional", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Pelé marcou mil gols na carreira.",
            domain: "esportes",
            annotations: &[
                ("Pelé", "PROPN"), ("marcou", "VERB"), ("mil", "NUM"),
                ("gols", "NOUN"), ("na", "ADP"), ("carreira", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A torcida comemorou a vitória com festa.",
            domain: "esportes",
            annotations: &[
                ("A", "DET"), ("torcida", "NOUN"), ("comemorou", "VERB"), ("a", "DET"),
                ("vitória", "NOUN"), ("com", "ADP"), ("festa", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O jogador chutou a bola para o gol.",
            domain: "esportes",
            annotations: &[
                ("O", "DET"), ("jogador", "NOUN"), ("chutou", "VERB"), ("a", "DET"),
                ("bola", "NOUN"), ("para", "ADP"), ("o", "DET"), ("gol", "NOUN"), (".", "PUNCT"),
            ],
        },

        // ===== CIÊNCIA E EDUCAÇÃO =====
        TaggedSentence {
            text: "Os pesquisadores publicaram um estudo importante.",
            domain: "ciência",
            annotations: &[
                ("Os", "DET"), ("pesquisadores", "NOUN"), ("publicaram", "VERB"),
                ("um", "DET"), ("estudo", "NOUN"), ("importante", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O satélite observa a floresta amazônica.",
            domain: "ciência",
            annotations: &[
                ("O", "DET"), ("satélite", "NOUN"), ("observa", "VERB"), ("a", "DET"),
                ("floresta", "NOUN"), ("amazônica", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A universidade desenvolve novas tecnologias.",
            domain: "ciência",
            annotations: &[
                ("A", "DET"), ("universidade", "NOUN"), ("desenvolve", "VERB"),
                ("novas", "ADJ"), ("tecnologias", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Ela estuda biologia e química na escola.",
            domain: "educação",
            annotations: &[
                ("Ela", "PRON"), ("estuda", "VERB"), ("biologia", "NOUN"),
                ("e", "CCONJ"), ("química", "NOUN"), ("na", "ADP"),
                ("escola", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O professor explicou a lição com paciência.",
            domain: "educação",
            annotations: &[
                ("O", "DET"), ("professor", "NOUN"), ("explicou", "VERB"), ("a", "DET"),
                ("lição", "NOUN"), ("com", "ADP"), ("paciência", "NOUN"), (".", "PUNCT"),
            ],
        },

        // ===== CULTURA =====
        TaggedSentence {
            text: "O escritor lançou seu novo romance ontem.",
            domain: "cultura",
            annotations: &[
                ("O", "DET"), ("escritor", "NOUN"), ("lançou", "VERB"), ("seu", "DET"),
                ("novo", "ADJ"), ("romance", "NOUN"), ("ontem", "ADV"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A banda tocou samba durante o carnaval.",
            domain: "cultura",
            annotations: &[
                ("A", "DET"), ("banda", "NOUN"), ("tocou", "VERB"), ("samba", "NOUN"),
                ("durante", "ADP"), ("o", "DET"), ("carnaval", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Eles assistiram ao filme no cinema.",
            domain: "cultura",
            annotations: &[
                ("Eles", "PRON"), ("assistiram", "VERB"), ("ao", "ADP"),
                ("filme", "NOUN"), ("no", "ADP"), ("cinema", "NOUN"), (".", "PUNCT"),
            ],
        },

        // ===== MEIO AMBIENTE =====
        TaggedSentence {
            text: "A chuva forte alagou as ruas da cidade.",
            domain: "meio ambiente",
            annotations: &[
                ("A", "DET"), ("chuva", "NOUN"), ("forte", "ADJ"), ("alagou", "VERB"),
                ("as", "DET"), ("ruas", "NOUN"), ("da", "ADP"), ("cidade", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "O rio corta a cidade antiga.",
            domain: "meio ambiente",
            annotations: &[
                ("O", "DET"), ("rio", "NOUN"), ("corta", "VERB"), ("a", "DET"),
                ("cidade", "NOUN"), ("antiga", "ADJ"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "Nós plantamos árvores no quintal.",
            domain: "meio ambiente",
            annotations: &[
                ("Nós", "PRON"), ("plantamos", "VERB"), ("árvores", "NOUN"),
                ("no", "ADP"), ("quintal", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A população reclamava da poluição constantemente.",
            domain: "meio ambiente",
            annotations: &[
                ("A", "DET"), ("população", "NOUN"), ("reclamava", "VERB"),
                ("da", "ADP"), ("poluição", "NOUN"), ("constantemente", "ADV"), (".", "PUNCT"),
            ],
        },

        // ===== MORFOLOGIA RICA (alimenta o modelo de sufixos) =====
        TaggedSentence {
            text: "O menino falava alegremente sobre a viagem.",
            domain: "cotidiano",
            annotations: &[
                ("O", "DET"), ("menino", "NOUN"), ("falava", "VERB"),
                ("alegremente", "ADV"), ("sobre", "ADP"), ("a", "DET"),
                ("viagem", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A administração aprovou a construção da ponte.",
            domain: "cotidiano",
            annotations: &[
                ("A", "DET"), ("administração", "NOUN"), ("aprovou", "VERB"),
                ("a", "DET"), ("construção", "NOUN"), ("da", "ADP"),
                ("ponte", "NOUN"), (".", "PUNCT"),
            ],
        },
        TaggedSentence {
            text: "A organização celebrava a premiação calorosamente.",
            domain: "cultura",
            annotations: &[
                ("A", "DET"), ("organização", "NOUN"), ("celebrava", "VERB"),
                ("a", "DET"), ("premiação", "NOUN"), ("calorosamente", "ADV"), (".", "PUNCT"),
            ],
        },
    ]
}

/// Converte o corpus para os pares (palavras, tags) que o treino consome.
pub fn training_pairs() -> Vec<(Vec<String>, Vec<String>)> {
    get_corpus()
        .iter()
        .map(|sentence| {
            let words = sentence
                .annotations
                .iter()
                .map(|(w, _)| w.to_string())
                .collect();
            let tags = sentence
                .annotations
                .iter()
                .map(|(_, t)| t.to_string())
                .collect();
            (words, tags)
        })
        .collect()
}

/// Textos de demonstração para a interface web.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Cotidiano",
            "O gato preto corre pelo jardim enquanto as crianças brincam no parque.",
        ),
        (
            "Saúde",
            "O médico examinou o paciente e a enfermeira aplicou a vacina rapidamente.",
        ),
        (
            "Economia",
            "A empresa anunciou lucro recorde e os investidores compraram ações ontem.",
        ),
        (
            "Esportes",
            "O time venceu o campeonato nacional e a torcida comemorou a vitória com festa.",
        ),
        (
            "Palavras novas",
            "A modernização avançava silenciosamente na repartição.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_annotations_are_consistent() {
        let valid_tags = [
            "ADJ", "ADP", "ADV", "AUX", "CCONJ", "DET", "NOUN", "NUM",
            "PRON", "PROPN", "PUNCT", "VERB",
        ];
        for sentence in get_corpus() {
            assert!(!sentence.annotations.is_empty());
            for (word, tag) in sentence.annotations {
                assert!(!word.is_empty());
                assert!(
                    valid_tags.contains(tag),
                    "tag inválida {tag:?} em {word:?}"
                );
            }
        }
    }

    #[test]
    fn test_training_pairs_are_aligned() {
        for (words, tags) in training_pairs() {
            assert_eq!(words.len(), tags.len());
            assert!(!words.is_empty());
        }
    }

    #[test]
    fn test_corpus_trains_a_model() {
        let model = crate::model::TrigramHmm::train(
            &training_pairs(),
            crate::model::TaggerConfig::default(),
        )
        .unwrap();
        assert!(model.n_tags() >= 10);
    }
}
