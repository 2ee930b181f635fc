//! Prebuilt passage index over a fixed corpus.
//!
//! The index is constructed once before serving begins and is read-only for
//! the rest of the process lifetime; concurrent requests share it behind an
//! `Arc`. Building the corpus itself (fetching, chunking, embedding) is not
//! this crate's job; the index only honors the `query -> ranked passages`
//! contract.

use tracing::info;

#[derive(Debug, Clone)]
pub struct Passage {
    pub source: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Default)]
pub struct PassageIndex {
    passages: Vec<Passage>,
}

impl PassageIndex {
    pub fn build(passages: Vec<Passage>) -> Self {
        info!(passages = passages.len(), "passage index ready");
        Self { passages }
    }

    /// Corpus distilled from the two source pages the original index was
    /// built over (the site owner's about and projects pages).
    pub fn with_default_corpus() -> Self {
        Self::build(vec![
            Passage {
                source: "about",
                text: "Tomas is a software developer based in Buenos Aires, Argentina. \
                       He works mostly across the web stack and enjoys building small, \
                       focused products end to end.",
            },
            Passage {
                source: "about",
                text: "Tomas spends his free time experimenting with language models, \
                       agents and developer tooling, and writes about what he learns \
                       along the way.",
            },
            Passage {
                source: "projects",
                text: "Projects by Tomas include a conversational agent playground that \
                       routes questions through retrieval, weather and image tools, \
                       built to explore function-calling models.",
            },
            Passage {
                source: "projects",
                text: "Tomas has also shipped a handful of TypeScript and Rust side \
                       projects, from realtime chat experiments to command line \
                       utilities, all listed on his projects page.",
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Rank passages by how many distinct query terms they contain. Zero
    /// matches are excluded, so an empty result means nothing relevant.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Passage> {
        let terms: Vec<String> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|term| !term.is_empty())
            .map(|term| term.to_lowercase())
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Passage)> = self
            .passages
            .iter()
            .filter_map(|passage| {
                let haystack = passage.text.to_lowercase();
                let score = terms
                    .iter()
                    .filter(|term| haystack.contains(term.as_str()))
                    .count();
                (score > 0).then_some((score, passage))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, passage)| passage)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_relevant_passage_ranks_first() {
        let index = PassageIndex::with_default_corpus();

        let hits = index.search("what projects has Tomas built", 2);

        assert!(!hits.is_empty());
        assert_eq!(hits[0].source, "projects");
    }

    #[test]
    fn unrelated_query_returns_nothing() {
        let index = PassageIndex::with_default_corpus();
        assert!(index.search("zephyr quokka xylophone", 3).is_empty());
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = PassageIndex::build(Vec::new());
        assert!(index.search("tomas", 3).is_empty());
    }
}
