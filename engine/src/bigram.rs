use crate::tokenizer::tokenize;
use crate::vocab::Vocabulary;
use crate::{BigramId, DocId, RawDocument};
use rayon::prelude::*;
use std::collections::HashSet;

/// Inverted index over adjacent-token pairs. Postings record presence
/// only: a sorted docId list per bigram, no frequency.
pub struct BigramIndex {
    vocab: Vocabulary,
    postings: Vec<Vec<DocId>>,
}

impl BigramIndex {
    pub fn build(docs: &[RawDocument]) -> Self {
        let locals: Vec<Vec<String>> = docs
            .par_iter()
            .map(|doc| doc_bigrams(&doc.text))
            .collect();

        let mut vocab = Vocabulary::new();
        let mut postings: Vec<Vec<DocId>> = Vec::new();
        for (doc_id, local) in locals.into_iter().enumerate() {
            for bigram in local {
                let bid = vocab.intern(&bigram) as usize;
                if postings.len() <= bid {
                    postings.push(Vec::new());
                }
                postings[bid].push(doc_id as DocId);
            }
        }
        tracing::info!(num_bigrams = vocab.len(), "bigram index built");
        Self { vocab, postings }
    }

    pub fn num_bigrams(&self) -> usize {
        self.vocab.len()
    }

    /// df(b): number of documents containing `bigram`.
    pub fn doc_frequency(&self, bigram: &str) -> u32 {
        match self.vocab.get(bigram) {
            Some(bid) => self.postings[bid as usize].len() as u32,
            None => 0,
        }
    }

    /// Distinct query bigrams present in the vocabulary. Pairs the
    /// query text the same way documents are paired; unknown bigrams
    /// drop out here and contribute no matches.
    pub fn query_bigrams(&self, text: &str) -> Vec<BigramId> {
        doc_bigrams(text)
            .iter()
            .filter_map(|b| self.vocab.get(b))
            .collect()
    }

    pub fn contains(&self, bigram: BigramId, doc: DocId) -> bool {
        self.postings[bigram as usize].binary_search(&doc).is_ok()
    }
}

/// Distinct bigrams of a document in first-seen order: adjacent pairs
/// within each line, plus the last surviving token of one non-empty
/// line stitched to the first of the next. Blank or fully filtered
/// lines do not break the stitch; this mirrors the line-by-line corpus
/// reader the collection comes from.
fn doc_bigrams(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut last: Option<String> = None;
    for line in text.lines() {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        if let Some(prev) = last.take() {
            let stitched = format!("{prev} {}", tokens[0]);
            if seen.insert(stitched.clone()) {
                order.push(stitched);
            }
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            if seen.insert(bigram.clone()) {
                order.push(bigram);
            }
        }
        last = tokens.last().cloned();
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, text: &str) -> RawDocument {
        RawDocument {
            name: name.into(),
            text: text.into(),
        }
    }

    #[test]
    fn pairs_adjacent_tokens_within_a_line() {
        let index = BigramIndex::build(&[doc("a", "blue fish swam away")]);
        assert_eq!(index.num_bigrams(), 3);
        assert_eq!(index.doc_frequency("blue fish"), 1);
        assert_eq!(index.doc_frequency("fish swam"), 1);
        assert_eq!(index.doc_frequency("swam away"), 1);
        assert_eq!(index.doc_frequency("blue swam"), 0);
    }

    #[test]
    fn stitches_across_lines_and_skips_blank_lines() {
        let index = BigramIndex::build(&[doc("a", "alpha beta\n\n ,. \ngamma delta")]);
        assert_eq!(index.doc_frequency("alpha beta"), 1);
        assert_eq!(index.doc_frequency("beta gamma"), 1);
        assert_eq!(index.doc_frequency("gamma delta"), 1);
        assert_eq!(index.num_bigrams(), 3);
    }

    #[test]
    fn duplicate_bigrams_count_once_per_document() {
        let index = BigramIndex::build(&[
            doc("a", "red fish red fish"),
            doc("b", "red fish"),
        ]);
        assert_eq!(index.doc_frequency("red fish"), 2);
        assert_eq!(index.doc_frequency("fish red"), 1);
    }

    #[test]
    fn single_token_lines_still_stitch() {
        let index = BigramIndex::build(&[doc("a", "alpha\nbeta\ngamma")]);
        assert_eq!(index.doc_frequency("alpha beta"), 1);
        assert_eq!(index.doc_frequency("beta gamma"), 1);
    }

    #[test]
    fn query_bigrams_drop_unknown_pairs() {
        let index = BigramIndex::build(&[doc("a", "blue fish swam away")]);
        let hits = index.query_bigrams("blue fish swam nowhere");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|&b| index.contains(b, 0)));
    }
}
