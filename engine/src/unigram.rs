use crate::tokenizer::tokenize;
use crate::vocab::Vocabulary;
use crate::{DocId, RawDocument, TermId};
use rayon::prelude::*;
use std::collections::HashMap;

/// Inverted index over single terms with per-document frequency.
///
/// Built once from the corpus and immutable afterward. Postings for
/// each term are pushed in ascending docId order, so df(t) is the
/// postings length by construction and lookups can binary-search.
pub struct UnigramIndex {
    vocab: Vocabulary,
    postings: Vec<Vec<(DocId, u32)>>,
    doc_norms: Vec<f64>,
    num_docs: u32,
}

/// Query-side term weights, restricted to vocabulary terms and sorted
/// by term id. Rebuilt for every search call; nothing survives between
/// calls.
pub struct QueryVector {
    weights: Vec<(TermId, f64)>,
    norm: f64,
}

impl QueryVector {
    pub fn norm(&self) -> f64 {
        self.norm
    }
}

impl UnigramIndex {
    pub fn build(docs: &[RawDocument]) -> Self {
        // Map phase: per-document term counts, independent across docs.
        let locals: Vec<Vec<(String, u32)>> = docs
            .par_iter()
            .map(|doc| doc_term_counts(&doc.text))
            .collect();

        // Reduce phase: merge in corpus order so term ids, postings,
        // and score accumulation order are identical across rebuilds.
        // An empty document contributes no postings but still counts
        // toward N.
        let mut vocab = Vocabulary::new();
        let mut postings: Vec<Vec<(DocId, u32)>> = Vec::new();
        for (doc_id, local) in locals.into_iter().enumerate() {
            for (term, tf) in local {
                let tid = vocab.intern(&term) as usize;
                if postings.len() <= tid {
                    postings.push(Vec::new());
                }
                postings[tid].push((doc_id as DocId, tf));
            }
        }

        let num_docs = docs.len() as u32;
        let doc_norms = compute_doc_norms(&postings, num_docs, docs.len());
        tracing::info!(num_docs, num_terms = vocab.len(), "unigram index built");
        Self {
            vocab,
            postings,
            doc_norms,
            num_docs,
        }
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.vocab.len()
    }

    /// df(t): number of documents containing `term` at least once.
    pub fn doc_frequency(&self, term: &str) -> u32 {
        match self.vocab.get(term) {
            Some(tid) => self.postings[tid as usize].len() as u32,
            None => 0,
        }
    }

    /// TF-IDF weight of `term` in document `doc`:
    /// `log2(1 + tf) * log10(N / df)`. Zero when the term is outside
    /// the vocabulary or absent from the document.
    pub fn weight(&self, term: &str, doc: DocId) -> f64 {
        let Some(tid) = self.vocab.get(term) else {
            return 0.0;
        };
        let plist = &self.postings[tid as usize];
        let Ok(pos) = plist.binary_search_by_key(&doc, |&(d, _)| d) else {
            return 0.0;
        };
        let tf = plist[pos].1;
        let df = plist.len() as f64;
        tf_weight(tf) * (f64::from(self.num_docs) / df).log10()
    }

    /// Precomputed L2 norm of `doc`'s TF-IDF vector.
    pub fn doc_norm(&self, doc: DocId) -> f64 {
        self.doc_norms[doc as usize]
    }

    /// Build the query-side vector: the text is tokenized exactly like
    /// a document, term frequencies counted, and only vocabulary terms
    /// kept. Query weights are log-tf with no idf factor.
    pub fn query_vector(&self, text: &str) -> QueryVector {
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for line in text.lines() {
            for token in tokenize(line) {
                if let Some(tid) = self.vocab.get(&token) {
                    *counts.entry(tid).or_insert(0) += 1;
                }
            }
        }
        let mut weights: Vec<(TermId, f64)> = counts
            .into_iter()
            .map(|(tid, tf)| (tid, tf_weight(tf)))
            .collect();
        // Sorted by term id so floating-point accumulation order is
        // reproducible.
        weights.sort_unstable_by_key(|&(tid, _)| tid);
        let norm = weights.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        QueryVector { weights, norm }
    }

    /// Cosine similarity of the query against every document, indexed
    /// by docId. Exactly N entries. A score is 0 whenever either
    /// vector norm is 0; division by zero never propagates.
    pub fn similarities(&self, query: &QueryVector) -> Vec<f64> {
        let mut scores = vec![0.0f64; self.num_docs as usize];
        for &(tid, w_q) in &query.weights {
            let plist = &self.postings[tid as usize];
            let idf = (f64::from(self.num_docs) / plist.len() as f64).log10();
            for &(doc, tf) in plist {
                scores[doc as usize] += tf_weight(tf) * idf * w_q;
            }
        }
        for (doc, score) in scores.iter_mut().enumerate() {
            let denom = self.doc_norms[doc] * query.norm;
            *score = if denom == 0.0 { 0.0 } else { *score / denom };
        }
        scores
    }
}

fn tf_weight(tf: u32) -> f64 {
    (1.0 + f64::from(tf)).log2()
}

/// Per-document term counts in first-seen order, so interning during
/// the merge assigns deterministic term ids.
fn doc_term_counts(text: &str) -> Vec<(String, u32)> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for line in text.lines() {
        for token in tokenize(line) {
            match counts.get_mut(&token) {
                Some(tf) => *tf += 1,
                None => {
                    counts.insert(token.clone(), 1);
                    order.push(token);
                }
            }
        }
    }
    order
        .into_iter()
        .map(|term| {
            let tf = counts[&term];
            (term, tf)
        })
        .collect()
}

fn compute_doc_norms(postings: &[Vec<(DocId, u32)>], num_docs: u32, len: usize) -> Vec<f64> {
    let mut norms = vec![0.0f64; len];
    for plist in postings {
        let idf = (f64::from(num_docs) / plist.len() as f64).log10();
        for &(doc, tf) in plist {
            let w = tf_weight(tf) * idf;
            norms[doc as usize] += w * w;
        }
    }
    for n in norms.iter_mut() {
        *n = n.sqrt();
    }
    norms
}
