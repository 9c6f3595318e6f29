use crate::bigram::BigramIndex;
use crate::unigram::UnigramIndex;
use crate::{DocId, RawDocument};
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDoc {
    pub name: String,
    pub score: f64,
}

/// Output of one search round: the stage-1 cosine candidates (up to
/// 2k rows) and the final bigram-refined top k.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub candidates: Vec<RankedDoc>,
    pub top: Vec<RankedDoc>,
}

/// Two-stage retrieval over an immutable corpus. Stage 1 ranks every
/// document by TF-IDF cosine similarity and keeps the top 2k; stage 2
/// re-ranks only those candidates by bigram overlap with the query.
/// The full-vocabulary cosine pass therefore runs once per query, and
/// the phrase refinement touches only the short candidate list.
pub struct SearchEngine {
    doc_names: Vec<String>,
    unigrams: UnigramIndex,
    bigrams: BigramIndex,
}

impl SearchEngine {
    /// Build both indices from the corpus. The returned value has no
    /// mutators; rebuilding from the same corpus yields identical ids,
    /// postings, and scores.
    pub fn build(docs: &[RawDocument]) -> Self {
        let unigrams = UnigramIndex::build(docs);
        let bigrams = BigramIndex::build(docs);
        let doc_names = docs.iter().map(|d| d.name.clone()).collect();
        Self {
            doc_names,
            unigrams,
            bigrams,
        }
    }

    pub fn num_docs(&self) -> u32 {
        self.unigrams.num_docs()
    }

    pub fn unigrams(&self) -> &UnigramIndex {
        &self.unigrams
    }

    pub fn bigrams(&self) -> &BigramIndex {
        &self.bigrams
    }

    /// Run one query round. All query-derived state is local to this
    /// call. `k` larger than the corpus is capped at the available
    /// document count.
    pub fn search(&self, query: &str, k: usize) -> SearchResults {
        let candidates = self.stage1(query, k);
        let top = self.stage2(query, &candidates, k);
        SearchResults {
            candidates: self.ranked(&candidates),
            top: self.ranked(&top),
        }
    }

    /// Stage 1: every document scored by cosine similarity, sorted
    /// descending by score with ascending docId breaking ties, then
    /// truncated to min(2k, N).
    fn stage1(&self, query: &str, k: usize) -> Vec<(DocId, f64)> {
        let qvec = self.unigrams.query_vector(query);
        let scores = self.unigrams.similarities(&qvec);
        let mut ranked: Vec<(DocId, f64)> = scores
            .into_iter()
            .enumerate()
            .map(|(doc, score)| (doc as DocId, score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(k.saturating_mul(2));
        ranked
    }

    /// Stage 2: count, for each candidate, how many distinct query
    /// bigrams its document contains, then order descending by
    /// (match count, similarity) with ascending docId as the final
    /// tie-break and keep the top k.
    fn stage2(&self, query: &str, candidates: &[(DocId, f64)], k: usize) -> Vec<(DocId, f64)> {
        let mut rows: Vec<(u32, f64, DocId)> = candidates
            .iter()
            .map(|&(doc, sim)| (0u32, sim, doc))
            .collect();
        for bid in self.bigrams.query_bigrams(query) {
            for row in rows.iter_mut() {
                if self.bigrams.contains(bid, row.2) {
                    row.0 += 1;
                }
            }
        }
        rows.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
                .then(a.2.cmp(&b.2))
        });
        rows.truncate(k);
        rows.into_iter().map(|(_, sim, doc)| (doc, sim)).collect()
    }

    fn ranked(&self, rows: &[(DocId, f64)]) -> Vec<RankedDoc> {
        rows.iter()
            .map(|&(doc, score)| RankedDoc {
                name: self.doc_names[doc as usize].clone(),
                score,
            })
            .collect()
    }
}
