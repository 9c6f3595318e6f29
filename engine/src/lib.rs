pub mod bigram;
pub mod corpus;
pub mod rank;
pub mod tokenizer;
pub mod unigram;
pub mod vocab;

pub use corpus::read_corpus;
pub use rank::{RankedDoc, SearchEngine, SearchResults};

pub type DocId = u32;
pub type TermId = u32;
pub type BigramId = u32;

/// A corpus document before indexing: file name plus raw text.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("corpus directory {0} contains no readable documents")]
    EmptyCorpus(std::path::PathBuf),
    #[error("failed to read corpus directory {path}")]
    CorpusDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
