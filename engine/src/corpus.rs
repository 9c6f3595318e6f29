use crate::{Error, RawDocument};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Read a flat directory of documents, one per regular file, ordered by
/// file name so docId assignment is deterministic across runs. Hidden
/// entries (`.DS_Store` and friends) and subdirectories are skipped. A
/// file that fails to read is logged and skipped; the index is built
/// from whatever remains.
pub fn read_corpus(dir: &Path) -> Result<Vec<RawDocument>, Error> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut docs = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::CorpusDir {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        match fs::read_to_string(entry.path()) {
            Ok(text) => docs.push(RawDocument { name, text }),
            Err(err) => {
                tracing::warn!(doc = %name, error = %err, "skipping unreadable document");
            }
        }
    }

    if docs.is_empty() {
        return Err(Error::EmptyCorpus(dir.to_path_buf()));
    }
    Ok(docs)
}
