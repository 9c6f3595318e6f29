use engine::{read_corpus, Error};
use std::fs;
use tempfile::tempdir;

#[test]
fn documents_are_ordered_by_file_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "beta words here").unwrap();
    fs::write(dir.path().join("a.txt"), "alpha words here").unwrap();
    fs::write(dir.path().join("c.txt"), "gamma words here").unwrap();

    let docs = read_corpus(dir.path()).unwrap();
    let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(docs[0].text, "alpha words here");
}

#[test]
fn hidden_entries_and_subdirectories_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".DS_Store"), "junk").unwrap();
    fs::write(dir.path().join("real.txt"), "actual content").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("deep.txt"), "ignored").unwrap();

    let docs = read_corpus(dir.path()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "real.txt");
}

#[test]
fn empty_corpus_is_a_fatal_error() {
    let dir = tempdir().unwrap();
    let err = read_corpus(dir.path()).unwrap_err();
    assert!(matches!(err, Error::EmptyCorpus(_)));

    // Only housekeeping entries present still counts as empty.
    fs::write(dir.path().join(".DS_Store"), "junk").unwrap();
    let err = read_corpus(dir.path()).unwrap_err();
    assert!(matches!(err, Error::EmptyCorpus(_)));
}

#[test]
fn unreadable_documents_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();
    fs::write(dir.path().join("good.txt"), "readable content").unwrap();

    let docs = read_corpus(dir.path()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "good.txt");
}
