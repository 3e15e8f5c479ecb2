use std::path::Path;

use memalias::{absolute_path, sha256_file};
use tempfile::tempdir;

#[test]
fn absolute_path_canonicalizes_existing_paths() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("snap.yaml");
    std::fs::write(&file, "allocations: []\n").expect("write");

    let resolved = absolute_path(file.to_str().expect("utf8")).expect("resolve");
    assert_eq!(resolved, file.canonicalize().expect("canonicalize"));
}

#[test]
fn absolute_path_keeps_missing_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("missing.json");
    assert_eq!(absolute_path(missing.to_str().expect("utf8")).expect("resolve"), missing);
}

#[test]
fn absolute_path_joins_missing_relative_paths_onto_cwd() {
    let resolved = absolute_path("does-not-exist.json").expect("resolve");
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("does-not-exist.json"));
}

#[test]
fn sha256_file_matches_known_digest() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("abc.txt");
    std::fs::write(&file, b"abc").expect("write");
    assert_eq!(
        sha256_file(&file).expect("hash"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_file_errors_for_missing_file() {
    let err = sha256_file(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to open snapshot for hashing"));
}

#[test]
fn sha256_file_hashes_empty_snapshot() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("empty.json");
    std::fs::write(&file, b"").expect("write");
    assert_eq!(
        sha256_file(&file).expect("hash"),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
