use std::fs;
use std::path::PathBuf;

use docupright::utils::file_utils::{collect_pdf_inputs, path_key, same_file, write_atomic};
use tempfile::tempdir;

#[test]
fn test_directory_inputs_are_sorted_pdfs() {
    let dir = tempdir().unwrap();
    for name in ["b.pdf", "a.PDF", "notes.txt"] {
        fs::write(dir.path().join(name), b"%PDF").unwrap();
    }

    let inputs = collect_pdf_inputs(&[dir.path().to_path_buf()], "_corrected").unwrap();

    assert_eq!(
        inputs,
        vec![dir.path().join("a.PDF"), dir.path().join("b.pdf")]
    );
}

#[test]
fn test_directory_scan_skips_earlier_outputs() {
    let dir = tempdir().unwrap();
    for name in ["report.pdf", "report_corrected.pdf"] {
        fs::write(dir.path().join(name), b"%PDF").unwrap();
    }

    let inputs = collect_pdf_inputs(&[dir.path().to_path_buf()], "_corrected").unwrap();
    assert_eq!(inputs, vec![dir.path().join("report.pdf")]);

    // Named explicitly, an output is still an input
    let named = dir.path().join("report_corrected.pdf");
    let inputs = collect_pdf_inputs(std::slice::from_ref(&named), "_corrected").unwrap();
    assert_eq!(inputs, vec![named]);

    // No suffix means nothing looks like an earlier output
    let inputs = collect_pdf_inputs(&[dir.path().to_path_buf()], "").unwrap();
    assert_eq!(inputs.len(), 2);
}

#[test]
fn test_same_file_through_different_spellings() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("report.pdf");
    fs::write(&file, b"%PDF").unwrap();

    let dotted = dir.path().join(".").join("report.pdf");
    assert!(same_file(&file, &dotted));
    assert!(!same_file(&file, &dir.path().join("other.pdf")));

    // Not yet existing files resolve against their directory
    let missing = dir.path().join("new.pdf");
    assert_eq!(path_key(&missing), path_key(&dir.path().join(".").join("new.pdf")));
}

#[test]
fn test_path_key_of_unresolvable_path_is_unchanged() {
    let path = PathBuf::from("no/such/dir/report.pdf");
    assert_eq!(path_key(&path), path);
}

#[test]
fn test_write_atomic_replaces_whole_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("out.pdf");
    fs::write(&target, b"old contents that are longer").unwrap();

    write_atomic(&target, b"new").unwrap();

    assert_eq!(fs::read(&target).unwrap(), b"new");
    // The temporary file was renamed, not left beside the output
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_failed_write_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing").join("out.pdf");

    assert!(write_atomic(&target, b"data").is_err());

    assert!(!target.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
