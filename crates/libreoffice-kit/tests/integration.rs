//! Integration tests against a real LibreOffice installation.
//!
//! These require LibreOffice with LibreOfficeKit support installed under
//! the default program directory (or `LOK_PROGRAM_PATH`). If it is not
//! present, the engine-backed tests are skipped.
//!
//! Note: LibreOfficeKit can only be initialised once per process, so the
//! engine-backed flow lives in a single test.

use std::path::PathBuf;

use libreoffice_kit::{DocumentType, KitError, Office};

fn program_path() -> PathBuf {
    std::env::var_os("LOK_PROGRAM_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/usr/lib/libreoffice/program"))
}

/// Skip this test if no LibreOffice install is available.
macro_rules! skip_if_no_lok {
    () => {
        if !program_path().join("libsofficeapp.so").exists() {
            eprintln!(
                "SKIP: no LibreOffice installation at {}.\n\
                 Install LibreOffice or set LOK_PROGRAM_PATH to its program directory.",
                program_path().display()
            );
            return;
        }
    };
}

#[test]
fn init_fails_for_missing_install() {
    let err = Office::new(std::path::Path::new("/nonexistent/libreoffice/program"))
        .err()
        .expect("init must fail without an install");
    match err {
        KitError::LibraryNotFound { .. } => {}
        other => panic!("expected LibraryNotFound, got {other}"),
    }
}

#[test]
fn load_and_convert_text_document() {
    skip_if_no_lok!();

    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("hello.txt");
    std::fs::write(&input, "hello from lok-tools\n").expect("write input");

    let mut office = Office::new(&program_path()).expect("init LibreOfficeKit");

    let mut doc = office.document_load(&input).expect("load document");
    assert_eq!(doc.doc_type(), DocumentType::Text);
    assert!(doc.parts() >= 1);

    let (width, height) = doc.size();
    assert!(width > 0 && height > 0);

    let output = dir.path().join("hello.pdf");
    doc.save_as(&output).expect("save as pdf");
    drop(doc);

    let meta = std::fs::metadata(&output).expect("output exists");
    assert!(meta.len() > 0);
}
