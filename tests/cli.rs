use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn shelfindex() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shelfindex"))
}

#[test]
fn writes_manifest_in_working_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("daat/poetry")).unwrap();
    fs::write(temp.path().join("daat/poetry/Odes.epub"), "odes").unwrap();
    fs::write(temp.path().join("daat/Notes.txt"), "notes").unwrap();

    let output = shelfindex()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Starting scan for EPUB files..."));
    assert!(stderr.contains("Warning: Directory 'orayta' not found. Skipping."));
    assert!(stderr.contains("Found 1 books."));
    assert!(stderr.contains("Successfully created 'docs/data/books.json'!"));

    let manifest = fs::read_to_string(temp.path().join("docs/data/books.json")).unwrap();
    assert!(manifest.contains("\"path\": \"daat/poetry/Odes.epub\""));
    assert!(manifest.contains(
        "https://raw.githubusercontent.com/cfopuser/epub-Jewish-books/main/daat/poetry/Odes.epub"
    ));
    assert!(temp.path().join("docs/css").is_dir());
    assert!(temp.path().join("docs/js").is_dir());
}

#[cfg(unix)]
#[test]
fn fails_when_output_is_blocked() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("docs"), "a file where a directory should be").unwrap();

    let output = shelfindex()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
