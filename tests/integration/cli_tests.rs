//! Runs the binary against a catalog file

use std::process::Command;

use library_catalog::{repository::json_file, Book, Library, Member, MemberId};

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_library-catalog"))
}

#[test]
fn test_prints_summary_and_members() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    let mut library = Library::new("City Library");
    library.add_book(Book::new("Dune", "Herrick", "111", 2)).unwrap();
    library.add_member(Member::new("Alice", "M1")).unwrap();
    library.add_member(Member::new("Bob", 7_i64)).unwrap();
    library.lend(&MemberId::from("M1"), "111").unwrap();
    json_file::save(&library, &path).unwrap();

    let output = cmd()
        .current_dir(dir.path())
        .env("CATALOG_FILE", &path)
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "Library: City Library, Books: 1, Members: 2",
            "Member: Alice, ID: M1, Borrowed Books: 1",
            "Member: Bob, ID: 7, Borrowed Books: 0",
        ]
    );
}

#[test]
fn test_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = cmd()
        .current_dir(dir.path())
        .env("CATALOG_FILE", dir.path().join("absent.json"))
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File not found"));
}
