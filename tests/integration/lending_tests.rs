//! Lending workflow tests against the public API

use library_catalog::{AppError, Book, EBook, Library, Member, MemberId};

#[test]
fn test_dune_scenario() {
    let mut library = Library::new("City Library");
    library.add_book(Book::new("Dune", "Herrick", "111", 2)).unwrap();
    library.add_member(Member::new("Alice", "M1")).unwrap();
    let alice = MemberId::from("M1");

    library.lend(&alice, "111").unwrap();
    library.lend(&alice, "111").unwrap();

    let err = library.lend(&alice, "111").unwrap_err();
    assert!(matches!(err, AppError::NotAvailable(_)));
    assert!(!err.is_persistence());
    assert_eq!(library.book("111").unwrap().copies(), 0);
    assert_eq!(library.member(&alice).unwrap().borrowed_books(), ["111", "111"]);
}

#[test]
fn test_lend_and_return_ebook() {
    let mut library = Library::new("City Library");
    library.add_book(EBook::new("Neuromancer", "Gibson", "222", 1, "EPUB")).unwrap();
    library.add_member(Member::new("Bob", 7_i64)).unwrap();
    let bob = MemberId::from(7_i64);

    library.lend(&bob, "222").unwrap();
    assert_eq!(library.book("222").unwrap().copies(), 0);

    library.return_book(&bob, "222").unwrap();
    assert_eq!(library.book("222").unwrap().copies(), 1);
    assert_eq!(library.member(&bob).unwrap().borrowed_count(), 0);

    let err = library.return_book(&bob, "222").unwrap_err();
    assert!(matches!(err, AppError::NotBorrowed(_)));
    assert_eq!(library.book("222").unwrap().copies(), 1);
}

#[test]
fn test_removed_book_can_no_longer_be_lent() {
    let mut library = Library::new("City Library");
    library.add_book(Book::new("Dune", "Herrick", "111", 2)).unwrap();
    library.add_member(Member::new("Alice", "M1")).unwrap();

    library.remove_book("111").unwrap();
    let err = library.lend(&MemberId::from("M1"), "111").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
