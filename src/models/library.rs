//! Library aggregate: catalog, members and the lending workflow

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::book::Item;
use super::member::{Member, MemberId};
use crate::error::{AppError, AppResult};

/// Rules applied before a loan is delegated to the member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendingPolicy {
    /// Let a member hold several copies of the same ISBN
    pub allow_duplicate_loans: bool,
    pub max_loans_per_member: Option<usize>,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            allow_duplicate_loans: true,
            max_loans_per_member: None,
        }
    }
}

/// Library owning its catalog (keyed by ISBN) and its members.
///
/// Members only refer to books by ISBN; every lookup goes through the
/// catalog, so the stored item is always the one mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LibraryRecord")]
pub struct Library {
    name: String,
    books: IndexMap<String, Item>,
    members: Vec<Member>,
    #[serde(skip)]
    policy: LendingPolicy,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_policy(name, LendingPolicy::default())
    }

    pub fn with_policy(name: impl Into<String>, policy: LendingPolicy) -> Self {
        Self {
            name: name.into(),
            books: IndexMap::new(),
            members: Vec::new(),
            policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: LendingPolicy) {
        self.policy = policy;
    }

    pub fn books(&self) -> &IndexMap<String, Item> {
        &self.books
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn book(&self, isbn: &str) -> Option<&Item> {
        self.books.get(isbn)
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.member_id == *member_id)
    }

    /// Number of distinct ISBNs held
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

impl Library {
    /// Add a title to the catalog. A title already held only contributes its
    /// copies; the stored entry (and its variant) is kept.
    pub fn add_book(&mut self, item: impl Into<Item>) -> AppResult<&Item> {
        let item = item.into();
        let isbn = item.isbn().to_string();

        let stored = match self.books.entry(isbn) {
            indexmap::map::Entry::Occupied(entry) => {
                let stored = entry.into_mut();
                let book = stored.book_mut();
                book.copies = book.copies.checked_add(item.copies()).ok_or_else(|| {
                    AppError::BadValue(format!("copy count overflow for ISBN {}", book.isbn))
                })?;
                tracing::info!(
                    "Added {} copies of {} (ISBN {}), now {}",
                    item.copies(),
                    book.title,
                    book.isbn,
                    book.copies
                );
                stored
            }
            indexmap::map::Entry::Vacant(entry) => {
                tracing::info!("Added {} to the library", item.title());
                entry.insert(item)
            }
        };

        Ok(&*stored)
    }

    /// Remove a title from the catalog and return it
    pub fn remove_book(&mut self, isbn: &str) -> AppResult<Item> {
        let item = self.books.shift_remove(isbn).ok_or_else(|| {
            tracing::warn!("ISBN {} not found in the library", isbn);
            AppError::NotFound(format!("Book with ISBN {} not found in the library", isbn))
        })?;

        tracing::info!("Removed {} from the library", item.title());
        Ok(item)
    }

    /// Register a member. Ids must be unique since loans address members by id.
    pub fn add_member(&mut self, member: Member) -> AppResult<()> {
        if self.member(&member.member_id).is_some() {
            return Err(AppError::Duplicate(format!(
                "Member with id {} already exists",
                member.member_id
            )));
        }

        tracing::info!("Added member {} to the library", member.name);
        self.members.push(member);
        Ok(())
    }

    /// Unregister a member and return it
    pub fn remove_member(&mut self, member_id: &MemberId) -> AppResult<Member> {
        let position = self
            .members
            .iter()
            .position(|m| m.member_id == *member_id)
            .ok_or_else(|| {
                tracing::warn!("Member {} not found in the library", member_id);
                AppError::NotFound(format!("Member {} not found in the library", member_id))
            })?;

        let member = self.members.remove(position);
        tracing::info!("Removed member {} from the library", member.name);
        Ok(member)
    }

    /// Lend one copy of the catalog's `isbn` entry to a member
    pub fn lend(&mut self, member_id: &MemberId, isbn: &str) -> AppResult<()> {
        let item = self.books.get_mut(isbn).ok_or_else(|| {
            tracing::warn!("ISBN {} not available in the library", isbn);
            AppError::NotFound(format!("Book with ISBN {} not available in the library", isbn))
        })?;
        let member = find_member_mut(&mut self.members, member_id)?;

        if !self.policy.allow_duplicate_loans && member.has_borrowed(isbn) {
            tracing::warn!("{} already holds {}", member.name, item.title());
            return Err(AppError::AlreadyBorrowed(format!(
                "{} already borrowed {}",
                member.name,
                item.title()
            )));
        }

        if let Some(max) = self.policy.max_loans_per_member {
            if member.borrowed_count() >= max {
                tracing::warn!("{} reached the loan limit", member.name);
                return Err(AppError::MaxLoansReached(format!(
                    "{} has {}/{} loans",
                    member.name,
                    member.borrowed_count(),
                    max
                )));
            }
        }

        member.borrow(item.book_mut())
    }

    /// Take back one copy of the catalog's `isbn` entry from a member
    pub fn return_book(&mut self, member_id: &MemberId, isbn: &str) -> AppResult<()> {
        let item = self.books.get_mut(isbn).ok_or_else(|| {
            tracing::warn!("ISBN {} not recognized by the library", isbn);
            AppError::NotFound(format!("Book with ISBN {} not recognized by the library", isbn))
        })?;
        let member = find_member_mut(&mut self.members, member_id)?;

        member.give_back(item.book_mut())
    }

    pub fn to_mapping(&self) -> AppResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a library from its mapping projection. Any malformed entry
    /// fails the whole document.
    pub fn from_mapping(data: Value) -> AppResult<Self> {
        Ok(serde_json::from_value(data)?)
    }
}

fn find_member_mut<'a>(members: &'a mut [Member], member_id: &MemberId) -> AppResult<&'a mut Member> {
    members
        .iter_mut()
        .find(|m| m.member_id == *member_id)
        .ok_or_else(|| {
            tracing::warn!("Member {} not found in the library", member_id);
            AppError::NotFound(format!("Member {} not found in the library", member_id))
        })
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Library: {}, Books: {}, Members: {}",
            self.name,
            self.book_count(),
            self.member_count()
        )
    }
}

/// Persisted shape; books are re-keyed by their own ISBN on the way in
#[derive(Deserialize)]
struct LibraryRecord {
    name: String,
    books: IndexMap<String, Item>,
    members: Vec<Member>,
}

impl TryFrom<LibraryRecord> for Library {
    type Error = String;

    fn try_from(record: LibraryRecord) -> Result<Self, Self::Error> {
        let mut books: IndexMap<String, Item> = IndexMap::with_capacity(record.books.len());

        for (key, item) in record.books {
            if key != item.isbn() {
                tracing::warn!("Catalog key {} holds ISBN {}, re-keying", key, item.isbn());
            }

            match books.entry(item.isbn().to_string()) {
                // Two keys for one ISBN: merge copies as add_book does
                indexmap::map::Entry::Occupied(entry) => {
                    let book = entry.into_mut().book_mut();
                    book.copies = book
                        .copies
                        .checked_add(item.copies())
                        .ok_or_else(|| format!("copy count overflow for ISBN {}", book.isbn))?;
                    tracing::warn!(
                        "Catalog key {} repeats ISBN {}, merged to {} copies",
                        key,
                        book.isbn,
                        book.copies
                    );
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(item);
                }
            }
        }

        Ok(Self {
            name: record.name,
            books,
            members: record.members,
            policy: LendingPolicy::default(),
        })
    }
}
