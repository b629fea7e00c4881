//! Member (borrower) model

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::book::Book;
use crate::error::{AppError, AppResult};

/// Member identifier, persisted as written (`"M1"`, `7` or `1.5`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberId::Number(n) => write!(f, "{}", n),
            MemberId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        MemberId::Text(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        MemberId::Text(s)
    }
}

impl From<i64> for MemberId {
    fn from(n: i64) -> Self {
        MemberId::Number(n.into())
    }
}

/// Library member. Borrowed titles are tracked by ISBN only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub member_id: MemberId,
    pub borrowed_books: Vec<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, member_id: impl Into<MemberId>) -> Self {
        Self {
            name: name.into(),
            member_id: member_id.into(),
            borrowed_books: Vec::new(),
        }
    }

    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed_books
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed_books.len()
    }

    pub fn has_borrowed(&self, isbn: &str) -> bool {
        self.borrowed_books.iter().any(|b| b == isbn)
    }

    /// Take one copy of `book`. Nothing changes when no copy is left.
    pub fn borrow(&mut self, book: &mut Book) -> AppResult<()> {
        if book.copies == 0 {
            tracing::warn!("{} is not available for {}", book.title, self.name);
            return Err(AppError::NotAvailable(format!(
                "{} (ISBN {}) has no copies left",
                book.title, book.isbn
            )));
        }

        self.borrowed_books.push(book.isbn.clone());
        book.copies -= 1;
        tracing::info!("{} borrowed {}", self.name, book.title);
        Ok(())
    }

    /// Hand back one copy of `book`. Nothing changes when the member does not
    /// hold it.
    pub fn give_back(&mut self, book: &mut Book) -> AppResult<()> {
        let position = self
            .borrowed_books
            .iter()
            .position(|b| *b == book.isbn)
            .ok_or_else(|| {
                tracing::warn!("{} did not borrow {}", self.name, book.title);
                AppError::NotBorrowed(format!("{} did not borrow {}", self.name, book.title))
            })?;

        let copies = book.copies.checked_add(1).ok_or_else(|| {
            AppError::BadValue(format!("copy count overflow for ISBN {}", book.isbn))
        })?;

        self.borrowed_books.remove(position);
        book.copies = copies;
        tracing::info!("{} returned {}", self.name, book.title);
        Ok(())
    }

    pub fn to_mapping(&self) -> AppResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Borrowed ISBNs are restored verbatim, without checking any catalog.
    pub fn from_mapping(data: Value) -> AppResult<Self> {
        Ok(serde_json::from_value(data)?)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member: {}, ID: {}, Borrowed Books: {}",
            self.name,
            self.member_id,
            self.borrowed_count()
        )
    }
}
