//! Book, EBook and the catalog item variant

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Printed title held by the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    /// Units currently available for lending
    pub copies: u32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        copies: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            copies,
        }
    }

    pub fn to_mapping(&self) -> AppResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_mapping(data: Value) -> AppResult<Self> {
        Ok(serde_json::from_value(data)?)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book: {} by {}, ISBN: {}, Copies: {}",
            self.title, self.author, self.isbn, self.copies
        )
    }
}

/// Electronic title, lent the same way as a printed one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EBook {
    pub book: Book,
    /// e.g. "PDF", "EPUB"
    pub file_format: String,
}

impl EBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        copies: u32,
        file_format: impl Into<String>,
    ) -> Self {
        Self {
            book: Book::new(title, author, isbn, copies),
            file_format: file_format.into(),
        }
    }

    pub fn to_mapping(&self) -> AppResult<Value> {
        let mut mapping = self.book.to_mapping()?;
        if let Value::Object(fields) = &mut mapping {
            fields.insert("file_format".to_string(), Value::String(self.file_format.clone()));
        }
        Ok(mapping)
    }

    pub fn from_mapping(data: Value) -> AppResult<Self> {
        let file_format = data
            .get("file_format")
            .ok_or_else(|| AppError::MissingField("file_format".to_string()))?
            .as_str()
            .ok_or_else(|| AppError::BadValue("file_format must be a string".to_string()))?
            .to_string();
        let book = Book::from_mapping(data)?;
        Ok(Self { book, file_format })
    }
}

impl fmt::Display for EBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EBook: {} by {}, ISBN: {}, Copies: {}, Format: {}",
            self.book.title, self.book.author, self.book.isbn, self.book.copies, self.file_format
        )
    }
}

/// Persisted discriminator of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Book,
    Ebook,
}

/// Catalog entry: either variant, keyed by ISBN in a library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub enum Item {
    Book(Book),
    EBook(EBook),
}

impl Item {
    pub fn book(&self) -> &Book {
        match self {
            Item::Book(book) => book,
            Item::EBook(ebook) => &ebook.book,
        }
    }

    pub fn book_mut(&mut self) -> &mut Book {
        match self {
            Item::Book(book) => book,
            Item::EBook(ebook) => &mut ebook.book,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Book(_) => ItemKind::Book,
            Item::EBook(_) => ItemKind::Ebook,
        }
    }

    pub fn is_ebook(&self) -> bool {
        matches!(self, Item::EBook(_))
    }

    pub fn title(&self) -> &str {
        &self.book().title
    }

    pub fn author(&self) -> &str {
        &self.book().author
    }

    pub fn isbn(&self) -> &str {
        &self.book().isbn
    }

    pub fn copies(&self) -> u32 {
        self.book().copies
    }

    pub fn file_format(&self) -> Option<&str> {
        match self {
            Item::Book(_) => None,
            Item::EBook(ebook) => Some(&ebook.file_format),
        }
    }

    pub fn to_mapping(&self) -> AppResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild the matching variant. Records without `kind` are EBooks when
    /// they carry `file_format`.
    pub fn from_mapping(data: Value) -> AppResult<Self> {
        Ok(serde_json::from_value(data)?)
    }
}

impl From<Book> for Item {
    fn from(book: Book) -> Self {
        Item::Book(book)
    }
}

impl From<EBook> for Item {
    fn from(ebook: EBook) -> Self {
        Item::EBook(ebook)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Book(book) => book.fmt(f),
            Item::EBook(ebook) => ebook.fmt(f),
        }
    }
}

/// Flat on-disk shape shared by both variants
#[derive(Debug, Serialize, Deserialize)]
struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<ItemKind>,
    title: String,
    author: String,
    #[serde(rename = "ISBN")]
    isbn: String,
    copies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_format: Option<String>,
}

impl TryFrom<ItemRecord> for Item {
    type Error = String;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let book = Book {
            title: record.title,
            author: record.author,
            isbn: record.isbn,
            copies: record.copies,
        };

        let kind = record.kind.unwrap_or(if record.file_format.is_some() {
            ItemKind::Ebook
        } else {
            ItemKind::Book
        });

        match (kind, record.file_format) {
            (ItemKind::Book, None) => Ok(Item::Book(book)),
            (ItemKind::Book, Some(file_format)) => Err(format!(
                "ISBN {} is tagged as a book but has file_format {}",
                book.isbn, file_format
            )),
            (ItemKind::Ebook, Some(file_format)) => Ok(Item::EBook(EBook { book, file_format })),
            // Same wording as serde so the error maps to AppError::MissingField
            (ItemKind::Ebook, None) => Err("missing field `file_format`".to_string()),
        }
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        let kind = Some(item.kind());
        let (book, file_format) = match item {
            Item::Book(book) => (book, None),
            Item::EBook(ebook) => (ebook.book, Some(ebook.file_format)),
        };

        ItemRecord {
            kind,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            copies: book.copies,
            file_format,
        }
    }
}
