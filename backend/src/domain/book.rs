//! Book records and their validated inputs.
//!
//! ## Invariants
//! - `title`, `description`, and `author` are non-blank.
//! - At most one book carries a given title; repositories enforce this.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation failures for book payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookValidationError {
    /// A required field was absent.
    #[error("{field} is required")]
    Missing { field: &'static str },
    /// A text field was empty or whitespace only.
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
}

impl BookValidationError {
    /// Name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            Self::Missing { field } | Self::Blank { field } => field,
        }
    }

    /// Machine-readable reason for error details.
    pub fn code(self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::Blank { .. } => "blank_field",
        }
    }
}

/// Opaque book identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Allocate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::str::FromStr for BookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored book, serialised as `{ id, title, description, author, year }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Book {
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: BookId,
    #[schema(example = "Dune")]
    title: String,
    #[schema(example = "Desert planet politics")]
    description: String,
    #[schema(example = "Frank Herbert")]
    author: String,
    #[schema(example = 1965)]
    year: i32,
}

impl Book {
    /// Materialise a book from validated fields.
    pub fn new(id: BookId, fields: NewBook) -> Self {
        let NewBook {
            title,
            description,
            author,
            year,
        } = fields;
        Self {
            id,
            title,
            description,
            author,
            year,
        }
    }

    /// Identifier.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Unique title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Author name.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Publication year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(author) = &patch.author {
            self.author.clone_from(author);
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }
}

fn require_text(field: &'static str, value: Option<String>) -> Result<String, BookValidationError> {
    let value = value.ok_or(BookValidationError::Missing { field })?;
    non_blank(field, value)
}

fn non_blank(field: &'static str, value: String) -> Result<String, BookValidationError> {
    if value.trim().is_empty() {
        return Err(BookValidationError::Blank { field });
    }
    Ok(value)
}

/// Validated fields for a book that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    description: String,
    author: String,
    year: i32,
}

impl NewBook {
    /// Validate raw request values; every field is required.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{BookValidationError, NewBook};
    ///
    /// let err = NewBook::try_from_parts(Some("Dune".into()), None, Some("Herbert".into()), Some(1965))
    ///     .unwrap_err();
    /// assert_eq!(err, BookValidationError::Missing { field: "description" });
    /// ```
    pub fn try_from_parts(
        title: Option<String>,
        description: Option<String>,
        author: Option<String>,
        year: Option<i32>,
    ) -> Result<Self, BookValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            description: require_text("description", description)?,
            author: require_text("author", author)?,
            year: year.ok_or(BookValidationError::Missing { field: "year" })?,
        })
    }

    /// Proposed title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// Validated partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    year: Option<i32>,
}

impl BookPatch {
    /// Validate the supplied fields of a partial update.
    pub fn try_from_parts(
        title: Option<String>,
        description: Option<String>,
        author: Option<String>,
        year: Option<i32>,
    ) -> Result<Self, BookValidationError> {
        Ok(Self {
            title: title.map(|v| non_blank("title", v)).transpose()?,
            description: description
                .map(|v| non_blank("description", v))
                .transpose()?,
            author: author.map(|v| non_blank("author", v)).transpose()?,
            year,
        })
    }

    /// Replacement title, if supplied.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replacement description, if supplied.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replacement author, if supplied.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Replacement year, if supplied.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.year.is_none()
    }
}
