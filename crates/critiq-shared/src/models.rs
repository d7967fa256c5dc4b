//! Domain model structs persisted as whole-collection JSON snapshots.
//!
//! Field names serialize in camelCase so the durable format matches what
//! the UI layer consumes directly.  Every struct derives `Serialize` and
//! `Deserialize` so collections can be handed to the snapshot store as-is.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The closed set of review categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movies,
    Books,
    Shoes,
    Electronics,
    Restaurants,
    Games,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Movies,
        Category::Books,
        Category::Shoes,
        Category::Electronics,
        Category::Restaurants,
        Category::Games,
    ];

    /// The lowercase name used in snapshots and search matching.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Books => "books",
            Category::Shoes => "shoes",
            Category::Electronics => "electronics",
            Category::Restaurants => "restaurants",
            Category::Games => "games",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The current-session user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique identifier, generated at creation.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Email address as entered at login / registration.
    pub email: String,
    /// Avatar URL, derived deterministically from an identifying seed.
    pub avatar: String,
    /// When this identity was created.
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Snapshot of the author-facing fields, copied by value onto reviews
    /// and comments at creation time.  Deliberately not a live reference:
    /// later profile edits do not rewrite existing authorship display.
    pub fn author(&self) -> Author {
        Author {
            id: self.id.clone(),
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Author snapshot embedded in a [`Review`] or [`Comment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub username: String,
    pub avatar: String,
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// A published review.
///
/// Invariants maintained by the content store:
/// `likes == liked_by.len()` and `updated_at >= created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Opaque unique identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Star rating, 1..=5.
    pub rating: u8,
    /// Image references, exclusively owned by the review.
    pub images: Vec<String>,
    /// Author snapshot copied at creation time.
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Like count; always equals `liked_by.len()`.
    pub likes: u32,
    /// User ids who liked this review; each appears at most once.
    pub liked_by: Vec<String>,
    /// Free-text tags, in author order.
    pub tags: Vec<String>,
    /// "Pro" points, in author order.
    pub pros: Vec<String>,
    /// "Con" points, in author order.
    pub cons: Vec<String>,
}

/// Caller-supplied fields for a new review.  Identifier, timestamps, and
/// like state are assigned by the store.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub rating: u8,
    pub images: Vec<String>,
    pub author: Author,
    pub tags: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Partial update for an existing review; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub rating: Option<u8>,
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub pros: Option<Vec<String>>,
    pub cons: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A comment on a review.  Never edited or deleted once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Opaque unique identifier.
    pub id: String,
    /// The review this comment belongs to.  Foreign reference only; the
    /// store does not cascade-delete comments when the review goes away.
    pub review_id: String,
    /// Author snapshot copied at creation time.
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Like count; always equals `liked_by.len()`.
    pub likes: u32,
    /// User ids who liked this comment; each appears at most once.
    pub liked_by: Vec<String>,
}

/// Caller-supplied fields for a new comment.
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub review_id: String,
    pub author: Author,
    pub content: String,
}

/// Per-category review counts, covering only categories actually present.
pub type CategoryStats = HashMap<Category, usize>;
