//! # critiq-shared
//!
//! Domain types and small utilities shared across the Critiq crates: the
//! `User` / `Review` / `Comment` models, the closed category set, identifier
//! generation, and application-wide constants.
//!
//! This crate is a leaf.  It knows nothing about persistence or the UI; the
//! store crate owns the collections, this crate only defines their shape.

pub mod constants;
pub mod ids;
pub mod models;

pub use models::{
    Author, Category, Comment, CommentDraft, Review, ReviewDraft, ReviewPatch, User,
};
