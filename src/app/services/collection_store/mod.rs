//! Collection store for student records
//!
//! This module holds the authoritative in-memory student collection. The
//! store assigns ids, fills defaults for optional fields, and applies the
//! performance and note sub-operations. Every mutation either completes or
//! leaves the collection untouched, so the store never holds duplicate ids.
//!
//! ## Id assignment
//!
//! New ids are one more than the highest id currently stored, and never lower
//! than one more than the highest id this store has ever issued. Deleting the
//! newest student and adding another therefore never hands out the deleted id
//! again.
//!
//! ## Usage
//!
//! ```rust
//! use roster::app::services::collection_store::StudentStore;
//! use roster::NewStudent;
//!
//! # fn example() -> roster::Result<()> {
//! let mut store = StudentStore::new();
//! let ada = store.add(NewStudent::new("Ada", "ada@example.com", "Mathematics"))?;
//! assert_eq!(ada.id, 1);
//! assert_eq!(store.list().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use store::{RecordDefaults, StoreSnapshot, StudentStore};
