//! In-memory content store
//!
//! Quiz content lives on disk as a tree of JSON documents:
//!
//! ```text
//! games
//! ├── Season_1
//! │   ├── 2019-02-15
//! │   │   ├── game.json
//! │   │   └── overview.json
//! │   ├── 2019-02-18
//! │   │   ├── game.json
//! │   │   └── overview.json
//! │   └── overview.json
//! └── Season_2
//!     └── overview.json
//! ```
//!
//! The whole tree is loaded once at startup into a [`ContentStore`]. The store
//! is never mutated afterwards, so it is shared between request handlers
//! behind an `Arc` without any locking.

pub mod error;
pub mod key;
pub mod store;

pub use error::LoadError;
pub use key::{DocumentKey, DocumentKind};
pub use store::{ContentStore, Document, LoadOptions};
