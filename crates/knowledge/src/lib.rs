//! Knowledge store implementations for Boardroom.
//!
//! Each agent owns one store rooted at `<base>/<agent_id>/knowledge_base/`.
//! Raw sources live in `documents/`; every loaded document is mirrored as a
//! JSON record in `processed/`.

pub mod extract;
pub mod layout;
pub mod processed;
pub mod store;

pub use extract::{DocumentExtractor, FileExtractor};
pub use layout::KnowledgeLayout;
pub use store::SubstringStore;
