//! Read-side data access.
//!
//! The engine reads sessions, CVs, notes, job descriptions and the question bank through
//! the repository traits in [`repository`]; [`CopilotStore`] bundles them. The engine
//! never writes. [`InMemoryStore`] backs tests and the snapshot runner.

pub mod error;
pub mod memory;
pub mod model;
pub mod repository;


pub use error::StoreError;
pub use memory::{InMemoryStore, StoreSnapshot};
pub use model::{
    CandidateRecord, CvChunkRecord, CvRecord, JobDescriptionRecord, NoteRecord, QuestionRecord,
    QuestionScope, SessionRecord, SessionStatus,
};
pub use repository::{
    CandidateRepository, CopilotStore, CvRepository, JobRepository, NoteRepository,
    QuestionRepository, SessionRepository, StoreResult,
};
