//! Freehand sketch surface with bounded undo history, for embedding in a
//! note-taking host.
//!
//! The host feeds pointer samples into a [`sketch::SketchEngine`], calls
//! [`sketch::SketchEngine::poll`] from its event loop and receives the encoded
//! drawing through a [`sketch::NoteStoreCollaborator`].

pub mod logging;
pub mod sketch;
