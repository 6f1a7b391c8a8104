// ABOUTME: Dealdraft editor library - editable document surface with debounced autosave
// ABOUTME: Synchronizes in-place edits of the current draft back into the request store

pub mod autosave;
pub mod debounce;
pub mod surface;

pub use autosave::{AutosaveConfig, AutosaveController, SaveState};
pub use debounce::Debouncer;
pub use surface::{DocumentSurface, EditableField};
