//! Storage collaborators behind the preference store.

pub mod file_backend;
pub mod native;
pub mod sync;
pub mod virtual_fs;
