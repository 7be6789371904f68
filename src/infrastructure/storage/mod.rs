//! Output storage implementations

pub mod media_dir;

pub use media_dir::MediaDirStore;
