pub mod types;

pub use types::{Genre, MediaItem, MediaKind, Tab};
