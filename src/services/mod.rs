pub mod posters;
pub mod providers;
pub mod recommendations;

pub use posters::{resolve_poster, resolve_posters, DEFAULT_POSTER};
pub use providers::{OmdbProvider, PosterProvider};
