pub mod dump;
pub mod movie_loader;
pub mod rewrite;
