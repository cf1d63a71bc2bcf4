pub mod authors;
pub mod posts;
