pub mod author;
pub mod error;
pub mod post;
