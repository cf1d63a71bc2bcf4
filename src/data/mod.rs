pub mod author_store;
pub mod post_store;
pub mod stores;
