pub mod pages;

pub use pages::{StaticFetcher, index_entry, index_page};
