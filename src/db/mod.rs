pub mod cache;

pub use cache::{FetchTicket, ResultCache, ResultEntry};
