//! Clients for the remote catalog REST endpoints

pub mod books;

pub use books::{BookApi, BooksClient};

#[cfg(test)]
pub use books::MockBookApi;
