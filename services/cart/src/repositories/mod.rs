//! Repositories over the document store

pub mod cart;
pub mod user;

pub use cart::CartRepository;
pub use user::{UserError, UserRepository};
