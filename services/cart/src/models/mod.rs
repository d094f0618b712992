//! Cart service models

pub mod cart;
pub mod session;
pub mod user;

// Re-export for convenience
pub use cart::{Cart, CartError, SaveCartRequest};
pub use session::{Session, SessionTable};
pub use user::{Credentials, UserDirectory, UserRecord};
