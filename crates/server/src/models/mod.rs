//! Domain models for the contact book.
//!
//! Row types double as response payloads: their serde shape is the public
//! JSON contract.

pub mod contact;
pub mod user;

pub use contact::{Contact, NewContact};
pub use user::User;
