//! Core types for the contact book.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact_name;
pub mod id;
pub mod page;
pub mod phone;

pub use contact_name::{ContactName, ContactNameError};
pub use id::*;
pub use page::{Page, PageRequest, PageRequestError};
pub use phone::{PhoneNumber, PhoneNumberError};
