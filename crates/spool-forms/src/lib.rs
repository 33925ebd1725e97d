//! Form processing and validation for the Spool waitlist
//!
//! This crate provides the pieces the waitlist form is assembled from:
//! - Field definitions ([`CharField`], [`EmailField`]) with required checks
//! - The email shape validator used before any submission
//! - [`WaitlistForm`], the two-field form and its [`ValidationError`] taxonomy
//!
//! Validation is purely local. Nothing in this crate talks to a record store.

pub mod field;
pub mod fields;
pub mod form;
pub mod validators;

pub use field::{FieldError, FieldResult, FormField, Widget};
pub use fields::{CharField, EmailField};
pub use form::{Signup, ValidationError, WaitlistForm};
pub use validators::{EmailShapeValidator, INVALID_EMAIL_MESSAGE};
