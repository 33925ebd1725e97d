pub mod char_field;
pub mod email_field;

pub use char_field::CharField;
pub use email_field::EmailField;
