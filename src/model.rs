//! Entity model: course and user records plus their small value types.

pub mod course;
pub mod user;

pub use course::{Course, Image, Lesson};
pub use user::{User, ADMIN_USER_NAME};
