//! Course and User Stores
//!
//! Each store owns one in-memory collection mirrored by a flat JSON file and
//! guards it with a single coarse lock covering every read-modify-write-and-
//! persist sequence. The two stores hold non-owning back-references to each
//! other for the handful of cross-entity operations (cascade delete, checkout
//! enrollment bumps, cart and enrolled-course resolution); those references
//! are connected exactly once via [`wire`].

pub mod course;
pub mod user;

pub use course::CourseStore;
pub use user::UserStore;

use std::sync::Arc;

/// Connect the two stores' back-references.
///
/// Call once after constructing both stores. Cross-entity operations fail with
/// [`crate::error::StoreError::NotWired`] until this has run. The references
/// are weak, so wiring creates no ownership cycle; dropping one store simply
/// makes the other's cross-entity operations report `NotWired` again.
pub fn wire(courses: &Arc<CourseStore>, users: &Arc<UserStore>) {
    courses.attach_users(users);
    users.attach_courses(courses);
}
