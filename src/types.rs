//! Core types for the course and user stores.

/// CourseId: store-assigned course identifier, unique per store instance
pub type CourseId = u32;
