//! Course records and their value types.
//!
//! Field names on disk follow the legacy camelCase layout (`studentsEnrolled`
//! and friends) so existing collection files load unchanged.

use crate::types::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional artwork attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub link: String,
}

/// One unit of course content: a titled video lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub video: String,
}

/// A catalog course.
///
/// The `id` is assigned exactly once by the course store and never changes.
/// Equality is deliberately narrow — `(id, title, description)` — and exists
/// for tests and dedup checks; identity is the id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub image: Option<Image>,
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub students_enrolled: u32,
    /// Case-sensitive tag set, matched by search and the recommender.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub content: Vec<Lesson>,
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.title == other.title && self.description == other.description
    }
}

impl Eq for Course {}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: CourseId, title: &str, description: &str) -> Course {
        Course {
            id,
            image: None,
            title: title.to_string(),
            price: 10.0,
            description: description.to_string(),
            students_enrolled: 0,
            tags: BTreeSet::new(),
            content: Vec::new(),
        }
    }

    #[test]
    fn test_equality_ignores_price_tags_and_content() {
        let a = course(1, "Rust", "systems programming");
        let mut b = course(1, "Rust", "systems programming");
        b.price = 99.0;
        b.students_enrolled = 12;
        b.tags.insert("cs".to_string());
        b.content.push(Lesson {
            title: "intro".to_string(),
            video: "https://example.com/1".to_string(),
        });
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_id_title_description() {
        let a = course(1, "Rust", "systems programming");
        assert_ne!(a, course(2, "Rust", "systems programming"));
        assert_ne!(a, course(1, "Go", "systems programming"));
        assert_ne!(a, course(1, "Rust", "network programming"));
    }

    #[test]
    fn test_serializes_with_legacy_field_names() {
        let mut subject = course(3, "Rust", "systems programming");
        subject.students_enrolled = 7;
        let json = serde_json::to_value(&subject).unwrap();
        assert_eq!(json["studentsEnrolled"], 7);
        assert!(json.get("students_enrolled").is_none());
    }

    #[test]
    fn test_deserializes_with_missing_optional_fields() {
        let json = r#"{"id": 4, "title": "Rust", "price": 5.5, "description": "d"}"#;
        let subject: Course = serde_json::from_str(json).unwrap();
        assert_eq!(subject.id, 4);
        assert!(subject.image.is_none());
        assert!(subject.tags.is_empty());
        assert!(subject.content.is_empty());
        assert_eq!(subject.students_enrolled, 0);
    }
}
