//! Ordering Policies
//!
//! Pluggable total orders over courses, composable by chaining tie-breaks.
//! The stores compose these into the catalog order (popularity descending,
//! ties alphabetical) and the price-filtered order (price descending, then
//! popularity, then title).

use crate::model::Course;
use std::cmp::Ordering;

/// A total order over courses.
pub trait CourseOrder {
    fn compare(&self, a: &Course, b: &Course) -> Ordering;

    /// Chain a secondary order that breaks this one's ties.
    fn then<O: CourseOrder>(self, tie_break: O) -> Chained<Self, O>
    where
        Self: Sized,
    {
        Chained {
            primary: self,
            tie_break,
        }
    }
}

/// Alphabetical by title, ascending. Case-sensitive.
pub struct ByTitle;

impl CourseOrder for ByTitle {
    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        a.title.cmp(&b.title)
    }
}

/// Decreasing popularity (students enrolled).
pub struct ByPopularity;

impl CourseOrder for ByPopularity {
    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        b.students_enrolled.cmp(&a.students_enrolled)
    }
}

/// Decreasing price.
pub struct ByPrice;

impl CourseOrder for ByPrice {
    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        b.price.total_cmp(&a.price)
    }
}

/// Two orders chained: the second decides when the first reports a tie.
pub struct Chained<A, B> {
    primary: A,
    tie_break: B,
}

impl<A: CourseOrder, B: CourseOrder> CourseOrder for Chained<A, B> {
    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        self.primary
            .compare(a, b)
            .then_with(|| self.tie_break.compare(a, b))
    }
}

/// Default catalog order: popularity descending, ties alphabetical by title.
pub fn catalog() -> impl CourseOrder {
    ByPopularity.then(ByTitle)
}

/// Order for price-filtered results: price descending, then popularity
/// descending, then title.
pub fn price_filtered() -> impl CourseOrder {
    ByPrice.then(ByPopularity.then(ByTitle))
}

/// Sort a course slice by the given order.
pub fn sort_by(courses: &mut [Course], order: &impl CourseOrder) {
    courses.sort_by(|a, b| order.compare(a, b));
}
