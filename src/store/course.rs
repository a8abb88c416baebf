//! Course Store
//!
//! Owns the authoritative id -> course map, id assignment, search and
//! recommendation scoring, and the whole-file write-through. Deleting a course
//! cascades into the user store, scrubbing the id from every cart and enrolled
//! set.

use crate::error::{StorageError, StoreError};
use crate::model::{Course, User};
use crate::ordering;
use crate::persistence;
use crate::store::user::UserStore;
use crate::types::CourseId;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, info, warn};

pub struct CourseStore {
    path: PathBuf,
    courses: Mutex<BTreeMap<CourseId, Course>>,
    /// Next id to hand out. Guarded independently of the collection lock so
    /// concurrent creates never collide on an id.
    next_id: AtomicU32,
    users: OnceLock<Weak<UserStore>>,
}

impl CourseStore {
    /// Bulk-load the catalog from `path` and set the id counter to one past
    /// the maximum loaded id (1 for an empty file). Ids are never reused for
    /// the lifetime of this counter, even across deletes.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records: Vec<Course> = persistence::load_collection(&path)?;
        let mut courses = BTreeMap::new();
        let mut max_id = 0;
        for course in records {
            max_id = max_id.max(course.id);
            courses.insert(course.id, course);
        }
        info!(count = courses.len(), path = %path.display(), "loaded course catalog");
        Ok(Self {
            path,
            courses: Mutex::new(courses),
            next_id: AtomicU32::new(max_id + 1),
            users: OnceLock::new(),
        })
    }

    pub(crate) fn attach_users(&self, users: &Arc<UserStore>) {
        let _ = self.users.set(Arc::downgrade(users));
    }

    fn user_store(&self) -> Result<Arc<UserStore>, StoreError> {
        self.users
            .get()
            .and_then(Weak::upgrade)
            .ok_or(StoreError::NotWired("user"))
    }

    /// Snapshot of the whole catalog in catalog order (popularity descending,
    /// ties alphabetical by title).
    pub fn list_all(&self) -> Vec<Course> {
        self.search(None)
    }

    /// Text search with a numeric price fallback.
    ///
    /// `None` behaves like [`Self::list_all`]. A course matches textually when
    /// its title or description contains the query case-insensitively, or its
    /// tag set holds the literal lowercase of the query; textual results come
    /// back in catalog order. Only when *zero* courses match textually and the
    /// query parses as a number does the price branch run instead: every
    /// course priced at or under that number, in price-filtered order. The two
    /// branches are mutually exclusive within one call.
    pub fn search(&self, query: Option<&str>) -> Vec<Course> {
        let courses = self.courses.lock();
        let Some(query) = query else {
            let mut all: Vec<Course> = courses.values().cloned().collect();
            drop(courses);
            ordering::sort_by(&mut all, &ordering::catalog());
            return all;
        };

        let needle = query.to_lowercase();
        let mut matched: Vec<Course> = courses
            .values()
            .filter(|course| Self::matches_text(course, &needle))
            .cloned()
            .collect();

        if matched.is_empty() {
            if let Ok(ceiling) = query.trim().parse::<f64>() {
                let mut in_budget: Vec<Course> = courses
                    .values()
                    .filter(|course| course.price <= ceiling)
                    .cloned()
                    .collect();
                drop(courses);
                ordering::sort_by(&mut in_budget, &ordering::price_filtered());
                return in_budget;
            }
        }

        drop(courses);
        ordering::sort_by(&mut matched, &ordering::catalog());
        matched
    }

    fn matches_text(course: &Course, needle: &str) -> bool {
        course.title.to_lowercase().contains(needle)
            || course.description.to_lowercase().contains(needle)
            || course.tags.contains(needle)
    }

    /// Point lookup by id.
    pub fn get(&self, id: CourseId) -> Option<Course> {
        self.courses.lock().get(&id).cloned()
    }

    /// Insert a new course under a freshly assigned id; the caller-supplied id
    /// is ignored. Returns the stored copy.
    ///
    /// If the write-through fails the insert stands: the caller sees the
    /// storage error and the file lags the map until the next successful save.
    pub fn create(&self, course: Course) -> Result<Course, StoreError> {
        let mut courses = self.courses.lock();
        let id = self.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        let stored = Course { id, ..course };
        courses.insert(id, stored.clone());
        self.save(&courses)?;
        debug!(id, title = %stored.title, "created course");
        Ok(stored)
    }

    /// Whole-record replace keyed by the submitted record's id. No per-field
    /// merge.
    pub fn update(&self, course: Course) -> Result<Course, StoreError> {
        let mut courses = self.courses.lock();
        if !courses.contains_key(&course.id) {
            return Err(StoreError::CourseNotFound(course.id));
        }
        courses.insert(course.id, course.clone());
        self.save(&courses)?;
        debug!(id = course.id, "updated course");
        Ok(course)
    }

    /// Remove a course and scrub its id from every user's cart and enrolled
    /// sets. Returns `Ok(false)` if the id was absent; no cascade is attempted
    /// then.
    ///
    /// The two stores' locks are taken one after the other, never nested, so
    /// the catalog file can briefly reflect the removal before the users file
    /// drops the references. Accepted weak consistency, not a joint
    /// transaction.
    pub fn delete(&self, id: CourseId) -> Result<bool, StoreError> {
        let users = self.user_store()?;
        {
            let mut courses = self.courses.lock();
            if courses.remove(&id).is_none() {
                return Ok(false);
            }
            self.save(&courses)?;
        }
        users.scrub_course(id)?;
        debug!(id, "deleted course");
        Ok(true)
    }

    /// Tag-overlap recommendations for `user`; empty when no user is given.
    ///
    /// Every course outside the user's enrolled set scores one hit per
    /// (enrolled course, shared tag) pair. Courses with no shared tag at all
    /// are left out of the result rather than reported with a zero score.
    /// Results come back by descending score; ties go to the *less* popular
    /// course first. The list is not capped — trimming is the caller's job.
    pub fn recommendations_for(&self, user: Option<&User>) -> Vec<Course> {
        let Some(user) = user else {
            return Vec::new();
        };

        let courses = self.courses.lock();
        let enrolled: Vec<&Course> = user
            .courses
            .iter()
            .filter_map(|id| courses.get(id))
            .collect();

        let mut scored: Vec<(Course, usize)> = Vec::new();
        for candidate in courses.values() {
            if user.courses.contains(&candidate.id) {
                continue;
            }
            let hits: usize = enrolled
                .iter()
                .map(|course| course.tags.intersection(&candidate.tags).count())
                .sum();
            if hits > 0 {
                scored.push((candidate.clone(), hits));
            }
        }
        drop(courses);

        scored.sort_by(|(a, a_hits), (b, b_hits)| {
            b_hits
                .cmp(a_hits)
                .then_with(|| a.students_enrolled.cmp(&b.students_enrolled))
        });
        scored.into_iter().map(|(course, _)| course).collect()
    }

    /// Count one more enrollment on `id` and persist through this store's own
    /// write path. An id that no longer resolves is skipped: checkout treats
    /// it as a transient orphan reference.
    pub(crate) fn record_enrollment(&self, id: CourseId) -> Result<(), StoreError> {
        let mut courses = self.courses.lock();
        match courses.get_mut(&id) {
            Some(course) => course.students_enrolled += 1,
            None => {
                warn!(id, "enrollment bump skipped: course no longer exists");
                return Ok(());
            }
        }
        self.save(&courses)
    }

    /// Rewrite the whole catalog file from the locked map, in catalog order.
    fn save(&self, courses: &BTreeMap<CourseId, Course>) -> Result<(), StoreError> {
        let mut records: Vec<Course> = courses.values().cloned().collect();
        ordering::sort_by(&mut records, &ordering::catalog());
        persistence::save_collection(&self.path, &records)?;
        Ok(())
    }
}
