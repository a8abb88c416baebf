//! User Store
//!
//! Owns the authoritative username -> user map, cart and enrollment mutation,
//! and the whole-file write-through. Checkout reaches across to the course
//! store to bump enrollment counters; cart and enrolled-course views resolve
//! ids to full course records the same way.

use crate::error::{StorageError, StoreError};
use crate::model::{Course, User};
use crate::persistence;
use crate::store::course::CourseStore;
use crate::types::CourseId;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, info};

pub struct UserStore {
    path: PathBuf,
    users: Mutex<BTreeMap<String, User>>,
    courses: OnceLock<Weak<CourseStore>>,
}

impl UserStore {
    /// Bulk-load the user collection from `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records: Vec<User> = persistence::load_collection(&path)?;
        let mut users = BTreeMap::new();
        for user in records {
            users.insert(user.user_name.clone(), user);
        }
        info!(count = users.len(), path = %path.display(), "loaded user collection");
        Ok(Self {
            path,
            users: Mutex::new(users),
            courses: OnceLock::new(),
        })
    }

    pub(crate) fn attach_courses(&self, courses: &Arc<CourseStore>) {
        let _ = self.courses.set(Arc::downgrade(courses));
    }

    fn course_store(&self) -> Result<Arc<CourseStore>, StoreError> {
        self.courses
            .get()
            .and_then(Weak::upgrade)
            .ok_or(StoreError::NotWired("course"))
    }

    /// Case-sensitive point lookup. Login is this plus a banned check in the
    /// façade.
    pub fn get(&self, user_name: &str) -> Option<User> {
        self.users.lock().get(user_name).cloned()
    }

    /// Register a new user. A taken username is a conflict and leaves the
    /// existing record untouched.
    pub fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.lock();
        if users.contains_key(&user.user_name) {
            return Err(StoreError::UserExists(user.user_name));
        }
        users.insert(user.user_name.clone(), user.clone());
        self.save(&users)?;
        debug!(user = %user.user_name, "created user");
        Ok(user)
    }

    /// Whole-record replace keyed by the submitted record's username. Ban and
    /// unban are ordinary updates through here: read, flip the flag, resubmit.
    pub fn update(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.lock();
        if !users.contains_key(&user.user_name) {
            return Err(StoreError::UserNotFound(user.user_name));
        }
        users.insert(user.user_name.clone(), user.clone());
        self.save(&users)?;
        debug!(user = %user.user_name, "updated user");
        Ok(user)
    }

    /// Snapshot of every user, in username order.
    pub fn list_all(&self) -> Vec<User> {
        self.users.lock().values().cloned().collect()
    }

    /// The user's enrolled courses resolved to full records via the course
    /// store. Ids that no longer resolve are dropped from the view.
    pub fn enrolled_courses(&self, user_name: &str) -> Result<Vec<Course>, StoreError> {
        let courses = self.course_store()?;
        let ids = self.course_ids(user_name, |user| user.courses.clone())?;
        Ok(ids.iter().filter_map(|&id| courses.get(id)).collect())
    }

    /// The user's shopping cart resolved to full records.
    pub fn cart(&self, user_name: &str) -> Result<Vec<Course>, StoreError> {
        let courses = self.course_store()?;
        let ids = self.course_ids(user_name, |user| user.shopping_cart.clone())?;
        Ok(ids.iter().filter_map(|&id| courses.get(id)).collect())
    }

    fn course_ids(
        &self,
        user_name: &str,
        select: impl FnOnce(&User) -> BTreeSet<CourseId>,
    ) -> Result<BTreeSet<CourseId>, StoreError> {
        let users = self.users.lock();
        users
            .get(user_name)
            .map(select)
            .ok_or_else(|| StoreError::UserNotFound(user_name.to_string()))
    }

    /// Clear and replace the cart set, then persist. `Ok(false)` when the user
    /// is absent.
    pub fn replace_cart(
        &self,
        user_name: &str,
        cart: BTreeSet<CourseId>,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.lock();
        let Some(user) = users.get_mut(user_name) else {
            return Ok(false);
        };
        user.replace_cart(cart);
        self.save(&users)?;
        Ok(true)
    }

    /// Check a user out: bump each purchased course's enrollment through the
    /// course store (one write per id, non-batched), move the ids into the
    /// enrolled set, and empty the cart entirely — partial checkout is not
    /// supported. Returns the updated user.
    ///
    /// The course-side bumps land in the catalog file before the user file is
    /// rewritten; the two stores' locks are taken one after the other, never
    /// nested, and the writes are not a joint transaction.
    pub fn checkout(
        &self,
        user_name: &str,
        purchased: &BTreeSet<CourseId>,
    ) -> Result<User, StoreError> {
        let courses = self.course_store()?;
        if !self.users.lock().contains_key(user_name) {
            return Err(StoreError::UserNotFound(user_name.to_string()));
        }

        for &id in purchased {
            courses.record_enrollment(id)?;
        }

        let mut users = self.users.lock();
        let Some(user) = users.get_mut(user_name) else {
            return Err(StoreError::UserNotFound(user_name.to_string()));
        };
        user.record_purchase(purchased);
        let snapshot = user.clone();
        self.save(&users)?;
        debug!(user = user_name, count = purchased.len(), "checked out");
        Ok(snapshot)
    }

    /// Cascade target for course deletion: drop `id` from every user's cart
    /// and enrolled sets and rewrite the file once. No orphan references
    /// persist past a delete.
    pub(crate) fn scrub_course(&self, id: CourseId) -> Result<(), StoreError> {
        let mut users = self.users.lock();
        for user in users.values_mut() {
            user.courses.remove(&id);
            user.shopping_cart.remove(&id);
        }
        debug!(id, "scrubbed course from user sets");
        self.save(&users)
    }

    fn save(&self, users: &BTreeMap<String, User>) -> Result<(), StoreError> {
        let records: Vec<User> = users.values().cloned().collect();
        persistence::save_collection(&self.path, &records)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn empty_store(dir: &tempfile::TempDir) -> UserStore {
        let path = dir.path().join("users.json");
        fs::write(&path, "[]").unwrap();
        UserStore::load(&path).unwrap()
    }

    #[test]
    fn test_create_then_get_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        store.create(User::new("Bob")).unwrap();

        assert!(store.get("Bob").is_some());
        assert!(store.get("bob").is_none());
    }

    #[test]
    fn test_create_duplicate_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        store.create(User::new("bob")).unwrap();

        let mut second = User::new("bob");
        second.email = "other@example.com".to_string();
        let result = store.create(second);

        assert!(matches!(result, Err(StoreError::UserExists(name)) if name == "bob"));
        // The original record survives the conflict.
        assert_eq!(store.get("bob").unwrap().email, "");
    }

    #[test]
    fn test_update_absent_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let result = store.update(User::new("ghost"));
        assert!(matches!(result, Err(StoreError::UserNotFound(name)) if name == "ghost"));
    }

    #[test]
    fn test_ban_is_an_ordinary_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        store.create(User::new("bob")).unwrap();

        let mut banned = store.get("bob").unwrap();
        banned.banned = true;
        store.update(banned).unwrap();
        assert!(store.get("bob").unwrap().banned);

        let mut unbanned = store.get("bob").unwrap();
        unbanned.banned = false;
        store.update(unbanned).unwrap();
        assert!(!store.get("bob").unwrap().banned);
    }

    #[test]
    fn test_replace_cart_on_absent_user_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let replaced = store.replace_cart("ghost", BTreeSet::from([1])).unwrap();
        assert!(!replaced);
    }

    #[test]
    fn test_cart_resolution_without_wiring_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        store.create(User::new("bob")).unwrap();
        let result = store.cart("bob");
        assert!(matches!(result, Err(StoreError::NotWired("course"))));
    }

    #[test]
    fn test_list_all_is_in_username_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        for name in ["carol", "alice", "bob"] {
            store.create(User::new(name)).unwrap();
        }
        let names: Vec<String> = store.list_all().into_iter().map(|u| u.user_name).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }
}
