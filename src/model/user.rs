//! User records: account data plus enrolled-course and shopping-cart id sets.

use crate::types::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinguished administrator account name. Usernames are case-sensitive keys
/// everywhere except this one, which authorization checks compare ignoring
/// case.
pub const ADMIN_USER_NAME: &str = "Admin";

/// A registered account.
///
/// `user_name` is the primary key and immutable once created. The two id sets
/// may transiently reference a course that no longer exists; course deletion
/// scrubs both sets as part of the same logical operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    pub name: String,
    pub email: String,
    pub address: String,
    /// Enrolled course ids.
    #[serde(default)]
    pub courses: BTreeSet<CourseId>,
    /// Course ids pending checkout.
    #[serde(default)]
    pub shopping_cart: BTreeSet<CourseId>,
    /// Banned accounts are rejected by the façade on login and most operations.
    #[serde(default)]
    pub banned: bool,
}

impl User {
    /// A fresh account with no enrollments and an empty cart.
    pub fn new(user_name: impl Into<String>) -> Self {
        let user_name = user_name.into();
        Self {
            name: user_name.clone(),
            user_name,
            email: String::new(),
            address: String::new(),
            courses: BTreeSet::new(),
            shopping_cart: BTreeSet::new(),
            banned: false,
        }
    }

    /// Whether this account is the distinguished admin account.
    pub fn is_admin(&self) -> bool {
        self.user_name.eq_ignore_ascii_case(ADMIN_USER_NAME)
    }

    /// Replace the cart contents wholesale.
    pub fn replace_cart(&mut self, cart: BTreeSet<CourseId>) {
        self.shopping_cart = cart;
    }

    /// Record a checkout: the purchased ids join the enrolled set and the cart
    /// is emptied entirely, whatever it held. Partial checkout is unsupported.
    pub fn record_purchase(&mut self, purchased: &BTreeSet<CourseId>) {
        self.courses.extend(purchased.iter().copied());
        self.shopping_cart.clear();
    }
}
