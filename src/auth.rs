//! Session handling on top of the local store.
//!
//! The hosted identity provider performs the actual sign-in. What reaches
//! this module is its outcome: a profile on success, nothing on cancel. The
//! profile is kept under [`USER_KEY`] so the next launch starts signed in.

use anyhow::Result;

use crate::io::{JsonStore, USER_KEY};
use crate::types::User;

/// Result of the provider's sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    Success(User),
    Cancel,
}

/// The signed-in user, if any.
pub fn current_user(store: &JsonStore) -> Result<Option<User>> {
    store.get_item(USER_KEY)
}

/// Applies a sign-in outcome. Returns the user that is now signed in; a
/// cancelled flow leaves the session untouched and returns `None`.
pub fn sign_in(store: &mut JsonStore, outcome: SignInOutcome) -> Result<Option<User>> {
    match outcome {
        SignInOutcome::Success(user) => {
            store.set_item(USER_KEY, &user)?;
            tracing::info!(user = %user.id, "signed in");
            Ok(Some(user))
        }
        SignInOutcome::Cancel => {
            tracing::info!("sign-in cancelled");
            Ok(None)
        }
    }
}

/// Ends the session. The user's transactions stay in the store.
pub fn sign_out(store: &mut JsonStore) -> bool {
    let removed = store.remove_item(USER_KEY);
    if removed {
        tracing::info!("signed out");
    }
    removed
}
