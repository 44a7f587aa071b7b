//! Dashboard highlights for a personal-finance app.
//!
//! The [`engine`] module is the core: it turns one user's stored transactions
//! into a newest-first history list and three highlight figures (income,
//! expenses and net balance). The remaining modules are the collaborators
//! around it: a local JSON store ([`io`]), the signed-in session ([`auth`])
//! and the registration form ([`register`]).

pub mod auth;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod months;
pub mod register;
pub mod types;
