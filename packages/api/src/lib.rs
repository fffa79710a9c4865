//! # API crate — identity and journaling services over the object store
//!
//! This crate is what the UI layers talk to. It owns account and session
//! lifecycle, journal entry persistence and aggregates, the theme
//! preference, and the affirmations catalog, all layered on the `store`
//! crate's tables and slots.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Signup, login, logout, and current-session lookup; Argon2 password hashing |
//! | [`journal`] | Mood/gratitude journal entries, weekly and per-mood statistics, plain-text export |
//! | [`models`] | The `user` table record and its client-safe session projection |
//! | [`prefs`] | The per-device dark/light theme preference |
//! | [`affirmations`] | The built-in affirmations library |
//!
//! Services are constructed once with a [`store::Storage`] backend and
//! passed by reference to UI code; there are no process-wide singletons.

pub mod affirmations;
pub mod auth;
pub mod journal;
pub mod models;
pub mod prefs;

pub use auth::{AuthError, AuthService};
pub use journal::{
    JournalEntry, JournalError, JournalService, JournalStats, Mood, NewEntry,
};
pub use models::{SessionUser, User};
pub use prefs::{Preferences, Theme};
