//! `ScamShield` dashboard page state
//!
//! UI-facing state machines for the Voice Simulations and Employee Security
//! Assessments pages. Rendering is left to whichever front end drives them;
//! outcomes are reported through [`Notifier`] events.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod components;
pub mod error;
pub mod notification;
pub mod pages;
pub mod state;

pub use error::{Result, WebError};
pub use notification::{Notification, NotificationKind, Notifier};
pub use pages::{CallOutcome, EmployeesPage, RejectReason, VoiceSimulationsPage};
pub use state::AppState;
