//! Page state machines

pub mod employees;
pub mod voice_simulations;

pub use employees::{AssessmentRow, AssessmentsOutcome, EmployeesPage};
pub use voice_simulations::{
    CallOutcome, RejectReason, VoiceSimulationsPage, VoiceSimulationsSnapshot,
};
