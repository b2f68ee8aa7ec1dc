//! HTTP client for the `ScamShield` training backend
//!
//! Wraps the employee directory (`/employees`, assessments) and the call
//! simulation endpoints (`/simulate-call`, `/call-status`). Every operation
//! converts transport failures into a typed [`ClientError`] whose message
//! names the failed operation.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod client;
pub mod directory;
pub mod error;
pub mod mock;
pub mod response;
pub mod simulation;
pub mod transport;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult, HttpStatusError};
pub use mock::{MockReply, MockTransport};
pub use simulation::INITIATION_FAILED;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport, TransportError};
