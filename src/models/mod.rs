//! Simulation domain models.
//!
//! Input types for the three pipeline stages. All are plain data: the
//! simulators own any mutable run state and build it fresh per call.
//!
//! # Stage Mappings
//!
//! | Type | Stage | Pipeline analogy |
//! |---------|---------------|-----------------------|
//! | Service | Build | Container image build |
//! | Request | Load balance | Incoming CI trigger |
//! | Server | Load balance | Runner instance |
//! | Process | Scheduling | Queued CI job |

mod process;
mod request;
mod server;
mod service;

pub use process::Process;
pub use request::Request;
pub use server::Server;
pub use service::Service;
