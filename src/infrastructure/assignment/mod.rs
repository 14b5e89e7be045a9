//! Assignment infrastructure implementations

mod service;

pub use service::{AssignmentService, GiftPair};
