//! Gift assignment engine
//!
//! Pure functions: shuffle a team's members and decide who gives to whom.
//! Persisting the result is the job of the assignment service.

mod engine;
mod strategy;

pub use engine::{
    assign_gifts, draw_recipients, fisher_yates, AssignmentError, MIN_ASSIGNABLE_MEMBERS,
};
pub use strategy::AssignmentStrategy;
