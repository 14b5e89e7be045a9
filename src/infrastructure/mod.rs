//! Infrastructure layer - storage, services and observability

pub mod assignment;
pub mod code;
pub mod exchange_lock;
pub mod logging;
pub mod observability;
pub mod participant;
pub mod storage;
pub mod team;
