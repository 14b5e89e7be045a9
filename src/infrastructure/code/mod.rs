//! Redemption code infrastructure

mod generator;

pub use generator::RedemptionCodeGenerator;
