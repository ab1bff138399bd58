//! A locally generated stand-in for the national indicator series.
//!
//! The series is generated once per deployment, written to a JSON artifact and
//! never regenerated afterwards; later startups only read it back.

pub mod error;
pub mod generator;
pub mod store;
