//! View models and formatting for the running-workout viewer: a list layer
//! (workouts or daily steps) and a per-workout detail layer over
//! [`health_store::store::HealthStore`].

pub mod detail;
pub mod format;
pub mod list;
pub mod seed;
