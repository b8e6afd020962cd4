//! PawHaven: a pet-adoption center service.
//!
//! Public visitors browse adoptable pets, apply to adopt one, and leave
//! contact messages; staff triage applications, manage pet records, and
//! watch the dashboard. The adoption lifecycle is the heart of it: an
//! application moving to `completed` marks its pet adopted, and backing out
//! of `completed` releases the pet again.

pub mod adoptions;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod pagination;
pub mod pets;
pub mod repository;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod validation;
