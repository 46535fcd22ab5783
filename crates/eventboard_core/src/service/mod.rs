//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Validate request drafts before anything reaches storage.
//! - Keep the task/attendee reference invariant through the relationship
//!   maintainer on every mutation path.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - The service layer remains storage-agnostic.

pub mod assignment;
pub mod attendee_service;
pub mod event_service;
pub mod task_service;
