//! Core types shared across protodiff facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! error and logging facilities, so that every crate in the workspace emits
//! the same structured log shape.

pub mod schema;
