//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod counters;
pub mod dashboard;
pub mod health;
pub mod reports;
