//! Measuring session module
//!
//! This module contains:
//! - Session state for the current photo
//! - Message types for session interactions
//! - Message handlers

pub mod handlers;
pub mod messages;
pub mod state;
