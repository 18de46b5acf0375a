//! Reference and pile rectangle annotation
//!
//! This module provides:
//! - The two-rectangle drawing state machine
//! - Message handlers for DrawMsg

pub mod handlers;
pub mod state;
