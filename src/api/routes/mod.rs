//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboard;
pub mod data;
pub mod health;
pub mod page;
