//! Brickwork Core Types and Capabilities
//!
//! This crate provides the foundational pieces shared by every Brickwork
//! crate. It includes:
//!
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Host**: The capability interface a rendering environment implements ([`host`] module)
//! - **Timers**: The scheduler capability and a simulated clock ([`timer`] module)
//! - **Scene**: A headless, in-memory host ([`scene`] module)

pub mod geometry;
pub mod host;
pub mod scene;
pub mod timer;
