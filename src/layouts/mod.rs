//! Layout implementations.
//!
//! Each layout is a value type implementing
//! [`Renderable`](crate::lifecycle::Renderable); the shared behavior lives
//! in the lifecycle controller, not in a base class.

pub mod classic;
