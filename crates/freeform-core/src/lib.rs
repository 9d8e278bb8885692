#![forbid(unsafe_code)]

//! Core: geometry and colour primitives for freeform panels.
//!
//! # Role
//! `freeform-core` is the vocabulary shared between the pane-tree manager
//! (`freeform-layout`) and whatever host renders surfaces. It holds no state
//! and knows nothing about panes.

pub mod color;
pub mod geometry;

pub use color::{Background, Rgba};
pub use geometry::{Axis, Dimension, Edge, Frame, Insets, Size};
