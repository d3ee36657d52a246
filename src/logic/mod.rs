//! Core Logic - Result Presentation Pipeline
//!
//! Everything between a raw form keystroke and the rendered result:
//! input collection, prediction submission, insight derivation, score
//! animation, and the controller that orchestrates them.

pub mod animator;
pub mod controller;
pub mod form;
pub mod insight;
pub mod predict;
