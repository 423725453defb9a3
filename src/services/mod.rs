//! Application services around the canvas engine.
//!
//! ARCHITECTURE
//! ============
//! The engine owns the plan; services derive artifacts from it (material
//! list, compliance report) or feed it external input (background images).
//! None of them mutate the engine directly: the session applies their
//! results through the engine's command surface.

pub mod background;
pub mod materials;
pub mod report;
