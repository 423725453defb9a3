//! Headless interaction engine for the floor-plan editor.
//!
//! This crate owns everything between raw input events and a drawable scene:
//! translating pointer, wheel, drop and keyboard events into plan mutations,
//! keeping per-floor pan/zoom, hit-testing entities, generating default floor
//! outlines, and describing the active floor as screen-space shapes. The host
//! is responsible only for wiring its event source to [`engine::EngineCore`],
//! mirroring the resulting [`engine::Action`]s, and painting
//! [`render::Scene`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture dispatcher and command surface ([`engine::EngineCore`]) |
//! | [`doc`] | Plan entities, sparse patches, and the in-memory store |
//! | [`floor`] | Floor tabs, active floor, per-floor viewport |
//! | [`layout`] | Generated outline walls and outline snapping |
//! | [`viewport`] | Pan/zoom state and screen/floor conversions |
//! | [`geom`] | Segment and rectangle geometry |
//! | [`input`] | Tools, input event types, and the gesture state machine |
//! | [`hit`] | Hit-testing for the select, eraser and label paths |
//! | [`render`] | Declarative scene for the active floor |
//! | [`consts`] | Shared numeric constants (zoom limits, hit distances, sizes) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod floor;
pub mod geom;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;
pub mod viewport;
