//! Wildlife rendering library.
//!
//! Client-side movement interpolation and animated sprite rendering for wild
//! animals whose positions arrive on a coarse server tick. The host owns the
//! canvas and the frame loop; this crate keeps per-animal state in a bevy_ecs
//! world and draws through the [`surface::RasterSurface`] trait.
//!
//! Start with [`pipeline::WildlifePipeline`].

pub mod components;
pub mod error;
pub mod math;
pub mod pipeline;
pub mod resources;
pub mod scenario;
pub mod snapshot;
pub mod surface;
pub mod systems;
