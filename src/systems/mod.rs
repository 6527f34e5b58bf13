//! Pipeline systems.
//!
//! Most of these are plain functions over `&mut World` called from the
//! [`WildlifePipeline`](crate::pipeline::WildlifePipeline) facade in response to
//! host calls; [`burrow::expire_burrow_bursts`] runs in a schedule.
//!
//! Submodules overview
//! - [`animation`] – sprite sheet frame selection from direction and speed
//! - [`breeding`] – age-stage size multiplier and pregnancy lookup
//! - [`burrow`] – burrow trigger detection, dust particles and their expiry
//! - [`collision`] – bounds, point and range checks over snapshots
//! - [`hiteffect`] – hit shake and white flash tracking
//! - [`interpolation`] – smoothed render positions between server ticks
//! - [`lifecycle`] – animal entity creation and reclaim
//! - [`overlay`] – thought bubbles, pregnancy and held-item indicators, debug marks
//! - [`render`] – per-animal frame composition
//! - [`shadow`] – ground, silhouette and aerial shadows
//! - [`time`] – frame clock update

pub mod animation;
pub mod breeding;
pub mod burrow;
pub mod collision;
pub mod hiteffect;
pub mod interpolation;
pub mod lifecycle;
pub mod overlay;
pub mod render;
pub mod shadow;
pub mod time;
