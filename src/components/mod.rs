//! ECS components for tracked animals.
//!
//! One entity exists per wild animal the renderer has seen, tagged with its
//! backend id. Per-animal client state is split into components so each piece
//! can be added lazily and dropped independently.
//!
//! Submodules overview:
//! - [`animalid`] – backend id of the tracked animal
//! - [`boxcollider`] – species hit box centered on the authoritative position
//! - [`burrow`] – burrow trigger marker and standalone dust bursts
//! - [`hiteffect`] – shake/flash window started by a server hit
//! - [`interpolation`] – smoothed render position and velocity estimate

pub mod animalid;
pub mod boxcollider;
pub mod burrow;
pub mod hiteffect;
pub mod interpolation;
