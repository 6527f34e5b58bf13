//! ECS resources made available to systems.
//!
//! Long-lived data stored in the pipeline's world and shared by every animal:
//! tuning constants, the sprite registry, the id side table, the frame clock
//! and the effect RNG.
//!
//! Overview
//! - `animalindex` – backend animal id to ECS entity handle
//! - `debugmode` – presence toggles collision/position debug overlays
//! - `effectrng` – seedable random source for shake and particles
//! - `renderconfig` – interpolation, effect and particle tuning, INI-backed
//! - `spriteregistry` – species to sprite sheet mapping and texture readiness
//! - `worldtime` – client frame clock in milliseconds
pub mod animalindex;
pub mod debugmode;
pub mod effectrng;
pub mod renderconfig;
pub mod spriteregistry;
pub mod worldtime;
