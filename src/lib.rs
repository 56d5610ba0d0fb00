//! Regrid - Library for recovering the pixel grid of scaled pixel art
//!
//! This library provides functionality to:
//! - Detect the uneven block grid of nearest-neighbour scaled images and animations
//! - Downsample them back to one pixel per logical cell
//! - Re-render them at a uniform integer scale as PNG or animated GIF

pub mod cli;
pub mod config;
pub mod decode;
pub mod discover;
pub mod fix;
pub mod gif;
pub mod grid;
pub mod output;
pub mod pipeline;
pub mod staging;
