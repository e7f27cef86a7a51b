//! Sitecraft Library
//!
//! This library provides the design core of a no-code website builder:
//! harmony palettes, role-based color schemes, WCAG contrast analysis,
//! theme compilation to CSS, saved-theme persistence and template catalog
//! search, plus a typed client for the hosting backend's domain API.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
