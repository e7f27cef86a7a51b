//! Data models for colors, themes, templates and domains.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of UI, storage and business logic.

pub mod color;
pub mod color_palette;
pub mod color_scheme;
pub mod domain;
pub mod template;
pub mod theme;

// Re-export all model types
pub use color::{Color, Hsl};
pub use color_palette::{ColorPalette, HarmonyMode};
pub use color_scheme::{ColorRole, ColorScheme};
pub use domain::{
    validate_domain_name, AddDomainRequest, DnsInstructions, DnsRecord, DomainConfiguration,
    DomainStatus, SslCertificate, SslStatus,
};
pub use template::{TemplatePage, TemplateSection, WebsiteTemplate};
pub use theme::{
    AnimationConfig, BorderRadiusConfig, LayoutConfig, ResponsiveConfig, SpacingConfig,
    ThemeCustomizations, ThemeUpdate, TypographyConfig,
};
