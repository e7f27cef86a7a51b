//! Service layer for business logic.
//!
//! The color, contrast, compiler and query services are pure functions over
//! their inputs. Theme persistence and the domain client are the only
//! services that touch storage or the network.

pub mod accessibility;
pub mod domains;
pub mod palette;
pub mod scheme;
pub mod template_query;
pub mod theme_compiler;
pub mod theme_store;

// Re-export commonly used types and functions
pub use accessibility::{ContrastCheck, ContrastReport};
#[cfg(feature = "remote")]
pub use domains::DomainClient;
pub use domains::DomainEndpoint;
pub use scheme::NamedScheme;
pub use template_query::{
    Facets, PriceRange, SearchParams, SearchResults, SortKey, SortOrder, SortSpec,
    TemplateFilters, UserPreferences,
};
pub use theme_compiler::StylesheetWriter;
pub use theme_store::{FileStore, KeyValueStore, MemoryStore, ThemeRepository};
