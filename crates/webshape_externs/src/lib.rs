//! Bundled browser API declarations for webshape.
//!
//! This crate embeds the declared API surface as `.decl` sources:
//! - [`Api::Dom`] - Event, worker, fetch and window base types
//! - [`Api::WebAudio`] - Audio contexts, the node graph and legacy constructors
//! - [`Api::ServiceWorker`] - Service workers, push messaging and caches
//!
//! [`standard_catalog`] loads all three into one validated catalog.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::sync::LazyLock;

use tracing::debug;
use webshape_catalog::{Catalog, LoadOptions, LoadOutcome, Source, load_sources};

/// One bundled declaration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Api {
    /// Platform base types the other files extend.
    Dom,
    /// Web Audio API.
    WebAudio,
    /// Service Worker, Push and Cache APIs.
    ServiceWorker,
}

impl Api {
    /// Every bundled file, in load order.
    pub const ALL: [Api; 3] = [Self::Dom, Self::WebAudio, Self::ServiceWorker];

    /// The file name used as the source name in diagnostics.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Dom => "dom.decl",
            Self::WebAudio => "web_audio.decl",
            Self::ServiceWorker => "service_worker.decl",
        }
    }

    /// The declaration text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Dom => include_str!("../catalogs/dom.decl"),
            Self::WebAudio => include_str!("../catalogs/web_audio.decl"),
            Self::ServiceWorker => include_str!("../catalogs/service_worker.decl"),
        }
    }

    /// The file as a loader source.
    #[must_use]
    pub fn source(self) -> Source {
        Source::new(self.file_name(), self.text())
    }
}

/// All bundled files as loader sources.
#[must_use]
pub fn standard_sources() -> Vec<Source> {
    Api::ALL.into_iter().map(Api::source).collect()
}

/// Loads the bundled files with the given options.
#[must_use]
pub fn load_standard(options: LoadOptions) -> LoadOutcome {
    let outcome = load_sources(standard_sources(), options);
    debug!(
        types = outcome.catalog.type_count(),
        enums = outcome.catalog.enum_count(),
        diagnostics = outcome.diagnostics.len(),
        "loaded standard catalog"
    );
    outcome
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| load_standard(LoadOptions::default()).catalog);

/// The standard catalog, loaded once per process.
///
/// Clones share structure with the cached catalog.
#[must_use]
pub fn standard_catalog() -> Catalog {
    STANDARD.clone()
}
