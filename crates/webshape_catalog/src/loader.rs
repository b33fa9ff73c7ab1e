//! Loading catalogs from declaration sources.
//!
//! Loading runs in two passes. The first parses every source and collects
//! declarations by name, applying the duplicate policy. The second merges
//! augment blocks into their targets, builds the catalog, and validates it,
//! so references may point forward or across sources.
//!
//! A malformed declaration only loses that declaration. Every problem is
//! collected into [`LoadOutcome::diagnostics`]; nothing is raised mid-load.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};
use webshape_foundation::{
    EnumDecl, Error, ErrorContext, ErrorKind, OrderedMap, ReferenceRole, Severity, TypeDecl,
};
use webshape_language::{Ast, AugmentDecl, Declaration, DeclarationAnalyzer, Span, parse_recovering};

use crate::catalog::Catalog;
use crate::options::{DuplicatePolicy, LoadOptions};
use crate::validate::Validator;

/// A named piece of declaration source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Name used in diagnostics, usually a file name.
    pub name: String,
    /// Declaration text.
    pub text: String,
}

impl Source {
    /// Creates a source from a name and text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads a source from a file, named by its path.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> webshape_foundation::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read '{}': {e}",
                path.display()
            )))
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// A loaded catalog with every problem found while loading it.
#[derive(Clone, Debug)]
pub struct LoadOutcome {
    /// The catalog, usable even when diagnostics are present.
    pub catalog: Catalog,
    /// Parse, resolution and validation problems, in the order found.
    pub diagnostics: Vec<Error>,
    strict: bool,
}

impl LoadOutcome {
    /// Diagnostics with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    /// Diagnostics with warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &Error> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns true if loading produced no diagnostics at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Converts into the catalog, or the diagnostics that make it unusable.
    ///
    /// Errors always fail. Warnings fail only when loaded with strict options.
    ///
    /// # Errors
    ///
    /// Returns every diagnostic if the load failed.
    pub fn into_result(self) -> Result<Catalog, Vec<Error>> {
        let failed = if self.strict {
            !self.diagnostics.is_empty()
        } else {
            self.has_errors()
        };
        if failed {
            Err(self.diagnostics)
        } else {
            Ok(self.catalog)
        }
    }
}

/// Where a declaration was written.
#[derive(Clone, Debug)]
struct Origin {
    source: String,
    span: Span,
}

/// Builds catalogs from one or more sources.
#[derive(Clone, Debug, Default)]
pub struct CatalogLoader {
    options: LoadOptions,
    sources: Vec<Source>,
}

impl CatalogLoader {
    /// Creates a loader with default options and no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the load options.
    #[must_use]
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a source.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds a source in place.
    pub fn add_source(&mut self, source: Source) -> &mut Self {
        self.sources.push(source);
        self
    }

    /// Returns the load options.
    #[must_use]
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Returns the sources, in load order.
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Loads every source into one catalog.
    #[must_use]
    pub fn load(&self) -> LoadOutcome {
        let mut state = LoadState::new(self.options.duplicates);

        for source in &self.sources {
            state.collect(source);
        }
        let catalog = state.finish(&self.options);

        LoadOutcome {
            catalog,
            diagnostics: state.diagnostics,
            strict: self.options.strict,
        }
    }
}

/// Loads a single unnamed source with default options.
///
/// # Example
///
/// ```
/// use webshape_catalog::load_catalog;
///
/// let outcome = load_catalog("(class: BaseType :members [(property value number)])");
/// assert!(outcome.is_clean());
/// assert!(outcome.catalog.resolve_member("BaseType", "value").is_ok());
/// ```
#[must_use]
pub fn load_catalog(text: &str) -> LoadOutcome {
    CatalogLoader::new()
        .with_source(Source::new("<input>", text))
        .load()
}

/// Loads several sources with the given options.
#[must_use]
pub fn load_sources(sources: impl IntoIterator<Item = Source>, options: LoadOptions) -> LoadOutcome {
    sources
        .into_iter()
        .fold(CatalogLoader::new().with_options(options), CatalogLoader::with_source)
        .load()
}

// =============================================================================
// Load State
// =============================================================================

struct LoadState {
    policy: DuplicatePolicy,
    types: OrderedMap<TypeDecl>,
    enums: OrderedMap<EnumDecl>,
    augments: Vec<(AugmentDecl, Origin)>,
    origins: HashMap<String, Origin>,
    diagnostics: Vec<Error>,
}

impl LoadState {
    fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            types: OrderedMap::new(),
            enums: OrderedMap::new(),
            augments: Vec::new(),
            origins: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// First pass over one source.
    fn collect(&mut self, source: &Source) {
        let (forms, parse_errors) = parse_recovering(&source.text);
        for error in parse_errors {
            self.report(located(error, source, None));
        }

        let before = self.types.len() + self.enums.len();
        for form in &forms {
            match DeclarationAnalyzer::analyze(form) {
                Ok(Some(decl)) => self.add(decl, source),
                Ok(None) => {
                    let span = form.span();
                    let message = match form.head() {
                        Some(head) => format!("unknown declaration form `{head}`"),
                        None => format!("expected a declaration, got {}", form.type_name()),
                    };
                    let error = Error::parse(message, span.line, span.column, "");
                    self.report(located(error, source, declared_name(form)));
                }
                Err(error) => self.report(located(error, source, declared_name(form))),
            }
        }

        debug!(
            source = %source.name,
            forms = forms.len(),
            declarations = self.types.len() + self.enums.len() - before,
            "collected declarations"
        );
    }

    fn add(&mut self, decl: Declaration, source: &Source) {
        let origin = Origin {
            source: source.name.clone(),
            span: decl.span(),
        };

        let name = decl.name().to_string();
        if let Declaration::Augment(augment, _) = decl {
            self.augments.push((augment, origin));
            return;
        }

        if self.types.contains_key(&name) || self.enums.contains_key(&name) {
            let error = Error::new(ErrorKind::DuplicateDeclaration(name.clone()))
                .with_context(origin_context(&origin, &name));
            self.report(error);
            match self.policy {
                DuplicatePolicy::KeepFirst => return,
                DuplicatePolicy::KeepLast => {
                    self.types.remove(&name);
                    self.enums.remove(&name);
                }
            }
        }

        match decl {
            Declaration::Type(decl, _) => {
                self.types.insert(name.clone(), decl);
            }
            Declaration::Enum(decl, _) => {
                self.enums.insert(name.clone(), decl);
            }
            Declaration::Augment(..) => {}
        }
        self.origins.insert(name, origin);
    }

    /// Second pass: merge augments, build and validate.
    fn finish(&mut self, options: &LoadOptions) -> Catalog {
        for (augment, origin) in std::mem::take(&mut self.augments) {
            match self.types.get_mut(&augment.target) {
                Some(target) => target.members.extend(augment.members),
                None => {
                    let error = Error::unresolved(
                        format!("augment {}", augment.target),
                        augment.target.clone(),
                        ReferenceRole::AugmentTarget,
                    )
                    .with_context(origin_context(&origin, &augment.target));
                    self.report(error);
                }
            }
        }

        let catalog = Catalog::from_maps(
            std::mem::take(&mut self.types),
            std::mem::take(&mut self.enums),
        );

        let problems = Validator::new(&catalog)
            .with_type_reference_check(options.check_type_references)
            .run();
        for problem in problems {
            let problem = self.with_origin(problem);
            self.report(problem);
        }

        debug!(
            types = catalog.type_count(),
            enums = catalog.enum_count(),
            diagnostics = self.diagnostics.len(),
            "built catalog"
        );
        catalog
    }

    /// Fills in the source position of a validation problem's declaration.
    fn with_origin(&self, mut error: Error) -> Error {
        let origin = error
            .context
            .as_ref()
            .and_then(|c| c.declaration.as_deref())
            .and_then(|name| self.origins.get(name));
        match origin {
            Some(origin) => {
                let context = error
                    .context
                    .take()
                    .unwrap_or_default()
                    .with_source(origin.source.clone())
                    .with_position(origin.span.line, origin.span.column);
                error.with_context(context)
            }
            None => error,
        }
    }

    fn report(&mut self, error: Error) {
        warn!(severity = %error.severity(), context = ?error.context, "{error}");
        self.diagnostics.push(error);
    }
}

fn origin_context(origin: &Origin, declaration: &str) -> ErrorContext {
    ErrorContext::new()
        .with_source(origin.source.clone())
        .with_position(origin.span.line, origin.span.column)
        .with_declaration(declaration)
}

/// Attaches source name, position, source line and declaration to a parse error.
fn located(mut error: Error, source: &Source, declaration: Option<&str>) -> Error {
    let mut context = error.context.take().unwrap_or_default().with_source(source.name.clone());
    if let ErrorKind::Parse {
        line,
        column,
        context: line_text,
        ..
    } = &mut error.kind
    {
        context = context.with_position(*line, *column);
        if line_text.is_empty() {
            let span = Span::new(0, 0, *line, *column);
            *line_text = span.line_text(&source.text).to_string();
        }
    }
    if let Some(name) = declaration {
        context = context.with_declaration(name);
    }
    error.with_context(context)
}

/// The name a declaration form tries to declare, if it has one.
fn declared_name(form: &Ast) -> Option<&str> {
    form.as_list()?.get(1)?.as_symbol()
}
