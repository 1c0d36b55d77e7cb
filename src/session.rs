//! Navigation state for one reader
//!
//! Each navigation takes a [`NavigationToken`] from a generation counter.
//! Loads run independently and report back with their token; a result is
//! applied only while its token is the latest one, so a slow response for a
//! page the reader already left never replaces the current page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Datelike;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, OnceCell};
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::data::{DataSource, SITE_INFO};
use crate::error::AppError;
use crate::model::SiteInfo;
use crate::properties::process_locations;
use crate::router::Route;
use crate::search::{IndexBackend, SearchEngine};
use crate::views::{self, DisplayOptions, Frame, Page};

const BROWSE_HELP: &str = "\
Enter a site path (/people, /entity/Q42, /map, /search/\"Yale College\") or search terms.
Commands: :props toggles property info, :changes toggles change highlights, :help, :quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationToken(u64);

/// Monotonic navigation generations
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    generation: Arc<AtomicU64>,
}

impl Navigator {
    /// Start a navigation, superseding every earlier token
    pub fn begin(&self) -> NavigationToken {
        NavigationToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: NavigationToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }
}

/// Fetches the data behind a route; cheap to clone into spawned tasks
#[derive(Clone)]
pub struct Loader {
    source: DataSource,
    backend: IndexBackend,
    engine: Arc<OnceCell<SearchEngine>>,
}

impl Loader {
    pub fn new(source: DataSource, backend: IndexBackend) -> Self {
        Self {
            source,
            backend,
            engine: Arc::new(OnceCell::new()),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// The session's search engine, built on first use
    pub async fn engine(&self) -> Result<SearchEngine, AppError> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let documents = self.source.search_index().await?;
                let backend = self.backend;
                info!("Building {} search index over {} documents", backend, documents.len());
                let engine = tokio::task::spawn_blocking(move || SearchEngine::build(documents, backend))
                    .await
                    .map_err(|e| AppError::Internal(format!("Index build task failed: {}", e)))??;
                let catalog = engine.catalog();
                if catalog.is_empty() {
                    warn!("Search index has no documents; every search will be empty");
                } else {
                    debug!("Search index ready with {} documents", catalog.len());
                }
                Ok::<_, AppError>(engine)
            })
            .await?;
        Ok(engine.clone())
    }

    pub async fn load(&self, route: &Route) -> Result<Page, AppError> {
        debug!("Loading {}", route);
        let page = match route {
            Route::Home => Page::Home,
            Route::About => Page::About,
            Route::News => Page::News,
            Route::People { list } => Page::People(self.source.entity_list(list.as_deref()).await?),
            Route::Entity { id, .. } => Page::Entity(Box::new(self.source.entity(id).await?)),
            Route::Map => {
                let index = self.source.location_information().await?;
                Page::Map(process_locations(&index))
            }
            Route::Search { term } => {
                let engine = match term {
                    Some(_) => Some(self.engine().await?),
                    None => None,
                };
                Page::Search {
                    term: term.clone(),
                    engine,
                }
            }
        };
        Ok(page)
    }
}

/// One line typed into `browse`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Go(Route),
    ToggleProperties,
    ToggleChanges,
    Help,
    Quit,
    Nothing,
}

impl BrowseCommand {
    /// Paths start with `/`, commands with `:`; anything else is a search
    pub fn parse(line: &str) -> Result<Self, AppError> {
        let line = line.trim();
        let command = match line {
            "" => BrowseCommand::Nothing,
            ":props" => BrowseCommand::ToggleProperties,
            ":changes" => BrowseCommand::ToggleChanges,
            ":help" | "?" => BrowseCommand::Help,
            ":quit" | ":q" | ":exit" => BrowseCommand::Quit,
            other if other.starts_with(':') => {
                return Err(AppError::InvalidInput(format!("Unknown command '{}'", other)));
            }
            path if path.starts_with('/') => BrowseCommand::Go(Route::parse(path)?),
            terms => BrowseCommand::Go(Route::Search {
                term: Some(terms.to_string()),
            }),
        };
        Ok(command)
    }
}

/// A finished load reported back to the browse loop
struct Loaded {
    token: NavigationToken,
    route: Route,
    result: Result<Page, AppError>,
}

pub struct Session {
    loader: Loader,
    navigator: Navigator,
    site: SiteInfo,
    version: Option<String>,
    options: DisplayOptions,
    current: Option<Page>,
}

impl Session {
    pub fn new(loader: Loader, site: SiteInfo, version: Option<String>, options: DisplayOptions) -> Self {
        Self {
            loader,
            navigator: Navigator::default(),
            site,
            version,
            options,
            current: None,
        }
    }

    /// Connect to the data base and read the site-wide files
    pub async fn open(settings: &Settings) -> Result<Self, AppError> {
        let source = DataSource::from_base(&settings.data, settings.timeout)?;
        let site = match source.site_info().await {
            Ok(site) => site,
            Err(e) => {
                error!(code = e.error_code(), "Failed to load {}: {}", source.locate(SITE_INFO), e);
                SiteInfo::default()
            }
        };
        let version = source.latest_version().await;
        info!(
            "Opened exhibit '{}' from {} ({} backend)",
            site.title, settings.data, settings.backend
        );
        Ok(Self::new(
            Loader::new(source, settings.backend),
            site,
            version,
            settings.display,
        ))
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn navigate(&self) -> NavigationToken {
        self.navigator.begin()
    }

    /// Install a finished load unless a newer navigation started since
    ///
    /// A failed load is logged and shows the route's loading state.
    pub fn apply(&mut self, token: NavigationToken, route: Route, result: Result<Page, AppError>) -> bool {
        if !self.navigator.is_current(token) {
            warn!("Discarding stale load of {}", route);
            return false;
        }
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                error!(code = e.error_code(), "Failed to load {}: {}", route, e);
                Page::Loading(route)
            }
        };
        self.current = Some(page);
        true
    }

    /// Load and render one route, returning load errors to the caller
    pub async fn visit(&mut self, route: Route) -> Result<String, AppError> {
        let token = self.navigate();
        let page = self.loader.load(&route).await?;
        self.apply(token, route, Ok(page));
        self.render()
    }

    /// The current page with site chrome, the home page before any navigation
    pub fn render(&self) -> Result<String, AppError> {
        let frame = Frame {
            site: &self.site,
            version: self.version.as_deref(),
            year: chrono::Local::now().year(),
        };
        let page = self.current.as_ref().unwrap_or(&Page::Home);
        views::render(page, &frame, self.options)
    }

    /// Rendered page for the browse loop; a failed render becomes an error line
    pub fn show(&self) -> String {
        match self.render() {
            Ok(page) => page,
            Err(e) => {
                error!(code = e.error_code(), "Failed to render page: {}", e);
                format!("Error: {}\n", e)
            }
        }
    }

    fn start(&self, route: Route, tx: &mpsc::Sender<Loaded>) {
        let token = self.navigate();
        let loader = self.loader.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = loader.load(&route).await;
            if tx.send(Loaded { token, route, result }).await.is_err() {
                debug!("Browse session closed before load finished");
            }
        });
    }

    /// Interactive loop over stdin until EOF or `:quit`
    pub async fn browse(mut self) -> Result<(), AppError> {
        info!("Starting browse session");

        let (tx, mut rx) = mpsc::channel::<Loaded>(16);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        emit(&mut stdout, BROWSE_HELP).await?;
        self.start(Route::Home, &tx);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match BrowseCommand::parse(&line) {
                        Ok(BrowseCommand::Go(route)) => self.start(route, &tx),
                        Ok(BrowseCommand::ToggleProperties) => {
                            self.options.toggle_property_info();
                            emit(&mut stdout, &self.show()).await?;
                        }
                        Ok(BrowseCommand::ToggleChanges) => {
                            self.options.toggle_changes();
                            emit(&mut stdout, &self.show()).await?;
                        }
                        Ok(BrowseCommand::Help) => emit(&mut stdout, BROWSE_HELP).await?,
                        Ok(BrowseCommand::Quit) => break,
                        Ok(BrowseCommand::Nothing) => {}
                        Err(e) => emit(&mut stdout, &format!("Error: {}\n", e)).await?,
                    }
                }
                Some(loaded) = rx.recv() => {
                    if self.apply(loaded.token, loaded.route, loaded.result) {
                        emit(&mut stdout, &self.show()).await?;
                    }
                }
            }
        }

        info!("Browse session ended");
        Ok(())
    }
}

async fn emit(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), AppError> {
    stdout.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}
