//! Catalog loading
//!
//! Every registry language is fetched independently and concurrently.
//! Failed languages are logged and left out of the catalog.

use crate::core::{Language, Result, TranslationsConfig};
use crate::i18n::{Bundle, Catalog};
use futures_util::future::join_all;
use std::future::Future;

/// Source of per-language translation bundles
pub trait CatalogFetcher {
    /// Retrieve and parse the bundle for `code`
    fn fetch(&self, code: &str) -> impl Future<Output = Result<Bundle>>;
}

/// Fetch every language and wait until all retrievals have settled
pub async fn load_all<F: CatalogFetcher>(fetcher: &F, languages: &[Language]) -> Catalog {
    let results = join_all(languages.iter().map(|lang| async move {
        (lang.code, fetcher.fetch(lang.code).await)
    }))
    .await;

    let mut catalog = Catalog::new();
    for (code, result) in results {
        match result {
            Ok(bundle) => catalog.insert(code, bundle),
            Err(e) => log::error!("Failed to load {} translations: {}", code, e),
        }
    }

    log::info!("Loaded {} of {} translation catalogs", catalog.len(), languages.len());
    catalog
}

/// Fetches bundles over HTTP
pub struct HttpFetcher {
    client: reqwest::Client,
    config: TranslationsConfig,
}

impl HttpFetcher {
    pub fn new(config: &TranslationsConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use a preconfigured client (proxy, headers, timeouts)
    pub fn with_client(client: reqwest::Client, config: &TranslationsConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }
}

impl CatalogFetcher for HttpFetcher {
    async fn fetch(&self, code: &str) -> Result<Bundle> {
        let url = self.config.url_for(code);
        log::debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Bundle::from_json(code, &body)
    }
}

/// Reads `<dir>/<code>.json` from a local site checkout
#[cfg(not(target_arch = "wasm32"))]
pub struct DirFetcher {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirFetcher {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CatalogFetcher for DirFetcher {
    async fn fetch(&self, code: &str) -> Result<Bundle> {
        let path = self.dir.join(format!("{}.json", code));
        let body = std::fs::read_to_string(&path)?;
        Bundle::from_json(code, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use std::cell::RefCell;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    static PAIR: &[Language] = &[Language::ltr("en", "English"), Language::rtl("ar", "Arabic")];

    struct CannedFetcher;

    impl CatalogFetcher for CannedFetcher {
        async fn fetch(&self, code: &str) -> Result<Bundle> {
            match code {
                "en" => Bundle::from_json("en", r#"{"nav": {"apps": "Apps"}}"#),
                "fr" => Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "simulated network error",
                ))),
                other => Bundle::from_json(other, "<html>not json</html>"),
            }
        }
    }

    #[tokio::test]
    async fn test_failures_are_omitted() {
        static LANGS: &[Language] = &[
            Language::ltr("en", "English"),
            Language::ltr("fr", "Fran\u{00E7}ais"),
            Language::ltr("de", "Deutsch"),
        ];
        let catalog = load_all(&CannedFetcher, LANGS).await;
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("en"));
        assert!(!catalog.contains("fr"));
        assert!(!catalog.contains("de"));
    }

    /// "en" can only finish once "ar" has started, so a serialized
    /// loader would never complete.
    struct GatedFetcher {
        ar_started: RefCell<Option<oneshot::Sender<()>>>,
        en_waits: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl CatalogFetcher for GatedFetcher {
        async fn fetch(&self, code: &str) -> Result<Bundle> {
            if code == "en" {
                let gate = self.en_waits.borrow_mut().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            } else if let Some(tx) = self.ar_started.borrow_mut().take() {
                let _ = tx.send(());
            }
            Bundle::from_json(code, "{}")
        }
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let (tx, rx) = oneshot::channel();
        let fetcher = GatedFetcher {
            ar_started: RefCell::new(Some(tx)),
            en_waits: RefCell::new(Some(rx)),
        };
        let catalog = load_all(&fetcher, PAIR).await;
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_dir_fetcher_reads_bundles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"hero": {"title": "Hello"}}"#).unwrap();

        let catalog = load_all(&DirFetcher::new(dir.path()), PAIR).await;
        assert_eq!(
            catalog.get("en").and_then(|b| b.text("hero.title")).as_deref(),
            Some("Hello")
        );
        assert!(!catalog.contains("ar"));
    }

    /// Answer one request on `stream` based on the requested path
    fn respond(mut stream: TcpStream) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let request = String::from_utf8_lossy(&request);
        let path = request.split_whitespace().nth(1).unwrap_or("");

        let (status, body) = match path {
            "/translations/en.json" => ("200 OK", r#"{"hero": {"title": "Hi"}}"#),
            "/translations/de.json" => ("200 OK", "<html>maintenance</html>"),
            _ => ("404 Not Found", "not found"),
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    }

    /// Serve bundles from a background thread; returns the base URL
    fn serve_bundles() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                respond(stream);
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_http_fetcher_statuses() {
        let config = TranslationsConfig {
            base_url: serve_bundles(),
            ..TranslationsConfig::default()
        };
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let fetcher = HttpFetcher::with_client(client, &config);

        let bundle = fetcher.fetch("en").await.unwrap();
        assert_eq!(bundle.text("hero.title").as_deref(), Some("Hi"));

        assert!(matches!(fetcher.fetch("fr").await, Err(Error::Http(_))));
        assert!(matches!(fetcher.fetch("de").await, Err(Error::Catalog { .. })));

        static LANGS: &[Language] = &[
            Language::ltr("en", "English"),
            Language::ltr("fr", "Fran\u{00E7}ais"),
            Language::ltr("de", "Deutsch"),
        ];
        let catalog = load_all(&fetcher, LANGS).await;
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("en"));
        assert!(!catalog.contains("fr"));
        assert!(!catalog.contains("de"));
    }
}
