use crate::core::datetime;
use crate::core::errors::{Error, Result};
use crate::core::json::{self, RangeDocument};
use crate::core::transport::{HttpTransport, Transport};
use log::{debug, info, warn};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Constants
-------------------------------------------------------------------------------------------------*/

pub const AWS_IP_RANGES_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";
pub const CACHE_FILE_NAME: &str = "ip-ranges.json";

const HTTP_OK: u16 = 200;
const HTTP_NOT_MODIFIED: u16 = 304;

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```
/// let client = digaws::ClientBuilder::new()
///     .url("https://ip-ranges.amazonaws.com/ip-ranges.json")
///     .cache_dir("/tmp/digaws")
///     .timeout(2000) // 2 seconds
///     .build();
///
/// assert_eq!(client.cache_file(), std::path::Path::new("/tmp/digaws/ip-ranges.json"));
/// ```
///
/// The [ClientBuilder::new] method sources configuration values from environment variables when
/// set and uses default values otherwise. [ClientBuilder::default] ignores the environment.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    cache_dir: PathBuf,
    timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = digaws::ClientBuilder::default().build();
    ///
    /// assert_eq!(client.url(), "https://ip-ranges.amazonaws.com/ip-ranges.json");
    /// assert_eq!(client.cache_dir(), dirs::home_dir().unwrap().join(".digaws"));
    /// assert_eq!(client.timeout(), 5000);
    /// ```
    fn default() -> Self {
        Self {
            url: AWS_IP_RANGES_URL.to_string(),
            cache_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".digaws"), // ${HOME}/.digaws
            timeout: 5000, // 5 seconds
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `DIGAWS_URL`
    /// - `DIGAWS_CACHE_DIR`
    /// - `DIGAWS_TIMEOUT`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            url: get_env_var("DIGAWS_URL", default.url),
            cache_dir: get_env_var("DIGAWS_CACHE_DIR", default.cache_dir),
            timeout: get_env_var("DIGAWS_TIMEOUT", default.timeout),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL used to retrieve the AWS IP Ranges; defaults to
    /// `https://ip-ranges.amazonaws.com/ip-ranges.json`.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the directory holding the cached AWS IP Ranges JSON; defaults to
    /// `${HOME}/.digaws`.
    pub fn cache_dir<P: AsRef<Path>>(&mut self, cache_dir: P) -> &mut Self {
        self.cache_dir = cache_dir.as_ref().to_path_buf();
        self
    }

    /// Set the request timeout in milliseconds; defaults to `5000`.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            url: self.url.clone(),
            cache_file: self.cache_dir.join(CACHE_FILE_NAME),
            cache_dir: self.cache_dir.clone(),
            timeout: self.timeout,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Retrieves the AWS IP Ranges document, using the modification time of the locally cached copy
/// to make a conditional request. The cached copy is used only when the server answers
/// `304 Not Modified`; it never expires on its own.
///
/// ```no_run
/// let client = digaws::Client::new();
/// let document = client.fetch().unwrap();
/// println!("syncToken: {}", document.sync_token);
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    cache_dir: PathBuf,
    cache_file: PathBuf,
    timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the URL used to retrieve the AWS IP Ranges.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the directory holding the cached AWS IP Ranges JSON.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the path of the cached AWS IP Ranges JSON file.
    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Get the request timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /*-------------------------------------------------------------------------
      Fetch
    -------------------------------------------------------------------------*/

    /// Retrieve the AWS IP Ranges document over HTTP.
    pub fn fetch(&self) -> Result<RangeDocument> {
        self.fetch_with(&HttpTransport)
    }

    /// Retrieve the AWS IP Ranges document using the provided [Transport]. A single request is
    /// made; there are no retries.
    pub fn fetch_with(&self, transport: &dyn Transport) -> Result<RangeDocument> {
        self.ensure_cache_dir()?;

        let if_modified_since = self.cache_modified_time();
        let response = transport.get(
            &self.url,
            if_modified_since.as_deref(),
            Duration::from_millis(self.timeout),
        );
        let response = response.inspect_err(|error| debug!("{error}"))?;
        info!("GET {}: {}", self.url, response.status);

        match response.status {
            HTTP_OK => {
                self.cache_json_to_file(&response.body);
                json::parse(&response.body)
            }
            HTTP_NOT_MODIFIED => self.get_json_from_file(),
            status => {
                let error = Error::UnexpectedResponse {
                    url: self.url.clone(),
                    status,
                    body: response.body,
                };
                debug!("{error}");
                Err(error)
            }
        }
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn ensure_cache_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir).map_err(|source| Error::CacheDir {
            path: self.cache_dir.clone(),
            source,
        })
    }

    /// Modification time of the cache file as an HTTP date, if the file exists.
    fn cache_modified_time(&self) -> Option<String> {
        match fs::metadata(&self.cache_file).and_then(|metadata| metadata.modified()) {
            Ok(modified) => {
                let http_date = datetime::http_date(modified);
                debug!("Cached file modification time: {http_date}");
                Some(http_date)
            }
            Err(error) => {
                debug!("Not found: {:?}: {}", &self.cache_file, error);
                None
            }
        }
    }

    /// Write the response body verbatim to the cache file. Failures are logged, not returned.
    fn cache_json_to_file(&self, json: &str) {
        match fs::write(&self.cache_file, json) {
            Ok(()) => info!(
                "Successfully cached AWS IP Ranges to: {:?}",
                &self.cache_file
            ),
            Err(error) => warn!(
                "Failed to cache AWS IP Ranges to `{:?}`: {}",
                &self.cache_file, error
            ),
        }
    }

    /// Read and parse the cached AWS IP Ranges JSON.
    fn get_json_from_file(&self) -> Result<RangeDocument> {
        debug!("Reading cached file {:?}", &self.cache_file);

        let cache_read_error = |reason: String| Error::CacheRead {
            path: self.cache_file.clone(),
            reason,
        };

        let json = fs::read_to_string(&self.cache_file)
            .map_err(|error| cache_read_error(error.to_string()))?;

        serde_json::from_str(&json)
            .map_err(|error| cache_read_error(error.to_string()))
            .inspect_err(|error| debug!("{error}"))
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
