use crate::core::errors::{Error, Result};
use log::debug;
use reqwest::header::IF_MODIFIED_SINCE;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  HTTP Transport
-------------------------------------------------------------------------------------------------*/

/// Status code and body of an HTTP response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a single HTTP GET. [Client](crate::Client) fetches through this trait so callers can
/// substitute the network.
pub trait Transport {
    fn get(
        &self,
        url: &str,
        if_modified_since: Option<&str>,
        timeout: Duration,
    ) -> Result<HttpResponse>;
}

/*--------------------------------------------------------------------------------------
  Blocking reqwest Transport
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn get(
        &self,
        url: &str,
        if_modified_since: Option<&str>,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let fetch_error = |source: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(fetch_error)?;

        let mut request = client.get(url);
        if let Some(if_modified_since) = if_modified_since {
            request = request.header(IF_MODIFIED_SINCE, if_modified_since);
        }

        debug!("GET {url}");
        let response = request.send().map_err(fetch_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(fetch_error)?;

        Ok(HttpResponse { status, body })
    }
}
