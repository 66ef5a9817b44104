//! HTTP document-collection backend.
//!
//! Issues `GET {base_url}/{collection}?parish=..&region=..&bloodGroup=..&gender=..`
//! with only the set filters, and expects `{"documents": [...]}` back. The
//! server applies the equality filters; results are still re-checked by the
//! engine.

use famdir_core::decode::decode_collection;
use famdir_core::{FamilyRecord, FamilyStore, FilterCriteria, RetrievalError};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client<HttpConnector, Empty<Bytes>>,
    endpoint: Url,
    timeout: Duration,
}

impl HttpStore {
    /// Build a client for `collection` under `base_url`.
    ///
    /// Only plain `http` endpoints are accepted; the URL is validated here so
    /// a bad config fails before the first search.
    pub fn new(base_url: &str, collection: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        let mut endpoint = Url::parse(base_url)
            .map_err(|e| RetrievalError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        if endpoint.scheme() != "http" {
            return Err(RetrievalError::InvalidEndpoint(format!(
                "{base_url}: only http:// endpoints are supported"
            )));
        }
        endpoint
            .path_segments_mut()
            .map_err(|()| RetrievalError::InvalidEndpoint(format!("{base_url}: not a base URL")))?
            .pop_if_empty()
            .push(collection);

        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The request URL for `filters`: the collection endpoint plus one
    /// form-encoded query pair per set filter.
    pub fn request_url(&self, filters: &FilterCriteria) -> Url {
        let mut url = self.endpoint.clone();
        if !filters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in filters.active() {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    async fn get(&self, uri: Uri) -> Result<(StatusCode, Bytes), RetrievalError> {
        let response = self
            .client
            .get(uri)
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?
            .to_bytes();
        Ok((status, body))
    }
}

impl FamilyStore for HttpStore {
    async fn fetch(&self, filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        let url = self.request_url(filters);
        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e| RetrievalError::InvalidEndpoint(format!("{url}: {e}")))?;

        tracing::debug!(%uri, "http store: fetching");
        let (status, body) = tokio::time::timeout(self.timeout, self.get(uri))
            .await
            .map_err(|_| RetrievalError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            })??;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "http store: response");

        if !status.is_success() {
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(decode_collection(&body)?)
    }
}
