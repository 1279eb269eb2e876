use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::{
    error::Error,
    query::Query,
    response::{ApiInfo, SearchResponse},
};
use crate::config::ApiConfig;

/// Anything that can answer document searches.
///
/// The loader only talks to this trait so builds and tests can swap the
/// HTTP client for an in-memory source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a search against the current published content
    async fn query(&self, query: &Query) -> Result<SearchResponse, Error>;

    /// Fetch a page by its absolute `next_page` url
    async fn fetch_page(&self, url: &str) -> Result<SearchResponse, Error>;
}

/// HTTP client for a Prismic-style repository API
#[derive(Debug, Clone)]
pub struct PrismicClient {
    cfg: ApiConfig,
    http: reqwest::Client,
}

impl PrismicClient {
    pub fn new(cfg: ApiConfig) -> Self {
        Self {
            cfg,
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.cfg.endpoint.trim_end_matches('/')
    }

    fn search_url(&self) -> String {
        format!("{}/documents/search", self.endpoint())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let mut url = reqwest::Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_string()))?;
        let has_token = url.query_pairs().any(|(key, _)| key == "access_token");
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            if let Some(token) = self.cfg.access_token.as_ref().filter(|_| !has_token) {
                pairs.append_pair("access_token", token);
            }
        }
        // an empty serializer still leaves a dangling '?'
        if url.query() == Some("") {
            url.set_query(None);
        }

        debug!("Sending request to {}", url.path());
        let resp = self.http.get(url.clone()).send().await?;
        self.handle_response(url.path(), resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            debug!("request: {} status: {}", path, status);
            Ok(resp.json::<T>().await?)
        } else {
            error!("request {} status: {}", path, status);
            Err(Error::StatusCode(status.as_u16().to_string()))
        }
    }

    /// Resolve the ref every search must be pinned to
    pub async fn master_ref(&self) -> Result<String, Error> {
        let info: ApiInfo = self.get(self.endpoint(), &[]).await?;
        info.master_ref()
            .map(|r| r.reference.clone())
            .ok_or_else(|| Error::NoMasterRef(self.endpoint().to_string()))
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(&self, query: &Query) -> Result<SearchResponse, Error> {
        let master_ref = self.master_ref().await?;
        let mut params = vec![("ref", master_ref)];
        params.extend(query.params());
        self.get(&self.search_url(), &params).await
    }

    async fn fetch_page(&self, url: &str) -> Result<SearchResponse, Error> {
        // next_page urls already carry ref and query; the token is added unless present
        self.get(url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prismic::Predicate;
    use axum::{
        extract::{Query as QueryParams, RawQuery, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    async fn api_info(State(master): State<bool>) -> Json<serde_json::Value> {
        let refs = if master {
            json!([{"id": "master", "ref": "master-ref", "label": "Master", "isMasterRef": true}])
        } else {
            json!([{"id": "preview", "ref": "preview-ref", "label": "Preview"}])
        };
        Json(json!({ "refs": refs }))
    }

    async fn search(
        QueryParams(params): QueryParams<HashMap<String, String>>,
        RawQuery(raw): RawQuery,
    ) -> Result<Json<serde_json::Value>, StatusCode> {
        if raw.unwrap_or_default().matches("access_token=").count() > 1 {
            return Err(StatusCode::BAD_REQUEST);
        }
        if params.get("ref").map(String::as_str) != Some("master-ref") {
            return Err(StatusCode::BAD_REQUEST);
        }
        if params.get("access_token").map(String::as_str) == Some("wrong") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let page = params.get("page").cloned().unwrap_or_else(|| "1".to_string());
        Ok(Json(json!({
            "page": page.parse::<usize>().unwrap_or(1),
            "next_page": null,
            "prev_page": null,
            "results": [{
                "id": "1",
                "uid": "echo",
                "type": "posts",
                "last_publication_date": "2021-03-25T19:25:28+0000",
                "data": {
                    "title": params.get("q").cloned().unwrap_or_default(),
                    "subtitle": params.get("fetch").cloned().unwrap_or_default(),
                    "author": params.get("pageSize").cloned().unwrap_or_default()
                }
            }]
        })))
    }

    async fn serve(master: bool) -> SocketAddr {
        let app = Router::new()
            .route("/api/v2", get(api_info))
            .route("/api/v2/documents/search", get(search))
            .with_state(master);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client(addr: SocketAddr, token: Option<&str>) -> PrismicClient {
        PrismicClient::new(ApiConfig {
            endpoint: format!("http://{}/api/v2/", addr),
            access_token: token.map(str::to_string),
        })
    }

    fn posts_query() -> Query {
        Query::new()
            .predicate(Predicate::at("document.type", "posts"))
            .fetch(["posts.title", "posts.subtitle", "posts.author"])
            .page_size(5)
    }

    #[tokio::test]
    async fn test_master_ref() {
        let addr = serve(true).await;
        assert_eq!(client(addr, None).master_ref().await.unwrap(), "master-ref");
    }

    #[tokio::test]
    async fn test_missing_master_ref() {
        let addr = serve(false).await;
        let err = client(addr, None).query(&posts_query()).await.unwrap_err();
        assert!(matches!(err, Error::NoMasterRef(_)));
    }

    #[tokio::test]
    async fn test_query_sends_search_params() {
        let addr = serve(true).await;
        let resp = client(addr, Some("token")).query(&posts_query()).await.unwrap();

        let data = &resp.results[0].data;
        assert_eq!(data.title.as_deref(), Some(r#"[[at(document.type, "posts")]]"#));
        assert_eq!(
            data.subtitle.as_deref(),
            Some("posts.title,posts.subtitle,posts.author")
        );
        assert_eq!(data.author.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let addr = serve(true).await;
        let err = client(addr, Some("wrong")).query(&posts_query()).await.unwrap_err();
        assert!(matches!(err, Error::StatusCode(ref code) if code == "401"));
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let addr = serve(true).await;
        let url = format!("http://{}/api/v2/documents/search?ref=master-ref&page=2", addr);
        let resp = client(addr, None).fetch_page(&url).await.unwrap();
        assert_eq!(resp.page, 2);
    }

    #[tokio::test]
    async fn test_fetch_page_keeps_single_token() {
        let addr = serve(true).await;
        let url = format!(
            "http://{}/api/v2/documents/search?ref=master-ref&access_token=token&page=2",
            addr
        );
        let resp = client(addr, Some("token")).fetch_page(&url).await.unwrap();
        assert_eq!(resp.page, 2);

        let url = format!("http://{}/api/v2/documents/search?ref=master-ref&page=3", addr);
        let resp = client(addr, Some("token")).fetch_page(&url).await.unwrap();
        assert_eq!(resp.page, 3);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = PrismicClient::new(ApiConfig::default());
        let err = client.fetch_page("not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
