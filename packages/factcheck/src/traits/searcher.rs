//! Search collaborator seams for evidence discovery.
//!
//! Two independent providers feed the evidence gatherer: open-web search
//! (Tavily) and encyclopedia search (the MediaWiki API). Both are treated as
//! opaque ranked-result services; a failed lookup degrades to an empty list
//! at the gather layer, never an abort.

use async_trait::async_trait;

use crate::error::{SearchError, SearchResult};

/// A web search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebHit {
    /// Source URL.
    pub url: String,

    /// Content excerpt from the page.
    pub content: String,
}

impl WebHit {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// An encyclopedia search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncyclopediaHit {
    /// Article title.
    pub title: String,

    /// Search snippet, HTML markers stripped.
    pub snippet: String,
}

impl EncyclopediaHit {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// Open-web search provider.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning at most `max_results` ranked hits.
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<WebHit>>;
}

/// Encyclopedia search provider.
#[async_trait]
pub trait EncyclopediaSearcher: Send + Sync {
    /// Search articles, returning at most `max_results` ranked hits.
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<EncyclopediaHit>>;
}

/// Tavily-backed web searcher.
pub struct TavilySearcher {
    api_key: String,
    client: reqwest::Client,
    /// Tavily search depth; "advanced" yields fuller content excerpts.
    pub search_depth: String,
}

impl TavilySearcher {
    /// Create a new Tavily searcher with advanced search depth.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            search_depth: "advanced".to_string(),
        }
    }

    /// Override the search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

#[async_trait]
impl WebSearcher for TavilySearcher {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<WebHit>> {
        #[derive(serde::Serialize)]
        struct Request<'a> {
            query: &'a str,
            search_depth: &'a str,
            max_results: usize,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            results: Vec<TavilyResult>,
        }

        #[derive(serde::Deserialize)]
        struct TavilyResult {
            url: Option<String>,
            content: Option<String>,
        }

        let request = Request {
            query,
            search_depth: &self.search_depth,
            max_results,
        };

        let response = self
            .client
            .post("https://api.tavily.com/search")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(SearchError::Provider {
                status: response.status().as_u16(),
            });
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        let hits = parsed
            .results
            .into_iter()
            .filter_map(|r| {
                let url = r.url?;
                Some(WebHit::new(url, r.content.unwrap_or_default()))
            })
            .take(max_results)
            .collect();

        Ok(hits)
    }
}

/// Wikipedia-backed encyclopedia searcher using the MediaWiki search API.
pub struct WikipediaSearcher {
    client: reqwest::Client,
    endpoint: String,
}

impl WikipediaSearcher {
    /// Create a searcher against the English Wikipedia.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
        }
    }

    /// Point at a different MediaWiki endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Strip the search-match highlight markers MediaWiki embeds in
    /// snippets.
    fn clean_snippet(snippet: &str) -> String {
        snippet
            .replace("<span class=\"searchmatch\">", "")
            .replace("</span>", "")
    }
}

impl Default for WikipediaSearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncyclopediaSearcher for WikipediaSearcher {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<EncyclopediaHit>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            query: Option<QueryBody>,
        }

        #[derive(serde::Deserialize)]
        struct QueryBody {
            #[serde(default)]
            search: Vec<SearchItem>,
        }

        #[derive(serde::Deserialize)]
        struct SearchItem {
            title: String,
            #[serde(default)]
            snippet: String,
        }

        let limit = max_results.to_string();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "search"),
            ("srsearch", query),
            ("utf8", "1"),
            ("srlimit", limit.as_str()),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(SearchError::Provider {
                status: response.status().as_u16(),
            });
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        let hits = parsed
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .map(|item| EncyclopediaHit::new(item.title, Self::clean_snippet(&item.snippet)))
            .take(max_results)
            .collect();

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_cleaning_strips_search_match_markers() {
        let raw = "The <span class=\"searchmatch\">Eiffel</span> Tower is in Paris";
        assert_eq!(
            WikipediaSearcher::clean_snippet(raw),
            "The Eiffel Tower is in Paris"
        );
    }
}
