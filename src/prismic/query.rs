//! Search query builder

use std::fmt;

/// A single search predicate in the repository query language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[at(path, "value")]`: exact match
    At(String, String),
}

impl Predicate {
    pub fn at(path: &str, value: &str) -> Self {
        Predicate::At(path.to_string(), value.to_string())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At(path, value) => write!(f, "[at({}, {})]", path, quote(value)),
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Document search: predicates, field projection and page size
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub predicates: Vec<Predicate>,
    pub fetch: Vec<String>,
    pub page_size: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// The `q` parameter, e.g. `[[at(document.type, "posts")]]`
    pub fn q(&self) -> String {
        let predicates: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
        format!("[{}]", predicates.join(""))
    }

    /// Query-string pairs, excluding `ref` and `access_token`
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q())];
        if !self.fetch.is_empty() {
            params.push(("fetch", self.fetch.join(",")));
        }
        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }
        params
    }
}
