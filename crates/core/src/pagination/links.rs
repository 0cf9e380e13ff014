use url::form_urlencoded;

/// Builds links to neighbouring pages of a list request.
///
/// Every query parameter of the incoming request is kept except `page`.
/// Parameters are emitted sorted by name, and the first page is linked
/// without a `page` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    path: String,
    params: Vec<(String, String)>,
}

impl PageLinks {
    pub fn new<I, K, V>(path: impl Into<String>, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: Vec<(String, String)> = query
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k != "page")
            .collect();
        params.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            path: path.into(),
            params,
        }
    }

    /// Parses the raw query string of a request URI.
    pub fn from_query_string(path: impl Into<String>, query: Option<&str>) -> Self {
        let pairs = form_urlencoded::parse(query.unwrap_or_default().as_bytes()).into_owned();
        Self::new(path, pairs)
    }

    /// Link to the given page number.
    pub fn for_page(&self, page: u64) -> String {
        let mut params: Vec<(&str, String)> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        if page > 1 {
            params.push(("page", page.to_string()));
            params.sort_by(|a, b| a.0.cmp(b.0));
        }

        if params.is_empty() {
            return self.path.clone();
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        format!("{}?{}", self.path, query)
    }
}
