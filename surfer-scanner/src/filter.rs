use regex::Regex;
use std::sync::LazyLock;

/// Substrings that disqualify a link: non-HTML resources, non-content or
/// tracking hosts, and query/bang urls.
pub const DEFAULT_SKIP_LIST: &[&str] = &[
    ".gif",
    ".jpg",
    ".jpeg",
    ".pdf",
    ".css",
    ".js",
    ".asp",
    ".mwc",
    ".ram",
    "lmscadsi",
    "cybernet",
    "w3.org",
    "google",
    "yahoo",
    "scripts",
    "netscape",
    "shockwave",
    "webex",
    "fansonly",
    "!",
    "?",
    ".png",
    ".svg",
    "myfonts.com",
];

#[allow(clippy::expect_used)]
static HTTP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"http://[^"|<>;') ]+"#).expect("hardcoded regex pattern is valid")
});

#[allow(clippy::expect_used)]
static HTTP_OR_HTTPS_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^"|<>;') ]+"#).expect("hardcoded regex pattern is valid")
});

/// Which absolute-link schemes the filter recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemePolicy {
    /// Only `http://` links. `https://` links are rejected.
    #[default]
    HttpOnly,
    /// Both `http://` and `https://` links.
    HttpOrHttps,
}

impl SchemePolicy {
    fn pattern(self) -> &'static Regex {
        match self {
            SchemePolicy::HttpOnly => &*HTTP_LINK,
            SchemePolicy::HttpOrHttps => &*HTTP_OR_HTTPS_LINK,
        }
    }
}

/// Predicate deciding which extracted links may join the frontier.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    scheme: SchemePolicy,
    skip_list: Vec<String>,
}

impl LinkFilter {
    pub fn new() -> Self {
        Self {
            scheme: SchemePolicy::default(),
            skip_list: DEFAULT_SKIP_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_scheme(mut self, scheme: SchemePolicy) -> Self {
        self.scheme = scheme;
        self
    }

    /// Replace the exclusion list entirely.
    pub fn with_skip_list<I, S>(mut self, skip_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_list = skip_list.into_iter().map(Into::into).collect();
        self
    }

    /// Append to the current exclusion list.
    pub fn extend_skip_list<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_list.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn scheme(&self) -> SchemePolicy {
        self.scheme
    }

    pub fn skip_list(&self) -> &[String] {
        &self.skip_list
    }

    /// True when `link` contains an absolute link for the configured scheme
    /// and none of the excluded substrings.
    pub fn is_valid(&self, link: &str) -> bool {
        self.scheme.pattern().is_match(link) && !self.is_skipped(link)
    }

    fn is_skipped(&self, link: &str) -> bool {
        self.skip_list.iter().any(|s| link.contains(s.as_str()))
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// [`LinkFilter::is_valid`] with the default policy and exclusion list.
pub fn is_valid(link: &str) -> bool {
    static DEFAULT_FILTER: LazyLock<LinkFilter> = LazyLock::new(LinkFilter::new);
    DEFAULT_FILTER.is_valid(link)
}
