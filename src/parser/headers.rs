//! Request header storage.

use std::collections::HashMap;

/// Header fields of one request.
///
/// On the wire a header name arrives with its trailing colon still attached
/// (`User-Agent: curl/8.5` splits into the tokens `User-Agent:` and
/// `curl/8.5`). Insertion strips the colon and ASCII-lowercases the name,
/// and lookups normalise the same way, so the write side and the read side
/// always agree on a key. Duplicate names follow last-write-wins; insertion
/// order is not preserved.
#[derive(Debug, Clone, Default)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Store a header under its normalised name. A later insert for the
    /// same name replaces the earlier value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(Self::normalize(name), value.into());
    }

    /// Look up a header by any spelling of its name.
    ///
    /// # Examples
    ///
    /// ```
    /// use minihttpd_rs::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("User-Agent:", "curl/8.5");
    ///
    /// assert_eq!(headers.get("user-agent"), Some("curl/8.5"));
    /// assert_eq!(headers.get("User-Agent"), Some("curl/8.5"));
    /// assert_eq!(headers.get("Host"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&Self::normalize(name)).map(String::as_str)
    }

    /// Check whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&Self::normalize(name))
    }

    /// The number of distinct header names stored.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no headers were stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn normalize(name: &str) -> String {
        name.trim_end_matches(':').to_ascii_lowercase()
    }
}
