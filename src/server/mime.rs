//! The extension → MIME type table.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::server::error::Error;

/// The type served for files whose extension is absent or unregistered.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Immutable mapping from lowercase file extension to MIME type, built once
/// at startup and shared read-only by every connection.
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// The two-entry table used when no usable source file exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use minihttpd_rs::MimeTable;
    ///
    /// let table = MimeTable::builtin();
    /// assert_eq!(table.lookup("html"), "text/html");
    /// assert_eq!(table.lookup("HTM"), "text/html");
    /// assert_eq!(table.lookup("png"), "application/octet-stream");
    /// ```
    pub fn builtin() -> Self {
        let mut types = HashMap::new();
        types.insert("html".to_string(), "text/html".to_string());
        types.insert("htm".to_string(), "text/html".to_string());
        Self { types }
    }

    /// Parse a `mime.types`-style file.
    ///
    /// Blank lines and lines starting with `#` are skipped; every other
    /// line is whitespace-tokenised as `type ext1 ext2 …`, so one type may
    /// register under several extensions. A later mapping for an extension
    /// overwrites an earlier one. A file yielding no mapping at all is an
    /// error, like an unreadable one.
    pub async fn from_file(path: &Path) -> Result<Self, Error> {
        let text = tokio::fs::read_to_string(path).await?;

        let mut types = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let mime = match fields.next() {
                Some(mime) => mime,
                None => continue,
            };
            for ext in fields {
                types.insert(ext.to_ascii_lowercase(), mime.to_string());
            }
        }

        if types.is_empty() {
            return Err(Error::EmptyMimeTable(path.display().to_string()));
        }
        Ok(Self { types })
    }

    /// Build the table for server startup.
    ///
    /// An explicitly configured source that fails to load falls back to the
    /// built-in table; with no source configured, `./mime.types` is tried
    /// first. Either fallback is logged, never fatal.
    pub async fn load(explicit: Option<&Path>) -> Self {
        let source = explicit.unwrap_or_else(|| Path::new("mime.types"));
        match Self::from_file(source).await {
            Ok(table) => {
                info!("MIME table loaded from {} ({} extensions)", source.display(), table.len());
                table
            }
            Err(e) => {
                warn!(
                    "cannot load MIME table from {}: {e}; using the built-in table",
                    source.display()
                );
                Self::builtin()
            }
        }
    }

    /// Resolve a file extension, case-insensitively. Unknown extensions map
    /// to [`OCTET_STREAM`].
    pub fn lookup(&self, ext: &str) -> &str {
        self.types
            .get(&ext.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or(OCTET_STREAM)
    }

    /// The number of registered extensions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
