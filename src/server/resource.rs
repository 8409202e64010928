//! Target URI to filesystem resource resolution.

use std::io;
use std::path::{Path, PathBuf};

use crate::server::mime::{MimeTable, OCTET_STREAM};

/// Classification of a request target against the served root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing, non-directory file and the MIME type to serve it as.
    Found {
        /// The filesystem path to stream
        path: PathBuf,
        /// The content type registered for its extension
        content_type: String,
    },
    /// The target does not exist, or names a directory.
    NotFound,
    /// A permission restriction prevented even checking existence.
    Forbidden,
}

/// Resolve a request target below the served root directory.
///
/// The target's leading `/` is stripped so the join stays under the root
/// prefix, then one metadata probe classifies it. The MIME type comes from
/// the final component's extension, matched case-insensitively; a file
/// without one is served as `application/octet-stream`.
pub async fn resolve(root: &Path, target: &str, mime: &MimeTable) -> Resolution {
    let path = root.join(target.trim_start_matches('/'));
    match tokio::fs::metadata(&path).await {
        Ok(meta) if !meta.is_dir() => {
            let content_type = content_type_for(&path, mime);
            Resolution::Found { path, content_type }
        }
        Ok(_) => Resolution::NotFound,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Resolution::Forbidden,
        Err(_) => Resolution::NotFound,
    }
}

fn content_type_for(path: &Path, mime: &MimeTable) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => mime.lookup(ext).to_string(),
        None => OCTET_STREAM.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("minihttpd-resource-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_existing_file_is_found_with_its_type() {
        let root = scratch_root("found");
        std::fs::write(root.join("page.html"), "<html></html>").unwrap();

        let resolution = resolve(&root, "/page.html", &MimeTable::builtin()).await;
        match resolution {
            Resolution::Found { path, content_type } => {
                assert_eq!(path, root.join("page.html"));
                assert_eq!(content_type, "text/html");
            }
            other => panic!("expected Found, got {other:?}"),
        }

        std::fs::remove_dir_all(root).unwrap();
    }

    #[tokio::test]
    async fn test_extension_matching_is_case_insensitive() {
        let root = scratch_root("case");
        std::fs::write(root.join("PAGE.HTML"), "x").unwrap();

        let resolution = resolve(&root, "/PAGE.HTML", &MimeTable::builtin()).await;
        assert!(matches!(
            resolution,
            Resolution::Found { content_type, .. } if content_type == "text/html"
        ));

        std::fs::remove_dir_all(root).unwrap();
    }

    #[tokio::test]
    async fn test_unregistered_extension_defaults_to_octet_stream() {
        let root = scratch_root("unregistered");
        std::fs::write(root.join("blob.xyz"), "x").unwrap();
        std::fs::write(root.join("noext"), "x").unwrap();

        for target in ["/blob.xyz", "/noext"] {
            let resolution = resolve(&root, target, &MimeTable::builtin()).await;
            assert!(matches!(
                resolution,
                Resolution::Found { content_type, .. } if content_type == OCTET_STREAM
            ));
        }

        std::fs::remove_dir_all(root).unwrap();
    }

    #[tokio::test]
    async fn test_missing_target_is_not_found() {
        let root = scratch_root("missing");

        let resolution = resolve(&root, "/absent.html", &MimeTable::builtin()).await;
        assert_eq!(resolution, Resolution::NotFound);

        std::fs::remove_dir_all(root).unwrap();
    }

    #[tokio::test]
    async fn test_directory_target_is_not_found() {
        let root = scratch_root("dir");
        std::fs::create_dir_all(root.join("sub")).unwrap();

        assert_eq!(resolve(&root, "/sub", &MimeTable::builtin()).await, Resolution::NotFound);
        assert_eq!(resolve(&root, "/", &MimeTable::builtin()).await, Resolution::NotFound);

        std::fs::remove_dir_all(root).unwrap();
    }
}
