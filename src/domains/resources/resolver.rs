//! URI resolver: resource URI → [`ResourceDescriptor`].

use super::error::ResourceError;
use super::registry::{ResourceKind, SCHEME, resource_classes};
use crate::domains::github::{RenderHint, has_dot_segment};

/// A resolved resource address. Only [`resolve`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    /// `[]` for account-level kinds, `[owner, repo]` for a repository,
    /// `[owner, repo, path]` for a file.
    pub segments: Vec<String>,
}

impl ResourceDescriptor {
    fn segment(&self, idx: usize) -> &str {
        self.segments.get(idx).map(String::as_str).unwrap_or_default()
    }

    pub fn owner(&self) -> &str {
        self.segment(0)
    }

    pub fn repo(&self) -> &str {
        self.segment(1)
    }

    pub fn path(&self) -> &str {
        self.segment(2)
    }

    /// How the payload behind this resource is rendered.
    pub fn render_hint(&self) -> RenderHint {
        match self.kind {
            ResourceKind::Repositories => RenderHint::Listing {
                noun: "Repositories",
            },
            ResourceKind::User | ResourceKind::RepoDetail => RenderHint::Json,
            ResourceKind::File => RenderHint::File {
                path: self.path().to_string(),
            },
        }
    }
}

/// Resolve `uri` against the declared resource classes.
///
/// Exact URIs are tried before templates. A file path is kept whole, so it
/// may contain `/`.
pub fn resolve(uri: &str) -> Result<ResourceDescriptor, ResourceError> {
    if !uri.starts_with(SCHEME) {
        return Err(ResourceError::unknown(uri));
    }
    let classes = resource_classes();

    if let Some(class) = classes
        .iter()
        .find(|class| !class.is_template() && class.uri == uri)
    {
        return Ok(ResourceDescriptor {
            kind: class.kind,
            segments: Vec::new(),
        });
    }

    for class in classes.iter().filter(|class| class.is_template()) {
        if let Some(rest) = uri.strip_prefix(class.prefix()) {
            return split_segments(class.kind, rest)
                .map(|segments| ResourceDescriptor {
                    kind: class.kind,
                    segments,
                })
                .ok_or_else(|| ResourceError::unknown(uri));
        }
    }

    Err(ResourceError::unknown(uri))
}

/// Split the part after a template prefix into the segments its kind expects.
/// `.` and `..` segments never resolve, in the owner, the repo or the path.
fn split_segments(kind: ResourceKind, rest: &str) -> Option<Vec<String>> {
    let (segments, expected): (Vec<&str>, usize) = match kind {
        ResourceKind::RepoDetail => (rest.split('/').collect(), 2),
        ResourceKind::File => (rest.splitn(3, '/').collect(), 3),
        ResourceKind::Repositories | ResourceKind::User => return None,
    };

    if segments.len() != expected
        || segments
            .iter()
            .any(|s| s.is_empty() || has_dot_segment(s))
    {
        return None;
    }
    Some(segments.into_iter().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches() {
        assert_eq!(
            resolve("github://repositories").unwrap().kind,
            ResourceKind::Repositories
        );
        let user = resolve("github://user").unwrap();
        assert_eq!(user.kind, ResourceKind::User);
        assert!(user.segments.is_empty());
    }

    #[test]
    fn test_repo_detail() {
        let d = resolve("github://repo/rust-lang/cargo").unwrap();
        assert_eq!(d.kind, ResourceKind::RepoDetail);
        assert_eq!(d.owner(), "rust-lang");
        assert_eq!(d.repo(), "cargo");
        assert_eq!(d.render_hint(), RenderHint::Json);
    }

    #[test]
    fn test_repo_requires_exactly_two_segments() {
        assert!(resolve("github://repo/rust-lang").is_err());
        assert!(resolve("github://repo/rust-lang/cargo/extra").is_err());
        assert!(resolve("github://repo/rust-lang/").is_err());
        assert!(resolve("github://repo/").is_err());
        assert!(resolve("github://repo//cargo").is_err());
    }

    #[test]
    fn test_file_path_is_not_resplit() {
        let d = resolve("github://file/rust-lang/cargo/src/cargo/lib.rs").unwrap();
        assert_eq!(d.kind, ResourceKind::File);
        assert_eq!(d.segments, vec!["rust-lang", "cargo", "src/cargo/lib.rs"]);
        assert_eq!(
            d.render_hint(),
            RenderHint::File {
                path: "src/cargo/lib.rs".to_string()
            }
        );
    }

    #[test]
    fn test_file_requires_path() {
        assert!(resolve("github://file/rust-lang/cargo").is_err());
        assert!(resolve("github://file/rust-lang/cargo/").is_err());
        assert!(resolve("github://file/rust-lang").is_err());
    }

    #[test]
    fn test_dot_segments_do_not_resolve() {
        for uri in [
            "github://repo/octo/..",
            "github://repo/./hello",
            "github://file/octo/hello/../../../user",
            "github://file/octo/hello/src/./lib.rs",
            "github://file/../hello/README.md",
        ] {
            assert!(resolve(uri).is_err(), "{uri:?} should not resolve");
        }
        let d = resolve("github://file/octo/hello/notes#1.md").unwrap();
        assert_eq!(d.path(), "notes#1.md");
    }

    #[test]
    fn test_unknown_uris() {
        for uri in [
            "github://repositories/extra",
            "github://users",
            "github://issues/1",
            "file:///etc/passwd",
            "GITHUB://user",
            "",
        ] {
            let err = resolve(uri).unwrap_err();
            assert!(
                matches!(err, ResourceError::UnknownResource(ref u) if u == uri),
                "{uri:?} should not resolve"
            );
        }
    }
}
