//! Resource Registry - static declaration of every resource class.
//!
//! Two classes are concrete resources with a fixed URI; the other two are
//! RFC 6570 URI templates that clients fill in. The URI resolver matches
//! against the prefixes declared here, so adding a class starts in this file.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

/// URI scheme shared by every resource.
pub const SCHEME: &str = "github://";

/// The four addressable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Repositories,
    User,
    RepoDetail,
    File,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Repositories => "repositories",
            Self::User => "user",
            Self::RepoDetail => "repo-detail",
            Self::File => "file",
        }
    }
}

/// Declaration of one resource class.
#[derive(Debug, Clone, Copy)]
pub struct ResourceClass {
    pub kind: ResourceKind,
    /// Exact URI, or a URI template containing `{placeholders}`.
    pub uri: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

impl ResourceClass {
    pub fn is_template(&self) -> bool {
        self.uri.contains('{')
    }

    /// Literal part of the URI before the first placeholder.
    pub fn prefix(&self) -> &'static str {
        match self.uri.find('{') {
            Some(idx) => &self.uri[..idx],
            None => self.uri,
        }
    }
}

const RESOURCE_CLASSES: [ResourceClass; 4] = [
    ResourceClass {
        kind: ResourceKind::Repositories,
        uri: "github://repositories",
        name: "GitHub Repositories",
        title: "Your Repositories",
        description: "List of user's GitHub repositories",
        mime_type: "application/json",
    },
    ResourceClass {
        kind: ResourceKind::User,
        uri: "github://user",
        name: "GitHub User Profile",
        title: "Your Profile",
        description: "Authenticated user's GitHub profile",
        mime_type: "application/json",
    },
    ResourceClass {
        kind: ResourceKind::RepoDetail,
        uri: "github://repo/{owner}/{repo}",
        name: "GitHub Repository",
        title: "Repository Details",
        description: "Detailed information about a repository",
        mime_type: "application/json",
    },
    ResourceClass {
        kind: ResourceKind::File,
        uri: "github://file/{owner}/{repo}/{path}",
        name: "GitHub File",
        title: "Repository File",
        description: "Content of a file in a repository (default branch)",
        mime_type: "application/json",
    },
];

/// Every declared resource class, in declaration order.
pub fn resource_classes() -> &'static [ResourceClass] {
    &RESOURCE_CLASSES
}

/// Concrete resources advertised by `resources/list`.
pub fn get_all_resources() -> Vec<Resource> {
    resource_classes()
        .iter()
        .filter(|class| !class.is_template())
        .map(|class| {
            let mut raw = RawResource::new(class.uri, class.name);
            raw.description = Some(class.description.to_string());
            raw.mime_type = Some(class.mime_type.to_string());
            raw.no_annotation()
        })
        .collect()
}

/// Parameterized resources advertised by `resources/templates/list`.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    resource_classes()
        .iter()
        .filter(|class| class.is_template())
        .map(|class| {
            RawResourceTemplate {
                uri_template: class.uri.to_string(),
                name: class.name.to_string(),
                title: Some(class.title.to_string()),
                description: Some(class.description.to_string()),
                mime_type: Some(class.mime_type.to_string()),
            }
            .no_annotation()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 2);

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.raw.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["github://repositories", "github://user"]);
        assert!(resources
            .iter()
            .all(|r| r.raw.mime_type.as_deref() == Some("application/json")));
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 2);

        let uri_templates: Vec<_> = templates
            .iter()
            .map(|t| t.raw.uri_template.as_str())
            .collect();
        assert!(uri_templates.contains(&"github://repo/{owner}/{repo}"));
        assert!(uri_templates.contains(&"github://file/{owner}/{repo}/{path}"));
    }

    #[test]
    fn test_prefixes() {
        let prefixes: Vec<_> = resource_classes().iter().map(|c| c.prefix()).collect();
        assert_eq!(
            prefixes,
            vec![
                "github://repositories",
                "github://user",
                "github://repo/",
                "github://file/"
            ]
        );
        assert!(prefixes.iter().all(|p| p.starts_with(SCHEME)));
    }
}
