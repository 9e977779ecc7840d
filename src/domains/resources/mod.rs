//! Resources domain module.
//!
//! Resources are read-only, URI-addressed GitHub documents. Four classes are
//! recognized under the `github://` scheme: the user's repositories, the
//! user's profile, a repository, and a file inside a repository.
//!
//! ## Architecture
//!
//! - `registry.rs` - Static declaration of every resource class
//! - `resolver.rs` - URI → typed descriptor
//! - `service.rs` - Listing and reading through the GitHub gateway
//! - `error.rs` - Resource-specific error types

mod error;
mod registry;
mod resolver;
mod service;

pub use error::ResourceError;
pub use registry::{
    ResourceClass, ResourceKind, SCHEME, get_all_resource_templates, get_all_resources,
    resource_classes,
};
pub use resolver::{ResourceDescriptor, resolve};
pub use service::ResourceService;
