//! Content type and taxonomy registration.

mod host;
mod labels;
mod registrar;
mod type_registry;

pub use host::{ContentHost, ContentTypeRegistration, TaxonomyRegistration};
pub use labels::{ContentTypeLabels, TaxonomyLabels};
pub use registrar::{Registrar, RegistrationSummary};
pub use type_registry::TypeRegistry;
