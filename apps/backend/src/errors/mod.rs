pub mod domain;

pub use domain::{AuthorizationKind, DomainError, NotFoundKind, PreconditionKind};
