// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: JSON store/crypto/vault adapters
// - presentation: HTTP handlers and routing
// - application: access policy, ports and use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
