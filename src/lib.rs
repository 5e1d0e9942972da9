//! routeshift - Next.js App Router to TanStack Router migration
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

pub use routeshift_cli as cli;
pub use routeshift_routes as routes;
pub use routeshift_syntax as syntax;
pub use routeshift_transform as transform;
