//! routeshift routes - route file conventions
//!
//! Classifies files under a Next.js `app/` directory into route kinds,
//! converts bracketed dynamic segments into `$param` form, and computes
//! the TanStack Router file each route is written to.

mod discovery;
mod route;
mod segment;

pub use discovery::*;
pub use route::*;
pub use segment::*;
