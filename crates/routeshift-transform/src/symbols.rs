//! Names the transform synthesizes in generated code

use std::fmt;

/// Package the router primitives are imported from
pub const ROUTER_PACKAGE: &str = "@tanstack/react-router";

/// Package providing the `Image` replacement for `next/image`
pub const IMAGE_PACKAGE: &str = "@unpic/react";

/// Identifier of the exported route registration
pub const ROUTE_BINDING: &str = "Route";

/// Symbols exported by the router package that generated code refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterSymbol {
    Outlet,
    CreateFileRoute,
    CreateRootRoute,
    HeadContent,
    Scripts,
    Link,
    UseNavigate,
    UseLocation,
    UseSearch,
}

impl RouterSymbol {
    pub fn as_str(self) -> &'static str {
        match self {
            RouterSymbol::Outlet => "Outlet",
            RouterSymbol::CreateFileRoute => "createFileRoute",
            RouterSymbol::CreateRootRoute => "createRootRoute",
            RouterSymbol::HeadContent => "HeadContent",
            RouterSymbol::Scripts => "Scripts",
            RouterSymbol::Link => "Link",
            RouterSymbol::UseNavigate => "useNavigate",
            RouterSymbol::UseLocation => "useLocation",
            RouterSymbol::UseSearch => "useSearch",
        }
    }
}

impl fmt::Display for RouterSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the route registration is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteFactory {
    /// `createFileRoute("<path>")({...})`
    File { path: String },
    /// `createRootRoute({...})`
    Root,
}

impl RouteFactory {
    pub fn symbol(&self) -> RouterSymbol {
        match self {
            RouteFactory::File { .. } => RouterSymbol::CreateFileRoute,
            RouteFactory::Root => RouterSymbol::CreateRootRoute,
        }
    }

    /// The symbols imported at the top of every transformed file
    pub fn imported_symbols(&self) -> [RouterSymbol; 4] {
        [
            RouterSymbol::Outlet,
            self.symbol(),
            RouterSymbol::HeadContent,
            RouterSymbol::Scripts,
        ]
    }
}

/// Option key the component is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentSlot {
    Component,
    PendingComponent,
    ErrorComponent,
}

impl ComponentSlot {
    pub fn key(self) -> &'static str {
        match self {
            ComponentSlot::Component => "component",
            ComponentSlot::PendingComponent => "pendingComponent",
            ComponentSlot::ErrorComponent => "errorComponent",
        }
    }
}

/// Request methods an API route may export handlers for
pub const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_factory_imports() {
        let names: Vec<&str> = RouteFactory::Root
            .imported_symbols()
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(names, ["Outlet", "createRootRoute", "HeadContent", "Scripts"]);
    }

    #[test]
    fn test_file_factory_symbol() {
        let factory = RouteFactory::File {
            path: "/about".to_string(),
        };
        assert_eq!(factory.symbol().to_string(), "createFileRoute");
    }
}
