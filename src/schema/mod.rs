//! Typed descriptor models
//!
//! Each model only declares its serde shape and the schema contexts it accepts;
//! everything else (location, version selection, merging) is generic.

pub const JAKARTAEE_NS: &str = "https://jakarta.ee/xml/ns/jakartaee";
pub const JAVAEE_NS: &str = "http://xmlns.jcp.org/xml/ns/javaee";
pub const JAVAEE_LEGACY_NS: &str = "http://java.sun.com/xml/ns/javaee";
pub const J2EE_NS: &str = "http://java.sun.com/xml/ns/j2ee";

/// Schema contexts shared by the platform descriptors: every namespace the
/// platform has used for `$root`, newest first, then the namespace-less DTD form.
macro_rules! platform_contexts {
    ($root:literal) => {
        &[
            $crate::unmarshal::SchemaContext::new(
                "jakartaee",
                $root,
                Some($crate::schema::JAKARTAEE_NS),
            ),
            $crate::unmarshal::SchemaContext::new("javaee", $root, Some($crate::schema::JAVAEE_NS)),
            $crate::unmarshal::SchemaContext::new(
                "javaee-legacy",
                $root,
                Some($crate::schema::JAVAEE_LEGACY_NS),
            ),
            $crate::unmarshal::SchemaContext::new("j2ee", $root, Some($crate::schema::J2EE_NS)),
            $crate::unmarshal::SchemaContext::new("dtd", $root, None),
        ]
    };
}

pub mod application;
pub mod client;
pub mod connector;
pub mod ejb_jar;
pub mod server;
pub mod service_jar;
pub mod web;

pub use application::{Application, ModuleRef};
pub use client::ApplicationClient;
pub use connector::Connector;
pub use ejb_jar::EjbJar;
pub use server::{ServerConfig, ServiceDeclaration};
pub use service_jar::{ServiceJar, ServiceProvider};
pub use web::WebApp;
