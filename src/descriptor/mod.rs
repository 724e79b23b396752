//! Descriptor identities and the alt-prefix aware locator.
//!
//! A descriptor identity names the file that logically fulfills a role inside a
//! module root (for example `META-INF/ejb-jar.xml`). The locator resolves an
//! identity to zero or one concrete files, preferring alternate descriptors
//! such as `test-ejb-jar.xml` when an [`AltPrefix`] is in effect.

pub mod locator;
pub mod prefix;

pub use locator::{locate, ResolvedDescriptor};
pub use prefix::AltPrefix;

/// What file logically fulfills a descriptor's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorIdentity {
    /// Standard file name, e.g. `ejb-jar.xml`
    pub canonical_name: &'static str,
    /// Directory relative to the module root that holds the descriptor
    pub directory: &'static str,
    /// Whether an alternate `<prefix>-<name>` file may stand in for it
    pub alt_prefixable: bool,
}

impl DescriptorIdentity {
    pub const fn new(
        canonical_name: &'static str,
        directory: &'static str,
        alt_prefixable: bool,
    ) -> Self {
        Self {
            canonical_name,
            directory,
            alt_prefixable,
        }
    }
}

pub const META_INF: &str = "META-INF";
pub const WEB_INF: &str = "WEB-INF";

pub const EJB_JAR: DescriptorIdentity = DescriptorIdentity::new("ejb-jar.xml", META_INF, true);
pub const APPLICATION: DescriptorIdentity =
    DescriptorIdentity::new("application.xml", META_INF, true);
pub const WEB_APP: DescriptorIdentity = DescriptorIdentity::new("web.xml", WEB_INF, true);
pub const CONNECTOR: DescriptorIdentity = DescriptorIdentity::new("ra.xml", META_INF, true);
pub const APPLICATION_CLIENT: DescriptorIdentity =
    DescriptorIdentity::new("application-client.xml", META_INF, true);
pub const BEANS: DescriptorIdentity = DescriptorIdentity::new("beans.xml", META_INF, true);
pub const MANIFEST: DescriptorIdentity = DescriptorIdentity::new("MANIFEST.MF", META_INF, false);

/// Server configuration files live in the server's `conf` directory.
pub const OPENEJB_XML: DescriptorIdentity = DescriptorIdentity::new("openejb.xml", "conf", true);
pub const TOMEE_XML: DescriptorIdentity = DescriptorIdentity::new("tomee.xml", "conf", true);
