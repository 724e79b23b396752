//! ddconf: Layered Deployment Descriptor Resolution
//!
//! Resolves the deployment descriptors of an exploded enterprise application,
//! honouring alternate (`test-ejb-jar.xml` style) descriptors, unmarshals them
//! into typed trees across schema versions, and flattens server resource
//! configuration into one effective view with per-value provenance.

pub mod assembly;
pub mod config;
pub mod descriptor;
pub mod effective;
pub mod error;
pub mod logging;
pub mod schema;
pub mod unmarshal;

pub use assembly::{AppInfo, AssemblyOptions, ModuleAssembler, ModuleInfo, ModuleKind};
pub use descriptor::{locate, AltPrefix, DescriptorIdentity, ResolvedDescriptor};
pub use effective::{compute_effective, load_server_config, EffectiveConfig, Override};
pub use error::{ConfigurationError, LocatorError, ModuleError, UnmarshalError};
pub use unmarshal::{unmarshal, ConfigTree, SchemaContext};
