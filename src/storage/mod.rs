pub mod identity;

pub use identity::{FileIdentity, IdentityProvider, StaticIdentity};
