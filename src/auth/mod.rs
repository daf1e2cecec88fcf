//! Account management: password policy and the durable credential store

pub mod policy;
pub mod store;

pub use policy::PolicyRule;
pub use store::{AddUserOutcome, Credential, CredentialError, CredentialStore};
