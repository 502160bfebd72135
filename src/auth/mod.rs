//! API key handling and view access control.

pub mod credentials;
pub mod gate;

pub use credentials::{Credential, CredentialStore};
pub use gate::{AuthGate, AuthState, Route, RouteDecision};
