pub mod models;
pub mod provider;
pub mod service;
pub mod signal;


pub use models::{AuthState, UserInfo};
pub use provider::{IdentityProvider, LocalIdentityProvider};
pub use service::IdentityClient;
pub use signal::{AuthSignal, AuthSubscription};
