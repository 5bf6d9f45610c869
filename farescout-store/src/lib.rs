pub mod app_config;
pub mod kv;
pub mod session_repo;
pub mod sky_client;

pub use kv::{FileKvStore, StoreError};
pub use session_repo::{AuthError, SessionStore, UserAccount};
pub use sky_client::SkyProviderClient;
