// vpsdash-api: backend port for the vpsdash customer dashboard (mock + HTTP)

pub mod auth;
pub mod backend;
pub mod error;
pub mod http;
pub mod mock;
pub mod transport;
pub mod types;

pub use auth::SessionSlot;
pub use backend::Backend;
pub use error::Error;
pub use http::HttpBackend;
pub use mock::{DEMO_EMAIL, Latency, MAX_LATENCY_SCALE, MockBackend};
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};
