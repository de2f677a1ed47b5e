pub mod error;
pub mod orchestrator;
pub mod protocol;
pub mod transport;

pub use error::{SendRejected, TransportError};
pub use orchestrator::{reconcile, send_bulk, SendReport};
pub use protocol::{BulkRequest, GatewayResponse, RecipientReceipt, STATUS_ACCEPTED};
pub use transport::Transport;
#[cfg(feature = "http")]
pub use transport::{endpoint_for, HttpTransport};
