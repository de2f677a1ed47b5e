use crate::error::Result;
use crate::protocol::{BulkRequest, GatewayResponse};

pub const LIVE_ENDPOINT: &str = "https://api.africastalking.com/version1/messaging";
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.africastalking.com/version1/messaging";

/// The single outbound RPC. Any error counts as a failure of the whole batch.
pub trait Transport {
    fn transport_name(&self) -> &'static str;
    fn send(&self, request: &BulkRequest<'_>) -> Result<GatewayResponse>;
}

#[cfg(feature = "http")]
mod imp {
    use super::{Transport, LIVE_ENDPOINT, SANDBOX_ENDPOINT};
    use crate::error::{Result, TransportError};
    use crate::protocol::{parse_response, BulkRequest, GatewayResponse};
    use bulksms_core::GatewayConfig;
    use reqwest::blocking::Client;
    use std::time::Duration;
    use url::Url;

    const CONNECT_TIMEOUT_SECS: u64 = 10;

    pub fn endpoint_for(config: &GatewayConfig) -> &str {
        match config.endpoint.as_deref() {
            Some(endpoint) => endpoint,
            None if config.mode.is_sandbox() => SANDBOX_ENDPOINT,
            None => LIVE_ENDPOINT,
        }
    }

    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
        endpoint: Url,
    }

    impl HttpTransport {
        pub fn from_config(config: &GatewayConfig) -> Result<Self> {
            let endpoint = Url::parse(endpoint_for(config))?;
            let mut builder = Client::builder()
                .user_agent(concat!("bulksms/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(config.timeout_secs))
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
            // Loopback endpoints never go through a proxy.
            if is_loopback(&endpoint) {
                builder = builder.no_proxy();
            }
            let client = builder.build()?;
            Ok(Self { client, endpoint })
        }

        pub fn endpoint(&self) -> &Url {
            &self.endpoint
        }
    }

    fn is_loopback(url: &Url) -> bool {
        match url.host() {
            Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
            Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
            Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
            None => false,
        }
    }

    impl Transport for HttpTransport {
        fn transport_name(&self) -> &'static str {
            "http"
        }

        fn send(&self, request: &BulkRequest<'_>) -> Result<GatewayResponse> {
            let response = self
                .client
                .post(self.endpoint.clone())
                .header("apiKey", request.api_key)
                .header("Accept", "application/json")
                .form(&request.form_fields())
                .send()?
                .error_for_status()?;

            let body = response.text()?;
            parse_response(&body).map_err(|err| TransportError::Decode(err.to_string()))
        }
    }

}

#[cfg(feature = "http")]
pub use imp::{endpoint_for, HttpTransport};
