use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Port of the control API when none is configured.
pub const DEFAULT_API_PORT: u16 = 1212;

/// Where the control API and its push channel listen.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct HttpApi {
    /// `ip:port`. Port `0` lets the OS pick a free port, which is what the
    /// tests do. Bind to `0.0.0.0` only behind a trusted network: the API has
    /// no authentication.
    #[serde(default = "HttpApi::default_bind_address")]
    pub bind_address: SocketAddr,
}

impl Default for HttpApi {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
        }
    }
}

impl HttpApi {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_API_PORT)
    }
}
