//! Server configuration from command-line flags and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use oceer::ConvertOptions;

#[derive(Debug, Clone, Parser)]
#[command(name = "oceer-server")]
#[command(version)]
#[command(about = "Convert uploaded PDFs into page-indexed JSON documents", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "OCEER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Maximum upload size in megabytes
    #[arg(long, env = "OCEER_MAX_UPLOAD_MB", default_value_t = 50)]
    pub max_upload_mb: usize,

    /// Emit page sizes and text vertices alongside page text
    #[arg(long, env = "OCEER_GEOMETRY")]
    pub geometry: bool,

    /// Keep converting past pages whose text cannot be extracted
    #[arg(long, env = "OCEER_LENIENT")]
    pub lenient: bool,
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Upload limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Conversion options derived from the flags.
    pub fn convert_options(&self) -> ConvertOptions {
        let options = ConvertOptions::new().with_geometry(self.geometry);
        if self.lenient {
            options.lenient()
        } else {
            options
        }
    }
}
