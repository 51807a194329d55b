//! ovpn-status - parser for OpenVPN status files
//!
//! Reads the periodic status report an OpenVPN server writes (`--status`,
//! version 1 layout) and turns it into a [`Status`] snapshot:
//!
//! - connected clients (`OpenVPN CLIENT LIST` section)
//! - routing table entries (`ROUTING TABLE` section)
//! - global counters (`GLOBAL STATS` section)
//! - the time the daemon last updated the file
//!
//! ```no_run
//! use ovpn_status::StatusParser;
//!
//! let parser = StatusParser::default();
//! let status = parser.parse_file("/var/run/openvpn/server.status")?;
//! for client in &status.client_list {
//!     println!("{} from {}", client.common_name, client.real_address);
//! }
//! # Ok::<(), ovpn_status::StatusError>(())
//! ```
//!
//! Structural problems (unknown lines, empty files, unreadable files) are
//! errors. Bad scalar fields such as an unparsable timestamp are not; they
//! degrade to `None` or to the previous value.

pub mod config;
pub mod error;
pub mod parser;
pub mod status;

pub use config::{Config, ParserConfig};
pub use error::{ErrorKind, Result, StatusError};
pub use parser::headers::HeaderMatching;
pub use parser::{parse_file, StatusParser};
pub use status::{Client, GlobalStats, Routing, Status};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
