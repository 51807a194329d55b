//! Line-driven parser for OpenVPN status files
//!
//! The file is read in a single pass. Section titles and column header rows
//! switch the parser between sections; every other line must be a record of
//! the current section or the parse fails.

use crate::config::ParserConfig;
use crate::error::{Result, StatusError};
use crate::status::{Client, GlobalStats, Routing, Status};
use log::{debug, trace, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

pub mod fields;
pub mod headers;

use fields::{parse_int_or, parse_timestamp};
use headers::{
    HeaderMatching, HeaderRow, CLIENT_LIST_TITLE, FOOTER, GLOBAL_STATS_TITLE,
    MAX_BCAST_MCAST_QUEUE_LEN_KEY, ROUTING_TABLE_TITLE, UPDATED_KEY,
};

/// Which kind of record the parser currently expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    None,
    Clients,
    Routing,
    GlobalStats,
}

/// Accumulators for one parse call
#[derive(Debug, Default)]
struct ParseState {
    mode: Mode,
    lines: usize,
    updated_at: Option<String>,
    clients: Vec<Client>,
    routing: Vec<Routing>,
    global_stats: GlobalStats,
}

impl ParseState {
    /// Consume one line; `false` means it fits nowhere
    fn accept(&mut self, fields: &[&str], matching: HeaderMatching) -> bool {
        match fields {
            [FOOTER] => {}
            [CLIENT_LIST_TITLE, ..] | [ROUTING_TABLE_TITLE, ..] => {}
            [GLOBAL_STATS_TITLE, ..] => self.enter(Mode::GlobalStats),
            [UPDATED_KEY, when] => self.updated_at = Some((*when).to_string()),
            _ => return self.accept_row(fields, matching),
        }
        true
    }

    fn accept_row(&mut self, fields: &[&str], matching: HeaderMatching) -> bool {
        if let Some(row) = matching.header_row(fields) {
            self.enter(match row {
                HeaderRow::ClientList => Mode::Clients,
                HeaderRow::RoutingTable => Mode::Routing,
            });
            return true;
        }

        match (self.mode, fields) {
            (Mode::Clients, &[common_name, real_address, bytes_received, bytes_sent, since]) => {
                self.clients.push(Client {
                    common_name: common_name.to_string(),
                    real_address: real_address.to_string(),
                    bytes_received: bytes_received.to_string(),
                    bytes_sent: bytes_sent.to_string(),
                    connected_since: parse_timestamp(since),
                });
            }
            (Mode::Routing, &[virtual_address, common_name, real_address, last_ref]) => {
                self.routing.push(Routing {
                    virtual_address: virtual_address.to_string(),
                    common_name: common_name.to_string(),
                    real_address: real_address.to_string(),
                    last_ref: parse_timestamp(last_ref),
                });
            }
            (Mode::GlobalStats, &[key, value]) => {
                if key == MAX_BCAST_MCAST_QUEUE_LEN_KEY {
                    let stats = &mut self.global_stats;
                    stats.max_bcast_mcast_queue_len =
                        parse_int_or(value, stats.max_bcast_mcast_queue_len);
                } else {
                    debug!("Skipping unknown global stat {key:?}");
                }
            }
            _ => return false,
        }
        true
    }

    fn enter(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("Line {}: {:?} -> {:?}", self.lines, self.mode, mode);
        }
        self.mode = mode;
    }

    fn finish(self) -> Status {
        debug!(
            "Parsed {} lines: {} clients, {} routes",
            self.lines,
            self.clients.len(),
            self.routing.len()
        );

        Status {
            client_list: self.clients,
            routing_table: self.routing,
            global_stats: self.global_stats,
            updated_at: self
                .updated_at
                .as_deref()
                .and_then(parse_timestamp),
            is_up: true,
        }
    }
}

/// Strip the `\n` or `\r\n` line terminator
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// OpenVPN status file parser
///
/// Holds only configuration; every call works on its own state, so one
/// parser can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct StatusParser {
    config: ParserConfig,
}

impl StatusParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Get parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse the status file at `path`
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Status> {
        let path = path.as_ref();
        let file = File::open(path).map_err(StatusError::Open)?;
        debug!("Parsing status file {}", path.display());

        self.parse_reader(BufReader::new(file))
    }

    /// Parse a status report from any buffered text source
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<Status> {
        let matching = self.config.header_matching;
        let mut state = ParseState::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader
                .read_until(b'\n', &mut buf)
                .map_err(StatusError::Read)?
                == 0
            {
                break;
            }
            state.lines += 1;

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            let fields: Vec<&str> = line.split(',').collect();
            trace!("Line {} ({:?}): {:?}", state.lines, state.mode, fields);

            if !state.accept(&fields, matching) {
                warn!(
                    "Unrecognized line {} in {:?} section: {:?}",
                    state.lines, state.mode, line
                );
                return Err(StatusError::Malformed {
                    line: state.lines,
                    content: line.to_string(),
                });
            }
        }

        if state.lines == 0 {
            return Err(StatusError::Empty);
        }

        Ok(state.finish())
    }

    /// Parse a status report held in memory
    pub fn parse_str(&self, text: &str) -> Result<Status> {
        self.parse_reader(text.as_bytes())
    }

    /// Parse `path`, pairing any failure with a down snapshot
    pub fn snapshot_file<P: AsRef<Path>>(&self, path: P) -> (Status, Option<StatusError>) {
        match self.parse_file(path) {
            Ok(status) => (status, None),
            Err(e) => (Status::down(), Some(e)),
        }
    }
}

/// Parse the status file at `path` with the default configuration
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Status> {
    StatusParser::default().parse_file(path)
}

impl FromStr for Status {
    type Err = StatusError;

    fn from_str(text: &str) -> Result<Self> {
        StatusParser::default().parse_str(text)
    }
}
