//! Literal lines and header rows recognized in a status file

use serde::{Deserialize, Serialize};

pub const CLIENT_LIST_TITLE: &str = "OpenVPN CLIENT LIST";
pub const ROUTING_TABLE_TITLE: &str = "ROUTING TABLE";
pub const GLOBAL_STATS_TITLE: &str = "GLOBAL STATS";
pub const UPDATED_KEY: &str = "Updated";
pub const FOOTER: &str = "END";
pub const MAX_BCAST_MCAST_QUEUE_LEN_KEY: &str = "Max bcast/mcast queue length";

pub const CLIENT_LIST_COLUMNS: [&str; 5] = [
    "Common Name",
    "Real Address",
    "Bytes Received",
    "Bytes Sent",
    "Connected Since",
];

pub const ROUTING_TABLE_COLUMNS: [&str; 4] = [
    "Virtual Address",
    "Common Name",
    "Real Address",
    "Last Ref",
];

/// How a line is compared against a column header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMatching {
    /// Same field count, every field equal
    #[default]
    Exact,
    /// Line may be shorter than the header; present fields must be equal
    Prefix,
}

/// Which column header row a line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRow {
    ClientList,
    RoutingTable,
}

impl HeaderMatching {
    fn matches(self, fields: &[&str], columns: &[&str]) -> bool {
        let len_ok = match self {
            HeaderMatching::Exact => fields.len() == columns.len(),
            HeaderMatching::Prefix => fields.len() <= columns.len(),
        };
        len_ok && fields.iter().zip(columns).all(|(f, c)| f == c)
    }

    /// Client list header is checked before the routing table header
    pub fn header_row(self, fields: &[&str]) -> Option<HeaderRow> {
        if self.matches(fields, &CLIENT_LIST_COLUMNS) {
            Some(HeaderRow::ClientList)
        } else if self.matches(fields, &ROUTING_TABLE_COLUMNS) {
            Some(HeaderRow::RoutingTable)
        } else {
            None
        }
    }
}
