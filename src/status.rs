//! Snapshot types produced by the status parser

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A currently connected peer from the client list section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub common_name: String,
    /// `ip:port` as written by the daemon
    pub real_address: String,
    /// Textual numeral, kept exactly as read
    pub bytes_received: String,
    /// Textual numeral, kept exactly as read
    pub bytes_sent: String,
    /// `None` when the timestamp text could not be parsed
    pub connected_since: Option<NaiveDateTime>,
}

impl Client {
    /// Bytes received as a number, if the text is a valid unsigned integer
    pub fn bytes_received_count(&self) -> Option<u64> {
        self.bytes_received.parse().ok()
    }

    /// Bytes sent as a number, if the text is a valid unsigned integer
    pub fn bytes_sent_count(&self) -> Option<u64> {
        self.bytes_sent.parse().ok()
    }
}

/// One row of the routing table section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routing {
    pub virtual_address: String,
    pub common_name: String,
    pub real_address: String,
    /// `None` when the timestamp text could not be parsed
    pub last_ref: Option<NaiveDateTime>,
}

/// Daemon-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub max_bcast_mcast_queue_len: i64,
}

/// Complete parsed result of one status file
///
/// A snapshot with `is_up == false` is only ever produced together with an
/// error; its collections are empty and carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub client_list: Vec<Client>,
    pub routing_table: Vec<Routing>,
    pub global_stats: GlobalStats,
    pub updated_at: Option<NaiveDateTime>,
    pub is_up: bool,
}

impl Status {
    /// Snapshot returned alongside a parse failure
    pub fn down() -> Self {
        Self::default()
    }

    /// First client with the given common name
    pub fn client(&self, common_name: &str) -> Option<&Client> {
        self.client_list
            .iter()
            .find(|c| c.common_name == common_name)
    }

    /// Routing entries pointing at the given common name
    pub fn routes_for<'a>(&'a self, common_name: &'a str) -> impl Iterator<Item = &'a Routing> {
        self.routing_table
            .iter()
            .filter(move |r| r.common_name == common_name)
    }

    pub fn client_count(&self) -> usize {
        self.client_list.len()
    }

    pub fn route_count(&self) -> usize {
        self.routing_table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Status {
        let since = NaiveDate::from_ymd_opt(2015, 6, 18)
            .unwrap()
            .and_hms_opt(4, 23, 3)
            .unwrap();
        Status {
            client_list: vec![
                Client {
                    common_name: "alice".to_string(),
                    real_address: "203.0.113.10:51234".to_string(),
                    bytes_received: "334948".to_string(),
                    bytes_sent: "n/a".to_string(),
                    connected_since: Some(since),
                },
                Client {
                    common_name: "alice".to_string(),
                    real_address: "203.0.113.11:40000".to_string(),
                    bytes_received: "1".to_string(),
                    bytes_sent: "2".to_string(),
                    connected_since: None,
                },
            ],
            routing_table: vec![
                Routing {
                    virtual_address: "10.8.0.6".to_string(),
                    common_name: "alice".to_string(),
                    real_address: "203.0.113.10:51234".to_string(),
                    last_ref: Some(since),
                },
                Routing {
                    virtual_address: "10.8.0.10".to_string(),
                    common_name: "bob".to_string(),
                    real_address: "198.51.100.7:1194".to_string(),
                    last_ref: None,
                },
            ],
            global_stats: GlobalStats::default(),
            updated_at: Some(since),
            is_up: true,
        }
    }

    #[test]
    fn test_down_snapshot() {
        let status = Status::down();
        assert!(!status.is_up);
        assert_eq!(status.client_count(), 0);
        assert_eq!(status.route_count(), 0);
        assert_eq!(status.global_stats.max_bcast_mcast_queue_len, 0);
        assert!(status.updated_at.is_none());
    }

    #[test]
    fn test_lookups() {
        let status = sample();

        let alice = status.client("alice").unwrap();
        assert_eq!(alice.real_address, "203.0.113.10:51234");
        assert!(status.client("carol").is_none());

        assert_eq!(status.routes_for("alice").count(), 1);
        assert_eq!(status.routes_for("bob").next().unwrap().virtual_address, "10.8.0.10");
    }

    #[test]
    fn test_byte_counts() {
        let status = sample();
        let client = &status.client_list[0];
        assert_eq!(client.bytes_received_count(), Some(334_948));
        assert_eq!(client.bytes_sent_count(), None);
        assert_eq!(client.bytes_sent, "n/a");
    }

    #[test]
    fn test_snapshot_toml_export() {
        let status = sample();
        let text = toml::to_string(&status).unwrap();
        assert!(text.contains("is_up = true"));
        assert!(text.contains("2015-06-18T04:23:03"));
    }
}
