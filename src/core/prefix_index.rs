use crate::core::errors::{Error, Result};
use crate::core::json::{self, RangeDocument};
use crate::core::lookup_result::LookupResult;
use crate::core::prefix_entry::PrefixEntry;
use crate::core::query::Query;
use crate::core::utils;
use chrono::{DateTime, Utc};
use ipnetwork::IpNetwork;
use log::debug;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Prefix Index
-------------------------------------------------------------------------------------------------*/

/// Typed IPv4 and IPv6 prefixes from an AWS IP Ranges document, answering address and CIDR
/// containment queries.
///
/// ```
/// let json = r#"{
///     "syncToken": "1608245058",
///     "createDate": "2020-12-17-22-44-18",
///     "prefixes": [{
///         "ip_prefix": "52.94.76.0/22",
///         "region": "us-west-2",
///         "service": "AMAZON",
///         "network_border_group": "us-west-2"
///     }],
///     "ipv6_prefixes": []
/// }"#;
///
/// let index = digaws::PrefixIndex::from_json(json)?;
/// let result = index.lookup("52.94.76.1")?;
/// assert_eq!(result.prefixes[0].region, "us-west-2");
/// # Ok::<(), digaws::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct PrefixIndex {
    sync_token: String,
    create_date: DateTime<Utc>,

    // Document order is preserved; lookups scan linearly.
    ipv4_prefixes: Vec<PrefixEntry>,
    ipv6_prefixes: Vec<PrefixEntry>,
}

/*--------------------------------------------------------------------------------------
  Prefix Index Implementation
--------------------------------------------------------------------------------------*/

impl PrefixIndex {
    /*-------------------------------------------------------------------------
      Constructors
    -------------------------------------------------------------------------*/

    /// Build the index from a [RangeDocument]. Fails with [Error::MalformedEntry] if any prefix
    /// is not a valid network of its declared family.
    pub fn build(document: &RangeDocument) -> Result<PrefixIndex> {
        let ipv4_prefixes = document
            .prefixes
            .iter()
            .map(|json_prefix| {
                let prefix = utils::ipnetwork::parse_ipv4_network(&json_prefix.ip_prefix)
                    .map_err(|reason| Error::MalformedEntry {
                        field: "ip_prefix",
                        prefix: json_prefix.ip_prefix.clone(),
                        reason,
                    })?;

                Ok(PrefixEntry {
                    prefix: IpNetwork::V4(prefix),
                    region: json_prefix.region.clone(),
                    service: json_prefix.service.clone(),
                    network_border_group: json_prefix.network_border_group.clone(),
                })
            })
            .collect::<Result<Vec<PrefixEntry>>>()?;

        let ipv6_prefixes = document
            .ipv6_prefixes
            .iter()
            .map(|json_prefix| {
                let prefix = utils::ipnetwork::parse_ipv6_network(&json_prefix.ipv6_prefix)
                    .map_err(|reason| Error::MalformedEntry {
                        field: "ipv6_prefix",
                        prefix: json_prefix.ipv6_prefix.clone(),
                        reason,
                    })?;

                Ok(PrefixEntry {
                    prefix: IpNetwork::V6(prefix),
                    region: json_prefix.region.clone(),
                    service: json_prefix.service.clone(),
                    network_border_group: json_prefix.network_border_group.clone(),
                })
            })
            .collect::<Result<Vec<PrefixEntry>>>()?;

        debug!(
            "Indexed AWS IP Ranges syncToken {}: {} IPv4 and {} IPv6 prefixes",
            document.sync_token,
            ipv4_prefixes.len(),
            ipv6_prefixes.len()
        );

        Ok(PrefixIndex {
            sync_token: document.sync_token.clone(),
            create_date: document.create_date,
            ipv4_prefixes,
            ipv6_prefixes,
        })
    }

    /// Parse an AWS IP Ranges JSON document and build the index from it.
    pub fn from_json(json: &str) -> Result<PrefixIndex> {
        PrefixIndex::build(&json::parse(json)?)
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Publication time of the indexed AWS IP Ranges in Unix epoch time format.
    pub fn sync_token(&self) -> &str {
        &self.sync_token
    }

    /// Publication time of the indexed AWS IP Ranges.
    pub fn create_date(&self) -> &DateTime<Utc> {
        &self.create_date
    }

    pub fn ipv4_prefixes(&self) -> &[PrefixEntry] {
        &self.ipv4_prefixes
    }

    pub fn ipv6_prefixes(&self) -> &[PrefixEntry] {
        &self.ipv6_prefixes
    }

    pub fn len(&self) -> usize {
        self.ipv4_prefixes.len() + self.ipv6_prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /*-------------------------------------------------------------------------
      Lookup
    -------------------------------------------------------------------------*/

    /// Find the prefixes containing an IP address or CIDR block. Fails with
    /// [Error::InvalidQuery] when `value` is neither.
    pub fn lookup(&self, value: &str) -> Result<LookupResult> {
        let query = Query::parse(value).ok_or_else(|| Error::InvalidQuery(value.to_string()))?;
        let result = self.lookup_query(query);
        debug!("{}: {} matching prefix(es)", value, result.len());
        Ok(result)
    }

    /// Look up each value independently. Fails on the first invalid value.
    pub fn lookup_all<I, S>(&self, values: I) -> Result<Vec<LookupResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|value| self.lookup(value.as_ref()))
            .collect()
    }

    /// Find the prefixes containing an already-parsed [Query].
    pub fn lookup_query(&self, query: Query) -> LookupResult {
        let prefixes = match query {
            Query::Ipv4Addr(address) => {
                self.scan(&self.ipv4_prefixes, |prefix| {
                    utils::ipnetwork::contains(prefix, IpAddr::V4(address))
                })
            }
            Query::Ipv6Addr(address) => {
                self.scan(&self.ipv6_prefixes, |prefix| {
                    utils::ipnetwork::contains(prefix, IpAddr::V6(address))
                })
            }
            Query::Ipv4Network(network) => self.scan(&self.ipv4_prefixes, |prefix| {
                utils::ipnetwork::is_supernet_of(prefix, IpNetwork::V4(network))
            }),
            Query::Ipv6Network(network) => self.scan(&self.ipv6_prefixes, |prefix| {
                utils::ipnetwork::is_supernet_of(prefix, IpNetwork::V6(network))
            }),
        };

        LookupResult { query, prefixes }
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn scan<F>(&self, entries: &[PrefixEntry], matches: F) -> Vec<PrefixEntry>
    where
        F: Fn(IpNetwork) -> bool,
    {
        entries
            .iter()
            .filter(|entry| matches(entry.prefix))
            .cloned()
            .collect()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::json::tests::{test_range_document, TEST_AWS_IP_RANGES_JSON};
    use crate::core::json::{JsonIpPrefix, JsonIpv6Prefix};
    use chrono::TimeZone;

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    pub(crate) fn test_prefix_index() -> PrefixIndex {
        PrefixIndex::from_json(TEST_AWS_IP_RANGES_JSON).unwrap()
    }

    fn prefix_strings(result: &LookupResult) -> Vec<String> {
        result
            .prefixes
            .iter()
            .map(|entry| entry.prefix.to_string())
            .collect()
    }

    /*----------------------------------------------------------------------------------
      Build
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_build_preserves_all_entries() {
        let document = test_range_document();
        let index = PrefixIndex::build(&document).unwrap();

        assert_eq!(index.sync_token(), "1608245058");
        assert_eq!(
            *index.create_date(),
            Utc.with_ymd_and_hms(2020, 12, 17, 22, 44, 18).unwrap()
        );
        assert_eq!(index.ipv4_prefixes().len(), document.prefixes.len());
        assert_eq!(index.ipv6_prefixes().len(), document.ipv6_prefixes.len());
        assert_eq!(index.len(), 6);
        assert!(!index.is_empty());

        assert_eq!(
            index.ipv4_prefixes()[0],
            PrefixEntry {
                prefix: "52.93.178.234/32".parse().unwrap(),
                region: "us-west-1".to_string(),
                service: "AMAZON".to_string(),
                network_border_group: "us-west-1".to_string(),
            }
        );
        assert!(index.ipv4_prefixes().iter().all(PrefixEntry::is_ipv4));
        assert!(index.ipv6_prefixes().iter().all(PrefixEntry::is_ipv6));
    }

    #[test]
    fn test_build_keeps_duplicate_prefixes() {
        // The same prefix is listed once per service using it.
        let mut document = test_range_document();
        let duplicate = JsonIpPrefix {
            service: "EC2".to_string(),
            ..document.prefixes[1].clone()
        };
        document.prefixes.push(duplicate);
        let index = PrefixIndex::build(&document).unwrap();

        let result = index.lookup("52.94.76.1").unwrap();
        let services: Vec<&str> = result.prefixes.iter().map(|e| e.service.as_str()).collect();
        assert_eq!(services, ["AMAZON", "EC2"]);
    }

    #[test]
    fn test_build_malformed_ipv4_prefix() {
        let mut document = test_range_document();
        document.prefixes[0].ip_prefix = "52.93.178.300/32".to_string();

        match PrefixIndex::build(&document) {
            Err(Error::MalformedEntry { field, prefix, .. }) => {
                assert_eq!(field, "ip_prefix");
                assert_eq!(prefix, "52.93.178.300/32");
            }
            other => panic!("expected a malformed entry error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_family_mismatch() {
        let mut document = test_range_document();
        document.ipv6_prefixes.push(JsonIpv6Prefix {
            ipv6_prefix: "52.94.76.0/22".to_string(),
            region: "us-west-2".to_string(),
            service: "AMAZON".to_string(),
            network_border_group: "us-west-2".to_string(),
        });

        assert!(matches!(
            PrefixIndex::build(&document),
            Err(Error::MalformedEntry {
                field: "ipv6_prefix",
                ..
            })
        ));
    }

    #[test]
    fn test_build_rejects_host_bits() {
        let mut document = test_range_document();
        document.ipv6_prefixes[0].ipv6_prefix = "2600:1f00:c000::1/40".to_string();

        assert!(matches!(
            PrefixIndex::build(&document),
            Err(Error::MalformedEntry { .. })
        ));
    }

    /*----------------------------------------------------------------------------------
      Lookup
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_lookup_ipv4_address() {
        let index = test_prefix_index();

        let result = index.lookup("52.94.76.1").unwrap();
        assert_eq!(prefix_strings(&result), ["52.94.76.0/22"]);
        assert_eq!(result.query, Query::Ipv4Addr("52.94.76.1".parse().unwrap()));

        assert!(index.lookup("52.94.75.255").unwrap().is_empty());
        assert_eq!(
            prefix_strings(&index.lookup("52.94.79.255").unwrap()),
            ["52.94.76.0/22"]
        );
    }

    #[test]
    fn test_lookup_ipv4_network() {
        let index = test_prefix_index();

        assert_eq!(
            prefix_strings(&index.lookup("52.94.76.0/24").unwrap()),
            ["52.94.76.0/22"]
        );
        assert_eq!(
            prefix_strings(&index.lookup("52.94.76.0/22").unwrap()), // Reflexive
            ["52.94.76.0/22"]
        );
        assert!(index.lookup("52.94.72.0/21").unwrap().is_empty()); // Supernet, not subnet
    }

    #[test]
    fn test_lookup_ipv6_address_multiple_matches() {
        let index = test_prefix_index();

        let result = index
            .lookup("2600:1f14:fff:f810:a1c1:f507:a2d1:2dd8")
            .unwrap();
        assert_eq!(
            prefix_strings(&result),
            ["2600:1f14:fff:f800::/53", "2600:1f14::/35"]
        );
        assert_eq!(result.prefixes[0].service, "ROUTE53_HEALTHCHECKS");
        assert_eq!(result.prefixes[1].service, "EC2");
    }

    #[test]
    fn test_lookup_ipv6_network() {
        let index = test_prefix_index();

        assert_eq!(
            prefix_strings(&index.lookup("2600:1f14::/36").unwrap()),
            ["2600:1f14::/35"]
        );
        assert!(index.lookup("2600:1f14::/34").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_never_mixes_families() {
        let index = test_prefix_index();

        // IPv4-mapped IPv6 address of a covered IPv4 address
        assert!(index.lookup("::ffff:52.94.76.1").unwrap().is_empty());

        for value in ["52.94.76.1", "52.94.76.0/24", "0.0.0.0/0"] {
            let result = index.lookup(value).unwrap();
            assert!(result.prefixes.iter().all(PrefixEntry::is_ipv4));
        }
        for value in ["2600:1f14::1", "2600:1f14::/36", "::/0"] {
            let result = index.lookup(value).unwrap();
            assert!(result.prefixes.iter().all(PrefixEntry::is_ipv6));
        }
    }

    #[test]
    fn test_lookup_all_addresses_match_their_containing_prefixes() {
        let index = test_prefix_index();

        // Every address of the /22 matches it; neighbors on either side do not.
        let network: ipnetwork::Ipv4Network = "52.94.76.0/22".parse().unwrap();
        for address in network.iter() {
            let result = index.lookup_query(Query::Ipv4Addr(address));
            assert_eq!(prefix_strings(&result), ["52.94.76.0/22"]);
        }
        assert!(index.lookup("52.94.80.0").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_invalid_query() {
        let index = test_prefix_index();

        let error = index.lookup("what are you talking about").unwrap_err();
        assert!(matches!(error, Error::InvalidQuery(_)));
        assert!(error.to_string().starts_with("Wrong IP or CIDR format"));
        assert!(error.to_string().contains("what are you talking about"));
    }

    #[test]
    fn test_lookup_all() {
        let index = test_prefix_index();

        let results = index
            .lookup_all(["52.94.76.0/22", "2600:1f14:fff:f810:a1c1:f507:a2d1:2dd8"])
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[1].len(), 2);

        let error = index
            .lookup_all(["52.94.76.1", "not an address", "2600:1f14::1"])
            .unwrap_err();
        assert_eq!(error.to_string(), "Wrong IP or CIDR format: not an address");
    }
}
