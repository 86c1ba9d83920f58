use crate::core::utils::ipnetwork::{parse_ipv4_network, parse_ipv6_network};
use ipnetwork::{Ipv4Network, Ipv6Network};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/*-------------------------------------------------------------------------------------------------
  Query
-------------------------------------------------------------------------------------------------*/

/// A lookup query: an IP address or a CIDR block of either family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Query {
    Ipv4Addr(Ipv4Addr),
    Ipv6Addr(Ipv6Addr),
    Ipv4Network(Ipv4Network),
    Ipv6Network(Ipv6Network),
}

impl Query {
    /// Parse a query string, trying an IPv4 address, an IPv6 address, an IPv4 network, and an
    /// IPv6 network, in that order. The first successful parse wins.
    pub fn parse(value: &str) -> Option<Query> {
        value
            .parse()
            .ok()
            .map(Query::Ipv4Addr)
            .or_else(|| value.parse().ok().map(Query::Ipv6Addr))
            .or_else(|| parse_ipv4_network(value).ok().map(Query::Ipv4Network))
            .or_else(|| parse_ipv6_network(value).ok().map(Query::Ipv6Network))
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, Query::Ipv4Addr(_) | Query::Ipv4Network(_))
    }

    pub fn is_ipv6(&self) -> bool {
        !self.is_ipv4()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Ipv4Addr(address) => write!(f, "{address}"),
            Query::Ipv6Addr(address) => write!(f, "{address}"),
            Query::Ipv4Network(network) => write!(f, "{network}"),
            Query::Ipv6Network(network) => write!(f, "{network}"),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
