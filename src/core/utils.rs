/*-------------------------------------------------------------------------------------------------
  Utilities
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  IP Network Supplemental Functions
--------------------------------------------------------------------------------------*/

pub mod ipnetwork {
    use ipnetwork::{IpNetwork, IpNetworkError, Ipv4Network, Ipv6Network};
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    /*
        The ipnetwork parsers are lenient: they accept truncated addresses
        (`10/8` parses as `10.0.0.0/8`) and interface-style prefixes with host
        bits set (`10.1.2.3/8`).

        These helpers require a complete address and a network address (all
        host bits `0`), so `52.94.76.1/22` is rejected rather than silently
        treated as `52.94.76.0/22`.
    */

    pub fn parse_ipv4_network(value: &str) -> Result<Ipv4Network, String> {
        let (address, _) = value.split_once('/').unwrap_or((value, ""));
        address
            .parse::<Ipv4Addr>()
            .map_err(|error| format!("{address:?}: {error}"))?;

        let network: Ipv4Network = value
            .parse()
            .map_err(|error: IpNetworkError| error.to_string())?;

        if network.ip() != network.network() {
            return Err(format!("{value} has host bits set"));
        }
        Ok(network)
    }

    pub fn parse_ipv6_network(value: &str) -> Result<Ipv6Network, String> {
        let (address, _) = value.split_once('/').unwrap_or((value, ""));
        address
            .parse::<Ipv6Addr>()
            .map_err(|error| format!("{address:?}: {error}"))?;

        let network: Ipv6Network = value
            .parse()
            .map_err(|error: IpNetworkError| error.to_string())?;

        if network.ip() != network.network() {
            return Err(format!("{value} has host bits set"));
        }
        Ok(network)
    }

    /*
        The Ipv4Network and Ipv6Network types implement an is_supernet_of() method;
        however, the IpNetwork type does not.

        This helper function implements the is_supernet_of() functionality to
        compare two IpNetwork objects. Networks of different families are never
        related.
    */

    pub fn is_supernet_of(supernet: IpNetwork, subnet: IpNetwork) -> bool {
        match (supernet, subnet) {
            (IpNetwork::V4(ipv4_supernet), IpNetwork::V4(ipv4_subnet)) => {
                ipv4_supernet.is_supernet_of(ipv4_subnet)
            }
            (IpNetwork::V6(ipv6_supernet), IpNetwork::V6(ipv6_subnet)) => {
                ipv6_supernet.is_supernet_of(ipv6_subnet)
            }
            _ => false,
        }
    }

    pub fn contains(network: IpNetwork, address: IpAddr) -> bool {
        match (network, address) {
            (IpNetwork::V4(ipv4_network), IpAddr::V4(ipv4_address)) => {
                ipv4_network.contains(ipv4_address)
            }
            (IpNetwork::V6(ipv6_network), IpAddr::V6(ipv6_address)) => {
                ipv6_network.contains(ipv6_address)
            }
            _ => false,
        }
    }

    /*-------------------------------------------------------------------------
      Unit Tests
    -------------------------------------------------------------------------*/

}
