use ipnetwork::IpNetwork;

/*-------------------------------------------------------------------------------------------------
  Prefix Entry
-------------------------------------------------------------------------------------------------*/

/// One prefix announced in the AWS IP Ranges along with the region, service, and network border
/// group it is associated with.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PrefixEntry {
    /// IPv4 or IPv6 prefix.
    pub prefix: IpNetwork,

    /// AWS region the IP prefix is associated with.
    pub region: String,

    /// AWS service using the IP prefix.
    pub service: String,

    /// Network border group the IP prefix is associated with.
    pub network_border_group: String,
}

impl PrefixEntry {
    pub fn is_ipv4(&self) -> bool {
        self.prefix.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.prefix.is_ipv6()
    }

    /// Name of the field carrying this prefix in the AWS IP Ranges JSON.
    pub fn prefix_key(&self) -> &'static str {
        match self.prefix {
            IpNetwork::V4(_) => "ip_prefix",
            IpNetwork::V6(_) => "ipv6_prefix",
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
