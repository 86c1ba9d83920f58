use crate::core::errors::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &str) -> Result<RangeDocument> {
    Ok(serde_json::from_str(json)?)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Range Document
--------------------------------------------------------------------------------------*/

/// The AWS IP Ranges document as published at `ip-ranges.json`. Prefixes are kept as the raw
/// strings from the document; [PrefixIndex](crate::PrefixIndex) validates them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct RangeDocument {
    #[serde(rename = "syncToken")]
    pub sync_token: String,

    #[serde(rename = "createDate", with = "crate::core::datetime")]
    pub create_date: DateTime<Utc>,

    pub prefixes: Vec<JsonIpPrefix>,

    pub ipv6_prefixes: Vec<JsonIpv6Prefix>,
}

/*--------------------------------------------------------------------------------------
  JSON IP (IPv4) Prefix
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpPrefix {
    pub ip_prefix: String,
    pub region: String,
    pub service: String,
    pub network_border_group: String,
}

/*--------------------------------------------------------------------------------------
  JSON IPv6 Prefix
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpv6Prefix {
    pub ipv6_prefix: String,
    pub region: String,
    pub service: String,
    pub network_border_group: String,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
