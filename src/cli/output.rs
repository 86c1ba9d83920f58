use crate::cli::{OutputField, OutputFormat};
use digaws::{LookupResult, PrefixEntry};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/// Render lookup results in the requested format. Fields are always emitted in
/// [OutputField] declaration order, regardless of the order they were requested in.
pub fn render(
    results: &[LookupResult],
    format: OutputFormat,
    fields: &[OutputField],
) -> serde_json::Result<String> {
    let fields: BTreeSet<OutputField> = fields.iter().copied().collect();

    match format {
        OutputFormat::Plain => Ok(plain(results, &fields)),
        OutputFormat::Json => json(results, &fields),
    }
}

/*--------------------------------------------------------------------------------------
  Plain
--------------------------------------------------------------------------------------*/

fn plain(results: &[LookupResult], fields: &BTreeSet<OutputField>) -> String {
    let mut output = String::new();

    for entry in results.iter().flat_map(|result| &result.prefixes) {
        for field in fields {
            output.push_str(&plain_line(entry, *field));
        }
        output.push('\n');
    }

    output
}

fn plain_line(entry: &PrefixEntry, field: OutputField) -> String {
    match field {
        OutputField::Prefix if entry.is_ipv4() => format!("Prefix: {}\n", entry.prefix),
        OutputField::Prefix => format!("IPv6 Prefix: {}\n", entry.prefix),
        OutputField::Region => format!("Region: {}\n", entry.region),
        OutputField::Service => format!("Service: {}\n", entry.service),
        OutputField::NetworkBorderGroup => {
            format!("Network border group: {}\n", entry.network_border_group)
        }
    }
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

/// All matches, flattened across queries in query order.
fn json(results: &[LookupResult], fields: &BTreeSet<OutputField>) -> serde_json::Result<String> {
    let records: Vec<JsonRecord> = results
        .iter()
        .flat_map(|result| &result.prefixes)
        .map(|entry| JsonRecord { entry, fields })
        .collect();

    let mut output = serde_json::to_string_pretty(&records)?;
    output.push('\n');
    Ok(output)
}

struct JsonRecord<'a> {
    entry: &'a PrefixEntry,
    fields: &'a BTreeSet<OutputField>,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in self.fields {
            match field {
                OutputField::Prefix => map.serialize_entry(
                    self.entry.prefix_key(),
                    &self.entry.prefix.to_string(),
                )?,
                OutputField::Region => map.serialize_entry("region", &self.entry.region)?,
                OutputField::Service => map.serialize_entry("service", &self.entry.service)?,
                OutputField::NetworkBorderGroup => map.serialize_entry(
                    "network_border_group",
                    &self.entry.network_border_group,
                )?,
            }
        }
        map.end()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
