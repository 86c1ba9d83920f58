use digaws::{LookupResult, PrefixIndex};
use log::{debug, info};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Initialize Logging
--------------------------------------------------------------------------------------*/

/// Log to stderr: warnings and errors by default, everything through debug with `--debug`.
pub fn init(debug: bool) -> crate::cli::Result<()> {
    stderrlog::new()
        .module("digaws")
        .verbosity(if debug { 3usize } else { 1usize })
        .init()?;
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Prefix Index
--------------------------------------------------------------------------------------*/

pub fn prefix_index(index: &PrefixIndex) {
    debug!("AWS IP Ranges syncToken: {}", index.sync_token());
    debug!("AWS IP Ranges createDate: {}", index.create_date());
    debug!(
        "Loaded {} IPv4 and {} IPv6 AWS IP prefixes",
        index.ipv4_prefixes().len(),
        index.ipv6_prefixes().len()
    );
}

/*--------------------------------------------------------------------------------------
  Lookup Results
--------------------------------------------------------------------------------------*/

pub fn lookup_results(results: &[LookupResult]) {
    let count_queries = results.len();
    info!("Looked up {count_queries} IP address(es) or CIDR(s) in the AWS IP Ranges");

    let count_matches: usize = results.iter().map(LookupResult::len).sum();
    info!("Found {count_matches} matching AWS IP prefix(es)");

    for result in results.iter().filter(|result| result.is_empty()) {
        info!("No AWS IP prefix contains {}", result.query);
    }
}
