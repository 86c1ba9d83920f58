use crate::cli::{self, output};
use digaws::{Client, PrefixIndex};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/// Fetch the AWS IP Ranges, look up every address, and render the results. Nothing is rendered
/// unless every lookup succeeds.
pub fn run(args: &cli::Args, client: &Client) -> cli::Result<String> {
    let document = client.fetch()?;
    let index = PrefixIndex::build(&document)?;
    cli::log::prefix_index(&index);

    let results = index.lookup_all(&args.addresses)?;
    cli::log::lookup_results(&results);

    Ok(output::render(&results, args.output, &args.output_fields)?)
}
