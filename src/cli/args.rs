use clap::{Parser, ValueEnum};

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(
    name = "digaws",
    version,
    about = "Look up the AWS region, service, and network border group announcing an IP address or CIDR block",
    long_about = None
)]
pub struct Args {
    /// Formatting style for command output
    #[arg(long, value_name = "plain|json", value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Print only the given fields
    #[arg(
        long = "output-fields",
        value_name = "FIELD",
        value_enum,
        num_args = 0..,
        default_values_t = OutputField::ALL
    )]
    pub output_fields: Vec<OutputField>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// CIDR or IP (v4 or v6) to look up
    #[arg(value_name = "IP ADDRESS|CIDR", required = true, num_args = 1..)]
    pub addresses: Vec<String>,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/*--------------------------------------------------------------------------------------
  Output Fields
--------------------------------------------------------------------------------------*/

/// Prefix record fields; the declaration order is the output order.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, ValueEnum)]
pub enum OutputField {
    #[value(name = "prefix")]
    Prefix,
    #[value(name = "region")]
    Region,
    #[value(name = "service")]
    Service,
    #[value(name = "network_border_group")]
    NetworkBorderGroup,
}

impl OutputField {
    pub const ALL: [OutputField; 4] = [
        OutputField::Prefix,
        OutputField::Region,
        OutputField::Service,
        OutputField::NetworkBorderGroup,
    ];
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["digaws", "52.94.76.1"]).unwrap();

        assert_eq!(args.output, OutputFormat::Plain);
        assert_eq!(args.output_fields, OutputField::ALL);
        assert!(!args.debug);
        assert_eq!(args.addresses, ["52.94.76.1"]);
    }

    #[test]
    fn test_args_output_fields() {
        let args = Args::try_parse_from([
            "digaws",
            "2600:1f14:fff:f810:a1c1:f507:a2d1:2dd8",
            "--output=json",
            "--output-fields",
            "network_border_group",
            "service",
        ])
        .unwrap();

        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(
            args.output_fields,
            [OutputField::NetworkBorderGroup, OutputField::Service]
        );
    }

    #[test]
    fn test_args_output_fields_without_values() {
        let args = Args::try_parse_from(["digaws", "52.94.76.1", "--output-fields"]).unwrap();

        assert!(args.output_fields.is_empty());
        assert_eq!(args.addresses, ["52.94.76.1"]);
    }

    #[test]
    fn test_args_multiple_addresses() {
        let args =
            Args::try_parse_from(["digaws", "52.94.76.0/22", "2600:1f14::/36", "--debug"]).unwrap();

        assert_eq!(args.addresses, ["52.94.76.0/22", "2600:1f14::/36"]);
        assert!(args.debug);
    }

    #[test]
    fn test_args_require_an_address() {
        assert!(Args::try_parse_from(["digaws"]).is_err());
        assert!(Args::try_parse_from(["digaws", "--output", "json"]).is_err());
    }

    #[test]
    fn test_args_reject_unknown_values() {
        assert!(Args::try_parse_from(["digaws", "--output", "table", "52.94.76.1"]).is_err());
        assert!(
            Args::try_parse_from(["digaws", "52.94.76.1", "--output-fields", "services"]).is_err()
        );
    }

    #[test]
    fn test_output_field_order() {
        let mut fields = vec![
            OutputField::NetworkBorderGroup,
            OutputField::Prefix,
            OutputField::Service,
            OutputField::Region,
        ];
        fields.sort();
        assert_eq!(fields, OutputField::ALL);
    }
}
