//! Resolve IP addresses and CIDR blocks to the AWS region, service, and network border group
//! announcing them, using the published
//! [AWS IP address ranges](https://docs.aws.amazon.com/vpc/latest/userguide/aws-ip-ranges.html).
//!
//! ```no_run
//! let document = digaws::Client::new().fetch()?;
//! let index = digaws::PrefixIndex::build(&document)?;
//!
//! for entry in index.lookup("52.94.76.1")?.prefixes {
//!     println!("{} {} {}", entry.prefix, entry.region, entry.service);
//! }
//! # Ok::<(), digaws::Error>(())
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{Client, ClientBuilder, AWS_IP_RANGES_URL, CACHE_FILE_NAME};
pub use crate::core::datetime::http_date;
pub use crate::core::errors::{Error, Result};
pub use crate::core::json::{JsonIpPrefix, JsonIpv6Prefix, RangeDocument};
pub use crate::core::lookup_result::LookupResult;
pub use crate::core::prefix_entry::PrefixEntry;
pub use crate::core::prefix_index::PrefixIndex;
pub use crate::core::query::Query;
pub use crate::core::transport::{HttpResponse, HttpTransport, Transport};
