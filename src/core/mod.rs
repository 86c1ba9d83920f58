/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod client;
pub mod datetime;
pub mod errors;
pub mod json;
pub mod lookup_result;
pub mod prefix_entry;
pub mod prefix_index;
pub mod query;
pub mod transport;
pub mod utils;
