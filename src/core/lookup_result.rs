use crate::core::prefix_entry::PrefixEntry;
use crate::core::query::Query;

/*-------------------------------------------------------------------------------------------------
  Lookup Result
-------------------------------------------------------------------------------------------------*/

/// The prefixes matching a single [Query], in AWS IP Ranges document order. An empty result is
/// a valid answer, not an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LookupResult {
    /// The parsed query.
    pub query: Query,

    /// Matching [PrefixEntry] records.
    pub prefixes: Vec<PrefixEntry>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }
}
