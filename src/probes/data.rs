//! Collection listing and text search.

use crate::accessor::{SearchRequest, SnapshotAccessor};
use crate::error::Result;

use super::{ProbeContext, ProbeOutput};

/// Number of search hits returned.
pub const SEARCH_LIMIT: usize = 3;

/// Returned by `search` on deployments without managed text search.
pub const SEARCH_UNAVAILABLE: &str =
    "search requires a managed (Atlas) deployment with text search enabled";

/// Collection names in the current database, one per line.
pub fn collections(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let names = accessor.list_collection_names()?;
    Ok(ProbeOutput::Text(names.join("\n")))
}

/// Top hits of a ranked text search, as returned by the server.
///
/// Arguments: collection, query, field path.
pub fn search(
    ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    args: &[String],
) -> Result<ProbeOutput> {
    if !ctx.managed_hosting() {
        return Ok(ProbeOutput::Unsupported(SEARCH_UNAVAILABLE.to_string()));
    }

    let [collection, query, path] = args else {
        return Ok(ProbeOutput::Unsupported(
            "search needs <collection> <query> <path>".to_string(),
        ));
    };
    let request = SearchRequest {
        collection: collection.clone(),
        query: query.clone(),
        path: path.clone(),
        limit: SEARCH_LIMIT,
    };
    Ok(ProbeOutput::Document(accessor.search(&request)?))
}
