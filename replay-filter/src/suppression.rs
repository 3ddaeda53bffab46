//! Traffic-class suppression for raw query strings.
//!
//! Two classes of traffic must never be replayed: fan-out sub-requests of
//! distributed queries (the coordinator's parent request is recorded instead)
//! and traffic that already carries the performance-test marker (replaying it
//! again would create a feedback loop).

use crate::SkipReason;

/// The parameter a search coordinator sets on its shard sub-requests.
const DISTRIBUTED_SUB_QUERY: &str = "distrib=false";

/// Tests a raw query string against the known non-replayable traffic classes.
///
/// The string is bracketed with `&` on both ends before matching so that only
/// whole parameters match; `xdistrib=false` or `distrib=falsey` must not
/// suppress. The marker is matched against its canonical literal only; a
/// marker parameter carrying a different value is not recognized as already
/// flagged.
pub fn check(query_string: &str, marker: &str) -> Result<(), SkipReason> {
    let bracketed = format!("&{query_string}&");

    if bracketed.contains(&format!("&{DISTRIBUTED_SUB_QUERY}&")) {
        return Err(SkipReason::DistributedSubQuery);
    }

    if bracketed.contains(&format!("&{marker}&")) {
        return Err(SkipReason::AlreadyFlagged);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PERF_TEST_MARKER;

    fn check_default(query_string: &str) -> Result<(), SkipReason> {
        check(query_string, DEFAULT_PERF_TEST_MARKER)
    }

    #[test]
    fn test_suppresses_distributed_sub_queries() {
        for qs in [
            "distrib=false",
            "distrib=false&q=x",
            "q=x&distrib=false",
            "q=x&distrib=false&rows=10",
        ] {
            assert_eq!(
                check_default(qs),
                Err(SkipReason::DistributedSubQuery),
                "did not suppress `{qs}`"
            );
        }
    }

    #[test]
    fn test_does_not_suppress_boundary_lookalikes() {
        for qs in [
            "xdistrib=false&q=x",
            "q=x&distrib=falsey",
            "q=distrib%3Dfalse",
            "distrib=true&q=x",
        ] {
            assert_eq!(check_default(qs), Ok(()), "suppressed `{qs}`");
        }
    }

    #[test]
    fn test_suppresses_already_flagged_traffic() {
        for qs in [
            "dbcPerfTest=true",
            "q=x&dbcPerfTest=true",
            "dbcPerfTest=true&q=x",
        ] {
            assert_eq!(
                check_default(qs),
                Err(SkipReason::AlreadyFlagged),
                "did not suppress `{qs}`"
            );
        }
    }

    #[test]
    fn test_marker_with_other_value_is_not_recognized() {
        // Only the canonical marker literal counts as already flagged.
        assert_eq!(check_default("q=x&dbcPerfTest=1"), Ok(()));
        assert_eq!(check_default("q=x&dbcPerfTest=false"), Ok(()));
    }

    #[test]
    fn test_passes_plain_queries() {
        assert_eq!(check_default("q=title:test&rows=10"), Ok(()));
    }
}
