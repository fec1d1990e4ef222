//! Constants for the tally-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("tally/", env!("CARGO_PKG_VERSION"));

/// Issues requested per search page
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Users requested per group-member page
pub const GROUP_MEMBER_PAGE_SIZE: u32 = 50;
