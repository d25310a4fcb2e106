//! Link liveness checking.
//!
//! [`LinkChecker`] fans a set of [`LinkEdge`]s out over a bounded number of
//! in-flight probes. Each edge gets a HEAD request, falling back to a single
//! GET when HEAD fails or returns an error status. Only failures are
//! recorded.

mod checker;
mod error;
mod probe;

pub use checker::{LinkChecker, Progress};
pub use error::{Error, Result};
pub use probe::{DEFAULT_TIMEOUT, HttpProbe, LinkProbe, ProbeError, USER_AGENT};

pub use sitecheck_core::site::{BrokenLink, LinkCheckReport, LinkEdge, LinkStatus};
