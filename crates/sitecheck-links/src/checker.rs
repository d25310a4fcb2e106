use crate::probe::LinkProbe;
use futures::stream::{self, StreamExt};
use sitecheck_core::site::{BrokenLink, LinkCheckReport, LinkEdge, LinkStatus};

/// Progress is surfaced every this many completions, and on the last one
const PROGRESS_INTERVAL: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

fn should_report_progress(completed: usize, total: usize) -> bool {
    completed % PROGRESS_INTERVAL == 0 || completed == total
}

/// Outcome of checking one edge
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Skipped,
    Alive,
    Broken(BrokenLink),
}

/// Check a single edge: HEAD first, then one GET if HEAD errored or
/// returned ≥400
async fn probe_edge<P: LinkProbe>(probe: &P, edge: &LinkEdge) -> Outcome {
    if !edge.is_checkable() {
        return Outcome::Skipped;
    }

    tracing::debug!("Checking link: {} from {}", edge.url, edge.source);

    match probe.head(&edge.url).await {
        Ok(status) if status < 400 => return Outcome::Alive,
        Ok(status) => tracing::debug!("HEAD {} returned {}, retrying with GET", edge.url, status),
        Err(e) => tracing::debug!("HEAD {} failed ({}), retrying with GET", edge.url, e),
    }

    let status = match probe.get(&edge.url).await {
        Ok(status) if status < 400 => return Outcome::Alive,
        Ok(status) => LinkStatus::Http(status),
        Err(e) => LinkStatus::Error(e.0),
    };

    tracing::debug!("Broken link: {} ({})", edge.url, status);
    Outcome::Broken(BrokenLink {
        link: edge.url.clone(),
        source: edge.source.clone(),
        status,
    })
}

/// Checks edges with at most `concurrency` probes in flight
///
/// Each probe resolves to its own outcome; the single coordinating loop in
/// [`LinkChecker::check`] counts completions and collects failures, so no
/// state is shared between in-flight checks.
pub struct LinkChecker {
    concurrency: usize,
}

impl LinkChecker {
    /// `concurrency` below 1 is treated as 1
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Check every edge and return the failures in completion order
    ///
    /// `on_progress` fires every 10 completions and on the final one. With a
    /// concurrency of 1 edges are checked strictly in input order.
    pub async fn check<P, I, F>(&self, probe: &P, edges: I, mut on_progress: F) -> LinkCheckReport
    where
        P: LinkProbe,
        I: IntoIterator<Item = LinkEdge>,
        F: FnMut(Progress),
    {
        let edges: Vec<LinkEdge> = edges.into_iter().collect();
        let total = edges.len();

        tracing::info!(
            "Checking {} links using {} concurrent request(s)",
            total,
            self.concurrency
        );

        let mut report = LinkCheckReport {
            total,
            ..LinkCheckReport::default()
        };

        let mut outcomes = stream::iter(edges.iter())
            .map(|edge| probe_edge(probe, edge))
            .buffer_unordered(self.concurrency);

        let mut completed = 0;
        while let Some(outcome) = outcomes.next().await {
            completed += 1;
            if should_report_progress(completed, total) {
                on_progress(Progress { completed, total });
            }

            match outcome {
                Outcome::Skipped => report.skipped += 1,
                Outcome::Alive => report.checked += 1,
                Outcome::Broken(broken) => {
                    report.checked += 1;
                    report.broken.push(broken);
                }
            }
        }

        tracing::info!("Found {} broken links", report.broken.len());
        report
    }
}

impl Default for LinkChecker {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted transport: per-URL HEAD and GET answers, with an optional
    /// delay so completion order differs from input order
    #[derive(Default)]
    struct MockProbe {
        head: HashMap<String, Result<u16, ProbeError>>,
        get: HashMap<String, Result<u16, ProbeError>>,
        delays: HashMap<String, u64>,
        calls: Mutex<Vec<String>>,
    }

    impl MockProbe {
        fn on(mut self, url: &str, head: Result<u16, &str>, get: Result<u16, &str>) -> Self {
            self.head
                .insert(url.into(), head.map_err(|e| ProbeError(e.into())));
            self.get
                .insert(url.into(), get.map_err(|e| ProbeError(e.into())));
            self
        }

        fn delayed(mut self, url: &str, millis: u64) -> Self {
            self.delays.insert(url.into(), millis);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn answer(
            &self,
            method: &str,
            table: &HashMap<String, Result<u16, ProbeError>>,
            url: &str,
        ) -> Result<u16, ProbeError> {
            if let Some(&millis) = self.delays.get(url) {
                tokio::time::sleep(Duration::from_millis(millis)).await;
            }
            self.calls.lock().unwrap().push(format!("{} {}", method, url));
            table.get(url).cloned().unwrap_or(Ok(200))
        }
    }

    impl LinkProbe for MockProbe {
        async fn head(&self, url: &str) -> Result<u16, ProbeError> {
            self.answer("HEAD", &self.head, url).await
        }

        async fn get(&self, url: &str) -> Result<u16, ProbeError> {
            self.answer("GET", &self.get, url).await
        }
    }

    fn edge(url: &str) -> LinkEdge {
        LinkEdge::new(url, "index.html")
    }

    #[tokio::test]
    async fn test_head_success_needs_no_get() {
        let probe = MockProbe::default().on("https://ok.dev", Ok(200), Ok(500));

        let report = LinkChecker::new(1)
            .check(&probe, vec![edge("https://ok.dev")], |_| {})
            .await;

        assert!(report.broken.is_empty());
        assert_eq!(report.checked, 1);
        assert_eq!(probe.calls(), vec!["HEAD https://ok.dev"]);
    }

    #[tokio::test]
    async fn test_get_fallback_rescues_failed_head() {
        let probe = MockProbe::default()
            .on("https://head-500.dev", Ok(500), Ok(200))
            .on("https://head-err.dev", Err("connection reset"), Ok(204));

        let report = LinkChecker::new(1)
            .check(
                &probe,
                vec![edge("https://head-500.dev"), edge("https://head-err.dev")],
                |_| {},
            )
            .await;

        assert!(report.broken.is_empty());
        assert_eq!(
            probe.calls(),
            vec![
                "HEAD https://head-500.dev",
                "GET https://head-500.dev",
                "HEAD https://head-err.dev",
                "GET https://head-err.dev",
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_record_status_or_error_text() {
        let probe = MockProbe::default()
            .on("https://gone.dev", Ok(404), Ok(410))
            .on("https://down.dev", Err("timed out"), Err("dns error: no such host"));

        let report = LinkChecker::new(1)
            .check(
                &probe,
                vec![edge("https://gone.dev"), edge("https://down.dev")],
                |_| {},
            )
            .await;

        assert_eq!(
            report.broken,
            vec![
                BrokenLink {
                    link: "https://gone.dev".into(),
                    source: "index.html".into(),
                    status: LinkStatus::Http(410),
                },
                BrokenLink {
                    link: "https://down.dev".into(),
                    source: "index.html".into(),
                    status: LinkStatus::Error("dns error: no such host".into()),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_non_http_edges_are_skipped_without_requests() {
        let probe = MockProbe::default();

        let report = LinkChecker::new(4)
            .check(
                &probe,
                vec![edge("mailto:me@x.dev"), edge("tel:+1555"), edge("/about/")],
                |_| {},
            )
            .await;

        assert!(report.broken.is_empty());
        assert_eq!(report.skipped, 3);
        assert_eq!(report.checked, 0);
        assert_eq!(report.total, 3);
        assert!(probe.calls().is_empty());
    }

    #[tokio::test]
    async fn test_progress_every_ten_and_on_last() {
        let probe = MockProbe::default();
        let edges: Vec<LinkEdge> = (0..25).map(|i| edge(&format!("https://x.dev/{i}"))).collect();

        let mut seen = Vec::new();
        LinkChecker::new(3)
            .check(&probe, edges, |p| seen.push(p.completed))
            .await;

        assert_eq!(seen, vec![10, 20, 25]);
    }

    #[tokio::test]
    async fn test_result_membership_is_independent_of_concurrency() {
        let build = || {
            MockProbe::default()
                .on("https://a.dev", Ok(404), Ok(404))
                .on("https://b.dev", Ok(200), Ok(200))
                .on("https://c.dev", Err("refused"), Err("refused"))
                .on("https://d.dev", Ok(503), Ok(200))
                .on("https://e.dev", Ok(500), Ok(502))
                .delayed("https://a.dev", 30)
                .delayed("https://c.dev", 10)
        };
        let edges = || {
            ["https://a.dev", "https://b.dev", "https://c.dev", "https://d.dev", "https://e.dev"]
                .into_iter()
                .map(edge)
                .collect::<Vec<_>>()
        };

        let mut sequential = LinkChecker::new(1).check(&build(), edges(), |_| {}).await.broken;
        let mut parallel = LinkChecker::new(8).check(&build(), edges(), |_| {}).await.broken;

        // with every probe in flight at once the delayed edges finish last
        assert_eq!(parallel.last().unwrap().link, "https://a.dev");

        sequential.sort_by(|a, b| a.link.cmp(&b.link));
        parallel.sort_by(|a, b| a.link.cmp(&b.link));
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let checker = LinkChecker::new(0);
        assert_eq!(checker.concurrency(), 1);

        let probe = MockProbe::default().on("https://gone.dev", Ok(404), Ok(404));
        let report = checker.check(&probe, vec![edge("https://gone.dev")], |_| {}).await;
        assert_eq!(report.broken.len(), 1);
    }

    #[tokio::test]
    async fn test_probe_edge_outcomes() {
        let probe = MockProbe::default()
            .on("https://ok.dev", Ok(301), Ok(200))
            .on("https://gone.dev", Ok(404), Ok(404));

        assert_eq!(probe_edge(&probe, &edge("https://ok.dev")).await, Outcome::Alive);
        assert_eq!(probe_edge(&probe, &edge("ftp://files.dev")).await, Outcome::Skipped);
        assert_eq!(
            probe_edge(&probe, &edge("https://gone.dev")).await,
            Outcome::Broken(BrokenLink {
                link: "https://gone.dev".into(),
                source: "index.html".into(),
                status: LinkStatus::Http(404),
            })
        );
    }

    #[test]
    fn test_should_report_progress() {
        assert!(!should_report_progress(1, 5_000));
        assert!(should_report_progress(10, 5_000));
        assert!(should_report_progress(7, 7));
    }
}
