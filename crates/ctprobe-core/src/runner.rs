//! Run orchestration and collected outcomes

use crate::conclusion::conclude;
use crate::config::ProbeConfig;
use crate::error::Result;
use crate::probe::{Probe, ProbeKind, run_probe, standard_probes};
use crate::report::Reporter;
use std::io::Write;

/// Outcome of every probe, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResults {
    outcomes: Vec<(ProbeKind, bool)>,
}

impl ProbeResults {
    pub fn from_outcomes(outcomes: Vec<(ProbeKind, bool)>) -> Self {
        Self { outcomes }
    }

    fn record(&mut self, kind: ProbeKind, success: bool) {
        self.outcomes.push((kind, success));
    }

    /// Outcome of `kind`, or `None` if it did not run
    pub fn get(&self, kind: ProbeKind) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, success)| *success)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProbeKind, bool)> + '_ {
        self.outcomes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, success)| *success)
    }
}

/// Sends each probe once against one target and prints the diagnosis
pub struct ProbeRunner {
    config: ProbeConfig,
    probes: Vec<Box<dyn Probe>>,
}

impl ProbeRunner {
    /// Runner with the four standard probes
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_probes(config, standard_probes())
    }

    pub fn with_probes(config: ProbeConfig, probes: Vec<Box<dyn Probe>>) -> Self {
        Self { config, probes }
    }

    /// Runs every probe in order and writes the full report
    ///
    /// A failing probe never stops the run. The only error returned is a
    /// failure to write the report.
    pub fn run<W: Write>(&self, reporter: &mut Reporter<W>) -> Result<ProbeResults> {
        reporter.banner(&self.config.target)?;

        let mut results = ProbeResults::default();
        for probe in &self.probes {
            let success = run_probe(probe.as_ref(), &self.config, reporter)?;
            log::info!("{:?}: {}", probe.kind(), if success { "ok" } else { "failed" });
            results.record(probe.kind(), success);
        }

        reporter.summary(&results)?;
        reporter.diagnosis(&conclude(&results))?;
        reporter.timestamp()?;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::probe::ProbeExchange;
    use reqwest::blocking::Client;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use url::Url;

    /// Probe that never touches the network and records that it was called
    struct FailingProbe {
        kind: ProbeKind,
        calls: Rc<RefCell<Vec<ProbeKind>>>,
    }

    impl Probe for FailingProbe {
        fn kind(&self) -> ProbeKind {
            self.kind
        }

        fn send(&self, _client: &Client, target: &Url) -> Result<ProbeExchange> {
            self.calls.borrow_mut().push(self.kind);
            Err(ProbeError::UnsupportedScheme(target.scheme().to_string()))
        }
    }

    fn capture_run(probes: Vec<Box<dyn Probe>>) -> (ProbeResults, String) {
        colored::control::set_override(false);
        let config = ProbeConfig::from_target_str(
            "http://127.0.0.1:9/task_conductor",
            Duration::from_millis(200),
        )
        .unwrap();
        let mut reporter = Reporter::new(Vec::new());
        let results = ProbeRunner::with_probes(config, probes)
            .run(&mut reporter)
            .unwrap();
        (results, String::from_utf8(reporter.into_inner()).unwrap())
    }

    #[test]
    fn test_every_probe_runs_once_in_order_despite_failures() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let probes: Vec<Box<dyn Probe>> = ProbeKind::ALL
            .iter()
            .map(|&kind| {
                Box::new(FailingProbe {
                    kind,
                    calls: Rc::clone(&calls),
                }) as Box<dyn Probe>
            })
            .collect();

        let (results, output) = capture_run(probes);

        assert_eq!(*calls.borrow(), ProbeKind::ALL.to_vec());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|(_, success)| !success));
        assert_eq!(output.matches("❌ Error:").count(), 4);
        assert_eq!(output.matches("❌ failure").count(), 4);
    }

    #[test]
    fn test_results_preserve_order() {
        let results = ProbeResults::from_outcomes(vec![
            (ProbeKind::QueryParameter, true),
            (ProbeKind::FormEncoded, false),
        ]);

        let kinds: Vec<ProbeKind> = results.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ProbeKind::QueryParameter, ProbeKind::FormEncoded]);
        assert_eq!(results.get(ProbeKind::QueryParameter), Some(true));
        assert_eq!(results.get(ProbeKind::JsonString), None);
        assert!(!results.all_succeeded());
    }

    #[test]
    fn test_summary_and_diagnosis_follow_probes() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let probes: Vec<Box<dyn Probe>> = vec![Box::new(FailingProbe {
            kind: ProbeKind::FormEncoded,
            calls,
        })];

        let (_, output) = capture_run(probes);

        let summary = output.find("Summary").unwrap();
        let diagnosis = output.find("Diagnosis").unwrap();
        assert!(output.find("Probe 1").unwrap() < summary);
        assert!(summary < diagnosis);
        assert!(output[diagnosis..].contains("lacks form-url-encoded body parsing support"));
    }
}
