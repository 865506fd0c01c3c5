//! Python interpreter discovery
//!
//! Runs once at startup. Each candidate is executed with a probe that
//! imports the conversion module and prints a sentinel; the first one that
//! exits zero and prints the sentinel wins. When nothing qualifies the
//! fallback name is returned so the failure shows up at conversion time
//! with the runner's remediation hint instead of aborting startup.

use std::process::{Command, Stdio};

/// Installation path probed last (Anaconda on macOS)
const ANACONDA_PYTHON: &str = "/opt/homebrew/anaconda3/bin/python3";

/// Name used when no candidate passes the probe
pub const FALLBACK_INTERPRETER: &str = "python3";

const SENTINEL: &str = "ok";

#[derive(Debug, Clone)]
pub struct InterpreterResolver {
    candidates: Vec<String>,
    probe_args: Vec<String>,
    sentinel: String,
    fallback: String,
}

impl InterpreterResolver {
    /// Standard candidate list: override, `python3`, `python`, Anaconda path
    pub fn new(python_override: Option<&str>, module: &str) -> Self {
        let candidates = python_override
            .into_iter()
            .map(str::to_string)
            .chain(["python3", "python", ANACONDA_PYTHON].map(String::from))
            .collect();

        Self {
            candidates,
            probe_args: vec![
                "-c".to_string(),
                format!("import {}; print(\"{}\")", module, SENTINEL),
            ],
            sentinel: SENTINEL.to_string(),
            fallback: FALLBACK_INTERPRETER.to_string(),
        }
    }

    /// Resolver with an explicit candidate list and probe
    pub fn with_probe(
        candidates: Vec<String>,
        probe_args: Vec<String>,
        sentinel: impl Into<String>,
    ) -> Self {
        Self {
            candidates,
            probe_args,
            sentinel: sentinel.into(),
            fallback: FALLBACK_INTERPRETER.to_string(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Pick the first working candidate, or the fallback
    pub fn resolve(&self) -> String {
        for candidate in &self.candidates {
            if self.probe(candidate) {
                tracing::debug!(interpreter = %candidate, "Interpreter probe succeeded");
                return candidate.clone();
            }
            tracing::debug!(interpreter = %candidate, "Interpreter probe failed");
        }

        tracing::warn!(
            fallback = %self.fallback,
            "No interpreter passed the probe, conversions will likely fail"
        );
        self.fallback.clone()
    }

    fn probe(&self, candidate: &str) -> bool {
        let output = Command::new(candidate)
            .args(&self.probe_args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                output.status.success()
                    && String::from_utf8_lossy(&output.stdout).contains(&self.sentinel)
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let resolver = InterpreterResolver::new(Some("/custom/python"), "pdf2docx");
        assert_eq!(
            resolver.candidates(),
            &["/custom/python", "python3", "python", ANACONDA_PYTHON]
        );

        let resolver = InterpreterResolver::new(None, "pdf2docx");
        assert_eq!(resolver.candidates()[0], "python3");
        assert_eq!(resolver.probe_args[1], "import pdf2docx; print(\"ok\")");
    }

    #[test]
    fn test_falls_back_when_nothing_works() {
        let resolver = InterpreterResolver::with_probe(
            vec!["/nonexistent/python-a".into(), "/nonexistent/python-b".into()],
            vec!["-c".into(), "print('ok')".into()],
            "ok",
        );
        assert_eq!(resolver.resolve(), FALLBACK_INTERPRETER);
    }

    #[cfg(unix)]
    #[test]
    fn test_picks_first_candidate_printing_sentinel() {
        // `true` exits zero without printing, so it must be skipped
        let resolver = InterpreterResolver::with_probe(
            vec!["/nonexistent/python".into(), "true".into(), "sh".into()],
            vec!["-c".into(), "echo ok".into()],
            "ok",
        );
        assert_eq!(resolver.resolve(), "sh");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_rejected_even_with_sentinel() {
        let resolver = InterpreterResolver::with_probe(
            vec!["sh".into()],
            vec!["-c".into(), "echo ok; exit 1".into()],
            "ok",
        );
        assert_eq!(resolver.resolve(), FALLBACK_INTERPRETER);
    }
}
