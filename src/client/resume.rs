//! Operator-resume capability
//!
//! When the client escalates, the whole pipeline suspends until someone
//! supplies a new requests-per-minute rate. Interactively that someone is
//! a human at a terminal; in tests and unattended deployments it is a
//! fixed policy. The call blocks with no timeout.

use std::io::{self, BufRead, Write};

/// A blocking source of new request rates after an escalation.
pub trait OperatorResume: Send {
    /// Blocks until a new requests-per-minute rate is available.
    ///
    /// `current_rate` is the rate in effect when the failure happened;
    /// implementations may fall back to it if no answer can be obtained.
    fn await_new_rate(&mut self, error: &str, current_rate: u32) -> u32;
}

/// Interactive resume: prompts on the terminal, accepts only a positive
/// integer and re-prompts otherwise.
pub struct StdinResume;

impl OperatorResume for StdinResume {
    fn await_new_rate(&mut self, error: &str, current_rate: u32) -> u32 {
        eprintln!();
        eprintln!("[!] Request failed: {}", error);
        eprintln!("[!] Execution PAUSED. Enter a new requests-per-minute rate to resume (e.g. '10').");

        let stdin = io::stdin();
        loop {
            eprint!("> ");
            let _ = io::stderr().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // A closed stdin can never answer; resume at the old rate
                // rather than spinning on the prompt.
                Ok(0) => {
                    tracing::warn!(
                        "stdin closed during escalation; resuming at {} requests/minute",
                        current_rate
                    );
                    return current_rate;
                }
                Ok(_) => match line.trim().parse::<u32>() {
                    Ok(rate) if rate > 0 => return rate,
                    _ => eprintln!("Please enter a positive integer."),
                },
                Err(e) => {
                    tracing::warn!(
                        "Failed to read operator input ({}); resuming at {} requests/minute",
                        e,
                        current_rate
                    );
                    return current_rate;
                }
            }
        }
    }
}

/// Non-interactive resume: always answers with the same rate.
pub struct FixedRateResume {
    rate: u32,
}

impl FixedRateResume {
    pub fn new(rate: u32) -> Self {
        Self { rate: rate.max(1) }
    }
}

impl OperatorResume for FixedRateResume {
    fn await_new_rate(&mut self, error: &str, _current_rate: u32) -> u32 {
        tracing::warn!(
            "Escalation ({}); auto-resuming at {} requests/minute",
            error,
            self.rate
        );
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rate_resume_answers_its_rate() {
        let mut resume = FixedRateResume::new(20);
        assert_eq!(resume.await_new_rate("HTTP 503", 100), 20);
    }

    #[test]
    fn test_fixed_rate_resume_clamps_zero() {
        let mut resume = FixedRateResume::new(0);
        assert_eq!(resume.await_new_rate("timeout", 100), 1);
    }
}
