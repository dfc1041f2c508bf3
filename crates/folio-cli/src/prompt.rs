use std::io::{BufRead, Write};

use folio_batch::Confirm;

/// Asks on stderr and reads a `y`/`yes` answer from stdin. Anything else,
/// including end of input, declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = std::io::stderr().lock();
        if write!(stderr, "{prompt} Proceed with generation? [y/N] ").is_err()
            || stderr.flush().is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(error) => {
                tracing::warn!(%error, "failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::is_yes;

    #[test]
    fn only_explicit_yes_confirms() {
        for answer in ["y\n", "Y", " yes ", "YES\r\n"] {
            assert!(is_yes(answer), "{answer:?}");
        }
        for answer in ["", "\n", "n", "no", "sure", "yess"] {
            assert!(!is_yes(answer), "{answer:?}");
        }
    }
}
