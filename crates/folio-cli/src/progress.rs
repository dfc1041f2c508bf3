use indicatif::{ProgressBar, ProgressStyle};

use folio_batch::{BatchObserver, GenerationResult, GenerationTask};

use crate::ui;

/// Batch progress bar. Hidden when stdout is not a terminal or output is JSON.
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn terminal_columns() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
}

fn bar_template() -> &'static str {
    match terminal_columns() {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

impl BatchObserver for Progress {
    fn on_task_start(&self, _index: usize, _total: usize, task: &GenerationTask) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{} | {}", task.key.topic_type, task.key.topic));
        }
    }

    fn on_task_complete(&self, _index: usize, _total: usize, result: &GenerationResult) {
        if let Some(bar) = &self.bar {
            if !result.success {
                bar.println(format!("  [FAIL] {}", result.task.key));
            }
            bar.inc(1);
        }
    }
}
