use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the workflow moves through its stages. Detailed
/// per-chapter and per-page progress goes to the log instead.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap(),
        );

        Self { bar }
    }

    pub fn start(&self, msg: &'static str) {
        self.bar.set_message(msg);
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    pub fn update(&self, msg: &'static str) {
        self.bar.set_message(msg);
    }

    pub fn complete(&self, msg: &'static str) {
        self.bar.finish_with_message(msg);
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
