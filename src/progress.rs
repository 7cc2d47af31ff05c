use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Terminal progress bar fed by the aggregation's `(index, total)` events.
pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        let pb = ProgressBar::hidden();
        if enabled {
            pb.set_draw_target(ProgressDrawTarget::stderr());
        }
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Analyzing commits... {pos}/{len} [{bar:30.cyan/blue}]")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { pb }
    }

    pub fn tick(&self, index: usize, total: usize) {
        self.pb.set_length(total as u64);
        self.pb.set_position(index as u64);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
