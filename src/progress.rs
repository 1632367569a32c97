//! Progress bars for the download and extraction stages.
//! Bars are created per stage of a single run and handed to the stage explicitly.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const DOWNLOAD_TEMPLATE: &str =
    "└─> [{bar:30}] {binary_bytes_per_sec} {percent}% {eta}";
const EXTRACT_TEMPLATE: &str = "└─> [{bar:30}] {binary_bytes_per_sec} {percent}% {elapsed}";
const UNKNOWN_TEMPLATE: &str = "└─> {spinner} {binary_bytes} {binary_bytes_per_sec}";

/// Creates progress bars for one provisioning run.
#[derive(Debug, Clone, Copy)]
pub struct ProgressFactory {
    visible: bool,
}

impl ProgressFactory {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn download(&self, total: Option<u64>) -> ProgressBar {
        self.bar(total, DOWNLOAD_TEMPLATE)
    }

    pub fn extraction(&self, total: Option<u64>) -> ProgressBar {
        self.bar(total, EXTRACT_TEMPLATE)
    }

    fn bar(&self, total: Option<u64>, template: &str) -> ProgressBar {
        let bar = match (self.visible, total) {
            (false, Some(total)) => ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden()),
            (false, None) => ProgressBar::hidden(),
            (true, Some(total)) => ProgressBar::new(total),
            (true, None) => ProgressBar::new_spinner(),
        };
        let template = if total.is_some() { template } else { UNKNOWN_TEMPLATE };
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }
}
