//! 生成中のスピナー表示

use indicatif::{ProgressBar, ProgressStyle};
use scholar_pulse_common::status::{loading_message, LOADING_MESSAGE_INTERVAL_MS};
use std::future::Future;
use std::time::{Duration, Instant};

/// future の完了まで、ローディングメッセージを回しながらスピナーを出す
pub async fn with_loading_messages<F: Future>(future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));

    let started = Instant::now();
    spinner.set_message(loading_message(0));
    let mut ticker = tokio::time::interval(Duration::from_millis(LOADING_MESSAGE_INTERVAL_MS));

    tokio::pin!(future);
    let output = loop {
        tokio::select! {
            output = &mut future => break output,
            _ = ticker.tick() => {
                spinner.set_message(loading_message(started.elapsed().as_millis()));
            }
        }
    };

    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_future_output() {
        let value = with_loading_messages(async { 42 }).await;
        assert_eq!(value, 42);
    }
}
