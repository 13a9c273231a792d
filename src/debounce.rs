use std::time::Duration;
use tokio::sync::mpsc;
use tracing::trace;

/// Collapses bursts of values into the last one, emitted once input has been
/// quiet for `window`.
///
/// Every pushed value cancels the pending deadline and starts a new one.
/// Dropping the `Debouncer` ends the background task; a value still waiting
/// for its window at that point is discarded.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, input) = mpsc::unbounded_channel();
        let (output, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(window, input, output));
        (Self { tx }, rx)
    }

    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

async fn run<T>(
    window: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
    output: mpsc::UnboundedSender<T>,
) {
    while let Some(mut latest) = input.recv().await {
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => {
                        trace!("debounce window restarted");
                        latest = value;
                    }
                    None => return,
                },
                _ = tokio::time::sleep(window) => break,
            }
        }
        if output.send(latest).is_err() {
            return;
        }
    }
}
