use std::time::Duration;

use tokio::sync::mpsc;
use tracing::trace;

/// "Hand this token back once, no sooner than `after` from now."
pub trait Scheduler<W> {
    fn schedule(&self, after: Duration, wakeup: W);
}

/// Sleeps on a spawned task, then posts the wakeup into the engine loop.
pub struct TokioScheduler<W> {
    tx: mpsc::UnboundedSender<W>,
}

impl<W: Send + 'static> TokioScheduler<W> {
    pub fn new(tx: mpsc::UnboundedSender<W>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<W>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl<W: Send + 'static> Scheduler<W> for TokioScheduler<W> {
    fn schedule(&self, after: Duration, wakeup: W) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(wakeup).is_err() {
                trace!("engine gone before wakeup fired");
            }
        });
    }
}
