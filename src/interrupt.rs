//! Interrupt handling.
//!
//! SIGINT is turned into a timestamped event on a channel by
//! [`forward_interrupts`]; [`listen`] consumes those events and applies the
//! debounce decision from [`SharedContext::on_interrupt`]. Keeping the two
//! apart lets the decision run against synthetic events in tests.

use crate::context::{InterruptAction, SharedContext};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Register for SIGINT. From here on the default terminate action is replaced.
///
/// The registration stays live for the life of the returned stream, so
/// signals arriving between two `recv` calls are not lost.
pub fn install() -> std::io::Result<Signal> {
    let sigint = signal(SignalKind::interrupt())?;
    debug!("listening for interrupts");
    Ok(sigint)
}

/// Post one event per SIGINT until the receiver goes away.
pub async fn forward_interrupts(mut sigint: Signal, events: mpsc::Sender<Instant>) {
    while sigint.recv().await.is_some() {
        let received_at = Instant::now();
        debug!("interrupt received");
        if events.send(received_at).await.is_err() {
            return;
        }
    }
    warn!("interrupt stream closed");
}

/// Apply each interrupt event to `ctx`, writing reports to `out`.
///
/// Returns once every sender has been dropped.
pub async fn listen<W: Write>(
    ctx: Arc<SharedContext>,
    mut events: mpsc::Receiver<Instant>,
    mut out: W,
) -> std::io::Result<()> {
    while let Some(at) = events.recv().await {
        match ctx.on_interrupt(at) {
            InterruptAction::Report(estimate) => {
                writeln!(out, "pi = {:.6}", estimate)?;
                out.flush()?;
            }
            InterruptAction::Stop => {
                warn!("second interrupt inside debounce window, stopping workers");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn run_events(ctx: Arc<SharedContext>, offsets_ms: &[u64]) -> String {
        let (tx, rx) = mpsc::channel(offsets_ms.len().max(1));
        let t0 = Instant::now();
        for ms in offsets_ms {
            tx.send(t0 + Duration::from_millis(*ms)).await.unwrap();
        }
        drop(tx);

        let mut out = Vec::new();
        listen(ctx, rx, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn single_interrupt_prints_estimate() {
        let ctx = Arc::new(SharedContext::new(4));
        ctx.add_hits(3);

        let out = run_events(Arc::clone(&ctx), &[0]).await;

        assert_eq!(out, "pi = 3.000000\n");
        assert!(!ctx.should_stop());
    }

    #[tokio::test]
    async fn double_interrupt_stops_without_printing_twice() {
        let ctx = Arc::new(SharedContext::new(4));

        let out = run_events(Arc::clone(&ctx), &[0, 200]).await;

        assert_eq!(out.lines().count(), 1);
        assert!(ctx.should_stop());
    }

    #[tokio::test]
    async fn spaced_interrupts_each_print() {
        let ctx = Arc::new(SharedContext::new(4));

        let out = run_events(Arc::clone(&ctx), &[0, 1200, 2500]).await;

        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().all(|line| line.starts_with("pi = ")));
        assert!(!ctx.should_stop());
    }

    #[tokio::test]
    async fn listener_ends_when_channel_closes() {
        let ctx = Arc::new(SharedContext::new(1));
        let out = run_events(ctx, &[]).await;
        assert!(out.is_empty());
    }
}
