use crate::config::Config;
use crate::context::SharedContext;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info};

/// Outcome of one coordinated run, read after every worker has joined.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total_points: u64,
    pub workers: usize,
    pub points_per_worker: u64,
    /// Points actually drawn. Lower than the split budget if the run was stopped.
    pub sampled: u64,
    pub hits: u64,
    pub stopped: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    /// The printed estimate: `4 * hits / total_points`.
    pub fn estimate(&self) -> f64 {
        4.0 * self.hits as f64 / self.total_points as f64
    }

    /// `4 * hits / sampled`, or `None` if nothing was drawn.
    pub fn sample_estimate(&self) -> Option<f64> {
        (self.sampled > 0).then(|| 4.0 * self.hits as f64 / self.sampled as f64)
    }
}

/// Draw up to `points` samples, checking the stop flag before each one.
///
/// Hits are counted locally and merged into `ctx` once, after the loop.
/// Returns the number of samples drawn.
pub fn sample_points(points: u64, ctx: &SharedContext) -> u64 {
    let mut rng = StdRng::from_entropy();
    let mut inside = 0;
    let mut drawn = 0;

    for _ in 0..points {
        if ctx.should_stop() {
            break;
        }
        let x: f64 = rng.gen();
        let y: f64 = rng.gen();
        if x * x + y * y < 1.0 {
            inside += 1;
        }
        drawn += 1;
    }

    ctx.add_hits(inside);
    drawn
}

/// Split the budget across `config.workers` OS threads and wait for all of them.
pub async fn run(config: &Config, ctx: Arc<SharedContext>) -> Result<RunSummary> {
    run_with(config, ctx, sample_points).await
}

/// Like [`run`], with `work` standing in for the per-worker sampler.
///
/// Each worker gets its own `std::thread`; threads are never pooled or reused.
/// They are joined from a blocking task so the runtime keeps serving the
/// interrupt listener.
pub async fn run_with<F>(config: &Config, ctx: Arc<SharedContext>, work: F) -> Result<RunSummary>
where
    F: Fn(u64, &SharedContext) -> u64 + Send + Sync + 'static,
{
    let points_per_worker = config.points_per_worker();
    info!(
        total_points = config.total_points,
        workers = config.workers,
        points_per_worker,
        effective_points = config.effective_points(),
        "starting workers"
    );

    let work = Arc::new(work);
    let start = Instant::now();
    let mut handles = Vec::with_capacity(config.workers);

    for worker_id in 0..config.workers {
        let ctx_worker = Arc::clone(&ctx);
        let work = Arc::clone(&work);
        let spawned = thread::Builder::new()
            .name(format!("worker-{worker_id}"))
            .spawn(move || {
                debug!(worker_id, points = points_per_worker, "worker started");
                let drawn = (*work)(points_per_worker, &ctx_worker);
                debug!(worker_id, drawn, "worker finished");
                drawn
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                // Let the workers already running wind down before bailing out.
                ctx.request_stop();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(Error::Spawn { worker_id, source });
            }
        }
    }

    let sampled = task::spawn_blocking(move || {
        handles
            .into_iter()
            .enumerate()
            .map(|(worker_id, handle)| {
                handle
                    .join()
                    .map_err(|_| Error::WorkerPanicked { worker_id })
            })
            .sum::<Result<u64>>()
    })
    .await??;
    let elapsed = start.elapsed();

    let summary = RunSummary {
        total_points: config.total_points,
        workers: config.workers,
        points_per_worker,
        sampled,
        hits: ctx.hits(),
        stopped: ctx.should_stop(),
        elapsed,
    };
    info!(
        workers = summary.workers,
        sampled = summary.sampled,
        hits = summary.hits,
        stopped = summary.stopped,
        sample_estimate = ?summary.sample_estimate(),
        elapsed_ns = summary.elapsed.as_nanos() as u64,
        "workers joined"
    );
    Ok(summary)
}
