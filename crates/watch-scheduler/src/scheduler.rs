//! Job table and per-job timer loops

use crate::error::{Result, SchedulerError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Boxed future a job task produces per invocation
pub type TaskFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

type TaskFn = Arc<dyn Fn() -> TaskFuture + Send + Sync>;

/// How many task failures the in-memory log keeps
const FAILURE_LOG_CAPACITY: usize = 64;

/// One recorded task failure
#[derive(Debug, Clone, Serialize)]
pub struct TaskFailure {
    pub job: String,
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Bounded ring of recent task failures, shared by every job loop
struct FailureLog {
    entries: RwLock<VecDeque<TaskFailure>>,
}

impl FailureLog {
    fn new() -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(FAILURE_LOG_CAPACITY)),
        }
    }

    fn record(&self, job: &str, message: String) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() == FAILURE_LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(TaskFailure {
            job: job.to_string(),
            at: Utc::now(),
            message,
        });
    }

    fn recent(&self) -> Vec<TaskFailure> {
        let entries = self.entries.read().unwrap();
        entries.iter().cloned().collect()
    }
}

/// Shared counters and flags for one job, visible to its timer loop
struct JobState {
    name: String,
    interval: Duration,
    /// Set while an invocation is in flight; the overlap guard
    running: AtomicBool,
    last_run: RwLock<Option<DateTime<Utc>>>,
    skipped_ticks: AtomicU64,
    failed_runs: AtomicU64,
}

/// Clears the running flag when an invocation finishes, even on panic
struct RunningGuard(Arc<JobState>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.running.store(false, Ordering::SeqCst);
    }
}

struct JobEntry {
    state: Arc<JobState>,
    timer: JoinHandle<()>,
    active: bool,
}

/// Snapshot of one job's scheduling state
#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    pub name: String,
    pub interval: Duration,
    pub active: bool,
    pub last_run: Option<DateTime<Utc>>,
    pub skipped_ticks: u64,
    pub failed_runs: u64,
}

/// Registry of named periodic jobs, each on its own timer
///
/// On registration a job's task runs once immediately, then on every elapsed
/// interval. `stop`/`stop_all` cancel future invocations only: an invocation
/// already in flight runs to completion, fire-and-forget.
pub struct JobScheduler {
    jobs: RwLock<HashMap<String, JobEntry>>,
    failures: Arc<FailureLog>,
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            failures: Arc::new(FailureLog::new()),
        }
    }
}

impl JobScheduler {
    /// Create a scheduler with no jobs
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named periodic job.
    ///
    /// The task runs once right away, then every `interval`. Fails if `name`
    /// is already registered and still active; a name whose job was stopped
    /// may be registered again.
    pub fn register<F, Fut>(&self, name: &str, interval: Duration, task: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let task: TaskFn = Arc::new(move || -> TaskFuture { Box::pin(task()) });
        self.register_boxed(name, interval, task)
    }

    fn register_boxed(&self, name: &str, interval: Duration, task: TaskFn) -> Result<()> {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval(name.to_string()));
        }

        let mut jobs = self.jobs.write().unwrap();
        if let Some(existing) = jobs.get(name) {
            if existing.active {
                return Err(SchedulerError::DuplicateJob(name.to_string()));
            }
            // Stopped entry: its timer is already aborted, replace it
            jobs.remove(name);
        }

        let state = Arc::new(JobState {
            name: name.to_string(),
            interval,
            running: AtomicBool::new(false),
            last_run: RwLock::new(None),
            skipped_ticks: AtomicU64::new(0),
            failed_runs: AtomicU64::new(0),
        });

        let timer = tokio::spawn(run_loop(
            Arc::clone(&state),
            task,
            Arc::clone(&self.failures),
        ));

        jobs.insert(
            name.to_string(),
            JobEntry {
                state,
                timer,
                active: true,
            },
        );
        info!(job = %name, interval_ms = interval.as_millis() as u64, "registered job");
        Ok(())
    }

    /// Cancel future invocations of `name`; no-op if the name is unknown.
    pub fn stop(&self, name: &str) {
        let mut jobs = self.jobs.write().unwrap();
        if let Some(entry) = jobs.get_mut(name) {
            if entry.active {
                entry.active = false;
                entry.timer.abort();
                info!(job = %name, "stopped job");
            }
        }
    }

    /// Cancel future invocations of every job.
    pub fn stop_all(&self) {
        let mut jobs = self.jobs.write().unwrap();
        for entry in jobs.values_mut() {
            if entry.active {
                entry.active = false;
                entry.timer.abort();
            }
        }
        info!(count = jobs.len(), "stopped all jobs");
    }

    /// Whether `name` is registered and still scheduled
    pub fn is_active(&self, name: &str) -> bool {
        let jobs = self.jobs.read().unwrap();
        jobs.get(name).is_some_and(|e| e.active)
    }

    /// Scheduling snapshot of every job, sorted by name
    pub fn jobs(&self) -> Vec<JobStatus> {
        let jobs = self.jobs.read().unwrap();
        let mut statuses: Vec<JobStatus> = jobs
            .values()
            .map(|entry| JobStatus {
                name: entry.state.name.clone(),
                interval: entry.state.interval,
                active: entry.active,
                last_run: *entry.state.last_run.read().unwrap(),
                skipped_ticks: entry.state.skipped_ticks.load(Ordering::SeqCst),
                failed_runs: entry.state.failed_runs.load(Ordering::SeqCst),
            })
            .collect();
        statuses.sort_by(|a, b| a.name.cmp(&b.name));
        statuses
    }

    /// Recent task failures, oldest first
    pub fn recent_failures(&self) -> Vec<TaskFailure> {
        self.failures.recent()
    }
}

impl Drop for JobScheduler {
    fn drop(&mut self) {
        let jobs = self.jobs.read().unwrap();
        for entry in jobs.values() {
            entry.timer.abort();
        }
    }
}

/// One job's timer loop: tick, guard, spawn the invocation, repeat.
async fn run_loop(state: Arc<JobState>, task: TaskFn, failures: Arc<FailureLog>) {
    let mut ticker = tokio::time::interval(state.interval);
    // A late tick is dropped, not replayed in a burst
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if state.running.swap(true, Ordering::SeqCst) {
            state.skipped_ticks.fetch_add(1, Ordering::SeqCst);
            warn!(job = %state.name, "previous invocation still running, skipping tick");
            continue;
        }

        *state.last_run.write().unwrap() = Some(Utc::now());
        let invocation = task();
        let job = Arc::clone(&state);
        let log = Arc::clone(&failures);

        // Fire-and-forget: stop() aborts this loop, never the invocation
        tokio::spawn(async move {
            let _running = RunningGuard(Arc::clone(&job));
            if let Err(e) = invocation.await {
                job.failed_runs.fetch_add(1, Ordering::SeqCst);
                log.record(&job.name, e.to_string());
                error!(job = %job.name, error = %e, "job task failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::AtomicUsize;

    fn counting_task(counter: Arc<AtomicUsize>) -> impl Fn() -> TaskFuture {
        move || {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }) as TaskFuture
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_on_register() {
        let scheduler = JobScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        scheduler
            .register("refresh", Duration::from_millis(100), counting_task(Arc::clone(&count)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_invocation_per_tick() {
        let scheduler = JobScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        scheduler
            .register("x", Duration::from_millis(100), counting_task(Arc::clone(&count)))
            .unwrap();

        // Ticks at t=0, 100, 200
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_future_invocations() {
        let scheduler = JobScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        scheduler
            .register("x", Duration::from_millis(100), counting_task(Arc::clone(&count)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        scheduler.stop("x");
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!scheduler.is_active("x"));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_unknown_is_silent_noop() {
        let scheduler = JobScheduler::new();
        scheduler.stop("no-such-job");
        assert!(scheduler.jobs().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_name_rejected() {
        let scheduler = JobScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        scheduler
            .register("x", Duration::from_millis(100), counting_task(Arc::clone(&count)))
            .unwrap();
        let err = scheduler.register("x", Duration::from_millis(100), counting_task(count));

        assert!(matches!(err, Err(SchedulerError::DuplicateJob(name)) if name == "x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reregister_after_stop() {
        let scheduler = JobScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        scheduler
            .register("x", Duration::from_millis(100), counting_task(Arc::clone(&count)))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.stop("x");

        scheduler
            .register("x", Duration::from_millis(100), counting_task(Arc::clone(&count)))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;

        // One run from the first registration, one immediate run from the second
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(scheduler.is_active("x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_rejected() {
        let scheduler = JobScheduler::new();
        let err = scheduler.register("x", Duration::ZERO, || async { Ok(()) });
        assert!(matches!(err, Err(SchedulerError::InvalidInterval(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_task_skips_overlapping_ticks() {
        let scheduler = JobScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let slow_count = Arc::clone(&count);

        scheduler
            .register("slow", Duration::from_millis(100), move || {
                let count = Arc::clone(&slow_count);
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(250)).await;
                    Ok(())
                }
            })
            .unwrap();

        // Invocations start at t=0 and t=300; ticks at 100 and 200 arrive
        // while the first invocation is still running and are skipped.
        tokio::time::sleep(Duration::from_millis(360)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        let status = &scheduler.jobs()[0];
        assert_eq!(status.skipped_ticks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_task_keeps_its_schedule() {
        let scheduler = JobScheduler::new();
        let failing = Arc::new(AtomicUsize::new(0));
        let healthy = Arc::new(AtomicUsize::new(0));

        let failing_count = Arc::clone(&failing);
        scheduler
            .register("failing", Duration::from_millis(100), move || {
                let count = Arc::clone(&failing_count);
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(anyhow!("quote feed timed out"))
                }
            })
            .unwrap();
        scheduler
            .register("healthy", Duration::from_millis(100), counting_task(Arc::clone(&healthy)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;

        // The failing job keeps running on schedule, and its neighbor is untouched
        assert_eq!(failing.load(Ordering::SeqCst), 3);
        assert_eq!(healthy.load(Ordering::SeqCst), 3);

        let failures = scheduler.recent_failures();
        assert_eq!(failures.len(), 3);
        assert!(failures[0].message.contains("timed out"));

        let statuses = scheduler.jobs();
        let failing_status = statuses.iter().find(|s| s.name == "failing").unwrap();
        assert_eq!(failing_status.failed_runs, 3);
        assert!(failing_status.active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_all() {
        let scheduler = JobScheduler::new();
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));

        scheduler
            .register("a", Duration::from_millis(100), counting_task(Arc::clone(&a)))
            .unwrap();
        scheduler
            .register("b", Duration::from_millis(50), counting_task(Arc::clone(&b)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        scheduler.stop_all();
        let (a_before, b_before) = (a.load(Ordering::SeqCst), b.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(a.load(Ordering::SeqCst), a_before);
        assert_eq!(b.load(Ordering::SeqCst), b_before);
        assert!(scheduler.jobs().iter().all(|s| !s.active));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_run_recorded() {
        let scheduler = JobScheduler::new();
        scheduler
            .register("x", Duration::from_millis(100), || async { Ok(()) })
            .unwrap();

        assert!(scheduler.jobs()[0].last_run.is_none());
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(scheduler.jobs()[0].last_run.is_some());
    }
}
