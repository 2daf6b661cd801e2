//! Background worker for simulated-latency use cases.
//!
//! Runs a job on its own thread after a fixed delay so the TUI keeps
//! drawing while a diagnosis or registration is "processing".

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::MeddiagError;

/// Progress updates from a delayed task.
#[derive(Debug, Clone)]
pub enum TaskProgress<T> {
    /// Waiting out the delay
    Started,
    /// Job ran and returned a value
    Complete(T),
    /// Job ran and failed
    Error(String),
}

/// Handle to a running delayed task.
pub struct TaskHandle<T> {
    /// Receiver for progress updates
    pub progress_rx: Receiver<TaskProgress<T>>,
    started_at: Instant,
    delay: Duration,
    /// Thread handle (for joining)
    _handle: JoinHandle<()>,
}

impl<T> TaskHandle<T> {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<TaskProgress<T>> {
        self.progress_rx.try_recv().ok()
    }

    /// Share of the delay elapsed so far, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction_elapsed(&self) -> f64 {
        if self.delay.is_zero() {
            return 1.0;
        }
        let elapsed = self.started_at.elapsed().as_secs_f64();
        (elapsed / self.delay.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Spawns delayed jobs.
pub struct DelayedWorker;

impl DelayedWorker {
    /// Sleep for `delay` on a background thread, then run `job`.
    ///
    /// Not cancellable; dropping the handle only stops progress delivery.
    pub fn spawn<T, F>(delay: Duration, job: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, MeddiagError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let started_at = Instant::now();

        let handle = thread::spawn(move || {
            Self::run_with_progress(delay, job, tx);
        });

        TaskHandle {
            progress_rx: rx,
            started_at,
            delay,
            _handle: handle,
        }
    }

    fn run_with_progress<T, F>(delay: Duration, job: F, tx: Sender<TaskProgress<T>>)
    where
        F: FnOnce() -> Result<T, MeddiagError>,
    {
        let _ = tx.send(TaskProgress::Started);

        thread::sleep(delay);

        match job() {
            Ok(value) => {
                let _ = tx.send(TaskProgress::Complete(value));
            }
            Err(e) => {
                tracing::warn!("Background task failed: {}", e);
                let _ = tx.send(TaskProgress::Error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_result<T>(handle: &TaskHandle<T>) -> TaskProgress<T> {
        loop {
            match handle
                .progress_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("Worker should report")
            {
                TaskProgress::Started => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn test_job_runs_after_delay() {
        let delay = Duration::from_millis(60);
        let started = Instant::now();
        let handle = DelayedWorker::spawn(delay, || Ok(7_u32));

        match wait_for_result(&handle) {
            TaskProgress::Complete(value) => assert_eq!(value, 7),
            other => panic!("Expected completion, got {other:?}"),
        }
        assert!(started.elapsed() >= delay);
        assert!((handle.fraction_elapsed() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_started_is_reported_first() {
        let handle = DelayedWorker::spawn(Duration::ZERO, || Ok(()));
        let first = handle
            .progress_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("Worker should report");
        assert!(matches!(first, TaskProgress::Started));
    }

    #[test]
    fn test_errors_are_forwarded() {
        let handle: TaskHandle<()> = DelayedWorker::spawn(Duration::ZERO, || {
            Err(MeddiagError::Validation("sin síntomas".to_string()))
        });

        match wait_for_result(&handle) {
            TaskProgress::Error(msg) => assert!(msg.contains("sin síntomas")),
            other => panic!("Expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_fraction_elapsed_zero_delay() {
        let handle = DelayedWorker::spawn(Duration::ZERO, || Ok(()));
        assert!((handle.fraction_elapsed() - 1.0).abs() < f64::EPSILON);
    }
}
