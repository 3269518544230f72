//! # Pool de Worker Threads
//! src/pool/mod.rs
//!
//! Pool de tamaño fijo que desacopla la aceptación de conexiones del
//! manejo de requests. N workers comparten un único [`Scheduler`]; cada
//! worker hace loop sobre `await_task` → ejecutar → repetir hasta que el
//! shutdown lo despierte.
//!
//! El apagado es cooperativo: se marca la terminación, se despierta a
//! todos los workers y se los joinea. Un worker solo sale en el tope de
//! su loop, después de terminar (o nunca empezar) su tarea actual; nunca
//! se cancela un thread a mitad de tarea.

pub mod queue;
pub mod scheduler;

pub use queue::{Task, TaskQueue};
pub use scheduler::{Scheduler, SubmitError};

use log::{error, info, trace};
use std::sync::Arc;
use std::thread;

/// Errores al construir el pool
#[derive(Debug)]
pub enum PoolError {
    /// Se pidió un pool sin workers
    ZeroWorkers,

    /// No se pudo arrancar el worker número `index`.
    /// Los workers ya arrancados fueron detenidos y joineados.
    SpawnFailed {
        index: usize,
        source: std::io::Error,
    },
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::ZeroWorkers => write!(f, "Thread pool needs at least one worker"),
            PoolError::SpawnFailed { index, source } => {
                write!(f, "Failed to spawn worker thread {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::ZeroWorkers => None,
            PoolError::SpawnFailed { source, .. } => Some(source),
        }
    }
}

/// Pool de worker threads de tamaño fijo
pub struct ThreadPool {
    /// Cantidad de workers, inmutable tras la creación
    thread_count: usize,

    /// Handles de los workers vivos; se vacía en el shutdown
    workers: Vec<thread::JoinHandle<()>>,

    /// Scheduler compartido por todos los workers
    scheduler: Arc<Scheduler>,
}

impl ThreadPool {
    /// Crea un pool con exactamente `thread_count` workers.
    ///
    /// Si el worker `k` no arranca, los workers `0..k` ya arrancados se
    /// detienen y joinean antes de reportar la falla: no quedan threads
    /// huérfanos por una creación parcial.
    pub fn new(thread_count: usize) -> Result<Self, PoolError> {
        if thread_count == 0 {
            return Err(PoolError::ZeroWorkers);
        }

        let scheduler = Arc::new(Scheduler::new());
        let mut workers = Vec::with_capacity(thread_count);

        for i in 0..thread_count {
            let worker_scheduler = Arc::clone(&scheduler);
            let builder = thread::Builder::new().name(format!("worker-thread-{}", i));

            match builder.spawn(move || worker_loop(&worker_scheduler)) {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    error!("Failed to spawn worker thread {}: {}", i, source);
                    scheduler.shutdown();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::SpawnFailed { index: i, source });
                }
            }
        }

        Ok(Self {
            thread_count,
            workers,
            scheduler,
        })
    }

    /// Cantidad de workers del pool
    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Encola trabajo para que lo ejecute algún worker.
    ///
    /// Las tareas se ejecutan en orden FIFO de submit; con más de un
    /// worker, el orden de finalización no está garantizado. Si el pool
    /// ya fue apagado, el trabajo se descarta y se reporta al caller.
    pub fn submit<F>(&self, work: F) -> Result<(), SubmitError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.scheduler.submit(Box::new(work))
    }

    /// Apaga el pool: marca la terminación, descarta lo encolado y
    /// joinea cada worker.
    ///
    /// El join espera a que cada thread observe el flag y salga de su
    /// loop limpiamente; una tarea en curso corre hasta completarse.
    /// Idempotente.
    pub fn shutdown(&mut self) {
        if self.workers.is_empty() {
            return;
        }

        self.scheduler.shutdown();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("Worker thread panicked before join");
            }
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Loop principal de cada worker
fn worker_loop(scheduler: &Scheduler) {
    let current = thread::current();
    let name = current.name().unwrap_or("worker-thread");

    info!("[{}] Started thread", name);

    while let Some(task) = scheduler.await_task() {
        trace!("[{}] Executing task", name);
        task();
    }

    info!("[{}] Thread is terminating", name);
}
