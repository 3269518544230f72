//! # Scheduler del Pool
//! src/pool/scheduler.rs
//!
//! Objeto de sincronización que media el acceso a la cola de tareas:
//! un mutex sobre (cola, flag de terminación) más una condition variable
//! para despertar workers.
//!
//! La cola y el flag son el único estado compartido entre threads, y
//! ambos se tocan únicamente con el mutex tomado. `terminated`, una vez
//! en true, no vuelve a false.

use crate::pool::queue::{Task, TaskQueue};
use std::sync::{Condvar, Mutex};

/// Estado protegido por el mutex
struct SchedulerState {
    queue: TaskQueue,
    terminated: bool,
}

/// Error al encolar una tarea
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// El scheduler ya fue apagado; la tarea se descarta
    Terminated,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Terminated => write!(f, "Scheduler is terminated"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Scheduler: cola de tareas + mutex + condvar + flag de terminación
pub struct Scheduler {
    state: Mutex<SchedulerState>,
    notify: Condvar,
}

impl Scheduler {
    /// Crea un scheduler con la cola vacía y sin terminar
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SchedulerState {
                queue: TaskQueue::new(),
                terminated: false,
            }),
            notify: Condvar::new(),
        }
    }

    /// Encola una tarea y despierta a un worker.
    ///
    /// Si el scheduler ya fue apagado la tarea se descarta y se reporta
    /// el error al caller; nunca se reintenta en silencio.
    pub fn submit(&self, task: Task) -> Result<(), SubmitError> {
        let mut state = self.state.lock().unwrap();

        if state.terminated {
            return Err(SubmitError::Terminated);
        }

        state.queue.push_back(task);
        self.notify.notify_one();

        Ok(())
    }

    /// Bloquea hasta que haya una tarea o llegue el shutdown.
    ///
    /// Retorna `Some(task)` con la tarea más antigua, o `None` cuando el
    /// scheduler fue terminado: el thread que recibe `None` debe salir de
    /// su loop. Después del shutdown esta función nunca vuelve a bloquear.
    pub fn await_task(&self) -> Option<Task> {
        let mut state = self.state.lock().unwrap();

        loop {
            if state.terminated {
                return None;
            }

            if let Some(task) = state.queue.pop_front() {
                return Some(task);
            }

            state = self.notify.wait(state).unwrap();
        }
    }

    /// Apaga el scheduler: marca la terminación, descarta las tareas aún
    /// encoladas y despierta a todos los workers.
    ///
    /// El descarte ocurre bajo el mismo lock que protege el dequeue, así
    /// que nunca corre en paralelo con un worker a mitad de pop. Las
    /// tareas encoladas pero no tomadas se pierden.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap();

        state.terminated = true;

        let discarded = state.queue.clear();
        if discarded > 0 {
            log::warn!("Discarding {} queued tasks on shutdown", discarded);
        }

        self.notify.notify_all();
    }

    /// Verifica si el scheduler ya fue terminado
    pub fn is_terminated(&self) -> bool {
        self.state.lock().unwrap().terminated
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
