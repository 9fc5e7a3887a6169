//! The serialized event loop and its tokio-backed scheduler.
//!
//! User input, competition timers and recitation endings all arrive as
//! [`RuntimeEvent`]s on one unbounded channel. The loop handles them one at a
//! time, so no state is shared between tasks and nothing needs a lock.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use adzan_competition::application::command_handlers::ScheduledTask;
use adzan_core::scheduler::{Scheduler, TaskHandle};
use adzan_media::domain::audio::Recitation;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;
use tokio::time::{Instant, interval_at, sleep};
use tracing::{debug, info};

use crate::navigation::Page;
use crate::state::App;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetInput {
    /// Start a game.
    Start,
    /// Abandon the game.
    Reset,
    /// Answer for a player slot. Both values are range-checked downstream.
    Answer {
        /// Player number as typed.
        player: u8,
        /// Zero-based option index.
        choice: usize,
    },
    /// Navigate.
    ShowPage(Page),
    /// Play a recitation.
    PlayRecitation(Recitation),
    /// Flip the backsound preference.
    ToggleBacksound,
    /// Print usage.
    Help,
    /// Leave.
    Quit,
}

/// Everything the loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    /// A user command.
    Input(WidgetInput),
    /// Input that could not be parsed.
    Invalid(String),
    /// A competition timer fired.
    Scheduled(ScheduledTask),
    /// A recitation played to its end.
    RecitationEnded(Recitation),
    /// Stop the loop.
    Shutdown,
}

impl From<WidgetInput> for RuntimeEvent {
    fn from(input: WidgetInput) -> Self {
        Self::Input(input)
    }
}

impl From<ScheduledTask> for RuntimeEvent {
    fn from(task: ScheduledTask) -> Self {
        Self::Scheduled(task)
    }
}

impl From<Recitation> for RuntimeEvent {
    fn from(recitation: Recitation) -> Self {
        Self::RecitationEnded(recitation)
    }
}

/// A `Scheduler` that spawns tokio tasks which post back into the loop's
/// channel. Must be used from within a tokio runtime.
///
/// `cancel` aborts the task. A message that was already posted is still
/// delivered, which is why every scheduled value carries a generation.
#[derive(Debug)]
pub struct TokioScheduler<M> {
    sender: UnboundedSender<M>,
    next_id: u64,
    tasks: HashMap<TaskHandle, AbortHandle>,
}

impl<M: Send + 'static> TokioScheduler<M> {
    /// Creates a scheduler posting to `sender`.
    #[must_use]
    pub fn new(sender: UnboundedSender<M>) -> Self {
        Self {
            sender,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of spawned tasks that have neither finished nor been cancelled.
    #[must_use]
    pub fn live_tasks(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Aborts the task behind `handle`, whatever it was going to deliver.
    /// Unknown or finished handles are ignored.
    pub fn cancel(&mut self, handle: TaskHandle) {
        if let Some(abort) = self.tasks.remove(&handle) {
            abort.abort();
        }
    }

    fn register(&mut self, abort: AbortHandle) -> TaskHandle {
        self.tasks.retain(|_, handle| !handle.is_finished());
        self.next_id += 1;
        let handle = TaskHandle::new(self.next_id);
        self.tasks.insert(handle, abort);
        handle
    }
}

impl<M, T> Scheduler<T> for TokioScheduler<M>
where
    M: Send + 'static,
    T: Into<M> + Clone + Send + 'static,
{
    fn schedule_once(&mut self, delay: Duration, task: T) -> TaskHandle {
        let sender = self.sender.clone();
        let join = tokio::spawn(async move {
            sleep(delay).await;
            // The loop may already be gone during shutdown.
            let _ = sender.send(task.into());
        });
        self.register(join.abort_handle())
    }

    fn schedule_repeating(&mut self, period: Duration, task: T) -> TaskHandle {
        let sender = self.sender.clone();
        let join = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                if sender.send(task.clone().into()).is_err() {
                    break;
                }
            }
        });
        self.register(join.abort_handle())
    }

    fn cancel(&mut self, handle: TaskHandle) {
        TokioScheduler::cancel(self, handle);
    }
}

/// Runs `app` until the channel closes or a quit arrives.
pub async fn run<W: Write>(mut app: App<W>, mut events: UnboundedReceiver<RuntimeEvent>) {
    app.startup();
    while let Some(event) = events.recv().await {
        debug!(?event, "runtime event");
        if app.handle(event).is_break() {
            break;
        }
    }
    info!("event loop stopped");
}
