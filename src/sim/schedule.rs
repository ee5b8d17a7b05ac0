//! Cancellable deferred actions on the game clock
//!
//! Single-threaded replacement for fire-and-forget timers: actions are queued
//! with a delay, handed back by `advance` once due, and can be cancelled by
//! token (or all at once) before that.

/// Handle for a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskToken(u64);

#[derive(Debug, Clone)]
struct Task<A> {
    token: TaskToken,
    due_ms: f64,
    action: A,
}

/// Queue of delayed actions
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now_ms: f64,
    tasks: Vec<Task<A>>,
    next_token: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            tasks: Vec::new(),
            next_token: 1,
        }
    }

    /// Elapsed game-clock time
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of actions still waiting
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Queue `action` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f32, action: A) -> TaskToken {
        let token = TaskToken(self.next_token);
        self.next_token += 1;
        self.tasks.push(Task {
            token,
            due_ms: self.now_ms + delay_ms.max(0.0) as f64,
            action,
        });
        token
    }

    /// Returns false if the task already fired or was cancelled
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.token != token);
        self.tasks.len() != before
    }

    /// Drop every pending action, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Move the clock forward and return the actions that came due,
    /// earliest first (ties in scheduling order)
    pub fn advance(&mut self, dt_ms: f32) -> Vec<A> {
        self.now_ms += dt_ms.max(0.0) as f64;
        let now = self.now_ms;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due_ms <= now);
        self.tasks = waiting;

        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.token.cmp(&b.token))
        });
        due.into_iter().map(|t| t.action).collect()
    }
}
