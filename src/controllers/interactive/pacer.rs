use std::time::{Duration, Instant};

/// Blocks or schedules until the next frame is due.
pub trait FramePacer {
    fn pace(&mut self);
}

/// Fixed-period deadlines that resynchronise instead of bursting when a
/// frame overruns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSchedule {
    period: Duration,
    deadline: Instant,
}

impl FrameSchedule {
    #[must_use]
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            deadline: start,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Moves to the next frame's deadline, which is never in the past.
    pub fn advance(&mut self, now: Instant) -> Instant {
        self.deadline += self.period;

        if self.deadline < now {
            self.deadline = now;
        }

        self.deadline
    }
}

/// Computes deadlines for an event loop that waits on its own
/// (`ControlFlow::WaitUntil`) instead of sleeping.
pub struct EventLoopPacer {
    schedule: FrameSchedule,
}

impl EventLoopPacer {
    #[must_use]
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            schedule: FrameSchedule::new(period, start),
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.schedule.deadline()
    }
}

impl FramePacer for EventLoopPacer {
    fn pace(&mut self) {
        self.schedule.advance(Instant::now());
    }
}
