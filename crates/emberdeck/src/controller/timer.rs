use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Delayed check of whether to suggest fullscreen.
    FullscreenCheck,
    /// Re-read of the viewport once an orientation change has settled.
    OrientationSettle,
}

/// Fire-and-forget deadlines, polled by the frame loop. Nothing awaits
/// them; a cancelled timer simply never fires.
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<(TimerKind, Instant)>,
}

impl Timers {
    /// Schedule `kind` at `at`, replacing any pending timer of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, at: Instant) {
        self.pending.retain(|(k, _)| *k != kind);
        self.pending.push((kind, at));
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(TimerKind, Instant)> = Vec::new();
        self.pending.retain(|&(kind, at)| {
            if at <= now {
                due.push((kind, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, at)| at);
        due.into_iter().map(|(kind, _)| kind).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|&(_, at)| at).min()
    }

    #[cfg(test)]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(k, _)| *k == kind)
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_due_timers_fire_once_in_order() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.schedule(TimerKind::FullscreenCheck, start + Duration::from_millis(1000));
        timers.schedule(TimerKind::OrientationSettle, start + Duration::from_millis(100));

        assert!(timers.take_due(start).is_empty());
        assert_eq!(
            timers.next_deadline(),
            Some(start + Duration::from_millis(100))
        );

        let due = timers.take_due(start + Duration::from_secs(2));
        assert_eq!(
            due,
            vec![TimerKind::OrientationSettle, TimerKind::FullscreenCheck]
        );
        assert!(timers.take_due(start + Duration::from_secs(3)).is_empty());
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn test_reschedule_replaces() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.schedule(TimerKind::OrientationSettle, start);
        timers.schedule(TimerKind::OrientationSettle, start + Duration::from_millis(50));

        assert!(timers.take_due(start).is_empty());
        assert!(timers.is_pending(TimerKind::OrientationSettle));
    }

    #[test]
    fn test_cancel_all() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.schedule(TimerKind::FullscreenCheck, start);
        timers.cancel_all();
        assert!(timers.take_due(start + Duration::from_secs(1)).is_empty());
    }
}
