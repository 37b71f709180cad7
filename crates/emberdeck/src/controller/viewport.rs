/// Widths at or below this count as a phone-sized viewport.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

pub fn is_mobile(width: f32) -> bool {
    width <= MOBILE_BREAKPOINT
}

/// Narrow and taller than wide.
pub fn is_portrait_narrow(width: f32, height: f32) -> bool {
    is_mobile(width) && height > width
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Observation {
    pub resized: bool,
    /// Portrait/landscape flipped compared to the previous size.
    pub orientation_changed: bool,
}

/// Derives layout booleans from the window size. Owns nothing but the
/// last observed size and the scroll-mode latch.
#[derive(Debug, Default)]
pub struct ViewportWatcher {
    size: Option<(f32, f32)>,
    scroll_enabled: bool,
}

impl ViewportWatcher {
    pub fn observe(&mut self, width: f32, height: f32) -> Observation {
        let previous = self.size;
        if previous == Some((width, height)) {
            return Observation::default();
        }
        self.size = Some((width, height));

        // One-way latch: narrow windows turn scroll mode on, wide ones
        // never turn it back off.
        if is_mobile(width) && !self.scroll_enabled {
            tracing::debug!(width, "narrow viewport, enabling scroll mode");
            self.scroll_enabled = true;
        }

        let orientation_changed =
            previous.is_some_and(|(w, h)| (h > w) != (height > width));
        Observation {
            resized: true,
            orientation_changed,
        }
    }

    pub fn is_portrait_narrow(&self) -> bool {
        self.size.is_some_and(|(w, h)| is_portrait_narrow(w, h))
    }

    pub fn is_mobile(&self) -> bool {
        self.size.is_some_and(|(w, _)| is_mobile(w))
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_narrow_boundary() {
        assert!(is_portrait_narrow(768.0, 769.0));
        assert!(!is_portrait_narrow(768.0, 768.0));
        assert!(!is_portrait_narrow(769.0, 2000.0));
        assert!(is_portrait_narrow(375.0, 667.0));
        assert!(!is_portrait_narrow(375.0, 320.0));
    }

    #[test]
    fn test_orientation_change_detection() {
        let mut watcher = ViewportWatcher::default();
        let first = watcher.observe(1024.0, 768.0);
        assert!(first.resized);
        assert!(!first.orientation_changed);

        assert_eq!(watcher.observe(1024.0, 768.0), Observation::default());

        let flipped = watcher.observe(375.0, 667.0);
        assert!(flipped.orientation_changed);

        let same_orientation = watcher.observe(400.0, 700.0);
        assert!(same_orientation.resized);
        assert!(!same_orientation.orientation_changed);
    }

    #[test]
    fn test_scroll_latch_never_releases() {
        // Known quirk: once a narrow viewport turned scroll mode on,
        // widening the window leaves it on.
        let mut watcher = ViewportWatcher::default();
        watcher.observe(1280.0, 720.0);
        assert!(!watcher.scroll_enabled());

        watcher.observe(700.0, 720.0);
        assert!(watcher.scroll_enabled());

        watcher.observe(1280.0, 720.0);
        assert!(watcher.scroll_enabled());
    }

    #[test]
    fn test_latch_reapplies_on_next_narrow_resize() {
        let mut watcher = ViewportWatcher::default();
        watcher.observe(500.0, 900.0);
        watcher.set_scroll_enabled(false);
        assert!(!watcher.scroll_enabled());

        watcher.observe(510.0, 900.0);
        assert!(watcher.scroll_enabled());
    }
}
