use std::time::Duration;

/// The single on-screen message line. A new message replaces the old one.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<(String, Duration)>,
    window: Duration,
}

impl Notifier {
    pub fn new(window: Duration) -> Self {
        Self {
            current: None,
            window,
        }
    }

    pub fn post(&mut self, text: impl Into<String>, wall: Duration) {
        let text = text.into();
        log::debug!("notify: {}", text);
        self.current = Some((text, wall));
    }

    /// Message to show at `wall`, if it is still inside its display window.
    pub fn active(&self, wall: Duration) -> Option<&str> {
        let (text, posted) = self.current.as_ref()?;
        (wall.saturating_sub(*posted) < self.window).then_some(text.as_str())
    }
}
