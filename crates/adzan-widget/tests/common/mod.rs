//! Shared helpers for widget integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use adzan_core::preferences::PreferenceStore;
use adzan_test_support::{FixedClock, InMemoryPreferenceStore, MockRng};
use adzan_widget::audio::ConsoleAudioOutput;
use adzan_widget::config::WidgetConfig;
use adzan_widget::runtime::{RuntimeEvent, WidgetInput};
use adzan_widget::state::App;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// A writer whose bytes stay readable after the app has taken ownership.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far.
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A widget under test together with the receiving end of its channel.
pub struct Harness {
    pub app: App<SharedBuffer>,
    pub events: UnboundedReceiver<RuntimeEvent>,
    pub output: SharedBuffer,
}

impl Harness {
    /// Builds a widget with default configuration and in-memory preferences.
    pub fn new() -> Self {
        Self::with(
            WidgetConfig::default(),
            Arc::new(InMemoryPreferenceStore::default()),
        )
    }

    /// Builds a widget with the given configuration and preference store.
    pub fn with(config: WidgetConfig, preferences: Arc<dyn PreferenceStore>) -> Self {
        let (sender, events) = unbounded_channel();
        let output = SharedBuffer::default();
        let app = App::new(
            config,
            Box::new(FixedClock::default_instant()),
            Box::new(MockRng),
            Arc::new(ConsoleAudioOutput::new()),
            preferences,
            sender,
            output.clone(),
        )
        .unwrap();
        Self {
            app,
            events,
            output,
        }
    }

    /// Sends user input straight to the app.
    pub fn input(&mut self, input: WidgetInput) {
        assert!(self.app.handle(input.into()).is_continue());
    }

    /// Lets `duration` pass on the paused clock, then handles every event
    /// the scheduler posted meanwhile. Returns how many were handled.
    pub async fn advance(&mut self, duration: Duration) -> usize {
        tokio::time::sleep(duration).await;
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            let _ = self.app.handle(event);
            handled += 1;
        }
        handled
    }
}
