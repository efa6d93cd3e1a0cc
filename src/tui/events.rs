use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// Status message event
    StatusMessage(String),

    /// Request to leave the application
    Quit,
}

/// Event handler for managing input events
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel
    sender: mpsc::UnboundedSender<Event>,

    /// How long to wait for terminal input before emitting a tick
    tick_interval: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            receiver,
            sender,
            tick_interval,
        }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        // Internal events first so a queued quit is never starved by input
        if let Ok(event) = self.receiver.try_recv() {
            return Some(event);
        }

        // `poll` bounds the blocking read, so the task is always awaited and
        // an event it reads is never dropped.
        let wait = self.tick_interval;
        let polled = tokio::task::spawn_blocking(move || -> std::io::Result<Option<CrosstermEvent>> {
            if crossterm::event::poll(wait)? {
                crossterm::event::read().map(Some)
            } else {
                Ok(None)
            }
        })
        .await;

        match polled {
            Ok(Ok(Some(event))) => {
                if let Some(event) = Self::convert_crossterm_event(event) {
                    return Some(event);
                }
            }
            Ok(Ok(None)) => {}
            Ok(Err(err)) => warn!("Terminal input error: {}", err),
            Err(err) => warn!("Input task failed: {}", err),
        }

        Some(Event::Tick)
    }

    /// Convert crossterm events to application events
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key_event) => Some(Event::Key(key_event)),
            CrosstermEvent::Mouse(mouse_event) => Some(Event::Mouse(mouse_event)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Paste(_) => None,
        }
    }

    /// Send an internal event
    pub fn send(&self, event: Event) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_internal_events_are_delivered_first() {
        let mut handler = EventHandler::default();
        handler.send(Event::StatusMessage("saved".to_string())).unwrap();

        match handler.next().await {
            Some(Event::StatusMessage(message)) => assert_eq!(message, "saved"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_terminal_events_convert() {
        assert!(matches!(
            EventHandler::convert_crossterm_event(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        ));
        assert!(EventHandler::convert_crossterm_event(CrosstermEvent::FocusLost).is_none());
    }
}
