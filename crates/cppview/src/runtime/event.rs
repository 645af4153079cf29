use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc;

use crate::app::App;
use crate::infra::watcher::FileChangeEvent;
use crate::runtime::{EventResult, key_handler};

pub(crate) fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(250)) {
                Ok(true) => {
                    if let Ok(event) = crossterm::event::read()
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

/// Waits for terminal input or workspace changes and applies them.
pub(crate) async fn process_events(
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    change_rx: &mut Option<mpsc::UnboundedReceiver<FileChangeEvent>>,
) -> EventResult {
    enum LoopSignal {
        Terminal(Option<Event>),
        Change(Option<FileChangeEvent>),
    }

    let signal = tokio::select! {
        biased;
        event = event_rx.recv() => LoopSignal::Terminal(event),
        change = next_change(change_rx) => LoopSignal::Change(change),
    };

    match signal {
        LoopSignal::Terminal(None) => return EventResult::Quit,
        LoopSignal::Terminal(Some(event)) => {
            if matches!(process_event(app, event).await, EventResult::Quit) {
                return EventResult::Quit;
            }
        }
        LoopSignal::Change(None) => {
            *change_rx = None;
        }
        LoopSignal::Change(Some(change)) => {
            let changes = drain_changes(change, change_rx);
            app.handle_file_changes(changes).await;
        }
    }

    // Drain queued key presses before re-rendering.
    while let Ok(event) = event_rx.try_recv() {
        if matches!(process_event(app, event).await, EventResult::Quit) {
            return EventResult::Quit;
        }
    }

    EventResult::Continue
}

async fn process_event(app: &mut App, event: Event) -> EventResult {
    if let Event::Key(key) = event {
        return key_handler::handle_key_event(app, key).await;
    }

    EventResult::Continue
}

/// Resolves with the next workspace change, or never when watching is off.
async fn next_change(
    change_rx: &mut Option<mpsc::UnboundedReceiver<FileChangeEvent>>,
) -> Option<FileChangeEvent> {
    match change_rx {
        Some(change_rx) => change_rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Collects `first` and every change already queued behind it, so a burst
/// of events costs one refresh.
fn drain_changes(
    first: FileChangeEvent,
    change_rx: &mut Option<mpsc::UnboundedReceiver<FileChangeEvent>>,
) -> Vec<FileChangeEvent> {
    let mut changes = vec![first];
    if let Some(change_rx) = change_rx {
        while let Ok(change) = change_rx.try_recv() {
            changes.push(change);
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::infra::watcher::FileChangeKind;

    fn change(path: &str) -> FileChangeEvent {
        FileChangeEvent {
            kind: FileChangeKind::Changed,
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_drain_changes_collects_queued_events() {
        // Arrange
        let (change_tx, change_rx) = mpsc::unbounded_channel();
        change_tx
            .send(change("/ws/b.h"))
            .expect("test expectation should hold");
        change_tx
            .send(change("/ws/c.h"))
            .expect("test expectation should hold");
        let mut change_rx = Some(change_rx);

        // Act
        let changes = drain_changes(change("/ws/a.h"), &mut change_rx);

        // Assert
        assert_eq!(
            changes,
            vec![change("/ws/a.h"), change("/ws/b.h"), change("/ws/c.h")]
        );
    }

    #[tokio::test]
    async fn test_next_change_returns_queued_event() {
        // Arrange
        let (change_tx, change_rx) = mpsc::unbounded_channel();
        change_tx
            .send(change("/ws/a.h"))
            .expect("test expectation should hold");
        let mut change_rx = Some(change_rx);

        // Act
        let next = next_change(&mut change_rx).await;

        // Assert
        assert_eq!(next, Some(change("/ws/a.h")));
    }
}
