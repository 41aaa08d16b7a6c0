/// Terminal key events to renderer input events
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use teapot3d_core::{InputEvent, InputKind, Key};

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Map a crossterm key event.
///
/// Terminals have no long-press, so Tab and `m` stand in for holding the
/// confirm button. Key releases are dropped.
pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    let kind = match key.kind {
        KeyEventKind::Press => InputKind::Press,
        KeyEventKind::Repeat => InputKind::Repeat,
        KeyEventKind::Release => return None,
    };

    let event = match key.code {
        KeyCode::Up | KeyCode::Char('w') => InputEvent::new(kind, Key::Up),
        KeyCode::Down | KeyCode::Char('s') => InputEvent::new(kind, Key::Down),
        KeyCode::Left | KeyCode::Char('a') => InputEvent::new(kind, Key::Left),
        KeyCode::Right | KeyCode::Char('d') => InputEvent::new(kind, Key::Right),
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::new(kind, Key::Confirm),
        KeyCode::Tab | KeyCode::Char('m') => InputEvent::new(InputKind::LongPress, Key::Confirm),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
            InputEvent::new(kind, Key::Back)
        }
        _ => return None,
    };
    Some(event)
}

/// Background reader feeding the renderer's bounded event queue
pub struct InputThread {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    pub fn spawn(sender: SyncSender<InputEvent>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || read_loop(sender, flag));
        Self {
            running,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Input thread panicked");
            }
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop(sender: SyncSender<InputEvent>, running: Arc<AtomicBool>) {
    while running.load(Ordering::Relaxed) {
        match event::poll(POLL_TIMEOUT) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                warn!("Terminal poll failed: {}", e);
                break;
            }
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                warn!("Terminal read failed: {}", e);
                break;
            }
        };

        if let Some(input) = map_key(&key) {
            if sender.send(input).is_err() {
                debug!("Renderer gone, input thread exiting");
                break;
            }
        }
    }
}
