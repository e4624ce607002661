use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
}

/// Block until the next key press or resize. Everything happens on the
/// calling thread; there is nothing to refresh between keystrokes.
pub fn next_event() -> io::Result<Event> {
    loop {
        match event::read()? {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => return Ok(Event::Key(key)),
            CEvent::Resize(_, _) => return Ok(Event::Resize),
            _ => {}
        }
    }
}

/// Drop anything already queued, e.g. the Enter that launched the program.
pub fn drain_pending() -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}
