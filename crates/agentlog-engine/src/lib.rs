// Engine module - selects which decoded events reach the renderers
// Sits between the providers' reader and CLI presentation

pub mod filter;
pub mod window;

pub use filter::{InvalidLevel, Level};
pub use window::EventWindow;

use agentlog_types::Event;

/// Keep the events `level` accepts, then only the most recent `max` of them
/// (`max == 0` keeps all).
///
/// The first error from `events` ends the selection and is returned as-is.
pub fn select_events<I, E>(events: I, level: Level, max: usize) -> Result<Vec<Event>, E>
where
    I: IntoIterator<Item = Result<Event, E>>,
{
    let mut window = EventWindow::new(max);
    for event in events {
        let event = event?;
        if level.accepts(&event) {
            window.push(event);
        }
    }
    Ok(window.drain())
}
