/// Keyboard handling: a pressed-key table the frame loop reads once per tick,
/// and a listener that turns terminal key events into table updates and
/// one-shot commands.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol, Ghostty, etc.): proper
///   `Press` / `Repeat` / `Release` events.  Keys are held until released and
///   the fire key shoots on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` ticks of silence and
///   the fire key shoots on press.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key counts as held if its last press/repeat arrived within this many
/// ticks.  At 60 Hz that is ≈130 ms, shorter than any OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
    Restart,
    Quit,
}

/// Map a terminal key to a game key.  Arrows and WASD both move.
pub fn key_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Quit)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Directional intent for one tick, copied out of the table in one go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// One-shot actions produced by key events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Fire,
    TogglePause,
    Restart,
    Quit,
}

/// Maps each held key → the tick it was last seen (press or repeat).
#[derive(Clone, Debug, Default)]
pub struct KeyTable {
    last_seen: HashMap<Key, u64>,
    release_events: bool,
}

impl KeyTable {
    /// `release_events` says whether the terminal reports key releases.
    pub fn new(release_events: bool) -> Self {
        KeyTable {
            last_seen: HashMap::new(),
            release_events,
        }
    }

    pub fn press(&mut self, key: Key, tick: u64) {
        self.last_seen.insert(key, tick);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key, tick: u64) -> bool {
        match self.last_seen.get(&key) {
            Some(_) if self.release_events => true,
            Some(&last) => tick.saturating_sub(last) <= HOLD_WINDOW,
            None => false,
        }
    }

    pub fn snapshot(&self, tick: u64) -> KeySnapshot {
        KeySnapshot {
            left: self.is_held(Key::Left, tick),
            right: self.is_held(Key::Right, tick),
            up: self.is_held(Key::Up, tick),
            down: self.is_held(Key::Down, tick),
        }
    }
}

/// Feeds key events into a [`KeyTable`] and reports one-shot commands.
#[derive(Clone, Debug, Default)]
pub struct InputListener {
    table: KeyTable,
}

impl InputListener {
    pub fn new(release_events: bool) -> Self {
        InputListener {
            table: KeyTable::new(release_events),
        }
    }

    /// Record `event` (seen at `tick`) and return the command it triggers, if
    /// any.
    pub fn handle(&mut self, event: &KeyEvent, tick: u64) -> Option<Command> {
        let key = key_for(event.code, event.modifiers)?;
        let release_events = self.table.release_events;
        match event.kind {
            KeyEventKind::Press => {
                self.table.press(key, tick);
                match key {
                    Key::Fire if !release_events => Some(Command::Fire),
                    Key::Pause => Some(Command::TogglePause),
                    Key::Restart => Some(Command::Restart),
                    Key::Quit => Some(Command::Quit),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.table.press(key, tick);
                None
            }
            KeyEventKind::Release => {
                self.table.release(key);
                (key == Key::Fire && release_events).then_some(Command::Fire)
            }
        }
    }

    pub fn snapshot(&self, tick: u64) -> KeySnapshot {
        self.table.snapshot(tick)
    }
}
