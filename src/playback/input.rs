use std::collections::VecDeque;

/// Keys the player reacts to, named after DOM `KeyboardEvent.code` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    KeyF,
    KeyM,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// `Digit1`..`Digit9`
    Digit(u8),
    Equal,
    NumpadAdd,
    Minus,
    NumpadSubtract,
    BracketLeft,
    BracketRight,
    KeyG,
    KeyH,
    KeyJ,
    KeyK,
    Comma,
    Period,
}

impl Key {
    /// Step keys keep applying while held. Toggles, preset selection and the
    /// hold key act once per physical press.
    pub fn auto_repeats(self) -> bool {
        !matches!(self, Key::Space | Key::KeyF | Key::KeyM | Key::Digit(_))
    }

    /// Map a `KeyboardEvent.code` string. Unbound codes give `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "Space" => Key::Space,
            "KeyF" => Key::KeyF,
            "KeyM" => Key::KeyM,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Equal" => Key::Equal,
            "NumpadAdd" => Key::NumpadAdd,
            "Minus" => Key::Minus,
            "NumpadSubtract" => Key::NumpadSubtract,
            "BracketLeft" => Key::BracketLeft,
            "BracketRight" => Key::BracketRight,
            "KeyG" => Key::KeyG,
            "KeyH" => Key::KeyH,
            "KeyJ" => Key::KeyJ,
            "KeyK" => Key::KeyK,
            "Comma" => Key::Comma,
            "Period" => Key::Period,
            other => {
                let digit = other.strip_prefix("Digit")?.parse::<u8>().ok()?;
                if !(1..=9).contains(&digit) {
                    return None;
                }
                Key::Digit(digit)
            }
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// OS auto-repeat
    pub repeat: bool,
    /// The event targeted a text-entry field
    pub in_text_field: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            repeat: false,
            in_text_field: false,
        }
    }

    pub fn repeated(key: Key) -> Self {
        Self {
            repeat: true,
            ..Self::new(key)
        }
    }
}

/// Everything the host feeds into the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// Periodic media clock tick
    TimeUpdate,
    /// The element paused
    Paused,
    /// Duration and dimensions are known
    MetadataLoaded,
}

/// FIFO queue the host adapter pushes device events into
#[derive(Debug, Default)]
pub struct InputPort {
    queue: VecDeque<InputEvent>,
}

impl InputPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Convenience for hosts that only know the DOM code. Unbound codes are dropped.
    pub fn push_key_down(&mut self, code: &str, repeat: bool, in_text_field: bool) {
        if let Some(key) = Key::from_code(code) {
            self.push(InputEvent::KeyDown(KeyEvent {
                key,
                repeat,
                in_text_field,
            }));
        }
    }

    pub fn push_key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.push(InputEvent::KeyUp(KeyEvent::new(key)));
        }
    }

    pub fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
