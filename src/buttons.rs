/// Physical buttons on the face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    Up,
    Down,
    Select,
}

impl Button {
    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            0 => Some(Button::Up),
            1 => Some(Button::Down),
            2 => Some(Button::Select),
            _ => None,
        }
    }

    pub fn code(&self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Select => 2,
        }
    }
}

/// Counts repeats of a held button.
///
/// Each press of the same button that arrives within `window_ms` of the
/// previous one continues the gesture and bumps the count; anything else
/// starts a fresh gesture at 1.
pub struct RepeatRecognizer {
    window_ms: u64,
    last: Option<(Button, u64)>,
    count: u32,
}

impl RepeatRecognizer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last: None,
            count: 0,
        }
    }

    pub fn press(&mut self, button: Button, now_ms: u64) -> u32 {
        let continues = match self.last {
            Some((prev, at)) => prev == button && now_ms.saturating_sub(at) <= self.window_ms,
            None => false,
        };
        self.count = if continues { self.count.saturating_add(1) } else { 1 };
        self.last = Some((button, now_ms));
        self.count
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }
}
