//! Message input box and keyboard handling

/// The composition textarea
#[derive(Debug, Clone, PartialEq)]
pub struct InputBox {
    pub text: String,
    pub height_px: u32,
    pub disabled: bool,
}

impl InputBox {
    pub fn new(min_height_px: u32) -> Self {
        Self {
            text: String::new(),
            height_px: min_height_px,
            disabled: false,
        }
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Height the textarea should take for its content, capped at `max_px`
pub fn autosize_height(text: &str, line_height_px: u32, padding_px: u32, max_px: u32) -> u32 {
    let lines = text.split('\n').count().max(1) as u32;
    lines
        .saturating_mul(line_height_px)
        .saturating_add(padding_px)
        .min(max_px)
}

/// A key press as seen by the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    /// Whether the message input had focus
    pub in_input: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn in_input(mut self) -> Self {
        self.in_input = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// What a key press means for the chat page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Enter without Shift inside the input
    Submit,
    /// Ctrl/Cmd + `/`
    FocusInput,
    /// Escape inside the input
    ClearInput,
    None,
}

pub fn classify_key(press: &KeyPress) -> KeyCommand {
    match press.key.as_str() {
        "Enter" if press.in_input && !press.shift => KeyCommand::Submit,
        "/" if press.ctrl || press.meta => KeyCommand::FocusInput,
        "Escape" if press.in_input => KeyCommand::ClearInput,
        _ => KeyCommand::None,
    }
}
