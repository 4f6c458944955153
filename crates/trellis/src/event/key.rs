use crossterm::event as cevent;

/// Modifier keys held during a keystroke.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Mods {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl From<cevent::KeyModifiers> for Mods {
    fn from(m: cevent::KeyModifiers) -> Self {
        Self {
            shift: m.contains(cevent::KeyModifiers::SHIFT),
            ctrl: m.contains(cevent::KeyModifiers::CONTROL),
            alt: m.contains(cevent::KeyModifiers::ALT),
        }
    }
}

/// The keys the engine routes to widgets. Anything the terminal reports
/// beyond these maps to `Null` and is ignored by every widget.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    /// Shift + Tab.
    BackTab,
    Delete,
    /// A character-producing key.
    Char(char),
    Esc,
    Null,
}

impl From<cevent::KeyCode> for KeyCode {
    fn from(k: cevent::KeyCode) -> Self {
        match k {
            cevent::KeyCode::Backspace => Self::Backspace,
            cevent::KeyCode::Enter => Self::Enter,
            cevent::KeyCode::Left => Self::Left,
            cevent::KeyCode::Right => Self::Right,
            cevent::KeyCode::Up => Self::Up,
            cevent::KeyCode::Down => Self::Down,
            cevent::KeyCode::Home => Self::Home,
            cevent::KeyCode::End => Self::End,
            cevent::KeyCode::Tab => Self::Tab,
            cevent::KeyCode::BackTab => Self::BackTab,
            cevent::KeyCode::Delete => Self::Delete,
            cevent::KeyCode::Char(c) => Self::Char(c),
            cevent::KeyCode::Esc => Self::Esc,
            _ => Self::Null,
        }
    }
}

/// A single keystroke.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Key {
    pub mods: Mods,
    pub code: KeyCode,
}

impl Key {
    pub fn new(code: KeyCode) -> Self {
        Self {
            mods: Mods::default(),
            code,
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }
}

impl From<cevent::KeyEvent> for Key {
    fn from(k: cevent::KeyEvent) -> Self {
        Self {
            mods: k.modifiers.into(),
            code: k.code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tkey_conversions() {
        assert_eq!(Key::from('c'), Key::new(KeyCode::Char('c')));
        assert_eq!(Key::from(KeyCode::Esc).code, KeyCode::Esc);
        assert_eq!(
            KeyCode::from(cevent::KeyCode::BackTab),
            KeyCode::BackTab
        );
        // Keys the engine has no use for collapse to Null.
        assert_eq!(KeyCode::from(cevent::KeyCode::F(5)), KeyCode::Null);
    }

    #[test]
    fn tmods() {
        let m = Mods::from(cevent::KeyModifiers::SHIFT | cevent::KeyModifiers::ALT);
        assert!(m.shift && m.alt && !m.ctrl);
    }
}
