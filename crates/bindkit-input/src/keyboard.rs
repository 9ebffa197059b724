//! Key identifiers for physical keyboard keys.

use std::borrow::Cow;

use winit::keyboard::KeyCode;

/// Key identifier used for bindings of a physical key.
///
/// Letters and digits map to themselves (`"a"`, `"7"`), keypad keys get a
/// `kp` prefix and modifiers an `l`/`r` side prefix. Codes without a short
/// name fall back to their lowercased variant name.
#[must_use]
pub fn key_name(code: KeyCode) -> Cow<'static, str> {
    let name = match code {
        KeyCode::KeyA => "a",
        KeyCode::KeyB => "b",
        KeyCode::KeyC => "c",
        KeyCode::KeyD => "d",
        KeyCode::KeyE => "e",
        KeyCode::KeyF => "f",
        KeyCode::KeyG => "g",
        KeyCode::KeyH => "h",
        KeyCode::KeyI => "i",
        KeyCode::KeyJ => "j",
        KeyCode::KeyK => "k",
        KeyCode::KeyL => "l",
        KeyCode::KeyM => "m",
        KeyCode::KeyN => "n",
        KeyCode::KeyO => "o",
        KeyCode::KeyP => "p",
        KeyCode::KeyQ => "q",
        KeyCode::KeyR => "r",
        KeyCode::KeyS => "s",
        KeyCode::KeyT => "t",
        KeyCode::KeyU => "u",
        KeyCode::KeyV => "v",
        KeyCode::KeyW => "w",
        KeyCode::KeyX => "x",
        KeyCode::KeyY => "y",
        KeyCode::KeyZ => "z",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::Numpad0 => "kp0",
        KeyCode::Numpad1 => "kp1",
        KeyCode::Numpad2 => "kp2",
        KeyCode::Numpad3 => "kp3",
        KeyCode::Numpad4 => "kp4",
        KeyCode::Numpad5 => "kp5",
        KeyCode::Numpad6 => "kp6",
        KeyCode::Numpad7 => "kp7",
        KeyCode::Numpad8 => "kp8",
        KeyCode::Numpad9 => "kp9",
        KeyCode::NumpadAdd => "kp+",
        KeyCode::NumpadSubtract => "kp-",
        KeyCode::NumpadMultiply => "kp*",
        KeyCode::NumpadDivide => "kp/",
        KeyCode::NumpadDecimal => "kp.",
        KeyCode::NumpadEnter => "kpenter",
        KeyCode::F1 => "f1",
        KeyCode::F2 => "f2",
        KeyCode::F3 => "f3",
        KeyCode::F4 => "f4",
        KeyCode::F5 => "f5",
        KeyCode::F6 => "f6",
        KeyCode::F7 => "f7",
        KeyCode::F8 => "f8",
        KeyCode::F9 => "f9",
        KeyCode::F10 => "f10",
        KeyCode::F11 => "f11",
        KeyCode::F12 => "f12",
        KeyCode::Space => "space",
        KeyCode::Enter => "return",
        KeyCode::Escape => "escape",
        KeyCode::Tab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Insert => "insert",
        KeyCode::Delete => "delete",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::ArrowUp => "up",
        KeyCode::ArrowDown => "down",
        KeyCode::ArrowLeft => "left",
        KeyCode::ArrowRight => "right",
        KeyCode::ShiftLeft => "lshift",
        KeyCode::ShiftRight => "rshift",
        KeyCode::ControlLeft => "lctrl",
        KeyCode::ControlRight => "rctrl",
        KeyCode::AltLeft => "lalt",
        KeyCode::AltRight => "ralt",
        KeyCode::SuperLeft => "lgui",
        KeyCode::SuperRight => "rgui",
        KeyCode::CapsLock => "capslock",
        KeyCode::Minus => "-",
        KeyCode::Equal => "=",
        KeyCode::BracketLeft => "[",
        KeyCode::BracketRight => "]",
        KeyCode::Backslash => "\\",
        KeyCode::Semicolon => ";",
        KeyCode::Quote => "'",
        KeyCode::Backquote => "`",
        KeyCode::Comma => ",",
        KeyCode::Period => ".",
        KeyCode::Slash => "/",
        other => return Cow::Owned(format!("{other:?}").to_lowercase()),
    };
    Cow::Borrowed(name)
}
