// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into structured events. Only the protocols the
// host enables in `terminal.rs` are understood:
//
// - Legacy CSI sequences (arrows, editing keys, F1–F12)
// - SS3 sequences (F1–F4 and arrows from some terminals)
// - SGR mouse protocol (press / release / drag / scroll)
// - Bracketed paste
// - Focus reporting
// - Alt+key (ESC followed by a printable character)
// - UTF-8 multi-byte characters
//
// Escape sequences may span several `read()` calls, so the parser keeps a
// small byte buffer. Feed bytes with [`Parser::advance`]; after a quiet
// period call [`Parser::flush`] to turn a pending lone ESC into a real
// Escape keypress and hand over a paste whose closing delimiter never came.
//
// Every complete key sequence yields a key event, named or not: a label
// host only needs to know that a key was pressed.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// A mouse action with position.
    Mouse(MouseEvent),
    /// Bracketed paste content.
    Paste(String),
    /// Terminal window gained focus (`CSI I`).
    FocusGained,
    /// Terminal window lost focus (`CSI O`).
    FocusLost,
}

impl Event {
    /// Whether this event came from the user's keyboard or pointer.
    ///
    /// Pastes count as keyboard input. Focus changes do not.
    #[inline]
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(self, Self::Key(_) | Self::Mouse(_) | Self::Paste(_))
    }
}

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A printable character (or the letter of a Ctrl chord).
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F12.
    F(u8),
    /// A complete CSI/SS3 key sequence with no name here (F13 and up,
    /// keypad keys in application mode).
    Unknown,
}

bitflags! {
    /// Keyboard modifier flags (xterm encoding: `param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

/// A mouse action, 0-indexed position, and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// 0-indexed column.
    pub x: u16,
    /// 0-indexed row.
    pub y: u16,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

/// Mouse event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    Drag(MouseButton),
    Move,
    ScrollUp,
    ScrollDown,
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Bracketed paste opening delimiter: `ESC [ 200 ~`
const PASTE_START: &[u8] = b"\x1b[200~";
/// Bracketed paste closing delimiter: `ESC [ 201 ~`
const PASTE_END: &[u8] = b"\x1b[201~";
/// Paste bytes held before a chunk is handed over without the closer.
const MAX_PASTE: usize = 64 * 1024;

/// Incremental terminal input parser.
///
/// ```
/// use bl_term::input::{Event, KeyCode, KeyEvent, Parser};
///
/// let mut parser = Parser::new();
/// let events = parser.advance(b"q\x1b[A");
/// assert_eq!(events, vec![
///     Event::Key(KeyEvent::plain(KeyCode::Char('q'))),
///     Event::Key(KeyEvent::plain(KeyCode::Up)),
/// ]);
/// ```
pub struct Parser {
    buf: Vec<u8>,
    in_paste: bool,
}

impl Parser {
    /// Create a parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
            in_paste: false,
        }
    }

    /// Feed raw bytes and return every event that can be parsed so far.
    ///
    /// Incomplete sequences stay buffered until more bytes arrive.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            let remaining = &self.buf[pos..];

            if self.in_paste {
                if let Some(end) = find_subsequence(remaining, PASTE_END) {
                    events.push(paste(&remaining[..end]));
                    pos += end + PASTE_END.len();
                    self.in_paste = false;
                    continue;
                }
                // Keep room for a closer split across reads.
                if remaining.len() < MAX_PASTE + PASTE_END.len() {
                    break;
                }
                let chunk = utf8_boundary(remaining, MAX_PASTE);
                events.push(paste(&remaining[..chunk]));
                pos += chunk;
                continue;
            }

            if remaining.starts_with(PASTE_START) {
                self.in_paste = true;
                pos += PASTE_START.len();
                continue;
            }
            // A partial paste opener: wait for the rest.
            if remaining.len() < PASTE_START.len()
                && remaining.len() > 2
                && PASTE_START.starts_with(remaining)
            {
                break;
            }

            match try_parse(remaining) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n.max(1),
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }
        events
    }

    /// Whether bytes are waiting for the rest of a sequence, or a paste
    /// is still open.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.in_paste || !self.buf.is_empty()
    }

    /// Turn pending bytes into literal key events (lone ESC → Escape). An
    /// open paste is delivered as it stands.
    pub fn flush(&mut self) -> Vec<Event> {
        let events = if self.in_paste {
            vec![paste(&self.buf)]
        } else {
            self.buf
                .iter()
                .filter_map(|&byte| match byte {
                    0x1B => Some(KeyEvent::plain(KeyCode::Escape)),
                    b @ (0x01..=0x1A | 0x1C..=0x1F) => Some(control_key(b)),
                    b @ 0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(b as char))),
                    _ => None,
                })
                .map(Event::Key)
                .collect()
        };
        self.buf.clear();
        self.in_paste = false;
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────

/// Result of trying to parse one event from the front of a buffer.
enum Parsed {
    /// An event, consuming `usize` bytes.
    Event(Event, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized input, skip `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&first) = buf.first() else {
        return Parsed::Skip(0);
    };

    match first {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Event(ctrl(KeyCode::Char('@')), 1),
        0x08 | 0x7F => Parsed::Event(key(KeyCode::Backspace), 1),
        0x09 => Parsed::Event(key(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Event(key(KeyCode::Enter), 1),
        b @ (0x01..=0x1A | 0x1C..=0x1F) => Parsed::Event(Event::Key(control_key(b)), 1),
        b @ 0x20..=0x7E => Parsed::Event(key(KeyCode::Char(b as char)), 1),
        0xC0..=0xFF => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => Parsed::Event(
            Event::Key(KeyEvent {
                code: KeyCode::Char(b as char),
                modifiers: Modifiers::ALT,
            }),
            2,
        ),
        _ => Parsed::Event(key(KeyCode::Escape), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    match buf[2] {
        b'<' => return parse_sgr_mouse(buf),
        b'I' => return Parsed::Event(Event::FocusGained, 3),
        b'O' => return Parsed::Event(Event::FocusLost, 3),
        _ => {}
    }

    // Parameter bytes are 0x20..=0x3F; the final byte is 0x40..=0x7E.
    let mut end = 2;
    while end < buf.len() && !(0x40..=0x7E).contains(&buf[end]) {
        if !(0x20..=0x3F).contains(&buf[end]) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match (buf[end], params.first().copied().unwrap_or(0)) {
        (b'~', 1 | 7) | (b'H', _) => KeyCode::Home,
        (b'~', 2) => KeyCode::Insert,
        (b'~', 3) => KeyCode::Delete,
        (b'~', 4 | 8) | (b'F', _) => KeyCode::End,
        (b'~', 5) => KeyCode::PageUp,
        (b'~', 6) => KeyCode::PageDown,
        (b'~', n @ 11..=15) => KeyCode::F((n - 10) as u8),
        (b'~', n @ 17..=21) => KeyCode::F((n - 11) as u8),
        (b'~', n @ 23..=24) => KeyCode::F((n - 12) as u8),
        // A paste closer with no opener, left over from a flushed paste.
        (b'~', 200 | 201) => return Parsed::Skip(consumed),
        (b'A', _) => KeyCode::Up,
        (b'B', _) => KeyCode::Down,
        (b'C', _) => KeyCode::Right,
        (b'D', _) => KeyCode::Left,
        (b'P', _) => KeyCode::F(1),
        (b'Q', _) => KeyCode::F(2),
        (b'R', _) => KeyCode::F(3),
        (b'S', _) => KeyCode::F(4),
        (b'Z', _) => {
            return Parsed::Event(
                Event::Key(KeyEvent {
                    code: KeyCode::Tab,
                    modifiers: Modifiers::SHIFT,
                }),
                consumed,
            );
        }
        _ => KeyCode::Unknown,
    };

    Parsed::Event(Event::Key(KeyEvent { code, modifiers }), consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        0x40..=0x7E => KeyCode::Unknown,
        // Not SS3 after all: Alt+O, then whatever follows.
        _ => {
            return Parsed::Event(
                Event::Key(KeyEvent {
                    code: KeyCode::Char('O'),
                    modifiers: Modifiers::ALT,
                }),
                2,
            );
        }
    };
    Parsed::Event(key(code), 3)
}

// ── SGR Mouse Protocol ─────────────────────────────────────────────────────

fn parse_sgr_mouse(buf: &[u8]) -> Parsed {
    // ESC [ < Pb ; Px ; Py M   (press / motion)
    // ESC [ < Pb ; Px ; Py m   (release)
    let start = 3;
    let mut end = start;
    while end < buf.len() && buf[end] != b'M' && buf[end] != b'm' {
        if !buf[end].is_ascii_digit() && buf[end] != b';' {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let is_release = buf[end] == b'm';
    let params = parse_params(&buf[start..end]);
    let cb = params.first().copied().unwrap_or(0);
    // SGR coordinates are 1-indexed.
    let x = params.get(1).copied().unwrap_or(1).saturating_sub(1);
    let y = params.get(2).copied().unwrap_or(1).saturating_sub(1);

    let mut modifiers = Modifiers::empty();
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    let base = cb & 3;
    let kind = if cb & 64 != 0 {
        if base == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else if cb & 32 != 0 {
        match base {
            0 => MouseEventKind::Drag(MouseButton::Left),
            1 => MouseEventKind::Drag(MouseButton::Middle),
            2 => MouseEventKind::Drag(MouseButton::Right),
            _ => MouseEventKind::Move,
        }
    } else if is_release {
        MouseEventKind::Release(decode_mouse_button(base))
    } else {
        MouseEventKind::Press(decode_mouse_button(base))
    };

    Parsed::Event(Event::Mouse(MouseEvent { kind, x, y, modifiers }), end + 1)
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| Parsed::Event(key(KeyCode::Char(ch)), expected))
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::plain(code))
}

/// Ctrl chord for a C0 byte: 0x01 → Ctrl-a, 0x1C → Ctrl-\, 0x1F → Ctrl-_.
fn control_key(byte: u8) -> KeyEvent {
    let ch = if byte <= 0x1A { byte + b'a' - 1 } else { byte + 0x40 };
    KeyEvent {
        code: KeyCode::Char(char::from(ch)),
        modifiers: Modifiers::CTRL,
    }
}

const fn ctrl(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::CTRL,
    })
}

/// xterm encodes modifiers as `1 + bitmask`.
fn decode_modifiers(param: u16) -> Modifiers {
    let bits = u8::try_from(param.saturating_sub(1)).unwrap_or(0);
    Modifiers::from_bits_truncate(bits)
}

const fn decode_mouse_button(base: u16) -> MouseButton {
    match base {
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Left,
    }
}

/// Parse `;`-separated decimal parameters. Empty fields read as 0,
/// overlong values saturate.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| acc.saturating_mul(10).saturating_add(u16::from(b - b'0')))
        })
        .collect()
}

fn paste(bytes: &[u8]) -> Event {
    Event::Paste(String::from_utf8_lossy(bytes).into_owned())
}

/// Largest `n <= limit` that does not cut a UTF-8 sequence in `bytes`.
fn utf8_boundary(bytes: &[u8], limit: usize) -> usize {
    let mut n = limit.min(bytes.len());
    // At most three continuation bytes precede a cut.
    for _ in 0..3 {
        if n == 0 || n == bytes.len() || bytes[n] & 0xC0 != 0x80 {
            break;
        }
        n -= 1;
    }
    n
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(bytes: &[u8]) -> Vec<Event> {
        Parser::new().advance(bytes)
    }

    fn k(code: KeyCode) -> Event {
        Event::Key(KeyEvent::plain(code))
    }

    #[test]
    fn printable_ascii() {
        assert_eq!(parse(b"ab"), vec![k(KeyCode::Char('a')), k(KeyCode::Char('b'))]);
    }

    #[test]
    fn control_keys() {
        assert_eq!(parse(b"\r"), vec![k(KeyCode::Enter)]);
        assert_eq!(parse(b"\t"), vec![k(KeyCode::Tab)]);
        assert_eq!(parse(b"\x7f"), vec![k(KeyCode::Backspace)]);
        assert_eq!(
            parse(b"\x03"),
            vec![Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: Modifiers::CTRL,
            })]
        );
    }

    #[test]
    fn upper_control_bytes_are_ctrl_chords() {
        let ctrl = |ch| {
            Event::Key(KeyEvent {
                code: KeyCode::Char(ch),
                modifiers: Modifiers::CTRL,
            })
        };
        assert_eq!(
            parse(b"\x1c\x1d\x1e\x1f"),
            vec![ctrl('\\'), ctrl(']'), ctrl('^'), ctrl('_')]
        );

        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        p.buf.push(0x1c);
        assert_eq!(p.flush(), vec![k(KeyCode::Escape), ctrl('\\')]);
    }

    #[test]
    fn unnamed_key_sequences_still_produce_keys() {
        assert_eq!(parse(b"\x1b[25~"), vec![k(KeyCode::Unknown)]);
        assert_eq!(parse(b"\x1b[E"), vec![k(KeyCode::Unknown)]);
        assert_eq!(parse(b"\x1bOE"), vec![k(KeyCode::Unknown)]);
        assert_eq!(
            parse(b"\x1b[1;3E"),
            vec![Event::Key(KeyEvent {
                code: KeyCode::Unknown,
                modifiers: Modifiers::ALT,
            })]
        );
    }

    #[test]
    fn alt_o_is_not_swallowed_as_ss3() {
        assert_eq!(
            parse(b"\x1bO\x1b[A"),
            vec![
                Event::Key(KeyEvent {
                    code: KeyCode::Char('O'),
                    modifiers: Modifiers::ALT,
                }),
                k(KeyCode::Up),
            ]
        );
    }

    #[test]
    fn utf8_character() {
        assert_eq!(parse("é".as_bytes()), vec![k(KeyCode::Char('é'))]);
    }

    #[test]
    fn arrows_and_modifiers() {
        assert_eq!(parse(b"\x1b[A"), vec![k(KeyCode::Up)]);
        assert_eq!(
            parse(b"\x1b[1;5C"),
            vec![Event::Key(KeyEvent {
                code: KeyCode::Right,
                modifiers: Modifiers::CTRL,
            })]
        );
        assert_eq!(parse(b"\x1bOB"), vec![k(KeyCode::Down)]);
    }

    #[test]
    fn tilde_keys() {
        assert_eq!(parse(b"\x1b[3~"), vec![k(KeyCode::Delete)]);
        assert_eq!(parse(b"\x1b[6~"), vec![k(KeyCode::PageDown)]);
        assert_eq!(parse(b"\x1b[15~"), vec![k(KeyCode::F(5))]);
        assert_eq!(parse(b"\x1b[24~"), vec![k(KeyCode::F(12))]);
    }

    #[test]
    fn alt_key() {
        assert_eq!(
            parse(b"\x1bx"),
            vec![Event::Key(KeyEvent {
                code: KeyCode::Char('x'),
                modifiers: Modifiers::ALT,
            })]
        );
    }

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.has_pending());
        assert_eq!(p.flush(), vec![k(KeyCode::Escape)]);
        assert!(!p.has_pending());
    }

    #[test]
    fn split_sequence_resumes() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[").is_empty());
        assert_eq!(p.advance(b"B"), vec![k(KeyCode::Down)]);
    }

    #[test]
    fn sgr_mouse_press_and_release() {
        assert_eq!(
            parse(b"\x1b[<0;10;5M"),
            vec![Event::Mouse(MouseEvent {
                kind: MouseEventKind::Press(MouseButton::Left),
                x: 9,
                y: 4,
                modifiers: Modifiers::empty(),
            })]
        );
        assert_eq!(
            parse(b"\x1b[<2;1;1m"),
            vec![Event::Mouse(MouseEvent {
                kind: MouseEventKind::Release(MouseButton::Right),
                x: 0,
                y: 0,
                modifiers: Modifiers::empty(),
            })]
        );
    }

    #[test]
    fn sgr_mouse_scroll() {
        let events = parse(b"\x1b[<65;3;3M");
        assert!(matches!(
            events[0],
            Event::Mouse(MouseEvent { kind: MouseEventKind::ScrollDown, .. })
        ));
    }

    #[test]
    fn bracketed_paste_across_reads() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~hel").is_empty());
        assert_eq!(p.advance(b"lo\x1b[201~"), vec![Event::Paste("hello".into())]);
    }

    #[test]
    fn open_paste_is_pending_and_flushes_as_paste() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~").is_empty());
        assert!(p.has_pending());
        assert!(p.advance(b"partial").is_empty());
        assert_eq!(p.flush(), vec![Event::Paste("partial".into())]);
        assert!(!p.has_pending());

        // The late closer is dropped, not turned into a key.
        assert_eq!(p.advance(b"\x1b[201~x"), vec![k(KeyCode::Char('x'))]);
    }

    #[test]
    fn long_paste_is_delivered_in_bounded_chunks() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~").is_empty());

        let body = vec![b'a'; MAX_PASTE + 100];
        let events = p.advance(&body);
        assert_eq!(events, vec![Event::Paste("a".repeat(MAX_PASTE))]);
        assert!(p.buf.len() < MAX_PASTE);

        assert_eq!(p.advance(PASTE_END), vec![Event::Paste("a".repeat(100))]);
        assert!(!p.has_pending());
    }

    #[test]
    fn paste_chunks_keep_characters_whole() {
        // 'é' is two bytes; put one across the cut.
        let mut body = vec![b'a'; MAX_PASTE - 1];
        body.extend_from_slice("é".as_bytes());
        assert_eq!(utf8_boundary(&body, MAX_PASTE), MAX_PASTE - 1);
        assert_eq!(utf8_boundary(b"abc", MAX_PASTE), 3);
    }

    #[test]
    fn focus_events() {
        assert_eq!(parse(b"\x1b[I"), vec![Event::FocusGained]);
        assert_eq!(parse(b"\x1b[O"), vec![Event::FocusLost]);
    }

    #[test]
    fn user_input_classification() {
        assert!(k(KeyCode::Char('a')).is_user_input());
        assert!(Event::Paste(String::new()).is_user_input());
        assert!(parse(b"\x1b[<0;1;1M")[0].is_user_input());
        assert!(!Event::FocusGained.is_user_input());
        assert!(!Event::FocusLost.is_user_input());
    }

    #[test]
    fn params_saturate() {
        assert_eq!(parse_params(b"1;;99999999"), vec![1, 0, u16::MAX]);
        assert!(parse_params(b"").is_empty());
    }
}
