// SPDX-License-Identifier: MIT
//
// bl-term — the terminal layer under big-label.
//
// Provides the primitives a label host needs: a character-cell `Surface`
// with a cursor-visibility flag, colors that can be pinned against the
// terminal's palette (`CellColor::Fixed`), an input parser, and a small
// single-threaded event loop that owns a raw-mode terminal.
//
// Like the rest of the workspace it talks to the terminal directly via
// ANSI escape sequences and termios. No TUI framework in between.

pub mod ansi;
pub mod cell;
pub mod color;
pub mod event_loop;
pub mod input;
pub mod render;
pub mod surface;
pub mod terminal;
