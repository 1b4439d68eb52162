// SPDX-License-Identifier: MIT
//
// Host — the terminal side of the label subsystem.
//
// The terminal is split into side-by-side panes, each a display surface
// with a stable id. The host puts every pane into label mode at startup,
// routes input to the pane it belongs to, and composes the panes' label
// surfaces into the frame.
//
//   ┌────────┬────────┬────────┐
//   │ pane 0 │ pane 1 │ pane 2 │  ← full height, widths differ by ≤ 1
//   └────────┴────────┴────────┘
//
// Routing:
//
//   key / paste          → first pane still in label mode
//   mouse press / scroll → pane under the pointer
//   release, drag, focus → nobody (they follow a press that already ended
//                          its label, or are not input at all)
//
// A pane whose label ended shows the terminal's default background. With
// `respawn` it re-enters label mode at once, and q / Escape / Ctrl-C quit.

use bl_core::{LabelContext, LabelSubsystem, SurfaceId, Transition};
use bl_term::event_loop::{Action, App};
use bl_term::input::{Event, KeyCode, Modifiers, MouseEventKind};
use bl_term::surface::Surface;
use bl_term::terminal::Size;

/// Most panes the host will lay out.
pub const MAX_PANES: u16 = 16;

// ─── Panes ──────────────────────────────────────────────────────────────────

/// One column of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pane {
    id: SurfaceId,
    x: u16,
    width: u16,
}

impl Pane {
    const fn contains(&self, col: u16) -> bool {
        col >= self.x && col - self.x < self.width
    }
}

/// Split `cols` into `count` adjacent panes. Leftover columns go to the
/// leftmost panes, one each.
fn split(cols: u16, count: u16) -> Vec<Pane> {
    let count = count.clamp(1, MAX_PANES);
    let base = cols / count;
    let extra = cols % count;

    let mut x = 0;
    (0..count)
        .map(|i| {
            let width = base + u16::from(i < extra);
            let pane = Pane {
                id: SurfaceId(u32::from(i)),
                x,
                width,
            };
            x += width;
            pane
        })
        .collect()
}

// ─── Host ───────────────────────────────────────────────────────────────────

/// Label host for a split terminal.
pub struct Host {
    labels: LabelSubsystem,
    panes: Vec<Pane>,
    rows: u16,
    label: Option<String>,
    context: LabelContext,
    respawn: bool,
}

impl Host {
    /// A host with `pane_count` panes (clamped to 1..=16). Nothing is
    /// labeled until [`start`](Self::start).
    #[must_use]
    pub fn new(
        labels: LabelSubsystem,
        pane_count: u16,
        label: Option<String>,
        context: LabelContext,
        respawn: bool,
    ) -> Self {
        Self {
            labels,
            panes: split(0, pane_count),
            rows: 0,
            label,
            context,
            respawn,
        }
    }

    /// Lay out the panes for `size` and put each into label mode.
    pub fn start(&mut self, size: Size) {
        self.layout(size);
        let ids: Vec<SurfaceId> = self.panes.iter().map(|p| p.id).collect();
        for id in ids {
            self.spawn(id);
        }
    }

    /// The label subsystem.
    #[must_use]
    pub const fn labels(&self) -> &LabelSubsystem {
        &self.labels
    }

    fn layout(&mut self, size: Size) {
        // Pane count is at most MAX_PANES, so it fits u16.
        #[allow(clippy::cast_possible_truncation)]
        let count = self.panes.len() as u16;
        self.panes = split(size.cols, count);
        self.rows = size.rows;
    }

    fn pane(&self, id: SurfaceId) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == id)
    }

    fn pane_size(&self, id: SurfaceId) -> Size {
        self.pane(id)
            .map_or_else(Size::default, |p| Size::new(p.width, self.rows))
    }

    fn spawn(&mut self, id: SurfaceId) {
        let size = self.pane_size(id);
        self.labels
            .create(id, self.label.as_deref(), &self.context, size);
    }

    /// Which pane `event` is for, if any.
    fn target(&self, event: &Event) -> Option<SurfaceId> {
        match event {
            Event::Key(_) | Event::Paste(_) => self
                .panes
                .iter()
                .find(|p| self.labels.is_active(p.id))
                .map(|p| p.id),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Press(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                    self.panes.iter().find(|p| p.contains(mouse.x)).map(|p| p.id)
                }
                MouseEventKind::Release(_) | MouseEventKind::Drag(_) | MouseEventKind::Move => None,
            },
            Event::FocusGained | Event::FocusLost => None,
        }
    }
}

/// q, Escape, or Ctrl-C.
fn is_quit_key(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    match key.code {
        KeyCode::Escape => true,
        KeyCode::Char('q') => key.modifiers.is_empty(),
        KeyCode::Char('c') => key.modifiers == Modifiers::CTRL,
        _ => false,
    }
}

impl App for Host {
    fn on_event(&mut self, event: &Event) -> Action {
        if self.respawn && is_quit_key(event) {
            return Action::Quit;
        }

        if let Some(id) = self.target(event) {
            let ended = self.labels.on_input(id, event) == Transition::Exit;
            if ended && self.respawn {
                self.spawn(id);
            }
        }

        if self.labels.is_empty() {
            log::info!("no labels left");
            Action::Quit
        } else {
            Action::Continue
        }
    }

    fn on_resize(&mut self, size: Size) {
        self.layout(size);
        for pane in &self.panes {
            self.labels.resize(pane.id, Size::new(pane.width, self.rows));
        }
    }

    fn paint(&mut self, frame: &mut Surface) {
        for pane in &self.panes {
            if let Some(instance) = self.labels.instance(pane.id) {
                frame.blit(instance.surface(), pane.x, 0);
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
