//! Label instance — one live label bound to one surface.
//!
//! An instance owns its surface outright. It is composed once at creation
//! and again after every resize; nothing else mutates it. Termination is
//! handled by [`LabelSubsystem`](crate::subsystem::LabelSubsystem), which
//! owns every instance and drops it on removal.

use std::fmt;

use bl_term::surface::Surface;
use bl_term::terminal::Size;

use crate::compose::{self, Layout, Style};
use crate::glyph;
use crate::palette::PaletteColor;

// ─── Identity & Context ──────────────────────────────────────────────────────

/// Stable identifier of a host display surface (a pane).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Names the host knows about the surface being labeled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelContext {
    /// Name of the session the surface belongs to.
    pub session_name: Option<String>,
    /// Name of the window the surface belongs to.
    pub window_name: Option<String>,
}

/// Pick the label text: the explicit argument if non-empty, else the
/// session name when there is a session, else the window name. An empty
/// pick becomes `fallback`, so a session with an empty name gives the
/// fallback rather than the window name. The result is uppercased.
#[must_use]
pub fn resolve_label(explicit: Option<&str>, context: &LabelContext, fallback: &str) -> String {
    let name = match (explicit.filter(|text| !text.is_empty()), &context.session_name) {
        (Some(text), _) => text,
        (None, Some(session)) => session.as_str(),
        (None, None) => context.window_name.as_deref().unwrap_or_default(),
    };
    let text = if name.is_empty() { fallback } else { name };
    text.to_ascii_uppercase()
}

// ─── Instance ────────────────────────────────────────────────────────────────

/// A live label: surface, text, and the color it was given.
pub struct LabelInstance {
    surface_id: SurfaceId,
    surface: Surface,
    label: String,
    color: PaletteColor,
    style: Style,
    layout: Layout,
}

impl LabelInstance {
    /// Allocate a `size` surface with the cursor hidden and compose `label`
    /// onto it. `label` is used as given.
    #[must_use]
    pub fn new(surface_id: SurfaceId, label: String, color: PaletteColor, light: u8, size: Size) -> Self {
        if let Some(ch) = label.chars().find(|&ch| !glyph::contains(ch)) {
            log::debug!("{surface_id}: no glyph for {ch:?}, block mode draws '?'");
        }

        let mut surface = Surface::new(size.cols, size.rows);
        surface.set_cursor_visible(false);

        let mut instance = Self {
            surface_id,
            surface,
            label,
            color,
            style: Style::fixed(color, light),
            layout: Layout::Blank,
        };
        instance.redraw();
        instance
    }

    /// The surface this label is bound to.
    #[inline]
    #[must_use]
    pub const fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    /// The composed surface.
    #[inline]
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The (uppercased) label text.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The assigned background color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> PaletteColor {
        self.color
    }

    /// The layout of the most recent composition.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Current surface size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.surface.width(), self.surface.height())
    }

    /// Resize the surface and recompose from scratch.
    pub fn resize(&mut self, size: Size) {
        log::trace!("{}: resize to {}x{}", self.surface_id, size.cols, size.rows);
        self.surface.resize(size.cols, size.rows);
        self.redraw();
    }

    /// Recompose at the current size.
    pub fn redraw(&mut self) {
        self.layout = compose::render(&mut self.surface, &self.label, self.style);
    }
}

impl fmt::Debug for LabelInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelInstance")
            .field("surface_id", &self.surface_id)
            .field("label", &self.label)
            .field("color", &self.color)
            .field("size", &self.surface)
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PASTELS;
    use pretty_assertions::assert_eq;

    fn context(session: &str, window: &str) -> LabelContext {
        LabelContext {
            session_name: Some(session.to_owned()),
            window_name: Some(window.to_owned()),
        }
    }

    #[test]
    fn explicit_label_wins() {
        assert_eq!(resolve_label(Some("hi"), &context("dev", "vim"), "TMUX"), "HI");
    }

    #[test]
    fn session_then_window_then_fallback() {
        assert_eq!(resolve_label(None, &context("dev", "vim"), "TMUX"), "DEV");
        assert_eq!(resolve_label(Some(""), &context("dev", "vim"), "TMUX"), "DEV");
        let no_session = LabelContext {
            session_name: None,
            window_name: Some("vim".into()),
        };
        assert_eq!(resolve_label(None, &no_session, "TMUX"), "VIM");
        assert_eq!(resolve_label(None, &LabelContext::default(), "tmux"), "TMUX");
    }

    #[test]
    fn empty_session_name_gives_fallback_not_window() {
        assert_eq!(resolve_label(None, &context("", "vim"), "TMUX"), "TMUX");
        assert_eq!(resolve_label(Some(""), &context("", "vim"), "TMUX"), "TMUX");
        let empty_window = LabelContext {
            session_name: None,
            window_name: Some(String::new()),
        };
        assert_eq!(resolve_label(None, &empty_window, "TMUX"), "TMUX");
    }

    #[test]
    fn new_instance_hides_cursor_and_composes() {
        let instance = LabelInstance::new(SurfaceId(3), "AB".into(), PASTELS[2], 15, Size::new(11, 7));
        assert!(!instance.surface().cursor_visible());
        assert_eq!(instance.layout(), Layout::Block { x: 0, y: 0 });
        assert_eq!(instance.size(), Size::new(11, 7));
        assert_eq!(instance.color(), PASTELS[2]);
        assert_eq!(instance.label(), "AB");
    }

    #[test]
    fn resize_recomposes() {
        let mut instance = LabelInstance::new(SurfaceId(0), "AB".into(), PASTELS[0], 15, Size::new(11, 7));
        instance.resize(Size::new(10, 7));
        assert_eq!(instance.layout(), Layout::Fallback { x: 4, y: 3 });
        assert!(!instance.surface().cursor_visible());
        instance.resize(Size::new(0, 0));
        assert_eq!(instance.layout(), Layout::Blank);
    }

    #[test]
    fn resize_to_same_size_is_identical() {
        let mut instance = LabelInstance::new(SurfaceId(0), "DEV".into(), PASTELS[5], 15, Size::new(40, 12));
        let before = instance.surface().clone();
        instance.resize(Size::new(40, 12));
        assert_eq!(instance.surface(), &before);
    }

    #[test]
    fn surface_id_display() {
        assert_eq!(SurfaceId(7).to_string(), "%7");
    }
}
