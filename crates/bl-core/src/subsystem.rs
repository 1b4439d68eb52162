//! Label subsystem — the lifecycle a host drives.
//!
//! One [`LabelSubsystem`] value holds everything that outlives a single
//! label:
//!
//! - the **active registry**: every live instance, in creation order, at
//!   most one per surface;
//! - the **color memory**: the last color each surface was given, kept
//!   after its label goes away;
//! - the **picker**: pick serial and clock.
//!
//! The host calls [`create`](LabelSubsystem::create) when a surface enters
//! label mode, [`resize`](LabelSubsystem::resize) when it changes size, and
//! [`on_input`](LabelSubsystem::on_input) for every event routed to it. Any
//! key, paste or mouse event ends the label and tells the host to return
//! to its default mode.

use std::collections::HashMap;

use bl_term::input::Event;
use bl_term::terminal::Size;

use crate::assign::ColorPicker;
use crate::instance::{self, LabelContext, LabelInstance, SurfaceId};
use crate::options::LabelOptions;
use crate::palette::{PASTELS, PaletteColor};

/// What the host should do with a surface after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stay in label mode.
    Stay,
    /// The label is gone; return the surface to its default mode.
    Exit,
}

/// Registry, color memory and picker for all labels of one host.
#[derive(Debug)]
pub struct LabelSubsystem {
    active: Vec<LabelInstance>,
    memory: HashMap<SurfaceId, PaletteColor>,
    picker: ColorPicker,
    options: LabelOptions,
}

impl LabelSubsystem {
    /// An empty subsystem reading the system clock.
    #[must_use]
    pub fn new(options: LabelOptions) -> Self {
        Self::with_picker(options, ColorPicker::new())
    }

    /// An empty subsystem using `picker` for color seeding.
    #[must_use]
    pub fn with_picker(options: LabelOptions, picker: ColorPicker) -> Self {
        Self {
            active: Vec::new(),
            memory: HashMap::new(),
            picker,
            options,
        }
    }

    // ─── Color Assignment ────────────────────────────────────────────────

    /// Choose a color for `surface_id`, avoiding live labels' colors and
    /// the color this surface had last. Does not record the result.
    pub fn pick_color(&mut self, surface_id: SurfaceId) -> PaletteColor {
        let used = self.active_colors();
        let last = self.remembered_color(surface_id);
        self.picker.pick(&PASTELS, surface_id.0, &used, last).color
    }

    /// Colors of every live label, in creation order.
    #[must_use]
    pub fn active_colors(&self) -> Vec<PaletteColor> {
        self.active.iter().map(LabelInstance::color).collect()
    }

    /// The color `surface_id` was given most recently, live or not.
    #[must_use]
    pub fn remembered_color(&self, surface_id: SurfaceId) -> Option<PaletteColor> {
        self.memory.get(&surface_id).copied()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Put `surface_id` into label mode at `size`.
    ///
    /// The label is `label` if non-empty, else a name from `context`, else
    /// the configured fallback. A label already live on this surface is
    /// terminated first.
    pub fn create(
        &mut self,
        surface_id: SurfaceId,
        label: Option<&str>,
        context: &LabelContext,
        size: Size,
    ) -> &LabelInstance {
        if self.take(surface_id).is_some() {
            log::info!("{surface_id}: replacing live label");
        }

        let text = instance::resolve_label(label, context, &self.options.fallback_label);
        let color = self.pick_color(surface_id);
        self.memory.insert(surface_id, color);

        log::info!(
            "{surface_id}: label {text:?} in {color} at {}x{} ({} live)",
            size.cols,
            size.rows,
            self.active.len() + 1,
        );
        let index = self.active.len();
        self.active.push(LabelInstance::new(
            surface_id,
            text,
            color,
            self.options.foreground,
            size,
        ));
        &self.active[index]
    }

    /// Resize the label on `surface_id`. Returns `false` if it has none.
    pub fn resize(&mut self, surface_id: SurfaceId, size: Size) -> bool {
        match self.instance_mut(surface_id) {
            Some(instance) => {
                instance.resize(size);
                true
            }
            None => false,
        }
    }

    /// Route an event to the label on `surface_id`.
    ///
    /// Keys, pastes and mouse events terminate the label. Focus changes
    /// are not input and leave it alone. A surface with no live label is
    /// already in its default mode, so it gets [`Transition::Exit`].
    pub fn on_input(&mut self, surface_id: SurfaceId, event: &Event) -> Transition {
        if !self.is_active(surface_id) {
            return Transition::Exit;
        }
        if !event.is_user_input() {
            return Transition::Stay;
        }
        self.free(surface_id);
        Transition::Exit
    }

    /// Terminate the label on `surface_id`, keeping its remembered color.
    /// Returns `false` if it had none.
    pub fn free(&mut self, surface_id: SurfaceId) -> bool {
        let Some(instance) = self.take(surface_id) else {
            return false;
        };
        log::info!(
            "{surface_id}: label {:?} terminated ({} live)",
            instance.label(),
            self.active.len(),
        );
        true
    }

    fn take(&mut self, surface_id: SurfaceId) -> Option<LabelInstance> {
        let index = self.active.iter().position(|i| i.surface_id() == surface_id)?;
        Some(self.active.remove(index))
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// The live label on `surface_id`.
    #[must_use]
    pub fn instance(&self, surface_id: SurfaceId) -> Option<&LabelInstance> {
        self.active.iter().find(|i| i.surface_id() == surface_id)
    }

    fn instance_mut(&mut self, surface_id: SurfaceId) -> Option<&mut LabelInstance> {
        self.active.iter_mut().find(|i| i.surface_id() == surface_id)
    }

    /// Every live label, in creation order.
    #[must_use]
    pub fn instances(&self) -> &[LabelInstance] {
        &self.active
    }

    /// Whether `surface_id` is in label mode.
    #[must_use]
    pub fn is_active(&self, surface_id: SurfaceId) -> bool {
        self.instance(surface_id).is_some()
    }

    /// Number of live labels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no label is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for LabelSubsystem {
    fn default() -> Self {
        Self::new(LabelOptions::default())
    }
}
