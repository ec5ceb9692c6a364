//! The GUI instance.
//!
//! A [`Gui`] owns every control, the pick allocator, the renderer, the
//! router state and the tooltip timers. All mutation happens through it, on
//! one thread, inside the host's frame tick.
//!
//! Methods here return [`GuiResult`]. The fluent [`ControlMut`] handle wraps
//! them and turns errors into logged no-ops.

use std::sync::Arc;

use prism_core::{Orientation, PickAllocator, PickKey, Rect, Rgba, Surface};

use crate::action::{ActionEvent, ActionValue};
use crate::config::GuiConfig;
use crate::control::{
    layout_tabs, place_tooltip, Align, Axis, Behavior, Capability, Checkbox, Control, ControlFlags,
    ControlId, ControlKind, IconFace, OptionButton, Pane, PaneTab, Panel, Ranger, Scroller, Side,
    Slider, TextFace, TextField, Ticks, TooltipState, Validator, Viewer,
};
use crate::error::{GuiError, GuiResult};
use crate::face::{BlockGlyphs, GlyphSource};
use crate::handle::ControlMut;
use crate::input::RawEvent;
use crate::render::{FrameStats, Renderer, Resources};
use crate::router::RouterState;
use crate::scheme::{Scheme, SchemeId, SchemeTable};
use crate::timer::{TimerAction, TimerQueue};
use crate::tree::ControlTree;

/// A canvas GUI.
pub struct Gui {
    config: GuiConfig,
    schemes: SchemeTable,
    default_scheme: SchemeId,
    glyphs: Box<dyn GlyphSource>,
    pub(crate) tree: ControlTree,
    keys: PickAllocator<ControlId>,
    pub(crate) renderer: Renderer,
    pub(crate) router: RouterState,
    pub(crate) timers: TimerQueue,
    pub(crate) now_ms: u64,
}

impl std::fmt::Debug for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gui")
            .field("controls", &self.tree.len())
            .field("frame", &self.renderer.frame_count())
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

fn check_finite(operation: &'static str, values: &[f32]) -> GuiResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GuiError::invalid(operation, format!("non-finite value in {values:?}")))
    }
}

fn check_size(operation: &'static str, w: f32, h: f32) -> GuiResult<()> {
    check_finite(operation, &[w, h])?;
    if w < 0.0 || h < 0.0 {
        return Err(GuiError::invalid(operation, format!("negative size {w}×{h}")));
    }
    Ok(())
}

impl Gui {
    /// Creates a GUI from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Config`] if the configuration is invalid.
    pub fn new(config: GuiConfig) -> GuiResult<Self> {
        config.validate()?;
        let schemes = config.schemes()?;
        let default_scheme = schemes
            .find(&config.scheme.default)
            .ok_or_else(|| GuiError::Config(format!("unknown default scheme {:?}", config.scheme.default)))?;
        let background = config.background()?;
        tracing::debug!(
            width = config.canvas.width,
            height = config.canvas.height,
            scheme = %config.scheme.default,
            "gui created"
        );
        Ok(Self::assemble(config, schemes, default_scheme, background))
    }

    /// Creates a GUI with default settings and the given canvas size.
    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        let config = GuiConfig::with_canvas(width.max(1), height.max(1));
        Self::assemble(config, SchemeTable::new(), Scheme::Blue.id(), Rgba::TRANSPARENT)
    }

    fn assemble(config: GuiConfig, schemes: SchemeTable, default_scheme: SchemeId, background: Rgba) -> Self {
        let renderer = Renderer::new(config.canvas.width, config.canvas.height, background);
        Self {
            config,
            schemes,
            default_scheme,
            glyphs: Box::new(BlockGlyphs),
            tree: ControlTree::new(),
            keys: PickAllocator::new(),
            renderer,
            router: RouterState::default(),
            timers: TimerQueue::new(),
            now_ms: 0,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Palettes available to controls.
    #[must_use]
    pub fn schemes(&self) -> &SchemeTable {
        &self.schemes
    }

    /// The control registry.
    #[must_use]
    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    /// Canvas size in pixels.
    #[must_use]
    pub fn canvas_size(&self) -> (f32, f32) {
        let b = self.renderer.bounds();
        (b.width, b.height)
    }

    /// Host time of the last [`Gui::advance`] or [`Gui::draw`].
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Finds a control by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ControlId> {
        self.tree.find(name)
    }

    /// Gets a control.
    #[must_use]
    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.tree.get(id)
    }

    /// Gets a control by name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Control> {
        self.find(name).and_then(|id| self.tree.get(id))
    }

    /// Returns true if the control is live.
    #[must_use]
    pub fn contains(&self, id: ControlId) -> bool {
        self.tree.contains(id)
    }

    /// Number of live controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if there are no controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Fluent handle for a control. Operations on a dead id log and do nothing.
    pub fn control(&mut self, id: ControlId) -> ControlMut<'_> {
        ControlMut::new(self, id)
    }

    /// Fluent handle for a control by name.
    pub fn control_named(&mut self, name: &str) -> Option<ControlMut<'_>> {
        let id = self.find(name)?;
        Some(ControlMut::new(self, id))
    }

    /// Owner of a pick key, if it is live.
    #[must_use]
    pub fn key_owner(&self, key: PickKey) -> Option<ControlId> {
        self.keys.owner(key)
    }

    /// Number of live pick keys.
    #[must_use]
    pub fn live_keys(&self) -> usize {
        self.keys.live()
    }

    /// Current value of a value-bearing control.
    #[must_use]
    pub fn value(&self, id: ControlId) -> Option<ActionValue> {
        self.tree.get(id).and_then(|c| c.behavior.value())
    }

    /// Canvas position of a control's footprint.
    #[must_use]
    pub fn absolute_origin(&self, id: ControlId) -> Option<(f32, f32)> {
        self.tree.origin(id)
    }

    pub(crate) fn control_ref(&self, id: ControlId) -> GuiResult<&Control> {
        self.tree.get(id).ok_or(GuiError::NoSuchControl(id))
    }

    pub(crate) fn control_mut_ref(&mut self, id: ControlId) -> GuiResult<&mut Control> {
        self.tree.get_mut(id).ok_or(GuiError::NoSuchControl(id))
    }

    fn require(&mut self, id: ControlId, capability: Capability) -> GuiResult<&mut Control> {
        let control = self.control_mut_ref(id)?;
        if control.capabilities().has(capability) {
            Ok(control)
        } else {
            Err(GuiError::Unsupported { control: id, capability })
        }
    }

    /// Marks a control's buffers and the scene stale.
    pub(crate) fn touch(&mut self, id: ControlId) {
        if let Some(c) = self.tree.get_mut(id) {
            c.mark_dirty();
            self.renderer.invalidate_scene();
        }
    }

    fn touch_all(&mut self) {
        for c in self.tree.iter_mut() {
            c.mark_dirty();
        }
        self.renderer.invalidate_scene();
    }

    // ------------------------------------------------------------------
    // Construction and destruction
    // ------------------------------------------------------------------

    /// Creates a top-level control of `kind`.
    ///
    /// Panes, tabs and tooltips have their own constructors
    /// ([`Gui::create_pane`], [`Gui::add_tab`], [`Gui::set_tooltip`]).
    ///
    /// # Errors
    ///
    /// Fails on a duplicate or empty name, a non-finite or negative size, or
    /// when the pick key space is exhausted.
    pub fn create(&mut self, kind: ControlKind, name: &str, x: f32, y: f32, w: f32, h: f32) -> GuiResult<ControlId> {
        let behavior = match kind {
            ControlKind::Button => Behavior::Button,
            ControlKind::Label => Behavior::Label,
            ControlKind::Checkbox => Behavior::Checkbox(Checkbox::default()),
            ControlKind::OptionButton => Behavior::OptionButton(OptionButton::default()),
            ControlKind::Slider => Behavior::Slider(Slider::default()),
            ControlKind::Ranger => Behavior::Ranger(Ranger::default()),
            ControlKind::Scroller => Behavior::Scroller(Scroller::default()),
            ControlKind::TextField => Behavior::TextField(TextField::default()),
            ControlKind::Panel => Behavior::Panel(Panel::default()),
            ControlKind::Viewer => Behavior::Viewer(Viewer::default()),
            ControlKind::Pane | ControlKind::PaneTab | ControlKind::Tooltip => {
                return Err(GuiError::invalid(
                    "create",
                    format!("{} controls have a dedicated constructor", kind.name()),
                ))
            }
        };
        let id = self.insert(name, Rect::new(x, y, w, h), behavior)?;
        if kind == ControlKind::TextField {
            if let Some(c) = self.tree.get_mut(id) {
                c.text = Some(TextFace { text: String::new(), align: Align::Left });
            }
        }
        Ok(id)
    }

    /// Creates a control directly inside `parent`.
    ///
    /// # Errors
    ///
    /// As [`Gui::create`], plus the errors of [`Gui::add_child`].
    #[allow(clippy::too_many_arguments)]
    pub fn create_in(
        &mut self,
        parent: ControlId,
        kind: ControlKind,
        name: &str,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> GuiResult<ControlId> {
        let id = self.create(kind, name, x, y, w, h)?;
        if let Err(err) = self.add_child(parent, id) {
            self.destroy(id);
            return Err(err);
        }
        Ok(id)
    }

    fn insert(&mut self, name: &str, rect: Rect, behavior: Behavior) -> GuiResult<ControlId> {
        if name.is_empty() {
            return Err(GuiError::invalid("create", "name must not be empty"));
        }
        check_finite("create", &[rect.x, rect.y])?;
        check_size("create", rect.width, rect.height)?;
        if self.tree.has_name(name) {
            return Err(GuiError::DuplicateName(name.to_string()));
        }
        let id = self.tree.next_id();
        let key = self.keys.allocate(id)?;
        let kind = behavior.kind();
        if let Err(err) = self.tree.insert_root(Control::new(id, name.to_string(), rect, key, behavior)) {
            self.keys.release(key);
            return Err(err);
        }
        self.renderer.invalidate_scene();
        tracing::debug!(?id, name, kind = kind.name(), serial = key.serial(), "control created");
        Ok(id)
    }

    /// Destroys a control and its subtree: releases pick keys, attached
    /// tooltips and pending timers. Returns false if the id was not live, so
    /// repeated calls are harmless.
    pub fn destroy(&mut self, id: ControlId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.drop_interaction(id, false);
        let removed = self.tree.remove(id);
        let mut tooltips = Vec::new();
        let mut owners = Vec::new();
        for c in &removed {
            self.keys.release(c.key);
            self.timers.cancel(c.id);
            tooltips.extend(c.tooltip);
            if let Behavior::Tooltip(tip) = &c.behavior {
                owners.push(tip.owner);
            }
        }
        tracing::debug!(?id, count = removed.len(), "controls destroyed");
        drop(removed);

        for owner in owners {
            if let Some(c) = self.tree.get_mut(owner) {
                c.tooltip = None;
            }
        }
        for tip in tooltips {
            self.destroy(tip);
        }
        let orphan_tabs: Vec<ControlId> = self
            .tree
            .iter()
            .filter(|c| matches!(&c.behavior, Behavior::PaneTab(t) if !self.tree.contains(t.pane)))
            .map(Control::id)
            .collect();
        for tab in orphan_tabs {
            self.destroy(tab);
        }
        for side in Side::ALL {
            self.relayout_tabs(side);
        }
        self.renderer.invalidate_scene();
        true
    }

    // ------------------------------------------------------------------
    // Base contract
    // ------------------------------------------------------------------

    /// Shows a control.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn show(&mut self, id: ControlId) -> GuiResult<()> {
        self.set_visible(id, true)
    }

    /// Hides a control. Hiding releases any pointer capture, hover or focus
    /// held by it or its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn hide(&mut self, id: ControlId) -> GuiResult<()> {
        self.set_visible(id, false)
    }

    /// Shows or hides a control. A pane is opened or closed instead.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) -> GuiResult<()> {
        if self.control_ref(id)?.kind() == ControlKind::Pane {
            return self.open_pane(id, visible);
        }
        self.apply_visible(id, visible);
        Ok(())
    }

    fn apply_visible(&mut self, id: ControlId, visible: bool) {
        let Some(c) = self.tree.get_mut(id) else {
            return;
        };
        if !c.flags.assign(ControlFlags::VISIBLE, visible) {
            return;
        }
        c.mark_dirty();
        self.renderer.invalidate_scene();
        if !visible {
            self.drop_interaction(id, true);
        }
        tracing::trace!(?id, visible, "visibility changed");
    }

    /// Enables a control.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn enable(&mut self, id: ControlId) -> GuiResult<()> {
        self.set_enabled(id, true)
    }

    /// Disables a control. It stays visible, drawn dimmed, and stops taking input.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn disable(&mut self, id: ControlId) -> GuiResult<()> {
        self.set_enabled(id, false)
    }

    /// Enables or disables a control.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) -> GuiResult<()> {
        let c = self.control_mut_ref(id)?;
        if c.flags.assign(ControlFlags::ENABLED, enabled) {
            c.mark_dirty();
            self.renderer.invalidate_scene();
            if !enabled {
                self.drop_interaction(id, true);
            }
        }
        Ok(())
    }

    /// Moves a control within its parent.
    ///
    /// # Errors
    ///
    /// Fails for a dead id or non-finite coordinates.
    pub fn move_to(&mut self, id: ControlId, x: f32, y: f32) -> GuiResult<()> {
        check_finite("move", &[x, y])?;
        let c = self.control_mut_ref(id)?;
        c.rect.x = x;
        c.rect.y = y;
        self.touch(id);
        Ok(())
    }

    /// Resizes a control's local frame.
    ///
    /// # Errors
    ///
    /// Fails for a dead id or a non-finite or negative size.
    pub fn resize(&mut self, id: ControlId, w: f32, h: f32) -> GuiResult<()> {
        check_size("resize", w, h)?;
        let c = self.control_mut_ref(id)?;
        c.rect.width = w;
        c.rect.height = h;
        let viewer = matches!(c.behavior, Behavior::Viewer(_));
        self.touch(id);
        if viewer {
            self.reclamp_viewer(id);
        }
        Ok(())
    }

    /// Changes a control's orientation.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds that cannot be re-oriented.
    pub fn orient(&mut self, id: ControlId, orientation: Orientation) -> GuiResult<()> {
        let c = self.require(id, Capability::Orient)?;
        if c.orientation != orientation {
            c.orientation = orientation;
            self.touch(id);
        }
        Ok(())
    }

    /// Registers the control's action callback, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn set_action<F>(&mut self, id: ControlId, handler: F) -> GuiResult<()>
    where
        F: FnMut(&ActionEvent) + Send + 'static,
    {
        self.control_mut_ref(id)?.action = Some(Box::new(handler));
        Ok(())
    }

    /// Removes the control's action callback.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn clear_action(&mut self, id: ControlId) -> GuiResult<()> {
        self.control_mut_ref(id)?.action = None;
        Ok(())
    }

    /// Forces a rebuild of the control's buffers on the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn invalidate(&mut self, id: ControlId) -> GuiResult<()> {
        self.control_ref(id)?;
        self.touch(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Moves `child` into `parent` (on top of its children).
    ///
    /// # Errors
    ///
    /// Fails if either id is dead, `parent` is not a container, or the move
    /// would create a cycle.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> GuiResult<()> {
        self.tree.attach(parent, child)?;
        self.touch(child);
        Ok(())
    }

    /// Takes `child` out of `parent`, making it top-level.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidParent`] if `child` is not in `parent`.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> GuiResult<()> {
        if self.control_ref(child)?.parent != Some(parent) {
            return Err(GuiError::InvalidParent { parent, child });
        }
        self.tree.detach(child)?;
        self.touch(child);
        Ok(())
    }

    /// Draws the control above its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn to_front(&mut self, id: ControlId) -> GuiResult<()> {
        self.control_ref(id)?;
        if self.tree.raise(id) {
            self.renderer.invalidate_scene();
        }
        Ok(())
    }

    /// Draws the control below its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn to_back(&mut self, id: ControlId) -> GuiResult<()> {
        self.control_ref(id)?;
        if self.tree.lower(id) {
            self.renderer.invalidate_scene();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Appearance
    // ------------------------------------------------------------------

    /// Sets a control's text. Tabs and tooltips resize to fit.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds without text.
    pub fn set_text(&mut self, id: ControlId, text: &str) -> GuiResult<()> {
        let c = self.require(id, Capability::Text)?;
        if let Behavior::TextField(field) = &mut c.behavior {
            field.set_text(text);
        } else {
            let align = c.text_align().unwrap_or_default();
            c.text = Some(TextFace { text: text.to_string(), align });
        }
        let kind = c.kind();
        self.touch(id);
        match kind {
            ControlKind::PaneTab => {
                self.fit_to_text(id);
                if let Some(side) = self.tab_side(id) {
                    self.relayout_tabs(side);
                }
            }
            ControlKind::Tooltip => self.fit_to_text(id),
            _ => {}
        }
        Ok(())
    }

    /// Sets text alignment.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds without text.
    pub fn set_align(&mut self, id: ControlId, align: Align) -> GuiResult<()> {
        let c = self.require(id, Capability::Text)?;
        c.text.get_or_insert_with(TextFace::default).align = align;
        self.touch(id);
        Ok(())
    }

    /// Sets an icon from an already-decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds without icons.
    pub fn set_icon(&mut self, id: ControlId, image: Arc<Surface>, align: Align) -> GuiResult<()> {
        self.require(id, Capability::Icon)?.icon = Some(IconFace { image, align });
        self.touch(id);
        Ok(())
    }

    /// Removes the icon.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds without icons.
    pub fn clear_icon(&mut self, id: ControlId) -> GuiResult<()> {
        self.require(id, Capability::Icon)?.icon = None;
        self.touch(id);
        Ok(())
    }

    /// Sets corner radii: one value for all corners, or four (tl, tr, br, bl).
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidArgument`] for any other length or for
    /// negative or non-finite radii. The previous radii are kept.
    pub fn set_corners(&mut self, id: ControlId, radii: &[f32]) -> GuiResult<()> {
        let corners = match *radii {
            [r] => [r; 4],
            [tl, tr, br, bl] => [tl, tr, br, bl],
            _ => {
                return Err(GuiError::invalid(
                    "corners",
                    format!("expected 1 or 4 radii, got {}", radii.len()),
                ))
            }
        };
        if corners.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(GuiError::invalid("corners", format!("radii must be non-negative, got {radii:?}")));
        }
        self.control_mut_ref(id)?.corners = corners;
        self.touch(id);
        Ok(())
    }

    /// Makes the background opaque or transparent. Transparent containers
    /// cannot be dragged and let the pointer through to what is beneath.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead id.
    pub fn set_opaque(&mut self, id: ControlId, opaque: bool) -> GuiResult<()> {
        if self.control_mut_ref(id)?.flags.assign(ControlFlags::OPAQUE, opaque) {
            self.touch(id);
        }
        Ok(())
    }

    /// Gives a control its own color scheme.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidArgument`] for an unknown scheme name.
    pub fn set_scheme(&mut self, id: ControlId, scheme: &str) -> GuiResult<()> {
        let found = self
            .schemes
            .find(scheme)
            .ok_or_else(|| GuiError::invalid("scheme", format!("unknown scheme {scheme:?}")))?;
        self.control_mut_ref(id)?.scheme = Some(found);
        self.touch(id);
        Ok(())
    }

    /// Changes the scheme used by controls without their own.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidArgument`] for an unknown scheme name.
    pub fn set_default_scheme(&mut self, scheme: &str) -> GuiResult<()> {
        self.default_scheme = self
            .schemes
            .find(scheme)
            .ok_or_else(|| GuiError::invalid("scheme", format!("unknown scheme {scheme:?}")))?;
        self.touch_all();
        Ok(())
    }

    /// Replaces the text renderer. Every control is redrawn and tabs and
    /// tooltips are refitted.
    pub fn set_glyphs(&mut self, glyphs: impl GlyphSource + 'static) {
        self.glyphs = Box::new(glyphs);
        let fitted: Vec<ControlId> = self
            .tree
            .iter()
            .filter(|c| matches!(c.kind(), ControlKind::PaneTab | ControlKind::Tooltip))
            .map(Control::id)
            .collect();
        for id in fitted {
            self.fit_to_text(id);
        }
        for side in Side::ALL {
            self.relayout_tabs(side);
        }
        self.touch_all();
    }

    /// Size of `text` with the current glyph source.
    #[must_use]
    pub fn text_size(&self, text: &str) -> (f32, f32) {
        self.glyphs.measure(text, &self.config.text)
    }

    /// Sizes a tab or tooltip to its text plus padding.
    fn fit_to_text(&mut self, id: ControlId) {
        let Some(c) = self.tree.get(id) else {
            return;
        };
        let pad = self.config.text.padding;
        let (tw, th) = self.glyphs.measure(c.text().unwrap_or(""), &self.config.text);
        if let Some(c) = self.tree.get_mut(id) {
            c.rect.width = tw + 2.0 * pad;
            c.rect.height = th + 2.0 * pad;
            c.mark_dirty();
        }
        self.renderer.invalidate_scene();
    }

    // ------------------------------------------------------------------
    // Kind-specific configuration
    // ------------------------------------------------------------------

    /// Sets the value of a slider or scroller (clamped).
    ///
    /// # Errors
    ///
    /// Fails for kinds without a single value or a non-finite value.
    pub fn set_value(&mut self, id: ControlId, value: f32) -> GuiResult<()> {
        check_finite("value", &[value])?;
        let c = self.require(id, Capability::Value)?;
        let linked = match &mut c.behavior {
            Behavior::Slider(s) => {
                s.set_value(value);
                false
            }
            Behavior::Scroller(s) => {
                s.set_value(value);
                s.link.is_some()
            }
            _ => return Err(GuiError::invalid("value", "rangers take a range")),
        };
        self.touch(id);
        if linked {
            self.sync_viewer_from_scroller(id);
        }
        Ok(())
    }

    /// Sets slider or ranger limits.
    ///
    /// # Errors
    ///
    /// Fails unless `min < max` or for kinds without limits.
    pub fn set_limits(&mut self, id: ControlId, min: f32, max: f32) -> GuiResult<()> {
        match &mut self.require(id, Capability::Value)?.behavior {
            Behavior::Slider(s) => s.set_limits(min, max)?,
            Behavior::Ranger(r) => r.set_limits(min, max)?,
            _ => return Err(GuiError::invalid("limits", "scrollers work in [0, 1]")),
        }
        self.touch(id);
        Ok(())
    }

    /// Sets both ranger values.
    ///
    /// # Errors
    ///
    /// Fails for non-rangers or non-finite values.
    pub fn set_range(&mut self, id: ControlId, low: f32, high: f32) -> GuiResult<()> {
        check_finite("range", &[low, high])?;
        match &mut self.require(id, Capability::Value)?.behavior {
            Behavior::Ranger(r) => {
                r.set_range(low, high);
            }
            _ => return Err(GuiError::invalid("range", "only rangers hold a range")),
        }
        self.touch(id);
        Ok(())
    }

    /// Sets slider tick marks and snapping.
    ///
    /// # Errors
    ///
    /// Fails for non-sliders.
    pub fn set_ticks(&mut self, id: ControlId, ticks: Option<Ticks>, stick: bool) -> GuiResult<()> {
        match &mut self.require(id, Capability::Value)?.behavior {
            Behavior::Slider(s) => {
                s.set_ticks(ticks);
                s.set_stick_to_ticks(stick);
            }
            _ => return Err(GuiError::invalid("ticks", "only sliders have ticks")),
        }
        self.touch(id);
        Ok(())
    }

    /// Sets a scroller's visible fraction.
    ///
    /// # Errors
    ///
    /// Fails for non-scrollers or `used` outside `(0, 1]`.
    pub fn set_used(&mut self, id: ControlId, used: f32) -> GuiResult<()> {
        match &mut self.require(id, Capability::Value)?.behavior {
            Behavior::Scroller(s) => s.set_used(used)?,
            _ => return Err(GuiError::invalid("used", "only scrollers have a used fraction")),
        }
        self.touch(id);
        Ok(())
    }

    /// Checks or unchecks a check box or option. Selecting an option
    /// deselects the rest of its group.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds without a selected state.
    pub fn set_selected(&mut self, id: ControlId, selected: bool) -> GuiResult<()> {
        let exclusive = match &mut self.require(id, Capability::Toggle)?.behavior {
            Behavior::Checkbox(c) => {
                c.selected = selected;
                false
            }
            Behavior::OptionButton(o) => {
                o.selected = selected;
                selected
            }
            _ => false,
        };
        self.touch(id);
        if exclusive {
            self.deselect_group(id);
        }
        Ok(())
    }

    /// Puts an option button in an exclusive group.
    ///
    /// # Errors
    ///
    /// Fails for anything but option buttons.
    pub fn set_group(&mut self, id: ControlId, group: &str) -> GuiResult<()> {
        match &mut self.require(id, Capability::Toggle)?.behavior {
            Behavior::OptionButton(o) => o.group = Some(group.to_string()),
            _ => return Err(GuiError::invalid("group", "only option buttons join groups")),
        }
        Ok(())
    }

    /// Deselects every other option in `id`'s group.
    pub(crate) fn deselect_group(&mut self, id: ControlId) {
        let Some(group) = self.tree.get(id).and_then(|c| match &c.behavior {
            Behavior::OptionButton(o) => o.group.clone(),
            _ => None,
        }) else {
            return;
        };
        let mut changed = Vec::new();
        for c in self.tree.iter_mut() {
            if c.id == id {
                continue;
            }
            if let Behavior::OptionButton(o) = &mut c.behavior {
                if o.selected && o.group.as_deref() == Some(group.as_str()) {
                    o.selected = false;
                    changed.push(c.id);
                }
            }
        }
        for other in changed {
            self.touch(other);
        }
    }

    /// Installs a text field validator.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for non-text-fields.
    pub fn set_validator(&mut self, id: ControlId, validator: Validator) -> GuiResult<()> {
        if let Behavior::TextField(f) = &mut self.require(id, Capability::Focus)?.behavior {
            f.set_validator(Some(validator));
        }
        self.touch(id);
        Ok(())
    }

    /// Enables or disables drag-to-move on a panel.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds that cannot be dragged.
    pub fn set_draggable(&mut self, id: ControlId, draggable: bool) -> GuiResult<()> {
        if let Behavior::Panel(p) = &mut self.require(id, Capability::Drag)?.behavior {
            p.draggable = draggable;
        }
        Ok(())
    }

    /// Keeps a dragged panel inside the canvas (or its parent).
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds that cannot be dragged.
    pub fn set_constrained(&mut self, id: ControlId, constrained: bool) -> GuiResult<()> {
        if let Behavior::Panel(p) = &mut self.require(id, Capability::Drag)?.behavior {
            p.constrained = constrained;
        }
        Ok(())
    }

    /// Gives keyboard focus to a text field.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Unsupported`] for kinds that take no focus and
    /// [`GuiError::InvalidArgument`] for a field that is hidden or disabled.
    pub fn focus(&mut self, id: ControlId) -> GuiResult<()> {
        self.require(id, Capability::Focus)?;
        if !self.accepts_input(id) {
            return Err(GuiError::invalid("focus", format!("{id:?} is hidden or disabled")));
        }
        self.set_focus(Some(id), RawEvent::Synthetic);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Viewer
    // ------------------------------------------------------------------

    fn viewer_mut(&mut self, id: ControlId, operation: &'static str) -> GuiResult<(&mut Viewer, f32, f32)> {
        let c = self.control_mut_ref(id)?;
        let (w, h) = (c.rect.width, c.rect.height);
        match &mut c.behavior {
            Behavior::Viewer(v) => Ok((v, w, h)),
            _ => Err(GuiError::invalid(operation, format!("{id:?} is not a viewer"))),
        }
    }

    /// Sets the viewer's content image and centers the view on it.
    ///
    /// # Errors
    ///
    /// Fails for non-viewers.
    pub fn set_content(&mut self, id: ControlId, content: Arc<Surface>) -> GuiResult<()> {
        let (viewer, w, h) = self.viewer_mut(id, "content")?;
        viewer.set_content(content);
        let (cx, cy) = viewer.center();
        viewer.set_center(cx, cy, w, h);
        self.touch(id);
        self.sync_scrollers_from_viewer(id);
        Ok(())
    }

    /// Moves the view center (content coordinates, clamped).
    ///
    /// # Errors
    ///
    /// Fails for non-viewers or non-finite coordinates.
    pub fn set_view_center(&mut self, id: ControlId, x: f32, y: f32) -> GuiResult<()> {
        check_finite("center", &[x, y])?;
        let (viewer, w, h) = self.viewer_mut(id, "center")?;
        if viewer.set_center(x, y, w, h) {
            self.touch(id);
            self.sync_scrollers_from_viewer(id);
        }
        Ok(())
    }

    /// Links a scroller to a viewer axis. The scroller's thumb tracks the
    /// view and dragging it pans the view. Neither control owns the other.
    /// Each axis holds one scroller; linking another unlinks the previous one.
    ///
    /// # Errors
    ///
    /// Fails unless `viewer` is a viewer and `scroller` a scroller.
    pub fn link_scroller(&mut self, viewer: ControlId, scroller: ControlId, axis: Axis) -> GuiResult<()> {
        self.viewer_mut(viewer, "link")?;
        let previous = match &mut self.control_mut_ref(scroller)?.behavior {
            Behavior::Scroller(s) => s.link.replace((viewer, axis)),
            _ => return Err(GuiError::invalid("link", format!("{scroller:?} is not a scroller"))),
        };
        if let Some((old, _)) = previous.filter(|&(old, _)| old != viewer) {
            if let Ok((v, _, _)) = self.viewer_mut(old, "link") {
                v.scrollers.retain(|&(s, _)| s != scroller);
            }
        }

        let (v, _, _) = self.viewer_mut(viewer, "link")?;
        let displaced: Vec<ControlId> =
            v.scrollers.iter().filter(|&&(s, a)| a == axis && s != scroller).map(|&(s, _)| s).collect();
        v.scrollers.retain(|&(s, a)| s != scroller && a != axis);
        v.scrollers.push((scroller, axis));

        // One scroller per axis: the one it replaces stops driving the view.
        for id in displaced {
            if let Some(Behavior::Scroller(s)) = self.tree.get_mut(id).map(|c| &mut c.behavior) {
                if s.link == Some((viewer, axis)) {
                    s.link = None;
                }
            }
            tracing::debug!(?viewer, scroller = ?id, ?axis, "scroller unlinked");
        }
        self.sync_scrollers_from_viewer(viewer);
        Ok(())
    }

    fn reclamp_viewer(&mut self, id: ControlId) {
        if let Ok((viewer, w, h)) = self.viewer_mut(id, "resize") {
            let (cx, cy) = viewer.center();
            viewer.set_center(cx, cy, w, h);
            self.sync_scrollers_from_viewer(id);
        }
    }

    /// Pans a linked viewer to match a scroller.
    pub(crate) fn sync_viewer_from_scroller(&mut self, scroller: ControlId) {
        let Some((viewer, axis, value)) = self.tree.get(scroller).and_then(|c| match &c.behavior {
            Behavior::Scroller(s) => s.link.map(|(v, a)| (v, a, s.value())),
            _ => None,
        }) else {
            return;
        };
        match self.viewer_mut(viewer, "scroll") {
            Ok((v, w, h)) => {
                if v.scroll_to(axis, value, w, h) {
                    self.touch(viewer);
                }
            }
            Err(_) => tracing::trace!(?scroller, ?viewer, "linked viewer is gone"),
        }
    }

    /// Moves linked scrollers to match a viewer.
    pub(crate) fn sync_scrollers_from_viewer(&mut self, viewer: ControlId) {
        let Ok((v, w, h)) = self.viewer_mut(viewer, "scroll") else {
            return;
        };
        let states: Vec<(ControlId, (f32, f32))> = v
            .scrollers
            .iter()
            .map(|&(s, axis)| (s, v.scroll_state(axis, w, h)))
            .collect();
        for (id, (value, used)) in states {
            let Some(c) = self.tree.get_mut(id) else {
                continue;
            };
            let updated = match &mut c.behavior {
                Behavior::Scroller(s) if s.link.map(|l| l.0) == Some(viewer) => {
                    let used_ok = s.set_used(used).is_ok();
                    s.set_value(value) || used_ok
                }
                _ => false,
            };
            if updated {
                self.touch(id);
            }
        }
    }

    // ------------------------------------------------------------------
    // Panes
    // ------------------------------------------------------------------

    /// Creates a closed pane docked on `side`.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate or empty name.
    pub fn create_pane(&mut self, name: &str, side: Side) -> GuiResult<ControlId> {
        let (cw, ch) = self.canvas_size();
        let rect = Pane::frame(side, cw, ch, self.config.pane.depth);
        let id = self.insert(name, rect, Behavior::Pane(Pane::new(side)))?;
        if let Some(c) = self.tree.get_mut(id) {
            c.flags.clear(ControlFlags::VISIBLE);
        }
        Ok(id)
    }

    /// Adds a tab that toggles `pane`.
    ///
    /// # Errors
    ///
    /// Fails if `pane` is not a pane or the name is taken.
    pub fn add_tab(&mut self, pane: ControlId, name: &str, text: &str) -> GuiResult<ControlId> {
        let side = self.pane_side(pane)?;
        let id = self.insert(name, Rect::ZERO, Behavior::PaneTab(PaneTab::new(pane)))?;
        if let Some(c) = self.tree.get_mut(id) {
            c.orientation = side.tab_orientation();
            c.text = Some(TextFace { text: text.to_string(), align: Align::Center });
        }
        self.fit_to_text(id);
        self.relayout_tabs(side);
        Ok(id)
    }

    fn pane_side(&self, pane: ControlId) -> GuiResult<Side> {
        match &self.control_ref(pane)?.behavior {
            Behavior::Pane(p) => Ok(p.side),
            _ => Err(GuiError::invalid("pane", format!("{pane:?} is not a pane"))),
        }
    }

    fn tab_side(&self, tab: ControlId) -> Option<Side> {
        match &self.tree.get(tab)?.behavior {
            Behavior::PaneTab(t) => self.pane_side(t.pane).ok(),
            _ => None,
        }
    }

    /// Returns true if the pane is open.
    #[must_use]
    pub fn is_pane_open(&self, pane: ControlId) -> bool {
        matches!(self.tree.get(pane).map(|c| &c.behavior), Some(Behavior::Pane(p)) if p.open)
    }

    /// Opens or closes a pane. Opening closes the other panes on its side.
    ///
    /// # Errors
    ///
    /// Fails if `pane` is not a pane.
    pub fn open_pane(&mut self, pane: ControlId, open: bool) -> GuiResult<()> {
        let side = self.pane_side(pane)?;
        if open {
            let others: Vec<ControlId> = self
                .tree
                .iter()
                .filter(|c| c.id != pane && matches!(&c.behavior, Behavior::Pane(p) if p.side == side && p.open))
                .map(Control::id)
                .collect();
            for other in others {
                self.set_pane_open(other, false);
            }
        }
        self.set_pane_open(pane, open);
        if open {
            self.tree.raise(pane);
        }
        self.relayout_tabs(side);
        Ok(())
    }

    fn set_pane_open(&mut self, pane: ControlId, open: bool) {
        if let Some(c) = self.tree.get_mut(pane) {
            if let Behavior::Pane(p) = &mut c.behavior {
                p.open = open;
            }
        }
        self.apply_visible(pane, open);
        tracing::debug!(?pane, open, "pane toggled");
    }

    /// Lines up the tabs of one side along the open pane's inner edge (or
    /// the canvas edge) and keeps them above the panes.
    fn relayout_tabs(&mut self, side: Side) {
        let mut tabs: Vec<(ControlId, (f32, f32))> = self
            .tree
            .iter()
            .filter(|c| self.tab_side(c.id) == Some(side))
            .map(|c| {
                let fp = c.footprint();
                (c.id, (fp.width, fp.height))
            })
            .collect();
        if tabs.is_empty() {
            return;
        }
        tabs.sort_by_key(|&(id, _)| id);
        let open = self
            .tree
            .iter()
            .any(|c| matches!(&c.behavior, Behavior::Pane(p) if p.side == side && p.open));
        let footprints: Vec<(f32, f32)> = tabs.iter().map(|&(_, fp)| fp).collect();
        let positions = layout_tabs(
            side,
            self.canvas_size(),
            open.then_some(self.config.pane.depth),
            self.config.pane.tab_gap,
            &footprints,
        );
        for (&(id, _), (x, y)) in tabs.iter().zip(positions) {
            if let Some(c) = self.tree.get_mut(id) {
                c.rect.x = x;
                c.rect.y = y;
            }
            self.tree.raise(id);
        }
        self.renderer.invalidate_scene();
    }

    // ------------------------------------------------------------------
    // Tooltips
    // ------------------------------------------------------------------

    /// Attaches (or retexts) a tooltip. The tooltip appears after the
    /// configured hover delay and hides itself after the visible time.
    ///
    /// # Errors
    ///
    /// Fails for a dead owner or if the tooltip's name is taken.
    pub fn set_tooltip(&mut self, owner: ControlId, text: &str) -> GuiResult<ControlId> {
        let owner_control = self.control_ref(owner)?;
        let existing = owner_control.tooltip.filter(|&t| self.tree.contains(t));
        let name = format!("{}.tooltip", owner_control.name);
        if let Some(tip) = existing {
            self.set_text(tip, text)?;
            return Ok(tip);
        }
        let tip = self.insert(&name, Rect::ZERO, Behavior::Tooltip(TooltipState::new(owner)))?;
        if let Some(c) = self.tree.get_mut(tip) {
            c.flags.clear(ControlFlags::VISIBLE);
            c.text = Some(TextFace { text: text.to_string(), align: Align::Left });
        }
        self.fit_to_text(tip);
        if let Some(c) = self.tree.get_mut(owner) {
            c.tooltip = Some(tip);
        }
        Ok(tip)
    }

    /// Removes a control's tooltip.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] for a dead owner.
    pub fn remove_tooltip(&mut self, owner: ControlId) -> GuiResult<()> {
        if let Some(tip) = self.control_mut_ref(owner)?.tooltip.take() {
            self.destroy(tip);
        }
        Ok(())
    }

    /// Schedules the owner's tooltip (if any) to show or hide.
    pub(crate) fn schedule_tooltip(&mut self, owner: ControlId, action: TimerAction) {
        let Some(tip) = self.tree.get(owner).and_then(Control::tooltip) else {
            return;
        };
        let delay = match action {
            TimerAction::Show => self.config.tooltip.show_delay_ms,
            TimerAction::Hide => 0,
        };
        self.timers.schedule(tip, action, self.now_ms + delay);
    }

    /// Advances the clock and fires due tooltip timers.
    pub fn advance(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        for (tip, action) in self.timers.take_due(self.now_ms) {
            self.fire_timer(tip, action);
        }
    }

    fn fire_timer(&mut self, tip: ControlId, action: TimerAction) {
        let owner = self.tree.get(tip).and_then(|c| match &c.behavior {
            Behavior::Tooltip(t) => Some(t.owner),
            _ => None,
        });
        let Some(owner) = owner.filter(|&o| self.tree.contains(o)) else {
            tracing::debug!(?tip, ?action, "timer target gone, ignored");
            return;
        };
        match action {
            TimerAction::Show => {
                if !self.tree.is_shown(owner) {
                    return;
                }
                let (Some((ox, oy)), Some(fp)) = (self.tree.origin(owner), self.tree.get(owner).map(Control::footprint))
                else {
                    return;
                };
                let Some(size) = self.tree.get(tip).map(Control::footprint) else {
                    return;
                };
                let (x, y) = place_tooltip(
                    Rect::new(ox, oy, fp.width, fp.height),
                    size.width,
                    size.height,
                    self.config.tooltip.offset,
                    self.renderer.bounds(),
                );
                if let Some(c) = self.tree.get_mut(tip) {
                    c.rect.x = x;
                    c.rect.y = y;
                }
                self.apply_visible(tip, true);
                self.touch(tip);
                self.tree.raise(tip);
                self.timers
                    .schedule(tip, TimerAction::Hide, self.now_ms + self.config.tooltip.visible_ms);
                tracing::trace!(?tip, ?owner, "tooltip shown");
            }
            TimerAction::Hide => self.apply_visible(tip, false),
        }
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Invokes a control's action callback.
    pub(crate) fn fire(&mut self, id: ControlId, value: ActionValue, raw: RawEvent, is_final: bool) {
        let Some(c) = self.tree.get_mut(id) else {
            return;
        };
        let Some(mut handler) = c.action.take() else {
            return;
        };
        let event = ActionEvent {
            source: id,
            name: c.name.clone(),
            raw,
            value,
            is_final,
        };
        tracing::trace!(?id, is_final, value = ?event.value, "action");
        handler(&event);
        if let Some(c) = self.tree.get_mut(id) {
            c.action.get_or_insert(handler);
        }
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Rebuilds dirty buffers and recomposites if anything changed.
    pub(crate) fn refresh(&mut self) {
        let res = Resources {
            schemes: &self.schemes,
            default_scheme: self.default_scheme,
            text: &self.config.text,
            glyphs: self.glyphs.as_ref(),
        };
        self.renderer.rebuild_dirty(&mut self.tree, &res);
        if self.renderer.is_scene_dirty() {
            self.renderer.compose(&self.tree);
        }
    }

    /// Runs one frame: fires due timers, rebuilds dirty buffers and
    /// recomposites when something changed.
    pub fn draw(&mut self, now_ms: u64) -> FrameStats {
        self.advance(now_ms);
        self.refresh();
        let stats = self.renderer.finish_frame();
        tracing::trace!(frame = stats.frame, rebuilt = stats.rebuilt, composed = stats.composed, "frame");
        stats
    }

    /// The composed frame.
    #[must_use]
    pub fn frame(&self) -> &Surface {
        self.renderer.frame()
    }

    /// The composed pick surface.
    #[must_use]
    pub fn pick_surface(&self) -> &Surface {
        self.renderer.pick()
    }

    /// Control and part under a canvas point, per the last composite.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<(ControlId, u8)> {
        let pixel = self.renderer.sample_pick(x, y)?;
        let (id, part) = self.keys.resolve(pixel)?;
        self.tree.contains(id).then_some((id, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut gui = Gui::with_size(200, 100);
        let ok = gui.create(ControlKind::Button, "ok", 10.0, 10.0, 50.0, 20.0).unwrap();
        assert_eq!(gui.find("ok"), Some(ok));
        assert_eq!(gui.get_by_name("ok").map(Control::kind), Some(ControlKind::Button));
        assert!(gui.find("cancel").is_none());
        assert_eq!(
            gui.create(ControlKind::Label, "ok", 0.0, 0.0, 1.0, 1.0),
            Err(GuiError::DuplicateName("ok".into()))
        );
        assert!(gui.create(ControlKind::Pane, "p", 0.0, 0.0, 1.0, 1.0).is_err());
        assert!(gui.create(ControlKind::Button, "neg", 0.0, 0.0, -1.0, 1.0).is_err());
        assert_eq!(gui.len(), 1);
    }

    #[test]
    fn test_corners_shape() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 0.0, 0.0, 50.0, 20.0).unwrap();
        gui.set_corners(b, &[4.0]).unwrap();
        assert_eq!(gui.get(b).unwrap().corners(), [4.0; 4]);
        assert!(matches!(gui.set_corners(b, &[1.0, 2.0]), Err(GuiError::InvalidArgument { .. })));
        assert_eq!(gui.get(b).unwrap().corners(), [4.0; 4]);
        gui.set_corners(b, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(gui.get(b).unwrap().corners(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_capability_misuse() {
        let mut gui = Gui::with_size(200, 100);
        let panel = gui.create(ControlKind::Panel, "panel", 0.0, 0.0, 50.0, 50.0).unwrap();
        assert_eq!(
            gui.orient(panel, Orientation::North),
            Err(GuiError::Unsupported { control: panel, capability: Capability::Orient })
        );
        assert_eq!(gui.get(panel).unwrap().orientation(), Orientation::East);
        let label = gui.create(ControlKind::Label, "label", 0.0, 0.0, 50.0, 50.0).unwrap();
        assert!(gui.set_value(label, 0.5).is_err());
    }

    #[test]
    fn test_option_group_is_exclusive() {
        let mut gui = Gui::with_size(200, 100);
        let a = gui.create(ControlKind::OptionButton, "a", 0.0, 0.0, 50.0, 20.0).unwrap();
        let b = gui.create(ControlKind::OptionButton, "b", 0.0, 30.0, 50.0, 20.0).unwrap();
        gui.set_group(a, "size").unwrap();
        gui.set_group(b, "size").unwrap();
        gui.set_selected(a, true).unwrap();
        gui.set_selected(b, true).unwrap();
        assert_eq!(gui.value(a), Some(ActionValue::Selected(false)));
        assert_eq!(gui.value(b), Some(ActionValue::Selected(true)));
    }

    #[test]
    fn test_viewer_scroller_link() {
        let mut gui = Gui::with_size(400, 300);
        let viewer = gui.create(ControlKind::Viewer, "view", 0.0, 0.0, 100.0, 100.0).unwrap();
        let hs = gui.create(ControlKind::Scroller, "hs", 0.0, 100.0, 100.0, 10.0).unwrap();
        gui.set_content(viewer, Arc::new(Surface::new(400, 200))).unwrap();
        gui.link_scroller(viewer, hs, Axis::Horizontal).unwrap();
        assert_eq!(gui.value(hs), Some(ActionValue::Scroll { value: 0.5, used: 0.25 }));

        gui.set_value(hs, 0.0).unwrap();
        assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 50.0, y: 100.0 }));

        // The link does not keep the viewer alive.
        gui.destroy(viewer);
        gui.set_value(hs, 0.9).unwrap();
        assert!(gui.contains(hs));
    }
}
