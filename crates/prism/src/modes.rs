//! # Modes
//!
//! A host application usually has a handful of whole screens: a menu, an
//! editor, a preview. Each [`Mode`] variant owns the root ids of the GUI
//! subtree that makes up its screen. [`ModeMachine::transition`] hides the
//! outgoing subtree and shows the incoming one; nothing else in the GUI is
//! touched.
//!
//! Action handlers never see the GUI or the machine. They hold an
//! [`IntentSender`] and post an [`Intent`]; the frame loop drains the queue
//! with [`ModeMachine::pump`] between dispatching input and drawing.
//!
//! ```text
//!   handler ──try_send──> [ bounded channel ] ──pump()──> transition()
//!                                                            │
//!                                      hide(old roots) ◄─────┤
//!                                      show(new roots) ◄─────┘
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use prism_ui::{ControlId, Gui, GuiError};
use thiserror::Error;

/// Default intent queue capacity.
pub const DEFAULT_INTENT_CAPACITY: usize = 64;

/// Which screen a [`Mode`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Start screen.
    Menu,
    /// Editing screen.
    Editor,
    /// Read-only preview.
    Preview,
}

impl ModeKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Menu, Self::Editor, Self::Preview];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Editor => "editor",
            Self::Preview => "preview",
        }
    }
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Root controls of one screen. Showing or hiding a root covers everything
/// beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtree {
    roots: Vec<ControlId>,
}

impl Subtree {
    /// Creates a subtree from its roots.
    #[must_use]
    pub fn new(roots: impl IntoIterator<Item = ControlId>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
        }
    }

    /// Adds a root.
    pub fn push(&mut self, root: ControlId) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    /// Root ids.
    #[must_use]
    pub fn roots(&self) -> &[ControlId] {
        &self.roots
    }

    /// Returns true if `id` is one of the roots.
    #[must_use]
    pub fn contains(&self, id: ControlId) -> bool {
        self.roots.contains(&id)
    }

    fn set_visible(&self, gui: &mut Gui, visible: bool) {
        for &root in &self.roots {
            match gui.set_visible(root, visible) {
                Ok(()) => {}
                // A root destroyed behind the machine's back is skipped.
                Err(GuiError::NoSuchControl(_)) => {
                    tracing::debug!(?root, visible, "mode root is gone");
                }
                Err(err) => tracing::warn!(?root, %err, "mode root not switched"),
            }
        }
    }
}

/// One screen and the GUI subtree it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Start screen.
    Menu(Subtree),
    /// Editing screen.
    Editor(Subtree),
    /// Read-only preview.
    Preview(Subtree),
}

impl Mode {
    /// Builds the variant for `kind`.
    #[must_use]
    pub fn of(kind: ModeKind, subtree: Subtree) -> Self {
        match kind {
            ModeKind::Menu => Self::Menu(subtree),
            ModeKind::Editor => Self::Editor(subtree),
            ModeKind::Preview => Self::Preview(subtree),
        }
    }

    /// Which screen this is.
    #[must_use]
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Menu(_) => ModeKind::Menu,
            Self::Editor(_) => ModeKind::Editor,
            Self::Preview(_) => ModeKind::Preview,
        }
    }

    /// The owned subtree.
    #[must_use]
    pub fn subtree(&self) -> &Subtree {
        match self {
            Self::Menu(s) | Self::Editor(s) | Self::Preview(s) => s,
        }
    }
}

/// Requests posted by action handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Switch to another screen.
    Switch(ModeKind),
    /// Return to the screen before the current one.
    Back,
    /// Stop the frame loop.
    Quit,
}

/// Mode machine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    /// No mode of this kind was registered.
    #[error("no {0} mode registered")]
    Unregistered(ModeKind),
    /// Two modes of the same kind were registered.
    #[error("{0} mode registered twice")]
    Duplicate(ModeKind),
}

/// Handle for posting intents. Cheap to clone into action handlers.
#[derive(Debug, Clone)]
pub struct IntentSender {
    sender: Sender<Intent>,
}

impl IntentSender {
    /// Posts an intent (non-blocking).
    ///
    /// Returns `false` if the queue is full or the machine is gone; the
    /// intent is dropped in that case.
    pub fn send(&self, intent: Intent) -> bool {
        match self.sender.try_send(intent) {
            Ok(()) => true,
            Err(TrySendError::Full(intent)) => {
                tracing::warn!(?intent, "intent queue full, dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving end of the intent queue.
#[derive(Debug, Clone)]
pub struct IntentReceiver {
    receiver: Receiver<Intent>,
}

impl IntentReceiver {
    /// Takes every pending intent (non-blocking).
    #[must_use]
    pub fn drain(&self) -> Vec<Intent> {
        let mut intents = Vec::with_capacity(self.receiver.len());
        while let Ok(intent) = self.receiver.try_recv() {
            intents.push(intent);
        }
        intents
    }

    /// Number of pending intents.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Bounded intent channel. Create one up front when the screens need a
/// sender before the machine exists, then hand it to
/// [`ModeMachine::with_queue`].
#[derive(Debug, Clone)]
pub struct IntentQueue {
    sender: Sender<Intent>,
    receiver: Receiver<Intent>,
}

impl IntentQueue {
    /// Creates a queue holding at most `capacity` pending intents.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> IntentSender {
        IntentSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> IntentReceiver {
        IntentReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new(DEFAULT_INTENT_CAPACITY)
    }
}

/// Closed state machine over [`Mode`]s.
///
/// Exactly one mode is current and its subtree is shown; every other
/// registered mode is parked with its subtree hidden.
#[derive(Debug)]
pub struct ModeMachine {
    current: Mode,
    parked: Vec<Mode>,
    history: Vec<ModeKind>,
    queue: IntentQueue,
    quit: bool,
}

impl ModeMachine {
    /// Registers `initial` as current and `others` as parked, and brings the
    /// GUI in line: the initial subtree is shown, the others are hidden.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Duplicate`] if two modes share a kind.
    pub fn new(gui: &mut Gui, initial: Mode, others: impl IntoIterator<Item = Mode>) -> Result<Self, ModeError> {
        Self::with_queue(gui, initial, others, IntentQueue::default())
    }

    /// As [`ModeMachine::new`], draining an existing queue.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Duplicate`] if two modes share a kind.
    pub fn with_queue(
        gui: &mut Gui,
        initial: Mode,
        others: impl IntoIterator<Item = Mode>,
        queue: IntentQueue,
    ) -> Result<Self, ModeError> {
        let mut parked: Vec<Mode> = Vec::new();
        for mode in others {
            if mode.kind() == initial.kind() || parked.iter().any(|m| m.kind() == mode.kind()) {
                return Err(ModeError::Duplicate(mode.kind()));
            }
            parked.push(mode);
        }
        for mode in &parked {
            mode.subtree().set_visible(gui, false);
        }
        initial.subtree().set_visible(gui, true);

        tracing::debug!(initial = %initial.kind(), parked = parked.len(), "mode machine ready");
        Ok(Self {
            current: initial,
            parked,
            history: Vec::new(),
            queue,
            quit: false,
        })
    }

    /// The current mode.
    #[must_use]
    pub fn current(&self) -> &Mode {
        &self.current
    }

    /// Kind of the current mode.
    #[must_use]
    pub fn kind(&self) -> ModeKind {
        self.current.kind()
    }

    /// Returns true once a [`Intent::Quit`] has been pumped.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Registered mode of `kind`, current or parked.
    #[must_use]
    pub fn mode(&self, kind: ModeKind) -> Option<&Mode> {
        std::iter::once(&self.current)
            .chain(&self.parked)
            .find(|m| m.kind() == kind)
    }

    /// A sender for action handlers.
    #[must_use]
    pub fn sender(&self) -> IntentSender {
        self.queue.sender()
    }

    /// The receiving end, for hosts that inspect the queue themselves.
    #[must_use]
    pub fn receiver(&self) -> IntentReceiver {
        self.queue.receiver()
    }

    /// Switches to `kind`. Returns `Ok(false)` if it is already current.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Unregistered`] if no mode of `kind` exists. The
    /// GUI is untouched in that case.
    pub fn transition(&mut self, gui: &mut Gui, kind: ModeKind) -> Result<bool, ModeError> {
        if kind == self.current.kind() {
            return Ok(false);
        }
        let index = self
            .parked
            .iter()
            .position(|m| m.kind() == kind)
            .ok_or(ModeError::Unregistered(kind))?;

        let incoming = self.parked.swap_remove(index);
        self.current.subtree().set_visible(gui, false);
        incoming.subtree().set_visible(gui, true);

        let outgoing = std::mem::replace(&mut self.current, incoming);
        tracing::debug!(from = %outgoing.kind(), to = %kind, "mode transition");
        self.history.push(outgoing.kind());
        self.parked.push(outgoing);
        Ok(true)
    }

    /// Returns to the previous mode, if any.
    ///
    /// # Errors
    ///
    /// As [`ModeMachine::transition`].
    pub fn back(&mut self, gui: &mut Gui) -> Result<bool, ModeError> {
        let Some(previous) = self.history.pop() else {
            return Ok(false);
        };
        let moved = self.transition(gui, previous)?;
        // The transition recorded the mode being left; going back is not a
        // step forward.
        if moved {
            self.history.pop();
        }
        Ok(moved)
    }

    /// Applies every pending intent in order. Returns how many transitions
    /// happened.
    pub fn pump(&mut self, gui: &mut Gui) -> usize {
        let mut transitions = 0;
        for intent in self.queue.receiver().drain() {
            let result = match intent {
                Intent::Switch(kind) => self.transition(gui, kind),
                Intent::Back => self.back(gui),
                Intent::Quit => {
                    self.quit = true;
                    Ok(false)
                }
            };
            match result {
                Ok(true) => transitions += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!(?intent, %err, "intent ignored"),
            }
        }
        transitions
    }

    /// Destroys every owned subtree and consumes the machine.
    pub fn teardown(self, gui: &mut Gui) {
        for mode in std::iter::once(self.current).chain(self.parked) {
            for &root in mode.subtree().roots() {
                gui.destroy(root);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_ui::{ActionEvent, ControlKind, PointerEvent};

    struct Fixture {
        gui: Gui,
        menu: ControlId,
        editor: ControlId,
        preview: ControlId,
        status: ControlId,
    }

    fn fixture() -> Fixture {
        let mut gui = Gui::with_size(400, 300);
        let menu = gui.create(ControlKind::Panel, "menu", 0.0, 0.0, 400.0, 260.0).unwrap();
        let editor = gui.create(ControlKind::Panel, "editor", 0.0, 0.0, 400.0, 260.0).unwrap();
        let preview = gui.create(ControlKind::Viewer, "preview", 0.0, 0.0, 400.0, 260.0).unwrap();
        let status = gui.create(ControlKind::Label, "status", 0.0, 270.0, 400.0, 30.0).unwrap();
        Fixture { gui, menu, editor, preview, status }
    }

    fn machine(f: &mut Fixture) -> ModeMachine {
        ModeMachine::new(
            &mut f.gui,
            Mode::Menu(Subtree::new([f.menu])),
            [
                Mode::Editor(Subtree::new([f.editor])),
                Mode::Preview(Subtree::new([f.preview])),
            ],
        )
        .unwrap()
    }

    fn visible(gui: &Gui, id: ControlId) -> bool {
        gui.get(id).unwrap().is_visible()
    }

    #[test]
    fn test_construction_shows_only_initial() {
        let mut f = fixture();
        let m = machine(&mut f);
        assert_eq!(m.kind(), ModeKind::Menu);
        assert!(visible(&f.gui, f.menu));
        assert!(!visible(&f.gui, f.editor));
        assert!(!visible(&f.gui, f.preview));
        assert!(visible(&f.gui, f.status));
    }

    #[test]
    fn test_transition_swaps_subtrees_only() {
        let mut f = fixture();
        let mut m = machine(&mut f);
        assert_eq!(m.transition(&mut f.gui, ModeKind::Editor), Ok(true));
        assert!(!visible(&f.gui, f.menu));
        assert!(visible(&f.gui, f.editor));
        assert!(!visible(&f.gui, f.preview));
        assert!(visible(&f.gui, f.status));

        assert_eq!(m.transition(&mut f.gui, ModeKind::Editor), Ok(false));
        assert_eq!(m.back(&mut f.gui), Ok(true));
        assert_eq!(m.kind(), ModeKind::Menu);
        assert_eq!(m.back(&mut f.gui), Ok(false));
    }

    #[test]
    fn test_unregistered_mode_leaves_gui_alone() {
        let mut f = fixture();
        let mut m = ModeMachine::new(&mut f.gui, Mode::Menu(Subtree::new([f.menu])), []).unwrap();
        assert_eq!(
            m.transition(&mut f.gui, ModeKind::Preview),
            Err(ModeError::Unregistered(ModeKind::Preview))
        );
        assert!(visible(&f.gui, f.menu));
        assert!(visible(&f.gui, f.editor));
    }

    #[test]
    fn test_duplicate_kind_is_rejected() {
        let mut f = fixture();
        let err = ModeMachine::new(
            &mut f.gui,
            Mode::Menu(Subtree::new([f.menu])),
            [Mode::of(ModeKind::Menu, Subtree::new([f.editor]))],
        )
        .unwrap_err();
        assert_eq!(err, ModeError::Duplicate(ModeKind::Menu));
    }

    #[test]
    fn test_handlers_drive_transitions_through_intents() {
        let mut f = fixture();
        let go = f
            .gui
            .create_in(f.menu, ControlKind::Button, "go", 10.0, 10.0, 80.0, 30.0)
            .unwrap();
        let mut m = machine(&mut f);
        let tx = m.sender();
        f.gui
            .set_action(go, move |e: &ActionEvent| {
                if e.is_final {
                    tx.send(Intent::Switch(ModeKind::Preview));
                }
            })
            .unwrap();

        f.gui.dispatch_pointer(PointerEvent::down(20.0, 20.0));
        f.gui.dispatch_pointer(PointerEvent::up(20.0, 20.0));
        assert_eq!(m.receiver().pending_count(), 1);
        assert_eq!(m.pump(&mut f.gui), 1);
        assert_eq!(m.kind(), ModeKind::Preview);
        assert!(!f.gui.tree().is_shown(go));

        assert!(m.sender().send(Intent::Switch(ModeKind::Menu)));
        assert!(m.sender().send(Intent::Quit));
        assert_eq!(m.pump(&mut f.gui), 1);
        assert!(m.should_quit());
        assert!(f.gui.tree().is_shown(go));
    }

    #[test]
    fn test_full_queue_drops_intents() {
        let mut f = fixture();
        let m = ModeMachine::with_queue(&mut f.gui, Mode::Menu(Subtree::new([f.menu])), [], IntentQueue::new(1)).unwrap();
        let tx = m.sender();
        assert!(tx.send(Intent::Back));
        assert!(!tx.send(Intent::Quit));
        assert_eq!(m.receiver().drain(), vec![Intent::Back]);
    }

    #[test]
    fn test_teardown_destroys_owned_subtrees() {
        let mut f = fixture();
        let m = machine(&mut f);
        m.teardown(&mut f.gui);
        assert_eq!(f.gui.len(), 1);
        assert!(f.gui.contains(f.status));
    }
}
