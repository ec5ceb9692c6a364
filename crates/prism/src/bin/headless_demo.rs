//! # PRISM Headless Demo
//!
//! Builds three screens (menu, editor, preview), wires them to the mode
//! machine and replays a scripted pointer and keyboard session against the
//! canvas. No window is opened; each step prints what the toolkit did.
//!
//! ```bash
//! cargo run --package prism --bin headless_demo
//! ```

use std::error::Error;
use std::sync::Arc;

use prism::ui::{Key, KeyEvent};
use prism::{
    ActionEvent, ActionValue, Axis, ControlId, ControlKind, Gui, GuiConfig, Intent, IntentQueue, IntentSender, Mode,
    ModeKind, ModeMachine, Orientation, PointerEvent, Rect, Rgba, Side, Subtree, Surface,
};

/// Frame interval of the simulated host.
const FRAME_MS: u64 = 16;

/// Canvas and timing used by the demo.
const CONFIG: &str = r#"
[canvas]
width = 640
height = 400

[tooltip]
show_delay_ms = 300
visible_ms = 1500

[scheme]
default = "dark"
"#;

fn build_menu(gui: &mut Gui, modes: &IntentSender) -> Result<Subtree, Box<dyn Error>> {
    let panel = gui.create(ControlKind::Panel, "menu", 220.0, 100.0, 200.0, 200.0)?;
    gui.control(panel).draggable(false).corners(&[8.0]);

    let entries = [
        ("menu.edit", "Edit", Intent::Switch(ModeKind::Editor)),
        ("menu.preview", "Preview", Intent::Switch(ModeKind::Preview)),
        ("menu.quit", "Quit", Intent::Quit),
    ];
    for (row, (name, text, intent)) in entries.into_iter().enumerate() {
        let button = gui.create_in(panel, ControlKind::Button, name, 20.0, 20.0 + row as f32 * 60.0, 160.0, 40.0)?;
        let tx = modes.clone();
        gui.control(button)
            .text(text)
            .corners(&[4.0])
            .on_action(move |e: &ActionEvent| {
                if e.is_final {
                    tx.send(intent);
                }
            });
    }
    Ok(Subtree::new([panel]))
}

fn build_editor(gui: &mut Gui, modes: &IntentSender) -> Result<Subtree, Box<dyn Error>> {
    let panel = gui.create(ControlKind::Panel, "editor", 20.0, 20.0, 400.0, 300.0)?;
    gui.control(panel).constrained(true);

    let title = gui.create_in(panel, ControlKind::TextField, "editor.title", 10.0, 10.0, 200.0, 24.0)?;
    gui.control(title)
        .validator(|text| text.len() <= 24)
        .on_action(|e: &ActionEvent| {
            if let (ActionValue::Text(text), true) = (&e.value, e.is_final) {
                println!("   title committed: {text:?}");
            }
        });

    let volume = gui.create_in(panel, ControlKind::Slider, "editor.volume", 10.0, 50.0, 220.0, 20.0)?;
    gui.control(volume)
        .limits(0.0, 100.0)
        .ticks(5, 1, true)
        .tooltip("Output volume")
        .on_action(|e: &ActionEvent| {
            if e.is_final {
                println!("   volume -> {:?}", e.value);
            }
        });

    let gain = gui.create_in(panel, ControlKind::Slider, "editor.gain", 260.0, 40.0, 120.0, 20.0)?;
    gui.control(gain).orient(Orientation::North);

    let snap = gui.create_in(panel, ControlKind::Checkbox, "editor.snap", 10.0, 90.0, 120.0, 20.0)?;
    gui.control(snap).text("Snap");
    for (row, size) in ["small", "large"].into_iter().enumerate() {
        let option = gui.create_in(
            panel,
            ControlKind::OptionButton,
            &format!("editor.{size}"),
            10.0,
            120.0 + row as f32 * 26.0,
            120.0,
            20.0,
        )?;
        gui.control(option).text(size).group("size").selected(row == 0);
    }

    let back = gui.create_in(panel, ControlKind::Button, "editor.back", 290.0, 260.0, 100.0, 30.0)?;
    let tx = modes.clone();
    gui.control(back).text("Back").on_action(move |e: &ActionEvent| {
        if e.is_final {
            tx.send(Intent::Back);
        }
    });

    let pane = gui.create_pane("editor.tools", Side::East)?;
    let tab = gui.add_tab(pane, "editor.tools.tab", "Tools")?;
    gui.control(pane).on_action(|e: &ActionEvent| println!("   tools pane -> {:?}", e.value));
    // The pane itself is left out: showing a pane opens it, and it should
    // only open from its tab.
    Ok(Subtree::new([panel, tab]))
}

fn checkerboard(width: u32, height: u32) -> Surface {
    let mut surface = Surface::new(width, height);
    for y in (0..height).step_by(32) {
        for x in (0..width).step_by(32) {
            let color = if (x / 32 + y / 32) % 2 == 0 { Rgba::hex(0x3a_5f_8f) } else { Rgba::hex(0xd0_d8_e0) };
            surface.fill_rect(Rect::new(x as f32, y as f32, 32.0, 32.0), color, prism::core::BlendMode::Replace);
        }
    }
    surface
}

fn build_preview(gui: &mut Gui, modes: &IntentSender) -> Result<(Subtree, ControlId), Box<dyn Error>> {
    let viewer = gui.create(ControlKind::Viewer, "preview", 20.0, 20.0, 400.0, 300.0)?;
    let across = gui.create(ControlKind::Scroller, "preview.across", 20.0, 325.0, 400.0, 16.0)?;
    let down = gui.create(ControlKind::Scroller, "preview.down", 425.0, 20.0, 300.0, 16.0)?;
    gui.control(down).orient(Orientation::South);
    gui.control(viewer)
        .content(Arc::new(checkerboard(1024, 768)))
        .link(across, Axis::Horizontal)
        .link(down, Axis::Vertical)
        .tooltip("Drag to pan");

    let back = gui.create(ControlKind::Button, "preview.back", 460.0, 340.0, 100.0, 30.0)?;
    let tx = modes.clone();
    gui.control(back).text("Back").on_action(move |e: &ActionEvent| {
        if e.is_final {
            tx.send(Intent::Back);
        }
    });
    Ok((Subtree::new([viewer, across, down, back]), viewer))
}

/// Minimal host loop: dispatch, pump intents, draw.
struct Host {
    gui: Gui,
    modes: ModeMachine,
    now: u64,
}

impl Host {
    fn frame(&mut self, label: &str) {
        let switched = self.modes.pump(&mut self.gui);
        self.now += FRAME_MS;
        let stats = self.gui.draw(self.now);
        println!(
            "[{:>5} ms] {:<28} mode={:<8} rebuilt={:<3} composed={:<5}{}",
            self.now,
            label,
            self.modes.kind().name(),
            stats.rebuilt,
            stats.composed,
            if switched > 0 { "  (mode switched)" } else { "" },
        );
    }

    fn click(&mut self, label: &str, x: f32, y: f32) {
        self.gui.dispatch_pointer(PointerEvent::moved(x, y));
        self.gui.dispatch_pointer(PointerEvent::down(x, y));
        self.gui.dispatch_pointer(PointerEvent::up(x, y));
        self.frame(label);
    }

    fn drag(&mut self, label: &str, from: (f32, f32), to: (f32, f32)) {
        self.gui.dispatch_pointer(PointerEvent::down(from.0, from.1));
        for step in 1..=4 {
            let t = step as f32 / 4.0;
            self.gui
                .dispatch_pointer(PointerEvent::moved(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t));
        }
        self.gui.dispatch_pointer(PointerEvent::up(to.0, to.1));
        self.frame(label);
    }

    fn hover(&mut self, label: &str, x: f32, y: f32, frames: u32) {
        self.gui.dispatch_pointer(PointerEvent::moved(x, y));
        for _ in 0..frames {
            self.frame(label);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    PRISM HEADLESS DEMO");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    let config = GuiConfig::from_toml_str(CONFIG)?;
    let mut gui = Gui::new(config)?;

    // Screens post into the queue before the machine that drains it exists.
    let queue = IntentQueue::default();
    let tx = queue.sender();
    let menu = build_menu(&mut gui, &tx)?;
    let editor = build_editor(&mut gui, &tx)?;
    let (preview, viewer) = build_preview(&mut gui, &tx)?;
    let modes = ModeMachine::with_queue(
        &mut gui,
        Mode::Menu(menu),
        [Mode::Editor(editor), Mode::Preview(preview)],
        queue,
    )?;

    println!("   ✓ {} controls, {} pick keys live", gui.len(), gui.live_keys());
    println!();

    let mut host = Host { gui, modes, now: 0 };
    host.frame("first frame");
    host.frame("idle");

    host.click("menu: Edit", 320.0, 140.0);

    host.click("focus title", 60.0, 40.0);
    for ch in "Level one".chars() {
        host.gui.dispatch_key(KeyEvent::typed(ch));
    }
    host.gui.dispatch_key(KeyEvent::pressed(Key::Enter));
    host.frame("typed title");

    host.drag("drag volume", (130.0, 80.0), (230.0, 80.0));
    host.hover("hover volume", 60.0, 80.0, 25);
    host.click("tools tab", 630.0, 25.0);
    host.click("tools tab again", 450.0, 25.0);
    // The panel moves by (40, 30); its Back button follows.
    host.drag("drag editor panel", (300.0, 200.0), (340.0, 230.0));
    host.click("editor: Back", 400.0, 325.0);

    host.click("menu: Preview", 320.0, 200.0);
    host.drag("pan preview", (200.0, 200.0), (120.0, 140.0));
    host.gui.dispatch_pointer(PointerEvent::wheel(200.0, 200.0, 1.0));
    host.frame("wheel preview");
    println!("   view center: {:?}", host.gui.value(viewer));

    host.click("preview: Back", 500.0, 355.0);
    host.click("menu: Quit", 320.0, 260.0);

    println!();
    println!("   quit requested: {}", host.modes.should_quit());
    println!("   frames drawn:   {}", host.now / FRAME_MS);
    Ok(())
}
