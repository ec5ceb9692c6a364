//! Containers and deferred work: side panes with their tabs, tooltip timers
//! and viewers panned through linked scrollers.

use std::sync::Arc;

use parking_lot::Mutex;
use prism_core::{Orientation, Surface};
use prism_ui::{ActionEvent, ActionValue, Axis, ControlId, ControlKind, Gui, GuiError, PointerEvent, Side};

fn click(gui: &mut Gui, x: f32, y: f32) {
    gui.dispatch_pointer(PointerEvent::down(x, y));
    gui.dispatch_pointer(PointerEvent::up(x, y));
}

fn origin(gui: &Gui, id: ControlId) -> (f32, f32) {
    let r = gui.get(id).unwrap().rect();
    (r.x, r.y)
}

// =============================================================================
// Panes
// =============================================================================

#[test]
fn test_tab_toggles_its_pane() {
    let mut gui = Gui::with_size(800, 600);
    let pane = gui.create_pane("tools", Side::East).unwrap();
    let tab = gui.add_tab(pane, "tools.tab", "Tools").unwrap();
    let log: Arc<Mutex<Vec<ActionEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    gui.set_action(pane, move |e| sink.lock().push(e.clone())).unwrap();

    assert!(!gui.is_pane_open(pane));
    assert!(!gui.get(pane).unwrap().is_visible());
    let t = gui.get(tab).unwrap();
    assert_eq!(t.orientation(), Orientation::North);
    // "Tools": 5 glyphs * 7 + 2 * 4 padding, 12 + 2 * 4 tall, turned upright.
    assert_eq!((t.rect().width, t.rect().height), (43.0, 20.0));
    assert_eq!((t.footprint().width, t.footprint().height), (20.0, 43.0));
    assert_eq!(origin(&gui, tab), (780.0, 4.0));

    click(&mut gui, 790.0, 25.0);
    assert!(gui.is_pane_open(pane));
    assert!(gui.get(pane).unwrap().is_visible());
    assert_eq!(origin(&gui, tab), (580.0, 4.0));
    {
        let log = log.lock();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].value, ActionValue::Open(true));
        assert!(log[0].is_final);
    }

    // The tab stays above the open pane.
    gui.draw(0);
    assert_eq!(gui.hit_test(590.0, 25.0).map(|h| h.0), Some(tab));
    assert_eq!(gui.hit_test(700.0, 300.0).map(|h| h.0), Some(pane));

    click(&mut gui, 590.0, 25.0);
    assert!(!gui.is_pane_open(pane));
    assert_eq!(origin(&gui, tab), (780.0, 4.0));
    assert_eq!(log.lock().last().unwrap().value, ActionValue::Open(false));
}

#[test]
fn test_one_open_pane_per_side() {
    let mut gui = Gui::with_size(800, 600);
    let first = gui.create_pane("first", Side::East).unwrap();
    let second = gui.create_pane("second", Side::East).unwrap();
    let bottom = gui.create_pane("bottom", Side::South).unwrap();
    let t1 = gui.add_tab(first, "first.tab", "One").unwrap();
    let t2 = gui.add_tab(second, "second.tab", "Two").unwrap();

    // Tabs stack down the edge in creation order.
    let fp1 = gui.get(t1).unwrap().footprint();
    assert_eq!(origin(&gui, t2), (780.0, 4.0 + fp1.height + 4.0));

    gui.open_pane(first, true).unwrap();
    gui.open_pane(bottom, true).unwrap();
    gui.open_pane(second, true).unwrap();
    assert!(!gui.is_pane_open(first));
    assert!(gui.is_pane_open(second));
    assert!(gui.is_pane_open(bottom));

    // show() on a pane goes through the same path.
    gui.show(first).unwrap();
    assert!(gui.is_pane_open(first));
    assert!(!gui.is_pane_open(second));
    assert!(!gui.get(second).unwrap().is_visible());
}

#[test]
fn test_retexting_a_tab_restacks_the_side() {
    let mut gui = Gui::with_size(800, 600);
    let first = gui.create_pane("first", Side::East).unwrap();
    let second = gui.create_pane("second", Side::East).unwrap();
    let t1 = gui.add_tab(first, "first.tab", "One").unwrap();
    let t2 = gui.add_tab(second, "second.tab", "Two").unwrap();

    let before = gui.get(t1).unwrap().footprint().height;
    let (x, y) = origin(&gui, t2);
    assert_eq!(before, 29.0);

    gui.set_text(t1, "Longer").unwrap();
    let after = gui.get(t1).unwrap().footprint().height;
    assert_eq!(after, 50.0);
    assert_eq!(origin(&gui, t2), (x, y + (after - before)));
    assert_eq!(origin(&gui, t1), (780.0, 4.0));

    // The strip is hit where it was laid out.
    gui.draw(0);
    assert_eq!(gui.hit_test(790.0, y + 21.0 + 5.0).map(|h| h.0), Some(t2));
}

#[test]
fn test_panes_are_built_through_their_own_constructors() {
    let mut gui = Gui::with_size(800, 600);
    for kind in [ControlKind::Pane, ControlKind::PaneTab, ControlKind::Tooltip] {
        assert!(matches!(
            gui.create(kind, "x", 0.0, 0.0, 10.0, 10.0),
            Err(GuiError::InvalidArgument { .. })
        ));
    }
    let button = gui.create(ControlKind::Button, "b", 0.0, 0.0, 10.0, 10.0).unwrap();
    assert!(gui.add_tab(button, "b.tab", "B").is_err());
    assert_eq!(gui.len(), 1);
}

#[test]
fn test_destroying_a_pane_removes_its_tabs() {
    let mut gui = Gui::with_size(800, 600);
    let left = gui.create_pane("left", Side::West).unwrap();
    let tab = gui.add_tab(left, "left.tab", "Left").unwrap();
    let other = gui.create_pane("right", Side::East).unwrap();
    gui.add_tab(other, "right.tab", "Right").unwrap();
    assert_eq!(gui.len(), 4);

    gui.open_pane(left, true).unwrap();
    assert_eq!(origin(&gui, tab), (200.0, 4.0));
    assert!(gui.destroy(left));
    assert!(!gui.contains(tab));
    assert_eq!(gui.len(), 2);
    assert!(gui.find("left.tab").is_none());

    // The freed names can be used again.
    let again = gui.create_pane("left", Side::West).unwrap();
    gui.add_tab(again, "left.tab", "Left").unwrap();
    assert_eq!(gui.len(), 4);
    gui.draw(0);
}

// =============================================================================
// Tooltips
// =============================================================================

fn with_tooltip() -> (Gui, ControlId, ControlId) {
    let mut gui = Gui::with_size(800, 600);
    let owner = gui.create(ControlKind::Button, "save", 10.0, 10.0, 100.0, 30.0).unwrap();
    let tip = gui.set_tooltip(owner, "Save the file").unwrap();
    (gui, owner, tip)
}

#[test]
fn test_tooltip_appears_after_delay_and_expires() {
    let (mut gui, owner, tip) = with_tooltip();
    assert_eq!(gui.find("save.tooltip"), Some(tip));
    assert!(!gui.get(tip).unwrap().is_visible());

    gui.dispatch_pointer(PointerEvent::moved(20.0, 20.0));
    assert_eq!(gui.hovered(), Some(owner));
    gui.draw(100);
    assert!(!gui.get(tip).unwrap().is_visible());

    gui.draw(400);
    assert!(gui.get(tip).unwrap().is_visible());
    assert_eq!(origin(&gui, tip), (10.0, 44.0));
    // Tooltips never take the pointer.
    assert_eq!(gui.hit_test(15.0, 50.0), None);

    gui.draw(2899);
    assert!(gui.get(tip).unwrap().is_visible());
    gui.draw(2900);
    assert!(!gui.get(tip).unwrap().is_visible());
}

#[test]
fn test_latest_tooltip_request_wins() {
    let (mut gui, _owner, tip) = with_tooltip();
    gui.dispatch_pointer(PointerEvent::moved(20.0, 20.0));
    gui.advance(100);
    gui.dispatch_pointer(PointerEvent::moved(300.0, 300.0));
    assert_eq!(gui.hovered(), None);
    gui.draw(500);
    gui.draw(5000);
    assert!(!gui.get(tip).unwrap().is_visible());
}

#[test]
fn test_pressing_hides_the_tooltip() {
    let (mut gui, _owner, tip) = with_tooltip();
    gui.dispatch_pointer(PointerEvent::moved(20.0, 20.0));
    gui.draw(400);
    assert!(gui.get(tip).unwrap().is_visible());
    gui.dispatch_pointer(PointerEvent::down(20.0, 20.0));
    gui.draw(416);
    assert!(!gui.get(tip).unwrap().is_visible());
}

#[test]
fn test_tooltip_survives_its_owner_going_away() {
    let (mut gui, owner, tip) = with_tooltip();
    gui.dispatch_pointer(PointerEvent::moved(20.0, 20.0));
    gui.draw(100);
    assert!(gui.destroy(owner));
    assert!(!gui.contains(tip));
    gui.draw(400);
    gui.draw(3000);
    assert_eq!(gui.len(), 0);
    assert_eq!(gui.live_keys(), 0);
}

#[test]
fn test_hidden_owner_ignores_pending_show() {
    let (mut gui, owner, tip) = with_tooltip();
    gui.dispatch_pointer(PointerEvent::moved(20.0, 20.0));
    gui.draw(100);
    gui.hide(owner).unwrap();
    gui.draw(400);
    assert!(!gui.get(tip).unwrap().is_visible());
}

#[test]
fn test_tooltip_retext_reuses_the_control() {
    let (mut gui, owner, tip) = with_tooltip();
    let before = gui.get(tip).unwrap().rect().width;
    assert_eq!(gui.set_tooltip(owner, "Save").unwrap(), tip);
    assert_eq!(gui.get(tip).unwrap().text(), Some("Save"));
    assert!(gui.get(tip).unwrap().rect().width < before);

    gui.remove_tooltip(owner).unwrap();
    assert!(!gui.contains(tip));
    assert_eq!(gui.get(owner).unwrap().tooltip(), None);
}

// =============================================================================
// Viewer
// =============================================================================

fn viewer_with_scrollers() -> (Gui, ControlId, ControlId, ControlId) {
    let mut gui = Gui::with_size(400, 300);
    let viewer = gui.create(ControlKind::Viewer, "map", 0.0, 0.0, 200.0, 100.0).unwrap();
    let across = gui.create(ControlKind::Scroller, "across", 0.0, 110.0, 200.0, 20.0).unwrap();
    let down = gui.create(ControlKind::Scroller, "down", 210.0, 0.0, 100.0, 20.0).unwrap();
    gui.orient(down, Orientation::South).unwrap();
    gui.set_content(viewer, Arc::new(Surface::new(400, 300))).unwrap();
    gui.link_scroller(viewer, across, Axis::Horizontal).unwrap();
    gui.link_scroller(viewer, down, Axis::Vertical).unwrap();
    (gui, viewer, across, down)
}

fn scroll(gui: &Gui, id: ControlId) -> (f32, f32) {
    match gui.value(id) {
        Some(ActionValue::Scroll { value, used }) => (value, used),
        other => panic!("not a scroller value: {other:?}"),
    }
}

#[test]
fn test_linked_scrollers_track_the_view() {
    let (gui, viewer, across, down) = viewer_with_scrollers();
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 200.0, y: 150.0 }));
    assert_eq!(scroll(&gui, across), (0.5, 0.5));
    let (value, used) = scroll(&gui, down);
    assert!((value - 0.5).abs() < 1e-6);
    assert!((used - 100.0 / 300.0).abs() < 1e-6);
}

#[test]
fn test_wheel_and_drag_pan_the_view() {
    let (mut gui, viewer, across, down) = viewer_with_scrollers();
    let log: Arc<Mutex<Vec<ActionEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    gui.control(viewer).on_action(move |e| sink.lock().push(e.clone()));

    gui.dispatch_pointer(PointerEvent::wheel(50.0, 50.0, 1.0));
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 200.0, y: 170.0 }));
    assert!((scroll(&gui, down).0 - 170.0 / 300.0).abs() < 1e-6);
    assert!(log.lock()[0].is_final);

    gui.dispatch_pointer(PointerEvent::down(50.0, 50.0));
    gui.dispatch_pointer(PointerEvent::moved(30.0, 50.0));
    gui.dispatch_pointer(PointerEvent::up(30.0, 50.0));
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 220.0, y: 170.0 }));
    assert!((scroll(&gui, across).0 - 220.0 / 400.0).abs() < 1e-6);

    // Panning far past the content edge stops at the edge.
    gui.dispatch_pointer(PointerEvent::down(50.0, 50.0));
    gui.dispatch_pointer(PointerEvent::moved(-500.0, 50.0));
    gui.dispatch_pointer(PointerEvent::up(-500.0, 50.0));
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 300.0, y: 170.0 }));

    let log = log.lock();
    assert_eq!(log.iter().filter(|e| e.is_final).count(), 3);
}

#[test]
fn test_scroller_pans_its_viewer() {
    let (mut gui, viewer, across, _down) = viewer_with_scrollers();
    gui.set_value(across, 0.75).unwrap();
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 300.0, y: 150.0 }));
    gui.set_value(across, 0.0).unwrap();
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 100.0, y: 150.0 }));

    // Neither side owns the other.
    assert!(gui.destroy(viewer));
    gui.set_value(across, 0.5).unwrap();
    assert_eq!(scroll(&gui, across).0, 0.5);
}

#[test]
fn test_thumb_drag_pans_the_viewer() {
    let (mut gui, viewer, across, _down) = viewer_with_scrollers();
    // Thumb spans 50..150 of the 200 wide track.
    gui.dispatch_pointer(PointerEvent::down(100.0, 120.0));
    gui.dispatch_pointer(PointerEvent::moved(120.0, 120.0));
    assert!((scroll(&gui, across).0 - 0.6).abs() < 1e-6);
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 240.0, y: 150.0 }));

    gui.dispatch_pointer(PointerEvent::moved(400.0, 120.0));
    gui.dispatch_pointer(PointerEvent::up(400.0, 120.0));
    assert_eq!(scroll(&gui, across).0, 0.75);
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 300.0, y: 150.0 }));
}

#[test]
fn test_relinking_an_axis_releases_the_old_scroller() {
    let (mut gui, viewer, across, _down) = viewer_with_scrollers();
    let spare = gui.create(ControlKind::Scroller, "spare", 0.0, 140.0, 200.0, 20.0).unwrap();
    gui.link_scroller(viewer, spare, Axis::Horizontal).unwrap();
    assert_eq!(scroll(&gui, spare), (0.5, 0.5));

    // The replaced scroller no longer drives the view.
    gui.set_value(across, 0.25).unwrap();
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 200.0, y: 150.0 }));

    // The new one does, and follows panning.
    gui.set_value(spare, 0.25).unwrap();
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 100.0, y: 150.0 }));
    gui.dispatch_pointer(PointerEvent::down(50.0, 50.0));
    gui.dispatch_pointer(PointerEvent::moved(10.0, 50.0));
    gui.dispatch_pointer(PointerEvent::up(10.0, 50.0));
    assert_eq!(gui.value(viewer), Some(ActionValue::View { x: 140.0, y: 150.0 }));
    assert!((scroll(&gui, spare).0 - 140.0 / 400.0).abs() < 1e-6);
    assert_eq!(scroll(&gui, across).0, 0.25);
}
