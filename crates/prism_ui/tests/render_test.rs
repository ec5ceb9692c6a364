//! Dual-buffer rendering: dirty minimality, pick-surface occlusion and pick
//! key uniqueness.

use std::collections::HashSet;

use prism_core::{PickKey, Rgba};
use prism_ui::{ControlId, ControlKind, Gui, PointerEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_nothing_rebuilt_when_nothing_changed() {
    let mut gui = Gui::with_size(640, 480);
    let ids: Vec<ControlId> = (0..24)
        .map(|i| {
            let (x, y) = ((i % 6) as f32 * 100.0, (i / 6) as f32 * 40.0);
            gui.create(ControlKind::Button, &format!("b{i}"), x, y, 90.0, 30.0)
                .unwrap()
        })
        .collect();

    let first = gui.draw(0);
    assert_eq!(first.rebuilt, ids.len());
    assert!(first.composed);

    let second = gui.draw(16);
    assert_eq!(second.rebuilt, 0);
    assert!(!second.composed);
    assert_eq!(second.frame, first.frame + 1);

    // Hovering one control rebuilds exactly that control.
    gui.dispatch_pointer(PointerEvent::moved(10.0, 10.0));
    let third = gui.draw(32);
    assert_eq!(third.rebuilt, 1);
    assert!(third.composed);

    // Moving marks the control dirty.
    gui.move_to(ids[5], 500.0, 400.0).unwrap();
    let fourth = gui.draw(48);
    assert_eq!(fourth.rebuilt, 1);
    assert!(fourth.composed);
    assert_eq!(gui.draw(64).rebuilt, 0);
}

#[test]
fn test_hidden_controls_are_not_rebuilt() {
    let mut gui = Gui::with_size(200, 100);
    let b = gui
        .create(ControlKind::Button, "b", 0.0, 0.0, 50.0, 20.0)
        .unwrap();
    gui.hide(b).unwrap();
    gui.set_text(b, "later").unwrap();
    assert_eq!(gui.draw(0).rebuilt, 0);
    assert!(gui.get(b).unwrap().is_dirty());

    gui.show(b).unwrap();
    assert_eq!(gui.draw(16).rebuilt, 1);
}

#[test]
fn test_topmost_pick_wins() {
    let mut gui = Gui::with_size(300, 200);
    let below = gui
        .create(ControlKind::Button, "below", 10.0, 10.0, 100.0, 30.0)
        .unwrap();
    let above = gui
        .create(ControlKind::Button, "above", 50.0, 20.0, 100.0, 30.0)
        .unwrap();
    gui.draw(0);
    assert_eq!(gui.hit_test(60.0, 25.0).map(|h| h.0), Some(above));
    assert_eq!(gui.hit_test(20.0, 15.0).map(|h| h.0), Some(below));

    gui.to_front(below).unwrap();
    gui.draw(16);
    assert_eq!(gui.hit_test(60.0, 25.0).map(|h| h.0), Some(below));

    gui.hide(below).unwrap();
    gui.draw(32);
    assert_eq!(gui.hit_test(60.0, 25.0).map(|h| h.0), Some(above));
    assert_eq!(gui.hit_test(20.0, 15.0), None);

    // A disabled control still occludes but never resolves.
    gui.show(below).unwrap();
    gui.disable(below).unwrap();
    gui.draw(48);
    assert_eq!(gui.hit_test(60.0, 25.0), None);
    assert_eq!(gui.pick_surface().sample(60.0, 25.0), Some(Rgba::BLACK));
    assert_eq!(gui.hit_test(140.0, 45.0).map(|h| h.0), Some(above));
}

#[test]
fn test_transparent_container_lets_pointer_through() {
    let mut gui = Gui::with_size(300, 200);
    let back = gui
        .create(ControlKind::Button, "back", 0.0, 0.0, 300.0, 200.0)
        .unwrap();
    let panel = gui
        .create(ControlKind::Panel, "panel", 50.0, 50.0, 150.0, 100.0)
        .unwrap();
    let inner = gui
        .create_in(panel, ControlKind::Button, "inner", 10.0, 10.0, 40.0, 20.0)
        .unwrap();
    gui.control(panel).transparent();
    gui.draw(0);

    assert_eq!(gui.hit_test(65.0, 65.0).map(|h| h.0), Some(inner));
    assert_eq!(gui.hit_test(150.0, 120.0).map(|h| h.0), Some(back));

    gui.set_opaque(panel, true).unwrap();
    gui.draw(16);
    assert_eq!(gui.hit_test(150.0, 120.0).map(|h| h.0), Some(panel));
}

#[test]
fn test_slider_thumb_has_its_own_part() {
    let mut gui = Gui::with_size(300, 100);
    let s = gui
        .create(ControlKind::Slider, "s", 0.0, 0.0, 120.0, 20.0)
        .unwrap();
    gui.draw(0);
    // Value 0.5: thumb centered at x = 10 + 0.5 * 100.
    assert_eq!(gui.hit_test(60.0, 10.0), Some((s, prism_ui::PART_THUMB)));
    assert_eq!(gui.hit_test(15.0, 10.0), Some((s, prism_ui::PART_TRACK)));
}

#[test]
fn test_pick_keys_never_collide() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut gui = Gui::with_size(800, 600);
    let mut live: Vec<ControlId> = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();

    for step in 0..600 {
        if live.is_empty() || rng.gen_bool(0.6) {
            let x = rng.gen_range(0.0..700.0);
            let y = rng.gen_range(0.0..550.0);
            let id = gui
                .create(ControlKind::Label, &format!("c{step}"), x, y, 40.0, 20.0)
                .unwrap();
            let key = gui.get(id).unwrap().key();
            assert!(seen.insert(key.serial()), "serial {} reused", key.serial());
            assert_eq!(gui.key_owner(key), Some(id));
            live.push(id);
        } else {
            let victim = live.swap_remove(rng.gen_range(0..live.len()));
            let key = gui.get(victim).unwrap().key();
            assert!(gui.destroy(victim));
            assert_eq!(gui.key_owner(key), None);
        }
        assert_eq!(gui.live_keys(), live.len());
        assert_eq!(gui.len(), live.len());
    }

    // Every visible pick pixel decodes to a live control.
    gui.draw(0);
    let pick = gui.pick_surface();
    for y in (0..pick.height()).step_by(7) {
        for x in (0..pick.width()).step_by(7) {
            let Some(pixel) = pick.get(x, y) else { continue };
            if let Some((key, _)) = PickKey::decode(pixel) {
                let owner = gui.key_owner(key).expect("stale key on pick surface");
                assert!(live.contains(&owner));
            }
        }
    }
}
