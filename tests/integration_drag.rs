use std::path::PathBuf;
use std::time::Instant;

use term_desk::apps::AppId;
use term_desk::content::ContentDispatcher;
use term_desk::drag::DragController;
use term_desk::geometry::CellRect;
use term_desk::registry::WindowRegistry;

fn fixture() -> (WindowRegistry, ContentDispatcher, DragController) {
    let registry = WindowRegistry::with_seed(5);
    let dispatcher = ContentDispatcher::new(PathBuf::from("/tmp/term-desk-drag-it"), None);
    (registry, dispatcher, DragController::new())
}

fn origin(registry: &WindowRegistry, app: AppId) -> (i32, i32) {
    let g = registry.get(app).unwrap().geometry;
    (g.x, g.y)
}

#[test]
fn full_drag_commits_exactly_the_pointer_travel() {
    let (mut registry, mut dispatcher, mut drag) = fixture();
    registry.open(AppId::Files, &mut dispatcher);
    registry.set_geometry(AppId::Files, CellRect::new(12, 4, 40, 14));

    let (px, py) = (20u16, 5u16);
    let (qx, qy) = (55u16, 17u16);
    assert!(drag.begin(&mut registry, AppId::Files, px, py));

    // a noisy pointer path; every intermediate burst is coalesced per tick
    for (col, row) in [(22, 6), (27, 7), (26, 9), (33, 10), (41, 13), (50, 15)] {
        drag.pointer_move(col, row);
        if col % 2 == 1 {
            drag.on_frame(&mut registry);
            registry.on_frame(Instant::now(), drag.target());
        }
    }
    drag.pointer_up(&mut registry, qx, qy);

    assert_eq!(
        origin(&registry, AppId::Files),
        (12 + (qx as i32 - px as i32), 4 + (qy as i32 - py as i32)),
        "no drift from frame batching"
    );
    assert!(!drag.is_dragging());
}

#[test]
fn geometry_is_untouched_between_ticks() {
    let (mut registry, mut dispatcher, mut drag) = fixture();
    registry.open(AppId::Files, &mut dispatcher);
    registry.set_geometry(AppId::Files, CellRect::new(12, 4, 40, 14));

    drag.begin(&mut registry, AppId::Files, 20, 5);
    drag.pointer_move(60, 20);
    drag.pointer_move(70, 22);
    assert_eq!(origin(&registry, AppId::Files), (12, 4));

    drag.on_frame(&mut registry);
    // only the latest position landed
    assert_eq!(origin(&registry, AppId::Files), (70 - 8, 22 - 1));
}

#[test]
fn pointer_down_elsewhere_is_ignored_while_a_session_lives() {
    let (mut registry, mut dispatcher, mut drag) = fixture();
    registry.open(AppId::Files, &mut dispatcher);
    registry.open(AppId::Music, &mut dispatcher);
    registry.set_geometry(AppId::Files, CellRect::new(5, 3, 30, 10));
    registry.set_geometry(AppId::Music, CellRect::new(60, 3, 30, 10));

    assert!(drag.begin(&mut registry, AppId::Files, 8, 4));
    assert!(!drag.begin(&mut registry, AppId::Music, 62, 4));
    assert_eq!(drag.target(), Some(AppId::Files));

    // the ignored press did not hijack the session's grab offset
    drag.pointer_move(30, 12);
    drag.on_frame(&mut registry);
    assert_eq!(origin(&registry, AppId::Files), (30 - 3, 12 - 1));
}

#[test]
fn closing_mid_drag_cancels_without_stale_writes() {
    let (mut registry, mut dispatcher, mut drag) = fixture();
    registry.open(AppId::Files, &mut dispatcher);
    registry.set_geometry(AppId::Files, CellRect::new(12, 4, 40, 14));

    drag.begin(&mut registry, AppId::Files, 20, 5);
    drag.pointer_move(90, 30);

    registry.close(AppId::Files);
    drag.cancel_if_target(AppId::Files);

    // the tick after the close must not act on stale state
    drag.on_frame(&mut registry);
    registry.on_frame(Instant::now(), drag.target());
    assert!(!drag.is_dragging());
    assert_eq!(origin(&registry, AppId::Files), (12, 4));

    // a pointer-up arriving after the close is harmless
    drag.pointer_up(&mut registry, 91, 31);
    assert_eq!(origin(&registry, AppId::Files), (12, 4));
}

#[test]
fn new_session_can_start_after_the_previous_one_ends() {
    let (mut registry, mut dispatcher, mut drag) = fixture();
    registry.open(AppId::Files, &mut dispatcher);
    registry.open(AppId::Music, &mut dispatcher);
    registry.set_geometry(AppId::Files, CellRect::new(5, 3, 30, 10));
    registry.set_geometry(AppId::Music, CellRect::new(60, 3, 30, 10));

    drag.begin(&mut registry, AppId::Files, 8, 4);
    drag.pointer_up(&mut registry, 10, 6);
    assert!(drag.begin(&mut registry, AppId::Music, 62, 4));
    assert_eq!(drag.target(), Some(AppId::Music));
}
