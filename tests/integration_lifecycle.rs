use std::time::{Duration, Instant};

use term_desk::apps::AppId;
use term_desk::constants::CLOSE_ANIMATION;
use term_desk::content::{ContentBody, ContentDispatcher};
use term_desk::registry::{Lifecycle, WindowEvent, WindowRegistry};
use term_desk::taskbar::Taskbar;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

fn fixture(dir: &TempDir) -> (WindowRegistry, ContentDispatcher) {
    let registry = WindowRegistry::with_seed(42);
    let dispatcher = ContentDispatcher::new(dir.path().to_path_buf(), None);
    (registry, dispatcher)
}

fn drain_into(registry: &mut WindowRegistry, taskbar: &mut Taskbar) {
    let events = registry.take_events();
    taskbar.apply(&events);
}

#[test]
fn double_open_leaves_one_record_and_one_taskbar_entry() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);
    let mut taskbar = Taskbar::new();

    registry.open(AppId::Notes, &mut dispatcher);
    registry.open(AppId::Notes, &mut dispatcher);
    drain_into(&mut registry, &mut taskbar);

    assert_eq!(registry.len(), 1);
    assert_eq!(taskbar.entries().len(), 1);
    assert_eq!(taskbar.entries()[0].app, AppId::Notes);
}

#[test]
fn second_open_does_not_recreate_the_editor() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);

    registry.open(AppId::Notes, &mut dispatcher);
    // type into the live editor so a recreated instance would be detectable
    if let Some(record) = registry.get_mut(AppId::Notes) {
        if let ContentBody::Editor(editor) = &mut record.content {
            editor.new_file();
            editor.handle_key(&KeyEvent::new(KeyCode::Char('!'), KeyModifiers::NONE));
        } else {
            panic!("notes should carry an editor body");
        }
    }

    registry.open(AppId::Notes, &mut dispatcher);
    let record = registry.get(AppId::Notes).expect("record survives");
    let ContentBody::Editor(editor) = &record.content else {
        panic!("editor body replaced");
    };
    assert!(editor.content().starts_with('!'));
    assert_eq!(registry.topmost(), Some(AppId::Notes));
}

#[test]
fn most_recently_raised_window_strictly_dominates_z() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);

    registry.open(AppId::Files, &mut dispatcher);
    registry.open(AppId::Music, &mut dispatcher);
    registry.open(AppId::Photos, &mut dispatcher);

    for focus in [AppId::Music, AppId::Files, AppId::Photos, AppId::Files] {
        registry.focus(focus);
        let top_z = registry.get(focus).unwrap().z();
        for record in registry.records() {
            if record.app != focus && !record.is_minimized() {
                assert!(record.z() < top_z, "{} not below {}", record.app, focus);
            }
        }
        assert_eq!(registry.topmost(), Some(focus));
    }
}

#[test]
fn close_is_idempotent_and_tears_down_content_once() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);
    let mut taskbar = Taskbar::new();

    registry.open(AppId::Notes, &mut dispatcher);
    drain_into(&mut registry, &mut taskbar);

    // dirty the editor so teardown has something to flush
    if let Some(record) = registry.get_mut(AppId::Notes) {
        if let ContentBody::Editor(editor) = &mut record.content {
            editor.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        }
    }

    // taskbar close and in-window close land in quick succession
    registry.close(AppId::Notes);
    registry.close(AppId::Notes);

    {
        let record = registry.get(AppId::Notes).unwrap();
        assert!(record.is_closing());
        let ContentBody::Editor(editor) = &record.content else {
            panic!("editor body expected");
        };
        assert!(editor.is_torn_down());
        assert!(!editor.is_dirty(), "teardown flushes the buffer");
    }
    // exactly one save notice from the teardown flush
    assert_eq!(registry.take_notices().len(), 1);

    registry.on_frame(Instant::now() + CLOSE_ANIMATION + Duration::from_millis(1), None);
    drain_into(&mut registry, &mut taskbar);
    assert!(!registry.contains(AppId::Notes));
    assert!(taskbar.entries().is_empty());

    // closing again after removal stays a no-op
    registry.close(AppId::Notes);
    assert!(registry.take_events().is_empty());
}

#[test]
fn taskbar_entries_always_equal_live_records() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);
    let mut taskbar = Taskbar::new();

    let apps = [AppId::Files, AppId::Music, AppId::Browser, AppId::Games];
    for app in apps {
        registry.open(app, &mut dispatcher);
        drain_into(&mut registry, &mut taskbar);
        assert_entries_match(&registry, &taskbar);
    }

    registry.minimize(AppId::Music);
    drain_into(&mut registry, &mut taskbar);
    // minimized windows keep their record and their button
    assert_entries_match(&registry, &taskbar);

    registry.close(AppId::Files);
    registry.close(AppId::Browser);
    registry.on_frame(Instant::now() + CLOSE_ANIMATION + Duration::from_millis(1), None);
    drain_into(&mut registry, &mut taskbar);
    assert_entries_match(&registry, &taskbar);
}

fn assert_entries_match(registry: &WindowRegistry, taskbar: &Taskbar) {
    let mut records: Vec<AppId> = registry.records().map(|r| r.app).collect();
    let mut entries: Vec<AppId> = taskbar.entries().iter().map(|e| e.app).collect();
    records.sort();
    entries.sort();
    assert_eq!(records, entries);
}

#[test]
fn minimize_then_focus_returns_to_active_on_top_without_recreating() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);

    registry.open(AppId::Notes, &mut dispatcher);
    registry.open(AppId::Files, &mut dispatcher);
    if let Some(record) = registry.get_mut(AppId::Notes) {
        if let ContentBody::Editor(editor) = &mut record.content {
            editor.new_file();
        }
    }
    let file_before = match &registry.get(AppId::Notes).unwrap().content {
        ContentBody::Editor(editor) => editor.file_name().to_string(),
        _ => panic!("editor body expected"),
    };

    registry.minimize(AppId::Notes);
    assert_eq!(
        registry.get(AppId::Notes).unwrap().lifecycle(),
        Lifecycle::Minimized
    );
    assert!(!registry.draw_order().contains(&AppId::Notes));

    registry.focus(AppId::Notes);
    let record = registry.get(AppId::Notes).unwrap();
    assert_eq!(record.lifecycle(), Lifecycle::Active);
    assert_eq!(registry.topmost(), Some(AppId::Notes));
    match &record.content {
        ContentBody::Editor(editor) => assert_eq!(editor.file_name(), file_before),
        _ => panic!("editor body expected"),
    }
}

#[test]
fn open_while_closing_does_not_resurrect_the_window() {
    let dir = TempDir::new().unwrap();
    let (mut registry, mut dispatcher) = fixture(&dir);

    registry.open(AppId::Files, &mut dispatcher);
    registry.close(AppId::Files);
    registry.open(AppId::Files, &mut dispatcher);
    assert!(registry.get(AppId::Files).unwrap().is_closing());

    registry.on_frame(Instant::now() + CLOSE_ANIMATION + Duration::from_millis(1), None);
    assert!(!registry.contains(AppId::Files));
    registry.take_events();

    // once removed, opening again creates a fresh window
    registry.open(AppId::Files, &mut dispatcher);
    let events = registry.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        WindowEvent::Opened {
            app: AppId::Files,
            ..
        }
    )));
}
