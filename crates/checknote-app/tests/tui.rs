use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use checknote_app::tui::{ScrollViewport, map_key};
use checknote_session::input::InputEvent;
use checknote_session::navigation::Key;
use checknote_session::ports::Viewport;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[test]
fn plain_keys_map_to_session_keys() {
    assert_eq!(
        map_key(press(KeyCode::Char('b'), KeyModifiers::NONE)),
        Some(InputEvent::Key(Key::Char('b')))
    );
    assert_eq!(
        map_key(press(KeyCode::Char('B'), KeyModifiers::SHIFT)),
        Some(InputEvent::Key(Key::Char('B')))
    );
    assert_eq!(
        map_key(press(KeyCode::Down, KeyModifiers::NONE)),
        Some(InputEvent::Key(Key::Down))
    );
    assert_eq!(
        map_key(press(KeyCode::Esc, KeyModifiers::NONE)),
        Some(InputEvent::Key(Key::Escape))
    );
    assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), None);
}

#[test]
fn control_chords_map_to_commands() {
    assert_eq!(
        map_key(press(KeyCode::Char('y'), KeyModifiers::CONTROL)),
        Some(InputEvent::CopyNote)
    );
    assert_eq!(
        map_key(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
        Some(InputEvent::Reset)
    );
    assert_eq!(
        map_key(press(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        Some(InputEvent::Quit)
    );
    assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
}

#[test]
fn key_release_is_ignored() {
    let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
    event.kind = KeyEventKind::Release;
    assert_eq!(map_key(event), None);
}

#[test]
fn viewport_centers_rows_that_leave_the_screen() {
    let mut viewport = ScrollViewport::default();
    viewport.set_height(10);

    viewport.bring_into_view(4);
    assert_eq!(viewport.offset(), 0);

    viewport.bring_into_view(15);
    assert_eq!(viewport.offset(), 10);

    viewport.bring_into_view(12);
    assert_eq!(viewport.offset(), 10);

    viewport.bring_into_view(2);
    assert_eq!(viewport.offset(), 0);
}
