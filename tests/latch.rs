//! Latched and locked modifier tests

mod common;
use common::*;

use flickboard::Flags;

fn latched_names(session: &flickboard::Session<RecordingSink>) -> Vec<String> {
    session
        .engine()
        .latched_values()
        .map(|v| v.name().to_string())
        .collect()
}

#[test]
fn test_released_modifier_latches() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");

    assert_eq!(
        calls(&session),
        &[
            Call::Press("shift".to_string(), Flags::empty()),
            Call::FlagsChanged
        ]
    );
    assert_eq!(latched_names(&session), vec!["shift"]);

    let flags = session.engine().flags_of("shift").unwrap();
    assert!(flags.contains(Flags::SHIFT));
    assert!(!flags.contains(Flags::LATCH));
    assert!(session.engine().modifier_flags().contains(Flags::SHIFT));
    assert!(session.engine().is_key_down(key(&session, "shift")));
}

#[test]
fn test_latched_modifier_applies_to_next_key_once() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");
    tap(&mut session, 100, 1, "a");

    match &calls(&session)[2..] {
        [Call::Press(a, press_mods), Call::Release(a2, release_mods)] => {
            assert_eq!(a, "a");
            assert_eq!(a2, "a");
            assert!(press_mods.contains(Flags::SHIFT));
            assert!(release_mods.contains(Flags::SHIFT));
        }
        other => panic!("unexpected calls {:?}", other),
    }
    assert!(session.engine().is_empty());

    tap(&mut session, 200, 1, "b");
    assert_eq!(
        calls(&session).last(),
        Some(&Call::Release("b".to_string(), Flags::empty()))
    );
}

#[test]
fn test_double_tap_locks_lockable_modifier() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");
    tap(&mut session, 100, 1, "shift");

    assert_eq!(calls(&session).len(), 4);
    assert_eq!(calls(&session)[3], Call::FlagsChanged);
    assert_eq!(session.engine().len(), 1);

    let flags = session.engine().flags_of("shift").unwrap();
    assert!(flags.contains(Flags::LOCKED));
    assert!(!flags.contains(Flags::LOCK));

    // Locked keys survive commits
    tap(&mut session, 200, 1, "a");
    tap(&mut session, 300, 1, "b");
    assert_eq!(latched_names(&session), vec!["shift"]);
    for call in calls(&session) {
        if let Call::Release(_, mods) = call {
            assert!(mods.contains(Flags::SHIFT));
        }
    }
}

#[test]
fn test_third_tap_unlocks() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");
    tap(&mut session, 100, 1, "shift");
    tap(&mut session, 200, 1, "shift");

    assert!(session.engine().is_empty());
    assert_eq!(session.sink().releases(), vec!["shift"]);
    assert!(session.engine().modifier_flags().is_empty());
}

#[test]
fn test_double_tap_unlatches_non_lockable_modifier() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "ctrl");
    assert_eq!(latched_names(&session), vec!["ctrl"]);

    tap(&mut session, 100, 1, "ctrl");
    assert!(session.engine().is_empty());
    match calls(&session).last() {
        Some(Call::Release(name, mods)) => {
            assert_eq!(name, "ctrl");
            // The second press saw the latched ctrl
            assert!(mods.contains(Flags::CTRL));
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn test_modifier_held_during_chord_does_not_latch() {
    let mut session = test_session();
    down(&mut session, 0, 1, "shift");
    tap(&mut session, 50, 2, "a");

    assert!(calls(&session)
        .iter()
        .any(|c| matches!(c, Call::Release(name, mods) if name == "a" && mods.contains(Flags::SHIFT))));
    let shift = session.engine().flags_of("shift").unwrap();
    assert!(!shift.contains(Flags::LATCH));

    up(&mut session, 100, 1);
    assert!(session.engine().is_empty());
    assert_eq!(session.sink().releases(), vec!["a", "shift"]);
    assert_ne!(calls(&session).last(), Some(&Call::FlagsChanged));
}

#[test]
fn test_commit_clears_every_unlocked_latch() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "ctrl");
    tap(&mut session, 50, 1, "fn");
    let mods = session.engine().modifier_flags();
    assert!(mods.contains(Flags::CTRL | Flags::FN));

    tap(&mut session, 100, 1, "c");
    assert!(session.engine().is_empty());
    match calls(&session).last() {
        Some(Call::Release(name, mods)) => {
            assert_eq!(name, "c");
            assert!(mods.contains(Flags::CTRL | Flags::FN));
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn test_latched_keys_skipped_while_another_key_is_down() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "ctrl");
    down(&mut session, 50, 1, "a");
    down(&mut session, 60, 2, "b");

    match calls(&session).last() {
        Some(Call::Press(name, mods)) => {
            assert_eq!(name, "b");
            assert!(!mods.contains(Flags::CTRL));
        }
        other => panic!("unexpected call {:?}", other),
    }

    let engine = session.engine();
    assert!(engine.current_modifier_flags(false).contains(Flags::CTRL));
    assert!(!engine.current_modifier_flags(true).contains(Flags::CTRL));
}

#[test]
fn test_locked_keys_never_skipped() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");
    tap(&mut session, 50, 1, "shift");

    let engine = session.engine();
    assert!(engine.current_modifier_flags(true).contains(Flags::SHIFT));
    assert!(engine.current_modifier_flags(false).contains(Flags::SHIFT));
}

#[test]
fn test_cancel_of_second_press_keeps_latch() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");
    down(&mut session, 50, 1, "shift");
    cancel(&mut session, 60, 1);

    assert_eq!(latched_names(&session), vec!["shift"]);
    assert_eq!(calls(&session).last(), Some(&Call::FlagsChanged));
}

#[test]
fn test_clear_forgets_latched_and_locked_keys() {
    let mut session = test_session();
    tap(&mut session, 0, 1, "shift");
    tap(&mut session, 50, 1, "shift");
    tap(&mut session, 100, 1, "ctrl");
    down(&mut session, 150, 2, "a");
    let before = calls(&session).len();

    session.engine_mut().clear();

    assert!(session.engine().is_empty());
    assert_eq!(session.engine().timers().pending_count(), 0);
    assert_eq!(calls(&session).len(), before);

    // The finger that was down is unknown now
    up(&mut session, 200, 2);
    assert_eq!(calls(&session).len(), before);
}
