use tracefinity_designer::history::{History, HistoryCommand};
use tracefinity_designer::input::{Key, Modifiers};

#[test]
fn test_new_history_is_empty() {
    let history: History<u32> = History::default();
    assert!(history.is_empty());
    assert_eq!(history.capacity(), 50);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_undo_redo_walk() {
    let mut history = History::new(10);
    history.seed_if_empty(&0);
    for v in 1..=3 {
        assert!(history.record(&v));
    }
    assert_eq!(history.undo(), Some(2));
    // the caller applies 2 and records it; that record is swallowed
    assert!(!history.record(&2));
    assert_eq!(history.undo(), Some(1));
    history.record(&1);
    assert_eq!(history.redo(), Some(2));
    history.record(&2);
    assert_eq!(history.len(), 4);
    assert_eq!(history.index(), 2);
}

#[test]
fn test_new_record_after_undo_drops_redo_branch() {
    let mut history = History::new(10);
    history.seed_if_empty(&"a");
    history.record(&"b");
    history.record(&"c");
    history.undo();
    history.record(&"b");
    history.record(&"d");
    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);
    assert_eq!(history.undo(), Some("b"));
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut history = History::new(3);
    for v in 1..=5 {
        history.record(&v);
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.undo(), Some(4));
    history.record(&4);
    assert_eq!(history.undo(), Some(3));
    history.record(&3);
    assert_eq!(history.undo(), None);
}

#[test]
fn test_seed_only_when_empty() {
    let mut history = History::new(5);
    assert!(history.seed_if_empty(&1));
    assert!(!history.seed_if_empty(&2));
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
}

#[test]
fn test_shortcuts() {
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    let cmd_shift = Modifiers {
        meta: true,
        shift: true,
        ..Modifiers::default()
    };
    assert_eq!(
        HistoryCommand::from_shortcut(&Key::Character('z'), ctrl),
        Some(HistoryCommand::Undo)
    );
    assert_eq!(
        HistoryCommand::from_shortcut(&Key::Character('z'), cmd_shift),
        Some(HistoryCommand::Redo)
    );
    assert_eq!(
        HistoryCommand::from_shortcut(&Key::Character('z'), Modifiers::default()),
        None
    );
    assert_eq!(HistoryCommand::from_shortcut(&Key::Character('y'), ctrl), None);
}
