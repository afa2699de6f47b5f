use super::*;
use pretty_assertions::assert_eq;

fn frame(mode: LexMode, depth: u32) -> Frame {
    Frame { mode, depth }
}

fn modes(stack: &ModeStack) -> Vec<(LexMode, u32)> {
    stack.frames().map(|f| (f.mode, f.depth)).collect()
}

// === step ===

#[test]
fn open_and_close_track_depth() {
    let top = frame(LexMode::Quote, 1);
    assert_eq!(
        step(top, false, FormEvent::Open),
        Step {
            depth: 2,
            action: StackAction::Keep
        }
    );
    assert_eq!(
        step(frame(LexMode::Quote, 2), false, FormEvent::Close),
        Step {
            depth: 1,
            action: StackAction::Keep
        }
    );
}

#[test]
fn closing_a_pushed_frame_pops() {
    assert_eq!(
        step(frame(LexMode::Quote, 1), false, FormEvent::Close),
        Step {
            depth: 0,
            action: StackAction::Pop
        }
    );
}

#[test]
fn atom_at_depth_zero_pops() {
    assert_eq!(
        step(frame(LexMode::Quasiquote, 0), false, FormEvent::Atom).action,
        StackAction::Pop
    );
    assert_eq!(
        step(frame(LexMode::Quasiquote, 1), false, FormEvent::Atom).action,
        StackAction::Keep
    );
}

#[test]
fn root_never_pops_or_goes_negative() {
    let root = frame(LexMode::Normal, 0);
    assert_eq!(
        step(root, true, FormEvent::Close),
        Step {
            depth: 0,
            action: StackAction::Keep
        }
    );
    assert_eq!(step(root, true, FormEvent::Atom).action, StackAction::Keep);
}

#[test]
fn enter_pushes_without_touching_depth() {
    assert_eq!(
        step(frame(LexMode::Normal, 3), true, FormEvent::Enter(LexMode::Quote)),
        Step {
            depth: 3,
            action: StackAction::Push(LexMode::Quote)
        }
    );
}

// === ModeStack ===

#[test]
fn new_stack_is_root() {
    let stack = ModeStack::new();
    assert_eq!(stack.mode(), LexMode::Normal);
    assert_eq!(stack.len(), 1);
    assert!(stack.is_root());
    assert!(!stack.is_empty());
    assert_eq!(stack.open_quote(), None);
}

#[test]
fn quoted_list_reverts() {
    // '(1 2)
    let mut stack = ModeStack::new();
    stack.apply(FormEvent::Enter(LexMode::Quote));
    assert_eq!(stack.mode(), LexMode::Quote);
    stack.apply(FormEvent::Open);
    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Atom);
    assert_eq!(modes(&stack), vec![(LexMode::Normal, 0), (LexMode::Quote, 1)]);
    stack.apply(FormEvent::Close);
    assert_eq!(modes(&stack), vec![(LexMode::Normal, 0)]);
}

#[test]
fn quoted_atom_reverts() {
    let mut stack = ModeStack::new();
    stack.apply(FormEvent::Enter(LexMode::Quote));
    stack.apply(FormEvent::Atom);
    assert!(stack.is_root());
}

#[test]
fn nested_quotes_close_together() {
    // ''x
    let mut stack = ModeStack::new();
    stack.apply(FormEvent::Enter(LexMode::Quote));
    stack.apply(FormEvent::Enter(LexMode::Quote));
    assert_eq!(stack.len(), 3);
    stack.apply(FormEvent::Atom);
    assert!(stack.is_root());
}

#[test]
fn unquote_inside_quasiquote() {
    // `(1 ,x ,@(f y) 2)
    let mut stack = ModeStack::new();
    stack.apply(FormEvent::Enter(LexMode::Quasiquote));
    stack.apply(FormEvent::Open);
    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Enter(LexMode::Normal));
    assert_eq!(stack.mode(), LexMode::Normal);
    assert_eq!(stack.open_quote(), Some(LexMode::Quasiquote));
    stack.apply(FormEvent::Atom);
    assert_eq!(stack.mode(), LexMode::Quasiquote);

    stack.apply(FormEvent::Enter(LexMode::Normal));
    stack.apply(FormEvent::Open);
    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Atom);
    assert_eq!(
        modes(&stack),
        vec![
            (LexMode::Normal, 0),
            (LexMode::Quasiquote, 1),
            (LexMode::Normal, 1)
        ]
    );
    stack.apply(FormEvent::Close);
    assert_eq!(modes(&stack), vec![(LexMode::Normal, 0), (LexMode::Quasiquote, 1)]);

    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Close);
    assert!(stack.is_root());
}

#[test]
fn quote_inside_list_keeps_parent_depth() {
    // (f '(a) b)
    let mut stack = ModeStack::new();
    stack.apply(FormEvent::Open);
    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Enter(LexMode::Quote));
    stack.apply(FormEvent::Open);
    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Close);
    assert_eq!(modes(&stack), vec![(LexMode::Normal, 1)]);
    stack.apply(FormEvent::Atom);
    stack.apply(FormEvent::Close);
    assert_eq!(modes(&stack), vec![(LexMode::Normal, 0)]);
}

#[test]
fn excess_closers_at_root_are_ignored() {
    let mut stack = ModeStack::new();
    stack.apply(FormEvent::Close);
    stack.apply(FormEvent::Close);
    assert_eq!(stack.top(), frame(LexMode::Normal, 0));
}

#[test]
fn mode_names() {
    assert_eq!(LexMode::Quasiquote.to_string(), "quasiquote");
    assert_eq!(LexMode::default(), LexMode::Normal);
}

mod proptest_stack {
    use super::*;
    use proptest::prelude::*;

    fn event() -> impl Strategy<Value = FormEvent> {
        prop_oneof![
            Just(FormEvent::Open),
            Just(FormEvent::Close),
            Just(FormEvent::Atom),
            Just(FormEvent::Enter(LexMode::Quote)),
            Just(FormEvent::Enter(LexMode::Quasiquote)),
            Just(FormEvent::Enter(LexMode::Normal)),
        ]
    }

    proptest! {
        #[test]
        fn root_frame_survives(events in proptest::collection::vec(event(), 0..64)) {
            let mut stack = ModeStack::new();
            for event in events {
                stack.apply(event);
                let root = stack.frames().next().copied();
                prop_assert_eq!(root.map(|f| f.mode), Some(LexMode::Normal));
                prop_assert!(stack.len() >= 1);
            }
        }

        #[test]
        fn pushed_frames_only_exist_open(events in proptest::collection::vec(event(), 0..64)) {
            // A non-root frame at depth 0 only exists right after its trigger;
            // any completed datum would have popped it.
            let mut stack = ModeStack::new();
            for event in events {
                stack.apply(event);
                if let FormEvent::Atom | FormEvent::Close = event {
                    prop_assert!(stack.is_root() || stack.top().depth > 0);
                }
            }
        }
    }
}
