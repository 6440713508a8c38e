//! Keyboard event handling tests
//!
//! Drives each widget through `tick` the way the prompter does and checks
//! focus bounds, selection toggling, tag editing, validation and the
//! documented start-up scenarios.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stackwiz::question::{
    Confirmation, ConfirmationQuestion, Initialize, KeyValueQuestion, MultiSelectQuestion,
    PlainTextQuestion, Question, QuestionError, QuestionInput, SingleSelectQuestion, Tag, Tick,
};

/// Helper to create a key event
fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn type_str<Q: Question>(q: &mut Q, s: &str) {
    for c in s.chars() {
        q.tick(key(KeyCode::Char(c)));
    }
}

/// A long, repeatable sequence of navigation keys.
fn navigation_keys(len: usize) -> Vec<KeyCode> {
    const CODES: [KeyCode; 4] = [KeyCode::Up, KeyCode::Down, KeyCode::Tab, KeyCode::BackTab];
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            CODES[(state % 4) as usize]
        })
        .collect()
}

fn os_table() -> QuestionInput {
    QuestionInput::new("Operating system?")
        .headers(["Key", "Value"])
        .rows([["os", "linux"], ["os", "darwin"], ["os", "windows"]])
        .row_values(["os=linux", "os=darwin", "os=windows"])
}

#[test]
fn test_single_select_cursor_stays_in_range() {
    let mut q = SingleSelectQuestion::initialize(os_table()).expect("init");
    for code in navigation_keys(500) {
        assert_eq!(q.tick(key(code)), Tick::Continue);
        assert!(q.cursor() < q.len());
    }
}

#[test]
fn test_multi_select_cursor_stays_in_range() {
    let mut q = MultiSelectQuestion::initialize(os_table()).expect("init");
    for code in navigation_keys(500) {
        q.tick(key(code));
        assert!(q.cursor() <= q.submit_index());
    }
}

#[test]
fn test_key_value_focus_stays_in_range() {
    let input: QuestionInput = QuestionInput::new("Tags?").default_value("a|1, b|2, c|3");
    let mut q = KeyValueQuestion::initialize(input).expect("init");
    for (i, code) in navigation_keys(500).into_iter().enumerate() {
        q.tick(key(code));
        if i % 97 == 0 && q.focus() < 0 {
            q.tick(key(KeyCode::Backspace));
        }
        let len = q.tags().len() as i32;
        assert!((-len..=2).contains(&q.focus()), "focus {} out of range", q.focus());
    }
}

#[test]
fn test_confirmation_focus_stays_in_range() {
    let input = os_table().allow_edit(true);
    let mut q = ConfirmationQuestion::initialize(input).expect("init");
    for code in navigation_keys(500) {
        q.tick(key(code));
        assert!((-3..=1).contains(&q.focus()), "focus {} out of range", q.focus());
    }
}

#[test]
fn test_multi_select_toggle_parity() {
    let mut q = MultiSelectQuestion::initialize(os_table()).expect("init");
    q.toggle(2);
    let original = q.selected_indices();

    for _ in 0..4 {
        q.toggle(0);
    }
    assert_eq!(q.selected_indices(), original);

    for _ in 0..3 {
        q.toggle(0);
    }
    assert_eq!(q.selected_indices(), vec![0, 2]);
}

#[test]
fn test_multi_select_values_in_row_order() {
    let mut q = MultiSelectQuestion::initialize(os_table()).expect("init");
    q.toggle(2);
    q.toggle(0);
    q.toggle(1);
    assert_eq!(q.selected_values(), vec!["os=linux", "os=darwin", "os=windows"]);
}

#[test]
fn test_key_value_blank_side_never_adds() {
    let input: QuestionInput = QuestionInput::new("Tags?");
    let mut q = KeyValueQuestion::initialize(input).expect("init");

    // value only
    q.tick(key(KeyCode::Down));
    type_str(&mut q, "prod");
    q.tick(key(KeyCode::Enter));
    assert_eq!(q.focus(), 2);
    q.tick(key(KeyCode::Enter));
    assert!(q.tags().is_empty());

    // key of spaces only
    q.tick(key(KeyCode::Up));
    q.tick(key(KeyCode::Up));
    type_str(&mut q, "   ");
    q.tick(key(KeyCode::Enter));
    type_str(&mut q, "prod");
    q.tick(key(KeyCode::Enter));
    q.tick(key(KeyCode::Enter));
    assert!(q.tags().is_empty());
}

#[test]
fn test_key_value_add_appends_trimmed_pair() {
    let input: QuestionInput = QuestionInput::new("Tags?").default_value("env|prod");
    let mut q = KeyValueQuestion::initialize(input).expect("init");

    type_str(&mut q, "  owner ");
    q.tick(key(KeyCode::Enter));
    type_str(&mut q, " team1");
    q.tick(key(KeyCode::Enter));
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Continue);

    assert_eq!(q.tags().len(), 2);
    assert_eq!(q.tags()[1], Tag::new("owner", "team1").expect("tag"));
    assert_eq!(q.focus(), 0);
}

#[test]
fn test_key_value_submit_commits_tags() {
    let input: QuestionInput = QuestionInput::new("Tags?").default_value("env|prod");
    let mut q = KeyValueQuestion::initialize(input).expect("init");

    q.tick(key(KeyCode::Tab));
    q.tick(key(KeyCode::Tab));
    q.tick(key(KeyCode::Right));
    assert!(q.submit_armed());
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(q.into_answer().to_string(), "env|prod");
}

fn sizes() -> Vec<String> {
    vec!["small".to_string(), "large".to_string()]
}

#[test]
fn test_plain_text_accepted_by_any_validator() {
    let input = QuestionInput::new("Size?")
        .context(sizes())
        .validator(|sizes: &Vec<String>, s: &str| sizes.iter().any(|size| size == s))
        .validator(|_: &Vec<String>, s: &str| s.ends_with("xl"));
    let mut q = PlainTextQuestion::initialize(input).expect("init");

    type_str(&mut q, "2xl");
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(q.into_answer(), "2xl");
}

#[test]
fn test_plain_text_rejected_stays_editing() {
    let input = QuestionInput::new("Size?")
        .context(sizes())
        .validator(|sizes: &Vec<String>, s: &str| sizes.iter().any(|size| size == s));
    let mut q = PlainTextQuestion::initialize(input).expect("init");

    type_str(&mut q, "medium");
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Continue);
    assert_eq!(q.text(), "");
    assert!(matches!(
        q.last_error(),
        Some(QuestionError::ValidationRejected { .. })
    ));
}

#[test]
fn test_confirmation_read_only_up_is_noop() {
    let mut q = ConfirmationQuestion::initialize(os_table()).expect("init");
    q.tick(key(KeyCode::Down));
    for _ in 0..5 {
        q.tick(key(KeyCode::Up));
        assert_eq!(q.focus(), 0);
    }
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(q.into_answer(), Confirmation::No);
}

#[test]
fn test_confirmation_reconfigure_first_row() {
    let mut q = ConfirmationQuestion::initialize(os_table().allow_edit(true)).expect("init");
    for _ in 0..3 {
        q.tick(key(KeyCode::Up));
    }
    assert_eq!(q.config_cursor(), Some(0));
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(
        q.into_answer(),
        Confirmation::Reconfigure("os=linux".to_string())
    );
}

#[test]
fn test_every_widget_cancels_on_escape() {
    let esc = key(KeyCode::Esc);

    let mut single = SingleSelectQuestion::initialize(os_table()).expect("init");
    assert_eq!(single.tick(esc), Tick::Cancel);

    let mut multi = MultiSelectQuestion::initialize(os_table()).expect("init");
    assert_eq!(multi.tick(esc), Tick::Cancel);

    let input: QuestionInput = QuestionInput::new("Name?");
    let mut text = PlainTextQuestion::initialize(input).expect("init");
    assert_eq!(text.tick(esc), Tick::Cancel);

    let input: QuestionInput = QuestionInput::new("Tags?");
    let mut tags = KeyValueQuestion::initialize(input).expect("init");
    assert_eq!(tags.tick(esc), Tick::Cancel);

    let mut confirm = ConfirmationQuestion::initialize(os_table()).expect("init");
    assert_eq!(confirm.tick(esc), Tick::Cancel);
    assert!(matches!(
        confirm.last_error(),
        Some(QuestionError::UserCancelled)
    ));
}

#[test]
fn test_scenario_single_select_without_default() {
    let input: QuestionInput = QuestionInput::new("Pick")
        .headers(["Key", "Value"])
        .rows([["os", "linux"]])
        .row_values(["os=linux"]);
    let mut q = SingleSelectQuestion::initialize(input).expect("init");
    assert_eq!(q.cursor(), 0);
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(q.into_answer(), Some("os=linux".to_string()));
}

#[test]
fn test_scenario_multi_select_default_values() {
    let input: QuestionInput = QuestionInput::new("Pick")
        .rows([["a"], ["b"]])
        .row_values(["a", "b"])
        .default_values(["b"]);
    let mut q = MultiSelectQuestion::initialize(input).expect("init");
    assert_eq!(q.selected_indices(), vec![1]);

    q.tick(key(KeyCode::Down));
    q.tick(key(KeyCode::Down));
    assert_eq!(q.cursor(), 2);
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(q.into_answer(), vec!["b".to_string()]);
}

#[test]
fn test_scenario_key_value_default_string() {
    let input: QuestionInput = QuestionInput::new("Tags?").default_value("env|prod, owner|team1");
    let q = KeyValueQuestion::initialize(input).expect("init");
    assert_eq!(
        q.tags(),
        &[
            Tag::new("env", "prod").expect("tag"),
            Tag::new("owner", "team1").expect("tag"),
        ]
    );
    assert_eq!(q.tags_to_string(), "env|prod, owner|team1");
}

#[test]
fn test_scenario_plain_text_default() {
    let input: QuestionInput = QuestionInput::new("Instance type?").default_value("t2.micro");
    let mut q = PlainTextQuestion::initialize(input).expect("init");
    assert_eq!(q.tick(key(KeyCode::Enter)), Tick::Commit);
    assert_eq!(q.into_answer(), "t2.micro");
}
