use checknote_core::models::answer::{Answer, AnswerSet};

#[test]
fn absent_answer_reads_as_empty() {
    let answers = AnswerSet::new();
    assert!(answers.selected(3).is_empty());
    assert_eq!(answers.free_text(3), "");
}

#[test]
fn json_uses_string_keys_and_short_field_names() {
    let mut answers = AnswerSet::new();
    answers.insert(
        2,
        Answer {
            selected_choice_ids: vec![1, 3],
            free_text: "since March".to_string(),
        },
    );

    let json = answers.to_json().unwrap();
    assert_eq!(json, r#"{"2":{"selected":[1,3],"text":"since March"}}"#);

    let restored = AnswerSet::from_json(&json).unwrap();
    assert_eq!(restored, answers);
}

#[test]
fn json_missing_fields_default() {
    let answers = AnswerSet::from_json(r#"{"0":{"selected":[2]},"4":{"text":"x"}}"#).unwrap();
    assert_eq!(answers.selected(0), &[2]);
    assert_eq!(answers.free_text(0), "");
    assert!(answers.selected(4).is_empty());
    assert_eq!(answers.free_text(4), "x");
}

#[test]
fn malformed_json_is_an_error() {
    assert!(AnswerSet::from_json("not json").is_err());
    assert!(AnswerSet::from_json(r#"{"zero":{"selected":[]}}"#).is_err());
}

#[test]
fn entry_materializes_lazily() {
    let mut answers = AnswerSet::new();
    assert!(answers.is_empty());
    answers.entry(5).free_text.push_str("hi");
    assert_eq!(answers.len(), 1);
    assert_eq!(answers.free_text(5), "hi");
    assert!(!answers.get(5).unwrap().is_empty());
}
