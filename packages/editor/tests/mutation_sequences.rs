//! Tests for longer mutation sequences
//!
//! This tests:
//! - Undo/redo across mixed edits
//! - Batched edits as a single undo step
//! - Redo branch discarded by new edits
//! - Tree integrity after every step

use metanord_common::validate;
use metanord_editor::{ComponentKind, Document, EditSession, Mutation};
use metanord_model::{LocalizedText, Page};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn empty_session() -> EditSession {
    let doc = Document::from_page(PathBuf::from("services.json"), Page::new("p", "services", "Services"));
    EditSession::new("admin".to_string(), doc)
}

#[test]
fn test_build_then_unwind_completely() {
    let mut session = empty_session();
    let initial = session.page().clone();

    let intro = session.add_section("Intro", None).unwrap();
    let heading = session.add_component(&intro, ComponentKind::Heading, None).unwrap();
    let gallery = session.add_section("Gallery", None).unwrap();
    session
        .add_component(&gallery, ComponentKind::Gallery, None)
        .unwrap();
    session
        .apply(Mutation::MoveComponent {
            component_id: heading.clone(),
            target_section_id: gallery.clone(),
            index: Some(0),
        })
        .unwrap();
    session
        .apply(Mutation::MoveSection {
            section_id: gallery.clone(),
            index: 0,
        })
        .unwrap();

    assert!(validate(session.page()).is_ok());
    assert_eq!(session.history().undo_levels(), 6);

    while session.undo() {
        assert!(validate(session.page()).is_ok());
    }
    assert_eq!(session.page(), &initial);

    while session.redo() {}
    assert_eq!(session.page().sections[0].id, gallery);
    assert_eq!(session.page().sections[0].components[0].id, heading);
}

#[test]
fn test_batched_edits_undo_together() {
    let mut session = empty_session();
    let section = session.add_section("Contact", None).unwrap();

    session.begin_batch("Fill contact section");
    let text = session
        .add_component(&section, ComponentKind::Text, None)
        .unwrap();
    session
        .apply(Mutation::UpdateComponent {
            component_id: text.clone(),
            content: BTreeMap::from([(
                "text".to_string(),
                LocalizedText::new("Call us").with("et", "Helista meile"),
            )]),
            props: Default::default(),
            styles: Default::default(),
        })
        .unwrap();
    session
        .add_component(&section, ComponentKind::Button, None)
        .unwrap();
    session.end_batch();

    assert_eq!(session.history().undo_levels(), 2);
    assert_eq!(
        session.history().undo_description(),
        Some("Fill contact section")
    );

    session.undo();
    assert_eq!(session.page().component_count(), 0);
    assert_eq!(session.page().sections.len(), 1);
}

#[test]
fn test_new_edit_after_undo_discards_redo() {
    let mut session = empty_session();
    session.add_section("A", None).unwrap();
    session.add_section("B", None).unwrap();

    session.undo();
    assert!(session.history().can_redo());

    session.add_section("C", None).unwrap();
    assert!(!session.history().can_redo());
    let titles: Vec<&str> = session
        .page()
        .sections
        .iter()
        .map(|s| s.title.value.as_str())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[test]
fn test_failed_mutation_records_nothing() {
    let mut session = empty_session();
    let result = session.apply(Mutation::RemoveSection {
        section_id: "missing".to_string(),
    });
    assert!(result.is_err());
    assert!(!session.history().can_undo());
    assert_eq!(session.document.version, 0);
}

#[test]
fn test_history_limit_drops_oldest() {
    let doc = Document::from_page(PathBuf::from("x.json"), Page::new("p", "x", "X"));
    let mut session = EditSession::with_history_limit("admin".to_string(), doc, 3);

    for i in 0..5 {
        session.add_section(format!("S{}", i), None).unwrap();
    }
    assert_eq!(session.history().undo_levels(), 3);

    while session.undo() {}
    assert_eq!(session.page().sections.len(), 2);
}
