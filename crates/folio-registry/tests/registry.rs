//! Behavioural tests for `CapabilityRegistry`.

use std::sync::Arc;

use folio_core::{Difficulty, ProblemRecord, TopicKey, TopicType, Unit};
use folio_registry::{Capability, CapabilityError, CapabilityRegistry, Origin};
use pretty_assertions::assert_eq;

fn stub() -> Arc<dyn Capability> {
    Arc::new(
        |difficulty: Difficulty, count: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
            Ok((0..count)
                .map(|i| ProblemRecord {
                    display_form: format!("x + {i} = {}", i * 2),
                    canonical_answer: format!("x = {i}"),
                    solution_steps: Vec::new(),
                    difficulty,
                })
                .collect())
        },
    )
}

fn key(unit: u32, topic_type: &str, topic: &str) -> TopicKey {
    TopicKey::new(Unit::whole(unit), topic_type, topic)
}

#[test]
fn register_capability_marks_topic_implemented() {
    let mut registry = CapabilityRegistry::new();
    let record = registry.register_capability(key(1, "Intro", "Variables"), stub());

    assert!(record.is_implemented());
    assert_eq!(record.origin(), Origin::Code);
    assert!(registry.get_generator(&key(1, "Intro", "Variables")).is_some());
}

#[test]
fn register_capability_upgrades_catalog_record_in_place() {
    let mut registry = CapabilityRegistry::new();
    registry.register_topic(key(2, "Intro", "Equations"), None);
    registry.register_topic(key(2, "Intro", "Solutions"), None);

    registry.register_capability(key(2, "Intro", "Equations"), stub());

    assert_eq!(registry.len(), 2);
    let first = registry.iter().next().unwrap();
    assert_eq!(first.topic(), "Equations");
    assert!(first.is_implemented());
    assert_eq!(first.origin(), Origin::Code);
}

#[test]
fn register_topic_is_idempotent() {
    let mut registry = CapabilityRegistry::new();
    registry.register_topic(key(3, "Graphing", "Inequalities"), None);
    let again = registry.register_topic(key(3, "Graphing", "Inequalities"), None);

    assert!(!again.is_implemented());
    assert_eq!(again.origin(), Origin::Catalog);
    assert_eq!(registry.len(), 1);
}

#[test]
fn register_topic_without_capability_never_downgrades() {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(4, "Graphing", "Standard Form"), stub());

    let record = registry.register_topic(key(4, "Graphing", "Standard Form"), None);

    assert!(record.is_implemented());
    assert!(registry.get_generator(&key(4, "Graphing", "Standard Form")).is_some());
}

#[test]
fn misses_are_none_not_errors() {
    let registry = CapabilityRegistry::new();
    assert!(registry.get_topic(&key(9, "Intro", "Missing")).is_none());
    assert!(registry.get_generator(&key(9, "Intro", "Missing")).is_none());
    assert!(registry.get_all_topics(Some(Unit::whole(9)), None).is_empty());
}

#[test]
fn catalog_only_topic_has_no_generator() {
    let mut registry = CapabilityRegistry::new();
    registry.register_topic(key(5, "Intro", "Systems"), None);
    assert!(registry.get_topic(&key(5, "Intro", "Systems")).is_some());
    assert!(registry.get_generator(&key(5, "Intro", "Systems")).is_none());
}

#[test]
fn listings_keep_insertion_order() {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(4, "Graphing", "Zeta"), stub());
    registry.register_topic(key(1, "Intro", "Alpha"), None);
    registry.register_capability(key(2, "Intro", "Mid"), stub());

    let all: Vec<&str> = registry
        .get_all_topics(None, None)
        .into_iter()
        .map(|r| r.topic())
        .collect();
    assert_eq!(all, vec!["Zeta", "Alpha", "Mid"]);

    let implemented: Vec<&str> = registry
        .get_implemented_topics(None)
        .into_iter()
        .map(|r| r.topic())
        .collect();
    assert_eq!(implemented, vec!["Zeta", "Mid"]);

    let unimplemented: Vec<&str> = registry
        .get_unimplemented_topics(None)
        .into_iter()
        .map(|r| r.topic())
        .collect();
    assert_eq!(unimplemented, vec!["Alpha"]);
}

#[test]
fn filters_by_unit_and_type() {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), stub());
    registry.register_capability(key(2, "Graphing", "Solutions"), stub());
    registry.register_capability(key(3, "Intro", "Inequalities"), stub());
    registry.register_topic(TopicKey::new(Unit::from_tenths(25), "Intro", "Half"), None);

    let unit_two = registry.get_all_topics(Some(Unit::whole(2)), None);
    assert_eq!(unit_two.len(), 2);

    let intro_only = registry.get_all_topics(None, Some(&[TopicType::Intro]));
    assert_eq!(intro_only.len(), 3);

    let both = registry.get_all_topics(Some(Unit::whole(2)), Some(&[TopicType::Intro]));
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].topic(), "Equations");

    let no_restriction = registry.get_all_topics(None, Some(&[]));
    assert_eq!(no_restriction.len(), 4);
}

#[test]
fn units_and_types_are_sorted_and_distinct() {
    let mut registry = CapabilityRegistry::new();
    registry.register_topic(key(11, "Graphing", "Parabolas"), None);
    registry.register_topic(key(2, "Intro", "Equations"), None);
    registry.register_topic(TopicKey::new(Unit::from_tenths(45), "Intro", "Slopes"), None);
    registry.register_topic(key(2, "Intro", "Solutions"), None);

    assert_eq!(
        registry.get_units(),
        vec![Unit::whole(2), Unit::from_tenths(45), Unit::whole(11)]
    );
    assert_eq!(
        registry.get_types(),
        vec![TopicType::Graphing, TopicType::Intro]
    );
}

#[test]
fn coverage_of_empty_registry_is_zero() {
    let stats = CapabilityRegistry::new().get_coverage_stats();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.implemented, 0);
    assert!(stats.percentage.abs() < f64::EPSILON);
    assert!(stats.by_type.is_empty());
}

#[test]
fn coverage_reflects_latest_registration() {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "A"), stub());
    registry.register_topic(key(2, "Intro", "B"), None);
    registry.register_topic(key(3, "Graphing", "C"), None);
    registry.register_topic(key(3, "Graphing", "D"), None);

    let before = registry.get_coverage_stats();
    assert_eq!(before.total, 4);
    assert_eq!(before.implemented, 1);
    assert_eq!(before.unimplemented, 3);
    assert!((before.percentage - 25.0).abs() < 1e-9);

    registry.register_capability(key(3, "Graphing", "C"), stub());

    let after = registry.get_coverage_stats();
    assert_eq!(after.implemented, 2);
    assert!((after.percentage - 50.0).abs() < 1e-9);
    let graphing = &after.by_type[&TopicType::Graphing];
    assert_eq!(graphing.total, 2);
    assert_eq!(graphing.implemented, 1);
    assert!((graphing.percentage - 50.0).abs() < 1e-9);
}

#[test]
fn unit_coverage_and_gaps_group_by_unit() {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "Variables"), stub());
    registry.register_topic(key(1, "Intro", "Exponents"), None);
    registry.register_capability(key(2, "Intro", "Equations"), stub());

    let units = registry.get_unit_coverage();
    assert_eq!(units[&Unit::whole(1)].total, 2);
    assert_eq!(units[&Unit::whole(1)].implemented, 1);
    assert!((units[&Unit::whole(2)].percentage - 100.0).abs() < 1e-9);

    let gaps = registry.gaps();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[&Unit::whole(1)][0].topic(), "Exponents");
}

#[test]
fn records_serialize_without_capability() {
    let mut registry = CapabilityRegistry::new();
    let record = registry.register_capability(key(2, "Intro", "Equations"), stub());
    let value = serde_json::to_value(record).unwrap();

    assert_eq!(value["topic"], "Equations");
    assert_eq!(value["type"], "Intro");
    assert_eq!(value["implemented"], true);
    assert_eq!(value["origin"], "code");
    assert!(value.get("capability").is_none());
}

#[test]
fn bound_capability_is_invocable() {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), stub());

    let generator = registry.get_generator(&key(2, "Intro", "Equations")).unwrap();
    let problems = generator.generate(Difficulty::Medium, 3).unwrap();
    assert_eq!(problems.len(), 3);
    assert!(problems.iter().all(|p| p.difficulty == Difficulty::Medium));
}
