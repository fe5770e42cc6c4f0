use pretty_assertions::assert_eq;
use redis_practices_knowledge::{bundled_knowledge_dir, KnowledgeBase, KnowledgeConfig, Operation};
use std::collections::BTreeMap;

fn bundled() -> KnowledgeBase {
    KnowledgeBase::load_strict(KnowledgeConfig::for_dir(bundled_knowledge_dir()))
        .expect("bundled corpus has a registry")
}

#[test]
fn every_bundled_rule_parses_and_has_a_section() {
    let kb = bundled();
    assert_eq!(kb.sections().len(), 11);
    assert_eq!(kb.rules().len(), 13);

    for (prefix, rule) in kb.rules() {
        assert!(!rule.title.is_empty(), "{prefix} missing title");
        assert!(!rule.impact.is_empty(), "{prefix} missing impact");
        assert!(!rule.content.trim().is_empty(), "{prefix} missing content");
        assert!(!rule.summary.is_empty(), "{prefix} missing summary");
        assert!(rule.section_number.is_some(), "{prefix} has no section");
    }
}

#[test]
fn every_code_example_alias_resolves() {
    let kb = bundled();
    for pattern in kb.list_code_examples() {
        let example = kb.get_code_example(pattern, "python");
        assert!(example.is_some(), "no example for {pattern}");
    }
}

#[test]
fn pipeline_example_is_first_python_block() {
    let kb = bundled();
    let example = kb.get_code_example("pipeline", "python").unwrap();
    assert_eq!(example.title, "Batch Commands with Pipelining");
    assert_eq!(example.language, "python");
    assert_eq!(
        example.code,
        "for user_id in user_ids:\n    r.incr(f\"visits:{user_id}\")"
    );
    assert_eq!(example.references.len(), 1);

    let js = kb.get_code_example("pipeline", "javascript").unwrap();
    assert!(js.code.starts_with("const pipeline = redis.pipeline();"));
}

#[test]
fn connection_category_and_anti_patterns() {
    let kb = bundled();
    let sections = kb.get_sections(Some("connection"));
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].prefix, "conn");

    let groups = kb.get_anti_patterns(Some("connection"));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].category, "Connection & Performance");
    assert!(groups[0].patterns[0].bad_code.contains("redis.Redis(host=\"localhost\""));
}

#[test]
fn semantic_cache_rules_use_compound_section() {
    let kb = bundled();
    let rule = kb.get_rule_by_topic("semantic-cache-best-practices").unwrap();
    assert_eq!(rule.section_number, Some(7));
}

#[test]
fn full_guide_covers_every_section() {
    let kb = bundled();
    let guide = kb.full_guide();
    assert!(guide.len() > 5_000);
    for section in kb.sections().values() {
        assert!(guide.contains(&section.name), "guide missing {}", section.name);
    }
}

#[test]
fn search_ranks_title_matches_first() {
    let kb = bundled();
    let hits = kb.search_rules("hash tags");
    assert_eq!(hits[0].rule.prefix, "cluster-hash-tags");
}

#[test]
fn every_operation_answers_without_error() {
    let kb = bundled();
    let args: BTreeMap<String, String> = [("topic", "ttl"), ("query", "memory"), ("pattern", "cache-aside")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    for name in Operation::NAMES {
        let text = redis_practices_knowledge::call(&kb, name, &args).unwrap();
        assert!(!text.is_empty(), "{name} returned nothing");
    }
}
