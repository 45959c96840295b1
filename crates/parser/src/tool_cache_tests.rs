use super::*;

#[test]
fn remembers_and_looks_up() {
    let mut cache = ToolUseCache::new();
    cache.remember("toolu_1", "Bash", None);
    assert_eq!(cache.lookup("toolu_1"), Some("Bash"));
    assert_eq!(cache.lookup("toolu_missing"), None);
}

#[test]
fn remembers_and_looks_up_command() {
    let mut cache = ToolUseCache::new();
    cache.remember("toolu_1", "Bash", Some("npm run dev".to_string()));
    assert_eq!(cache.lookup_command("toolu_1"), Some("npm run dev"));
    assert_eq!(cache.lookup_command("toolu_missing"), None);
}

#[test]
fn evicts_oldest_once_over_capacity() {
    let mut cache = ToolUseCache::new();
    for i in 0..CAPACITY {
        cache.remember(format!("toolu_{i}"), "Bash", None);
    }
    assert_eq!(cache.len(), CAPACITY);

    cache.remember(format!("toolu_{CAPACITY}"), "Bash", None);
    assert_eq!(cache.len(), CAPACITY);
    assert_eq!(cache.lookup("toolu_0"), None);
    assert_eq!(cache.lookup(&format!("toolu_{CAPACITY}")), Some("Bash"));
}

#[test]
fn reinserting_existing_id_does_not_grow_len() {
    let mut cache = ToolUseCache::new();
    cache.remember("toolu_1", "Bash", None);
    cache.remember("toolu_1", "Edit", Some("echo hi".to_string()));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.lookup("toolu_1"), Some("Edit"));
    assert_eq!(cache.lookup_command("toolu_1"), Some("echo hi"));
}
