use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: usize = env_parse("__PINBOARD_TEST_NONEXISTENT__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__PINBOARD_TEST_VALID__", " 99 ") };
    let val: usize = env_parse("__PINBOARD_TEST_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__PINBOARD_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__PINBOARD_TEST_INVALID__", "lots") };
    let val: usize = env_parse("__PINBOARD_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__PINBOARD_TEST_INVALID__") };
}

#[test]
fn env_string_blank_returns_default() {
    unsafe { std::env::set_var("__PINBOARD_TEST_BLANK__", "   ") };
    assert_eq!(env_string("__PINBOARD_TEST_BLANK__", "d".into()), "d");
    unsafe { std::env::remove_var("__PINBOARD_TEST_BLANK__") };
}

// =============================================================================
// BoardConfig
// =============================================================================

#[test]
fn defaults_match_constants() {
    let config = BoardConfig::default();
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.max_persist_bytes, 4 * 1024 * 1024);
    assert_eq!(config.history_key, "freeform-board-history");
    assert_eq!(config.groups_key, "freeform-board-groups");
}

#[test]
fn from_env_reads_overrides_and_clamps_limit() {
    unsafe {
        std::env::set_var("PINBOARD_HISTORY_LIMIT", "500");
        std::env::set_var("PINBOARD_MAX_PERSIST_BYTES", "1024");
        std::env::set_var("PINBOARD_HISTORY_KEY", "h");
        std::env::set_var("PINBOARD_GROUPS_KEY", "g");
    }
    let config = BoardConfig::from_env();
    unsafe {
        std::env::remove_var("PINBOARD_HISTORY_LIMIT");
        std::env::remove_var("PINBOARD_MAX_PERSIST_BYTES");
        std::env::remove_var("PINBOARD_HISTORY_KEY");
        std::env::remove_var("PINBOARD_GROUPS_KEY");
    }
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.max_persist_bytes, 1024);
    assert_eq!(config.history_key, "h");
    assert_eq!(config.groups_key, "g");
}
