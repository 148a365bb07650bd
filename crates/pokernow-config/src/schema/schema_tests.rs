use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.browser.debug_port, 9222);
    assert!(config.browser.headless);
    assert_eq!(config.poll.interval_seconds, 5);
    assert_eq!(config.poll.budget_seconds, 60);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_poll_config_durations() {
    let poll = PollConfig::default();
    assert_eq!(poll.interval(), Duration::from_secs(5));
    assert_eq!(poll.budget(), Duration::from_secs(60));
    assert_eq!(poll.element_timeout(), Duration::from_secs(10));
    assert_eq!(poll.table_load_timeout(), Duration::from_secs(30));
}

#[test]
fn test_browser_endpoint() {
    let browser = BrowserConfig {
        debug_port: 9333,
        ..Default::default()
    };
    assert_eq!(browser.endpoint(), "http://localhost:9333");
}

#[test]
fn test_browser_profile_dir_default() {
    let browser = BrowserConfig::default();
    assert!(browser.profile_dir().ends_with("browser-profile"));
}

#[test]
fn test_session_cookie_path_default() {
    let session = SessionConfig::default();
    assert!(session.cookie_path.ends_with("cookies.json"));
}

#[test]
fn test_config_roundtrips_through_toml() {
    let config = Config::default();
    let serialized = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed.poll.interval_seconds, config.poll.interval_seconds);
    assert_eq!(parsed.session.cookie_path, config.session.cookie_path);
}
