use super::*;

#[test]
fn test_config_default() {
    let config = BrowserManagerConfig::default();
    assert_eq!(config.debug_port, 9222);
    assert!(config.headless);
    assert!(config.launch);
    assert!(config.chrome_path.is_none());
}

#[test]
fn test_config_endpoint() {
    let config = BrowserManagerConfig {
        debug_port: 9333,
        ..Default::default()
    };
    assert_eq!(config.endpoint(), "http://localhost:9333");
}

#[test]
fn test_config_profile_dir() {
    let config = BrowserManagerConfig::default();
    assert!(config.get_profile_dir().ends_with(".pokernow/browser-profile"));

    let config = BrowserManagerConfig {
        profile_dir: Some("/tmp/pn-profile".into()),
        ..Default::default()
    };
    assert_eq!(config.get_profile_dir(), std::path::PathBuf::from("/tmp/pn-profile"));
}

#[test]
fn test_chrome_args() {
    let config = BrowserManagerConfig {
        profile_dir: Some("/tmp/pn-profile".into()),
        ..Default::default()
    };
    let args = config.chrome_args();
    assert!(args.contains(&"--remote-debugging-port=9222".to_string()));
    assert!(args.contains(&"--user-data-dir=/tmp/pn-profile".to_string()));
    assert!(args.contains(&"--headless=new".to_string()));

    let headed = BrowserManagerConfig {
        headless: false,
        ..Default::default()
    };
    assert!(!headed.chrome_args().iter().any(|a| a.starts_with("--headless")));
}

#[test]
fn test_browser_error_display() {
    let err = BrowserError::ConnectionFailed("timeout".to_string());
    assert_eq!(err.to_string(), "Connection failed: timeout");

    let err = BrowserError::LaunchFailed("permission denied".to_string());
    assert_eq!(err.to_string(), "Failed to launch Chrome: permission denied");
}

#[test]
fn test_cdp_error_conversion() {
    let err: BrowserError = crate::cdp::CdpError::SessionClosed.into();
    assert!(matches!(err, BrowserError::NotConnected));

    let err: BrowserError = crate::cdp::CdpError::NavigationFailed("net::ERR".into()).into();
    assert!(matches!(err, BrowserError::NavigationFailed(_)));
}

#[tokio::test]
async fn test_connect_without_chrome_and_launch_disabled() {
    // Port 9 (discard) is not a CDP endpoint.
    let manager = BrowserManager::new(BrowserManagerConfig {
        debug_port: 9,
        launch: false,
        ..Default::default()
    });
    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, BrowserError::NotRunning(_)));
}

#[tokio::test]
async fn test_shutdown_without_connect() {
    let manager = BrowserManager::new(BrowserManagerConfig::default());
    assert!(manager.shutdown().await.is_ok());
    assert!(manager.shutdown().await.is_ok());
}
