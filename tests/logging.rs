use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;
use tool_launcher::logging::{init, log_path_for};

#[test]
fn log_file_sits_next_to_config() {
    let path = log_path_for(std::path::Path::new("/tmp/ToolLauncher/ToolLauncher.conf"));
    assert_eq!(path, std::path::Path::new("/tmp/ToolLauncher/ToolLauncher.log"));
}

#[test]
#[serial]
fn writes_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logs").join("ToolLauncher.log");

    init(false, Some(path.clone()));
    tracing::info!("launcher log line");
    tracing::debug!("hidden debug line");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("launcher log line"));
    assert!(!contents.contains("hidden debug line"));
}
