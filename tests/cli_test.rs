//! Integration tests for the CLI

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A command isolated from the user's config, environment and working directory
fn pagesnap(dir: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pagesnap")?;
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("SCRAPE_URL")
        .env_remove("PAGESNAP_ARTIFACT")
        .env_remove("HOST")
        .env_remove("PORT");
    Ok(cmd)
}

#[test]
fn test_help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    pagesnap(&dir)?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrape"))
        .stdout(predicate::str::contains("serve"));

    Ok(())
}

#[test]
fn test_scrape_help_mentions_env_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    pagesnap(&dir)?
        .args(["scrape", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SCRAPE_URL"))
        .stdout(predicate::str::contains("--engine"));

    Ok(())
}

#[test]
fn test_missing_url_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    pagesnap(&dir)?
        .arg("scrape")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No URL specified"))
        .stderr(predicate::str::contains("Usage: pagesnap scrape"))
        .stderr(predicate::str::contains("[URL]"));

    assert!(!dir.path().join("scraped_data.json").exists());
    Ok(())
}

#[test]
fn test_empty_url_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    pagesnap(&dir)?.args(["scrape", "   "]).assert().code(2);

    assert!(!dir.path().join("scraped_data.json").exists());
    Ok(())
}

#[test]
fn test_missing_url_leaves_existing_artifact_alone() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let artifact = dir.path().join("scraped_data.json");
    fs::write(&artifact, "{\"previous\": true}\n")?;

    pagesnap(&dir)?.arg("scrape").assert().failure();

    assert_eq!(fs::read_to_string(&artifact)?, "{\"previous\": true}\n");
    Ok(())
}

#[test]
fn test_unreachable_url_persists_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("pagesnap.toml");
    fs::write(&config, "[scraper]\nhttp_timeout_secs = 5\n")?;
    let output = dir.path().join("out").join("result.json");

    // Nothing listens on port 1
    pagesnap(&dir)?
        .arg("--config")
        .arg(&config)
        .args(["scrape", "http://127.0.0.1:1/", "--engine", "static", "--output"])
        .arg(&output)
        .assert()
        .failure();

    let value: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(value["source_url"], "http://127.0.0.1:1/");
    assert!(value.get("data").is_none());
    assert!(value["error"]["message"].is_string());
    assert!(value["error"]["stack"].is_string());
    Ok(())
}

#[test]
fn test_stray_port_does_not_break_scrape() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("pagesnap.toml");
    fs::write(&config, "[scraper]\nhttp_timeout_secs = 5\n")?;
    let output = dir.path().join("result.json");

    // The scrape itself fails (nothing listens on port 1) but gets far
    // enough to persist its failure envelope
    pagesnap(&dir)?
        .env("PORT", "not-a-port")
        .arg("--config")
        .arg(&config)
        .args(["scrape", "http://127.0.0.1:1/", "--engine", "static", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for PORT").not());

    let value: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(value["source_url"], "http://127.0.0.1:1/");
    Ok(())
}

#[test]
fn test_invalid_port_fails_serve() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("pagesnap.toml");
    fs::write(&config, "")?;

    pagesnap(&dir)?
        .env("PORT", "not-a-port")
        .arg("--config")
        .arg(&config)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for PORT"));

    Ok(())
}

#[test]
fn test_missing_config_file_is_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    pagesnap(&dir)?
        .args(["--config", "does-not-exist.toml", "scrape", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));

    assert!(!dir.path().join("scraped_data.json").exists());
    Ok(())
}
