//! Unit tests for environment-driven configuration.

use std::collections::{BTreeSet, HashMap};

use sheet_relay_bot::config::{parse_ids, BotConfig, DEFAULT_HTTP_PORT};
use sheet_relay_bot::AppError;

fn resolve(vars: &[(&str, &str)]) -> sheet_relay_bot::Result<BotConfig> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    BotConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn parses_full_environment() {
    let config = resolve(&[
        ("DISCORD_TOKEN", "bot-token"),
        ("GUILD_ID", "987654321"),
        ("GAS_URL", "https://script.example/exec"),
        ("GAS_SHARED_TOKEN", "s3cret"),
        ("CHANNEL_HRS", "111, 112"),
        ("CHANNEL_QBOX", "333"),
        ("CHANNEL_HEALTH", "222"),
        ("PORT", "9090"),
    ])
    .expect("config resolves");

    assert_eq!(config.discord_token, "bot-token");
    assert_eq!(config.guild_id, Some(987_654_321));
    assert_eq!(
        config.webhook.url.as_deref(),
        Some("https://script.example/exec")
    );
    assert_eq!(config.webhook.shared_token, "s3cret");
    assert_eq!(config.channels.hrs, BTreeSet::from([111, 112]));
    assert_eq!(config.channels.qbox, BTreeSet::from([333]));
    assert_eq!(config.channels.health, BTreeSet::from([222]));
    assert_eq!(config.http_port, 9090);
}

#[test]
fn missing_token_is_fatal() {
    let err = resolve(&[("GAS_URL", "https://script.example/exec")]).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("DISCORD_TOKEN"));
}

#[test]
fn blank_token_is_fatal() {
    let err = resolve(&[("DISCORD_TOKEN", "   ")]).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn optional_values_default() {
    let config = resolve(&[("DISCORD_TOKEN", "t")]).expect("config resolves");

    assert_eq!(config.guild_id, None);
    assert_eq!(config.webhook.url, None);
    assert_eq!(config.webhook.shared_token, "");
    assert!(config.channels.hrs.is_empty());
    assert!(config.channels.qbox.is_empty());
    assert!(config.channels.health.is_empty());
    assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
    assert_eq!(DEFAULT_HTTP_PORT, 8080);
}

#[test]
fn blank_webhook_url_counts_as_unset() {
    let config = resolve(&[("DISCORD_TOKEN", "t"), ("GAS_URL", "")]).expect("config resolves");
    assert_eq!(config.webhook.url, None);
}

#[test]
fn malformed_guild_id_falls_back_to_global() {
    let config =
        resolve(&[("DISCORD_TOKEN", "t"), ("GUILD_ID", "my-guild")]).expect("config resolves");
    assert_eq!(config.guild_id, None);

    let config = resolve(&[("DISCORD_TOKEN", "t"), ("GUILD_ID", "0")]).expect("config resolves");
    assert_eq!(config.guild_id, None);
}

#[test]
fn invalid_port_is_rejected() {
    let err = resolve(&[("DISCORD_TOKEN", "t"), ("PORT", "http")]).unwrap_err();
    assert!(err.to_string().starts_with("config:"));

    let err = resolve(&[("DISCORD_TOKEN", "t"), ("PORT", "70000")]).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn parse_ids_skips_garbage() {
    assert_eq!(
        parse_ids(Some(" 1, ,abc,2,,3x, 4 ")),
        BTreeSet::from([1, 2, 4])
    );
}

#[test]
fn parse_ids_handles_absent_and_empty() {
    assert!(parse_ids(None).is_empty());
    assert!(parse_ids(Some("")).is_empty());
    assert!(parse_ids(Some(" , , ")).is_empty());
}

#[test]
fn parse_ids_drops_negative_and_duplicate_ids() {
    assert_eq!(parse_ids(Some("-5,7,7")), BTreeSet::from([7]));
}
