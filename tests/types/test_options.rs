//! Unit tests for `GlobalOptions`
//!
//! Tests layering, flag rendering, deserialization and the flag helpers

use std::collections::HashMap;

use docker_compose_client::client::command::{CommandBuilder, query_flags, sorted_pairs};
use docker_compose_client::GlobalOptions;
use serde_json::json;

#[test]
fn test_default_options_render_no_flags() {
    assert!(GlobalOptions::default().to_flags().is_empty());
}

#[test]
fn test_merge_without_overrides_is_identity() {
    let base = GlobalOptions::builder()
        .add_file("a.yml")
        .project_name("demo")
        .tls(true)
        .build();

    let merged = base.merged(std::iter::empty::<&GlobalOptions>());

    assert_eq!(merged, base);
    assert_eq!(merged.to_flags(), base.to_flags());
}

#[test]
fn test_merge_with_empty_override_is_identity() {
    let base = GlobalOptions::builder()
        .add_profile("dev")
        .host("unix:///var/run/docker.sock")
        .verbose(true)
        .build();

    let merged = base.merged(&[GlobalOptions::default()]);

    assert_eq!(merged, base);
}

#[test]
fn test_merge_concatenates_lists() {
    let base = GlobalOptions::builder()
        .add_file("a.yml")
        .add_profile("p1")
        .build();
    let first = GlobalOptions::builder().add_file("b.yml").build();
    let second = GlobalOptions::builder()
        .add_file("c.yml")
        .add_profile("p2")
        .build();

    let merged = base.merged([&first, &second]);

    assert_eq!(merged.files, vec!["a.yml", "b.yml", "c.yml"]);
    assert_eq!(merged.profiles, vec!["p1", "p2"]);
}

#[test]
fn test_merge_scalars_last_write_wins() {
    let base = GlobalOptions::builder().host("base").tls(true).build();
    let overrides = [
        GlobalOptions::builder().host("first").build(),
        GlobalOptions::builder().tls(false).build(),
        GlobalOptions {
            host: Some(String::new()),
            ..GlobalOptions::default()
        },
    ];

    let merged = base.merged(&overrides);

    assert_eq!(merged.host.as_deref(), Some("first"));
    assert_eq!(merged.tls, Some(false));
}

#[test]
fn test_empty_base_strings_are_unset() {
    let base = GlobalOptions {
        project_name: Some(String::new()),
        ..GlobalOptions::default()
    };

    assert_eq!(base.merged(Vec::<&GlobalOptions>::new()).project_name, None);
    assert!(base.to_flags().is_empty());
}

#[test]
fn test_deserialize_partial_options() {
    let options: GlobalOptions = serde_json::from_value(json!({
        "files": ["docker-compose.yml", "docker-compose.override.yml"],
        "project_name": "shop",
        "no_ansi": true,
        "tls_verify": false
    }))
    .unwrap();

    assert_eq!(options.files.len(), 2);
    assert_eq!(options.project_name.as_deref(), Some("shop"));
    assert_eq!(options.no_ansi, Some(true));
    assert_eq!(options.tls_verify, Some(false));
    assert_eq!(options.verbose, None);
    assert!(options.profiles.is_empty());
    assert_eq!(
        options.to_flags(),
        vec![
            "--file",
            "docker-compose.yml",
            "--file",
            "docker-compose.override.yml",
            "--project-name",
            "shop",
            "--no-ansi",
        ]
    );
}

#[test]
fn test_global_flags_string() {
    let base = GlobalOptions::builder().add_file("a.yml").build();
    let overrides = [GlobalOptions::builder().add_file("b.yml").compatibility(true).build()];

    let builder = CommandBuilder::new("docker compose", &base, &overrides);

    assert_eq!(
        builder.global_flags(),
        "--file a.yml --file b.yml --compatibility"
    );
    assert_eq!(
        builder.build("foo", "bar"),
        "docker compose --file a.yml --file b.yml --compatibility foo bar"
    );
}

#[test]
fn test_query_flags() {
    assert_eq!(query_flags(""), "--format json");
    assert_eq!(query_flags("bar"), "bar --format json");
    assert_eq!(query_flags("--format json"), "--format json");
    assert_eq!(query_flags(" --services --format=json "), "--services --format=json");
}

#[test]
fn test_sorted_pairs() {
    let mut build_args = HashMap::new();
    build_args.insert("foo", "bar");
    build_args.insert("baz", "qux");

    assert_eq!(
        sorted_pairs("--build-arg", build_args, "="),
        "--build-arg baz=qux --build-arg foo=bar"
    );

    let mut scale = HashMap::new();
    scale.insert("worker".to_string(), 3);
    scale.insert("api".to_string(), 2);

    assert_eq!(
        sorted_pairs("--scale", scale, "="),
        "--scale api=2 --scale worker=3"
    );

    assert_eq!(sorted_pairs("--scale", HashMap::<String, u32>::new(), "="), "");
}
