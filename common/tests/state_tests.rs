/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the declarative region and catalog state

use common::state::*;
use std::io::Write;

#[test]
fn test_state_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "regions": [{{"name": "rainbond", "url": "https://region.example.com:8443"}}],
            "labels": [{{"name": "gpu"}}],
            "plugins": [{{"name": "mesh", "category": "net-plugin:up", "build_version": "v1", "origin_key": "mesh-key"}}]
        }}"#
    )
    .unwrap();

    let config = StateConfiguration::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.regions.len(), 1);
    assert_eq!(config.regions[0].token_file, None);
    assert_eq!(config.labels[0].name, "gpu");
    assert_eq!(config.plugins[0].origin_key.as_deref(), Some("mesh-key"));
    assert!(config.validate().is_empty());
}

#[test]
fn test_state_validation_reports_every_problem() {
    let config = StateConfiguration {
        regions: vec![
            StateRegion {
                name: "rainbond".to_string(),
                url: "region.example.com".to_string(),
                token_file: None,
            },
            StateRegion {
                name: "rainbond".to_string(),
                url: "https://region.example.com".to_string(),
                token_file: None,
            },
        ],
        labels: vec![
            StateLabel { name: "gpu".to_string() },
            StateLabel { name: "gpu".to_string() },
        ],
        plugins: vec![],
    };

    let errors = config.validate();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].field, "regions.rainbond.url");
    assert_eq!(errors[1].field, "regions.rainbond.name");
    assert_eq!(errors[2].field, "labels.gpu.name");
}

#[test]
fn test_state_missing_file() {
    assert!(StateConfiguration::from_file("/nonexistent/keel-state.json").is_err());
}
