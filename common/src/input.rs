/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::consts::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("version must not be empty")]
    EmptyVersion,
    #[error("version is longer than {MAX_VERSION_LENGTH} characters")]
    VersionTooLong,
    #[error("version `{0}` contains whitespace")]
    VersionWhitespace(String),
    #[error("page size must be between 1 and {MAX_PAGE_SIZE}")]
    PageSize,
    #[error("component key must not be empty")]
    EmptyComponentKey,
}

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

/// Template versions are free form but must be usable as a path segment.
pub fn check_version(version: &str) -> Result<(), InputError> {
    if version.is_empty() {
        return Err(InputError::EmptyVersion);
    }

    if version.len() > MAX_VERSION_LENGTH {
        return Err(InputError::VersionTooLong);
    }

    if version.chars().any(char::is_whitespace) {
        return Err(InputError::VersionWhitespace(version.to_string()));
    }

    Ok(())
}

pub fn check_page_size(page_size: u64) -> Result<u64, InputError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(InputError::PageSize);
    }

    Ok(page_size)
}

pub fn check_component_keys(keys: &[String]) -> Result<(), InputError> {
    if keys.iter().any(|k| k.trim().is_empty()) {
        return Err(InputError::EmptyComponentKey);
    }

    Ok(())
}

pub fn load_secret(f: &str) -> String {
    let s = std::fs::read_to_string(f).unwrap_or_default();
    s.trim().to_string()
}
