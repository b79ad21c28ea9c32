/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// One dot separated version segment. Non numeric segments sort below every
/// number and are equal to each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Text,
    Number(String),
}

fn segment(raw: &str) -> Segment {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let digits = raw.trim_start_matches('0');
        Segment::Number(if digits.is_empty() { "0" } else { digits }.to_string())
    } else {
        Segment::Text
    }
}

fn compare_segment(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Number(a), Segment::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn segments(version: &str) -> Vec<Segment> {
    version.split('.').map(segment).collect()
}

pub fn compare_version(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (a, b) = (segments(a), segments(b));
    for (left, right) in a.iter().zip(b.iter()) {
        match compare_segment(left, right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a.len().cmp(&b.len())
}

/// Sorts newest first. Versions comparing equal keep their input order.
pub fn sorted_descending<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|a, b| compare_version(b.as_ref(), a.as_ref()));
}

/// A template version available for a group, with the time its content last changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub version: String,
    pub updated_at: NaiveDateTime,
}

/// Versions the installed `current` version can move to. A version equal to
/// the installed one qualifies only when its template was patched after the
/// installed template. Without an installed version every candidate qualifies.
pub fn upgradeable_versions(
    current: Option<&str>,
    current_updated_at: Option<NaiveDateTime>,
    candidates: &[Candidate],
) -> Vec<String> {
    let mut versions: Vec<String> = Vec::new();

    for candidate in candidates {
        let upgradeable = match current {
            None => true,
            Some(current) => match compare_version(&candidate.version, current) {
                Ordering::Greater => true,
                Ordering::Equal => current_updated_at
                    .map(|installed| candidate.updated_at > installed)
                    .unwrap_or(false),
                Ordering::Less => false,
            },
        };

        if upgradeable && !versions.contains(&candidate.version) {
            versions.push(candidate.version.clone());
        }
    }

    sorted_descending(&mut versions);
    versions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn candidate(version: &str, hour: u32) -> Candidate {
        Candidate {
            version: version.to_string(),
            updated_at: at(hour),
        }
    }

    #[test]
    fn test_numeric_segments() {
        assert_eq!(compare_version("1.2.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_version("1.10.0", "1.2.0"), Ordering::Greater);
        assert_eq!(compare_version("2.0", "2.0"), Ordering::Equal);
        assert_eq!(compare_version("10", "9"), Ordering::Greater);
    }

    #[test]
    fn test_antisymmetric() {
        let versions = ["1", "1.0", "1.0.1", "0.9", "2.10", "2.9.9", "10.0"];
        for a in versions {
            for b in versions {
                assert_eq!(compare_version(a, b), compare_version(b, a).reverse(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_shorter_is_smaller() {
        assert_eq!(compare_version("1.0", "1.0.0"), Ordering::Less);
        assert_eq!(compare_version("1.0.0", "1.0"), Ordering::Greater);
    }

    #[test]
    fn test_text_below_numbers() {
        assert_eq!(compare_version("1.beta", "1.0"), Ordering::Less);
        assert_eq!(compare_version("v2", "1"), Ordering::Less);
        assert_eq!(compare_version("1.alpha", "1.beta"), Ordering::Equal);
    }

    #[test]
    fn test_large_numbers() {
        assert_eq!(
            compare_version("1.99999999999999999999999", "1.100000000000000000000000"),
            Ordering::Less
        );
        assert_eq!(compare_version("1.007", "1.7"), Ordering::Equal);
    }

    #[test]
    fn test_sorted_descending_is_stable() {
        let mut versions = vec!["1.0", "1.alpha", "2.0", "1.beta", "1.10"];
        sorted_descending(&mut versions);
        assert_eq!(versions, vec!["2.0", "1.10", "1.0", "1.alpha", "1.beta"]);
    }

    #[test]
    fn test_upgradeable_versions() {
        let candidates = vec![
            candidate("1.0.0", 10),
            candidate("1.1.0", 11),
            candidate("0.9.0", 15),
        ];
        assert_eq!(
            upgradeable_versions(Some("1.0.0"), Some(at(10)), &candidates),
            vec!["1.1.0".to_string()]
        );
    }

    #[test]
    fn test_patched_template_is_upgradeable() {
        let candidates = vec![candidate("1.0.0", 12), candidate("1.1.0", 11)];
        assert_eq!(
            upgradeable_versions(Some("1.0.0"), Some(at(10)), &candidates),
            vec!["1.1.0".to_string(), "1.0.0".to_string()]
        );
    }

    #[test]
    fn test_without_installed_version() {
        let candidates = vec![candidate("1.0", 1), candidate("2.0", 1), candidate("2.0", 2)];
        assert_eq!(
            upgradeable_versions(None, None, &candidates),
            vec!["2.0".to_string(), "1.0".to_string()]
        );
    }
}
