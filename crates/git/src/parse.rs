// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Defensive parsers for git's line-oriented output. git's output is not a
//! stable API; every parser tolerates junk lines and returns what it can.

/// Count non-empty lines (ls-files, for-each-ref, ...).
pub(crate) fn count_lines(s: &str) -> u64 {
    s.lines().filter(|l| !l.trim().is_empty()).count() as u64
}

/// Parse `git count-objects -v` into total object-store bytes.
/// `size` and `size-pack` are reported in KiB.
pub(crate) fn parse_count_objects(s: &str) -> u64 {
    let mut kib = 0u64;
    for line in s.lines() {
        if let Some((key, value)) = line.split_once(':') {
            match key.trim() {
                "size" | "size-pack" => {
                    kib = kib.saturating_add(value.trim().parse::<u64>().unwrap_or(0));
                }
                _ => {}
            }
        }
    }
    kib.saturating_mul(1024)
}

/// Parse `git rev-list --left-right --count <upstream>...HEAD` output:
/// `"<behind>\t<ahead>"`.
pub(crate) fn parse_left_right(s: &str) -> Option<(u64, u64)> {
    let mut it = s.split_whitespace();
    let behind = it.next()?.parse().ok()?;
    let ahead = it.next()?.parse().ok()?;
    Some((behind, ahead))
}

/// Parse one `cat-file --batch-check='%(objecttype) %(objectname) %(objectsize) %(rest)'`
/// line into (type, size, path). Path is empty for commits/trees without
/// a rest segment.
pub(crate) fn parse_batch_check_line(line: &str) -> Option<(&str, u64, &str)> {
    let mut it = line.splitn(4, ' ');
    let obj_type = it.next()?;
    let _oid = it.next()?;
    let size = it.next()?.parse().ok()?;
    let path = it.next().unwrap_or("");
    Some((obj_type, size, path))
}

/// Parse the parenthesized size in `git lfs ls-files --size` output,
/// e.g. `"a1b2c3 * assets/scene.bin (1.2 GB)"`. LFS prints decimal units.
pub(crate) fn parse_lfs_size(line: &str) -> u64 {
    let Some(start) = line.rfind('(') else {
        return 0;
    };
    let Some(end) = line.rfind(')') else {
        return 0;
    };
    if end <= start {
        return 0;
    }
    let inner = &line[start + 1..end];
    let mut it = inner.split_whitespace();
    let value: f64 = match it.next().and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => return 0,
    };
    let multiplier = match it.next().map(str::to_ascii_lowercase).as_deref() {
        Some("b") => 1.0,
        Some("kb") => 1e3,
        Some("mb") => 1e6,
        Some("gb") => 1e9,
        Some("tb") => 1e12,
        _ => return 0,
    };
    (value * multiplier) as u64
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
