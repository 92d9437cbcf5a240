// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

use super::*;

#[yare::parameterized(
    zero = { 0, "0 B" },
    bytes = { 512, "512 B" },
    kib = { 2048, "2.0 KiB" },
    mib = { 5 * 1024 * 1024, "5.0 MiB" },
    gib = { 3 * 1024 * 1024 * 1024, "3.0 GiB" },
    fractional = { 1536, "1.5 KiB" },
)]
fn bytes_formatting(input: u64, expected: &str) {
    assert_eq!(format_bytes(input), expected);
}

#[yare::parameterized(
    seconds = { 45, "45s" },
    minutes = { 150, "2m 30s" },
    hours = { 3900, "1h 5m" },
)]
fn duration_formatting(secs: u64, expected: &str) {
    assert_eq!(format_duration(Duration::from_secs(secs)), expected);
}
