// ABOUTME: Temporal normalization of zone-aware date-times into zone-naive values
// ABOUTME: Applies a configurable reference timezone before values reach the driver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors

//! Temporal normalizer
//!
//! Zone-aware values are converted into the naive date-time of the same instant as
//! observed in a [`ReferenceZone`]. Every other value passes through untouched.

use crate::constants::env_config;
use crate::errors::{AppError, AppResult};
use crate::value::SqlValue;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Timezone used to observe zone-aware instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceZone {
    /// The system local zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset from UTC
    Fixed(FixedOffset),
}

impl ReferenceZone {
    /// Naive date-time of `instant` as observed in this zone
    #[must_use]
    pub fn observe(&self, instant: &DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Utc => instant.naive_utc(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Normalize a value for binding
    #[must_use]
    pub fn normalize(&self, value: SqlValue) -> SqlValue {
        match value {
            SqlValue::Timestamp(instant) => SqlValue::DateTime(self.observe(&instant)),
            SqlValue::Seq(items) => items.into_iter().map(|v| self.normalize(v)).collect(),
            other => other,
        }
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for ReferenceZone {
    type Err = AppError;

    /// Accepts `local`, `utc` / `z`, or an offset `+HH:MM`, `-HH:MM`, `+HHMM`, `+HH`
    fn from_str(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        parse_offset(trimmed)
            .map(Self::Fixed)
            .ok_or_else(|| {
                AppError::config_invalid(
                    env_config::REFERENCE_ZONE,
                    s,
                    "expected local, utc or ±HH:MM",
                )
            })
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
