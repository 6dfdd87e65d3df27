// ABOUTME: Integration tests for reference-zone normalization of zone-aware arguments
// ABOUTME: The same instant selects different rows depending on the configured zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SqlTemplate Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use common::{empnos, text_template, Emp};
use sqltemplate::{Bean, BeanDescriptorBuilder, ReferenceZone, SqlValue};
use std::collections::HashMap;

/// Bean exposing a zone-aware cutoff
struct HiredBefore {
    cutoff: DateTime<Utc>,
}

impl Bean for HiredBefore {
    fn describe(builder: BeanDescriptorBuilder<Self>) -> BeanDescriptorBuilder<Self> {
        builder.accessor("hiredBefore", |h| h.cutoff.into())
    }
}

fn tokyo() -> ReferenceZone {
    ReferenceZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap())
}

/// 1981-02-19 20:00 UTC is already 1981-02-20 in Tokyo, ALLEN's hire date
fn cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1981, 2, 19, 20, 0, 0).unwrap()
}

#[tokio::test]
async fn test_bean_instant_observed_in_utc() -> Result<()> {
    let sql = text_template().await?.with_zone(ReferenceZone::Utc);

    let rows: Vec<Emp> = sql
        .for_list("emp/selectHiredBefore.sql", &HiredBefore { cutoff: cutoff() })
        .await?;

    assert_eq!(empnos(&rows), vec![7369]);
    Ok(())
}

#[tokio::test]
async fn test_bean_instant_observed_in_reference_zone() -> Result<()> {
    let sql = text_template().await?.with_zone(tokyo());

    let rows: Vec<Emp> = sql
        .for_list("emp/selectHiredBefore.sql", &HiredBefore { cutoff: cutoff() })
        .await?;

    assert_eq!(empnos(&rows), vec![7369, 7499]);
    Ok(())
}

#[tokio::test]
async fn test_map_instant_is_normalized_too() -> Result<()> {
    let sql = text_template().await?.with_zone(tokyo());
    let mut args = HashMap::new();
    args.insert("hiredBefore", SqlValue::from(cutoff()));

    let bound = sql.prepare("emp/selectHiredBefore.sql", args)?;

    let expected = NaiveDate::from_ymd_opt(1981, 2, 20)
        .unwrap()
        .and_hms_opt(5, 0, 0)
        .unwrap();
    assert_eq!(bound.values, vec![SqlValue::DateTime(expected)]);
    Ok(())
}

#[tokio::test]
async fn test_naive_values_are_untouched() -> Result<()> {
    let sql = text_template().await?.with_zone(tokyo());
    let cutoff = NaiveDate::from_ymd_opt(1981, 2, 21).unwrap();

    let rows: Vec<Emp> = sql
        .query("emp/selectHiredBefore.sql")
        .add("hiredBefore", cutoff)
        .for_list()
        .await?;

    assert_eq!(empnos(&rows), vec![7369, 7499]);
    Ok(())
}

#[tokio::test]
async fn test_zone_change_keeps_descriptor_cache() -> Result<()> {
    let sql = text_template().await?;
    let _: Vec<Emp> = sql
        .for_list("emp/selectHiredBefore.sql", &HiredBefore { cutoff: cutoff() })
        .await?;
    assert_eq!(sql.parameters().registry().len(), 1);

    let zoned = sql.with_zone(ReferenceZone::Utc);
    assert_eq!(zoned.parameters().registry().len(), 1);
    assert_eq!(zoned.parameters().zone(), ReferenceZone::Utc);
    Ok(())
}
