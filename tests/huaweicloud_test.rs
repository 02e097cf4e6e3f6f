//! Huawei Cloud DNS live integration tests.
//!
//! Run with:
//! ```bash
//! HUAWEICLOUD_ACCESS_KEY_ID=xxx HUAWEICLOUD_SECRET_ACCESS_KEY=xxx TEST_ZONE=example.com \
//!     cargo test --test huaweicloud_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, generate_test_record_name, test_txt_record};
use dns_provider_bridge::{Record, RecordType};

const ENV_VARS: [&str; 3] = [
    "HUAWEICLOUD_ACCESS_KEY_ID",
    "HUAWEICLOUD_SECRET_ACCESS_KEY",
    "TEST_ZONE",
];

#[tokio::test]
#[ignore = "integration test: requires HUAWEICLOUD_ACCESS_KEY_ID, HUAWEICLOUD_SECRET_ACCESS_KEY and TEST_ZONE"]
async fn test_huaweicloud_validate_credentials() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::huaweicloud(), "failed to build test context");
    let valid = require_ok!(ctx.provider.validate_credentials().await);
    assert!(valid, "credentials should be valid");
}

#[tokio::test]
#[ignore = "integration test: requires HUAWEICLOUD_ACCESS_KEY_ID, HUAWEICLOUD_SECRET_ACCESS_KEY and TEST_ZONE"]
async fn test_huaweicloud_get_records() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::huaweicloud(), "failed to build test context");
    let records = require_ok!(ctx.provider.get_records(&ctx.zone).await);
    println!("zone {} has {} records", ctx.zone, records.len());
}

#[tokio::test]
#[ignore = "integration test: requires HUAWEICLOUD_ACCESS_KEY_ID, HUAWEICLOUD_SECRET_ACCESS_KEY and TEST_ZONE"]
async fn test_huaweicloud_record_lifecycle() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::huaweicloud(), "failed to build test context");
    let input = test_txt_record();

    let created = require_ok!(
        ctx.provider
            .append_records(&ctx.zone, std::slice::from_ref(&input))
            .await,
        "append failed"
    );
    assert_eq!(created.len(), 1);
    assert!(created[0].has_id());

    let mut changed = created[0].clone();
    changed.value = "test-value-2".to_string();
    let updated = require_ok!(
        ctx.provider
            .set_records(&ctx.zone, std::slice::from_ref(&changed))
            .await,
        "set failed"
    );
    assert_eq!(updated[0].value, "test-value-2");

    let deleted = require_ok!(
        ctx.provider.delete_records(&ctx.zone, &updated).await,
        "delete failed"
    );
    assert_eq!(deleted.len(), 1);
}

/// Two TXT values under one name land in a single record set upstream but
/// surface as two records with distinct `{recordset}:{index}` IDs.
#[tokio::test]
#[ignore = "integration test: requires HUAWEICLOUD_ACCESS_KEY_ID, HUAWEICLOUD_SECRET_ACCESS_KEY and TEST_ZONE"]
async fn test_huaweicloud_multi_value_recordset() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::huaweicloud(), "failed to build test context");
    let name = generate_test_record_name();

    let created = require_ok!(
        ctx.provider
            .append_records(
                &ctx.zone,
                &[
                    Record::new(RecordType::Txt, &name, "value-one").with_ttl(300),
                    Record::new(RecordType::Txt, &name, "value-two").with_ttl(300),
                ],
            )
            .await,
        "append failed"
    );
    assert_eq!(created.len(), 2);
    assert_ne!(created[0].id, created[1].id);

    let live = require_ok!(ctx.provider.get_records(&ctx.zone).await);
    let values: Vec<&str> = live
        .iter()
        .filter(|r| r.name == name)
        .map(|r| r.value.as_str())
        .collect();
    assert_eq!(values.len(), 2);

    let deleted = require_ok!(
        ctx.provider.delete_records(&ctx.zone, &created).await,
        "delete failed"
    );
    assert_eq!(deleted.len(), 2);
}

/// Removes leftover `_test-*` records (run manually after failures).
#[tokio::test]
#[ignore = "integration test: requires HUAWEICLOUD_ACCESS_KEY_ID, HUAWEICLOUD_SECRET_ACCESS_KEY and TEST_ZONE"]
async fn test_huaweicloud_cleanup_test_records() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::huaweicloud(), "failed to build test context");
    ctx.cleanup_test_records().await;
}
