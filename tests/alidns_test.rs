//! AliCloud DNS live integration tests.
//!
//! Run with:
//! ```bash
//! ALIDNS_ACCESS_KEY_ID=xxx ALIDNS_ACCESS_KEY_SECRET=xxx TEST_ZONE=example.com \
//!     cargo test --test alidns_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, test_txt_record};

const ENV_VARS: [&str; 3] = [
    "ALIDNS_ACCESS_KEY_ID",
    "ALIDNS_ACCESS_KEY_SECRET",
    "TEST_ZONE",
];

#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_ZONE"]
async fn test_alidns_validate_credentials() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::alidns(), "failed to build test context");
    let valid = require_ok!(ctx.provider.validate_credentials().await);
    assert!(valid, "credentials should be valid");
}

#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_ZONE"]
async fn test_alidns_get_records() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::alidns(), "failed to build test context");
    let records = require_ok!(ctx.provider.get_records(&ctx.zone).await);
    println!("zone {} has {} records", ctx.zone, records.len());
}

#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_ZONE"]
async fn test_alidns_record_lifecycle() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::alidns(), "failed to build test context");
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

/// Removes leftover `_test-*` records (run manually after failures).
#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_ZONE"]
async fn test_alidns_cleanup_test_records() {
    skip_if_no_credentials!(ENV_VARS[0], ENV_VARS[1], ENV_VARS[2]);

    let ctx = require_some!(TestContext::alidns(), "failed to build test context");
    ctx.cleanup_test_records().await;
}
