//! Cloudflare live integration tests.
//!
//! Run with:
//! ```bash
//! CLOUDFLARE_API_TOKEN=xxx TEST_ZONE=example.com \
//!     cargo test --test cloudflare_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, test_txt_record};

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN and TEST_ZONE"]
async fn test_cloudflare_validate_credentials() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_ZONE");

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let valid = require_ok!(ctx.provider.validate_credentials().await);
    assert!(valid, "credentials should be valid");
}

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN and TEST_ZONE"]
async fn test_cloudflare_get_records() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_ZONE");

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let records = require_ok!(ctx.provider.get_records(&ctx.zone).await);
    println!("zone {} has {} records", ctx.zone, records.len());
}

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN and TEST_ZONE"]
async fn test_cloudflare_record_lifecycle() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_ZONE");

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
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

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN and TEST_ZONE"]
async fn test_cloudflare_unknown_zone_is_zone_not_found() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_ZONE");

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let result = ctx
        .provider
        .get_records("definitely-not-a-zone-8b1f.example")
        .await;
    assert!(matches!(
        result,
        Err(dns_provider_bridge::ProviderError::ZoneNotFound { .. })
    ));
}

/// Removes leftover `_test-*` records (run manually after failures).
#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN and TEST_ZONE"]
async fn test_cloudflare_cleanup_test_records() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_ZONE");

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    ctx.cleanup_test_records().await;
}
