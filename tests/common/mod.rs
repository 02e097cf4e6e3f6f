//! Shared test helpers.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_provider_bridge::{ProviderCredentials, Record, RecordProvider, RecordType, create_provider};

/// Skip the test when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Generates a unique record name so parallel test runs don't collide.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Fresh TXT record with a unique name, suitable for live CRUD tests.
pub fn test_txt_record() -> Record {
    Record::new(RecordType::Txt, generate_test_record_name(), "test-value-1").with_ttl(600)
}

/// Wraps a provider and the zone live tests run against.
pub struct TestContext {
    pub provider: Arc<dyn RecordProvider>,
    pub zone: String,
}

impl TestContext {
    /// Cloudflare context from `CLOUDFLARE_API_TOKEN` and `TEST_ZONE`.
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let zone = env::var("TEST_ZONE").ok()?;

        let provider = create_provider(ProviderCredentials::Cloudflare { api_token }).ok()?;
        Some(Self { provider, zone })
    }

    /// AliCloud context from `ALIDNS_ACCESS_KEY_ID`, `ALIDNS_ACCESS_KEY_SECRET`
    /// and `TEST_ZONE`.
    pub fn alidns() -> Option<Self> {
        let access_key_id = env::var("ALIDNS_ACCESS_KEY_ID").ok()?;
        let access_key_secret = env::var("ALIDNS_ACCESS_KEY_SECRET").ok()?;
        let zone = env::var("TEST_ZONE").ok()?;

        let provider = create_provider(ProviderCredentials::Alidns {
            access_key_id,
            access_key_secret,
        })
        .ok()?;
        Some(Self { provider, zone })
    }

    /// Huawei Cloud context from `HUAWEICLOUD_ACCESS_KEY_ID`,
    /// `HUAWEICLOUD_SECRET_ACCESS_KEY` and `TEST_ZONE`.
    pub fn huaweicloud() -> Option<Self> {
        let access_key_id = env::var("HUAWEICLOUD_ACCESS_KEY_ID").ok()?;
        let secret_access_key = env::var("HUAWEICLOUD_SECRET_ACCESS_KEY").ok()?;
        let zone = env::var("TEST_ZONE").ok()?;

        let provider = create_provider(ProviderCredentials::Huaweicloud {
            access_key_id,
            secret_access_key,
        })
        .ok()?;
        Some(Self { provider, zone })
    }

    /// Deletes every record whose name starts with the `_test-` marker.
    pub async fn cleanup_test_records(&self) {
        let Ok(records) = self.provider.get_records(&self.zone).await else {
            eprintln!("cleanup: could not list records");
            return;
        };
        let leftovers: Vec<Record> = records
            .into_iter()
            .filter(|r| r.name.starts_with("_test-"))
            .collect();
        if leftovers.is_empty() {
            return;
        }
        match self.provider.delete_records(&self.zone, &leftovers).await {
            Ok(deleted) => eprintln!("cleanup: removed {} test records", deleted.len()),
            Err(e) => eprintln!("cleanup: {e}"),
        }
    }
}
