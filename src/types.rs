use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// Resource record type mnemonic.
///
/// The common mnemonics get their own variants; anything else passes through
/// opaquely as [`Other`](Self::Other) so providers that accept exotic types
/// (`ALIAS`, `HTTPS`, `SVCB`, ...) keep working without this crate knowing
/// about them.
///
/// Serialized as the uppercase string form (`"A"`, `"AAAA"`, `"CNAME"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Any type this crate has no dedicated variant for, stored uppercase.
    Other(String),
}

impl RecordType {
    /// Returns the uppercase wire mnemonic for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Other(s) => s,
        }
    }

    /// Parses a mnemonic, case-insensitively. Never fails: unknown mnemonics
    /// become [`Other`](Self::Other) with the uppercased input.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this type carries a meaningful [`Record::priority`].
    pub fn uses_priority(&self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for RecordType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

// ============ Record ============

/// A DNS record in the provider-neutral shape exchanged with every adapter.
///
/// # Identity
///
/// A non-empty [`id`](Self::id) is the provider's authoritative handle for the
/// record and always wins over name/value matching. When `id` is empty (the
/// record is not yet known to the provider, or the caller didn't track it),
/// the natural key is `(record_type, name, value)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Opaque provider-assigned identifier; empty means "not yet known".
    #[serde(default)]
    pub id: String,
    /// Resource record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Host name relative to the zone. `""` or `"@"` addresses the zone apex.
    pub name: String,
    /// Provider-specific string payload for this record type.
    pub value: String,
    /// Time to live in seconds. `0` means "use the provider default".
    #[serde(default)]
    pub ttl: u32,
    /// Weight for `MX`/`SRV`-like types; meaningless elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl Record {
    /// Builds a record that is not yet known to any provider.
    pub fn new(record_type: RecordType, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            record_type,
            name: name.into(),
            value: value.into(),
            ttl: 0,
            priority: None,
        }
    }

    /// Sets the TTL (seconds; `0` = provider default).
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the MX/SRV priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether this record addresses the zone apex (`""` or `"@"`).
    pub fn is_apex(&self) -> bool {
        self.name.is_empty() || self.name == "@"
    }

    /// Whether the provider has assigned this record an identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

// ============ Provider Types ============

/// Identifies a provider implementation.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Alibaba Cloud DNS. Requires feature `alidns`.
    #[cfg(feature = "alidns")]
    Alidns,
    /// Cloudflare DNS. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    Cloudflare,
    /// Huawei Cloud DNS. Requires feature `huaweicloud`.
    #[cfg(feature = "huaweicloud")]
    Huaweicloud,
    /// In-process reference backend. Requires feature `memory`.
    #[cfg(feature = "memory")]
    Memory,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "alidns")]
            Self::Alidns => write!(f, "alidns"),
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare => write!(f, "cloudflare"),
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud => write!(f, "huaweicloud"),
            #[cfg(feature = "memory")]
            Self::Memory => write!(f, "memory"),
        }
    }
}

// ============ Provider Metadata ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"apiToken"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Token"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Static metadata describing a provider: identity plus the credential
/// fields needed to construct it.
///
/// Obtain via [`RecordProvider::metadata()`](crate::RecordProvider::metadata)
/// or [`all_provider_metadata()`](crate::all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Credential fields required to authenticate with this provider.
    pub required_fields: Vec<ProviderCredentialField>,
}

// ============ Credentials ============

/// Validation error for provider credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
    },
    /// The provider has no flat-credential form (or its feature is disabled).
    Unsupported {
        /// Which provider the error relates to.
        provider: ProviderType,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { provider, field } => {
                write!(f, "[{provider}] Missing required credential field: {field}")
            }
            Self::EmptyField { provider, field } => {
                write!(f, "[{provider}] Credential field must not be empty: {field}")
            }
            Self::Unsupported { provider } => {
                write!(f, "[{provider}] Provider does not take flat credentials")
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for the supported providers.
///
/// Each variant holds the flat set of authentication fields its provider
/// requires. Pass this to [`create_provider()`](crate::create_provider).
///
/// # Serialization
///
/// Tagged with `"provider"`, content under `"credentials"`:
///
/// ```json
/// { "provider": "cloudflare", "credentials": { "api_token": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Alibaba Cloud DNS credentials. Requires feature `alidns`.
    #[cfg(feature = "alidns")]
    #[serde(rename = "alidns")]
    Alidns {
        /// Alibaba Cloud Access Key ID.
        access_key_id: String,
        /// Alibaba Cloud Access Key Secret.
        access_key_secret: String,
    },

    /// Cloudflare credentials. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token.
        api_token: String,
    },

    /// Huawei Cloud DNS credentials. Requires feature `huaweicloud`.
    #[cfg(feature = "huaweicloud")]
    #[serde(rename = "huaweicloud")]
    Huaweicloud {
        /// Huawei Cloud Access Key ID.
        access_key_id: String,
        /// Huawei Cloud Secret Access Key.
        secret_access_key: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a flat key-value map, validating required
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or
    /// empty, or if the provider takes no flat credentials.
    pub fn from_map(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            #[cfg(feature = "alidns")]
            ProviderType::Alidns => Ok(Self::Alidns {
                access_key_id: Self::required_field(provider, map, "accessKeyId")?,
                access_key_secret: Self::required_field(provider, map, "accessKeySecret")?,
            }),
            #[cfg(feature = "cloudflare")]
            ProviderType::Cloudflare => Ok(Self::Cloudflare {
                api_token: Self::required_field(provider, map, "apiToken")?,
            }),
            #[cfg(feature = "huaweicloud")]
            ProviderType::Huaweicloud => Ok(Self::Huaweicloud {
                access_key_id: Self::required_field(provider, map, "accessKeyId")?,
                secret_access_key: Self::required_field(provider, map, "secretAccessKey")?,
            }),
            #[allow(unreachable_patterns)]
            _ => Err(CredentialValidationError::Unsupported {
                provider: provider.clone(),
            }),
        }
    }

    fn required_field(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
        key: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: provider.clone(),
                field: key.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: provider.clone(),
                field: key.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a flat key-value map for storage.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        match self {
            #[cfg(feature = "alidns")]
            Self::Alidns {
                access_key_id,
                access_key_secret,
            } => [
                ("accessKeyId".to_string(), access_key_id.clone()),
                ("accessKeySecret".to_string(), access_key_secret.clone()),
            ]
            .into(),
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { api_token } => [("apiToken".to_string(), api_token.clone())].into(),
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud {
                access_key_id,
                secret_access_key,
            } => [
                ("accessKeyId".to_string(), access_key_id.clone()),
                ("secretAccessKey".to_string(), secret_access_key.clone()),
            ]
            .into(),
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "alidns")]
            Self::Alidns { .. } => ProviderType::Alidns,
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => ProviderType::Cloudflare,
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud { .. } => ProviderType::Huaweicloud,
        }
    }
}
