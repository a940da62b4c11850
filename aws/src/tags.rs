//! Resource tag filtering

use crate::api::kendra::Tag;
use std::collections::BTreeMap;

/// Keys with this prefix are reserved for AWS and never surfaced
pub const AWS_TAG_KEY_PREFIX: &str = "aws:";

/// Tags the provider was configured to ignore
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgnoreTagsConfig {
    pub keys: Vec<String>,
    pub key_prefixes: Vec<String>,
}

impl IgnoreTagsConfig {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.key_prefixes.is_empty()
    }

    fn ignores(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
            || self.key_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueTags(BTreeMap<String, String>);

impl KeyValueTags {
    pub fn from_kendra(tags: Vec<Tag>) -> Self {
        Self(tags.into_iter().map(|t| (t.key, t.value)).collect())
    }

    /// Drop AWS-reserved tags
    pub fn ignore_aws(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(k, _)| !k.starts_with(AWS_TAG_KEY_PREFIX))
                .collect(),
        )
    }

    pub fn ignore_config(self, config: &IgnoreTagsConfig) -> Self {
        if config.is_empty() {
            return self;
        }
        Self(
            self.0
                .into_iter()
                .filter(|(k, _)| !config.ignores(k))
                .collect(),
        )
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}
