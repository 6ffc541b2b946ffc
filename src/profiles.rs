use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config;
use crate::error::ConfigurationError;

/// Fuzzy-match parameters, copied verbatim into candidate queries built from
/// a fuzzy-capable profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    /// Edit-distance mode, e.g. "AUTO" for automatic-by-length.
    pub fuzziness: String,
    /// Number of leading characters that must match exactly.
    pub prefix_length: u32,
    /// Match on Unicode code points rather than bytes.
    pub unicode_aware: bool,
}

/// A named completion-matching strategy.
///
/// Profiles come from site configuration and are never mutated after
/// resolution; the planner only ever derives new profiles from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Target index field to match against.
    pub field: String,
    /// Minimum trimmed term length for this profile to be eligible.
    /// 0 means always eligible.
    pub min_query_len: u32,
    /// Multiplicative weight applied to this profile's result scores
    /// during later merging.
    pub discount: f64,
    /// Multiplier converting the caller's result limit into the backend
    /// fetch size for this profile's candidate.
    pub fetch_limit_factor: f64,
    /// Fuzzy-match parameters; absent means exact matching only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyOptions>,
    /// Set only on variant-derived profiles. Reserved for future fallback
    /// logic; the planner itself never reads it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Profile {
    /// Derives the profile for the `rank`-th variant (1-based) of the
    /// primary term. Same matching setup, but discounted by the fixed
    /// per-variant constant and by the variant's rank, so later variants
    /// contribute proportionally less.
    pub(crate) fn derive_variant(&self, rank: usize) -> Profile {
        Profile {
            discount: self.discount * config::VARIANT_EXTRA_DISCOUNT / rank as f64,
            fallback: true,
            ..self.clone()
        }
    }
}

/// An ordered, immutable-once-resolved mapping of profile name to profile.
///
/// The planner returns an extended clone of this (base profiles plus any
/// synthesized variant profiles); the resolved instance itself is never
/// touched, which is what makes concurrent `plan()` calls safe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfileSet {
    profiles: IndexMap<String, Profile>,
}

impl ProfileSet {
    pub fn insert(&mut self, name: impl Into<String>, profile: Profile) {
        self.profiles.insert(name.into(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Profile)> {
        self.profiles.iter()
    }
}

impl FromIterator<(String, Profile)> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = (String, Profile)>>(iter: I) -> Self {
        ProfileSet {
            profiles: iter.into_iter().collect(),
        }
    }
}

/// Resolves named profile sets out of explicit configuration.
///
/// Configuration is the JSON mapping `set name -> (profile name -> profile)`
/// handed over by the host application; there is no ambient/global lookup.
/// Validation happens at resolve time so a malformed profile is reported
/// with both its set and profile name.
pub struct ProfileResolver {
    sets: Value,
}

impl ProfileResolver {
    pub fn new(sets: Value) -> Self {
        ProfileResolver { sets }
    }

    /// A resolver carrying only the built-in `default` profile set: two
    /// plain tiers that always run, plus two fuzzy tiers gated behind a
    /// minimum query length. Stop-word and fuzzy tiers are discounted hard
    /// so they only surface when nothing better matches.
    pub fn with_defaults() -> Self {
        Self::new(json!({
            "default": {
                "plain": {
                    "field": "suggest",
                    "min_query_len": 0,
                    "discount": config::defaults::PLAIN_DISCOUNT,
                    "fetch_limit_factor": config::defaults::PLAIN_FETCH_LIMIT_FACTOR,
                },
                "plain-stop": {
                    "field": "suggest-stop",
                    "min_query_len": 0,
                    "discount": config::defaults::PLAIN_STOP_DISCOUNT,
                    "fetch_limit_factor": config::defaults::PLAIN_FETCH_LIMIT_FACTOR,
                },
                "fuzzy": {
                    "field": "suggest",
                    "min_query_len": config::defaults::FUZZY_MIN_QUERY_LEN,
                    "discount": config::defaults::FUZZY_DISCOUNT,
                    "fetch_limit_factor": config::defaults::FUZZY_FETCH_LIMIT_FACTOR,
                    "fuzzy": {
                        "fuzziness": "AUTO",
                        "prefix_length": config::defaults::FUZZY_PREFIX_LENGTH,
                        "unicode_aware": true,
                    },
                },
                "fuzzy-stop": {
                    "field": "suggest-stop",
                    "min_query_len": config::defaults::FUZZY_MIN_QUERY_LEN,
                    "discount": config::defaults::FUZZY_STOP_DISCOUNT,
                    "fetch_limit_factor": config::defaults::FUZZY_FETCH_LIMIT_FACTOR,
                    "fuzzy": {
                        "fuzziness": "AUTO",
                        "prefix_length": config::defaults::FUZZY_PREFIX_LENGTH,
                        "unicode_aware": true,
                    },
                },
            }
        }))
    }

    /// Loads and validates the named profile set.
    pub fn resolve(&self, set_name: &str) -> Result<ProfileSet, ConfigurationError> {
        let set = self
            .sets
            .get(set_name)
            .ok_or_else(|| ConfigurationError::UnknownProfileSet(set_name.to_string()))?;
        let entries = set
            .as_object()
            .ok_or_else(|| ConfigurationError::InvalidProfileSet(set_name.to_string()))?;

        let mut profiles = ProfileSet::default();
        for (name, raw) in entries {
            let profile: Profile = serde_json::from_value(raw.clone()).map_err(|e| {
                ConfigurationError::InvalidProfile {
                    set: set_name.to_string(),
                    profile: name.clone(),
                    source: e,
                }
            })?;
            profiles.insert(name.clone(), profile);
        }

        log::debug!(
            "Resolved completion profile set '{}' ({} profiles)",
            set_name,
            profiles.len()
        );
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_set() {
        let resolver = ProfileResolver::with_defaults();
        let set = resolver.resolve("default").expect("default set resolves");

        assert_eq!(set.len(), 4);
        assert!(set.get("plain").unwrap().fuzzy.is_none());
        assert!(set.get("plain-stop").unwrap().fuzzy.is_none());

        // Both fuzzy tiers sit behind the same length gate.
        let fuzzy = set.get("fuzzy").unwrap();
        assert_eq!(fuzzy.min_query_len, 3);
        assert_eq!(
            fuzzy.fuzzy,
            Some(FuzzyOptions {
                fuzziness: "AUTO".to_string(),
                prefix_length: config::defaults::FUZZY_PREFIX_LENGTH,
                unicode_aware: true,
            })
        );
        assert_eq!(set.get("fuzzy-stop").unwrap().min_query_len, 3);

        // Not mutated into fallback mode by resolution.
        for (_, profile) in set.iter() {
            assert!(!profile.fallback);
        }
    }

    #[test]
    fn test_resolve_unknown_set() {
        let resolver = ProfileResolver::with_defaults();
        let err = resolver.resolve("nope").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownProfileSet(name) if name == "nope"));
    }

    #[test]
    fn test_resolve_missing_required_field() {
        // fetch_limit_factor left out on purpose.
        let resolver = ProfileResolver::new(json!({
            "broken": {
                "plain": {
                    "field": "suggest",
                    "min_query_len": 0,
                    "discount": 1.0,
                },
            }
        }));
        let err = resolver.resolve("broken").unwrap_err();
        match err {
            ConfigurationError::InvalidProfile { set, profile, .. } => {
                assert_eq!(set, "broken");
                assert_eq!(profile, "plain");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_non_object_set() {
        let resolver = ProfileResolver::new(json!({ "weird": [1, 2, 3] }));
        let err = resolver.resolve("weird").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidProfileSet(_)));
    }

    #[test]
    fn test_resolve_preserves_configured_order() {
        let resolver = ProfileResolver::new(json!({
            "ordered": {
                "zeta": { "field": "a", "min_query_len": 0, "discount": 1.0, "fetch_limit_factor": 1.0 },
                "alpha": { "field": "b", "min_query_len": 0, "discount": 1.0, "fetch_limit_factor": 1.0 },
                "mid": { "field": "c", "min_query_len": 0, "discount": 1.0, "fetch_limit_factor": 1.0 },
            }
        }));
        let set = resolver.resolve("ordered").unwrap();
        let names: Vec<&String> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_derive_variant_discounts_by_rank() {
        let resolver = ProfileResolver::with_defaults();
        let set = resolver.resolve("default").unwrap();
        let plain = set.get("plain").unwrap();

        let v1 = plain.derive_variant(1);
        let v2 = plain.derive_variant(2);

        assert_eq!(v1.discount, plain.discount * config::VARIANT_EXTRA_DISCOUNT);
        assert_eq!(v2.discount, plain.discount * config::VARIANT_EXTRA_DISCOUNT / 2.0);
        assert!(v1.fallback && v2.fallback);
        assert_eq!(v1.field, plain.field);
        assert_eq!(v1.fetch_limit_factor, plain.fetch_limit_factor);
        assert_eq!(v1.fuzzy, plain.fuzzy);
    }
}
