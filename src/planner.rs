// planner.rs — Completion-suggestion query planning.
//
// Turns one raw search term, optional alternate-script/transliteration
// variants, a resolved profile set and a result limit into an ordered set of
// fully-specified candidate queries, plus the (possibly extended) profile
// set needed to weight and merge their results later. Pure computation: no
// network, no index, no state surviving the call.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config;
use crate::error::ConfigurationError;
use crate::profiles::{FuzzyOptions, Profile, ProfileResolver, ProfileSet};

/// One candidate completion query, ready to hand to the execution layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateQuery {
    /// Key of the profile this candidate was built from (base profile name,
    /// or `<profile>-variant-<rank>` for variant-derived candidates).
    pub name: String,
    /// Literal input to match against. Left-trimmed and capped below the
    /// backend's maximum input length; trailing whitespace is preserved.
    pub text: String,
    /// Target index field, copied from the originating profile.
    pub field: String,
    /// Backend fetch size: `limit * fetch_limit_factor`. Deliberately kept
    /// fractional; the transport boundary rounds if it must.
    pub size: f64,
    /// Copied verbatim from the profile when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyOptions>,
}

/// Output of one planning pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    /// Every configured profile (eligible or not) plus any synthesized
    /// variant profiles. Callers rely on the configured profiles always
    /// being present for introspection.
    pub profiles: ProfileSet,
    /// Candidate queries keyed by profile name: primary-term candidates in
    /// configured profile order, then each variant's candidates in rank
    /// order.
    pub candidates: IndexMap<String, CandidateQuery>,
}

/// Deduplicates and orders caller-supplied variants against the primary term.
///
/// Equality is judged on the fully trimmed text; the variant text kept for
/// query building is only left-trimmed, like the primary term. A variant
/// equal to the primary is dropped (the primary is already covered by the
/// base profiles), later duplicates lose to the first occurrence, and order
/// is otherwise preserved. Never fails.
pub fn normalize_variants(term: &str, raw_variants: &[String]) -> Vec<String> {
    let primary = term.trim();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for raw in raw_variants {
        let key = raw.trim();
        if key == primary {
            continue;
        }
        if !seen.insert(key) {
            continue;
        }
        out.push(raw.trim_start().to_string());
    }

    out
}

/// Builds the candidate query for one (profile, text) pair.
///
/// No eligibility screening happens here (that is the planner's job) and
/// there is no failure path for well-formed input.
pub fn build_candidate(name: &str, profile: &Profile, text: &str, limit: u32) -> CandidateQuery {
    CandidateQuery {
        name: name.to_string(),
        text: truncate_input(text),
        field: profile.field.clone(),
        size: f64::from(limit) * profile.fetch_limit_factor,
        fuzzy: profile.fuzzy.clone(),
    }
}

/// Caps the input strictly below `MAX_INPUT_LENGTH` characters.
///
/// Counts characters, not bytes, and cuts on a char boundary so multi-byte
/// text is never split. The backend rejects completion inputs at or above
/// the cap.
fn truncate_input(text: &str) -> String {
    match text.char_indices().nth(config::MAX_INPUT_LENGTH - 1) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Plans the fan-out of completion candidate queries for a search term.
///
/// Holds the resolved profile set as an immutable value; `plan()` allocates
/// fresh output per call, so one planner may be shared across threads.
pub struct CompletionQueryPlanner {
    profiles: ProfileSet,
}

impl CompletionQueryPlanner {
    /// Resolves `set_name` through `resolver` and builds a planner over it.
    /// Configuration problems surface here, never during planning.
    pub fn new(resolver: &ProfileResolver, set_name: &str) -> Result<Self, ConfigurationError> {
        Ok(Self::with_profiles(resolver.resolve(set_name)?))
    }

    pub fn with_profiles(profiles: ProfileSet) -> Self {
        CompletionQueryPlanner { profiles }
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// Plans candidate queries for `term` and its `variants`.
    ///
    /// A profile is eligible when the trimmed character length of the input
    /// reaches its `min_query_len`; the rule is applied to the primary term
    /// and to each variant independently. Per eligible (variant, profile)
    /// pair a `<profile>-variant-<rank>` profile is synthesized with the
    /// rank-decayed discount and added to the returned set.
    ///
    /// Cannot fail: empty term, empty variants and an empty profile set all
    /// produce a well-defined (possibly empty) plan.
    pub fn plan(&self, term: &str, variants: &[String], limit: u32) -> QueryPlan {
        let text = term.trim_start();
        let effective_len = term.trim().chars().count();

        let mut profiles = self.profiles.clone();
        let mut candidates: IndexMap<String, CandidateQuery> = IndexMap::new();

        for (name, profile) in self.profiles.iter() {
            if effective_len >= profile.min_query_len as usize {
                candidates.insert(name.clone(), build_candidate(name, profile, text, limit));
            }
        }

        for (i, variant) in normalize_variants(term, variants).iter().enumerate() {
            let rank = i + 1;
            let variant_len = variant.trim().chars().count();

            for (name, profile) in self.profiles.iter() {
                if variant_len < profile.min_query_len as usize {
                    continue;
                }
                let variant_name = format!("{name}-variant-{rank}");
                // A configured profile may already claim the synthesized
                // name; base profiles are never replaced, so skip it.
                if self.profiles.contains(&variant_name) {
                    log::warn!(
                        "Skipping variant profile '{}': name taken by a configured profile",
                        variant_name
                    );
                    continue;
                }
                let variant_profile = profile.derive_variant(rank);
                candidates.insert(
                    variant_name.clone(),
                    build_candidate(&variant_name, &variant_profile, variant, limit),
                );
                profiles.insert(variant_name, variant_profile);
            }
        }

        log::debug!(
            "Planned {} completion candidates (term len {}, {} profiles, limit {})",
            candidates.len(),
            effective_len,
            profiles.len(),
            limit
        );

        QueryPlan {
            profiles,
            candidates,
        }
    }
}
