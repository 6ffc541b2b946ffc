// IMPORTANT:
// Keep ALL numeric values centralized here (repo rule: no hardcoded numeric values scattered around).

/// Hard cap on completion input length, in characters (not bytes).
///
/// The suggest backend rejects or mishandles completion inputs at or above
/// this length, so every candidate's text must stay strictly below it.
pub const MAX_INPUT_LENGTH: usize = 50;

/// Extra multiplicative discount applied to every variant-derived profile,
/// on top of the division by the variant's 1-based rank. Keeps variant
/// matches ranked below primary-term matches of equal raw score.
pub const VARIANT_EXTRA_DISCOUNT: f64 = 0.0001;

pub mod defaults {
    // Tuning for the built-in "default" profile set. The plain tiers are
    // always eligible; both fuzzy tiers are gated behind a minimum query
    // length because fuzzy matching on 1-2 character inputs is all noise.

    pub const PLAIN_DISCOUNT: f64 = 1.0;
    pub const PLAIN_STOP_DISCOUNT: f64 = 0.001;
    pub const FUZZY_DISCOUNT: f64 = 0.000_001;
    pub const FUZZY_STOP_DISCOUNT: f64 = 0.000_000_01;

    pub const PLAIN_FETCH_LIMIT_FACTOR: f64 = 2.0;
    pub const FUZZY_FETCH_LIMIT_FACTOR: f64 = 1.5;

    pub const FUZZY_MIN_QUERY_LEN: u32 = 3;

    pub const FUZZY_PREFIX_LENGTH: u32 = 1;
}

pub mod highlight {
    pub const PRE_TAG: &str = "<span class=\"searchmatch\">";
    pub const POST_TAG: &str = "</span>";

    // One fragment of the body text is all the surrounding UI displays.
    pub const TEXT_FRAGMENT_SIZE: u32 = 100;
    // For list fields we want the whole matched value; more than this is crazy.
    pub const LIST_FIELD_FRAGMENT_SIZE: u32 = 10_000;
}
