//! Search-as-you-type completion query planning.
//!
//! Given a partial term, optional transliteration/alternate-script variants,
//! a configured set of matching profiles and a result limit, the planner
//! produces a bounded, ordered collection of weighted candidate completion
//! queries for the search backend, plus the profile metadata needed to merge
//! their results. Planning is a pure in-memory transform: executing the
//! candidates and combining their scores is the host application's job.
//!
//! ```
//! use suggest_planner::{CompletionQueryPlanner, ProfileResolver};
//!
//! let resolver = ProfileResolver::with_defaults();
//! let planner = CompletionQueryPlanner::new(&resolver, "default")?;
//! let plan = planner.plan("albert einst", &[], 10);
//! assert!(!plan.candidates.is_empty());
//! # Ok::<(), suggest_planner::ConfigurationError>(())
//! ```

pub mod config;
pub mod error;
pub mod planner;
pub mod profiles;
pub mod results;

pub use error::ConfigurationError;
pub use planner::{CandidateQuery, CompletionQueryPlanner, QueryPlan};
pub use profiles::{FuzzyOptions, Profile, ProfileResolver, ProfileSet};
pub use results::{FullTextResultsType, ResultsType, TitleResultsType};
