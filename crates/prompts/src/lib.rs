//! Prompt assembly for the Sustainly LLM collaborator.
//!
//! Turns a semantic [`PromptRequest`] into finished prompt text:
//!
//! 1. resolve the template category (exhaustive, no fallback)
//! 2. fetch the template body, plus a random refinement phrase for
//!    refinement-bearing categories
//! 3. build the category's field bag
//! 4. fill the template with the substitution engine
//!
//! [`ReportJob`] drives the weekly likelihood report end to end, from the
//! trigger log through the estimator to the finished prompt.

mod assembler;
mod fields;
mod report;
mod request;

pub use assembler::{Prompt, PromptAssembler};
pub use fields::{PeriodFields, Trend, TrendMarkers};
pub use report::{LikelihoodReport, PeriodReport, ReportJob, estimator_from_totals};
pub use request::{PromptRequest, resolve_topic, resolve_trigger};
