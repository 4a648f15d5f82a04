#![deny(missing_docs)]

//! Revealed-preference consistency tests.
//!
//! Every test takes an `N×K` price matrix `p` and bundle matrix `x` with row
//! `i` describing observation `i`. Prices are expected to be normalized so
//! that `p_i · x_i = 1`; this precondition is not checked here (see
//! [`ConsistencyChecker`] for opt-in validation).

mod axioms;
mod checker;
mod cycles;
mod relations;
mod report;
mod smooth;
mod witness;

pub use axioms::{garp, garp_violation, sarp, sarp_violation, strong_sarp, strong_sarp_violation};
pub use checker::ConsistencyChecker;
pub use cycles::{
    cycle_violation, cyclical_monotonicity, cyclical_monotonicity_cycle,
    cyclical_monotonicity_search, harp, harp_cycle, harp_search, harp_violation,
    log_expenditure, negative_cycle_search, no_negative_cycles,
};
pub use relations::{build_relations, expenditure_matrix, preference_closure, RevealedRelations};
pub use report::{
    report_from_json, report_to_json, AxiomCheck, ConsistencyReport, ModifiedPricesReport,
    RelationsReport,
};
pub use smooth::{
    fixed_point, modified_dataset, one_modification, smooth_garp, smooth_garp_violation,
    smooth_sarp, smooth_sarp_violation, FixedPoint,
};
pub use witness::Violation;
