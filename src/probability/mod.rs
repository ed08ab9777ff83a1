pub mod draw;
pub mod hypergeometric;

pub use draw::{DrawSpec, SpecError};
pub use hypergeometric::{
    combination_count, cumulative_at_least, exact_probability, minimum_count_exact,
    minimum_count_for_target_probability,
};
