//! Constant linear maps between cell-average stencils, polynomial
//! coefficients, and GLL point values.

mod transforms;

pub use transforms::Transforms;
pub(crate) use transforms::{cell_average_matrix, invert};
