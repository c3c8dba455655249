//! Output sinks.

pub mod vtk;
