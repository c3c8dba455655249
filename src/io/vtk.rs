//! Legacy-VTK rectilinear output.
//!
//! One file per frame on the cell-centered grid: the coordinate vectors,
//! then `thickness`, `u`, `v`, `surface`, and `bath` as CELL_DATA
//! scalars. Readable by ParaView and VisIt without plugins.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::grid::Grid;
use crate::state::{BathArr, StateArr, ID_H, ID_U, ID_V};

/// Error type for VTK output.
#[derive(Debug, Error)]
pub enum VtkError {
    /// I/O failure while writing a frame.
    #[error("VTK I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Numbered frame path: `<base>_<frame>.vtk`.
pub fn frame_path(base: &Path, frame: usize) -> PathBuf {
    let stem = base.to_string_lossy();
    PathBuf::from(format!("{}_{:05}.vtk", stem, frame))
}

/// Write one frame.
pub fn write_frame(
    path: &Path,
    grid: &Grid,
    bath: &BathArr,
    state: &StateArr,
    etime: f64,
) -> Result<(), VtkError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);

    writeln!(w, "# vtk DataFile Version 3.0")?;
    writeln!(w, "swm2d t = {:.9e}", etime)?;
    writeln!(w, "ASCII")?;
    writeln!(w, "DATASET RECTILINEAR_GRID")?;
    writeln!(w, "DIMENSIONS {} {} 1", grid.nx + 1, grid.ny + 1)?;

    writeln!(w, "X_COORDINATES {} double", grid.nx + 1)?;
    for i in 0..=grid.nx {
        writeln!(w, "{:.9e}", i as f64 * grid.dx)?;
    }
    writeln!(w, "Y_COORDINATES {} double", grid.ny + 1)?;
    for j in 0..=grid.ny {
        writeln!(w, "{:.9e}", j as f64 * grid.dy)?;
    }
    writeln!(w, "Z_COORDINATES 1 double")?;
    writeln!(w, "0.0")?;

    writeln!(w, "CELL_DATA {}", grid.nx * grid.ny)?;
    write_scalar(&mut w, grid, "thickness", |j, i| state.get_int(ID_H, j, i))?;
    write_scalar(&mut w, grid, "u", |j, i| state.get_int(ID_U, j, i))?;
    write_scalar(&mut w, grid, "v", |j, i| state.get_int(ID_V, j, i))?;
    write_scalar(&mut w, grid, "surface", |j, i| {
        state.get_int(ID_H, j, i) + bath.get_int(j, i)
    })?;
    write_scalar(&mut w, grid, "bath", |j, i| bath.get_int(j, i))?;

    w.flush()?;
    Ok(())
}

fn write_scalar<W: Write, F: Fn(usize, usize) -> f64>(
    w: &mut W,
    grid: &Grid,
    name: &str,
    value: F,
) -> Result<(), VtkError> {
    writeln!(w, "SCALARS {} double 1", name)?;
    writeln!(w, "LOOKUP_TABLE default")?;
    for j in 0..grid.ny {
        for i in 0..grid.nx {
            writeln!(w, "{:.9e}", value(j, i))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_paths_are_numbered() {
        let p = frame_path(Path::new("out/run"), 7);
        assert_eq!(p, PathBuf::from("out/run_00007.vtk"));
    }

    #[test]
    fn frame_contains_all_fields() {
        let dir = std::env::temp_dir().join("swm_rs_vtk_test");
        let path = dir.join("frame_00000.vtk");
        let grid = Grid::new(4, 2, 1, 4.0, 2.0);
        let mut state = StateArr::new(4, 2, 1);
        let mut bath = BathArr::new(4, 2, 1);
        for j in 0..2 {
            for i in 0..4 {
                state.set_int(ID_H, j, i, 1.0 + i as f64);
                bath.set_int(j, i, 0.5);
            }
        }
        write_frame(&path, &grid, &bath, &state, 0.25).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        for field in ["thickness", "u", "v", "surface", "bath"] {
            assert!(text.contains(&format!("SCALARS {} double 1", field)));
        }
        assert!(text.contains("DIMENSIONS 5 3 1"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
