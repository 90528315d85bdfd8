//! Plain-text grid files.
//!
//! A grid is stored as two files:
//!
//! - **coordinates**: one vertex per line, `x y` separated by whitespace
//! - **connectivity**: one triangle per line, three 1-based vertex indices
//!
//! Blank lines are skipped in both. Line `k` of the coordinate file (counting
//! only non-blank lines) becomes vertex `k - 1`.
//!
//! ```text
//! 0.0 0.0        1 2 3
//! 1.0 0.0        1 3 4
//! 1.0 1.0
//! 0.0 1.0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use log::{debug, warn};
use nalgebra::Point2;

use crate::error::{GridError, Result};
use crate::mesh::{build_from_triangles, TriMesh, NODES_PER_TRIANGLE};

/// Load a mesh from a coordinate file and a connectivity file.
///
/// The returned mesh has its boundary flags computed.
///
/// # Example
///
/// ```no_run
/// use trigrid::io::dat;
///
/// let mesh = dat::load("data/coords-square.dat", "data/conn-square.dat").unwrap();
/// println!("{} triangles", mesh.num_triangles());
/// ```
pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(coords_path: P, conn_path: Q) -> Result<TriMesh> {
    let vertices = load_coordinates(coords_path)?;
    let triangles = load_connectivity(conn_path)?;
    build_from_triangles(&vertices, &triangles)
}

/// Read a coordinate file.
pub fn load_coordinates<P: AsRef<Path>>(path: P) -> Result<Vec<Point2<f64>>> {
    let path = path.as_ref();
    let vertices = read_coordinates(open(path)?, path)?;
    debug!("Read {} vertices from {}", vertices.len(), path.display());
    Ok(vertices)
}

/// Read a connectivity file, converting indices to 0-based.
pub fn load_connectivity<P: AsRef<Path>>(path: P) -> Result<Vec<[usize; 3]>> {
    let path = path.as_ref();
    let triangles = read_connectivity(open(path)?, path)?;
    debug!("Read {} triangles from {}", triangles.len(), path.display());
    Ok(triangles)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| GridError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(BufReader::new(file))
}

/// Parse vertex coordinates from `reader`.
///
/// `path` is only used to label errors.
pub fn read_coordinates<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Point2<f64>>> {
    let mut vertices = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = check_line(line, path, line_no)?;
        let Some(values) = parse_line::<f64, 2>(&line, path, line_no)? else {
            continue;
        };
        vertices.push(Point2::new(values[0], values[1]));
    }

    Ok(vertices)
}

/// Parse 1-based triangle connectivity from `reader`.
///
/// `path` is only used to label errors.
pub fn read_connectivity<R: BufRead>(reader: R, path: &Path) -> Result<Vec<[usize; 3]>> {
    let mut triangles = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = check_line(line, path, line_no)?;
        let Some(indices) = parse_line::<usize, NODES_PER_TRIANGLE>(&line, path, line_no)? else {
            continue;
        };

        let mut triangle = [0usize; 3];
        for (slot, &one_based) in triangle.iter_mut().zip(&indices) {
            *slot = one_based.checked_sub(1).ok_or_else(|| GridError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                message: "vertex indices are 1-based, found 0".to_string(),
            })?;
        }
        triangles.push(triangle);
    }

    Ok(triangles)
}

/// Undecodable text is a parse error on that line; other read failures stay I/O errors.
fn check_line(line: std::io::Result<String>, path: &Path, line_no: usize) -> Result<String> {
    line.map_err(|e| match e.kind() {
        ErrorKind::InvalidData => GridError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            message: e.to_string(),
        },
        _ => GridError::Io(e),
    })
}

/// Parse the first `N` whitespace-separated values of a line.
///
/// Returns `Ok(None)` for blank lines. Extra values are ignored with a warning.
fn parse_line<T, const N: usize>(line: &str, path: &Path, line_no: usize) -> Result<Option<[T; N]>>
where
    T: std::str::FromStr + Copy + Default,
    T::Err: std::fmt::Display,
{
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    let parse_error = |message: String| GridError::Parse {
        path: path.to_path_buf(),
        line: line_no,
        message,
    };

    let mut values = [T::default(); N];
    let mut count = 0;
    for token in std::iter::once(first).chain(tokens.by_ref().take(N - 1)) {
        values[count] = token
            .parse()
            .map_err(|e| parse_error(format!("invalid value '{}': {}", token, e)))?;
        count += 1;
    }
    if count < N {
        return Err(parse_error(format!("expected {} values, found {}", N, count)));
    }

    let extra = tokens.count();
    if extra > 0 {
        warn!(
            "{}:{}: ignoring {} extra value(s)",
            path.display(),
            line_no,
            extra
        );
    }

    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn coords(text: &str) -> Result<Vec<Point2<f64>>> {
        read_coordinates(Cursor::new(text), Path::new("coords.dat"))
    }

    fn conn(text: &str) -> Result<Vec<[usize; 3]>> {
        read_connectivity(Cursor::new(text), Path::new("conn.dat"))
    }

    #[test]
    fn test_read_coordinates() {
        let vertices = coords("0 0\n1.5 0\n\n  1.5\t2.0  \n0 2e0\n").unwrap();
        assert_eq!(
            vertices,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.5, 0.0),
                Point2::new(1.5, 2.0),
                Point2::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert_eq!(coords("0 0\n1 1").unwrap().len(), 2);
    }

    #[test]
    fn test_extra_values_ignored() {
        assert_eq!(coords("1 2 3\n").unwrap(), vec![Point2::new(1.0, 2.0)]);
    }

    #[test]
    fn test_malformed_coordinate_line() {
        let err = coords("0 0\n1 x\n").unwrap_err();
        match err {
            GridError::Parse { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = coords("\n\n1\n").unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let bytes = b"0 0\n1 \xff\n".to_vec();
        let err = read_coordinates(Cursor::new(bytes), Path::new("coords.dat")).unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("coords.dat:2:"));

        let bytes = b"1 2 3\n\n\xfe 2 3\n".to_vec();
        let err = read_connectivity(Cursor::new(bytes), Path::new("conn.dat")).unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_connectivity() {
        let triangles = conn("1 2 3\n\n1 3 4\n").unwrap();
        assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_zero_index_rejected() {
        let err = conn("1 2 3\n0 1 2\n").unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("conn.dat:2:"));
    }

    #[test]
    fn test_short_and_negative_connectivity() {
        assert!(matches!(conn("1 2\n"), Err(GridError::Parse { line: 1, .. })));
        assert!(matches!(conn("1 -2 3\n"), Err(GridError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let coords_path = dir.path().join("coords.dat");
        let conn_path = dir.path().join("conn.dat");

        let mut f = File::create(&coords_path).unwrap();
        writeln!(f, "0 0\n1 0\n1 1\n0 1").unwrap();
        let mut f = File::create(&conn_path).unwrap();
        writeln!(f, "1 2 3\n1 3 4").unwrap();

        let mesh = load(&coords_path, &conn_path).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.boundary_flags().count(), 4);
    }

    #[test]
    fn test_load_out_of_range_index() {
        let dir = tempfile::tempdir().unwrap();
        let coords_path = dir.path().join("coords.dat");
        let conn_path = dir.path().join("conn.dat");
        std::fs::write(&coords_path, "0 0\n1 0\n0 1\n").unwrap();
        std::fs::write(&conn_path, "1 2 4\n").unwrap();

        let err = load(&coords_path, &conn_path).unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidVertexIndex {
                triangle: 0,
                vertex: 3
            }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.dat");
        let err = load(&missing, &missing).unwrap_err();
        match err {
            GridError::LoadError { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
