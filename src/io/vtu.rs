//! VTK XML output for ParaView.
//!
//! [`write_vtu`] writes one mesh with its vertex fields as an ASCII
//! UnstructuredGrid file. [`PvdSeries`] numbers a sequence of such files and
//! keeps a `.pvd` collection file listing all of them, so ParaView can step
//! through refinement levels (or time steps) as one data set.
//!
//! Points are written in 3D with `z = 0`.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{GridError, Result};
use crate::field::ScalarField;
use crate::mesh::{TriMesh, NODES_PER_TRIANGLE};

/// VTK cell type id of a linear triangle.
const VTK_TRIANGLE: u8 = 5;

/// Write `mesh` and `fields` to a `.vtu` file, replacing any existing file.
///
/// # Errors
/// [`GridError::FieldLengthMismatch`] if a field does not have one value per
/// vertex; nothing is written in that case.
pub fn write_vtu<P: AsRef<Path>>(path: P, mesh: &TriMesh, fields: &[ScalarField]) -> Result<()> {
    let path = path.as_ref();
    check_fields(mesh, fields)?;

    let file = File::create(path).map_err(|e| GridError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut w = BufWriter::new(file);
    write_vtu_to(&mut w, mesh, fields)?;
    w.flush()?;

    debug!(
        "Wrote {} ({} points, {} cells, {} fields)",
        path.display(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        fields.len()
    );
    Ok(())
}

/// Write the VTU document for `mesh` and `fields` to any writer.
pub fn write_vtu_to<W: Write>(w: &mut W, mesh: &TriMesh, fields: &[ScalarField]) -> Result<()> {
    check_fields(mesh, fields)?;

    writeln!(w, r#"<?xml version="1.0"?>"#)?;
    writeln!(
        w,
        r#"<VTKFile type="UnstructuredGrid" version="0.1" byte_order="LittleEndian">"#
    )?;
    writeln!(w, "\t<UnstructuredGrid>")?;
    writeln!(
        w,
        "\t\t<Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">",
        mesh.num_vertices(),
        mesh.num_triangles()
    )?;

    write_point_data(w, fields)?;
    writeln!(w, "\t\t\t<CellData />")?;
    write_points(w, mesh)?;
    write_cells(w, mesh)?;

    writeln!(w, "\t\t</Piece>")?;
    writeln!(w, "\t</UnstructuredGrid>")?;
    writeln!(w, "</VTKFile>")?;
    Ok(())
}

fn check_fields(mesh: &TriMesh, fields: &[ScalarField]) -> Result<()> {
    match fields.iter().find(|f| !f.matches(mesh)) {
        Some(f) => Err(GridError::field_mismatch(
            f.name(),
            mesh.num_vertices(),
            f.len(),
        )),
        None => Ok(()),
    }
}

fn write_point_data<W: Write>(w: &mut W, fields: &[ScalarField]) -> Result<()> {
    let Some(first) = fields.first() else {
        writeln!(w, "\t\t\t<PointData />")?;
        return Ok(());
    };

    writeln!(w, "\t\t\t<PointData Scalars=\"{}\">", escape_attr(first.name()))?;
    for field in fields {
        writeln!(
            w,
            "\t\t\t\t<DataArray Name=\"{}\" type=\"Float64\" format=\"ascii\">",
            escape_attr(field.name())
        )?;
        for value in field.values() {
            writeln!(w, "\t\t\t\t\t{}", value)?;
        }
        writeln!(w, "\t\t\t\t</DataArray>")?;
    }
    writeln!(w, "\t\t\t</PointData>")?;
    Ok(())
}

/// Escape text for use inside a double-quoted XML attribute.
fn escape_attr(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn write_points<W: Write>(w: &mut W, mesh: &TriMesh) -> Result<()> {
    writeln!(w, "\t\t\t<Points>")?;
    writeln!(
        w,
        "\t\t\t\t<DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">"
    )?;
    for p in mesh.vertices() {
        writeln!(w, "\t\t\t\t\t{} {} 0", p.x, p.y)?;
    }
    writeln!(w, "\t\t\t\t</DataArray>")?;
    writeln!(w, "\t\t\t</Points>")?;
    Ok(())
}

fn write_cells<W: Write>(w: &mut W, mesh: &TriMesh) -> Result<()> {
    writeln!(w, "\t\t\t<Cells>")?;

    writeln!(
        w,
        "\t\t\t\t<DataArray type=\"Int64\" Name=\"connectivity\" format=\"ascii\">"
    )?;
    for t in mesh.triangles() {
        writeln!(w, "\t\t\t\t\t{} {} {}", t[0], t[1], t[2])?;
    }
    writeln!(w, "\t\t\t\t</DataArray>")?;

    writeln!(
        w,
        "\t\t\t\t<DataArray type=\"Int64\" Name=\"offsets\" format=\"ascii\">"
    )?;
    for i in 1..=mesh.num_triangles() {
        writeln!(w, "\t\t\t\t\t{}", i * NODES_PER_TRIANGLE)?;
    }
    writeln!(w, "\t\t\t\t</DataArray>")?;

    writeln!(
        w,
        "\t\t\t\t<DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">"
    )?;
    for _ in 0..mesh.num_triangles() {
        writeln!(w, "\t\t\t\t\t{}", VTK_TRIANGLE)?;
    }
    writeln!(w, "\t\t\t\t</DataArray>")?;

    writeln!(w, "\t\t\t</Cells>")?;
    Ok(())
}

/// One data set listed in a `.pvd` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PvdEntry {
    /// Value written to the `timestep` attribute.
    pub time: f64,
    /// File name of the data set, relative to the `.pvd` file.
    pub file: String,
}

/// A numbered series of `.vtu` files with a `.pvd` index.
///
/// Step `k` is written to `<prefix>_<k>.vtu`; the index is `<prefix>.pvd`.
/// The index is rewritten in full after every step, so it is valid even if
/// the run stops early.
///
/// # Example
///
/// ```no_run
/// use trigrid::io::PvdSeries;
/// # use trigrid::mesh::TriMesh;
/// # let levels: Vec<TriMesh> = Vec::new();
///
/// let mut series = PvdSeries::new("out/square");
/// for (k, mesh) in levels.iter().enumerate() {
///     series.append(k as f64, mesh, &[]).unwrap();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PvdSeries {
    prefix: PathBuf,
    entries: Vec<PvdEntry>,
}

impl PvdSeries {
    /// Start an empty series. Nothing is written until the first step.
    pub fn new<P: AsRef<Path>>(prefix: P) -> Self {
        Self {
            prefix: prefix.as_ref().to_path_buf(),
            entries: Vec::new(),
        }
    }

    /// The output prefix.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Path of the `.pvd` index file.
    pub fn pvd_path(&self) -> PathBuf {
        with_suffix(&self.prefix, ".pvd")
    }

    /// Path of the `.vtu` file for `step`.
    pub fn vtu_path(&self, step: usize) -> PathBuf {
        with_suffix(&self.prefix, &format!("_{}.vtu", step))
    }

    /// Number of steps written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no step has been written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries listed in the index, in write order.
    pub fn entries(&self) -> &[PvdEntry] {
        &self.entries
    }

    /// Write the next step and update the index. Returns the `.vtu` path.
    ///
    /// Missing parent directories of the prefix are created.
    pub fn append(&mut self, time: f64, mesh: &TriMesh, fields: &[ScalarField]) -> Result<PathBuf> {
        if let Some(parent) = self.prefix.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let vtu_path = self.vtu_path(self.entries.len());
        write_vtu(&vtu_path, mesh, fields)?;

        let file = vtu_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.entries.push(PvdEntry { time, file });
        self.write_index()?;

        Ok(vtu_path)
    }

    fn write_index(&self) -> Result<()> {
        let path = self.pvd_path();
        let file = File::create(&path).map_err(|e| GridError::SaveError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let mut w = BufWriter::new(file);

        writeln!(w, r#"<?xml version="1.0"?>"#)?;
        writeln!(
            w,
            r#"<VTKFile type="Collection" version="0.1" byte_order="LittleEndian">"#
        )?;
        writeln!(w, "\t<Collection>")?;
        for entry in &self.entries {
            writeln!(
                w,
                "\t\t<DataSet timestep=\"{:e}\" group=\"\" part=\"0\" file=\"{}\"/>",
                entry.time,
                escape_attr(&entry.file)
            )?;
        }
        writeln!(w, "\t</Collection>")?;
        writeln!(w, "</VTKFile>")?;

        w.flush()?;
        Ok(())
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use nalgebra::Point2;

    fn unit_triangle() -> TriMesh {
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
    }

    fn render(mesh: &TriMesh, fields: &[ScalarField]) -> String {
        let mut buf = Vec::new();
        write_vtu_to(&mut buf, mesh, fields).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_document_layout() {
        let mesh = unit_triangle();
        let u = ScalarField::from_values("u", vec![0.0, 1.0, 2.5]);
        let text = render(&mesh, &[u]);

        assert!(text.starts_with("<?xml version=\"1.0\"?>\n"));
        assert!(text.contains("<Piece NumberOfPoints=\"3\" NumberOfCells=\"1\">"));
        assert!(text.contains("<PointData Scalars=\"u\">"));
        assert!(text.contains("\t\t\t\t\t2.5\n"));
        assert!(text.contains("\t\t\t\t\t1 0 0\n"));
        assert!(text.contains("\t\t\t\t\t0 1 2\n"));
        assert!(text.contains("type=\"Int64\" Name=\"offsets\""));
        assert!(text.trim_end().ends_with("</VTKFile>"));

        let types = text.split("Name=\"types\"").nth(1).unwrap();
        assert!(types.contains("\t\t\t\t\t5\n"));
    }

    #[test]
    fn test_no_fields() {
        let text = render(&unit_triangle(), &[]);
        assert!(text.contains("<PointData />"));
    }

    #[test]
    fn test_multiple_fields_in_order() {
        let mesh = unit_triangle();
        let a = ScalarField::zeros("a", 3);
        let b = ScalarField::zeros("b", 3);
        let text = render(&mesh, &[a, b]);
        let pa = text.find("Name=\"a\"").unwrap();
        let pb = text.find("Name=\"b\"").unwrap();
        assert!(pa < pb);
    }

    #[test]
    fn test_field_name_is_escaped() {
        let mesh = unit_triangle();
        let text = render(&mesh, &[ScalarField::zeros(r#"u<"a&b">"#, 3)]);

        let escaped = "u&lt;&quot;a&amp;b&quot;&gt;";
        assert!(text.contains(&format!("<PointData Scalars=\"{}\">", escaped)));
        assert!(text.contains(&format!("<DataArray Name=\"{}\" type=", escaped)));
        assert!(!text.contains("u<"));
    }

    #[test]
    fn test_mismatched_field_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.vtu");
        let mesh = unit_triangle();

        let err = write_vtu(&path, &mesh, &[ScalarField::zeros("short", 2)]).unwrap_err();
        assert!(matches!(
            err,
            GridError::FieldLengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.vtu");
        write_vtu(&path, &unit_triangle(), &[]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("NumberOfCells=\"1\""));
    }

    #[test]
    fn test_series_paths() {
        let series = PvdSeries::new("data/test");
        assert_eq!(series.prefix(), Path::new("data/test"));
        assert!(series.is_empty());
        assert_eq!(series.pvd_path(), PathBuf::from("data/test.pvd"));
        assert_eq!(series.vtu_path(3), PathBuf::from("data/test_3.vtu"));
    }

    #[test]
    fn test_series_lists_every_step() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("out").join("run");
        let mesh = unit_triangle();

        let mut series = PvdSeries::new(&prefix);
        for k in 0..3 {
            let written = series.append(k as f64, &mesh, &[]).unwrap();
            assert!(written.exists());
        }
        assert_eq!(series.len(), 3);
        assert_eq!(series.entries()[2].file, "run_2.vtu");

        let index = fs::read_to_string(series.pvd_path()).unwrap();
        assert_eq!(index.matches("<DataSet").count(), 3);
        assert!(index.contains("file=\"run_0.vtu\""));
        assert!(index.contains("timestep=\"2e0\""));
        assert!(index.trim_end().ends_with("</VTKFile>"));
    }

    #[test]
    fn test_failed_step_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        let mut series = PvdSeries::new(dir.path().join("run"));
        let mesh = unit_triangle();

        series.append(0.0, &mesh, &[]).unwrap();
        assert!(series
            .append(1.0, &mesh, &[ScalarField::zeros("u", 1)])
            .is_err());
        assert_eq!(series.len(), 1);
    }
}
