//! Plain-text `.dat` quad mesh format.
//!
//! A `.dat` file is a stream of whitespace-separated tokens:
//!
//! ```text
//! nV nE nF
//! x0 y0 z0  x1 y1 z1  ...        (3 · nV reals)
//! a0 b0  a1 b1  ...              (2 · nE vertex indices)
//! v0 v1 v2 v3  ...               (4 · nF vertex indices)
//! ```
//!
//! Line breaks carry no meaning. A token consisting of the single letter
//! `n` is a section separator and is skipped. Tokens after the last face
//! are ignored.
//!
//! # Example
//!
//! ```
//! use quad_io::parse_dat;
//! use quad_types::QuadTopology;
//!
//! let mesh = parse_dat(
//!     "4 4 1
//!      0 0 0  1 0 0  1 1 0  0 1 0
//!      0 1  1 2  2 3  3 0
//!      0 1 2 3",
//! )?;
//! assert_eq!(mesh.face_count(), 1);
//! # Ok::<(), quad_io::IoError>(())
//! ```

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use quad_types::{QuadMesh, QuadTopology};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Token cursor over a `.dat` body.
struct Tokens<'a> {
    inner: std::iter::Filter<std::str::SplitWhitespace<'a>, fn(&&str) -> bool>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let not_separator: fn(&&str) -> bool = |t| *t != "n";
        Self {
            inner: content.split_whitespace().filter(not_separator),
            position: 0,
        }
    }

    fn next<T>(&mut self, expected: &'static str) -> IoResult<T>
    where
        T: FromStr,
        IoError: From<T::Err>,
    {
        let token = self.inner.next().ok_or(IoError::UnexpectedEof {
            position: self.position,
            expected,
        })?;
        self.position += 1;
        Ok(token.parse::<T>()?)
    }
}

/// Parse a mesh from `.dat` text.
///
/// # Errors
///
/// Returns an error if:
/// - The input ends before all declared elements are read
/// - A count, coordinate or index is not a valid number
/// - The elements do not form a valid quad mesh
pub fn parse_dat(content: &str) -> IoResult<QuadMesh> {
    let mut tokens = Tokens::new(content);

    let n_vertices: usize = tokens.next("vertex count")?;
    let n_edges: usize = tokens.next("edge count")?;
    let n_faces: usize = tokens.next("face count")?;

    let coords = (0..n_vertices)
        .map(|_| -> IoResult<[f64; 3]> {
            Ok([
                tokens.next("vertex coordinate")?,
                tokens.next("vertex coordinate")?,
                tokens.next("vertex coordinate")?,
            ])
        })
        .collect::<IoResult<Vec<[f64; 3]>>>()?;

    let edges = (0..n_edges)
        .map(|_| -> IoResult<[u32; 2]> {
            Ok([tokens.next("edge vertex")?, tokens.next("edge vertex")?])
        })
        .collect::<IoResult<Vec<[u32; 2]>>>()?;

    let faces = (0..n_faces)
        .map(|_| -> IoResult<[u32; 4]> {
            Ok([
                tokens.next("face vertex")?,
                tokens.next("face vertex")?,
                tokens.next("face vertex")?,
                tokens.next("face vertex")?,
            ])
        })
        .collect::<IoResult<Vec<[u32; 4]>>>()?;

    let mesh = QuadMesh::from_raw(&coords, &edges, &faces)?;
    debug!("Parsed .dat mesh: {}", mesh.counts());
    Ok(mesh)
}

/// Load a mesh from a `.dat` file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or any
/// error from [`parse_dat`].
pub fn load_dat<P: AsRef<Path>>(path: P) -> IoResult<QuadMesh> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| IoError::from_open(path, e))?;
    parse_dat(&content)
}

/// Write a mesh as `.dat` text.
///
/// Counts go on the first line, then one line per vertex, edge and face.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_dat<M: QuadTopology, W: Write>(mesh: &M, mut writer: W) -> IoResult<()> {
    let counts = mesh.counts();
    writeln!(writer, "{} {} {}", counts.vertices, counts.edges, counts.faces)?;

    for p in mesh.positions() {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }
    for edge in mesh.edges() {
        writeln!(writer, "{} {}", edge.a.raw(), edge.b.raw())?;
    }
    for face in mesh.faces() {
        let [v0, v1, v2, v3] = face.vertices.map(|v| v.raw());
        writeln!(writer, "{v0} {v1} {v2} {v3}")?;
    }

    Ok(())
}

/// Save a mesh to a `.dat` file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_dat<M: QuadTopology, P: AsRef<Path>>(mesh: &M, path: P) -> IoResult<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_dat(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use quad_types::{Point3, VertexId, planar_grid};

    const SQUARE: &str = "4 4 1\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n0 1\n1 2\n2 3\n3 0\n0 1 2 3\n";

    #[test]
    fn test_parse_square() {
        let mesh = parse_dat(SQUARE).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.position(VertexId(2)), Some(&Point3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_separator_tokens_are_skipped() {
        let content = "4 4 1 n\n0 0 0 1 0 0 1 1 0 0 1 0 n\n0 1 1 2 2 3 3 0\nn\n0 1 2 3";
        let mesh = parse_dat(content).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_layout_is_free_form() {
        let content = "4\t4 1 0 0 0 1 0 0 1 1 0 0 1 0 0 1 1 2 2 3 3 0 0 1 2 3";
        assert_eq!(parse_dat(content).unwrap(), parse_dat(SQUARE).unwrap());
    }

    #[test]
    fn test_short_input() {
        let result = parse_dat("4 4 1\n0 0 0\n1 0 0\n");
        assert!(matches!(
            result,
            Err(IoError::UnexpectedEof {
                position: 9,
                expected: "vertex coordinate",
            })
        ));

        let result = parse_dat("");
        assert!(matches!(
            result,
            Err(IoError::UnexpectedEof { position: 0, .. })
        ));
    }

    #[test]
    fn test_bad_numbers() {
        let result = parse_dat("4 4 x");
        assert!(matches!(result, Err(IoError::ParseInt(_))));

        let result = parse_dat("1 0 0 0.0 abc 0.0");
        assert!(matches!(result, Err(IoError::ParseFloat(_))));
    }

    #[test]
    fn test_invalid_topology() {
        // Face side (3, 0) has no edge
        let content = "4 3 1 0 0 0 1 0 0 1 1 0 0 1 0 0 1 1 2 2 3 0 1 2 3";
        let result = parse_dat(content);
        assert!(matches!(result, Err(IoError::Mesh(_))));
    }

    #[test]
    fn test_write_then_parse() {
        let grid = planar_grid(2, 1, 0.25);
        let mut buffer = Vec::new();
        write_dat(&grid, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("6 7 2\n"));

        let parsed = parse_dat(&text).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_dat("/definitely/not/here.dat");
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
