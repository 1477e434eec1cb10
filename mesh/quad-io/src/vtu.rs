//! VTK XML unstructured-grid (`.vtu`) writer.
//!
//! The mesh is written as a single `Piece` with ASCII data arrays:
//!
//! - `Points/Coordinates` - `Float64`, three components per vertex
//! - `Cells/connectivity` - the four corners of each face
//! - `Cells/offsets` - running end offset of each cell, `4·(i + 1)`
//! - `Cells/types` - [`VTK_QUAD`] for every cell
//!
//! Files can be opened in `ParaView` or any other VTK-based viewer.
//!
//! # Example
//!
//! ```
//! use quad_io::write_vtu;
//! use quad_types::unit_quad;
//!
//! let mut buffer = Vec::new();
//! write_vtu(&unit_quad(), &mut buffer)?;
//!
//! let xml = String::from_utf8(buffer).unwrap();
//! assert!(xml.contains(r#"NumberOfCells="1""#));
//! # Ok::<(), quad_io::IoError>(())
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quad_types::QuadTopology;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// VTK cell type code of a linear quad.
pub const VTK_QUAD: u8 = 9;

/// Write a mesh as a `.vtu` document.
///
/// # Errors
///
/// Returns an error if the XML cannot be written.
pub fn write_vtu<M: QuadTopology, W: Write>(mesh: &M, writer: W) -> IoResult<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(|e| IoError::invalid_content(format!("failed to write XML declaration: {e}")))?;

    let mut root = BytesStart::new("VTKFile");
    root.push_attribute(("type", "UnstructuredGrid"));
    root.push_attribute(("version", "0.1"));
    root.push_attribute(("byte_order", "LittleEndian"));
    start(&mut writer, root)?;
    start(&mut writer, BytesStart::new("UnstructuredGrid"))?;

    let counts = mesh.counts();
    let mut piece = BytesStart::new("Piece");
    piece.push_attribute(("NumberOfPoints", counts.vertices.to_string().as_str()));
    piece.push_attribute(("NumberOfCells", counts.faces.to_string().as_str()));
    start(&mut writer, piece)?;

    // Points
    start(&mut writer, BytesStart::new("Points"))?;
    let mut coordinates = String::new();
    for p in mesh.positions() {
        let _ = writeln!(coordinates, "{} {} {}", p.x, p.y, p.z);
    }
    data_array(&mut writer, "Float64", "Coordinates", 3, &coordinates)?;
    end(&mut writer, "Points")?;

    // Cells
    start(&mut writer, BytesStart::new("Cells"))?;
    let mut connectivity = String::new();
    let mut offsets = String::new();
    let mut types = String::new();
    for (i, face) in mesh.faces().enumerate() {
        let [v0, v1, v2, v3] = face.vertices.map(|v| v.raw());
        let _ = writeln!(connectivity, "{v0} {v1} {v2} {v3}");
        let _ = writeln!(offsets, "{}", 4 * (i + 1));
        let _ = writeln!(types, "{VTK_QUAD}");
    }
    data_array(&mut writer, "Int64", "connectivity", 1, &connectivity)?;
    data_array(&mut writer, "Int64", "offsets", 1, &offsets)?;
    data_array(&mut writer, "UInt8", "types", 1, &types)?;
    end(&mut writer, "Cells")?;

    end(&mut writer, "Piece")?;
    end(&mut writer, "UnstructuredGrid")?;
    end(&mut writer, "VTKFile")?;

    writer
        .into_inner()
        .flush()
        .map_err(IoError::Io)
}

/// Save a mesh to a `.vtu` file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_vtu<M: QuadTopology, P: AsRef<Path>>(mesh: &M, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_vtu(mesh, BufWriter::new(file))?;
    debug!("Wrote {} to {}", mesh.counts(), path.display());
    Ok(())
}

fn start<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> IoResult<()> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    writer
        .write_event(Event::Start(element))
        .map_err(|e| IoError::invalid_content(format!("failed to write {name} element: {e}")))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> IoResult<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| IoError::invalid_content(format!("failed to close {name}: {e}")))
}

fn data_array<W: Write>(
    writer: &mut Writer<W>,
    kind: &str,
    name: &str,
    components: u8,
    body: &str,
) -> IoResult<()> {
    let mut array = BytesStart::new("DataArray");
    array.push_attribute(("type", kind));
    array.push_attribute(("NumberOfComponents", components.to_string().as_str()));
    array.push_attribute(("Name", name));
    array.push_attribute(("format", "ascii"));
    start(writer, array)?;

    writer
        .write_event(Event::Text(BytesText::new(body.trim_end())))
        .map_err(|e| IoError::invalid_content(format!("failed to write {name} data: {e}")))?;

    end(writer, "DataArray")
}
