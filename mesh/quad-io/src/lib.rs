//! Quad mesh file I/O.
//!
//! This crate provides loading and saving of quad meshes:
//!
//! - **DAT** - Plain-text token stream of counts, coordinates, edges and faces (read/write)
//! - **VTU** - VTK XML unstructured grid for visualisation (write only)
//!
//! # Example
//!
//! ```no_run
//! use quad_io::{load_dat, save_vtu};
//!
//! // Load a mesh
//! let mesh = load_dat("model/2d_example.dat").unwrap();
//!
//! // Write it for ParaView
//! save_vtu(&mesh, "result/Step0.vtu").unwrap();
//! ```
//!
//! # Format Detection
//!
//! The crate can detect the file format from the extension:
//!
//! ```no_run
//! use quad_io::{load_mesh, save_mesh};
//!
//! // Format detected from .dat extension
//! let mesh = load_mesh("model/3d_example.dat").unwrap();
//!
//! // Save to a different format
//! save_mesh(&mesh, "result/3d_example.vtu").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod dat;
mod error;
mod vtu;

pub use dat::{load_dat, parse_dat, save_dat, write_dat};
pub use error::{IoError, IoResult};
pub use vtu::{VTK_QUAD, save_vtu, write_vtu};

use std::path::Path;

use quad_types::QuadMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Plain-text `.dat` format.
    /// Supports reading and writing.
    Dat,
    /// VTK XML unstructured grid.
    /// Write only.
    Vtu,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "dat" => Some(Self::Dat),
            "vtu" => Some(Self::Vtu),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Dat => "dat",
            Self::Vtu => "vtu",
        }
    }

    /// Check whether meshes can be loaded from this format.
    #[must_use]
    pub const fn can_load(&self) -> bool {
        matches!(self, Self::Dat)
    }
}

fn detect(path: &Path) -> IoResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The format is write-only
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use quad_io::load_mesh;
///
/// let mesh = load_mesh("model/2d_example.dat").unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<QuadMesh> {
    let path = path.as_ref();
    match detect(path)? {
        MeshFormat::Dat => load_dat(path),
        MeshFormat::Vtu => Err(IoError::UnsupportedOperation {
            format: "VTU",
            operation: "loaded",
        }),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be written
///
/// # Example
///
/// ```no_run
/// use quad_io::{load_mesh, save_mesh};
///
/// let mesh = load_mesh("input.dat").unwrap();
/// save_mesh(&mesh, "output.vtu").unwrap();
/// ```
pub fn save_mesh<P: AsRef<Path>>(mesh: &QuadMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match detect(path)? {
        MeshFormat::Dat => save_dat(mesh, path),
        MeshFormat::Vtu => save_vtu(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path_dat() {
        assert_eq!(MeshFormat::from_path("model.dat"), Some(MeshFormat::Dat));
        assert_eq!(MeshFormat::from_path("model.DAT"), Some(MeshFormat::Dat));
        assert_eq!(
            MeshFormat::from_path("/path/to/model.dat"),
            Some(MeshFormat::Dat)
        );
    }

    #[test]
    fn format_from_path_vtu() {
        assert_eq!(MeshFormat::from_path("Step3.vtu"), Some(MeshFormat::Vtu));
        assert_eq!(MeshFormat::from_path("Step3.VTU"), Some(MeshFormat::Vtu));
    }

    #[test]
    fn format_from_path_unknown() {
        assert_eq!(MeshFormat::from_path("model.stl"), None);
        assert_eq!(MeshFormat::from_path("model"), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(MeshFormat::Dat.extension(), "dat");
        assert_eq!(MeshFormat::Vtu.extension(), "vtu");
        assert!(MeshFormat::Dat.can_load());
        assert!(!MeshFormat::Vtu.can_load());
    }

    #[test]
    fn load_unknown_extension() {
        let result = load_mesh("model.obj");
        assert!(matches!(
            result,
            Err(IoError::UnknownFormat { ref extension }) if extension == "obj"
        ));
    }

    #[test]
    fn load_vtu_is_unsupported() {
        let result = load_mesh("Step0.vtu");
        assert!(matches!(
            result,
            Err(IoError::UnsupportedOperation { format: "VTU", .. })
        ));
    }
}
