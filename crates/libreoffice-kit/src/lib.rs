//! In-process LibreOffice automation through the LibreOfficeKit C API.
//!
//! LibreOfficeKit (LOK) is the embedding interface exported by
//! `libsofficeapp.so` in a LibreOffice installation. Unlike the URP socket
//! bridge, LOK runs the whole office engine inside the calling process: the
//! library is `dlopen`ed at runtime, a hook function hands back a vtable of
//! C function pointers, and documents are loaded, scripted and saved through
//! that vtable.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── Office / Document (this crate)
//!           ├── CommandGate (awaits async UNO command completion)
//!           └── sys (raw LOK vtables, dlopen/dlsym)
//!                 └── libsofficeapp.so in the LibreOffice install
//! ```
//!
//! UNO commands (`.uno:GoToCell`, `.uno:Save`, ...) are dispatched
//! asynchronously; LibreOffice reports completion through a callback on a
//! thread it manages. [`CommandGate`] bridges that callback back to the
//! calling thread so a command can be awaited synchronously.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use libreoffice_kit::Office;
//!
//! # fn example() -> libreoffice_kit::error::Result<()> {
//! let mut office = Office::new(Path::new("/usr/lib/libreoffice/program"))?;
//! let mut doc = office.document_load(Path::new("report.ods"))?;
//! doc.goto_cell("B", "2")?;
//! doc.save()?;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod gate;
pub mod office;
pub mod sys;
pub mod uno;

pub use document::{Document, DocumentType};
pub use error::KitError;
pub use gate::CommandGate;
pub use office::Office;
