//! Document handle: one open document inside the engine.

use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_long, c_void};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{KitError, Result};
use crate::gate::CommandGate;
use crate::office::Office;
use crate::{sys, uno};

/// Kind of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Text,
    Spreadsheet,
    Presentation,
    Drawing,
    Other,
}

impl DocumentType {
    fn from_raw(raw: c_int) -> Self {
        match raw {
            sys::LOK_DOCTYPE_TEXT => DocumentType::Text,
            sys::LOK_DOCTYPE_SPREADSHEET => DocumentType::Spreadsheet,
            sys::LOK_DOCTYPE_PRESENTATION => DocumentType::Presentation,
            sys::LOK_DOCTYPE_DRAWING => DocumentType::Drawing,
            _ => DocumentType::Other,
        }
    }
}

/// A handle to one open document.
///
/// Borrows the [`Office`] mutably: the engine owns at most one document at a
/// time, and the document handle is released before the engine handle.
pub struct Document<'a> {
    office: &'a mut Office,
    doc: *mut sys::LibreOfficeKitDocument,
    gate: Arc<CommandGate>,
}

/// Engine-side callback, invoked on a thread LibreOffice manages. Only the
/// UNO command result is significant; every other event type is ignored,
/// not buffered.
unsafe extern "C" fn uno_result_callback(ty: c_int, _payload: *const c_char, data: *mut c_void) {
    if ty == sys::LOK_CALLBACK_UNO_COMMAND_RESULT {
        let gate = &*data.cast::<CommandGate>();
        gate.complete();
    }
}

impl<'a> Document<'a> {
    pub(crate) fn new(
        office: &'a mut Office,
        doc: *mut sys::LibreOfficeKitDocument,
        gate: CommandGate,
    ) -> Self {
        let gate = Arc::new(gate);
        unsafe {
            ((*(*doc).pClass).registerCallback)(
                doc,
                Some(uno_result_callback),
                Arc::as_ptr(&gate) as *mut c_void,
            );
        }
        Self { office, doc, gate }
    }

    fn class(&self) -> &sys::LibreOfficeKitDocumentClass {
        unsafe { &*(*self.doc).pClass }
    }

    pub fn doc_type(&self) -> DocumentType {
        DocumentType::from_raw(unsafe { (self.class().getDocumentType)(self.doc) })
    }

    /// Error out unless the document is of the expected kind.
    pub fn require_type(&self, expected: DocumentType) -> Result<()> {
        let actual = self.doc_type();
        if actual != expected {
            return Err(KitError::WrongDocumentType { expected, actual });
        }
        Ok(())
    }

    /// Number of parts: sheets in a spreadsheet, slides in a presentation.
    pub fn parts(&self) -> i32 {
        unsafe { (self.class().getParts)(self.doc) }
    }

    pub fn set_part(&mut self, part: i32) {
        unsafe { (self.class().setPart)(self.doc, part) };
    }

    /// Size of the current part in twips (1/1440 inch).
    pub fn size(&self) -> (i64, i64) {
        let mut width: c_long = 0;
        let mut height: c_long = 0;
        unsafe { (self.class().getDocumentSize)(self.doc, &mut width, &mut height) };
        (width as i64, height as i64)
    }

    /// Save the document under a new path; the output format is derived
    /// from the extension.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        let url = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| KitError::InvalidPath(path.to_path_buf()))?;
        let ok = unsafe {
            (self.class().saveAs)(self.doc, url.as_ptr(), std::ptr::null(), std::ptr::null())
        };
        if ok == 0 {
            return Err(KitError::SaveFailed(
                self.office
                    .last_error()
                    .unwrap_or_else(|| "unknown error".into()),
            ));
        }
        tracing::info!("saved document as {}", path.display());
        Ok(())
    }

    /// Post a raw key event (type from `sys::LOK_KEYEVENT_*`, key code from
    /// the awt key table).
    pub fn post_key_event(&mut self, event: c_int, char_code: c_int, key_code: c_int) {
        unsafe { (self.class().postKeyEvent)(self.doc, event, char_code, key_code) };
    }

    /// Press and release one key.
    pub fn press_key(&mut self, key_code: c_int) {
        self.post_key_event(sys::LOK_KEYEVENT_KEYINPUT, 0, key_code);
        self.post_key_event(sys::LOK_KEYEVENT_KEYUP, 0, key_code);
    }

    /// Paste data into the document at the current cursor position.
    pub fn paste(&mut self, mime_type: &str, data: &[u8]) -> Result<()> {
        let mime = CString::new(mime_type).map_err(|_| KitError::InteriorNul)?;
        let ok = unsafe {
            (self.class().paste)(
                self.doc,
                mime.as_ptr(),
                data.as_ptr() as *const c_char,
                data.len(),
            )
        };
        if !ok {
            return Err(KitError::PasteFailed {
                mime_type: mime_type.to_string(),
                size: data.len(),
            });
        }
        Ok(())
    }

    /// Dispatch a UNO command, optionally blocking until the engine signals
    /// its completion through the document callback.
    ///
    /// Submission is assumed to succeed once a document is open; the only
    /// failure here is an unrepresentable command string. With `wait` the
    /// call returns after the command's own completion, never on a stale
    /// signal from an earlier one.
    pub fn post_uno_command(
        &mut self,
        command: &str,
        args: Option<&serde_json::Value>,
        wait: bool,
    ) -> Result<()> {
        let cmd = CString::new(command).map_err(|_| KitError::InteriorNul)?;
        let args_cstr = match args {
            Some(value) => Some(CString::new(value.to_string()).map_err(|_| KitError::InteriorNul)?),
            None => None,
        };
        let args_ptr = args_cstr
            .as_ref()
            .map_or(std::ptr::null(), |cstr| cstr.as_ptr());

        tracing::debug!(command, wait, "dispatching UNO command");
        let doc = self.doc;
        let post = self.class().postUnoCommand;
        self.gate
            .submit(|| unsafe { post(doc, cmd.as_ptr(), args_ptr, wait) }, wait);
        if wait {
            tracing::debug!(command, "UNO command completed");
        }
        Ok(())
    }

    /// Move the cell cursor, e.g. `goto_cell("B", "2")` for $B$2. Awaited.
    pub fn goto_cell(&mut self, column: &str, row: &str) -> Result<()> {
        let args = uno::goto_cell_args(column, row);
        self.post_uno_command(uno::CMD_GOTO_CELL, Some(&args), true)
    }

    /// Insert an image file at the current position. Awaited.
    pub fn insert_graphic(&mut self, path: &Path) -> Result<()> {
        let args = uno::insert_graphic_args(&format!("file://{}", path.display()));
        self.post_uno_command(uno::CMD_INSERT_GRAPHIC, Some(&args), true)
    }

    /// Append a new sheet with the given name. Awaited.
    pub fn add_sheet(&mut self, name: &str) -> Result<()> {
        let args = uno::add_sheet_args(name);
        self.post_uno_command(uno::CMD_ADD_SHEET, Some(&args), true)
    }

    /// Save the document in place. Awaited.
    pub fn save(&mut self) -> Result<()> {
        self.post_uno_command(uno::CMD_SAVE, None, true)
    }

    /// Render a tile of the current part into `buffer` (RGBA, 4 bytes per
    /// pixel). Positions and sizes are in twips, the canvas in pixels.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is smaller than `canvas_width * canvas_height * 4`.
    pub fn paint_tile(
        &mut self,
        buffer: &mut [u8],
        canvas_width: i32,
        canvas_height: i32,
        tile_x: i32,
        tile_y: i32,
        tile_width: i32,
        tile_height: i32,
    ) {
        let needed = canvas_width as usize * canvas_height as usize * 4;
        assert!(
            buffer.len() >= needed,
            "tile buffer too small: {} < {needed}",
            buffer.len()
        );
        unsafe {
            (self.class().paintTile)(
                self.doc,
                buffer.as_mut_ptr(),
                canvas_width,
                canvas_height,
                tile_x,
                tile_y,
                tile_width,
                tile_height,
            );
        }
    }
}

impl Drop for Document<'_> {
    fn drop(&mut self) {
        unsafe { ((*(*self.doc).pClass).destroy)(self.doc) };
    }
}
