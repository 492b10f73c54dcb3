//! Engine handle: loads the LibreOffice library and initialises LOK.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::document::Document;
use crate::error::{KitError, Result};
use crate::gate::CommandGate;
use crate::sys;

type HookFn = unsafe extern "C" fn(install_path: *const c_char) -> *mut sys::LibreOfficeKit;

/// An initialised LibreOfficeKit instance.
///
/// Owns the engine for the lifetime of the process. At most one document is
/// open at a time; [`document_load`](Self::document_load) hands out a
/// [`Document`] that borrows the `Office` mutably, so the document handle is
/// necessarily released before the engine handle.
pub struct Office {
    kit: *mut sys::LibreOfficeKit,
    // dlopen handle, intentionally never dlclose'd: the office engine
    // cannot be unloaded and re-initialised within one process.
    _lib: *mut c_void,
}

impl Office {
    /// Initialise LibreOfficeKit from a LibreOffice program directory
    /// (e.g. `/usr/lib/libreoffice/program`).
    pub fn new(install_path: &Path) -> Result<Self> {
        let lib_path = install_path.join(sys::TARGET_LIB);
        let lib_cstr = path_cstring(&lib_path)?;

        let lib = unsafe { libc::dlopen(lib_cstr.as_ptr(), libc::RTLD_LAZY) };
        if lib.is_null() {
            return Err(KitError::LibraryNotFound {
                path: lib_path,
                detail: dlerror_string(),
            });
        }

        let hook_ptr = unsafe { libc::dlsym(lib, sys::HOOK_SYMBOL.as_ptr() as *const c_char) };
        if hook_ptr.is_null() {
            return Err(KitError::HookMissing(lib_path));
        }
        let hook: HookFn = unsafe { std::mem::transmute(hook_ptr) };

        let install_cstr = path_cstring(install_path)?;
        let kit = unsafe { hook(install_cstr.as_ptr()) };
        if kit.is_null() {
            return Err(KitError::InitFailed(install_path.to_path_buf()));
        }

        let class_size = unsafe { (*(*kit).pClass).nSize };
        let required = sys::min_office_class_size();
        if class_size < required {
            return Err(KitError::UnsupportedAbi {
                actual: class_size,
                required,
            });
        }

        tracing::info!("initialised LibreOfficeKit from {}", install_path.display());

        Ok(Self { kit, _lib: lib })
    }

    /// Load one document, registering the UNO completion callback on it.
    pub fn document_load(&mut self, path: &Path) -> Result<Document<'_>> {
        let url = path_cstring(path)?;
        let doc = unsafe { ((*(*self.kit).pClass).documentLoad)(self.kit, url.as_ptr()) };
        if doc.is_null() {
            return Err(KitError::DocumentLoad(
                self.last_error().unwrap_or_else(|| "unknown error".into()),
            ));
        }

        let doc_class_size = unsafe { (*(*doc).pClass).nSize };
        let required = sys::min_document_class_size();
        if doc_class_size < required {
            unsafe { ((*(*doc).pClass).destroy)(doc) };
            return Err(KitError::UnsupportedAbi {
                actual: doc_class_size,
                required,
            });
        }

        tracing::info!("loaded document {}", path.display());

        Ok(Document::new(self, doc, CommandGate::new()))
    }

    /// Most recent error message recorded by the engine, if any.
    pub fn last_error(&self) -> Option<String> {
        unsafe {
            let class = &*(*self.kit).pClass;
            let err = (class.getError)(self.kit);
            if err.is_null() {
                return None;
            }
            let text = CStr::from_ptr(err).to_string_lossy().into_owned();
            (class.freeError)(err);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}

impl Drop for Office {
    fn drop(&mut self) {
        unsafe { ((*(*self.kit).pClass).destroy)(self.kit) };
    }
}

fn path_cstring(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| KitError::InvalidPath(path.to_path_buf()))
}

fn dlerror_string() -> String {
    unsafe {
        let err = libc::dlerror();
        if err.is_null() {
            "unknown dlopen error".to_string()
        } else {
            CStr::from_ptr(err).to_string_lossy().into_owned()
        }
    }
}
