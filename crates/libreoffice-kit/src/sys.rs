//! Raw FFI surface of the LibreOfficeKit C API.
//!
//! LOK is not linked at build time: the embedding contract is to `dlopen`
//! `libsofficeapp.so` from the LibreOffice program directory and call the
//! exported `libreofficekit_hook`, which returns a pointer to a struct whose
//! first member is a vtable of C function pointers. The vtables below are
//! *prefix* declarations of the real structs — LibreOffice appends new
//! members over time and records the full size in `nSize`, so a caller must
//! check `nSize` before trusting any slot it wants to use.
//!
//! Layouts and constants mirror `LibreOfficeKit.h` and
//! `LibreOfficeKitEnums.h` from the LibreOffice SDK.

#![allow(non_snake_case)]

use std::os::raw::{c_char, c_int, c_long, c_uchar, c_void};

/// Name of the shared library exporting the LOK hook, relative to the
/// LibreOffice program directory.
pub const TARGET_LIB: &str = "libsofficeapp.so";

/// Exported entry point: `LibreOfficeKit* libreofficekit_hook(const char*)`.
/// NUL-terminated for dlsym.
pub const HOOK_SYMBOL: &[u8] = b"libreofficekit_hook\0";

// ----------------------------------------------------------------------------
// Enum constants (LibreOfficeKitEnums.h)
// ----------------------------------------------------------------------------

/// LibreOfficeKitDocumentType
pub const LOK_DOCTYPE_TEXT: c_int = 0;
pub const LOK_DOCTYPE_SPREADSHEET: c_int = 1;
pub const LOK_DOCTYPE_PRESENTATION: c_int = 2;
pub const LOK_DOCTYPE_DRAWING: c_int = 3;
pub const LOK_DOCTYPE_OTHER: c_int = 4;

/// LibreOfficeKitCallbackType: result of a dispatched UNO command.
/// The only callback type this crate acts on; everything else is ignored.
pub const LOK_CALLBACK_UNO_COMMAND_RESULT: c_int = 10;

/// LibreOfficeKitKeyEventType
pub const LOK_KEYEVENT_KEYINPUT: c_int = 0;
pub const LOK_KEYEVENT_KEYUP: c_int = 1;

/// com.sun.star.awt.Key codes used for cell navigation.
pub const AWT_KEY_DOWN: c_int = 1024;
pub const AWT_KEY_RIGHT: c_int = 1027;

// ----------------------------------------------------------------------------
// Callback
// ----------------------------------------------------------------------------

/// `void (*LibreOfficeKitCallback)(int nType, const char* pPayload, void* pData)`
///
/// Invoked by LibreOffice on a thread it manages.
pub type LibreOfficeKitCallback =
    Option<unsafe extern "C" fn(nType: c_int, pPayload: *const c_char, pData: *mut c_void)>;

// ----------------------------------------------------------------------------
// Office handle
// ----------------------------------------------------------------------------

#[repr(C)]
pub struct LibreOfficeKit {
    pub pClass: *mut LibreOfficeKitClass,
}

/// Prefix of `struct _LibreOfficeKitClass`.
#[repr(C)]
pub struct LibreOfficeKitClass {
    pub nSize: usize,
    pub destroy: unsafe extern "C" fn(pThis: *mut LibreOfficeKit),
    pub documentLoad:
        unsafe extern "C" fn(pThis: *mut LibreOfficeKit, pURL: *const c_char) -> *mut LibreOfficeKitDocument,
    pub getError: unsafe extern "C" fn(pThis: *mut LibreOfficeKit) -> *mut c_char,
    pub documentLoadWithOptions: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKit,
        pURL: *const c_char,
        pOptions: *const c_char,
    ) -> *mut LibreOfficeKitDocument,
    pub freeError: unsafe extern "C" fn(pFree: *mut c_char),
}

// ----------------------------------------------------------------------------
// Document handle
// ----------------------------------------------------------------------------

#[repr(C)]
pub struct LibreOfficeKitDocument {
    pub pClass: *mut LibreOfficeKitDocumentClass,
}

/// Prefix of `struct _LibreOfficeKitDocumentClass`, through `paste`.
#[repr(C)]
pub struct LibreOfficeKitDocumentClass {
    pub nSize: usize,
    pub destroy: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument),
    pub saveAs: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pUrl: *const c_char,
        pFormat: *const c_char,
        pFilterOptions: *const c_char,
    ) -> c_int,
    pub getDocumentType: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument) -> c_int,
    pub getParts: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument) -> c_int,
    pub getPartPageRectangles:
        unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument) -> *mut c_char,
    pub getPart: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument) -> c_int,
    pub setPart: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument, nPart: c_int),
    pub getPartName:
        unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument, nPart: c_int) -> *mut c_char,
    pub setPartMode: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument, nMode: c_int),
    pub paintTile: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pBuffer: *mut c_uchar,
        nCanvasWidth: c_int,
        nCanvasHeight: c_int,
        nTilePosX: c_int,
        nTilePosY: c_int,
        nTileWidth: c_int,
        nTileHeight: c_int,
    ),
    pub getTileMode: unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument) -> c_int,
    pub getDocumentSize: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pWidth: *mut c_long,
        pHeight: *mut c_long,
    ),
    pub initializeForRendering:
        unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument, pArguments: *const c_char),
    pub registerCallback: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pCallback: LibreOfficeKitCallback,
        pData: *mut c_void,
    ),
    pub postKeyEvent: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        nType: c_int,
        nCharCode: c_int,
        nKeyCode: c_int,
    ),
    pub postMouseEvent: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        nType: c_int,
        nX: c_int,
        nY: c_int,
        nCount: c_int,
        nButtons: c_int,
        nModifier: c_int,
    ),
    pub postUnoCommand: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pCommand: *const c_char,
        pArguments: *const c_char,
        bNotifyWhenFinished: bool,
    ),
    pub setTextSelection:
        unsafe extern "C" fn(pThis: *mut LibreOfficeKitDocument, nType: c_int, nX: c_int, nY: c_int),
    pub getTextSelection: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pMimeType: *const c_char,
        pUsedMimeType: *mut *mut c_char,
    ) -> *mut c_char,
    pub paste: unsafe extern "C" fn(
        pThis: *mut LibreOfficeKitDocument,
        pMimeType: *const c_char,
        pData: *const c_char,
        nSize: usize,
    ) -> bool,
}

/// Smallest office vtable this crate can work with.
pub fn min_office_class_size() -> usize {
    std::mem::size_of::<LibreOfficeKitClass>()
}

/// Smallest document vtable this crate can work with.
pub fn min_document_class_size() -> usize {
    std::mem::size_of::<LibreOfficeKitDocumentClass>()
}
