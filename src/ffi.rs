//! C-compatible FFI API for cross-language bindings.
//!
//! # ABI Contract
//!
//! All exported functions use `extern "C"` calling convention and `#[no_mangle]`
//! to ensure stable symbol names.
//!
//! ## Memory management
//! - Buffers returned by `labelpdf_*` functions are allocated on the Rust heap.
//! - Callers **must** free them with `labelpdf_free_buffer` / `labelpdf_free_string`.
//! - Passing a null pointer to a free function is a no-op.
//!
//! ## Error handling
//! - Functions that can fail return a `c_int` (0 = success, non-zero = error).
//! - Error details can be retrieved via `labelpdf_last_error`.
//!
//! ## Thread safety
//! - `labelpdf_last_error` uses a thread-local, so it is safe to call from
//!   multiple threads.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use crate::pipeline::{build_records, generate_document, plan_sheet, render_plan, SheetRequest};
use crate::fonts::FontManager;
use crate::plan::SheetPlan;
use crate::sheet::SheetConfig;
use crate::tags::split_serial_lines;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Read a null-terminated UTF-8 argument.
///
/// # Safety
/// `ptr`, if non-null, must point to a valid null-terminated string.
unsafe fn read_utf8(ptr: *const c_char, what: &str) -> Result<String, c_int> {
    if ptr.is_null() {
        set_last_error(&format!("Null pointer argument: {what}"));
        return Err(1);
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            set_last_error(&format!("Invalid UTF-8 in {what}: {e}"));
            Err(2)
        }
    }
}

/// Build the records for a request, treating an empty expansion as an error
/// so callers never receive a blank sheet silently.
fn records_or_error(request: &SheetRequest) -> Result<Vec<crate::tags::LabelRecord>, c_int> {
    match build_records(request) {
        Ok(records) if records.is_empty() => {
            set_last_error("No tags generated. Please check your input.");
            Err(3)
        }
        Ok(records) => Ok(records),
        Err(e) => {
            set_last_error(&e.to_string());
            Err(3)
        }
    }
}

/// Hand a byte vector to the caller.
///
/// # Safety
/// `out_buf` and `out_len` must be valid pointers.
unsafe fn return_buffer(bytes: Vec<u8>, out_buf: *mut *mut u8, out_len: *mut u32) {
    let len = bytes.len() as u32;
    let buf = bytes.into_boxed_slice();
    *out_buf = Box::into_raw(buf) as *mut u8;
    *out_len = len;
}

// ---------------------------------------------------------------------------
// Core API
// ---------------------------------------------------------------------------

/// Generate a label sheet PDF from a tag range.
///
/// # Parameters
/// - `start_tag`, `end_tag`: null-terminated range endpoints (e.g. "A007")
/// - `serials`: optional null-terminated newline-separated serial numbers;
///   pass `NULL` to encode each tag as its own barcode value
/// - `out_buf`: on success, receives a pointer to heap-allocated PDF bytes
/// - `out_len`: on success, receives the length of the PDF buffer
///
/// # Returns
/// `0` on success, non-zero on error. On error, call `labelpdf_last_error`.
///
/// # Safety
/// - `start_tag` and `end_tag` must be valid null-terminated UTF-8 strings,
///   and `serials`, if non-null, too.
/// - `out_buf` and `out_len` must be valid pointers.
/// - The caller must free `*out_buf` by calling `labelpdf_free_buffer`.
#[no_mangle]
pub unsafe extern "C" fn labelpdf_generate_range(
    start_tag: *const c_char,
    end_tag: *const c_char,
    serials: *const c_char,
    out_buf: *mut *mut u8,
    out_len: *mut u32,
) -> c_int {
    if out_buf.is_null() || out_len.is_null() {
        set_last_error("Null pointer argument: output");
        return 1;
    }

    let start = match read_utf8(start_tag, "start_tag") {
        Ok(s) => s,
        Err(rc) => return rc,
    };
    let end = match read_utf8(end_tag, "end_tag") {
        Ok(s) => s,
        Err(rc) => return rc,
    };
    let serials = if serials.is_null() {
        Vec::new()
    } else {
        match read_utf8(serials, "serials") {
            Ok(raw) => split_serial_lines(&raw),
            Err(rc) => return rc,
        }
    };

    let request = SheetRequest::Range {
        start,
        end,
        serials,
    };
    let records = match records_or_error(&request) {
        Ok(r) => r,
        Err(rc) => return rc,
    };

    match generate_document(&records, &SheetConfig::default()) {
        Ok(bytes) => {
            return_buffer(bytes, out_buf, out_len);
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            4
        }
    }
}

/// Generate a label sheet PDF from an explicit tag list.
///
/// # Parameters
/// - `tag_list`: null-terminated, newline-separated; each line optionally
///   `text<TAB|,>barcode`
/// - `out_buf`, `out_len`: PDF output
///
/// # Returns
/// `0` on success.
///
/// # Safety
/// Same rules as [`labelpdf_generate_range`].
#[no_mangle]
pub unsafe extern "C" fn labelpdf_generate_list(
    tag_list: *const c_char,
    out_buf: *mut *mut u8,
    out_len: *mut u32,
) -> c_int {
    if out_buf.is_null() || out_len.is_null() {
        set_last_error("Null pointer argument: output");
        return 1;
    }

    let raw = match read_utf8(tag_list, "tag_list") {
        Ok(s) => s,
        Err(rc) => return rc,
    };

    let request = SheetRequest::List { raw };
    let records = match records_or_error(&request) {
        Ok(r) => r,
        Err(rc) => return rc,
    };

    match generate_document(&records, &SheetConfig::default()) {
        Ok(bytes) => {
            return_buffer(bytes, out_buf, out_len);
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            4
        }
    }
}

/// Compute only the sheet plan for a tag range (no PDF rendering).
/// Returns the plan as a null-terminated JSON string.
///
/// # Safety
/// Input rules as [`labelpdf_generate_range`]; `*out_json_ptr` must be freed
/// with `labelpdf_free_string`.
#[no_mangle]
pub unsafe extern "C" fn labelpdf_plan_range(
    start_tag: *const c_char,
    end_tag: *const c_char,
    serials: *const c_char,
    out_json_ptr: *mut *mut c_char,
) -> c_int {
    if out_json_ptr.is_null() {
        set_last_error("Null pointer argument: output");
        return 1;
    }

    let start = match read_utf8(start_tag, "start_tag") {
        Ok(s) => s,
        Err(rc) => return rc,
    };
    let end = match read_utf8(end_tag, "end_tag") {
        Ok(s) => s,
        Err(rc) => return rc,
    };
    let serials = if serials.is_null() {
        Vec::new()
    } else {
        match read_utf8(serials, "serials") {
            Ok(raw) => split_serial_lines(&raw),
            Err(rc) => return rc,
        }
    };

    let request = SheetRequest::Range {
        start,
        end,
        serials,
    };
    let records = match records_or_error(&request) {
        Ok(r) => r,
        Err(rc) => return rc,
    };

    let fonts = FontManager::new();
    let plan = match plan_sheet(&records, &SheetConfig::default(), &fonts) {
        Ok(p) => p,
        Err(e) => {
            set_last_error(&e.to_string());
            return 4;
        }
    };

    match CString::new(plan.to_json()) {
        Ok(cs) => {
            *out_json_ptr = cs.into_raw();
            0
        }
        Err(_) => {
            set_last_error("JSON contained null byte");
            4
        }
    }
}

/// Render a PDF from a sheet plan JSON string.
///
/// This allows pre-computing the plan and rendering separately.
///
/// # Safety
/// `json_ptr` must be a valid null-terminated string; `out_buf`/`out_len`
/// must be valid pointers; free `*out_buf` with `labelpdf_free_buffer`.
#[no_mangle]
pub unsafe extern "C" fn labelpdf_render_from_plan(
    json_ptr: *const c_char,
    out_buf: *mut *mut u8,
    out_len: *mut u32,
) -> c_int {
    if out_buf.is_null() || out_len.is_null() {
        set_last_error("Null pointer argument: output");
        return 1;
    }

    let json = match read_utf8(json_ptr, "plan JSON") {
        Ok(s) => s,
        Err(rc) => return rc,
    };

    let plan = match SheetPlan::from_json(&json) {
        Ok(p) => p,
        Err(e) => {
            set_last_error(&format!("Invalid plan JSON: {e}"));
            return 3;
        }
    };

    match render_plan(&plan) {
        Ok(bytes) => {
            return_buffer(bytes, out_buf, out_len);
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            4
        }
    }
}

// ---------------------------------------------------------------------------
// Memory management
// ---------------------------------------------------------------------------

/// Free a PDF buffer returned by `labelpdf_generate_range` (or similar).
///
/// # Safety
/// `buf` must have been returned by a previous `labelpdf_*` call, and `len`
/// must be the corresponding length.
#[no_mangle]
pub unsafe extern "C" fn labelpdf_free_buffer(buf: *mut u8, len: u32) {
    if !buf.is_null() {
        let _ = Box::from_raw(slice::from_raw_parts_mut(buf, len as usize));
    }
}

/// Free a string returned by `labelpdf_plan_range`.
///
/// # Safety
/// `s` must have been returned by Rust's `CString::into_raw`.
#[no_mangle]
pub unsafe extern "C" fn labelpdf_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Retrieve the last error message. Returns a null-terminated string.
///
/// The returned pointer is valid until the next `labelpdf_*` call on the
/// same thread. The caller should **not** free this pointer – it is managed
/// internally.
///
/// Returns null if no error has occurred.
#[no_mangle]
pub extern "C" fn labelpdf_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        let borrow = e.borrow();
        match borrow.as_ref() {
            Some(cs) => cs.as_ptr(),
            None => ptr::null(),
        }
    })
}

/// Return the library version as a null-terminated string.
/// The caller must **not** free this pointer.
#[no_mangle]
pub extern "C" fn labelpdf_version() -> *const c_char {
    // Safe: the string is static
    b"0.1.0\0".as_ptr() as *const c_char
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
