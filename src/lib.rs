//! chordlib — chord diagram layout and SVG rendering library for ReChord.
//!
//! A chord is described declaratively (strings, notes, barres, mutes,
//! starting fret, spacing), validated once into an immutable
//! [`ChordDiagramSpec`], laid out, and emitted as an ordered list of
//! drawing primitives that any [`Canvas`] can materialize.
//!
//! # Example
//! ```
//! use chordlib::{render_chord_to_svg, ChordInput};
//!
//! let spec = ChordInput::new(6)
//!     .note(5, 3)
//!     .note(4, 3)
//!     .barre(1, 1, 2)
//!     .mute(3)
//!     .title("Cadd9")
//!     .build()
//!     .unwrap();
//! let svg = render_chord_to_svg(&spec).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod error;
pub mod grid;
pub mod model;
pub mod renderer;
pub mod validate;

#[cfg(target_os = "android")]
pub mod android;

use std::path::{Path, PathBuf};

pub use error::{ChordError, Result};
pub use grid::ChordGrid;
pub use model::*;
pub use renderer::{
    compute_layout, drawing_to_svg, emit, render_batch, render_chord, render_chord_to_svg, Canvas,
    ChordLayout, Drawing, Primitive, SvgBuilder,
};
pub use validate::validate;

/// Parse a JSON `ChordInput`, validate it and render to SVG.
pub fn render_json_to_svg(json: &str) -> Result<String> {
    let input: ChordInput = serde_json::from_str(json)?;
    render_chord_to_svg(&validate(input)?)
}

/// Parse a JSON form grid (`ChordGrid`), validate it and render to SVG.
pub fn render_grid_json_to_svg(json: &str) -> Result<String> {
    let grid: ChordGrid = serde_json::from_str(json)?;
    render_chord_to_svg(&grid.to_input()?.build()?)
}

/// Convert a drawing to a JSON string for renderers on the other side of FFI.
pub fn drawing_to_json(drawing: &Drawing) -> Result<String> {
    Ok(serde_json::to_string_pretty(drawing)?)
}

/// File name for a diagram: the title with anything outside
/// `[A-Za-z0-9_-]` replaced by `_`, plus `.svg`.
pub fn svg_file_name(title: &str) -> String {
    let trimmed = title.trim();
    let stem: String = if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    };
    format!("{stem}.svg")
}

/// Render a spec and write it into `dir`, returning the written path.
pub fn save_svg<P: AsRef<Path>>(spec: &ChordDiagramSpec, dir: P) -> Result<PathBuf> {
    let svg = render_chord_to_svg(spec)?;
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(svg_file_name(spec.title()));
    std::fs::write(&path, svg)?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Read a C string argument, run `render`, and hand the SVG back as an
/// owned C string. Null for null/non-UTF-8 input or any render failure.
unsafe fn render_c_string(
    name: &str,
    json: *const c_char,
    render: fn(&str) -> Result<String>,
) -> *mut c_char {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(json) };
    let json_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    let svg = match render(json_str) {
        Ok(svg) => svg,
        Err(e) => {
            log::warn!("{name}: {e}");
            return std::ptr::null_mut();
        }
    };
    match CString::new(svg) {
        Ok(c) => c.into_raw(),
        Err(e) => {
            log::warn!("{name}: SVG contains an interior NUL at byte {}", e.nul_position());
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON chord description and return SVG as a C string.
/// Returns null on invalid input. The caller must free the returned
/// string with `chordlib_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chordlib_render_json(json: *const c_char) -> *mut c_char {
    unsafe { render_c_string("chordlib_render_json", json, render_json_to_svg) }
}

/// Render the creation form's grid (JSON) and return SVG as a C string.
/// Returns null on invalid input. The caller must free the returned
/// string with `chordlib_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chordlib_render_grid_json(json: *const c_char) -> *mut c_char {
    unsafe { render_c_string("chordlib_render_grid_json", json, render_grid_json_to_svg) }
}

/// Free a string previously returned by chordlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chordlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn chordlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
