//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{render_grid_json_to_svg, render_json_to_svg};

/// Convert a Rust SVG result into a Java string, or null on any failure.
fn into_jstring(env: &mut JNIEnv, result: crate::Result<String>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("chord render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON chord description to SVG.
///
/// Called from Kotlin as:
///   external fun renderJson(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_rechord_app_ChordLib_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let json_str: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_json_to_svg(&json_str);
    into_jstring(&mut env, result)
}

/// Render the creation form's grid (JSON) to SVG.
///
/// Called from Kotlin as:
///   external fun renderGridJson(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_rechord_app_ChordLib_renderGridJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let json_str: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_grid_json_to_svg(&json_str);
    into_jstring(&mut env, result)
}
