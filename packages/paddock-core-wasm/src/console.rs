#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This allows us to access console.log from JS
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    // Use `js_namespace` to bind `console.log(..)` instead of just `log(..)`
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

#[cfg(target_arch = "wasm32")]
pub fn error(s: &str) {
    web_sys::console::error_1(&JsValue::from_str(s));
}

// Native builds (unit tests) have no JS console to call into
#[cfg(not(target_arch = "wasm32"))]
pub fn log(s: &str) {
    eprintln!("{}", s);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(s: &str) {
    eprintln!("error: {}", s);
}

// Note: The console_log and console_error macros are defined in lib.rs
