use js_sys::{Array, Function, Object, Reflect};
use prefs_host::{PrefsError, PrefsResult};
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = FS, js_name = mkdirTree, catch)]
    fn js_mkdir_tree(path: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = writeFile, catch)]
    fn js_write_file(path: &str, data: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = readFile, catch)]
    fn js_read_file(path: &str, opts: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = analyzePath, catch)]
    fn js_analyze_path(path: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = stat, catch)]
    fn js_stat(path: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = isFile)]
    fn js_is_file_mode(mode: f64) -> bool;

    #[wasm_bindgen(js_namespace = FS, js_name = isDir)]
    fn js_is_dir_mode(mode: f64) -> bool;

    #[wasm_bindgen(js_namespace = FS, js_name = unlink, catch)]
    fn js_unlink(path: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = readdir, catch)]
    fn js_readdir(path: &str) -> Result<Array, JsValue>;

    #[wasm_bindgen(js_namespace = FS, js_name = syncfs, catch)]
    fn js_syncfs(populate: bool, callback: &Function) -> Result<(), JsValue>;
}

fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn fs_err(operation: &'static str, path: &str, err: JsValue) -> PrefsError {
    PrefsError::io(operation, path, js_error_text(&err))
}

fn storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

pub fn local_storage_get(key: &str) -> Result<Option<String>, String> {
    storage()?
        .get_item(key)
        .map_err(|e| format!("localStorage get_item failed: {e:?}"))
}

pub fn local_storage_set(key: &str, value: &str) -> Result<(), String> {
    storage()?
        .set_item(key, value)
        .map_err(|e| format!("localStorage set_item failed: {e:?}"))
}

pub fn local_storage_remove(key: &str) -> Result<(), String> {
    storage()?
        .remove_item(key)
        .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
}

pub fn local_storage_keys() -> Result<Vec<String>, String> {
    let storage = storage()?;
    let len = storage
        .length()
        .map_err(|e| format!("localStorage length failed: {e:?}"))?;
    let mut keys = Vec::with_capacity(len as usize);
    for idx in 0..len {
        if let Some(key) = storage
            .key(idx)
            .map_err(|e| format!("localStorage key failed: {e:?}"))?
        {
            keys.push(key);
        }
    }
    Ok(keys)
}

pub fn fs_mkdir_tree(path: &str) -> PrefsResult<()> {
    js_mkdir_tree(path).map_err(|err| fs_err("create directory", path, err))
}

pub fn fs_write_text(path: &str, text: &str) -> PrefsResult<()> {
    js_write_file(path, text).map_err(|err| fs_err("write", path, err))
}

pub fn fs_read_text(path: &str) -> PrefsResult<String> {
    let opts = Object::new();
    Reflect::set(&opts, &"encoding".into(), &"utf8".into())
        .map_err(|err| fs_err("read", path, err))?;
    let value = js_read_file(path, &opts).map_err(|err| fs_err("read", path, err))?;
    value
        .as_string()
        .ok_or_else(|| PrefsError::io("read", path, "file contents are not text"))
}

fn stat_mode(path: &str) -> PrefsResult<Option<f64>> {
    let analysis = js_analyze_path(path).map_err(|err| fs_err("stat", path, err))?;
    let exists = Reflect::get(&analysis, &"exists".into())
        .map_err(|err| fs_err("stat", path, err))?
        .as_bool()
        .unwrap_or(false);
    if !exists {
        return Ok(None);
    }
    let stat = js_stat(path).map_err(|err| fs_err("stat", path, err))?;
    let mode = Reflect::get(&stat, &"mode".into())
        .map_err(|err| fs_err("stat", path, err))?
        .as_f64();
    Ok(mode)
}

pub fn fs_is_file(path: &str) -> PrefsResult<bool> {
    Ok(stat_mode(path)?.is_some_and(js_is_file_mode))
}

pub fn fs_is_dir(path: &str) -> PrefsResult<bool> {
    Ok(stat_mode(path)?.is_some_and(js_is_dir_mode))
}

pub fn fs_unlink(path: &str) -> PrefsResult<()> {
    js_unlink(path).map_err(|err| fs_err("delete", path, err))
}

pub fn fs_read_dir(path: &str) -> PrefsResult<Vec<String>> {
    let entries = js_readdir(path).map_err(|err| fs_err("list", path, err))?;
    Ok(entries
        .iter()
        .filter_map(|entry| entry.as_string())
        .filter(|name| name != "." && name != "..")
        .collect())
}

pub fn fs_sync_to_durable() -> Result<(), String> {
    let done = Closure::once_into_js(|err: JsValue| {
        if !err.is_null() && !err.is_undefined() {
            log::warn!("IDBFS sync failed: {}", js_error_text(&err));
        }
    });
    js_syncfs(false, done.unchecked_ref()).map_err(|err| js_error_text(&err))
}
