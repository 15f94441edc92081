use prefs_host::{PrefsError, PrefsResult};

fn unsupported() -> PrefsError {
    PrefsError::Unsupported(
        "Emscripten FS is only available when compiled for wasm32".to_string(),
    )
}

pub fn local_storage_get(_key: &str) -> Result<Option<String>, String> {
    Ok(None)
}

pub fn local_storage_set(_key: &str, _value: &str) -> Result<(), String> {
    Ok(())
}

pub fn local_storage_remove(_key: &str) -> Result<(), String> {
    Ok(())
}

pub fn local_storage_keys() -> Result<Vec<String>, String> {
    Ok(Vec::new())
}

pub fn fs_mkdir_tree(_path: &str) -> PrefsResult<()> {
    Err(unsupported())
}

pub fn fs_write_text(_path: &str, _text: &str) -> PrefsResult<()> {
    Err(unsupported())
}

pub fn fs_read_text(_path: &str) -> PrefsResult<String> {
    Err(unsupported())
}

pub fn fs_is_file(_path: &str) -> PrefsResult<bool> {
    Err(unsupported())
}

pub fn fs_is_dir(_path: &str) -> PrefsResult<bool> {
    Err(unsupported())
}

pub fn fs_unlink(_path: &str) -> PrefsResult<()> {
    Err(unsupported())
}

pub fn fs_read_dir(_path: &str) -> PrefsResult<Vec<String>> {
    Err(unsupported())
}

pub fn fs_sync_to_durable() -> Result<(), String> {
    Err("IDBFS sync is only available when compiled for wasm32".to_string())
}
