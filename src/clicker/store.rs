//! セーブデータの保存先。
//!
//! ゲーム本体は JSON 文字列の読み書きだけを [`SaveStore`] に依頼する。
//! ブラウザでは localStorage、ネイティブではファイル、テストではメモリを使う。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// localStorage のキー。
pub const STORAGE_KEY: &str = "buttonClickerGameState";

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize save: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage rejected the operation: {0}")]
    Storage(String),
    #[error("no storage available")]
    Unavailable,
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// 1 件のセーブレコードを保持するバックエンド。
pub trait SaveStore {
    /// 保存済みの JSON。未保存なら `Ok(None)`。
    fn read(&self) -> Result<Option<String>, SaveError>;
    fn write(&mut self, json: &str) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// メモリ上のストア。clone したハンドルは同じ中身を共有する。
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の JSON が入った状態で作る。
    pub fn with_contents(json: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(json.into());
        store
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// true の間、書き込みは `SaveError::Storage` で失敗する。
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        if self.fail_writes.get() {
            return Err(SaveError::Storage("quota exceeded".into()));
        }
        *self.slot.borrow_mut() = Some(json.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// JSON ファイル 1 つに保存する。ネイティブ環境専用。
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// ブラウザの localStorage。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(SaveError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorage {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        Self::storage()?
            .set_item(STORAGE_KEY, json)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Self::storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}
