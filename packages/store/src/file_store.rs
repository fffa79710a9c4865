//! # Filesystem-backed slot storage
//!
//! [`FileStorage`] is a [`Storage`] implementation that persists slots to
//! the local filesystem. It is used on desktop platforms to retain tables
//! and the session across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── slots/
//!     └── <encoded_slot_name>    # full slot contents, e.g. a table's JSON array
//! ```
//!
//! Slot names can contain characters that are not filename-safe (table
//! namespacing uses `:`), so those are percent-encoded in the file name.
//!
//! ## Platform data directories
//!
//! Pass a platform-appropriate base such as `dirs::data_dir()`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/noteself/` |
//! | Linux | `~/.local/share/noteself/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\noteself\` |

use std::path::PathBuf;

use crate::error::StoreError;
use crate::tables::Storage;

/// Filesystem-backed Storage for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn slots_dir(&self) -> PathBuf {
        self.base.join("slots")
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.slots_dir().join(encode_slot_name(slot))
    }
}

/// Percent-encode the characters a slot name may carry that filesystems
/// reject or treat as separators.
fn encode_slot_name(slot: &str) -> String {
    let mut out = String::with_capacity(slot.len());
    for c in slot.chars() {
        match c {
            '%' | ':' | '/' | '\\' => out.push_str(&format!("%{:02X}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

impl Storage for FileStorage {
    async fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::unavailable(slot, err)),
        }
    }

    async fn write(&self, slot: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.slot_path(slot);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| StoreError::unavailable(slot, err))?;
        }
        // Write-then-rename so a failed write (out of space) cannot leave
        // the slot half-replaced.
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(|err| StoreError::unavailable(slot, err))?;
        std::fs::rename(&tmp, &path).map_err(|err| StoreError::unavailable(slot, err))
    }

    async fn remove(&self, slot: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::unavailable(slot, err)),
        }
    }
}
