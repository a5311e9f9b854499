//! Load-on-demand animation registry.
//!
//! The cache deduplicates clips by file name, owns the joint-name table
//! every load resolves through, and evicts clips nobody holds a
//! reference on. Handles are stable identities: reloading rewrites a
//! clip's contents in place, so every outstanding handle observes the
//! new data.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use log::warn;

use crate::clip::{MD5_ANIM_EXT, Md5Anim};
use crate::name_table::JointNameTable;

#[derive(Debug)]
struct AnimSlot {
    anim: RwLock<Md5Anim>,
    refs: AtomicI32,
}

/// Shared handle to a cached animation.
///
/// Cloning a handle does not touch the reference counter; callers that
/// want to keep a clip alive across [`AnimCache::flush_unused`] sweeps
/// pair [`acquire`](Self::acquire) with [`release`](Self::release).
#[derive(Debug, Clone)]
pub struct AnimHandle {
    slot: Arc<AnimSlot>,
}

impl AnimHandle {
    fn new(anim: Md5Anim) -> Self {
        Self {
            slot: Arc::new(AnimSlot {
                anim: RwLock::new(anim),
                refs: AtomicI32::new(0),
            }),
        }
    }

    /// Read access to the clip data
    pub fn read(&self) -> RwLockReadGuard<'_, Md5Anim> {
        self.slot
            .anim
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register a holder; the clip survives eviction sweeps while the
    /// counter is positive
    pub fn acquire(&self) {
        self.slot.refs.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop a holder registration
    pub fn release(&self) {
        self.slot.refs.fetch_sub(1, Ordering::Relaxed);
    }

    /// Current holder count
    pub fn ref_count(&self) -> i32 {
        self.slot.refs.load(Ordering::Relaxed)
    }

    /// Whether two handles refer to the same underlying clip
    pub fn same_clip(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

/// Deduplicating name-to-clip registry with reference-counted eviction
#[derive(Debug, Default)]
pub struct AnimCache {
    anims: HashMap<String, AnimHandle>,
    joint_names: JointNameTable,
}

impl AnimCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a clip, loading it on first request.
    ///
    /// Only `.md5anim` names are accepted; anything else returns `None`
    /// without touching the file system. A failed load is logged and not
    /// remembered, so the next request retries the disk.
    pub fn get_anim(&mut self, name: &str) -> Option<AnimHandle> {
        if let Some(handle) = self.anims.get(name) {
            return Some(handle.clone());
        }

        let extension = Path::new(name).extension().and_then(|e| e.to_str());
        if extension != Some(MD5_ANIM_EXT) {
            return None;
        }

        match Md5Anim::load(name, &mut self.joint_names) {
            Ok(anim) => {
                let handle = AnimHandle::new(anim);
                self.anims.insert(name.to_string(), handle.clone());
                Some(handle)
            }
            Err(err) => {
                warn!("couldn't load anim '{name}': {err}");
                None
            }
        }
    }

    /// Evict every clip whose holder count is zero or below
    pub fn flush_unused(&mut self) {
        self.anims.retain(|_, handle| handle.ref_count() > 0);
    }

    /// Re-load every cached clip from disk in place. Holders keep their
    /// handles and see the refreshed data; clips that fail to re-load are
    /// logged and keep their name for a later retry.
    pub fn reload_anims(&mut self) {
        for handle in self.anims.values() {
            let mut anim = handle
                .slot
                .anim
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Err(err) = anim.reload(&mut self.joint_names) {
                warn!("couldn't reload anim '{}': {err}", anim.name());
            }
        }
    }

    /// The joint-name table shared by all loaded clips
    pub fn joint_names(&self) -> &JointNameTable {
        &self.joint_names
    }

    /// Mutable access to the shared joint-name table
    pub fn joint_names_mut(&mut self) -> &mut JointNameTable {
        &mut self.joint_names
    }

    /// Number of cached clips
    pub fn len(&self) -> usize {
        self.anims.len()
    }

    /// Whether the cache holds no clips
    pub fn is_empty(&self) -> bool {
        self.anims.is_empty()
    }

    /// Iterate over cached clips by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnimHandle)> {
        self.anims.iter().map(|(name, handle)| (name.as_str(), handle))
    }
}
