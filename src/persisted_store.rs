use std::cell::RefCell;

use rkyv::api::high::{HighDeserializer, HighSerializer, HighValidator};
use rkyv::bytecheck::CheckBytes;
use rkyv::rancor::Error;
use rkyv::ser::allocator::ArenaHandle;
use rkyv::util::AlignedVec;
use wasm_bindgen_futures::spawn_local;

use crate::idb;
use crate::persisted::{
    ProgressBlob, SettingsBlob, PROGRESS_KEY, PROGRESS_VERSION, SETTINGS_KEY, SETTINGS_VERSION,
};

thread_local! {
    static SETTINGS_CACHE: RefCell<Option<SettingsBlob>> = const { RefCell::new(None) };
    static PROGRESS_CACHE: RefCell<Option<ProgressBlob>> = const { RefCell::new(None) };
}

/// Loads the persisted blobs into the thread-local caches before the app
/// mounts. A version mismatch or a decode failure falls back to defaults.
pub(crate) async fn bootstrap() -> Result<(), String> {
    let db = idb::open_db().await.map_err(idb::js_err)?;
    let settings = load_settings(&db).await.unwrap_or_default();
    let progress = load_progress(&db).await.unwrap_or_default();
    SETTINGS_CACHE.with(|slot| {
        *slot.borrow_mut() = Some(settings);
    });
    PROGRESS_CACHE.with(|slot| {
        *slot.borrow_mut() = Some(progress);
    });
    Ok(())
}

pub(crate) fn settings_blob() -> SettingsBlob {
    SETTINGS_CACHE
        .with(|slot| slot.borrow().clone())
        .unwrap_or_default()
}

pub(crate) fn progress_blob() -> ProgressBlob {
    PROGRESS_CACHE
        .with(|slot| slot.borrow().clone())
        .unwrap_or_default()
}

/// Applies `update` to the cached settings and writes the result back in the
/// background. Reads keep hitting the cache so the UI never waits on idb.
pub(crate) fn update_settings_blob<F>(update: F) -> SettingsBlob
where
    F: FnOnce(&mut SettingsBlob),
{
    let settings = SETTINGS_CACHE.with(|slot| {
        let mut settings = slot.borrow().clone().unwrap_or_default();
        update(&mut settings);
        *slot.borrow_mut() = Some(settings.clone());
        settings
    });
    let saved = settings.clone();
    spawn_local(async move {
        if let Err(err) = save_settings(saved).await {
            gloo::console::warn!("settings save failed", err);
        }
    });
    settings
}

pub(crate) fn update_progress_blob<F>(update: F) -> ProgressBlob
where
    F: FnOnce(&mut ProgressBlob),
{
    let progress = PROGRESS_CACHE.with(|slot| {
        let mut progress = slot.borrow().clone().unwrap_or_default();
        update(&mut progress);
        *slot.borrow_mut() = Some(progress.clone());
        progress
    });
    let saved = progress.clone();
    spawn_local(async move {
        if let Err(err) = save_progress(saved).await {
            gloo::console::warn!("progress save failed", err);
        }
    });
    progress
}

async fn load_settings(db: &web_sys::IdbDatabase) -> Option<SettingsBlob> {
    let bytes = idb::idb_get_bytes(db, idb::IDB_STORE_SETTINGS, SETTINGS_KEY)
        .await
        .ok()
        .flatten()?;
    let settings = decode::<SettingsBlob>(&bytes)?;
    if settings.version != SETTINGS_VERSION {
        gloo::console::log!("settings blob: version mismatch, using defaults");
        return None;
    }
    Some(settings)
}

async fn load_progress(db: &web_sys::IdbDatabase) -> Option<ProgressBlob> {
    let bytes = idb::idb_get_bytes(db, idb::IDB_STORE_PROGRESS, PROGRESS_KEY)
        .await
        .ok()
        .flatten()?;
    let progress = decode::<ProgressBlob>(&bytes)?;
    if progress.version != PROGRESS_VERSION {
        gloo::console::log!("progress blob: version mismatch, using defaults");
        return None;
    }
    Some(progress)
}

async fn save_settings(settings: SettingsBlob) -> Result<(), String> {
    let Some(bytes) = encode(&settings) else {
        return Ok(());
    };
    let db = idb::open_db().await.map_err(idb::js_err)?;
    idb::idb_put_bytes(&db, idb::IDB_STORE_SETTINGS, SETTINGS_KEY, &bytes)
        .await
        .map_err(idb::js_err)?;
    Ok(())
}

async fn save_progress(progress: ProgressBlob) -> Result<(), String> {
    let Some(bytes) = encode(&progress) else {
        return Ok(());
    };
    let db = idb::open_db().await.map_err(idb::js_err)?;
    idb::idb_put_bytes(&db, idb::IDB_STORE_PROGRESS, PROGRESS_KEY, &bytes)
        .await
        .map_err(idb::js_err)?;
    Ok(())
}

fn encode<T>(value: &T) -> Option<Vec<u8>>
where
    T: for<'a> rkyv::Serialize<HighSerializer<AlignedVec, ArenaHandle<'a>, Error>>,
{
    rkyv::to_bytes::<Error>(value)
        .ok()
        .map(|bytes| bytes.into_vec())
}

fn decode<T>(bytes: &[u8]) -> Option<T>
where
    T: rkyv::Archive,
    T::Archived: for<'a> CheckBytes<HighValidator<'a, Error>>
        + rkyv::Deserialize<T, HighDeserializer<Error>>,
{
    rkyv::from_bytes::<T, Error>(bytes).ok()
}
