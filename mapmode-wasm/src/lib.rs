use mapmode::{LayerStore, ModeController, PmOptions};
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logger;

pub use logger::init_logging;

/// One map with its global interaction modes, backed by an in-memory layer store
#[wasm_bindgen]
pub struct PmMap {
    pub(crate) inner: ModeController<LayerStore>,
}

impl PmMap {
    pub fn rs_new(map_id: u32, options: PmOptions) -> PmMap {
        PmMap { inner: ModeController::new(LayerStore::new(map_id), options) }
    }

    pub fn controller(&self) -> &ModeController<LayerStore> {
        &self.inner
    }
}
