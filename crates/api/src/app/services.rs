use fleetbill_engine::Engine;
use fleetbill_store::Settings;

/// Application services: the billing engine over in-memory stores.
///
/// Swapping storage means wiring the same engine services over other
/// `RecordStore` implementations here.
pub struct AppServices {
    pub engine: Engine,
}

pub fn build_services() -> AppServices {
    AppServices {
        engine: Engine::in_memory(Settings::default()),
    }
}
