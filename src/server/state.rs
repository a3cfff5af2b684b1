use std::sync::Mutex;

use crate::location::GeocodeResolver;
use crate::nasa::NasaClient;
use crate::store::ProfileStore;

pub struct AppState {
    pub resolver: GeocodeResolver,
    pub store: Mutex<ProfileStore>,
    pub nasa: NasaClient,
}
