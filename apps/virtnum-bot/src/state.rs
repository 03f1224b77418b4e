use crate::services::registry_service::RegistryService;
use crate::services::session_service::SessionService;
use virtnum_provider::VirtualNumberClient;

#[derive(Clone)]
pub struct AppState {
    pub provider: VirtualNumberClient,
    pub registry: RegistryService,
    pub sessions: SessionService,
}
