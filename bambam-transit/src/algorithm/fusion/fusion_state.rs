use super::{transfer_edges, FusionStats, StopTable};
use crate::model::{
    network::{EdgeAttributes, GraphStore, NetworkError, ProfileId},
    TravelMode,
};
use std::collections::HashMap;

/// bookkeeping of a single fusion run, threaded through every phase.
#[derive(Debug, Default)]
pub struct FusionState {
    pub stops: StopTable,
    pub stats: FusionStats,
    /// route type -> interned `type=route` profile
    route_profiles: HashMap<String, ProfileId>,
    transfer_profile: Option<ProfileId>,
}

impl FusionState {
    /// the profile of route edges for this route type, interned on first use.
    pub fn route_profile<G: GraphStore>(
        &mut self,
        store: &mut G,
        route_type: &str,
    ) -> Result<ProfileId, NetworkError> {
        if let Some(profile) = self.route_profiles.get(route_type) {
            return Ok(*profile);
        }
        let attributes = EdgeAttributes::new()
            .with(EdgeAttributes::TYPE_KEY, EdgeAttributes::ROUTE_TYPE)
            .with(EdgeAttributes::ROUTE_KEY, route_type);
        let profile = store.intern_attribute_profile(attributes)?;
        self.route_profiles.insert(String::from(route_type), profile);
        self.stats.route_profiles_interned += 1;
        log::debug!("interned route profile {profile} for route type '{route_type}'");
        Ok(profile)
    }

    /// the profile shared by every transfer edge of this run, interned on first use.
    pub fn transfer_profile<G: GraphStore>(
        &mut self,
        store: &mut G,
        modes: &[TravelMode],
    ) -> Result<ProfileId, NetworkError> {
        if let Some(profile) = self.transfer_profile {
            return Ok(profile);
        }
        let profile = store.intern_attribute_profile(transfer_edges::transfer_attributes(modes))?;
        self.transfer_profile = Some(profile);
        Ok(profile)
    }

    pub fn cached_route_types(&self) -> usize {
        self.route_profiles.len()
    }
}
