//! Entity grouping port: resolves devices and areas into member lights.

use std::future::Future;
use std::sync::Arc;

use sunset_domain::error::SunsetError;
use sunset_domain::id::{AreaId, DeviceId, LightId};

pub trait EntityGrouping {
    /// Lights belonging to `device`. Unknown devices resolve to no lights.
    fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send;

    /// Lights placed in `area`. Unknown areas resolve to no lights.
    fn entities_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send;
}

impl<T: EntityGrouping + Send + Sync> EntityGrouping for Arc<T> {
    fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send {
        (**self).entities_for_device(device)
    }

    fn entities_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send {
        (**self).entities_for_area(area)
    }
}
