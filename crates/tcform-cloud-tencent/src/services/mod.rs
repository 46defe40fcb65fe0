//! One interface per vendor sub-service
//!
//! Resources only talk to these traits. [`crate::client::TencentClient`]
//! implements all of them against the real API; tests swap in an in-memory
//! double.

pub mod cfs;
pub mod dbbrain;
pub mod mariadb;
pub mod sts;
pub mod tag;
pub mod tsf;
pub mod vpc;

pub use cfs::{CfsApi, CfsSnapshot};
pub use dbbrain::{DbbrainApi, SecLogExportTaskInfo};
pub use mariadb::{MariadbApi, SecurityGroup};
pub use sts::StsApi;
pub use tag::TagApi;
pub use tsf::{CreateConfigRequest, TsfApi, TsfConfig};
pub use vpc::{
    Address, AllocateAddressesRequest, BandwidthPackage, CreateVpnGatewayRequest, Filter,
    InstanceChargePrepaid, ServiceTemplate, Tag, VpcApi, VpnConnection, VpnGateway,
};

use serde::Deserialize;
use tcform_cloud::Result;

/// Page size used by describe calls that paginate
pub(crate) const PAGE_LIMIT: u64 = 100;

/// Turn a not-found error into `None`
pub(crate) fn found<T>(result: Result<Option<T>>) -> Result<Option<T>> {
    match result {
        Err(e) if e.is_not_found() => Ok(None),
        other => other,
    }
}

/// Response carrying nothing but the request id
#[derive(Deserialize)]
pub(crate) struct Empty {}
