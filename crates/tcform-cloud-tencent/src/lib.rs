//! Tencent Cloud provider for tcform
//!
//! This crate implements the [`CloudProvider`](tcform_cloud::CloudProvider)
//! trait on top of the signed Tencent Cloud JSON API.
//!
//! # Resources
//!
//! - `tencentcloud_eip`: elastic public IP
//! - `tencentcloud_vpn_gateway`: VPN gateway in a VPC or attached to CCN
//! - `tencentcloud_cfs_snapshot`: snapshot of a CFS file system
//! - `tencentcloud_mariadb_security_groups`: security group binding of a MariaDB instance
//! - `tencentcloud_tsf_application_config`: TSF application configuration version
//!
//! # Data sources
//!
//! - `tencentcloud_service_templates`
//! - `tencentcloud_dbbrain_security_audit_log_export_tasks`
//!
//! # Example
//!
//! ```ignore
//! use tcform_cloud::CloudProvider;
//! use tcform_cloud_tencent::{Credentials, TencentClient, TencentCloudProvider};
//!
//! let client = TencentClient::new(Credentials::new(secret_id, secret_key), "ap-guangzhou")?;
//! let provider = TencentCloudProvider::new(client);
//!
//! let auth = provider.check_auth().await?;
//! if !auth.authenticated {
//!     panic!("Not authenticated: {:?}", auth.error);
//! }
//! ```

pub mod client;
pub mod context;
pub mod data_sources;
pub mod error;
pub mod provider;
pub mod ratelimit;
pub mod resources;
pub mod services;
pub mod sign;

#[cfg(test)]
mod testing;

pub use client::{CallerIdentity, TencentClient};
pub use context::TencentContext;
pub use error::{Result, TencentError};
pub use provider::{PROVIDER_NAME, TencentCloudProvider};
pub use sign::Credentials;
