//! tcform cloud core
//!
//! Provider-agnostic pieces of resource reconciliation: the attribute model,
//! schemas, the per-instance [`ResourceData`], retry and status polling, the
//! generic create/read/update/delete driver and the plan/apply engine with
//! its local state file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   tcform CLI                    │
//! │        (plan / apply / import / destroy)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 tcform-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  Engine ─▶ Reconciler ─▶ ResourceHandler │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │ Retry / Poll │  │  State Mgmt  │             │
//! │  └──────────────┘  └──────────────┘             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼────────┐
//!           │  tencentcloud  │
//!           │    provider    │
//!           └────────────────┘
//! ```

pub mod action;
pub mod attribute;
pub mod data_source;
pub mod engine;
pub mod error;
pub mod id;
pub mod provider;
pub mod reconciler;
pub mod resource;
pub mod retry;
pub mod schema;
pub mod state;
pub mod tags;

#[cfg(test)]
mod testing;

// Re-exports
pub use action::{Action, ActionType, ApplyResult, Plan, PlanSummary};
pub use attribute::{AttributeType, Attributes};
pub use data_source::{DataResult, DataSourceHandler, read_data_source};
pub use engine::Engine;
pub use error::{CloudError, Result};
pub use id::{join_id, split_id};
pub use provider::{AuthStatus, CloudProvider, ResourceConfig, ResourceSet};
pub use reconciler::{Instance, Reconciler, ResourceHandler};
pub use resource::ResourceData;
pub use retry::{RetryConfig, RetryError, StateChangeConf, retry_error, retry_read_error};
pub use schema::{AttributeSchema, ResourceSchema};
pub use state::{GlobalState, ResourceState, ResourceStatus, StateLock, StateManager};
pub use tags::Tags;
