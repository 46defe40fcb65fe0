//! Read-only lookups

pub mod dbbrain_security_audit_log_export_tasks;
pub mod service_templates;

pub use dbbrain_security_audit_log_export_tasks::DbbrainSecurityAuditLogExportTasks;
pub use service_templates::ServiceTemplates;
