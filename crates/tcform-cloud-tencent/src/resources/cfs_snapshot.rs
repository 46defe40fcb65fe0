//! `tencentcloud_cfs_snapshot`: point-in-time snapshot of a CFS file system

use super::{read_tags, update_tags, write_tags};
use crate::context::TencentContext;
use crate::services::CfsSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tcform_cloud::error::code_matches;
use tcform_cloud::retry::{StateChangeConf, retry_read, retry_write};
use tcform_cloud::{
    AttributeSchema, AttributeType, CloudError, ResourceData, ResourceHandler, ResourceSchema,
    Result, Tags, retry_error, retry_read_error,
};

pub const TYPE_NAME: &str = "tencentcloud_cfs_snapshot";

const TAG_SERVICE: &str = "cfs";
const TAG_RESOURCE: &str = "snap";

const STATUS_AVAILABLE: &str = "available";

#[derive(Debug, Deserialize)]
struct CfsSnapshotArgs {
    file_system_id: String,
    snapshot_name: Option<String>,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Serialize)]
struct CfsSnapshotState {
    file_system_id: Option<String>,
    snapshot_name: Option<String>,
    status: Option<String>,
    creation_time: Option<String>,
    size: Option<i64>,
    tags: Tags,
}

pub struct CfsSnapshotResource {
    ctx: TencentContext,
}

impl CfsSnapshotResource {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }

    async fn describe(&self, snapshot_id: &str) -> Result<Option<CfsSnapshot>> {
        let cfs = self.ctx.cfs.as_ref();
        retry_read(&self.ctx.retry, move || async move {
            cfs.describe_snapshot(snapshot_id)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await
    }
}

#[async_trait]
impl ResourceHandler for CfsSnapshotResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("CFS file system snapshot")
            .attribute(
                AttributeSchema::required("file_system_id", AttributeType::String)
                    .force_new()
                    .with_description("Id of file system."),
            )
            .attribute(
                AttributeSchema::optional("snapshot_name", AttributeType::String)
                    .with_description("Name of snapshot."),
            )
            .attribute(AttributeSchema::computed("status", AttributeType::String))
            .attribute(AttributeSchema::computed("creation_time", AttributeType::String))
            .attribute(
                AttributeSchema::computed("size", AttributeType::Int)
                    .with_description("Snapshot size in bytes."),
            )
            .attribute(
                AttributeSchema::optional("tags", AttributeType::Map)
                    .with_description("Tag description list."),
            )
    }

    async fn create(&self, d: &mut ResourceData) -> Result<()> {
        let args: CfsSnapshotArgs = d.decode()?;
        let cfs = self.ctx.cfs.as_ref();
        let retry = &self.ctx.retry;

        let fs_id = args.file_system_id.as_str();
        let name = args.snapshot_name.as_deref().filter(|n| !n.is_empty());
        let snapshot_id = retry_write(retry, move || async move {
            cfs.create_snapshot(fs_id, name)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await?;
        d.set_id(snapshot_id.clone());

        let id = snapshot_id.as_str();
        StateChangeConf::new(
            &[],
            &[STATUS_AVAILABLE],
            retry.read_timeout * 2,
            retry.poll_interval,
            move || async move {
                let snapshot = cfs.describe_snapshot(id).await?;
                Ok::<_, CloudError>(snapshot.map(|s| s.status.unwrap_or_default()))
            },
        )
        .wait_for_state()
        .await?;

        write_tags(&self.ctx, TAG_SERVICE, TAG_RESOURCE, id, &Tags::new(), &args.tags).await
    }

    async fn read(&self, d: &mut ResourceData) -> Result<()> {
        let snapshot_id = d.require_id()?.to_string();
        let Some(snapshot) = self.describe(&snapshot_id).await? else {
            d.clear_id();
            return Ok(());
        };

        let tags = read_tags(&self.ctx, TAG_SERVICE, TAG_RESOURCE, &snapshot_id).await?;
        d.set_state(&CfsSnapshotState {
            file_system_id: snapshot.file_system_id,
            snapshot_name: snapshot.snapshot_name,
            status: snapshot.status,
            creation_time: snapshot.creation_time,
            size: snapshot.size,
            tags,
        })
    }

    async fn update(&self, d: &mut ResourceData) -> Result<()> {
        let snapshot_id = d.require_id()?.to_string();

        if d.has_change("snapshot_name") {
            let cfs = self.ctx.cfs.as_ref();
            let id = snapshot_id.as_str();
            let (_, name) = d.get_change("snapshot_name");
            let name = name.as_str().unwrap_or_default().to_string();
            let name = name.as_str();
            retry_write(&self.ctx.retry, move || async move {
                cfs.update_snapshot_name(id, name)
                    .await
                    .map_err(|e| retry_error(e, &[]))
            })
            .await?;
        }

        update_tags(&self.ctx, d, TAG_SERVICE, TAG_RESOURCE).await
    }

    async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        let snapshot_id = d.require_id()?.to_string();
        let id = snapshot_id.as_str();
        let cfs = self.ctx.cfs.as_ref();
        let retry = &self.ctx.retry;

        retry_write(retry, move || async move {
            cfs.delete_snapshot(id)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await?;

        // The service answers InternalError for a while after a delete
        StateChangeConf::new(
            &[],
            &[],
            retry.read_timeout * 2,
            retry.poll_interval,
            move || async move {
                match cfs.describe_snapshot(id).await {
                    Ok(snapshot) => Ok(snapshot.map(|s| s.status.unwrap_or_default())),
                    Err(e) if e.code().is_some_and(|c| code_matches(c, "InternalError")) => {
                        Ok(Some("deleting".to_string()))
                    }
                    Err(e) => Err(e),
                }
            },
        )
        .wait_for_state()
        .await?;
        Ok(())
    }
}
