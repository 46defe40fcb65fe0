//! Plan and apply desired state against a provider
//!
//! The engine compares the desired [`ResourceSet`] with the local
//! [`GlobalState`], then runs the resulting actions concurrently. Every
//! action drives its own [`Reconciler`]; the state map is only touched once
//! an action has finished.

use crate::action::{Action, ActionType, ApplyResult, Plan};
use crate::error::{CloudError, Result};
use crate::provider::{CloudProvider, ResourceConfig, ResourceSet};
use crate::reconciler::{Instance, Reconciler};
use crate::resource::ResourceData;
use crate::state::{GlobalState, ResourceState, ResourceStatus, state_key};
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use std::time::Instant;

/// Number of actions in flight at once
pub const DEFAULT_PARALLELISM: usize = 10;

pub struct Engine<'a> {
    provider: &'a dyn CloudProvider,
    parallelism: usize,
}

/// What to do with the state entry once an action finished
enum StateChange {
    Put(ResourceState),
    Remove,
}

struct ActionOutcome {
    action_id: String,
    key: String,
    change: Option<StateChange>,
    result: Result<String>,
}

impl<'a> Engine<'a> {
    pub fn new(provider: &'a dyn CloudProvider) -> Self {
        Self {
            provider,
            parallelism: DEFAULT_PARALLELISM,
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    fn key(&self, resource_type: &str, name: &str) -> String {
        state_key(self.provider.name(), resource_type, name)
    }

    /// Split a state key of this provider into `(type, name)`
    fn parse_key<'k>(&self, key: &'k str) -> Option<(&'k str, &'k str)> {
        let rest = key.strip_prefix(self.provider.name())?.strip_prefix(':')?;
        rest.split_once(':')
    }

    /// Compare desired resources with state
    pub fn plan(&self, desired: &ResourceSet, state: &GlobalState) -> Result<Plan> {
        let mut actions = Vec::new();

        for config in desired.iter() {
            let handler = self.provider.require_resource(&config.resource_type)?;
            let schema = handler.schema();
            schema.validate(&config.attributes)?;

            let key = self.key(&config.resource_type, &config.name);
            let Some(current) = state.get_resource(&key) else {
                actions.push(Action::new(
                    ActionType::Create,
                    &config.resource_type,
                    &config.name,
                ));
                continue;
            };

            let data = ResourceData::from_state(
                &config.resource_type,
                &current.id,
                current.attributes.clone(),
            )
            .with_config(schema.normalize(&config.attributes));
            let changed = data.changed_keys();

            let force_new = changed
                .iter()
                .any(|k| schema.get(k).is_some_and(|a| a.force_new));
            let action_type = if current.status == ResourceStatus::Failed || force_new {
                ActionType::Replace
            } else if changed.is_empty() {
                ActionType::NoOp
            } else {
                ActionType::Update
            };

            actions.push(
                Action::new(action_type, &config.resource_type, &config.name)
                    .with_changed(changed),
            );
        }

        for (key, _) in state.get_provider_resources(self.provider.name()) {
            let Some((resource_type, name)) = self.parse_key(key) else {
                continue;
            };
            if desired.get(resource_type, name).is_none() {
                actions.push(Action::new(ActionType::Delete, resource_type, name));
            }
        }

        Ok(Plan::new(actions))
    }

    /// Execute a plan, recording every outcome in `state`
    pub async fn apply(
        &self,
        plan: &Plan,
        desired: &ResourceSet,
        state: &mut GlobalState,
    ) -> ApplyResult {
        let start = Instant::now();
        let snapshot: &GlobalState = state;

        let outcomes: Vec<ActionOutcome> = stream::iter(
            plan.actions
                .iter()
                .filter(|a| a.action_type != ActionType::NoOp),
        )
        .map(|action| {
            let key = self.key(&action.resource_type, &action.name);
            let current = snapshot.get_resource(&key).cloned();
            let config = desired.get(&action.resource_type, &action.name).cloned();
            self.run_action(action, key, current, config)
        })
        .buffer_unordered(self.parallelism)
        .collect()
        .await;

        let mut result = ApplyResult::new();
        for outcome in outcomes {
            match outcome.change {
                Some(StateChange::Put(resource)) => state.set_resource(outcome.key, resource),
                Some(StateChange::Remove) => {
                    state.remove_resource(&outcome.key);
                }
                None => {}
            }
            match outcome.result {
                Ok(message) => result.add_success(outcome.action_id, message),
                Err(e) => {
                    tracing::error!("{} failed: {}", outcome.action_id, e);
                    result.add_failure(outcome.action_id, e.to_string());
                }
            }
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        result
    }

    async fn run_action(
        &self,
        action: &Action,
        key: String,
        current: Option<ResourceState>,
        config: Option<ResourceConfig>,
    ) -> ActionOutcome {
        let mut outcome = ActionOutcome {
            action_id: action.id.clone(),
            key,
            change: None,
            result: Ok(String::new()),
        };

        let handler = match self.provider.require_resource(&action.resource_type) {
            Ok(handler) => handler,
            Err(e) => {
                outcome.result = Err(e);
                return outcome;
            }
        };
        let reconciler = Reconciler::new(handler.as_ref());
        let created_at = current.as_ref().map(|c| c.created_at);

        let mut instance = match &current {
            Some(current) => Instance::new(
                action.id.clone(),
                ResourceData::from_state(
                    &current.resource_type,
                    &current.id,
                    current.attributes.clone(),
                ),
            )
            .with_status(current.status),
            None => Instance::new(action.id.clone(), ResourceData::new(&action.resource_type)),
        };
        if let Some(config) = &config {
            instance.data.set_config(config.attributes.clone());
        }

        let result = match action.action_type {
            ActionType::Create => reconciler.create(&mut instance).await,
            ActionType::Update => reconciler.update(&mut instance).await,
            ActionType::Delete => reconciler.delete(&mut instance).await,
            ActionType::Replace => match reconciler.delete(&mut instance).await {
                Ok(()) => {
                    // The replacement starts from the configuration alone
                    instance.data = ResourceData::new(&action.resource_type)
                        .with_config(instance.data.config().clone());
                    reconciler.create(&mut instance).await
                }
                Err(e) => Err(e),
            },
            ActionType::NoOp => Ok(()),
        };

        outcome.change = Some(to_state_change(&instance, created_at));
        outcome.result = result.map(|()| match instance.data.id() {
            Some(id) => format!("{} [id={}]", action.description, id),
            None => action.description.clone(),
        });
        outcome
    }

    /// Read every instance again and drop the ones that disappeared
    pub async fn refresh(&self, state: &mut GlobalState) -> Result<Vec<String>> {
        let entries: Vec<(String, ResourceState)> = state
            .get_provider_resources(self.provider.name())
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let refreshed: Vec<(String, Result<StateChange>)> = stream::iter(entries)
            .map(|(key, current)| async move {
                let result = self.refresh_one(&key, current).await;
                (key, result)
            })
            .buffer_unordered(self.parallelism)
            .collect()
            .await;

        let mut removed = Vec::new();
        let mut first_error = None;
        for (key, result) in refreshed {
            match result {
                Ok(StateChange::Put(resource)) => state.set_resource(key, resource),
                Ok(StateChange::Remove) => {
                    state.remove_resource(&key);
                    removed.push(key);
                }
                Err(e) => {
                    tracing::error!("Refreshing {} failed: {}", key, e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }

    async fn refresh_one(&self, key: &str, current: ResourceState) -> Result<StateChange> {
        let handler = self.provider.require_resource(&current.resource_type)?;
        let address = match self.parse_key(key) {
            Some((resource_type, name)) => format!("{}.{}", resource_type, name),
            None => key.to_string(),
        };
        let mut instance = Instance::new(
            address,
            ResourceData::from_state(&current.resource_type, &current.id, current.attributes),
        )
        .with_status(current.status);

        Reconciler::new(handler.as_ref()).read(&mut instance).await?;
        Ok(to_state_change(&instance, Some(current.created_at)))
    }

    /// Adopt an existing remote object under `type.name`
    pub async fn import(
        &self,
        resource_type: &str,
        name: &str,
        id: &str,
        state: &mut GlobalState,
    ) -> Result<ResourceState> {
        let key = self.key(resource_type, name);
        if state.get_resource(&key).is_some() {
            return Err(CloudError::ResourceAlreadyExists(format!(
                "{}.{} is already managed",
                resource_type, name
            )));
        }

        let handler = self.provider.require_resource(resource_type)?;
        let address = format!("{}.{}", resource_type, name);
        let instance = Reconciler::new(handler.as_ref()).import(&address, id).await?;

        let resource = instance_state(&instance, None);
        state.set_resource(key, resource.clone());
        Ok(resource)
    }

    /// Delete every managed instance, or only `target` (`type.name`)
    pub async fn destroy(
        &self,
        state: &mut GlobalState,
        target: Option<&str>,
    ) -> Result<ApplyResult> {
        let mut actions = Vec::new();
        for (key, _) in state.get_provider_resources(self.provider.name()) {
            let Some((resource_type, name)) = self.parse_key(key) else {
                continue;
            };
            let action = Action::new(ActionType::Delete, resource_type, name);
            if target.is_none_or(|t| t == action.id) {
                actions.push(action);
            }
        }

        if let (Some(target), true) = (target, actions.is_empty()) {
            return Err(CloudError::ResourceNotFound(format!(
                "{} is not in state",
                target
            )));
        }

        let plan = Plan::new(actions);
        Ok(self.apply(&plan, &ResourceSet::new(), state).await)
    }
}

fn instance_state(
    instance: &Instance,
    created_at: Option<chrono::DateTime<Utc>>,
) -> ResourceState {
    let mut resource = ResourceState::new(
        instance.data.id().unwrap_or_default(),
        instance.data.resource_type(),
    )
    .with_status(instance.status)
    .with_attributes(instance.data.state().clone());
    if let Some(created_at) = created_at {
        resource.created_at = created_at;
    }
    resource
}

fn to_state_change(
    instance: &Instance,
    created_at: Option<chrono::DateTime<Utc>>,
) -> StateChange {
    if instance.data.id().is_none() {
        StateChange::Remove
    } else {
        StateChange::Put(instance_state(instance, created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeProvider, GATEWAY, attrs};
    use serde_json::json;

    fn desired(entries: &[(&str, serde_json::Value)]) -> ResourceSet {
        let mut set = ResourceSet::new();
        for (name, config) in entries {
            set.add(ResourceConfig::new(GATEWAY, *name, "fake", attrs(config.clone())));
        }
        set
    }

    async fn applied(
        engine: &Engine<'_>,
        set: &ResourceSet,
        state: &mut GlobalState,
    ) -> ApplyResult {
        let plan = engine.plan(set, state).unwrap();
        engine.apply(&plan, set, state).await
    }

    #[tokio::test]
    async fn test_plan_and_apply_creates() {
        let provider = FakeProvider::new();
        let engine = Engine::new(&provider);
        let mut state = GlobalState::new();
        let set = desired(&[
            ("a", json!({"zone": "ap-guangzhou-3"})),
            ("b", json!({"zone": "ap-guangzhou-4"})),
        ]);

        let plan = engine.plan(&set, &state).unwrap();
        assert_eq!(plan.summary().create, 2);

        let result = engine.apply(&plan, &set, &mut state).await;
        assert!(result.is_success());
        assert_eq!(state.resources.len(), 2);
        let a = state.get_resource("fake:test_gateway:a").unwrap();
        assert_eq!(a.status, ResourceStatus::Available);
        assert_eq!(a.attributes["state"], json!("AVAILABLE"));

        let plan = engine.plan(&set, &state).unwrap();
        assert!(!plan.has_changes);
    }

    #[tokio::test]
    async fn test_plan_update_replace_delete() {
        let provider = FakeProvider::new();
        let engine = Engine::new(&provider);
        let mut state = GlobalState::new();
        let set = desired(&[
            ("a", json!({"zone": "ap-guangzhou-3"})),
            ("b", json!({"zone": "ap-guangzhou-3"})),
            ("c", json!({"zone": "ap-guangzhou-3"})),
        ]);
        assert!(applied(&engine, &set, &mut state).await.is_success());

        let next = desired(&[
            ("a", json!({"zone": "ap-guangzhou-3", "name": "renamed"})),
            ("b", json!({"zone": "ap-guangzhou-6"})),
        ]);
        let plan = engine.plan(&next, &state).unwrap();
        let summary = plan.summary();
        assert_eq!((summary.update, summary.replace, summary.delete), (1, 1, 1));

        let update = &plan.actions_by_type(ActionType::Update)[0];
        assert_eq!(update.changed, vec!["name".to_string()]);

        let old_b = state.get_resource("fake:test_gateway:b").unwrap().id.clone();
        let result = engine.apply(&plan, &next, &mut state).await;
        assert!(result.is_success(), "{:?}", result.failed);

        assert_eq!(state.resources.len(), 2);
        let b = state.get_resource("fake:test_gateway:b").unwrap();
        assert_ne!(b.id, old_b);
        assert_eq!(b.attributes["zone"], json!("ap-guangzhou-6"));
        assert_eq!(
            state.get_resource("fake:test_gateway:a").unwrap().attributes["name"],
            json!("renamed")
        );
    }

    #[tokio::test]
    async fn test_failed_create_is_replaced() {
        let provider = FakeProvider::new();
        let engine = Engine::new(&provider);
        let mut state = GlobalState::new();
        let set = desired(&[("a", json!({"zone": "ap-guangzhou-3"}))]);

        *provider.gateway.fail_after_create.lock().unwrap() = true;
        let result = applied(&engine, &set, &mut state).await;
        assert!(!result.is_success());
        let a = state.get_resource("fake:test_gateway:a").unwrap();
        assert_eq!(a.status, ResourceStatus::Failed);

        *provider.gateway.fail_after_create.lock().unwrap() = false;
        let plan = engine.plan(&set, &state).unwrap();
        assert_eq!(plan.summary().replace, 1);
        assert!(engine.apply(&plan, &set, &mut state).await.is_success());
        assert_eq!(
            state.get_resource("fake:test_gateway:a").unwrap().status,
            ResourceStatus::Available
        );
        assert_eq!(provider.gateway.objects.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_drops_vanished() {
        let provider = FakeProvider::new();
        let engine = Engine::new(&provider);
        let mut state = GlobalState::new();
        let set = desired(&[("a", json!({"zone": "ap-guangzhou-3"}))]);
        applied(&engine, &set, &mut state).await;

        let id = state.get_resource("fake:test_gateway:a").unwrap().id.clone();
        provider.gateway.remove_remote(&id);

        let removed = engine.refresh(&mut state).await.unwrap();
        assert_eq!(removed, vec!["fake:test_gateway:a".to_string()]);
        assert!(state.resources.is_empty());
    }

    #[tokio::test]
    async fn test_import_and_destroy_target() {
        let provider = FakeProvider::new();
        let engine = Engine::new(&provider);
        let mut state = GlobalState::new();
        let set = desired(&[
            ("a", json!({"zone": "ap-guangzhou-3"})),
            ("b", json!({"zone": "ap-guangzhou-3"})),
        ]);
        applied(&engine, &set, &mut state).await;

        let id = state.get_resource("fake:test_gateway:a").unwrap().id.clone();
        let imported = engine.import(GATEWAY, "copy", &id, &mut state).await.unwrap();
        assert_eq!(imported.id, id);
        assert!(engine.import(GATEWAY, "copy", &id, &mut state).await.is_err());

        let result = engine
            .destroy(&mut state, Some("test_gateway.b"))
            .await
            .unwrap();
        assert!(result.is_success());
        assert!(state.get_resource("fake:test_gateway:b").is_none());
        assert!(state.get_resource("fake:test_gateway:a").is_some());

        assert!(engine.destroy(&mut state, Some("test_gateway.zz")).await.is_err());

        let result = engine.destroy(&mut state, None).await.unwrap();
        assert!(result.is_success());
        assert!(state.resources.is_empty());
        assert!(provider.gateway.objects.lock().unwrap().is_empty());
    }
}
