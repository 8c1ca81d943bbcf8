//! ActorEntity trait implementation for the Resource domain type.
//!
//! This is the allocation ledger proper: every arithmetic rule on `total` and
//! `allocated` lives here, and the generic actor guarantees each call is
//! all-or-nothing.

use super::actions::{ResourceAction, ResourceActionResult};
use super::error::ResourceError;
use super::LedgerPolicy;
use crate::framework::ActorEntity;
use crate::model::{ProjectId, Resource, ResourceCreate, ResourceId, ResourceUpdate};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Resource {
    type Id = ResourceId;
    type Create = ResourceCreate;
    type Update = ResourceUpdate;
    type Action = ResourceAction;
    type ActionResult = ResourceActionResult;
    type Context = LedgerPolicy;
    type Error = ResourceError;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Creates a new Resource with an empty allocation map.
    ///
    /// # Errors
    /// `ValidationError` if the name is blank or `total` is zero.
    fn from_create_params(id: ResourceId, params: ResourceCreate) -> Result<Self, ResourceError> {
        let name = validate_name(&params.name)?;
        validate_total(params.total)?;
        Ok(Self::new(id, name, params.total, normalize_tag(params.skillset)))
    }

    fn is_mutation(action: &ResourceAction) -> bool {
        !matches!(action, ResourceAction::CheckAvailable)
    }

    /// Applies the provided fields.
    ///
    /// Lowering `total` below the allocated sum is accepted unless
    /// [`LedgerPolicy::enforce_capacity_on_update`] is set.
    async fn on_update(
        &mut self,
        update: ResourceUpdate,
        policy: &LedgerPolicy,
    ) -> Result<(), ResourceError> {
        if let Some(name) = update.name {
            self.name = validate_name(&name)?;
        }
        if let Some(total) = update.total {
            validate_total(total)?;
            let allocated = self.allocated_units();
            if policy.enforce_capacity_on_update && u64::from(total) < allocated {
                return Err(ResourceError::TotalBelowAllocated { total, allocated });
            }
            self.total = total;
        }
        if let Some(skillset) = update.skillset {
            self.skillset = normalize_tag(skillset);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ResourceAction,
        policy: &LedgerPolicy,
    ) -> Result<ResourceActionResult, ResourceError> {
        match action {
            ResourceAction::Allocate { consumer, amount } => {
                validate_amount(amount)?;
                let available = self.available_units();
                if i64::from(amount) > available {
                    return Err(ResourceError::CapacityExceeded {
                        requested: amount,
                        available,
                    });
                }
                // `amount <= available <= total`, so the sum cannot overflow u32.
                let held = self.allocated.entry(consumer).or_insert(0);
                *held += amount;
                debug!(resource = %self.id, %consumer, amount, held = *held, "Allocated");
                Ok(ResourceActionResult::Allocate(*held))
            }
            ResourceAction::Deallocate { consumer, amount } => {
                validate_amount(amount)?;
                let allocated = self.allocated_to(&consumer);
                if amount > allocated {
                    return Err(ResourceError::InsufficientAllocation {
                        requested: amount,
                        allocated,
                    });
                }
                let remaining = allocated - amount;
                self.set_allocation(consumer, remaining, policy);
                debug!(resource = %self.id, %consumer, amount, remaining, "Deallocated");
                Ok(ResourceActionResult::Deallocate(remaining))
            }
            ResourceAction::CheckAvailable => {
                Ok(ResourceActionResult::CheckAvailable(self.available_units()))
            }
            ResourceAction::ReleaseConsumer(consumer) => {
                let released = self.allocated.remove(&consumer).unwrap_or(0);
                Ok(ResourceActionResult::ReleaseConsumer(released))
            }
        }
    }
}

impl Resource {
    fn set_allocation(&mut self, consumer: ProjectId, units: u32, policy: &LedgerPolicy) {
        if units == 0 && policy.prune_empty_allocations {
            self.allocated.remove(&consumer);
        } else {
            self.allocated.insert(consumer, units);
        }
    }
}

fn validate_name(name: &str) -> Result<String, ResourceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ResourceError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn validate_total(total: u32) -> Result<(), ResourceError> {
    if total < 1 {
        return Err(ResourceError::ValidationError(
            "total must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_amount(amount: u32) -> Result<(), ResourceError> {
    if amount < 1 {
        return Err(ResourceError::ValidationError(
            "amount must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Blank tags are stored as no tag.
fn normalize_tag(tag: Option<String>) -> Option<String> {
    tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa_team() -> Resource {
        Resource::from_create_params(
            ResourceId::new(),
            ResourceCreate {
                name: "QA Team".to_string(),
                total: 5,
                skillset: None,
            },
        )
        .unwrap()
    }

    async fn allocate(r: &mut Resource, consumer: ProjectId, amount: u32) -> Result<ResourceActionResult, ResourceError> {
        r.handle_action(ResourceAction::Allocate { consumer, amount }, &LedgerPolicy::default())
            .await
    }

    #[test]
    fn test_create_validation() {
        let blank = Resource::from_create_params(
            ResourceId::new(),
            ResourceCreate { name: "  ".into(), total: 3, skillset: None },
        );
        assert!(matches!(blank, Err(ResourceError::ValidationError(_))));

        let empty_pool = Resource::from_create_params(
            ResourceId::new(),
            ResourceCreate { name: "Ops".into(), total: 0, skillset: None },
        );
        assert!(matches!(empty_pool, Err(ResourceError::ValidationError(_))));

        let created = Resource::from_create_params(
            ResourceId::new(),
            ResourceCreate { name: " Ops ".into(), total: 2, skillset: Some(" ".into()) },
        )
        .unwrap();
        assert_eq!(created.name, "Ops");
        assert_eq!(created.skillset, None);
        assert!(created.allocated.is_empty());
        assert_eq!(created.available_units(), 2);
    }

    #[tokio::test]
    async fn test_allocate_up_to_capacity() {
        let mut r = qa_team();
        let p1 = ProjectId::new();

        assert_eq!(allocate(&mut r, p1, 3).await.unwrap(), ResourceActionResult::Allocate(3));
        assert_eq!(r.available_units(), 2);
        assert_eq!(allocate(&mut r, p1, 2).await.unwrap(), ResourceActionResult::Allocate(5));
        assert_eq!(r.available_units(), 0);

        let err = allocate(&mut r, ProjectId::new(), 1).await.unwrap_err();
        assert_eq!(err, ResourceError::CapacityExceeded { requested: 1, available: 0 });
    }

    #[tokio::test]
    async fn test_zero_amounts_are_rejected() {
        let mut r = qa_team();
        let p1 = ProjectId::new();
        assert!(matches!(
            allocate(&mut r, p1, 0).await,
            Err(ResourceError::ValidationError(_))
        ));
        let dealloc = r
            .handle_action(
                ResourceAction::Deallocate { consumer: p1, amount: 0 },
                &LedgerPolicy::default(),
            )
            .await;
        assert!(matches!(dealloc, Err(ResourceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_deallocate_more_than_held() {
        let mut r = qa_team();
        let p1 = ProjectId::new();
        allocate(&mut r, p1, 2).await.unwrap();

        let err = r
            .handle_action(
                ResourceAction::Deallocate { consumer: p1, amount: 3 },
                &LedgerPolicy::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ResourceError::InsufficientAllocation { requested: 3, allocated: 2 });

        let stranger = r
            .handle_action(
                ResourceAction::Deallocate { consumer: ProjectId::new(), amount: 1 },
                &LedgerPolicy::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(stranger, ResourceError::InsufficientAllocation { requested: 1, allocated: 0 });
    }

    #[tokio::test]
    async fn test_deallocate_to_zero_respects_prune_policy() {
        let p1 = ProjectId::new();
        let dealloc = ResourceAction::Deallocate { consumer: p1, amount: 2 };

        let mut kept = qa_team();
        allocate(&mut kept, p1, 2).await.unwrap();
        kept.handle_action(dealloc.clone(), &LedgerPolicy::default()).await.unwrap();
        assert_eq!(kept.allocated.get(&p1), Some(&0));

        let mut pruned = qa_team();
        allocate(&mut pruned, p1, 2).await.unwrap();
        let policy = LedgerPolicy { prune_empty_allocations: true, ..LedgerPolicy::default() };
        pruned.handle_action(dealloc, &policy).await.unwrap();
        assert!(pruned.allocated.is_empty());
    }

    #[tokio::test]
    async fn test_update_total_below_allocated() {
        let p1 = ProjectId::new();
        let shrink = || ResourceUpdate { total: Some(2), ..ResourceUpdate::default() };

        let mut lenient = qa_team();
        allocate(&mut lenient, p1, 4).await.unwrap();
        lenient.on_update(shrink(), &LedgerPolicy::default()).await.unwrap();
        assert_eq!(lenient.total, 2);
        assert_eq!(lenient.available_units(), -2);

        let mut strict = qa_team();
        allocate(&mut strict, p1, 4).await.unwrap();
        let policy = LedgerPolicy { enforce_capacity_on_update: true, ..LedgerPolicy::default() };
        let err = strict.on_update(shrink(), &policy).await.unwrap_err();
        assert_eq!(err, ResourceError::TotalBelowAllocated { total: 2, allocated: 4 });
    }

    #[tokio::test]
    async fn test_update_fields() {
        let mut r = qa_team();
        let update = ResourceUpdate {
            name: Some("QA Guild".into()),
            total: None,
            skillset: Some(Some("Testing".into())),
        };
        r.on_update(update, &LedgerPolicy::default()).await.unwrap();
        assert_eq!(r.name, "QA Guild");
        assert_eq!(r.skillset.as_deref(), Some("Testing"));

        let clear = ResourceUpdate { skillset: Some(None), ..ResourceUpdate::default() };
        r.on_update(clear, &LedgerPolicy::default()).await.unwrap();
        assert_eq!(r.skillset, None);

        let bad = ResourceUpdate { total: Some(0), ..ResourceUpdate::default() };
        assert!(matches!(
            r.on_update(bad, &LedgerPolicy::default()).await,
            Err(ResourceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_release_consumer() {
        let mut r = qa_team();
        let p1 = ProjectId::new();
        let p2 = ProjectId::new();
        allocate(&mut r, p1, 2).await.unwrap();
        allocate(&mut r, p2, 1).await.unwrap();

        let released = r
            .handle_action(ResourceAction::ReleaseConsumer(p1), &LedgerPolicy::default())
            .await
            .unwrap();
        assert_eq!(released, ResourceActionResult::ReleaseConsumer(2));
        assert!(!r.allocated.contains_key(&p1));
        assert_eq!(r.available_units(), 4);

        let none = r
            .handle_action(ResourceAction::ReleaseConsumer(p1), &LedgerPolicy::default())
            .await
            .unwrap();
        assert_eq!(none, ResourceActionResult::ReleaseConsumer(0));
    }

    #[test]
    fn test_check_available_is_read_only() {
        assert!(!Resource::is_mutation(&ResourceAction::CheckAvailable));
        assert!(Resource::is_mutation(&ResourceAction::ReleaseConsumer(ProjectId::new())));
    }
}
