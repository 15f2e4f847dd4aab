//! The "improve" action: send one text field to the rewrite collaborator and
//! write the result back into exactly that field.
//!
//! The controller lock is never held across the rewrite call, so other edits
//! proceed while it is pending. When the result arrives it is applied to the
//! section's *current* data, replacing only the targeted field. There is no
//! cancellation: if the section was removed meanwhile the apply is a no-op.

use std::collections::HashSet;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::document::{SharedController, UpdateOutcome};
use crate::editor::edits::EditError;
use crate::models::{SectionData, SectionId};
use crate::rewrite::ContentRewriter;

/// The text field an improve request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum ImproveTarget {
    /// The whole SUMMARY value.
    Summary,
    /// `description` of the EXPERIENCE or PROJECTS entry at `index`.
    Description { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImproveOutcome {
    /// The rewritten text replaced the field.
    Applied,
    /// The collaborator returned the text unchanged (including on failure).
    Unchanged,
    /// The field was empty; nothing was sent.
    Skipped,
    /// The section or list entry disappeared while the request was pending.
    Discarded,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImproveError {
    #[error("an improve request for this field is already in progress")]
    InFlight,

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Fields with a rewrite currently in flight ("optimizing" state).
#[derive(Debug, Default)]
pub struct ImproveTracker {
    in_flight: Mutex<HashSet<(SectionId, ImproveTarget)>>,
}

/// Returns its field to idle when dropped.
pub struct InFlightGuard<'a> {
    tracker: &'a ImproveTracker,
    key: (SectionId, ImproveTarget),
}

impl ImproveTracker {
    /// Marks the field as optimizing. `None` when it already is.
    pub fn begin(&self, id: &SectionId, target: ImproveTarget) -> Option<InFlightGuard<'_>> {
        let key = (id.clone(), target);
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard { tracker: self, key })
    }

    pub fn is_optimizing(&self, id: &SectionId, target: ImproveTarget) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&(id.clone(), target))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.tracker
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

/// Text read out of a field, plus the local id of the list entry it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetText {
    pub text: String,
    pub item_id: Option<String>,
}

/// Reads the targeted text out of `data`.
pub fn read_target(data: &SectionData, target: ImproveTarget) -> Result<TargetText, EditError> {
    let not_applicable = || EditError::NotApplicable {
        op: "improve",
        section_type: data.kind(),
    };
    let out_of_range = |index: usize, len: usize| EditError::IndexOutOfRange { index, len };
    match (data, target) {
        (SectionData::Summary(text), ImproveTarget::Summary) => Ok(TargetText {
            text: text.clone(),
            item_id: None,
        }),
        (SectionData::Experience(items), ImproveTarget::Description { index }) => items
            .get(index)
            .map(|item| TargetText {
                text: item.description.clone(),
                item_id: Some(item.id.clone()),
            })
            .ok_or_else(|| out_of_range(index, items.len())),
        (SectionData::Projects(items), ImproveTarget::Description { index }) => items
            .get(index)
            .map(|item| TargetText {
                text: item.description.clone(),
                item_id: Some(item.id.clone()),
            })
            .ok_or_else(|| out_of_range(index, items.len())),
        _ => Err(not_applicable()),
    }
}

/// Position of the entry a result belongs to. Entries with a local id are
/// found by that id, so removing an earlier entry does not shift the target.
fn locate<T>(
    items: &[T],
    index: usize,
    item_id: Option<&str>,
    id_of: impl Fn(&T) -> &str,
) -> Option<usize> {
    match item_id {
        Some(wanted) if !wanted.is_empty() => items.iter().position(|item| id_of(item) == wanted),
        _ => (index < items.len()).then_some(index),
    }
}

/// `data` with only the targeted field replaced by `text`. `None` when the
/// target no longer exists in `data`.
pub fn write_target(
    data: &SectionData,
    target: ImproveTarget,
    item_id: Option<&str>,
    text: String,
) -> Option<SectionData> {
    match (data, target) {
        (SectionData::Summary(_), ImproveTarget::Summary) => Some(SectionData::Summary(text)),
        (SectionData::Experience(items), ImproveTarget::Description { index }) => {
            let at = locate(items, index, item_id, |item| item.id.as_str())?;
            let mut items = items.clone();
            items[at].description = text;
            Some(SectionData::Experience(items))
        }
        (SectionData::Projects(items), ImproveTarget::Description { index }) => {
            let at = locate(items, index, item_id, |item| item.id.as_str())?;
            let mut items = items.clone();
            items[at].description = text;
            Some(SectionData::Projects(items))
        }
        _ => None,
    }
}

/// Every field of `data` the improve action can target.
pub fn improvable_targets(data: &SectionData) -> Vec<ImproveTarget> {
    match data {
        SectionData::Summary(_) => vec![ImproveTarget::Summary],
        SectionData::Experience(items) => (0..items.len())
            .map(|index| ImproveTarget::Description { index })
            .collect(),
        SectionData::Projects(items) => (0..items.len())
            .map(|index| ImproveTarget::Description { index })
            .collect(),
        SectionData::Header(_) | SectionData::Education(_) | SectionData::Skills(_) => vec![],
    }
}

/// Runs the improve action for one field of one section.
///
/// An absent section resolves to `Discarded` rather than an error. Callers
/// that must survive their own cancellation run this on a spawned task.
pub async fn improve_field(
    controller: &SharedController,
    rewriter: &dyn ContentRewriter,
    tracker: &ImproveTracker,
    id: &SectionId,
    target: ImproveTarget,
) -> Result<ImproveOutcome, ImproveError> {
    let (TargetText { text, item_id }, context_label) = {
        let ctl = controller.read().await;
        let document = ctl.document();
        let Some(section) = document.section(id) else {
            return Ok(ImproveOutcome::Discarded);
        };
        (read_target(section.data(), target)?, section.kind().context_label())
    };

    if text.trim().is_empty() {
        return Ok(ImproveOutcome::Skipped);
    }

    let _guard = tracker.begin(id, target).ok_or(ImproveError::InFlight)?;
    debug!("Improving {target:?} of section {id}");

    let improved = rewriter.optimize(&text, context_label).await;
    if improved == text {
        return Ok(ImproveOutcome::Unchanged);
    }

    let mut ctl = controller.write().await;
    let current = ctl.document();
    let Some(next) = current.section(id).and_then(|section| {
        write_target(section.data(), target, item_id.as_deref(), improved)
    }) else {
        info!("Section {id} changed shape while improving {target:?}; result discarded");
        return Ok(ImproveOutcome::Discarded);
    };

    Ok(match ctl.update_section(id, next) {
        UpdateOutcome::Applied => ImproveOutcome::Applied,
        UpdateOutcome::Missing | UpdateOutcome::TypeMismatch => ImproveOutcome::Discarded,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::{Notify, RwLock};

    use super::*;
    use crate::document::DocumentController;
    use crate::models::{ExperienceItem, ProjectItem, SectionType};
    use crate::rewrite::tests::{FailingBackend, FixedBackend};
    use crate::rewrite::LlmRewriter;

    fn shared(ctl: DocumentController) -> SharedController {
        Arc::new(RwLock::new(ctl))
    }

    fn summary_text(ctl: &DocumentController) -> String {
        match ctl.document().section(&SectionId::from("summary-1")).unwrap().data() {
            SectionData::Summary(text) => text.clone(),
            other => panic!("unexpected data {other:?}"),
        }
    }

    /// Rewriter that waits for a signal before answering.
    pub(crate) struct GatedRewriter {
        pub gate: Arc<Notify>,
        pub reply: String,
    }

    #[async_trait]
    impl ContentRewriter for GatedRewriter {
        async fn optimize(&self, _content: &str, _context_label: &str) -> String {
            self.gate.notified().await;
            self.reply.clone()
        }

        async fn generate_summary(&self, _experiences: &str) -> String {
            String::new()
        }
    }

    #[tokio::test]
    async fn test_failed_rewrite_leaves_summary_unchanged() {
        let controller = shared(DocumentController::default());
        let before = summary_text(&*controller.read().await);
        let rewriter = LlmRewriter::new(Arc::new(FailingBackend));
        let tracker = ImproveTracker::default();
        let id = SectionId::from("summary-1");

        let outcome = improve_field(&controller, &rewriter, &tracker, &id, ImproveTarget::Summary)
            .await
            .unwrap();

        assert_eq!(outcome, ImproveOutcome::Unchanged);
        assert_eq!(summary_text(&*controller.read().await), before);
        assert!(!tracker.is_optimizing(&id, ImproveTarget::Summary));
    }

    #[tokio::test]
    async fn test_successful_rewrite_replaces_summary() {
        let controller = shared(DocumentController::default());
        let rewriter = LlmRewriter::new(Arc::new(FixedBackend::new("Improved summary.")));
        let tracker = ImproveTracker::default();

        let outcome = improve_field(
            &controller,
            &rewriter,
            &tracker,
            &SectionId::from("summary-1"),
            ImproveTarget::Summary,
        )
        .await
        .unwrap();

        assert_eq!(outcome, ImproveOutcome::Applied);
        assert_eq!(summary_text(&*controller.read().await), "Improved summary.");
    }

    #[tokio::test]
    async fn test_rewrite_targets_one_description_by_index() {
        let mut ctl = DocumentController::default();
        let id = ctl.add_section(SectionType::Projects);
        let items = vec![
            ProjectItem {
                id: "p0".to_string(),
                name: "A".to_string(),
                description: "first".to_string(),
                ..Default::default()
            },
            ProjectItem {
                id: "p1".to_string(),
                name: "B".to_string(),
                description: "second".to_string(),
                ..Default::default()
            },
        ];
        ctl.update_section(&id, SectionData::Projects(items));
        let controller = shared(ctl);
        let backend = Arc::new(FixedBackend::new("Shipped second"));
        let rewriter = LlmRewriter::new(backend.clone());

        let outcome = improve_field(
            &controller,
            &rewriter,
            &ImproveTracker::default(),
            &id,
            ImproveTarget::Description { index: 1 },
        )
        .await
        .unwrap();

        assert_eq!(outcome, ImproveOutcome::Applied);
        assert!(backend.prompts.lock().unwrap()[0].0.contains("projects content"));
        let ctl = controller.read().await;
        match ctl.document().section(&id).unwrap().data() {
            SectionData::Projects(items) => {
                assert_eq!(items[0].description, "first");
                assert_eq!(items[1].description, "Shipped second");
                assert_eq!(items[1].name, "B");
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_text_is_not_sent() {
        let mut ctl = DocumentController::default();
        let id = ctl.add_section(SectionType::Summary);
        let controller = shared(ctl);
        let backend = Arc::new(FixedBackend::new("should not be used"));
        let rewriter = LlmRewriter::new(backend.clone());

        let outcome = improve_field(
            &controller,
            &rewriter,
            &ImproveTracker::default(),
            &id,
            ImproveTarget::Summary,
        )
        .await
        .unwrap();

        assert_eq!(outcome, ImproveOutcome::Skipped);
        assert!(backend.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_target_for_type_is_an_edit_error() {
        let controller = shared(DocumentController::default());
        let result = improve_field(
            &controller,
            &LlmRewriter::new(Arc::new(FailingBackend)),
            &ImproveTracker::default(),
            &SectionId::from("header-1"),
            ImproveTarget::Summary,
        )
        .await;
        assert!(matches!(result, Err(ImproveError::Edit(EditError::NotApplicable { .. }))));
    }

    #[tokio::test]
    async fn test_second_request_for_same_field_is_rejected_while_pending() {
        let controller = shared(DocumentController::default());
        let gate = Arc::new(Notify::new());
        let rewriter = Arc::new(GatedRewriter {
            gate: gate.clone(),
            reply: "Late result".to_string(),
        });
        let tracker = Arc::new(ImproveTracker::default());
        let id = SectionId::from("summary-1");

        let pending = {
            let (controller, rewriter, tracker, id) =
                (controller.clone(), rewriter.clone(), tracker.clone(), id.clone());
            tokio::spawn(async move {
                improve_field(&controller, rewriter.as_ref(), &tracker, &id, ImproveTarget::Summary)
                    .await
            })
        };

        while !tracker.is_optimizing(&id, ImproveTarget::Summary) {
            tokio::task::yield_now().await;
        }

        let second =
            improve_field(&controller, rewriter.as_ref(), &tracker, &id, ImproveTarget::Summary)
                .await;
        assert_eq!(second, Err(ImproveError::InFlight));

        // Other sections stay editable while the rewrite is pending.
        controller
            .write()
            .await
            .rename_section(&SectionId::from("header-1"), "Contact");

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(ImproveOutcome::Applied));
        assert_eq!(summary_text(&*controller.read().await), "Late result");
        assert!(!tracker.is_optimizing(&id, ImproveTarget::Summary));
    }

    #[tokio::test]
    async fn test_result_for_removed_section_is_discarded() {
        let mut ctl = DocumentController::default();
        let id = ctl.add_section(SectionType::Experience);
        ctl.update_section(
            &id,
            SectionData::Experience(vec![ExperienceItem {
                id: "e0".to_string(),
                description: "Built stuff".to_string(),
                ..Default::default()
            }]),
        );
        let controller = shared(ctl);
        let gate = Arc::new(Notify::new());
        let rewriter = Arc::new(GatedRewriter {
            gate: gate.clone(),
            reply: "Built scalable stuff".to_string(),
        });
        let tracker = Arc::new(ImproveTracker::default());
        let target = ImproveTarget::Description { index: 0 };

        let pending = {
            let (controller, rewriter, tracker, id) =
                (controller.clone(), rewriter.clone(), tracker.clone(), id.clone());
            tokio::spawn(async move {
                improve_field(&controller, rewriter.as_ref(), &tracker, &id, target).await
            })
        };
        while !tracker.is_optimizing(&id, target) {
            tokio::task::yield_now().await;
        }

        controller.write().await.remove_section(&id);
        let after_remove = controller.read().await.document();

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(ImproveOutcome::Discarded));
        assert!(Arc::ptr_eq(&after_remove, &controller.read().await.document()));
    }

    #[tokio::test]
    async fn test_late_result_overwrites_only_its_field() {
        let mut ctl = DocumentController::default();
        let id = ctl.add_section(SectionType::Experience);
        ctl.update_section(
            &id,
            SectionData::Experience(vec![ExperienceItem {
                id: "e0".to_string(),
                company: "Acme".to_string(),
                description: "Built stuff".to_string(),
                ..Default::default()
            }]),
        );
        let controller = shared(ctl);
        let gate = Arc::new(Notify::new());
        let rewriter = Arc::new(GatedRewriter {
            gate: gate.clone(),
            reply: "Delivered stuff".to_string(),
        });
        let tracker = Arc::new(ImproveTracker::default());
        let target = ImproveTarget::Description { index: 0 };

        let pending = {
            let (controller, rewriter, tracker, id) =
                (controller.clone(), rewriter.clone(), tracker.clone(), id.clone());
            tokio::spawn(async move {
                improve_field(&controller, rewriter.as_ref(), &tracker, &id, target).await
            })
        };
        while !tracker.is_optimizing(&id, target) {
            tokio::task::yield_now().await;
        }

        // User edits the company while the rewrite is pending.
        {
            let mut ctl = controller.write().await;
            let data = ctl.document().section(&id).unwrap().data().clone();
            let SectionData::Experience(mut items) = data else {
                panic!("experience expected");
            };
            items[0].company = "Acme Corp".to_string();
            ctl.update_section(&id, SectionData::Experience(items));
        }

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(ImproveOutcome::Applied));
        let ctl = controller.read().await;
        match ctl.document().section(&id).unwrap().data() {
            SectionData::Experience(items) => {
                assert_eq!(items[0].company, "Acme Corp");
                assert_eq!(items[0].description, "Delivered stuff");
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_guard_releases_field_on_drop() {
        let tracker = ImproveTracker::default();
        let id = SectionId::from("summary-1");
        let guard = tracker.begin(&id, ImproveTarget::Summary).unwrap();
        assert!(tracker.begin(&id, ImproveTarget::Summary).is_none());
        assert!(tracker
            .begin(&id, ImproveTarget::Description { index: 0 })
            .is_some());
        drop(guard);
        assert!(tracker.begin(&id, ImproveTarget::Summary).is_some());
    }

    fn two_experiences() -> SectionData {
        SectionData::Experience(vec![
            ExperienceItem {
                id: "e0".to_string(),
                company: "Acme".to_string(),
                description: "Built billing".to_string(),
                ..Default::default()
            },
            ExperienceItem {
                id: "e1".to_string(),
                company: "Initech".to_string(),
                description: "Fixed printers".to_string(),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_write_target_follows_item_id_after_shift() {
        let shifted = match two_experiences() {
            SectionData::Experience(items) => SectionData::Experience(items[1..].to_vec()),
            other => panic!("unexpected data {other:?}"),
        };
        let next = write_target(
            &shifted,
            ImproveTarget::Description { index: 1 },
            Some("e1"),
            "Ran the help desk".to_string(),
        )
        .unwrap();
        match next {
            SectionData::Experience(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "e1");
                assert_eq!(items[0].description, "Ran the help desk");
            }
            other => panic!("unexpected data {other:?}"),
        }

        let gone = write_target(
            &shifted,
            ImproveTarget::Description { index: 0 },
            Some("e0"),
            "x".to_string(),
        );
        assert_eq!(gone, None);
    }

    #[test]
    fn test_entries_without_id_are_written_by_index() {
        let data = SectionData::Projects(vec![ProjectItem::default(), ProjectItem::default()]);
        let target = ImproveTarget::Description { index: 1 };
        let read = read_target(&data, target).unwrap();
        assert_eq!(read.item_id.as_deref(), Some(""));
        match write_target(&data, target, read.item_id.as_deref(), "Shipped".to_string()) {
            Some(SectionData::Projects(items)) => {
                assert_eq!(items[0].description, "");
                assert_eq!(items[1].description, "Shipped");
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_improvable_targets_per_type() {
        assert_eq!(
            improvable_targets(&SectionData::Summary(String::new())),
            vec![ImproveTarget::Summary]
        );
        assert_eq!(
            improvable_targets(&two_experiences()),
            vec![
                ImproveTarget::Description { index: 0 },
                ImproveTarget::Description { index: 1 }
            ]
        );
        assert!(improvable_targets(&SectionData::Skills(vec!["Rust".to_string()])).is_empty());
    }

    #[tokio::test]
    async fn test_late_result_lands_on_its_entry_after_earlier_entry_removed() {
        let mut ctl = DocumentController::default();
        let id = ctl.add_section(SectionType::Experience);
        ctl.update_section(&id, two_experiences());
        let controller = shared(ctl);
        let gate = Arc::new(Notify::new());
        let rewriter = Arc::new(GatedRewriter {
            gate: gate.clone(),
            reply: "Ran the help desk".to_string(),
        });
        let tracker = Arc::new(ImproveTracker::default());
        let target = ImproveTarget::Description { index: 1 };

        let pending = {
            let (controller, rewriter, tracker, id) =
                (controller.clone(), rewriter.clone(), tracker.clone(), id.clone());
            tokio::spawn(async move {
                improve_field(&controller, rewriter.as_ref(), &tracker, &id, target).await
            })
        };
        while !tracker.is_optimizing(&id, target) {
            tokio::task::yield_now().await;
        }

        // The first entry is removed while the rewrite is pending.
        {
            let mut ctl = controller.write().await;
            let data = ctl.document().section(&id).unwrap().data().clone();
            let next = crate::editor::edits::apply_edit(
                &data,
                crate::editor::edits::SectionEdit::RemoveItem { index: 0 },
            )
            .unwrap();
            ctl.update_section(&id, next);
        }

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(ImproveOutcome::Applied));
        let ctl = controller.read().await;
        match ctl.document().section(&id).unwrap().data() {
            SectionData::Experience(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].company, "Initech");
                assert_eq!(items[0].description, "Ran the help desk");
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_late_result_for_removed_entry_is_discarded() {
        let mut ctl = DocumentController::default();
        let id = ctl.add_section(SectionType::Experience);
        ctl.update_section(&id, two_experiences());
        let controller = shared(ctl);
        let gate = Arc::new(Notify::new());
        let rewriter = Arc::new(GatedRewriter {
            gate: gate.clone(),
            reply: "Delivered billing".to_string(),
        });
        let tracker = Arc::new(ImproveTracker::default());
        let target = ImproveTarget::Description { index: 0 };

        let pending = {
            let (controller, rewriter, tracker, id) =
                (controller.clone(), rewriter.clone(), tracker.clone(), id.clone());
            tokio::spawn(async move {
                improve_field(&controller, rewriter.as_ref(), &tracker, &id, target).await
            })
        };
        while !tracker.is_optimizing(&id, target) {
            tokio::task::yield_now().await;
        }

        let remaining = match two_experiences() {
            SectionData::Experience(items) => SectionData::Experience(items[1..].to_vec()),
            other => panic!("unexpected data {other:?}"),
        };
        controller.write().await.update_section(&id, remaining.clone());

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(ImproveOutcome::Discarded));
        let ctl = controller.read().await;
        assert_eq!(ctl.document().section(&id).unwrap().data(), &remaining);
    }
}
