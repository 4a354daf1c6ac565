//! Competition tree model
//!
//! Pull-based, lazily expanded two-level tree (competitions → experiments)
//! over an injected data source, plus a refresh signal hosts subscribe to.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::debug;

use crate::domain::{format_score, NodeKind, TreeNode};
use crate::infrastructure::traits::DataSource;

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    // The listener map holds no invariant a panic could break
    listeners.lock().unwrap_or_else(|e| e.into_inner())
}

/// Handle for a refresh listener. Dropping or disposing it removes the listener.
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            // Drop the listener after releasing the lock, it may own other subscriptions
            let removed = lock(&listeners).entries.remove(&self.id);
            drop(removed);
        }
    }
}

/// Tree model over a [`DataSource`].
pub struct CompetitionTree {
    source: Arc<dyn DataSource>,
    listeners: Arc<Mutex<Listeners>>,
}

impl CompetitionTree {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// One expandable node per competition, in data-source order.
    pub fn roots(&self) -> Vec<TreeNode> {
        let roots: Vec<TreeNode> = self
            .source
            .list_competitions()
            .into_iter()
            .map(TreeNode::competition)
            .collect();
        debug!("roots: {} competitions", roots.len());
        roots
    }

    /// Children of a node.
    ///
    /// Competition nodes expand to their experiments (by label lookup);
    /// unknown competitions and experiment nodes have no children.
    pub fn children(&self, node: &TreeNode) -> Vec<TreeNode> {
        match node.kind() {
            NodeKind::Competition => {
                let children: Vec<TreeNode> = self
                    .source
                    .list_experiments(node.label())
                    .iter()
                    .map(TreeNode::experiment)
                    .collect();
                debug!("children: {} -> {} experiments", node.label(), children.len());
                children
            }
            NodeKind::Experiment => Vec::new(),
        }
    }

    /// Broadcast the refresh signal to all listeners.
    ///
    /// Listeners run outside the lock, so they may subscribe or dispose.
    /// A listener must not call `refresh()` itself.
    pub fn refresh(&self) {
        let snapshot: Vec<Listener> = lock(&self.listeners).entries.values().cloned().collect();
        debug!("refresh: notifying {} listeners", snapshot.len());
        for listener in snapshot {
            listener();
        }
    }

    /// Register a refresh listener.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut guard = lock(&self.listeners);
        let id = guard.next_id;
        guard.next_id += 1;
        guard.entries.insert(id, Arc::new(listener));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    /// Root node for a competition name, if the data source knows it.
    pub fn find_competition(&self, name: &str) -> Option<TreeNode> {
        self.roots().into_iter().find(|n| n.label() == name)
    }

    /// Leaf node for an experiment of a competition.
    pub fn find_experiment(&self, competition: &str, experiment: &str) -> Option<TreeNode> {
        let parent = self.find_competition(competition)?;
        self.children(&parent)
            .into_iter()
            .find(|n| n.label() == experiment)
    }

    /// Read-only detail rows for an experiment.
    pub fn detail_lines(&self, competition: &str, experiment: &str) -> Option<Vec<String>> {
        let node = self.find_experiment(competition, experiment)?;
        let score = node
            .score()
            .map(format_score)
            .unwrap_or_else(|| "n/a".to_string());
        Some(vec![
            format!("Competition: {competition}"),
            format!("Experiment: {}", node.label()),
            format!("Score: {score}"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::catalog::InMemoryDataSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_tree() -> CompetitionTree {
        CompetitionTree::new(Arc::new(InMemoryDataSource::sample()))
    }

    #[test]
    fn given_dropped_subscription_then_listener_removed() {
        let tree = sample_tree();
        let sub = tree.subscribe(|| {});
        assert_eq!(tree.listener_count(), 1);
        drop(sub);
        assert_eq!(tree.listener_count(), 0);
    }

    #[test]
    fn given_subscription_outliving_tree_when_dropped_then_no_panic() {
        let tree = sample_tree();
        let sub = tree.subscribe(|| {});
        drop(tree);
        sub.dispose();
    }

    #[test]
    fn given_listener_disposing_another_when_refreshing_then_no_deadlock() {
        let tree = Arc::new(sample_tree());
        let calls = Arc::new(AtomicUsize::new(0));
        let victim = Arc::new(Mutex::new(Some(tree.subscribe(|| {}))));

        let victim_clone = Arc::clone(&victim);
        let calls_clone = Arc::clone(&calls);
        let _sub = tree.subscribe(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            drop(victim_clone.lock().unwrap().take());
        });

        tree.refresh();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(tree.listener_count(), 1);
    }

    #[test]
    fn given_experiment_without_score_then_details_show_na() {
        let source = InMemoryDataSource::new(vec![crate::domain::Competition::new(
            "Spaceship",
            vec![crate::domain::Experiment::new("exp-001", None)],
        )]);
        let tree = CompetitionTree::new(Arc::new(source));
        let lines = tree.detail_lines("Spaceship", "exp-001").unwrap();
        assert_eq!(lines[2], "Score: n/a");
    }
}
