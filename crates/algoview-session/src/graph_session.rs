//! Host context for the graph visualizer.

use algoview_graph::{Error as GraphError, Graph};
use algoview_history::History;
use algoview_search::{Algorithm, Snapshot, Stepper, StepperStatus};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::store::StateStore;
use crate::tracked::Tracked;

/// A recorded run together with its cursor.
#[derive(Debug, Clone)]
pub struct Run {
    pub algorithm: Algorithm,
    pub stepper: Stepper,
}

/// Graph, undo history, persistence, the current run and pointer state.
///
/// Every successful structural edit checkpoints the graph, saves it to the
/// store and drops the current run.
#[derive(Debug)]
pub struct GraphSession<S: StateStore> {
    config: SessionConfig,
    store: S,
    graph: Tracked<Graph>,
    run: Option<Run>,
    hovered: Option<String>,
    selected: Option<String>,
    load_error: Option<GraphError>,
}

impl<S: StateStore> GraphSession<S> {
    /// Open a session, loading the graph saved under `config.graph_key`.
    ///
    /// A missing value starts empty. A malformed value also starts empty;
    /// the parse error is kept in [`load_error`](Self::load_error). When
    /// opening undirected, reverse pairs in the stored graph are merged
    /// rather than rejected.
    pub fn open(config: SessionConfig, store: S) -> Result<Self> {
        let (mut graph, load_error) = match store.load(&config.graph_key)? {
            Some(text) => Graph::from_json_or_empty(&text, true),
            None => (Graph::new(true), None),
        };
        let merged = graph.set_directed(config.directed);
        if merged > 0 {
            warn!("Merged {} reverse edge pairs from the stored graph", merged);
        }
        info!(
            "Graph session opened with {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        let graph = Tracked::new(graph, config.history_capacity, config.graph_key.clone())?;
        Ok(Self {
            config,
            store,
            graph,
            run: None,
            hovered: None,
            selected: None,
            load_error,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn graph(&self) -> &Graph {
        self.graph.value()
    }

    pub fn history(&self) -> &History<String> {
        self.graph.history()
    }

    /// Parse error from opening, if the stored graph was unreadable.
    pub fn load_error(&self) -> Option<&GraphError> {
        self.load_error.as_ref()
    }

    // --- Editing ---

    /// Add a node. Returns false if the name is taken.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<bool> {
        self.commit(|g| g.add_node(name))
    }

    /// Remove a node and its edges. Returns false if it does not exist.
    pub fn remove_node(&mut self, name: &str) -> Result<bool> {
        self.commit(|g| g.remove_node(name))
    }

    /// Add an edge. Returns false if an endpoint is missing, the weight is
    /// not finite or the edge exists.
    pub fn add_edge(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        weight: Option<f64>,
    ) -> Result<bool> {
        self.commit(|g| g.add_edge(a, b, weight))
    }

    /// Remove an edge. Returns false if no such edge exists.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<bool> {
        self.commit(|g| g.remove_edge(a, b))
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) -> Result<()> {
        if self.graph.value().is_empty() {
            return Ok(());
        }
        self.commit(|g| {
            g.clear();
            true
        })
        .map(|_| ())
    }

    /// Toggle directedness as an undoable edit. Going undirected merges
    /// reverse pairs into one edge. Returns false if nothing changed.
    pub fn set_directed(&mut self, directed: bool) -> Result<bool> {
        if self.graph.value().is_directed() == directed {
            return Ok(false);
        }
        self.commit(|g| {
            g.set_directed(directed);
            true
        })
    }

    /// Apply `edit` and, if it reports a change, checkpoint and save the
    /// result and drop the current run.
    fn commit(&mut self, edit: impl FnOnce(&mut Graph) -> bool) -> Result<bool> {
        let changed = self.graph.edit(&mut self.store, edit, |changed| *changed)?;
        if changed {
            self.stop();
        }
        Ok(changed)
    }

    // --- Undo / redo ---

    /// Step back one checkpoint. Returns false at the oldest entry.
    pub fn undo(&mut self) -> Result<bool> {
        let moved = self.graph.undo(&mut self.store)?;
        if moved {
            self.after_restore();
        }
        Ok(moved)
    }

    /// Step forward one checkpoint. Returns false at the newest entry.
    pub fn redo(&mut self) -> Result<bool> {
        let moved = self.graph.redo(&mut self.store)?;
        if moved {
            self.after_restore();
        }
        Ok(moved)
    }

    fn after_restore(&mut self) {
        self.stop();
        let graph = self.graph.value();
        if self.hovered.as_deref().is_some_and(|n| !graph.has_node(n)) {
            self.hovered = None;
        }
        if self.selected.as_deref().is_some_and(|n| !graph.has_node(n)) {
            self.selected = None;
        }
    }

    // --- Runs ---

    /// Record `algorithm` from `start` and place the cursor on its first
    /// snapshot.
    pub fn run(&mut self, algorithm: Algorithm, start: &str) -> Result<&Run> {
        let trace = algorithm.run(self.graph.value(), start)?;
        let run = self.run.insert(Run {
            algorithm,
            stepper: Stepper::new(trace),
        });
        Ok(&*run)
    }

    /// The current run, if one is active.
    pub fn current_run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    /// Snapshot under the cursor.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.run.as_ref().and_then(|r| r.stepper.current())
    }

    /// Move the cursor by `delta`, clamped.
    pub fn step(&mut self, delta: isize) -> Option<&Snapshot> {
        self.run.as_mut().and_then(|r| r.stepper.step(delta))
    }

    /// Move the cursor to `index`, clamped.
    pub fn seek(&mut self, index: usize) -> Option<&Snapshot> {
        self.run.as_mut().and_then(|r| r.stepper.seek(index))
    }

    pub fn status(&self) -> Option<StepperStatus> {
        self.run.as_ref().map(|r| StepperStatus::from(&r.stepper))
    }

    /// Discard the current run.
    pub fn stop(&mut self) {
        if self.run.take().is_some() {
            info!("Discarded trace");
        }
    }

    // --- Pointer state ---

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Set the node under the pointer. Unknown names clear it.
    pub fn hover(&mut self, name: Option<&str>) {
        self.hovered = name
            .filter(|n| self.graph.value().has_node(n))
            .map(str::to_string);
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a node. Unknown names clear the selection.
    pub fn select(&mut self, name: Option<&str>) {
        if let Some(n) = name.filter(|n| !self.graph.value().has_node(n)) {
            warn!("Cannot select unknown node {}", n);
        }
        self.selected = name
            .filter(|n| self.graph.value().has_node(n))
            .map(str::to_string);
    }

    /// Run `algorithm` from the selected node.
    pub fn run_from_selected(&mut self, algorithm: Algorithm) -> Result<Option<&Run>> {
        let Some(start) = self.selected.clone() else {
            return Ok(None);
        };
        self.run(algorithm, &start).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> GraphSession<MemoryStore> {
        GraphSession::open(SessionConfig::default(), MemoryStore::new()).unwrap()
    }

    fn abc(session: &mut GraphSession<MemoryStore>) {
        for n in ["A", "B", "C"] {
            session.add_node(n).unwrap();
        }
        session.add_edge("A", "B", None).unwrap();
        session.add_edge("B", "C", None).unwrap();
    }

    #[test]
    fn opens_empty_with_one_checkpoint() {
        let session = session();
        assert!(session.graph().is_empty());
        assert!(session.graph().is_directed());
        assert_eq!(session.history().len(), 1);
        assert!(session.load_error().is_none());
    }

    #[test]
    fn edits_checkpoint_and_save() {
        let mut session = session();
        assert!(session.add_node("A").unwrap());
        assert!(!session.add_node("A").unwrap());
        assert_eq!(session.history().len(), 2);

        let saved = session.store().load("graph").unwrap().unwrap();
        assert_eq!(saved, r#"{"nodes":["A"],"edges":[]}"#);
    }

    #[test]
    fn undo_redo_restore_structure() {
        let mut session = session();
        abc(&mut session);
        assert_eq!(session.graph().edge_count(), 2);

        assert!(session.undo().unwrap());
        assert_eq!(session.graph().edge_count(), 1);
        assert!(session.redo().unwrap());
        assert_eq!(session.graph().edge_count(), 2);
        assert!(!session.redo().unwrap());

        while session.undo().unwrap() {}
        assert!(session.graph().is_empty());
        let saved = session.store().load("graph").unwrap().unwrap();
        assert_eq!(saved, r#"{"nodes":[],"edges":[]}"#);
    }

    #[test]
    fn edit_discards_run() {
        let mut session = session();
        abc(&mut session);
        session.run(Algorithm::Dfs, "A").unwrap();
        assert!(session.snapshot().unwrap().is_idle());
        // idle, visit A, push B, visit B
        session.step(3);
        assert_eq!(session.snapshot().unwrap().active.as_deref(), Some("B"));

        session.add_node("D").unwrap();
        assert!(session.current_run().is_none());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn rejected_edit_keeps_run() {
        let mut session = session();
        abc(&mut session);
        session.run(Algorithm::Bfs, "A").unwrap();
        assert!(!session.add_edge("A", "Z", None).unwrap());
        assert!(session.current_run().is_some());
    }

    #[test]
    fn run_rejects_unknown_start() {
        let mut session = session();
        abc(&mut session);
        assert!(session.run(Algorithm::Dijkstra, "Z").is_err());
        assert!(session.current_run().is_none());
    }

    #[test]
    fn loads_saved_graph() {
        let mut store = MemoryStore::new();
        store
            .save("graph", r#"{"nodes":["A","B"],"edges":[["A","B",2.5]]}"#)
            .unwrap();
        let session = GraphSession::open(SessionConfig::default(), store).unwrap();
        assert_eq!(session.graph().weight("A", "B"), Some(2.5));
    }

    #[test]
    fn malformed_saved_graph_starts_empty() {
        let mut store = MemoryStore::new();
        store.save("graph", r#"{"nodes":["A"],"edges":[["A","Q",null]]}"#).unwrap();
        let session = GraphSession::open(SessionConfig::default(), store).unwrap();
        assert!(session.graph().is_empty());
        assert!(session.load_error().is_some());
    }

    #[test]
    fn selection_follows_restores() {
        let mut session = session();
        abc(&mut session);
        session.select(Some("C"));
        session.hover(Some("C"));
        assert_eq!(session.selected(), Some("C"));

        session.select(Some("Z"));
        assert_eq!(session.selected(), None);

        session.select(Some("C"));
        // Undo both edges and the node C.
        session.undo().unwrap();
        session.undo().unwrap();
        session.undo().unwrap();
        assert_eq!(session.selected(), None);
        assert_eq!(session.hovered(), None);
    }

    #[test]
    fn run_from_selected_node() {
        let mut session = session();
        abc(&mut session);
        assert!(session.run_from_selected(Algorithm::Bfs).unwrap().is_none());

        session.select(Some("B"));
        let run = session.run_from_selected(Algorithm::Bfs).unwrap().unwrap();
        assert_eq!(run.stepper.trace().start(), "B");
        assert_eq!(run.stepper.trace().visit_order(), ["B", "C"]);
    }

    #[test]
    fn toggling_direction_discards_run() {
        let mut session = session();
        abc(&mut session);
        session.run(Algorithm::Dfs, "C").unwrap();
        assert!(session.set_directed(false).unwrap());
        assert!(!session.set_directed(false).unwrap());
        assert!(session.current_run().is_none());

        let run = session.run(Algorithm::Dfs, "C").unwrap();
        assert_eq!(run.stepper.trace().visit_order(), ["C", "B", "A"]);
    }

    #[test]
    fn going_undirected_merges_and_undoes() {
        let mut session = session();
        session.add_node("A").unwrap();
        session.add_node("B").unwrap();
        session.add_edge("A", "B", Some(1.0)).unwrap();
        session.add_edge("B", "A", Some(9.0)).unwrap();

        assert!(session.set_directed(false).unwrap());
        assert_eq!(session.graph().edge_count(), 1);
        assert_eq!(session.graph().neighbors("A"), ["B"]);
        assert_eq!(session.graph().weight("B", "A"), Some(1.0));
        let saved = session.store().load("graph").unwrap().unwrap();
        assert_eq!(saved, r#"{"nodes":["A","B"],"edges":[["A","B",1.0]]}"#);

        session.add_node("C").unwrap();
        assert_eq!(session.history().index(), 6);
        assert!(session.undo().unwrap());
        assert!(session.undo().unwrap());
        assert_eq!(session.history().index(), 4);
        assert!(session.graph().is_directed());
        assert_eq!(session.graph().edge_count(), 2);
        assert_eq!(session.graph().weight("B", "A"), Some(9.0));

        assert!(session.redo().unwrap());
        assert!(!session.graph().is_directed());
        assert_eq!(session.graph().edge_count(), 1);
        assert!(session.redo().unwrap());
        assert_eq!(session.history().index(), 6);
        assert!(session.graph().has_node("C"));
    }

    #[test]
    fn undirected_open_merges_stored_reverse_pairs() {
        let mut store = MemoryStore::new();
        store
            .save("graph", r#"{"nodes":["A","B"],"edges":[["A","B",2.0],["B","A",3.0]]}"#)
            .unwrap();
        let config = SessionConfig {
            directed: false,
            ..SessionConfig::default()
        };
        let mut session = GraphSession::open(config, store).unwrap();
        assert!(session.load_error().is_none());
        assert!(!session.graph().is_directed());
        assert_eq!(session.graph().edge_count(), 1);
        assert_eq!(session.graph().weight("B", "A"), Some(2.0));

        session.add_node("C").unwrap();
        let saved = session.store().load("graph").unwrap().unwrap();
        assert_eq!(saved, r#"{"nodes":["A","B","C"],"edges":[["A","B",2.0]]}"#);
    }

    #[test]
    fn seek_and_status() {
        let mut session = session();
        abc(&mut session);
        assert!(session.status().is_none());
        session.run(Algorithm::Dfs, "A").unwrap();
        session.seek(usize::MAX);
        let status = session.status().unwrap();
        assert!(status.at_end);
        assert!(session.snapshot().unwrap().is_idle());
    }
}
