//! Task graph construction and execution.
//!
//! The pipeline is modeled as an explicit graph object: named async tasks
//! are nodes, dependencies are edges, and the executor derives scheduling
//! from the graph instead of a process-wide task registry. A task starts
//! only after every one of its dependencies completed successfully; tasks
//! whose dependencies are all satisfied run concurrently. The first failure
//! aborts every unstarted task while already-running tasks drain.

use crate::error::{Error, Result};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tokio::task::JoinSet;

type TaskFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// An explicit dependency graph of named async tasks.
///
/// Parallel groups fall out of the graph shape: independent tasks form a
/// wave and run together; an edge is a sequential barrier between its
/// endpoints. Members of a wave must not depend on each other's side
/// effects; they are expected to operate on disjoint filesystem subtrees.
#[derive(Default)]
pub struct TaskGraph {
    graph: DiGraph<String, ()>,
    futures: HashMap<NodeIndex, TaskFuture>,
    names: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named task.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateTask`] when the name is already registered.
    pub fn add<F>(&mut self, name: &str, future: F) -> Result<()>
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        if self.names.contains_key(name) {
            return Err(Error::DuplicateTask(name.to_string()));
        }
        let index = self.graph.add_node(name.to_string());
        self.futures.insert(index, Box::pin(future));
        self.names.insert(name.to_string(), index);
        Ok(())
    }

    /// Declares that `task` must not start before `dependency` completed.
    pub fn depend(&mut self, task: &str, dependency: &str) -> Result<()> {
        let task = self.index_of(task)?;
        let dependency = self.index_of(dependency)?;
        self.graph.add_edge(dependency, task, ());
        Ok(())
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Executes the graph to completion.
    ///
    /// All-or-nothing: returns the first task error and never starts a task
    /// whose dependencies did not all succeed. Tasks already running when a
    /// failure occurs are awaited (they operate on disjoint subtrees, so
    /// letting them finish cannot corrupt anything the failed run reports).
    ///
    /// # Errors
    ///
    /// [`Error::TaskCycle`] when the graph is not a DAG, otherwise the first
    /// failing task's error.
    pub async fn run(mut self) -> Result<()> {
        toposort(&self.graph, None).map_err(|_| Error::TaskCycle)?;

        let mut pending: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|index| {
                (
                    index,
                    self.graph
                        .neighbors_directed(index, Direction::Incoming)
                        .count(),
                )
            })
            .collect();

        let mut ready: Vec<NodeIndex> = pending
            .iter()
            .filter(|(_, deps)| **deps == 0)
            .map(|(index, _)| *index)
            .collect();

        let mut running: JoinSet<(NodeIndex, Result<()>)> = JoinSet::new();
        let mut first_error: Option<Error> = None;

        loop {
            if first_error.is_none() {
                for index in ready.drain(..) {
                    let name = self.graph[index].clone();
                    let future = self
                        .futures
                        .remove(&index)
                        .expect("every node owns exactly one future");
                    log::info!("starting `{name}`");
                    let started = Instant::now();
                    running.spawn(async move {
                        let result = future.await;
                        match &result {
                            Ok(()) => {
                                log::info!("finished `{name}` in {:.2?}", started.elapsed())
                            }
                            Err(e) => log::error!("`{name}` failed: {e}"),
                        }
                        (index, result)
                    });
                }
            } else {
                ready.clear();
            }

            let Some(joined) = running.join_next().await else {
                break;
            };

            match joined {
                Ok((index, Ok(()))) => {
                    for dependent in self
                        .graph
                        .neighbors_directed(index, Direction::Outgoing)
                        .collect::<Vec<_>>()
                    {
                        let deps = pending
                            .get_mut(&dependent)
                            .expect("dependent is a graph node");
                        *deps -= 1;
                        if *deps == 0 {
                            ready.push(dependent);
                        }
                    }
                }
                Ok((_, Err(error))) => {
                    first_error.get_or_insert(error);
                }
                Err(join_error) => {
                    first_error.get_or_insert(Error::TaskPanicked(
                        join_error.to_string(),
                    ));
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownTask(name.to_string()))
    }
}
