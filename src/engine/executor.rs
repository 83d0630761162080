use crate::engine::graph::{Next, StageId, WorkflowGraph};
use crate::engine::state::WorkflowState;

/// How a workflow run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The terminal stage executed.
    Completed,
    /// The regeneration loop-back fired more than the configured maximum.
    DidNotConverge { cycles: u32 },
    /// Structural failure: unregistered stage, missing edge, or step budget
    /// exhausted.
    Failed { error: String },
}

/// Final state of a run, returned for every outcome.
///
/// Even structural failures carry the best-effort state and the trace of
/// stages executed so far.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub state: WorkflowState,
    pub trace: Vec<StageId>,
}

/// Drives a [`WorkflowGraph`]: executes stages in sequence, merges their
/// updates, consults routers at branch points, and guards against unbounded
/// cycling.
pub struct Engine {
    graph: WorkflowGraph,
    max_steps: u32,
    max_regen_cycles: u32,
}

impl Engine {
    pub fn new(graph: WorkflowGraph, max_steps: u32, max_regen_cycles: u32) -> Self {
        Self {
            graph,
            max_steps,
            max_regen_cycles,
        }
    }

    pub async fn run(&self, mut state: WorkflowState) -> RunReport {
        let mut trace: Vec<StageId> = Vec::new();
        let mut regen_cycles = 0u32;
        let mut current = self.graph.entry();

        for step in 0..self.max_steps {
            let stage = match self.graph.stage(current) {
                Some(s) => s,
                None => {
                    let error = format!("Stage '{current}' is not registered in the graph");
                    tracing::error!(stage = %current, "Routing error: unknown stage");
                    state.errors.push(error.clone());
                    return RunReport {
                        outcome: RunOutcome::Failed { error },
                        state,
                        trace,
                    };
                }
            };

            tracing::info!(step = step, stage = %current, "Running stage");

            let update = stage.run(&state).await;
            state.apply(update);
            trace.push(current);

            let next = match self.graph.next(current) {
                Some(Next::Stage(id)) => *id,
                Some(Next::Router(router)) => router(&state),
                Some(Next::End) => {
                    tracing::info!(steps = trace.len(), "Workflow completed");
                    return RunReport {
                        outcome: RunOutcome::Completed,
                        state,
                        trace,
                    };
                }
                None => {
                    let error = format!("Stage '{current}' has no outgoing edge");
                    tracing::error!(stage = %current, "Routing error: missing edge");
                    state.errors.push(error.clone());
                    return RunReport {
                        outcome: RunOutcome::Failed { error },
                        state,
                        trace,
                    };
                }
            };

            // Re-entering the entry stage is the regeneration loop-back.
            if next == self.graph.entry() {
                regen_cycles += 1;
                if regen_cycles > self.max_regen_cycles {
                    let error = format!(
                        "Workflow did not converge: regeneration loop fired {regen_cycles} times \
                         (max {})",
                        self.max_regen_cycles
                    );
                    tracing::error!(cycles = regen_cycles, "Cycle budget exhausted");
                    state.errors.push(error);
                    return RunReport {
                        outcome: RunOutcome::DidNotConverge {
                            cycles: regen_cycles,
                        },
                        state,
                        trace,
                    };
                }
                state.re_run_test_case_gen = true;
                tracing::info!(cycle = regen_cycles, "Looping back to entry stage");
            }

            current = next;
        }

        let error = format!(
            "Workflow did not reach a terminal stage within {} steps",
            self.max_steps
        );
        tracing::error!(max_steps = self.max_steps, "Step budget exhausted");
        state.errors.push(error.clone());
        RunReport {
            outcome: RunOutcome::Failed { error },
            state,
            trace,
        }
    }
}
