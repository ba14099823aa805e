//! Collective communication primitives, simulated step by step.
//!
//! Every rank holds a buffer of `f64`. A simulation returns a [`Trace`]:
//! the initial state followed by one [`Step`] per transfer, each with a
//! snapshot of every rank's buffer after the transfer. Nothing runs
//! concurrently; a step stands for one message on the wire.
//!
//! The naive primitives route everything through a root rank.
//! [`ring_all_reduce`] shows the bandwidth-optimal alternative: a
//! scatter-reduce phase followed by an all-gather phase, each `N - 1`
//! steps around a ring.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CollectiveError;

/// The six primitives used in distributed training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collective {
    Broadcast,
    Scatter,
    Gather,
    AllGather,
    Reduce,
    AllReduce,
}

impl Collective {
    pub const ALL: [Self; 6] = [
        Self::Broadcast,
        Self::Scatter,
        Self::Gather,
        Self::AllGather,
        Self::Reduce,
        Self::AllReduce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Broadcast => "broadcast",
            Self::Scatter => "scatter",
            Self::Gather => "gather",
            Self::AllGather => "all-gather",
            Self::Reduce => "reduce",
            Self::AllReduce => "all-reduce",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Broadcast => "the root's buffer is copied to every rank",
            Self::Scatter => "the root's buffer is split into equal chunks, one per rank",
            Self::Gather => "every rank's buffer is concatenated, in rank order, at the root",
            Self::AllGather => "every rank ends up with the concatenation of all buffers",
            Self::Reduce => "buffers are summed element-wise into the root",
            Self::AllReduce => "every rank ends up with the element-wise sum of all buffers",
        }
    }

    /// Whether every rank's buffer is an input, which requires equal lengths.
    fn reads_every_rank(self) -> bool {
        matches!(
            self,
            Self::Gather | Self::AllGather | Self::Reduce | Self::AllReduce
        )
    }
}

impl std::fmt::Display for Collective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collective {
    type Err = CollectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "broadcast" => Ok(Self::Broadcast),
            "scatter" => Ok(Self::Scatter),
            "gather" => Ok(Self::Gather),
            "allgather" => Ok(Self::AllGather),
            "reduce" => Ok(Self::Reduce),
            "allreduce" => Ok(Self::AllReduce),
            _ => Err(CollectiveError::Unknown(s.to_string())),
        }
    }
}

/// One transfer and the state it leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub description: String,
    /// Elements put on the wire during this step.
    pub elements_sent: usize,
    /// Every rank's buffer after the step.
    pub buffers: Vec<Vec<f64>>,
}

/// Ordered steps of one simulated collective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Trace {
    fn new(name: &str, initial: &[Vec<f64>]) -> Self {
        Self {
            name: name.to_string(),
            steps: vec![Step {
                description: "initial state".to_string(),
                elements_sent: 0,
                buffers: initial.to_vec(),
            }],
        }
    }

    fn push(&mut self, description: String, elements_sent: usize, buffers: &[Vec<f64>]) {
        self.steps.push(Step {
            description,
            elements_sent,
            buffers: buffers.to_vec(),
        });
    }

    /// Buffers after the last step.
    pub fn final_buffers(&self) -> &[Vec<f64>] {
        match self.steps.last() {
            Some(step) => &step.buffers,
            None => &[],
        }
    }

    /// Total elements moved over the whole collective.
    pub fn total_elements_sent(&self) -> usize {
        self.steps.iter().map(|s| s.elements_sent).sum()
    }
}

/// Simulate `collective` over `buffers` (one per rank) with the naive,
/// root-centred algorithm.
///
/// `root` is ignored by all-gather. All-reduce uses it as the
/// coordinator of its reduce-then-broadcast phases.
///
/// # Errors
///
/// [`CollectiveError::EmptyWorld`], [`CollectiveError::RootOutOfRange`],
/// [`CollectiveError::RaggedBuffers`] when a primitive that reads every
/// rank sees unequal lengths, and [`CollectiveError::UnevenScatter`].
pub fn simulate(
    collective: Collective,
    buffers: &[Vec<f64>],
    root: usize,
) -> Result<Trace, CollectiveError> {
    let world_size = buffers.len();
    if world_size == 0 {
        return Err(CollectiveError::EmptyWorld);
    }
    if root >= world_size {
        return Err(CollectiveError::RootOutOfRange { root, world_size });
    }
    if collective.reads_every_rank() {
        check_equal_lengths(buffers)?;
    }
    tracing::debug!(%collective, world_size, root, "simulating collective");

    let mut trace = Trace::new(collective.name(), buffers);
    let mut state = buffers.to_vec();
    match collective {
        Collective::Broadcast => broadcast(&mut trace, &mut state, root),
        Collective::Scatter => scatter(&mut trace, &mut state, root)?,
        Collective::Gather => gather(&mut trace, &mut state, root),
        Collective::AllGather => all_gather(&mut trace, &mut state),
        Collective::Reduce => reduce(&mut trace, &mut state, root),
        Collective::AllReduce => {
            reduce(&mut trace, &mut state, root);
            broadcast(&mut trace, &mut state, root);
        }
    }
    Ok(trace)
}

fn check_equal_lengths(buffers: &[Vec<f64>]) -> Result<usize, CollectiveError> {
    let expected = buffers.first().map_or(0, Vec::len);
    for (rank, buf) in buffers.iter().enumerate() {
        if buf.len() != expected {
            return Err(CollectiveError::RaggedBuffers {
                rank,
                expected,
                actual: buf.len(),
            });
        }
    }
    Ok(expected)
}

fn broadcast(trace: &mut Trace, state: &mut [Vec<f64>], root: usize) {
    let payload = state[root].clone();
    for rank in (0..state.len()).filter(|&r| r != root) {
        state[rank].clone_from(&payload);
        trace.push(
            format!("rank {root} sends {} element(s) to rank {rank}", payload.len()),
            payload.len(),
            state,
        );
    }
}

fn scatter(trace: &mut Trace, state: &mut [Vec<f64>], root: usize) -> Result<(), CollectiveError> {
    let world_size = state.len();
    let len = state[root].len();
    if len % world_size != 0 {
        return Err(CollectiveError::UnevenScatter { len, world_size });
    }
    let chunk = len / world_size;
    let source = state[root].clone();
    let slice = |rank: usize| source[rank * chunk..(rank + 1) * chunk].to_vec();

    state[root] = slice(root);
    trace.push(format!("rank {root} keeps chunk {root}"), 0, state);
    for rank in (0..world_size).filter(|&r| r != root) {
        state[rank] = slice(rank);
        trace.push(
            format!("rank {root} sends chunk {rank} to rank {rank}"),
            chunk,
            state,
        );
    }
    Ok(())
}

fn gather(trace: &mut Trace, state: &mut [Vec<f64>], root: usize) {
    let inputs = state.to_vec();
    let mut received: Vec<Option<&Vec<f64>>> = vec![None; inputs.len()];
    received[root] = Some(&inputs[root]);
    for rank in (0..inputs.len()).filter(|&r| r != root) {
        received[rank] = Some(&inputs[rank]);
        state[root] = received.iter().flatten().flat_map(|b| b.iter().copied()).collect();
        trace.push(
            format!("rank {rank} sends {} element(s) to rank {root}", inputs[rank].len()),
            inputs[rank].len(),
            state,
        );
    }
}

fn all_gather(trace: &mut Trace, state: &mut [Vec<f64>]) {
    let inputs = state.to_vec();
    let world_size = inputs.len();
    // received[dst][src]
    let mut received: Vec<Vec<Option<&Vec<f64>>>> = (0..world_size)
        .map(|dst| {
            let mut slots = vec![None; world_size];
            slots[dst] = Some(&inputs[dst]);
            slots
        })
        .collect();

    for src in 0..world_size {
        for dst in (0..world_size).filter(|&d| d != src) {
            received[dst][src] = Some(&inputs[src]);
        }
        for (dst, slots) in received.iter().enumerate() {
            state[dst] = slots.iter().flatten().flat_map(|b| b.iter().copied()).collect();
        }
        trace.push(
            format!("rank {src} sends its buffer to every other rank"),
            inputs[src].len() * (world_size - 1),
            state,
        );
    }
}

fn reduce(trace: &mut Trace, state: &mut [Vec<f64>], root: usize) {
    for rank in (0..state.len()).filter(|&r| r != root) {
        let incoming = state[rank].clone();
        for (acc, value) in state[root].iter_mut().zip(&incoming) {
            *acc += value;
        }
        trace.push(
            format!("rank {rank} sends {} element(s) to rank {root}, which adds them", incoming.len()),
            incoming.len(),
            state,
        );
    }
}

/// Ring all-reduce: `N - 1` scatter-reduce steps then `N - 1`
/// all-gather steps.
///
/// Buffers are cut into `N` chunks of `ceil(len / N)` elements (the last
/// ones may be shorter or empty). In step `s` of either phase every rank
/// `r` sends one chunk to rank `r + 1` simultaneously.
///
/// # Errors
///
/// [`CollectiveError::EmptyWorld`] or [`CollectiveError::RaggedBuffers`].
pub fn ring_all_reduce(buffers: &[Vec<f64>]) -> Result<Trace, CollectiveError> {
    let world_size = buffers.len();
    if world_size == 0 {
        return Err(CollectiveError::EmptyWorld);
    }
    let len = check_equal_lengths(buffers)?;
    let chunk = len.div_ceil(world_size);
    let range = |idx: usize| {
        let start = (idx * chunk).min(len);
        start..(start + chunk).min(len)
    };
    // Chunk index rank `r` handles at step `s`, shifted by `offset`.
    let chunk_of = |rank: usize, step: usize, offset: usize| {
        (rank + world_size + offset - step % world_size) % world_size
    };
    tracing::debug!(world_size, len, chunk, "simulating ring all-reduce");

    let mut trace = Trace::new("ring all-reduce", buffers);
    let mut state = buffers.to_vec();

    for step in 0..world_size - 1 {
        let outgoing: Vec<Vec<f64>> = (0..world_size)
            .map(|rank| state[rank][range(chunk_of(rank, step, 0))].to_vec())
            .collect();
        let sent = outgoing.iter().map(Vec::len).sum();
        for (sender, data) in outgoing.iter().enumerate() {
            let receiver = (sender + 1) % world_size;
            let target = range(chunk_of(receiver, step, world_size - 1));
            for (acc, value) in state[receiver][target].iter_mut().zip(data) {
                *acc += value;
            }
        }
        trace.push(
            format!("scatter-reduce step {}: each rank adds the chunk from its left neighbour", step + 1),
            sent,
            &state,
        );
    }

    for step in 0..world_size - 1 {
        let outgoing: Vec<Vec<f64>> = (0..world_size)
            .map(|rank| state[rank][range(chunk_of(rank, step, 1))].to_vec())
            .collect();
        let sent = outgoing.iter().map(Vec::len).sum();
        for (sender, data) in outgoing.iter().enumerate() {
            let receiver = (sender + 1) % world_size;
            let target = range(chunk_of(receiver, step, 0));
            state[receiver][target].copy_from_slice(data);
        }
        trace.push(
            format!("all-gather step {}: each rank copies a finished chunk from its left neighbour", step + 1),
            sent,
            &state,
        );
    }

    Ok(trace)
}

/// Elements moved by the naive algorithm for `world_size` ranks holding
/// `len` elements each.
///
/// Scatter assumes `len` divides evenly.
pub fn elements_sent(collective: Collective, world_size: usize, len: usize) -> usize {
    let others = world_size.saturating_sub(1);
    match collective {
        Collective::Broadcast | Collective::Gather | Collective::Reduce => others * len,
        Collective::Scatter => others * len.checked_div(world_size).unwrap_or(0),
        Collective::AllGather => world_size * others * len,
        Collective::AllReduce => 2 * others * len,
    }
}

/// Elements each rank sends during [`ring_all_reduce`]: `2 (N-1) ceil(len/N)`.
///
/// Independent of `N` for large `N`, which is why the ring wins.
pub fn ring_elements_sent_per_rank(world_size: usize, len: usize) -> usize {
    if world_size == 0 {
        return 0;
    }
    2 * (world_size - 1) * len.div_ceil(world_size)
}
