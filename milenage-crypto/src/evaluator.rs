//! Batch evaluation of all Milenage outputs
//!
//! A batch computes TEMP once and then the five OUTn stages, which are
//! independent of each other. Stages run either inline or fanned out as
//! blocking tasks on a tokio `JoinSet`; both modes give identical results.
//! A batch either yields all seven outputs or an error, never a partial set.

use std::fmt;
use std::sync::Arc;

use milenage_common::HexDump;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::aes::Aes128Block;
use crate::block::Block;
use crate::cipher::BlockCipher;
use crate::error::{MilenageError, MilenageResult};
use crate::milenage::{rand_block, Milenage, Stage};
use crate::output::{assemble_all, OutputSet};

/// How the five OUTn stages of a batch are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// Stages run one after another on the calling thread
    #[default]
    Sequential,
    /// Stages run as concurrent blocking tasks
    Parallel,
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Sequential => write!(f, "sequential"),
            Dispatch::Parallel => write!(f, "parallel"),
        }
    }
}

impl<C: BlockCipher> Milenage<C> {
    /// Compute all seven outputs for one challenge, stage by stage
    ///
    /// # Arguments
    /// * `rand` - 128-bit random challenge
    /// * `sqn` - 48-bit sequence number
    /// * `amf` - 16-bit authentication management field
    pub fn compute_all(&self, rand: &[u8], sqn: &[u8], amf: &[u8]) -> MilenageResult<OutputSet> {
        let rand_b = rand_block(rand)?;
        let in1 = Block::in1(sqn, amf)?;
        debug!(rand = %HexDump(rand), dispatch = %Dispatch::Sequential, "Evaluating Milenage batch");

        let outs = self.all_stages(&rand_b, &in1).map_err(|e| {
            warn!(error = %e, "Milenage batch aborted");
            e
        })?;
        assemble_all(&outs)
    }

    fn all_stages(&self, rand: &Block, in1: &Block) -> MilenageResult<[Block; 5]> {
        let temp = self.temp(rand)?;
        Ok([
            self.out1(&temp, in1)?,
            self.out_x(&temp, Stage::Out2)?,
            self.out_x(&temp, Stage::Out3)?,
            self.out_x(&temp, Stage::Out4)?,
            self.out_x(&temp, Stage::Out5)?,
        ])
    }
}

/// Compute all seven outputs with the OUTn stages fanned out as blocking tasks
///
/// TEMP is computed on the calling task. The first failing stage aborts the
/// remaining ones and its error is returned.
pub async fn compute_all_parallel<C>(
    context: Arc<Milenage<C>>,
    rand: &[u8],
    sqn: &[u8],
    amf: &[u8],
) -> MilenageResult<OutputSet>
where
    C: BlockCipher + 'static,
{
    let rand_b = rand_block(rand)?;
    let in1 = Block::in1(sqn, amf)?;
    debug!(rand = %HexDump(rand), dispatch = %Dispatch::Parallel, "Evaluating Milenage batch");

    let temp = context.temp(&rand_b).map_err(|e| {
        warn!(error = %e, "Milenage batch aborted");
        e
    })?;

    let mut tasks = JoinSet::new();
    {
        let context = Arc::clone(&context);
        tasks.spawn_blocking(move || (0, context.out1(&temp, &in1)));
    }
    for stage in Stage::ALL {
        let context = Arc::clone(&context);
        tasks.spawn_blocking(move || (stage.index(), context.out_x(&temp, stage)));
    }

    let mut outs = [Block::ZERO; 5];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(e) => {
                warn!(error = %e, "Milenage stage task failed, aborting batch");
                tasks.abort_all();
                return Err(MilenageError::TaskJoin(e.to_string()));
            }
        };
        match result {
            Ok(block) => outs[index] = block,
            Err(e) => {
                warn!(stage = index + 1, error = %e, "Milenage batch aborted");
                tasks.abort_all();
                return Err(e);
            }
        }
    }

    assemble_all(&outs)
}

/// A shared subscriber context bound to a dispatch mode
pub struct Evaluator<C = Aes128Block> {
    context: Arc<Milenage<C>>,
    dispatch: Dispatch,
}

impl<C: BlockCipher + 'static> Evaluator<C> {
    /// Create an evaluator
    pub fn new(context: Arc<Milenage<C>>, dispatch: Dispatch) -> Self {
        Self { context, dispatch }
    }

    /// Create an evaluator that runs stages inline
    pub fn sequential(context: Arc<Milenage<C>>) -> Self {
        Self::new(context, Dispatch::Sequential)
    }

    /// Create an evaluator that fans stages out as blocking tasks
    pub fn parallel(context: Arc<Milenage<C>>) -> Self {
        Self::new(context, Dispatch::Parallel)
    }

    /// The shared subscriber context
    pub fn context(&self) -> &Arc<Milenage<C>> {
        &self.context
    }

    /// The dispatch mode
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Compute all seven outputs for one challenge
    pub async fn compute_all(
        &self,
        rand: &[u8],
        sqn: &[u8],
        amf: &[u8],
    ) -> MilenageResult<OutputSet> {
        match self.dispatch {
            Dispatch::Sequential => self.context.compute_all(rand, sqn, amf),
            Dispatch::Parallel => {
                compute_all_parallel(Arc::clone(&self.context), rand, sqn, amf).await
            }
        }
    }
}

impl<C> Clone for Evaluator<C> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            dispatch: self.dispatch,
        }
    }
}

impl<C> fmt::Debug for Evaluator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}
