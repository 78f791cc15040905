use anyhow::Result;
use clap::Parser;
use log::info;
use rodney_core::{
    functions::{action_probs, huber_loss},
    ReplayBufferBase, ReplayMemory, ReplayMemoryConfig, Transition,
};
use std::path::PathBuf;

const CAPACITY: usize = 125;
const BATCH_SIZE: usize = 3;
const REWARD_SCALE: f32 = 0.01;
const TAU: f32 = 1.0;

/// Fill a replay memory with transitions and compute the Huber loss of a sample
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Capacity of the replay memory
    #[arg(short, long, default_value_t = CAPACITY)]
    capacity: usize,

    /// Number of transitions pushed; defaults to the capacity
    #[arg(short, long)]
    n_pushes: Option<usize>,

    /// Number of transitions sampled
    #[arg(short, long, default_value_t = BATCH_SIZE)]
    batch_size: usize,

    /// Seed for reproducible sampling
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML file with the replay memory configuration, overriding capacity and seed
    #[arg(long)]
    config: Option<PathBuf>,
}

fn replay_memory_config(args: &Args) -> Result<ReplayMemoryConfig> {
    match &args.config {
        Some(path) => ReplayMemoryConfig::load(path),
        None => Ok(ReplayMemoryConfig::default()
            .capacity(args.capacity)
            .seed(args.seed)),
    }
}

/// Returns the sampled batch and its Huber loss.
fn run(args: &Args) -> Result<(Vec<Transition<usize, usize>>, f32)> {
    let config = replay_memory_config(args)?;
    let mut memory = ReplayMemory::build(&config)?;
    let n_pushes = args.n_pushes.unwrap_or(config.capacity);

    for i in 0..n_pushes {
        memory.push(Transition::new(i, i, i, i as f32 * REWARD_SCALE));
    }
    info!(
        "Pushed {} transitions, {} stored (capacity {})",
        n_pushes,
        memory.len(),
        memory.capacity()
    );

    let batch = memory.batch(args.batch_size)?;
    let loss = huber_loss(&batch)?;
    info!("Huber loss of {} sampled transitions: {}", batch.len(), loss);
    #[cfg(feature = "candle")]
    info!("Huber loss computed by candle: {}", candle_huber_loss(&batch)?);

    let rewards = batch.iter().map(|tr| tr.reward()).collect::<Vec<_>>();
    info!("Boltzmann probabilities of rewards: {:?}", action_probs(&rewards, TAU)?);

    Ok((batch, loss))
}

/// Huber loss of the rewards of `batch` as a tensor operation.
#[cfg(feature = "candle")]
fn candle_huber_loss(batch: &[Transition<usize, usize>]) -> Result<f32> {
    use rodney_candle_agent::{
        util::{reward, smooth_l1_loss},
        Device,
    };
    let rewards = reward(batch, &Device::Cpu.to_candle()?)?;
    let loss = smooth_l1_loss(&rewards, &rewards.zeros_like()?)?;
    Ok(loss.to_scalar::<f32>()?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (_, loss) = run(&args)?;
    println!("{}", loss);
    Ok(())
}
