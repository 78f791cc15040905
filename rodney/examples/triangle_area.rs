use anyhow::Result;
use clap::Parser;
use log::info;
use rodney_candle_agent::{
    opt::OptimizerConfig,
    triangle_area::{area, TriangleArea, TriangleAreaConfig},
    Device,
};
use std::path::PathBuf;

const LEARNING_RATE: f64 = 0.01;
const BATCH_SIZE: usize = 1000;
const NUM_EPOCHS: usize = 1000;
const NUM_HIDDEN_LAYERS: usize = 2;
const NUM_HIDDEN_NODES: usize = 10;
const ROUNDS: usize = 10;
const TRAINS_PER_ROUND: usize = 10;

/// Train an MLP to predict the area of a triangle from its sides
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of rounds; each round generates new data
    #[arg(short, long, default_value_t = ROUNDS)]
    rounds: usize,

    /// Number of training calls per round
    #[arg(short, long, default_value_t = TRAINS_PER_ROUND)]
    trains_per_round: usize,

    /// Seed for weights and data
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// YAML file with the demo configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run on the given CUDA device
    #[arg(long)]
    cuda: Option<usize>,

    /// Use AdamW instead of Adam, keeping the learning rate
    #[arg(long)]
    adamw: bool,
}

fn create_config(args: &Args) -> Result<TriangleAreaConfig> {
    let config = match &args.config {
        Some(path) => TriangleAreaConfig::load(path)?,
        None => TriangleAreaConfig::default()
            .seed(args.seed)
            .learning_rate(LEARNING_RATE)
            .batch_size(BATCH_SIZE)
            .num_epochs(NUM_EPOCHS)
            .num_hidden_layers(NUM_HIDDEN_LAYERS)
            .num_hidden_nodes(NUM_HIDDEN_NODES),
    };
    let config = if args.adamw {
        let lr = config.opt_config.lr();
        config.opt_config(OptimizerConfig::adamw(lr))
    } else {
        config
    };
    Ok(match args.cuda {
        Some(n) => config.device(Device::Cuda(n)),
        None => config,
    })
}

/// Returns the loss after the last training call.
fn run(args: &Args) -> Result<f32> {
    let mut demo = TriangleArea::build(create_config(args)?)?;
    let mut loss = f32::NAN;

    for round in 0..args.rounds {
        info!("Round {}: new data", round);
        demo.generate_random_data()?;
        for _ in 0..args.trains_per_round {
            loss = demo.train()?;
        }
    }

    for (a, b, c) in [(3.0, 4.0, 5.0), (5.0, 5.0, 5.0), (2.0, 7.0, 8.0)] {
        info!(
            "sides = ({}, {}, {}): area = {:.3}, predicted = {:.3}",
            a,
            b,
            c,
            area(a as f64, b as f64, c as f64),
            demo.eval(a, b, c)?
        );
    }

    Ok(loss)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let loss = run(&args)?;
    println!("{}", loss);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{create_config, run, Args};
    use anyhow::Result;
    use rodney_candle_agent::{opt::OptimizerConfig, triangle_area::TriangleAreaConfig};
    use tempdir::TempDir;

    #[test]
    fn test_triangle_area() -> Result<()> {
        let tmp_dir = TempDir::new("triangle_area")?;
        let path = tmp_dir.path().join("triangle_area.yaml");
        TriangleAreaConfig::default()
            .batch_size(64)
            .num_epochs(20)
            .save(&path)?;

        let args = Args {
            rounds: 2,
            trains_per_round: 2,
            seed: 0,
            config: Some(path),
            cuda: None,
            adamw: false,
        };
        let loss = run(&args)?;
        assert!(loss.is_finite());
        Ok(())
    }

    #[test]
    fn test_triangle_area_adamw() -> Result<()> {
        let tmp_dir = TempDir::new("triangle_area")?;
        let path = tmp_dir.path().join("triangle_area.yaml");
        TriangleAreaConfig::default()
            .batch_size(64)
            .num_epochs(20)
            .learning_rate(0.005)
            .save(&path)?;

        let args = Args {
            rounds: 1,
            trains_per_round: 2,
            seed: 0,
            config: Some(path),
            cuda: None,
            adamw: true,
        };
        assert_eq!(create_config(&args)?.opt_config, OptimizerConfig::adamw(0.005));
        assert!(run(&args)?.is_finite());
        Ok(())
    }
}
