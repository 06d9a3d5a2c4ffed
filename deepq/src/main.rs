use anyhow::Result;
use clap::Parser;
use deepq::{run, RunConfig};
use deepq_core::record::{NullRecorder, Recorder};
use deepq_tensorboard::TensorboardRecorder;
use std::path::PathBuf;

/// Train/eval DQN agent in the corridor environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Train DQN agent, not evaluate
    #[arg(short, long, default_value_t = false)]
    train: bool,

    /// Evaluate DQN agent from the latest checkpoint, not train
    #[arg(short, long, default_value_t = false)]
    eval: bool,

    /// Run configuration in YAML; defaults are used if not given
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of checkpoints
    #[arg(short, long, default_value = "./model/dqn_corridor")]
    model_dir: PathBuf,

    /// Number of training episodes
    #[arg(long, default_value_t = 300)]
    episodes: usize,

    /// Number of evaluation episodes
    #[arg(long, default_value_t = 5)]
    eval_episodes: usize,

    /// Render every evaluation step
    #[arg(short, long, default_value_t = false)]
    render: bool,

    /// Write progress records for TensorBoard into the model directory
    #[arg(long, default_value_t = false)]
    tensorboard: bool,
}

fn load_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if args.render {
        config.evaluator.render = true;
    }
    Ok(config)
}

fn create_recorder(args: &Args) -> Box<dyn Recorder> {
    match args.tensorboard {
        true => Box::new(TensorboardRecorder::new(args.model_dir.join("tensorboard"))),
        false => Box::new(NullRecorder::new()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.eval && !args.train {
        let mut agent = run::load_latest(&config, &args.model_dir)?;
        run::eval(&config, &mut agent, args.eval_episodes)?;
    } else {
        let mut recorder = create_recorder(&args);
        let (mut agent, _) = run::train(&config, &args.model_dir, args.episodes, recorder.as_mut())?;
        if !args.train {
            run::eval(&config, &mut agent, args.eval_episodes)?;
        }
    }

    Ok(())
}
