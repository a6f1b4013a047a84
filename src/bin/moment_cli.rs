use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use moment_agg::engine::errors::MomentError;
use moment_agg::engine::moment::central::compute_central;
use moment_agg::engine::moment::{MomentAccumulator, MomentOrder, OrderArg, compute};
use moment_agg::engine::pipeline::LocalPipeline;
use moment_agg::engine::types::ScalarValue;
use moment_agg::engine::udf::FunctionRegistry;
use moment_agg::shared::config::CONFIG;
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Single-shot evaluation over all values
    Direct,
    /// Initial / Intermediate / Final through the local shard pipeline
    Algebraic,
    /// Incremental accumulation in batches
    Accumulate,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderType {
    Int,
    Float,
    Double,
}

#[derive(Parser)]
#[command(name = "moment-cli")]
#[command(about = "Compute the moment of order p over a JSON array of values", long_about = None)]
struct Args {
    /// Order of the moment
    #[arg(short, long)]
    order: String,

    /// Declared type of the order argument
    #[arg(long, value_enum, default_value = "double")]
    order_type: OrderType,

    /// JSON file holding an array of values (stdin when absent)
    #[arg(short, long)]
    input: Option<String>,

    #[arg(short, long, value_enum, default_value = "direct")]
    mode: Mode,

    /// Batch size used by the accumulate mode
    #[arg(long, default_value = "1024")]
    batch_size: usize,

    /// Compute the central moment E[(X - mean)^p] instead of the raw one
    #[arg(long)]
    central: bool,
}

fn parse_order(raw: &str, order_type: OrderType) -> Result<MomentOrder> {
    let arg = match order_type {
        OrderType::Int => OrderArg::Integer(raw.parse().context("order is not an integer")?),
        OrderType::Float => OrderArg::Float(raw.parse().context("order is not a float")?),
        OrderType::Double => OrderArg::Double(raw.parse().context("order is not a double")?),
    };
    Ok(arg.normalize())
}

fn read_values(input: Option<&str>) -> Result<Vec<ScalarValue>> {
    let raw = match input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("input must be a JSON array of values")
}

fn report(err: MomentError) -> anyhow::Error {
    err.log_error();
    anyhow!("{} (code {})", err, err.code())
}

fn main() -> Result<()> {
    moment_agg::logging::init()?;
    let args = Args::parse();

    let order = parse_order(&args.order, args.order_type)?;
    let values = read_values(args.input.as_deref())?;
    let pipeline = LocalPipeline::new(&CONFIG.pipeline);

    info!(
        values = values.len(),
        order = order.value(),
        mode = ?args.mode,
        central = args.central,
        "Computing moment"
    );

    let moment = match (args.mode, args.central) {
        (Mode::Direct, false) => compute(&values, order),
        (Mode::Direct, true) => {
            compute_central(&values, order, CONFIG.pipeline.central_max_order).map_err(report)?
        }
        (Mode::Algebraic, false) => {
            let registry = FunctionRegistry::with_moment();
            pipeline
                .run_through_registry(&registry, &values, order)
                .map_err(report)?
        }
        (Mode::Algebraic, true) => pipeline.run_central(&values, order).map_err(report)?,
        (Mode::Accumulate, false) => {
            if args.batch_size == 0 {
                bail!("--batch-size must be positive");
            }
            let mut acc = MomentAccumulator::new(order);
            for batch in values.chunks(args.batch_size) {
                acc.accumulate(batch);
            }
            acc.value()
        }
        (Mode::Accumulate, true) => bail!("central moments are not available in accumulate mode"),
    };

    println!("{}", json!({ "moment": moment }));
    Ok(())
}
