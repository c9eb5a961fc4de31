use std::process::exit;
use std::thread;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use log::{error, info};

use workpool::{Result, ThreadPool};

const MAX_THREADS: u64 = 1024;
const MAX_JOBS: u64 = 100_000;
const MAX_UNIT_MS: u64 = 60_000;

#[derive(Parser)]
#[command(name = "pool-demo", version, about = "Runs sample jobs on a thread pool")]
struct Cli {
    /// Number of worker threads
    #[arg(
        long,
        default_value_t = 3,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_THREADS)
    )]
    threads: usize,

    /// Number of jobs to submit
    #[arg(
        long,
        default_value_t = 10,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(..=MAX_JOBS)
    )]
    jobs: u64,

    /// Length of one delay unit in milliseconds
    #[arg(
        long,
        default_value_t = 1000,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(..=MAX_UNIT_MS)
    )]
    unit_ms: u64,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("pool-demo {}", env!("CARGO_PKG_VERSION"));
    let pool = ThreadPool::new(cli.threads)?;
    let unit = Duration::from_millis(cli.unit_ms);

    let mut handles = Vec::with_capacity(cli.jobs as usize);
    for id in 0..cli.jobs {
        let units = id % 3 + 1;
        let handle = if id % 3 == 2 {
            let work = WorkClass { unit };
            pool.submit(move || work.call(units, id))?
        } else {
            pool.submit(move || work_function(unit, units, id))?
        };
        handles.push(handle);
    }

    for handle in handles {
        println!("result : {}", handle.get()?);
    }
    Ok(())
}

/// Sleeps for `units` delay units and returns `units + id`.
fn work_function(unit: Duration, units: u64, id: u64) -> u64 {
    println!("ID {} beg", id);
    thread::sleep(unit.saturating_mul(units as u32));
    println!("ID {} end after {} units", id, units);
    units + id
}

/// The same work, carried by a value instead of a plain function.
struct WorkClass {
    unit: Duration,
}

impl WorkClass {
    fn call(&self, units: u64, id: u64) -> u64 {
        work_function(self.unit, units, id)
    }
}
