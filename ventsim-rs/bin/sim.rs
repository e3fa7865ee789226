use std::{env, fs, io, process};

use chrono::NaiveDate;
use log::{error, info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use ventsim::{
    params::{DiseaseParams, ScenarioInput},
    sim::{run_batch, simulate, write_csv, ScenarioOutput, Series},
    solver::SolverOptions,
    utils::{downsample, render_hbars, render_vbars},
    Real, Result,
};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    scenario: ScenarioInput,
    disease: DiseaseParams,
    solver: SolverOptions,
    output: String,
    epicurve: Option<String>,
    plot: bool,
    verbose: bool,
    lockdown_sweep: Vec<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        let first_infection = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap_or(NaiveDate::MIN);
        let lockdown = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap_or(NaiveDate::MIN);
        Config {
            scenario: ScenarioInput::new(10_000_000, 5_000, first_infection, lockdown, 5),
            disease: Default::default(),
            solver: Default::default(),
            output: "chart.csv".to_string(),
            epicurve: None,
            plot: false,
            verbose: false,
            lockdown_sweep: vec![],
        }
    }
}

fn load_config(path: &str) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(toml::from_str(&data)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} not found, using the default scenario", path);
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn report(input: &ScenarioInput, out: &ScenarioOutput) {
    match out.params.doubling_time() {
        Some(days) => info!("initial doubling time: {:.1} days", days),
        None => info!("epidemic does not grow"),
    }
    match out.demand.peak() {
        Some((date, beds)) => info!("peak ICU demand: {} beds on {}", beds, date),
        None => info!("no ICU demand estimate within the horizon"),
    }
    let over = out.demand.days_over_capacity(input.icu_capacity());
    if over > 0 {
        warn!(
            "ICU demand exceeds the {} available beds on {} days",
            input.icu_capacity(), over
        );
    }
}

fn plot_demand(out: &ScenarioOutput) {
    let values: Vec<Real> = out
        .rows
        .iter()
        .filter(|r| r.series == Series::NeedsIcu)
        .map(|r| r.count as Real)
        .collect();
    println!("{}", render_vbars(&downsample(&values, 100), 20));
}

fn sweep(cfg: &Config) {
    let inputs: Vec<ScenarioInput> = cfg
        .lockdown_sweep
        .iter()
        .map(|&lockdown| ScenarioInput {
            lockdown,
            ..cfg.scenario.clone()
        })
        .collect();
    let results = run_batch(&inputs, &cfg.disease, &cfg.solver);

    let mut labels = vec![];
    let mut peaks = vec![];
    for (input, res) in inputs.iter().zip(results) {
        match res {
            Ok(out) => {
                let peak = out.demand.peak().map_or(0, |(_, n)| n);
                info!(
                    "lockdown {}: peak ICU demand {}, {} days over capacity",
                    input.lockdown(),
                    peak,
                    out.demand.days_over_capacity(input.icu_capacity())
                );
                labels.push(input.lockdown().to_string());
                peaks.push(peak as Real);
            }
            Err(e) => error!("lockdown {}: {}", input.lockdown(), e),
        }
    }
    if cfg.plot {
        println!("{}", render_hbars(&labels, &peaks, 60));
    }
}

fn run(path: &str) -> Result<()> {
    let cfg = load_config(path)?;
    if cfg.verbose {
        log::set_max_level(LevelFilter::Debug);
        info!("{:#?}", cfg);
    }

    let out = simulate(&cfg.scenario, &cfg.disease, &cfg.solver)?;
    report(&cfg.scenario, &out);

    write_csv(&cfg.output, &out.rows)?;
    info!("wrote {} chart rows to {}", out.rows.len(), cfg.output);
    if let Some(path) = &cfg.epicurve {
        fs::write(path, out.trajectory.render_csv(','))?;
        info!("wrote epicurve to {}", path);
    }
    if cfg.plot {
        plot_demand(&out);
    }
    if !cfg.lockdown_sweep.is_empty() {
        sweep(&cfg);
    }
    Ok(())
}

pub fn main() {
    SimpleLogger::new().with_level(LevelFilter::Debug).init().unwrap();
    log::set_max_level(LevelFilter::Info);

    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    if let Err(e) = run(&path) {
        error!("{}", e);
        process::exit(1);
    }
}
