mod error;
mod load;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tfl_core::ensure_finite;
use tfl_core::timing::{self, eval_timing};
use tfl_fluids::{
    FluidModel, FluidState, IdealGasTable, InputPair, SolveReport, SweepDefinition, SweepResult,
    SweepType, Swept, TableFluid, check_sweep, execute_sweep, parse_quantity,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tfl-cli")]
#[command(about = "Tablefluid CLI - real-fluid states from property tables", long_about = None)]
struct Cli {
    /// Property table (JSON); the synthetic ideal-gas table is used when omitted
    #[arg(long, global = true)]
    table: Option<PathBuf>,
    /// Model configuration (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Compute entropy on every update, whatever the config says
    #[arg(long, global = true)]
    entropy: bool,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Print a per-tier timing summary on exit
    #[arg(long, global = true)]
    timing: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the loaded table and solver settings
    Info,
    /// Evaluate one state
    State {
        /// Input pair (rho-e, P-rho, rho-T, rho-h, P-T, P-s, h-s)
        pair: InputPair,
        /// First input, optionally with a unit (e.g. "2bar")
        #[arg(allow_hyphen_values = true)]
        first: String,
        /// Second input, optionally with a unit (e.g. "300K")
        #[arg(allow_hyphen_values = true)]
        second: String,
    },
    /// Evaluate states across a range of one input
    Sweep {
        /// Input pair (rho-e, P-rho, rho-T, rho-h, P-T, P-s, h-s)
        pair: InputPair,
        /// Which input of the pair is swept
        #[arg(long, value_enum, default_value_t = SweptArg::Second)]
        swept: SweptArg,
        /// First swept value
        #[arg(allow_hyphen_values = true)]
        start: String,
        /// Last swept value
        #[arg(allow_hyphen_values = true)]
        end: String,
        /// Value of the input held fixed
        #[arg(long, allow_hyphen_values = true)]
        fixed: String,
        /// Number of points
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Space points logarithmically
        #[arg(long)]
        log: bool,
        /// Fail when more than this fraction of points does not converge
        #[arg(long, default_value_t = 0.0)]
        max_failed: f64,
    },
    /// Write the synthetic ideal-gas table as JSON
    Synth {
        /// Output file
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SweptArg {
    First,
    Second,
}

impl From<SweptArg> for Swept {
    fn from(arg: SweptArg) -> Self {
        match arg {
            SweptArg::First => Swept::First,
            SweptArg::Second => Swept::Second,
        }
    }
}

#[derive(Serialize)]
struct StateReport<'a> {
    pair: InputPair,
    state: &'a FluidState,
    solve: SolveReport,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.timing {
        timing::enable_timing();
    }

    let result = match &cli.command {
        Commands::Info => cmd_info(&cli),
        Commands::State {
            pair,
            first,
            second,
        } => cmd_state(&cli, *pair, first, second),
        Commands::Sweep {
            pair,
            swept,
            start,
            end,
            fixed,
            points,
            log,
            max_failed,
        } => {
            let sweep_type = if *log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            cmd_sweep(
                &cli,
                *pair,
                (*swept).into(),
                (start.as_str(), end.as_str(), *points, sweep_type),
                fixed,
                *max_failed,
            )
        }
        Commands::Synth { output } => cmd_synth(output),
    };

    if timing::is_enabled() {
        eprint!("{}", eval_timing::summary());
    }
    result
}

fn build_fluid(cli: &Cli) -> CliResult<TableFluid> {
    let table = load::load_table(cli.table.as_deref())?;
    let mut config = load::load_config(cli.config.as_deref())?;
    if cli.entropy {
        config = config.with_entropy(true);
    }
    Ok(TableFluid::new(Arc::new(table), config))
}

fn cmd_info(cli: &Cli) -> CliResult<()> {
    let fluid = build_fluid(cli)?;
    let table = fluid.eos().table();
    let rho = table.density_axis();
    let de = table.energy_offset_axis();
    let solver = fluid.eos().solver();

    println!("Model: {}", fluid.name());
    println!(
        "  Density axis:       {} .. {} kg/m^3 ({} nodes)",
        rho.min(),
        rho.max(),
        rho.len()
    );
    println!(
        "  Energy offset axis: {} .. {} J/kg ({} nodes)",
        de.min(),
        de.max(),
        de.len()
    );
    println!("  Saturation:         {:?}", table.saturation().coefficients());
    println!("  Entropy:            {}", fluid.computes_entropy());
    println!(
        "  Secant:             {} iterations, rel_tol {:e}, perturbation {}",
        solver.max_iterations, solver.rel_tol, solver.perturbation
    );
    Ok(())
}

fn parse_inputs(pair: InputPair, first: &str, second: &str) -> CliResult<(f64, f64)> {
    let (first_kind, second_kind) = pair.kinds();
    let a = ensure_finite(parse_quantity(first, first_kind)?, "first input")?;
    let b = ensure_finite(parse_quantity(second, second_kind)?, "second input")?;
    Ok((a, b))
}

fn cmd_state(cli: &Cli, pair: InputPair, first: &str, second: &str) -> CliResult<()> {
    let mut fluid = build_fluid(cli)?;
    let (a, b) = parse_inputs(pair, first, second)?;
    fluid.set_state(pair.input(a, b));

    let state = fluid.state();
    let solve = fluid.last_solve();
    if !solve.converged {
        warn!(%pair, iterations = solve.iterations, "state update did not converge");
    }
    if let Err(e) = state.check_physical() {
        warn!(%pair, "state is not physical: {e}");
    }

    if cli.json {
        let report = StateReport { pair, state, solve };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{pair} ({}, {} iterations)", solve.tier, solve.iterations);
    println!("  Density:        {:.6} kg/m^3", state.density);
    println!("  Static energy:  {:.3} J/kg", state.static_energy);
    println!("  Pressure:       {:.3} Pa", state.pressure);
    println!("  Temperature:    {:.4} K", state.temperature);
    println!("  Enthalpy:       {:.3} J/kg", state.enthalpy());
    if let Some(s) = state.entropy {
        println!("  Entropy:        {s:.4} J/(kg K)");
    }
    match state.sound_speed() {
        Some(a) => println!("  Speed of sound: {:.4} m/s", a.value),
        None => println!("  Speed of sound: n/a (a^2 = {})", state.sound_speed2),
    }
    println!("  cv / cp:        {:.4} / {:.4} J/(kg K)", state.cv, state.cp);
    println!("  dP/drho|e:      {:.6e}", state.dpdrho_e);
    println!("  dP/de|rho:      {:.6e}", state.dpde_rho);
    println!("  dT/drho|e:      {:.6e}", state.dtdrho_e);
    println!("  dT/de|rho:      {:.6e}", state.dtde_rho);
    println!("  Converged:      {}", solve.converged);
    Ok(())
}

fn cmd_sweep(
    cli: &Cli,
    pair: InputPair,
    swept: Swept,
    (start, end, points, sweep_type): (&str, &str, usize, SweepType),
    fixed: &str,
    max_failed: f64,
) -> CliResult<()> {
    let fluid = build_fluid(cli)?;
    let (first_kind, second_kind) = pair.kinds();
    let (swept_kind, fixed_kind) = match swept {
        Swept::First => (first_kind, second_kind),
        Swept::Second => (second_kind, first_kind),
    };
    let sweep = SweepDefinition::from_text(start, end, swept_kind, points, sweep_type)?;
    let fixed = ensure_finite(parse_quantity(fixed, fixed_kind)?, "fixed input")?;

    let result = execute_sweep(&fluid, pair, swept, &sweep, fixed)?;
    let non_physical = result.num_non_physical();
    if non_physical > 0 {
        warn!(%pair, non_physical, "sweep produced non-physical states");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_sweep(&result, swept);
    }
    check_sweep(&result, max_failed)?;
    Ok(())
}

fn print_sweep(result: &SweepResult, swept: Swept) {
    let label = match swept {
        Swept::First => result.input_pair.first_label(),
        Swept::Second => result.input_pair.second_label(),
    };
    println!("{label:>22} {:>14} {:>14} {:>14} {:>12} {:>5}", "rho", "e", "P", "T", "conv");
    for ((x, state), report) in result
        .independent_values
        .iter()
        .zip(&result.states)
        .zip(&result.reports)
    {
        println!(
            "{x:>22.6} {:>14.6} {:>14.3} {:>14.3} {:>12.4} {:>5}",
            state.density, state.static_energy, state.pressure, state.temperature, report.converged
        );
    }
}

fn cmd_synth(output: &Path) -> CliResult<()> {
    let data = IdealGasTable::default().data()?;
    load::save_table(output, &data)?;
    println!("✓ Wrote {}x{} table to {}", data.nx, data.ny, output.display());
    Ok(())
}
