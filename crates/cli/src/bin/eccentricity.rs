use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use orbit_shape::config::{LengthUnit, load_cases};
use orbit_shape::core::constants::{EARTH_MU_KM3_S2, EARTH_MU_M3_S2, METRES_PER_KM};
use orbit_shape::core::vector::Vector3;
use orbit_shape::export::report::{self, Row};
use orbit_shape::orbits::{
    EccentricityResult, LogObserver, OrbitalElementCalculator, StateVector,
};

/// Compute the eccentricity vector and eccentricity of two-body orbits from state vectors.
#[derive(Parser, Debug)]
#[command(author, version, about = "Eccentricity from a Cartesian state vector")]
struct Cli {
    /// Position vector as x,y,z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true,
          requires_all = ["velocity", "mu"], conflicts_with = "cases")]
    position: Option<Vector3>,

    /// Velocity vector as x,y,z (same length unit as the position, per second)
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true, requires = "position")]
    velocity: Option<Vector3>,

    /// Gravitational parameter in the matching unit (km^3/s^2 or m^3/s^2)
    #[arg(long, allow_hyphen_values = true, requires = "position")]
    mu: Option<f64>,

    /// Length unit of the inline state (label only; no conversion is applied).
    /// Case files carry their own `units` field.
    #[arg(long, value_enum, default_value_t = Units::Km, conflicts_with = "cases")]
    units: Units,

    /// YAML file, TOML file, or directory of TOML files with cases
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Output file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Log every intermediate of the computation to stderr
    #[arg(long, default_value_t = false)]
    trace: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Units {
    Km,
    M,
}

impl From<Units> for LengthUnit {
    fn from(units: Units) -> Self {
        match units {
            Units::Km => LengthUnit::Km,
            Units::M => LengthUnit::M,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Table,
    Csv,
    Json,
}

struct Case {
    name: String,
    units: LengthUnit,
    mu: f64,
    state: StateVector,
}

struct Evaluated {
    case: Case,
    result: EccentricityResult,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.trace);

    let cases = collect_cases(&cli)?;
    log::info!("evaluating {} case(s)", cases.len());

    let calculator = OrbitalElementCalculator::with_observer(LogObserver);
    let evaluated = cases
        .into_iter()
        .map(|case| -> anyhow::Result<Evaluated> {
            log::debug!("case '{}' ({})", case.name, case.units.label());
            let result = calculator
                .compute(&case.state, case.mu)
                .with_context(|| format!("case '{}'", case.name))?;
            Ok(Evaluated { case, result })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let rows: Vec<Row<'_>> = evaluated.iter().map(to_row).collect();
    let mut writer = report::writer_for_path(&cli.output)
        .with_context(|| format!("opening {}", cli.output.display()))?;
    match cli.format {
        Format::Table => write_table(writer.as_mut(), &rows)?,
        Format::Csv => report::write_csv(writer.as_mut(), &rows)?,
        Format::Json => report::write_json(writer.as_mut(), &rows)?,
    }
    Ok(())
}

fn init_logging(trace: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if trace {
        builder.filter_module("shape_orbits", log::LevelFilter::Trace);
    }
    builder.init();
}

fn collect_cases(cli: &Cli) -> anyhow::Result<Vec<Case>> {
    if let Some(path) = &cli.cases {
        let configs =
            load_cases(path).with_context(|| format!("loading cases from {}", path.display()))?;
        if configs.is_empty() {
            return Err(anyhow!("no cases found in {}", path.display()));
        }
        return configs
            .into_iter()
            .map(|cfg| -> anyhow::Result<Case> {
                let mu = cfg.gravitational_parameter()?;
                Ok(Case {
                    state: StateVector::new(cfg.position, cfg.velocity),
                    units: cfg.units,
                    name: cfg.name,
                    mu,
                })
            })
            .collect();
    }

    match (cli.position, cli.velocity, cli.mu) {
        (Some(position), Some(velocity), Some(mu)) => Ok(vec![Case {
            name: "inline".to_string(),
            units: cli.units.into(),
            mu,
            state: StateVector::new(position, velocity),
        }]),
        (None, None, None) => Ok(demonstration_cases()),
        _ => Err(anyhow!("--position, --velocity and --mu must be given together")),
    }
}

/// The same orbit in km and m; both must report the same eccentricity.
fn demonstration_cases() -> Vec<Case> {
    let km = StateVector::new([1_000.0, 5_000.0, 7_000.0], [3.0, 4.0, 5.0]);
    vec![
        Case {
            name: "demo-km".to_string(),
            units: LengthUnit::Km,
            mu: EARTH_MU_KM3_S2,
            state: km,
        },
        Case {
            name: "demo-m".to_string(),
            units: LengthUnit::M,
            mu: EARTH_MU_M3_S2,
            state: km.scaled(METRES_PER_KM),
        },
    ]
}

fn to_row(evaluated: &Evaluated) -> Row<'_> {
    Row {
        name: &evaluated.case.name,
        units: evaluated.case.units.label(),
        mu: evaluated.case.mu,
        position: evaluated.case.state.position,
        velocity: evaluated.case.state.velocity,
        eccentricity_vector: evaluated.result.eccentricity_vector,
        eccentricity: evaluated.result.eccentricity,
        shape: evaluated.result.shape().label(),
    }
}

fn write_table(writer: &mut dyn Write, rows: &[Row<'_>]) -> anyhow::Result<()> {
    writeln!(writer, "=== Eccentricity ===")?;
    for row in rows {
        writeln!(
            writer,
            "{:<16} e = {:.16} ({}) e_vec = [{:.6}, {:.6}, {:.6}] [{}]",
            row.name,
            row.eccentricity,
            row.shape,
            row.eccentricity_vector[0],
            row.eccentricity_vector[1],
            row.eccentricity_vector[2],
            row.units,
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_vector(raw: &str) -> Result<Vector3, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got {} component(s)", parts.len()));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(out)
}
