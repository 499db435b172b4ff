//! PlanForge command-line tool
//!
//! Checks, migrates and queries floor-plan documents.
//!
//! ```text
//! planforge [--config editor.json] check <plan.json>
//! planforge [--config editor.json] migrate <plan.json>
//! planforge [--config editor.json] hit <plan.json> <x> <y> [tolerance]
//! planforge [--config editor.json] snap <plan.json> <x> <y>
//! ```

use kurbo::Point;
use planforge_core::snap::magnetic_snap;
use planforge_core::{
    EditorConfig, HitTester, NoCatalog, Plan, SnapKind, migrate_plan, validate_plan,
};
use serde_json::Value;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str =
    "usage: planforge [--config <editor.json>] <check|migrate|hit|snap> <plan.json> [args]";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Check { plan: PathBuf },
    Migrate { plan: PathBuf },
    Hit { plan: PathBuf, point: Point, tolerance: Option<f64> },
    Snap { plan: PathBuf, point: Point },
}

#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    config: Option<PathBuf>,
    command: Command,
}

/// What a successful run reports to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    Invalid,
}

fn parse_number(arg: Option<&String>, name: &str) -> Result<f64, String> {
    let arg = arg.ok_or_else(|| format!("missing <{name}>"))?;
    arg.parse::<f64>().map_err(|_| format!("<{name}> is not a number: {arg}"))
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut rest = args;
    let mut config = None;
    if rest.first().map(String::as_str) == Some("--config") {
        let path = rest.get(1).ok_or("--config needs a path")?;
        config = Some(PathBuf::from(path));
        rest = &rest[2..];
    }

    let (name, rest) = rest.split_first().ok_or(USAGE)?;
    let plan = rest.first().map(PathBuf::from).ok_or("missing <plan.json>")?;
    let point = || -> Result<Point, String> {
        Ok(Point::new(parse_number(rest.get(1), "x")?, parse_number(rest.get(2), "y")?))
    };

    let command = match name.as_str() {
        "check" => Command::Check { plan },
        "migrate" => Command::Migrate { plan },
        "hit" => Command::Hit {
            point: point()?,
            tolerance: match rest.get(3) {
                Some(_) => Some(parse_number(rest.get(3), "tolerance")?),
                None => None,
            },
            plan,
        },
        "snap" => Command::Snap { point: point()?, plan },
        other => return Err(format!("unknown command '{other}'\n{USAGE}")),
    };
    Ok(Invocation { config, command })
}

fn read_value(path: &Path) -> Result<Value, Box<dyn Error>> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            Ok(EditorConfig::from_json(&text)?)
        }
        None => Ok(EditorConfig::default()),
    }
}

fn snap_kind_name(kind: SnapKind) -> &'static str {
    match kind {
        SnapKind::None => "none",
        SnapKind::Grid => "grid",
        SnapKind::WallEndpoint => "wall-endpoint",
    }
}

fn run(invocation: &Invocation, out: &mut impl Write) -> Result<Outcome, Box<dyn Error>> {
    let config = load_config(invocation.config.as_deref())?;

    match &invocation.command {
        Command::Check { plan } => {
            let migrated = migrate_plan(read_value(plan)?);
            let result = validate_plan(&migrated);
            if result.valid {
                writeln!(out, "ok")?;
                return Ok(Outcome::Ok);
            }
            for error in &result.errors {
                writeln!(out, "{error}")?;
            }
            Ok(Outcome::Invalid)
        }
        Command::Migrate { plan } => {
            let migrated = migrate_plan(read_value(plan)?);
            writeln!(out, "{}", serde_json::to_string_pretty(&migrated)?)?;
            Ok(Outcome::Ok)
        }
        Command::Hit { plan, point, tolerance } => {
            let plan = Plan::from_value(read_value(plan)?)?;
            let tester = HitTester::new(&NoCatalog).with_tolerances(config.hit_tolerances);
            match tester.find_element_at(*point, &plan, *tolerance) {
                Some(element) => writeln!(out, "{} {}", element.kind(), element.id())?,
                None => writeln!(out, "none")?,
            }
            Ok(Outcome::Ok)
        }
        Command::Snap { plan, point } => {
            let plan = Plan::from_value(read_value(plan)?)?;
            let snapped =
                magnetic_snap(*point, &plan.walls, config.magnetic_threshold, config.grid_size);
            writeln!(
                out,
                "{} {} {}",
                snapped.point.x,
                snapped.point.y,
                snap_kind_name(snapped.kind)
            )?;
            Ok(Outcome::Ok)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let stdout = std::io::stdout();
    match run(&invocation, &mut stdout.lock()) {
        Ok(Outcome::Ok) => ExitCode::SUCCESS,
        Ok(Outcome::Invalid) => ExitCode::from(1),
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(2)
        }
    }
}
