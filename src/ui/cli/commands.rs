use crate::active_learning::MeasureKind;
use crate::evaluation::TimepointReport;
use crate::ui::cli::{Command, RunArgs};
use crate::ui::types::build::build_engine;
use crate::ui::types::choices::{
    ClassifierChoice, EvaluationChoice, ForgettingChoice, OracleChoice, PipelineChoice, RunConfig,
    StrategyChoice, UIChoice, WindowChoice, parameter_specs,
};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::sync::mpsc;
use std::thread;
use strum::{EnumMessage, IntoEnumIterator};
use tracing::info;

pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run(args),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&RunConfig::schema())?);
            Ok(())
        }
        Command::List => {
            print!("{}", list_components()?);
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = RunConfig::from_path(&args.config)?;
    let (tx, rx) = mpsc::channel::<TimepointReport>();
    let printer = thread::spawn(move || {
        for report in rx {
            println!("{report}");
        }
    });

    let mut engine = build_engine(&config)?.with_progress(tx);
    let outcome = engine.run();
    if outcome.is_ok()
        && let Some(path) = &args.export
    {
        engine
            .statistics()
            .export(path, args.format)
            .with_context(|| format!("failed to export {}", path.display()))?;
        info!(path = %path.display(), format = %args.format, "learning curve exported");
    }
    // closes the channel so the printer can finish
    drop(engine);
    let _ = printer.join();
    Ok(outcome?)
}

/// Every configurable component with its description and parameters.
pub fn list_components() -> Result<String> {
    let mut out = String::new();
    describe::<PipelineChoice>(&mut out)?;
    describe::<ClassifierChoice>(&mut out)?;
    describe::<WindowChoice>(&mut out)?;
    describe::<ForgettingChoice>(&mut out)?;
    describe::<EvaluationChoice>(&mut out)?;
    describe::<StrategyChoice>(&mut out)?;
    describe::<OracleChoice>(&mut out)?;
    writeln!(out, "Uncertainty measures:")?;
    for m in MeasureKind::iter() {
        writeln!(out, "  {m}")?;
    }
    Ok(out)
}

fn describe<C: UIChoice>(out: &mut String) -> Result<()> {
    writeln!(out, "{}", C::label())?;
    let schema = C::schema();
    for kind in C::Kind::iter() {
        let key: &'static str = kind.into();
        write!(out, "  {key}")?;
        if let Some(message) = kind.get_message() {
            write!(out, "  {message}")?;
        }
        if let Some(detail) = kind.get_detailed_message() {
            write!(out, ": {detail}")?;
        }
        writeln!(out)?;
        for spec in parameter_specs(&schema, key)? {
            writeln!(out, "      {spec}")?;
        }
    }
    writeln!(out)?;
    Ok(())
}
