use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use health_boost_core::{
    AttributeModifier, BonusRule, BoostConfig, HealthCapacity, MaxHealthAttribute, Position,
    WorldKind,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Inspect the distance based max-health bonus")]
struct Cli {
    /// Config file; built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bonus for a single position as JSON.
    Bonus(BonusArgs),
    /// Print the distance at which each bonus step starts.
    Ladder(LadderArgs),
    /// Validate the config file and print the effective settings.
    Config,
}

#[derive(Args)]
struct BonusArgs {
    #[arg(long, default_value = "normal")]
    world: WorldKind,
    #[arg(long, allow_negative_numbers = true)]
    x: f64,
    #[arg(long, allow_negative_numbers = true)]
    z: f64,
}

#[derive(Args)]
struct LadderArgs {
    #[arg(long, default_value = "normal")]
    world: WorldKind,
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

#[derive(Debug, PartialEq, Serialize)]
struct BonusReport {
    position: Position,
    steps: u32,
    bonus: f64,
    max_health: f64,
}

#[derive(Serialize)]
struct LadderRung {
    steps: u32,
    /// Manhattan distance, in the world's own coordinates.
    distance: f64,
    bonus: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => BoostConfig::from_path(path)?,
        None => BoostConfig::default(),
    };
    init_tracing(&config);
    debug!(target: "health_boost.cli", ?config, "configuration loaded");

    match cli.command {
        Commands::Bonus(args) => handle_bonus(&config, args),
        Commands::Ladder(args) => handle_ladder(&config.bonus, args),
        Commands::Config => handle_config(&config),
    }
}

fn init_tracing(config: &BoostConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn handle_bonus(config: &BoostConfig, args: BonusArgs) -> Result<()> {
    let report = bonus_report(config, Position::new(args.world, args.x, args.z))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Max health is read back from a default attribute carrying the bonus, so
/// the attribute's range applies.
fn bonus_report(config: &BoostConfig, position: Position) -> Result<BonusReport> {
    let rule = &config.bonus;
    let steps = rule.steps(&position);
    let bonus = rule.compute(&position);
    let mut attribute = MaxHealthAttribute::default();
    if bonus > 0.0 {
        attribute.add_modifier(AttributeModifier::add_number(config.modifier_key()?, bonus))?;
    }
    Ok(BonusReport {
        position,
        steps,
        bonus,
        max_health: attribute.value(),
    })
}

fn handle_ladder(rule: &BonusRule, args: LadderArgs) -> Result<()> {
    if !args.world.is_surface_bound() {
        bail!("{} worlds never grant a bonus", args.world);
    }
    let scale = match args.world {
        WorldKind::Nether => rule.nether_scale,
        _ => 1.0,
    };
    let rungs: Vec<LadderRung> = (0..=args.steps)
        .map(|steps| LadderRung {
            steps,
            distance: rule.step_distance * f64::from(steps) / scale,
            bonus: rule.amount_per_step * f64::from(steps),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rungs)?);
    Ok(())
}

fn handle_config(config: &BoostConfig) -> Result<()> {
    config.validate()?;
    println!("{}", serde_json::to_string_pretty(config)?);
    println!("Modifier key: {}", config.modifier_key()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_adds_bonus_to_default_max_health() {
        let position = Position::new(WorldKind::Normal, 5000.0, 0.0);
        let report = bonus_report(&BoostConfig::default(), position).unwrap();

        assert_eq!(1, report.steps);
        assert_eq!(2.0, report.bonus);
        assert_eq!(22.0, report.max_health);
    }

    #[test]
    fn report_caps_max_health_at_the_attribute_limit() {
        let position = Position::new(WorldKind::Normal, 29_999_984.0, 0.0);
        let report = bonus_report(&BoostConfig::default(), position).unwrap();

        assert_eq!(11_998.0, report.bonus);
        assert_eq!(1024.0, report.max_health);
    }
}
