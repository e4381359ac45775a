#![deny(warnings)]

//! Headless CLI: runs a full season with a scripted policy, prints per-month
//! KPIs, and optionally exports the run log as JSON.

use anyhow::{bail, Context, Result};
use content::OptionId;
use interpreter::ScriptedInterpreter;
use session::Session;
use sim_engine::{CaseStudy, EngineConfig, Mode};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    mode: Mode,
    case: CaseStudy,
    seed: u64,
    export: Option<String>,
    plan: Option<String>,
    selfcheck: bool,
    version: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        mode: Mode::Realistic,
        case: CaseStudy::Free,
        seed: 42,
        export: None,
        plan: None,
        selfcheck: false,
        version: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--mode" => {
                let value = it.next().context("--mode needs a value")?;
                args.mode = match value.as_str() {
                    "realistic" => Mode::Realistic,
                    "hard" => Mode::Hard,
                    "spartan" => Mode::Spartan,
                    "macro" => Mode::Macro,
                    "absurd" => Mode::Absurd,
                    other => bail!("unknown mode {other:?}"),
                };
            }
            "--case" => {
                let value = it.next().context("--case needs a value")?;
                args.case = match value.as_str() {
                    "free" => CaseStudy::Free,
                    "facebook-privacy-2019" => CaseStudy::FacebookPrivacy2019,
                    "blackberry-platform-shift" => CaseStudy::BlackberryPlatformShift,
                    "wework-ipo-2019" => CaseStudy::WeworkIpo2019,
                    other => bail!("unknown case study {other:?}"),
                };
            }
            "--seed" => {
                args.seed = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .context("--seed needs an integer")?;
            }
            "--export" => args.export = it.next(),
            "--plan" => args.plan = it.next(),
            "--selfcheck" => args.selfcheck = true,
            "--version" => args.version = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

/// Scripted season policy: take the cautious catalog option when one is
/// offered, otherwise the first.
fn pick(options: &[content::ScenarioOption]) -> OptionId {
    options
        .iter()
        .min_by_key(|o| (o.risk, o.id))
        .map(|o| o.id)
        .unwrap_or(OptionId::A)
}

fn run_season(args: &Args) -> Result<Session> {
    let cfg = EngineConfig {
        base_seed: args.seed,
        mode: args.mode,
        case: args.case,
        ..EngineConfig::default()
    };
    let mut session = Session::new(cfg)?;

    // a free-text plan, if given, is played on the first month; an
    // interpreter failure falls back to the catalog options below
    if let Some(plan) = &args.plan {
        match session.submit_plan(plan, &ScriptedInterpreter) {
            Ok(summary) => {
                print_month(&session, "YOU", &summary);
                if summary.terminal {
                    println!("Bankrupt in month {}.", summary.month);
                    return Ok(session);
                }
            }
            Err(session::SessionError::Interpreter(reason)) => {
                warn!(%reason, "plan not interpretable, using catalog options");
            }
            Err(other) => return Err(other.into()),
        }
    }

    while !session.finished() {
        let options = session.options()?;
        let id = pick(&options);
        let summary = session.choose(id)?;
        print_month(&session, id.key(), &summary);
        if summary.terminal {
            println!("Bankrupt in month {}.", summary.month);
            return Ok(session);
        }
    }
    println!("Season complete: {} months survived.", session.logs().len());
    Ok(session)
}

fn print_month(session: &Session, option: &str, summary: &sim_engine::Summary) {
    println!(
        "{} | month {:>2} | {} | cash ${} | MRR ${} | rep {:.0} | churn {:.1}% | morale {:.0}",
        session.date_of(summary.month),
        summary.month,
        option,
        summary.after.cash.round(),
        summary.after.mrr.round(),
        summary.after.reputation,
        summary.after.churn * 100.0,
        summary.after.morale,
    );
}

/// Deterministic invariant sweep over a default season.
fn selfcheck() -> Result<()> {
    let mut session = Session::new(EngineConfig::default())?;
    let mut month = 1;
    while !session.finished() {
        let options = session.options()?;
        if !(2..=3).contains(&options.len()) {
            bail!("month {month}: expected 2-3 options, got {}", options.len());
        }
        let summary = session.choose(pick(&options))?;
        if summary.month != month {
            bail!("month counter skipped: expected {month}, got {}", summary.month);
        }
        let s = &summary.after;
        for (name, value) in [
            ("reputation", s.reputation),
            ("morale", s.morale),
            ("support_load", s.support_load),
            ("infra_load", s.infra_load),
            ("tech_debt", s.tech_debt),
        ] {
            if !(0.0..=100.0).contains(&value) {
                bail!("month {month}: {name} out of range: {value}");
            }
        }
        if !(0.0..=0.50).contains(&s.churn) {
            bail!("month {month}: churn out of range: {}", s.churn);
        }
        if summary.terminal {
            break;
        }
        month += 1;
    }
    println!("selfcheck OK: {} months resolved", session.logs().len());
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args()?;
    if args.version {
        println!(
            "startup-survivor {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }
    if args.selfcheck {
        return selfcheck();
    }

    info!(mode = ?args.mode, seed = args.seed, "starting season");
    let session = run_season(&args)?;

    if let Some(path) = &args.export {
        let json = session.export_json()?;
        std::fs::write(path, json).with_context(|| format!("writing export to {path}"))?;
        println!("Run log exported to {path}");
    }
    Ok(())
}
