use crate::infra::InMemoryLedger;
use chrono::{Duration, Local, NaiveDateTime};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use fiado::error::AppError;
use fiado::ledger::{Debt, LedgerService, MemberId, NewDebt, PaymentOverride};
use fiado::score::{ScoreDetails, ScoreEngine, ScoreRules};

#[derive(Args, Debug)]
pub(crate) struct ScoreReportArgs {
    /// Path to a JSON ledger snapshot (array of debts)
    #[arg(long)]
    pub(crate) ledger: PathBuf,
    /// Member to score
    #[arg(long)]
    pub(crate) member: String,
    /// Optional JSON rules file; partial rule sets merge onto the defaults
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Evaluation instant (YYYY-MM-DD[THH:MM:SS]); defaults to now
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) as_of: Option<NaiveDateTime>,
    /// Include the full event trail in the output
    #[arg(long)]
    pub(crate) list_events: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for the demo (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) as_of: Option<NaiveDateTime>,
    /// Include the full event trails in the demo output
    #[arg(long)]
    pub(crate) list_events: bool,
}

/// Offline reporting entry point. It reads a snapshot and calls the one score
/// engine; there is deliberately no second copy of the replay logic here.
pub(crate) fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let ScoreReportArgs {
        ledger,
        member,
        rules,
        as_of,
        list_events,
    } = args;

    let debts: Vec<Debt> = serde_json::from_str(&std::fs::read_to_string(ledger)?)?;
    let rules: ScoreRules = match rules {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ScoreRules::default(),
    };

    let as_of = as_of.unwrap_or_else(|| Local::now().naive_local());
    let engine = ScoreEngine::new(rules);
    let details = engine.score_at(&MemberId(member.clone()), &debts, as_of);

    println!("Score report (evaluated {as_of})");
    render_score(&member, &details, list_events);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, list_events } = args;
    let now = as_of.unwrap_or_else(|| Local::now().naive_local());

    let service = Arc::new(LedgerService::new(
        Arc::new(InMemoryLedger::default()),
        ScoreRules::default(),
    ));

    let days = |n: i64| now - Duration::days(n);

    // Settled on the due date: both parties come out ahead.
    let settled = service.record_debt(NewDebt {
        creditor_id: MemberId("ana".to_string()),
        debtor_id: MemberId("bia".to_string()),
        amount: 120.0,
        due_date: days(30),
        created_at: Some(days(45)),
    })?;
    service.settle(&settled.id, Some(days(30)))?;

    // Still open and past due: the weekly penalty is accruing.
    service.record_debt(NewDebt {
        creditor_id: MemberId("caio".to_string()),
        debtor_id: MemberId("bia".to_string()),
        amount: 80.0,
        due_date: days(10),
        created_at: Some(days(25)),
    })?;

    // Partially paid: the remainder stays out of everyone's score.
    let split = service.record_debt(NewDebt {
        creditor_id: MemberId("ana".to_string()),
        debtor_id: MemberId("caio".to_string()),
        amount: 100.0,
        due_date: days(5),
        created_at: Some(days(35)),
    })?;
    service.record_partial_payment(&split.id, 40.0, Some(days(5)))?;

    // Paid late on paper, corrected by an admin override.
    let corrected = service.record_debt(NewDebt {
        creditor_id: MemberId("caio".to_string()),
        debtor_id: MemberId("ana".to_string()),
        amount: 60.0,
        due_date: days(20),
        created_at: Some(days(40)),
    })?;
    service.settle(&corrected.id, Some(days(8)))?;
    service.override_payment(
        &corrected.id,
        PaymentOverride {
            was_on_time: true,
            overridden_by: MemberId("admin".to_string()),
            overridden_at: now,
            reason: Some("cash handed over on the due date".to_string()),
        },
    )?;

    println!("Fiado score demo (evaluated {now})");
    for member in ["ana", "bia", "caio"] {
        let details = service.score_at(&MemberId(member.to_string()), now)?;
        println!();
        render_score(member, &details, list_events);
    }

    Ok(())
}

fn render_score(member: &str, details: &ScoreDetails, list_events: bool) {
    println!(
        "Member {member}: {} ({})",
        details.score,
        details.classification.label()
    );
    println!(
        "- base {} | earned {} | lost {}",
        details.breakdown.base, details.breakdown.earned, details.breakdown.lost
    );

    if !list_events {
        println!("- {} event(s); rerun with --list-events for the trail", details.history.len());
        return;
    }

    if details.history.is_empty() {
        println!("- no events");
        return;
    }

    println!("- events (newest first):");
    for event in &details.history {
        let debt = event
            .debt_id
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        println!(
            "  - {} | {:+.1} | {} | {}",
            event.date, event.points, debt, event.reason
        );
    }
}
