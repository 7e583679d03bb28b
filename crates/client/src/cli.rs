use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    abstract_trait::{DynWithdrawalApi, WithdrawalApiTrait},
    domain::{
        response::{WithdrawalResponse, WithdrawalStats},
        status::{StatusAction, StatusFilter},
    },
};
use std::sync::Arc;

use crate::{
    config::ClientConfig,
    notice::Notice,
    service::HttpWithdrawalApi,
    view::{ReviewBoard, SubmissionForm},
};

#[derive(Debug, Parser)]
#[command(name = "card-referral", version, about = "Submit and review referral bonus withdrawals")]
pub struct Cli {
    #[command(flatten)]
    pub config: ClientConfig,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// `pretty` or `json`.
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List withdrawal requests, newest first.
    List {
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Totals across every request.
    Stats,
    /// Show a single request.
    Show { id: i32 },
    /// Submit a new withdrawal request.
    Submit {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        bank: String,
        #[arg(long)]
        amount: String,
        /// Bonus balance known to the submitter.
        #[arg(long, env = "USER_BALANCE")]
        balance: Decimal,
    },
    /// Mark a pending request as paid out.
    Complete { id: i32 },
    /// Reject a pending request.
    Reject { id: i32 },
    /// Send a processed request back to review.
    Revert { id: i32 },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardOutput<'a> {
    filter: &'a str,
    stats: WithdrawalStats,
    withdrawals: &'a [WithdrawalResponse],
}

pub async fn run(cli: Cli) -> Result<()> {
    let api: DynWithdrawalApi = Arc::new(
        HttpWithdrawalApi::new(&cli.config).context("Failed to build HTTP client")?,
    );

    match cli.command {
        Command::List { status } => {
            let mut board = ReviewBoard::new(api);
            load(&mut board, status, cli.json).await?;
            print_board(&board, cli.json)
        }
        Command::Stats => {
            let mut board = ReviewBoard::new(api);
            load(&mut board, StatusFilter::All, cli.json).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&board.stats())?);
            } else {
                print_stats(board.stats());
            }
            Ok(())
        }
        Command::Show { id } => {
            let record = api
                .get(id)
                .await
                .with_context(|| format!("Failed to load request #{id}"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
            Ok(())
        }
        Command::Submit {
            phone,
            bank,
            amount,
            balance,
        } => {
            let mut form = SubmissionForm::new(api, balance);
            form.phone_number = phone;
            form.bank_name = bank;
            form.amount = amount;

            let result = form.submit().await;
            print_notice(form.notice(), cli.json)?;
            let ack = result?;
            if !cli.json {
                if let Some(id) = ack.withdrawal_id {
                    println!("Request id: #{id}");
                }
            }
            Ok(())
        }
        Command::Complete { id } => act(api, id, StatusAction::Complete, cli.json).await,
        Command::Reject { id } => act(api, id, StatusAction::Reject, cli.json).await,
        Command::Revert { id } => act(api, id, StatusAction::Revert, cli.json).await,
    }
}

async fn load(board: &mut ReviewBoard, filter: StatusFilter, json: bool) -> Result<()> {
    if let Err(e) = board.set_filter(filter).await {
        print_notice(board.notice(), json)?;
        return Err(e).context("Failed to load withdrawals");
    }
    Ok(())
}

async fn act(api: DynWithdrawalApi, id: i32, action: StatusAction, json: bool) -> Result<()> {
    let mut board = ReviewBoard::new(api);
    load(&mut board, StatusFilter::All, json).await?;

    let result = board.apply_action(id, action).await;
    print_notice(board.notice(), json)?;
    result.with_context(|| format!("Failed to {action} request #{id}"))?;

    if !json {
        if let Some(record) = board.record(id) {
            print_record(record);
        }
    }
    Ok(())
}

fn print_notice(notice: Option<&Notice>, json: bool) -> Result<()> {
    let Some(notice) = notice else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(notice)?);
    } else if notice.is_error() {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
    Ok(())
}

fn print_board(board: &ReviewBoard, json: bool) -> Result<()> {
    if json {
        let output = BoardOutput {
            filter: board.filter().as_str(),
            stats: board.stats(),
            withdrawals: board.records(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_stats(board.stats());
    println!();

    if board.records().is_empty() {
        println!("No requests ({})", board.filter());
        return Ok(());
    }

    for record in board.records() {
        print_record(record);
    }
    Ok(())
}

fn print_stats(stats: WithdrawalStats) {
    println!(
        "Total: {}  Pending: {}  Completed: {}  Amount: {} ₽",
        stats.total, stats.pending, stats.completed, stats.total_amount
    );
}

fn print_record(record: &WithdrawalResponse) {
    let processed = record
        .processed_at
        .map(|at| at.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "#{:<5} {:<10} {:>8} ₽  {:<16} {:<14} created {}  processed {}",
        record.id,
        record.status,
        record.amount,
        record.phone_number,
        record.bank_name,
        record.created_at.format("%d.%m.%Y %H:%M"),
        processed,
    );
}
