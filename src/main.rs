// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use synced_params::backends::memory::InMemoryStepEngine;
use synced_params::config::{load_and_validate_config, SyncConfig};
use synced_params::engine::{SyncStatus, SyncedParams};
use synced_params::params::{
    ChangeColumnDtypeParams, ColumnDtype, ConcatParams, GraphStyleParams, JoinType,
    SplitTextToColumnsParams, StepKind, StepParams, TransposeParams,
};
use tracing_subscriber::EnvFilter;

/// Simulated round trip to the step engine.
const ENGINE_LATENCY: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_files: Vec<String> = env::args().skip(1).collect();

    println!("🔁 Synced Params Demo");
    println!("═════════════════════");

    if config_files.is_empty() {
        println!("No config files given, using a built-in graph style config.");
        println!("Usage: synced-params-demo [config.yaml|config.toml ...]");
        let config = SyncConfig::new(StepKind::GraphStyle)
            .with_default(GraphStyleParams::titled(""))
            .with_debounce_ms(500);
        return run_demo("built-in", config).await;
    }

    for (i, config_file) in config_files.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(80));
        }
        let outcome = load_and_validate_config(config_file)
            .with_context(|| format!("loading {}", config_file));
        match outcome {
            Ok(config) => {
                if let Err(e) = run_demo(config_file, config).await {
                    eprintln!("❌ Demo for {} failed: {:#}", config_file, e);
                }
            }
            Err(e) => eprintln!("❌ {:#}", e),
        }
    }

    println!("\n🎉 Demo complete!");
    Ok(())
}

/// Walk one config through typing, a rejected edit, undo and redo.
async fn run_demo(name: &str, config: SyncConfig) -> Result<()> {
    let start_time = Instant::now();
    let kind = config.step_kind;
    let delay = config.debounce_delay();

    println!("📋 Configuration: {}", name);
    println!("🧩 Step type: {} (event {})", kind.step_type(), kind.edit_event_type());
    println!("⏳ Debounce: {:?}", delay);
    println!("🛡️  Stale responses: {:?}", config.stale_response_policy);

    let engine = Arc::new(InMemoryStepEngine::new().with_latency(ENGINE_LATENCY));
    let params = SyncedParams::new(config, engine.clone(), engine.as_ref())?;
    print_status("start", &params.status());

    // A burst of edits inside one quiet period becomes a single push.
    let drafts = sample_edits(kind);
    for draft in &drafts {
        params.set(draft.clone())?;
        tokio::time::sleep(delay / 4).await;
    }
    wait_for_push(delay).await;
    print_status("after burst", &params.status());
    println!("   Engine received {} edit(s) for {} change(s)", engine.edit_count(), drafts.len());

    // An edit the engine refuses keeps the previous step.
    if let Some(invalid) = invalid_edit(kind) {
        params.set(invalid)?;
        wait_for_push(delay).await;
        print_status("after rejected edit", &params.status());
    }

    if engine.undo() {
        wait_for_push(Duration::ZERO).await;
        print_status("after undo", &params.status());
        println!("   Params: {}", describe(params.params().as_ref()));
    }
    if engine.redo() {
        wait_for_push(Duration::ZERO).await;
        print_status("after redo", &params.status());
        println!("   Params: {}", describe(params.params().as_ref()));
    }

    params.dispose();
    println!("\n⏱️  Total Time: {:?}", start_time.elapsed());
    Ok(())
}

async fn wait_for_push(delay: Duration) {
    tokio::time::sleep(delay + ENGINE_LATENCY * 2).await;
}

fn print_status(label: &str, status: &SyncStatus) {
    let step = status
        .step_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("\n📊 {} [{:?}]", label, status.phase);
    println!("   Step: {}  Generation: {}  Loading: {}", step, status.generation, status.loading);
    if let Some(error) = &status.error {
        println!("   ⚠️  {}", error);
    }
}

fn describe(params: Option<&StepParams>) -> String {
    match params {
        Some(p) => serde_json::to_string(p).unwrap_or_else(|_| format!("{:?}", p)),
        None => "[uninitialized]".to_string(),
    }
}

/// A short run of valid edits for `kind`, as a user would make them.
fn sample_edits(kind: StepKind) -> Vec<StepParams> {
    match kind {
        StepKind::GraphStyle => ["R", "Re", "Rev", "Revenue"]
            .iter()
            .map(|t| GraphStyleParams::titled(*t).into())
            .collect(),
        StepKind::SplitTextToColumns => vec![
            SplitTextToColumnsParams {
                sheet_index: 0,
                column_id: "full_name".to_string(),
                delimiters: vec![" ".to_string()],
            }
            .into(),
            SplitTextToColumnsParams {
                sheet_index: 0,
                column_id: "full_name".to_string(),
                delimiters: vec![" ".to_string(), ",".to_string()],
            }
            .into(),
        ],
        StepKind::Concat => vec![
            ConcatParams {
                join: JoinType::Inner,
                ignore_index: false,
                sheet_indexes: vec![0],
            }
            .into(),
            ConcatParams {
                join: JoinType::Outer,
                ignore_index: true,
                sheet_indexes: vec![0, 1],
            }
            .into(),
        ],
        StepKind::ChangeColumnDtype => vec![ChangeColumnDtypeParams {
            sheet_index: 0,
            column_ids: vec!["amount".to_string()],
            new_dtype: ColumnDtype::Float,
        }
        .into()],
        StepKind::Transpose => vec![TransposeParams { sheet_index: 0 }.into()],
    }
}

/// An edit the in-memory engine rejects for `kind`, if it can reject any.
fn invalid_edit(kind: StepKind) -> Option<StepParams> {
    let params: StepParams = match kind {
        StepKind::GraphStyle => GraphStyleParams::titled("x".repeat(500)).into(),
        StepKind::SplitTextToColumns => SplitTextToColumnsParams::default().into(),
        StepKind::Concat => ConcatParams::default().into(),
        StepKind::ChangeColumnDtype => ChangeColumnDtypeParams::default().into(),
        StepKind::Transpose => return None,
    };
    Some(params)
}
