pub mod cli;
pub mod error;
pub mod model;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches};
use tracing::{info, warn};

use cli::Action;
use model::ChunkTable;
use writer::igrab::IGrabOptions;

pub fn run() -> anyhow::Result<()> {
    let matches = cli::Cli::command().get_matches();
    let args = cli::Cli::from_arg_matches(&matches)?;
    let actions = cli::ordered_actions(&matches);

    // 1. ── Parse + allocate ───────────────────────────────────────────
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Reading {}", args.script.display()))?;
    let table = processor::run(&script)
        .with_context(|| format!("Parsing {}", args.script.display()))?;
    info!(
        chunks = table.total_chunks(),
        lumps = table.lumps().len(),
        "allocated chunk table"
    );

    // 2. ── Write outputs ──────────────────────────────────────────────
    if actions.is_empty() {
        warn!("no outputs requested");
    }
    execute(&table, &actions)
}

/// Run `actions` in order against one table. IGRAB options set by an action
/// apply to the IGRAB outputs after it.
pub fn execute(table: &ChunkTable, actions: &[Action]) -> anyhow::Result<()> {
    let mut igrab = IGrabOptions::default();

    for action in actions {
        match action {
            Action::SetIGrabVersion(version) => igrab.version = *version,
            Action::EnableUnderscoreSeparator => igrab.underscore_separator = true,
            Action::GfxInfo(path) => {
                writer::gfxinfo::emit(table, path)
                    .with_context(|| format!("Writing GFXINFOE {}", path.display()))?;
                info!(path = %path.display(), "wrote GFXINFOE");
            }
            Action::ModId(path) => {
                writer::modid::emit(table, path)
                    .with_context(|| format!("Writing modId script {}", path.display()))?;
                info!(path = %path.display(), "wrote modId script");
            }
            Action::Omnispeak(path) => {
                writer::omnispeak::emit(table, path)
                    .with_context(|| format!("Writing Omnispeak variables {}", path.display()))?;
                info!(path = %path.display(), "wrote Omnispeak variables");
            }
            Action::IGrabHeader(path) => {
                writer::c::emit(table, &igrab, path)
                    .with_context(|| format!("Writing IGRAB header {}", path.display()))?;
                info!(path = %path.display(), version = %igrab.version, "wrote IGRAB header");
            }
            Action::IGrabAsm(path) => {
                writer::asm::emit(table, &igrab, path)
                    .with_context(|| format!("Writing IGRAB asm header {}", path.display()))?;
                info!(path = %path.display(), version = %igrab.version, "wrote IGRAB asm header");
            }
            Action::Json(path) => {
                writer::json::emit(table, path)
                    .with_context(|| format!("Writing chunk table {}", path.display()))?;
                info!(path = %path.display(), "wrote chunk table JSON");
            }
        }
    }

    Ok(())
}
