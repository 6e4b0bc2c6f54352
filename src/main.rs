mod config;
mod library;
mod script;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tiling::engine::EditorSession;
use tiling::piece::PieceError;
use tiling::render::SvgScene;
use tracing::info;

use crate::config::{Cli, Command, RunArgs, Viewport, ViewportError};
use crate::library::PieceLibrary;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("piece `{name}`: {source}")]
    Piece { name: String, source: PieceError },
    #[error("piece `{0}` is listed twice")]
    DuplicatePiece(String),
    #[error("unknown piece `{0}`")]
    UnknownPiece(String),
    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let viewport: Viewport = cli.viewport.parse()?;

    let mut session = EditorSession::new(SvgScene::new());
    session.set_viewport(viewport.width, viewport.height);
    session.set_propagate(cli.propagate);
    PieceLibrary::load(&cli.pieces)?.install(&mut session)?;

    match cli.command {
        Command::Check => {
            run_check(&session);
            Ok(())
        }
        Command::Run(args) => run_script(&mut session, &args, viewport),
    }
}

fn run_check(session: &EditorSession<SvgScene>) {
    for piece in session.pieces() {
        let order = piece.len() / piece.canonical_len.max(1);
        println!(
            "{}\tpoints={}\tcanonical={}\tsymmetry={}\tdirection={:?}\tactive={}",
            piece.name,
            piece.len(),
            piece.canonical_len,
            order,
            piece.direction,
            piece.active
        );
    }
}

fn run_script(session: &mut EditorSession<SvgScene>, args: &RunArgs, viewport: Viewport) -> Result<(), CliError> {
    let events = script::load(&args.script)?;
    let export = |session: &EditorSession<SvgScene>| {
        write_file(&args.out, &session.surface().to_document(viewport.width, viewport.height))
    };

    let report = script::replay(session, &events, &export)?;
    export(&*session)?;

    if let Some(dump) = &args.dump {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        write_file(dump, &json)?;
    }

    info!(
        events = report.events,
        actions = report.actions,
        exports = report.exports,
        tiles = session.tiles().len(),
        out = %args.out.display(),
        "run complete"
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Io { path: path.to_owned(), source })
}
