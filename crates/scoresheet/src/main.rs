//! `vbrsheet` - CLI for vbr-scoresheet
//!
//! Renders score sheets from match snapshots and manages the licences and
//! signatures printed on them.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::info;

use vbr_scoresheet::cli::actions::{self, WriteOutcome};
use vbr_scoresheet::cli::{
    Cli, Command, ConfigCommand, FilenameCommand, LicenceCommand, RenderCommand, SignCommand,
};
use vbr_scoresheet::scoresheet::{LicenceRole, Signature, SignatureRole};
use vbr_scoresheet::{
    init_logging, score_sheet_filename, Config, ScoreSheetBuilder, Storage, StoredGame,
    StoredGameView,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Render(cmd) => handle_render(&config, cmd),
        Command::Filename(cmd) => handle_filename(&config, &cmd),
        Command::Licence(cmd) => handle_licence(&config, cmd),
        Command::Sign(cmd) => handle_sign(&config, cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("failed to open store at {}", path.display()))
}

fn load_game(path: &std::path::Path) -> anyhow::Result<StoredGame> {
    StoredGame::load(path).with_context(|| format!("failed to load snapshot {}", path.display()))
}

fn handle_render(config: &Config, cmd: RenderCommand) -> anyhow::Result<()> {
    let game = load_game(&cmd.snapshot)?;
    let storage = open_storage(config)?;

    let logo = cmd
        .logo
        .as_deref()
        .map(actions::encode_image)
        .transpose()
        .context("failed to read logo")?;
    let remarks = actions::read_remarks(cmd.remarks, cmd.remarks_file.as_deref())
        .context("failed to read remarks")?;
    let options = actions::stored_options(&storage, game.id())?
        .with_logo(logo)
        .with_remarks(remarks);

    let sheet = ScoreSheetBuilder::with_settings(&game, config.render_settings())
        .options(options)
        .build();

    if cmd.stdout {
        print!("{}", sheet.content);
        return Ok(());
    }

    let dir = cmd.output.unwrap_or_else(|| config.output_dir());
    match actions::write_sheet(&dir, &sheet)? {
        WriteOutcome::Written(path) => {
            info!("Rendered game {}", game.id());
            println!("{}", path.display());
        }
        WriteOutcome::Unchanged(path) => println!("{} (unchanged)", path.display()),
    }
    Ok(())
}

fn handle_filename(config: &Config, cmd: &FilenameCommand) -> anyhow::Result<()> {
    let game = load_game(&cmd.snapshot)?;
    println!("{}", score_sheet_filename(&game, &config.render_settings()));
    Ok(())
}

fn handle_licence(config: &Config, cmd: LicenceCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    match cmd {
        LicenceCommand::Set { game, role, value } => {
            let role = LicenceRole::from(role);
            storage.set_licence(&game, role, &value)?;
            println!("{game}: {role} = {value}");
        }
        LicenceCommand::Show { game, json } => {
            let licences = storage.licences(&game)?;
            let signatures = storage.signatures(&game)?;
            if json {
                let names: serde_json::Map<String, serde_json::Value> = signatures
                    .iter()
                    .map(|(role, sig)| (role.key().to_string(), sig.name.clone().into()))
                    .collect();
                let doc = serde_json::json!({
                    "game": game,
                    "licences": licences,
                    "signatures": names,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("Game {game}");
                println!();
                println!("[Licences]");
                for role in LicenceRole::ALL {
                    println!("  {:<12} {}", role.key(), licences.display(role));
                }
                println!();
                println!("[Signatures]");
                for role in SignatureRole::ALL {
                    let signed = match signatures.get(role) {
                        Some(sig) if sig.image.is_some() => format!("{} (signed)", sig.name),
                        Some(sig) => sig.name.clone(),
                        None => "-".to_string(),
                    };
                    println!("  {:<12} {}", role.key(), signed);
                }
            }
        }
        LicenceCommand::Clear { game } => {
            let removed = storage.clear_game(&game)?;
            println!("Removed {removed} entries for {game}");
        }
    }
    Ok(())
}

fn handle_sign(config: &Config, cmd: SignCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let image = cmd
        .image
        .as_deref()
        .map(actions::encode_image)
        .transpose()
        .context("failed to read signature image")?;
    let role = SignatureRole::from(cmd.role);
    storage.set_signature(&cmd.game, role, &Signature::new(cmd.name, image))?;
    println!("{}: {role} signed", cmd.game);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let render = &config.render;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Render]");
                println!("  Output dir:         {}", config.output_dir().display());
                println!("  UTC offset (min):   {}", render.utc_offset_minutes);
                println!("  Date format:        {}", render.date_format);
                println!("  Time format:        {}", render.time_format);
                println!("  Background:         {}", render.background_color);
                println!("  On background:      {}", render.on_background_color);
                println!("  Duplicate color:    {}", render.duplicate_color);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
