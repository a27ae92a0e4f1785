use anyhow::Context;
use edmkit::{demo, init_logging, Config, VERSION};
use std::path::PathBuf;
use tracing::{debug, info};

fn load_config() -> anyhow::Result<Config> {
    let (path, explicit) = match std::env::var_os("EDMKIT_CONFIG") {
        Some(path) => (PathBuf::from(path), true),
        None => match Config::default_path() {
            Ok(path) => (path, false),
            Err(_) => return Ok(Config::default()),
        },
    };

    if !explicit && !path.exists() {
        return Ok(Config::default());
    }

    Config::load_from_file(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_logging(&config.logging.level)?;
    info!(version = VERSION, build_date = edmkit::BUILD_DATE, "edmkit demo");

    let builder = demo::touch_then_mill(config.interpreter)?;

    for record in builder.command_list().iter().take(16) {
        debug!("{}", record);
    }
    info!("{}", builder.summary());

    let json = edmkit::to_json_string(builder.command_list(), config.output.pretty)?;
    println!("{}", json);

    Ok(())
}
