use clap::{Parser, Subcommand};
use duetshot::{
    catalog,
    logger::{self, LogLevel, LoggerConfig},
    AspectRatio, Config, EnvKeyProvider, GeminiImageClient, KeyProvider, PhotoshootGenerator,
    PhotoshootSession, ReferenceImage, SessionStatus, SubjectRole,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "duetshot", version, about = "AI couple photoshoots from two face photos")]
struct Cli {
    /// Log debug output.
    #[arg(long, global = true)]
    verbose: bool,
    /// Also append log lines to this file.
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in themes.
    Themes,
    /// Print the prompts of one theme.
    Prompts {
        #[arg(long, default_value_t = 1)]
        theme: u32,
    },
    /// Generate a photoshoot and save the images.
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Photo of the first subject.
    #[arg(long)]
    first: PathBuf,
    /// Photo of the second subject.
    #[arg(long)]
    second: PathBuf,
    #[arg(long, default_value_t = 1)]
    theme: u32,
    #[arg(long, default_value = "1:1")]
    aspect_ratio: AspectRatio,
    /// Output directory; defaults to DUETSHOT_OUTPUT_DIR or the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Save one zip archive instead of individual files.
    #[arg(long)]
    zip: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_loaded = dotenv::dotenv().is_ok();
    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    let mut log_config = LoggerConfig::new()
        .with_level(level)
        .with_json_output(cli.json_logs);
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file_output(path);
    }
    if let Err(e) = logger::init_with_config(log_config) {
        eprintln!("{}", e);
    }
    if !env_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let result = match cli.command {
        Command::Themes => {
            list_themes();
            Ok(())
        }
        Command::Prompts { theme } => list_prompts(theme),
        Command::Generate(args) => generate(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn list_themes() {
    for theme in catalog::themes() {
        println!("{:>2}  {}", theme.id, theme.name);
        println!("    {}", theme.description);
    }
    let ratios: Vec<String> = AspectRatio::ALL.iter().map(|r| r.display_name()).collect();
    println!("\nAspect ratios: {}", ratios.join(", "));
}

fn list_prompts(theme_id: u32) -> duetshot::Result<()> {
    let theme = catalog::find(theme_id).ok_or_else(|| {
        duetshot::PhotoshootError::InvalidInput(format!("unknown theme id: {}", theme_id))
    })?;
    println!("{}", theme.name);
    for (index, prompt) in theme.prompts.iter().enumerate() {
        println!("{:>2}. {}", index + 1, prompt);
    }
    Ok(())
}

async fn generate(args: GenerateArgs) -> duetshot::Result<()> {
    let mut config = Config::from_env();
    if let Some(out) = args.out {
        config = config.with_output_dir(out);
    }
    logger::log_config_info(&config);

    // The client copies the key at construction, so selection happens first.
    let keys = Arc::new(EnvKeyProvider::new(config.gemini.api_key.clone()));
    if !keys.has_key() {
        keys.select_key().await?;
    }
    let gemini = config.gemini.clone().with_api_key(keys.key().unwrap_or_default());

    let generator = PhotoshootGenerator::new(GeminiImageClient::new(gemini)?)
        .with_config(config.generation.clone())
        .with_key_provider(keys);

    let mut session = PhotoshootSession::new();
    for (role, path) in [(SubjectRole::First, &args.first), (SubjectRole::Second, &args.second)] {
        let image = ReferenceImage::load(path)?;
        log::info!("Loaded {} photo ({})", role.label(), image.mime_type());
        session.set_reference(role, Some(image));
    }
    session.select_theme(args.theme)?;
    session.set_aspect_ratio(args.aspect_ratio);

    println!("Your photoshoot is being created...");
    if let SessionStatus::Failed(message) = session.run(&generator).await {
        return Err(duetshot::PhotoshootError::ResponseError(message.clone()));
    }

    if args.zip {
        let path = session.download_all(&config.output_dir)?;
        println!("{}", path.display());
    } else {
        for index in 0..session.results().len() {
            let path = session.download(index, &config.output_dir)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
