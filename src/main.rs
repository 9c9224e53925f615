use clap::Parser;
use scholar_pulse::cli::{Cli, Commands};
use scholar_pulse::config::Config;
use scholar_pulse::progress::with_loading_messages;
use scholar_pulse::render::render;
use scholar_pulse::{interactive, paper, workflow, Analyzer, GeminiClient};
use scholar_pulse_common::status::APP_NAME;
use scholar_pulse_common::types::format_size;
use scholar_pulse_common::{catalog, SectionSet, Session};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

fn init_tracing(verbose: bool) {
    // RUST_LOG があればそちらを優先
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    // 壊れた設定でも sections / config で修復できるようにする
    let mut config = Config::load_or_default();

    match cli.command {
        Commands::Analyze { file, sections, format, strict, model } => {
            if let Some(model) = model {
                config.model = model;
            }
            let selection: SectionSet = if sections.is_empty() {
                SectionSet::all()
            } else {
                sections.into_iter().collect()
            };
            let analyzer = Analyzer::new(GeminiClient::from_config(&config))
                .strict_sections(strict || config.strict_sections);

            // 進行表示は stderr（stdout はレポート専用）
            eprintln!("📄 {} - paper analysis\n", APP_NAME);

            eprintln!("[1/3] Loading paper...");
            let paper = paper::open_paper(&file).await?;
            let name = paper.name.clone();
            eprintln!("✔ {} ({})\n", name, format_size(paper.size));
            if paper.exceeds_recommended_size() {
                eprintln!("⚠ The file is larger than 20MB; the service may reject it.\n");
            }

            let mut session = Session::new();
            session.select_file(paper)?;
            workflow::apply_selection(&mut session, &selection)?;

            eprintln!("[2/3] Generating analysis ({})...", selection.joined());
            with_loading_messages(workflow::generate(&mut session, &analyzer)).await?;
            eprintln!("✔ Analysis complete\n");

            eprintln!("[3/3] Rendering report ({})...\n", format);
            if let Some(result) = session.result() {
                println!("{}", render(result, &name, format)?);
            }
        }

        Commands::Interactive { file } => {
            let analyzer = Analyzer::new(GeminiClient::from_config(&config))
                .strict_sections(config.strict_sections);
            interactive::run_interactive(file.as_deref(), &analyzer).await?;
        }

        Commands::Sections => {
            println!("{:<24} {:<28} DESCRIPTION", "ID", "LABEL");
            for spec in catalog() {
                println!("{:<24} {:<28} {}", spec.id.as_str(), spec.label, spec.description);
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(model) = set_model {
                config.model = model;
                config.save()?;
                println!("✔ Default model set to {}", config.model);
            }

            if show {
                println!("Config file: {}", Config::config_path()?.display());
                match config.api_key_source() {
                    Some(source) => println!("API key: configured ({})", source),
                    None => println!("API key: not set"),
                }
                println!("Model: {}", config.model);
                println!("Base URL: {}", config.base_url);
                println!("Strict sections: {}", config.strict_sections);
            }
        }
    }

    Ok(())
}
