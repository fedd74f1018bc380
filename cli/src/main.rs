use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ripvgm::{
    AnyExtraction, ContextConfig, CoreClient, Extraction, ExtractionContext,
    DEFAULT_EXTRACTOR_LIST,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Track or album page to extract
    #[arg(required_unless_present = "list_extractors")]
    url: Option<String>,

    /// Print the extraction as JSON
    #[arg(long)]
    json: bool,

    /// List the available extractors and exit
    #[arg(long)]
    list_extractors: bool,

    #[arg(long)]
    user_agent: Option<String>,

    /// Proxy for every request, overrides `http_proxy`
    #[arg(long)]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn context_config(&self) -> ContextConfig {
        let mut config = ContextConfig::from_env();
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        if let Some(proxy) = &self.proxy {
            config.proxy = Some(proxy.clone());
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,ripv=debug,ripvgm=debug,ripvgm_extractor_api=debug,ripvgm_extractor_khinsider=debug"
    } else {
        "warn,ripv=info,ripvgm_extractor_khinsider=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_recording(recording: &Extraction) {
    println!(
        "{} [{}]: {}",
        recording.title.as_deref().unwrap_or(&recording.id),
        recording.ext,
        recording.url
    );
}

fn print_summary(extraction: &AnyExtraction) {
    match extraction {
        AnyExtraction::Recording(recording) => print_recording(recording),
        AnyExtraction::List(list) => {
            println!("{} ({}, {} tracks)", list.title, list.id, list.entries.len());
            for recording in &list.entries {
                print!("  ");
                print_recording(recording);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_extractors {
        for extractor in DEFAULT_EXTRACTOR_LIST.iter() {
            println!("{}: {}", extractor.name(), extractor.description());
        }
        return Ok(());
    }

    let raw_url = args.url.as_deref().ok_or_else(|| anyhow!("no URL given"))?;
    let url = Url::parse(raw_url).with_context(|| format!("invalid URL: {raw_url}"))?;
    let client = CoreClient::with_host(ExtractionContext::with_config(args.context_config())?);

    info!("extracting {}", &url);
    let extraction = client
        .extract_url(&url)
        .await?
        .ok_or_else(|| anyhow!("no extractor matches {url}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        print_summary(&extraction);
    }

    Ok(())
}
