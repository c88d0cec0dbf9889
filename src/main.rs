//! Command-line registration: pins a file from disk and registers it on-chain.
//!
//! Reads the same environment as `api_server` (see `preflight --help`).

use clap::Parser;
use ip_registration_portal::{
    telemetry, FileUpload, FormVariant, RegistrationInput, RegistrationService, Settings,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ip-register", about = "Register a file as IP on-chain", version)]
struct Cli {
    /// File to pin (`~` is expanded)
    file: String,

    #[arg(short, long, default_value = "")]
    description: String,

    /// Allow commercial use
    #[arg(long)]
    commercial_use: bool,

    /// Allow derivative works
    #[arg(long)]
    derivatives: bool,

    /// License expiry, YYYY-MM-DD (standard form)
    #[arg(long)]
    expiry: Option<String>,

    #[arg(long, default_value = "")]
    location: String,

    #[arg(long, default_value = "")]
    custodial_community: String,

    #[arg(long, default_value = "")]
    distribution_region: String,

    #[arg(long, default_value = "")]
    species: String,

    /// Override FORM_VARIANT (standard | heritage)
    #[arg(long)]
    variant: Option<FormVariant>,
}

fn read_file(raw: &str) -> anyhow::Result<FileUpload> {
    let path = PathBuf::from(shellexpand::tilde(raw).to_string());
    let bytes = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow::anyhow!("{} has no file name", path.display()))?;
    Ok(FileUpload::new(name, bytes))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let mut service = RegistrationService::from_settings(&settings);
    if let Some(variant) = cli.variant {
        service = service.with_variant(variant);
    }

    let input = RegistrationInput {
        file: Some(read_file(&cli.file)?),
        description: cli.description,
        commercial_use_allowed: cli.commercial_use,
        derivatives_allowed: cli.derivatives,
        expiry: cli.expiry,
        location: cli.location,
        custodial_community: cli.custodial_community,
        distribution_region: cli.distribution_region,
        species: cli.species,
    };

    let mut form = service.new_form();
    let receipt = form.submit(input).await?;

    println!("Transaction submitted: {}", receipt.transaction.hash);
    println!("  {}", receipt.transaction.explorer_url);
    println!("Image:    {}", receipt.image_uri);
    println!("Metadata: {}", receipt.token_uri);
    println!("{}", receipt.summary);
    Ok(())
}
