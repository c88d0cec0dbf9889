use ip_registration_portal::infra::evm::format_address;
use ip_registration_portal::{telemetry, JsonRpcWallet, PinataClient, Settings, WalletSession};
use tracing::{info, warn};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           PINATA_JWT, EVM_RPC_URL, CONTRACT_ADDRESS\n\
         Optional:\n\
           PINATA_API_URL, WALLET_ADDRESS, EXPLORER_BASE_URL, FORM_VARIANT\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let settings = Settings::from_env()?;

    info!("> Preflight:");
    info!("  PINATA_API_URL={}", settings.pinata_api_url);
    info!("  EVM_RPC_URL={}", settings.evm_rpc_url);
    info!("  CONTRACT_ADDRESS={}", format_address(&settings.contract_address));
    info!("  FORM_VARIANT={}", settings.form_variant);
    info!("  EXPLORER_BASE_URL={}", settings.explorer_base_url);

    // Pinning credential
    let pinata = PinataClient::from_settings(&settings);
    let message = pinata
        .test_authentication()
        .await
        .map_err(|e| anyhow::anyhow!("Pinata authentication failed: {}", e))?;
    info!("  Pinata: {}", message);

    // Basic RPC connectivity
    let wallet = JsonRpcWallet::from_settings(&settings);
    let version = wallet.client_version().await?;
    let chain_id = wallet.chain_id().await?;
    info!("  RPC client: {} (chain id {})", version, chain_id);

    // Connected account
    match wallet.connected_address().await? {
        Some(account) => info!("  Account: {}", format_address(&account)),
        None => {
            return Err(anyhow::anyhow!(
                "Provider exposes no account. Unlock one on the signer or set WALLET_ADDRESS."
            ))
        }
    }

    // Contract deployed
    let code = wallet.code_at(settings.contract_address).await?;
    if code.trim_start_matches("0x").is_empty() {
        return Err(anyhow::anyhow!(
            "No contract code at {} on chain {}",
            format_address(&settings.contract_address),
            chain_id
        ));
    }
    info!("  Contract code present ({} bytes).", (code.len().saturating_sub(2)) / 2);

    let function = settings.form_variant.register_function();
    info!("  Registration call: {}", function.signature());
    if settings.wallet_address.is_some() {
        warn!("  WALLET_ADDRESS is set; the signer behind EVM_RPC_URL must control it.");
    }

    info!("> Preflight OK.");
    Ok(())
}
