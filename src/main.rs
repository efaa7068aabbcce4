use clap::Parser;
use project_deploy::core::report;
use project_deploy::utils::logger;
use project_deploy::utils::validation::endpoint_host;
use project_deploy::{
    CliConfig, DeployEngine, DeployError, JsonRpcClient, LocalStorage, Settings,
    VerificationCommand,
};

#[tokio::main]
async fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // --help and --version land here too and are not failures
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.json_logs);

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Deployment failed: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("{:?}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run(config: &CliConfig) -> Result<(), DeployError> {
    let Settings {
        rpc_url,
        request_timeout,
        plan,
    } = config.load()?;
    tracing::info!("🔧 Network: {} ({})", plan.network, endpoint_host(&rpc_url));

    let client = JsonRpcClient::new(rpc_url, request_timeout)?;
    let storage = LocalStorage::new(".".to_string());
    let engine = DeployEngine::new(client, storage);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no transaction will be sent");
        let summary = engine.dry_run(&plan).await?;
        println!("Contract: {}", summary.contract);
        println!("Network: {}", plan.network);
        println!("Constructor arguments: {}", summary.args.join(" "));
        println!("Deployment data: {} bytes", summary.deployment_data_len);
        return Ok(());
    }

    let deployment = engine.run(&plan).await?;
    let command = VerificationCommand::for_deployment(&deployment);

    let mut stdout = std::io::stdout().lock();
    report::write_summary(&mut stdout, &deployment, &command)?;

    Ok(())
}
