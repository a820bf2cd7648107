use clap::Parser;

#[derive(Parser)]
#[command(name = "storewatch")]
#[command(
    version,
    about = "Check app store listings once and announce new versions"
)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(storewatch::run())
}
