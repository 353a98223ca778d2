use clap::Parser;
use log::*;

use releasekeeper::{
    Result,
    cli::{Args, Command},
    forge::github::Github,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("releasekeeper")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    match cli_args.command {
        Command::ReleasePr(cmd) => {
            let remote = cmd.get_remote()?;
            let config = cmd.config(&remote).await?;
            let forge = Github::new(remote).await?;

            let outcome = releasekeeper::execute(&forge, config).await?;

            match outcome.pr_number() {
                Some(pr_number) => println!("{pr_number}"),
                None => debug!("nothing to do: {outcome:?}"),
            }
        }
    }

    Ok(())
}
