use armory_cli::{Config, Driver, Outcome, script};

fn main() -> anyhow::Result<()> {
    armory_observability::init();

    let config = Config::parse_args();
    tracing::info!(capacity = config.capacity, script = ?config.script, "starting armory");

    let stdout = std::io::stdout();
    let mut driver = Driver::from_config(&config, stdout.lock())?;

    match &config.script {
        Some(path) => {
            let steps = script::load(path)?;
            let outcomes = driver.run_script(&steps)?;
            let rejected = outcomes
                .iter()
                .filter(|o| matches!(o, Outcome::Rejected(_)))
                .count();
            tracing::info!(steps = outcomes.len(), rejected, "script finished");
        }
        None => driver.run_interactive(std::io::stdin().lock())?,
    }

    Ok(())
}
