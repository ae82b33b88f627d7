use anyhow::Result;
use rover_cli::{RunnerSettings, TaskRunner, init_telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry("rover");

    let settings = RunnerSettings::from_env()?;
    let runner = TaskRunner::new(settings);

    let mut stdout = std::io::stdout();
    runner.run(&mut stdout).await?;

    Ok(())
}
