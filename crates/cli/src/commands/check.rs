use thingsctl_config::Config;
use thingsctl_task::ThingsService;

pub async fn execute(config: &Config) -> eyre::Result<()> {
    let service = ThingsService::from_config(config);

    if service.check_availability().await {
        println!("Things is running and reachable");
        Ok(())
    } else {
        eyre::bail!(
            "Things is not available (probe `{}` did not report `{}`)",
            config.probe.command,
            config.probe.process_name
        )
    }
}
