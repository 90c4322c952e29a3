//! Config command - show and change engine defaults.

use anyhow::Result;
use haltctl_core::{ConfigStore, StopSignal, StopTimeout};

pub async fn show(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file:        {}", store.path().display());
    println!(
        "Stop timeout:       {}",
        StopTimeout::from_secs(config.default_stop_timeout)
    );
    println!("Stop signal:        {}", config.default_stop_signal);
    println!("Kill wait:          {:?}", config.kill_wait());
    Ok(())
}

pub async fn set_timeout(seconds: i64) -> Result<()> {
    ConfigStore::new()?.set_default_stop_timeout(seconds).await?;
    println!(
        "Default stop timeout set to {}",
        StopTimeout::from_secs(seconds)
    );
    Ok(())
}

pub async fn set_signal(signal: StopSignal) -> Result<()> {
    ConfigStore::new()?.set_default_stop_signal(signal).await?;
    println!("Default stop signal set to {}", signal);
    Ok(())
}

pub async fn set_kill_wait(seconds: u64) -> Result<()> {
    ConfigStore::new()?.set_kill_wait_seconds(seconds).await?;
    println!("Kill wait set to {}s", seconds);
    Ok(())
}
