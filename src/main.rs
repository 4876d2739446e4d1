use anyhow::Result;
use std::sync::Arc;
use sysgraph::config::{AppConfig, OutputMode};
use sysgraph::display::LayoutTracker;
use sysgraph::link_speed::{self, FixedProbe, LinkSpeedProbe};
use sysgraph::models::{Appearance, HostInfo, SystemSnapshot};
use sysgraph::sampler::Sampler;
use sysgraph::{terminal, version, worker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Commands typed on stdin, one per line.
enum Command {
    ToggleTheme,
    Quit,
}

fn spawn_stdin_commands() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let command = match line.trim() {
                "t" | "theme" => Command::ToggleTheme,
                "q" | "quit" => Command::Quit,
                other => {
                    tracing::debug!(input = other, "unknown command");
                    continue;
                }
            };
            if tx.send(command).await.is_err() {
                break;
            }
        }
    });
    rx
}

/// Formats the latest snapshot. The borrow ends before the caller prints.
fn frame(
    output: OutputMode,
    snapshot_rx: &mut watch::Receiver<SystemSnapshot>,
    host: &HostInfo,
    appearance: &Appearance,
    layout: &LayoutTracker,
) -> Option<String> {
    let snapshot = snapshot_rx.borrow_and_update();
    match terminal::render_frame(output, &snapshot, host, appearance.palette(), layout.mode()) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::warn!(error = %e, "snapshot serialization failed");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load()?;
    tracing::info!("{} starting", version::banner());

    let sampler = Arc::new(Sampler::new(app_config.sampler_config()));
    let host = sampler.host_info().await;

    let default_speed = app_config.network.max_speed_mbs;
    let probe: Box<dyn LinkSpeedProbe> = if app_config.network.detect_speed {
        link_speed::platform_probe()
    } else {
        Box::new(FixedProbe(default_speed))
    };
    let interfaces = sampler.interfaces().await;
    let max_network_speed = tokio::task::spawn_blocking(move || {
        link_speed::detect_max_speed(probe.as_ref(), &interfaces, default_speed)
    })
    .await
    .unwrap_or(default_speed);

    let (snapshot_tx, mut snapshot_rx) =
        worker::snapshot_channel(app_config.history.data_points, max_network_speed);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            source: sampler,
            snapshot_tx,
            shutdown_rx,
        },
        worker::WorkerConfig {
            sample_interval_ms: app_config.sampling.interval_ms,
        },
    );

    let output = app_config.display.output;
    let mut appearance = Appearance::new(app_config.display.dark_mode);
    let mut layout = LayoutTracker::new(app_config.display.compact_below);
    if let Some((w, h)) = terminal::terminal_size() {
        layout.observe(w, h);
    }

    let mut resize_tick = interval(Duration::from_millis(
        app_config.display.resize_check_interval_ms,
    ));
    resize_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut commands = spawn_stdin_commands();

    loop {
        tokio::select! {
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    tracing::warn!("Sampling worker stopped");
                    break;
                }
                if let Some(frame) = frame(output, &mut snapshot_rx, &host, &appearance, &layout) {
                    println!("{}", frame);
                }
            }
            _ = resize_tick.tick() => {
                if let Some((w, h)) = terminal::terminal_size()
                    && let Some(mode) = layout.observe(w, h)
                {
                    tracing::debug!(width = w, height = h, ?mode, "layout changed");
                }
            }
            Some(command) = commands.recv() => match command {
                Command::ToggleTheme => {
                    let dark = appearance.toggle();
                    tracing::info!(dark_mode = dark, "theme toggled");
                    if let Some(frame) = frame(output, &mut snapshot_rx, &host, &appearance, &layout) {
                        println!("{}", frame);
                    }
                }
                Command::Quit => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;
    Ok(())
}
