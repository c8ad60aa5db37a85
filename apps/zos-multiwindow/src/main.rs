//! Zero OS Multi-Window Demo
//!
//! Drives the presentation coordinator through the multi-window demo: a
//! primary window with toggles for a volumetric window and an immersive
//! space, followed by the app moving to the background.
//!
//! The host is the in-memory recorder, so the run prints the show/hide calls
//! a real presentation framework would receive.

use std::path::Path;
use std::sync::Arc;
use std::{env, fs, process};

use tracing::info;
use zos_presentation::{
    AppPhase, LifecycleCoordinator, RecordingHost, SurfaceKind, SurfaceManifest, SurfaceResult,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // tracing's `log` feature forwards events to env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let manifest = match args.get(1) {
        Some(path) => match load_manifest(Path::new(path)) {
            Ok(manifest) => manifest,
            Err(e) => {
                eprintln!("Error loading surface manifest {}: {}", path, e);
                process::exit(1);
            }
        },
        None => SurfaceManifest::demo(),
    };

    if let Err(e) = run(manifest).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_manifest(path: &Path) -> Result<SurfaceManifest, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    Ok(SurfaceManifest::from_json(&json)?)
}

async fn run(manifest: SurfaceManifest) -> SurfaceResult<()> {
    let host = Arc::new(RecordingHost::new());
    let registry = manifest.into_registry()?;
    let coordinator = LifecycleCoordinator::new(registry, host.clone());

    // Every non-primary surface gets a toggle in the primary window
    let toggles: Vec<(String, SurfaceKind)> = coordinator
        .registry()
        .iter()
        .filter(|descriptor| !descriptor.primary)
        .map(|descriptor| (descriptor.id.to_string(), descriptor.kind))
        .collect();

    for (id, kind) in &toggles {
        let disposition = coordinator.toggle(id).await?;
        info!(surface = %id, ?kind, ?disposition, "toggled on");
    }

    coordinator
        .on_app_phase_changed(AppPhase::Active, AppPhase::Inactive)
        .await;
    for (old, new) in [
        (AppPhase::Inactive, AppPhase::Background),
        (AppPhase::Background, AppPhase::Background),
    ] {
        let report = coordinator.on_app_phase_changed(old, new).await;
        info!(
            ?old,
            ?new,
            triggered = report.triggered,
            dismissed = report.dismissed.len(),
            "phase change handled"
        );
        if let Some(err) = report.failures.into_iter().next() {
            return Err(err);
        }
    }

    println!("Host calls:");
    for call in host.calls() {
        println!("  {:?} {} ({})", call.direction, call.id, call.kind.id());
    }
    println!();
    println!("Final state: {}", coordinator.snapshot().to_json()?);
    Ok(())
}
