use beers_law_lab::config::LabConfig;
use beers_law_lab::{io, ConcentrationModel, LabCommand, LabEvent, Result};
use log::{info, warn};
use ultraviolet::Vec2;

const FRAME_DT: f64 = 1.0 / 60.0;

fn run_for(model: &mut ConcentrationModel, seconds: f64) {
    let frames = (seconds / FRAME_DT).round() as usize;
    for _ in 0..frames {
        model.step(FRAME_DT);
        for event in model.take_events() {
            match event {
                LabEvent::GrainsDissolved { .. } => {}
                other => info!("t={:.2}s {:?}", model.time(), other),
            }
        }
    }
    let snap = model.snapshot();
    info!(
        "t={:.2}s volume={:.3} L amount={:.3} mol c={:.3} mol/L meter={:?}",
        snap.time, snap.volume, snap.solute_amount, snap.concentration, snap.meter_value
    );
}

fn apply(model: &mut ConcentrationModel, cmd: LabCommand) {
    if let Err(e) = model.apply(cmd) {
        warn!("{e}");
    }
}

// Usage: beers_law_lab [config.toml] [state-out.json[.gz]]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            info!("loading config from {path}");
            LabConfig::load(&path)?
        }
        None => LabConfig::default(),
    };
    let mut model = ConcentrationModel::with_config(config)?;
    info!(
        "{} in {:.3} L, saturates at {:.2} mol/L",
        model.solution().solute(),
        model.solution().volume(),
        model.solution().solute().saturated_concentration()
    );

    // Shake solid solute in until it precipitates, then dilute, evaporate and drain.
    apply(&mut model, LabCommand::MoveProbe(Vec2::new(0.0, 40.0)));
    apply(&mut model, LabCommand::SetShakerDispensing(true));
    run_for(&mut model, 20.0);
    apply(&mut model, LabCommand::SetShakerDispensing(false));
    run_for(&mut model, 3.0);
    info!(
        "after shaking: {:.3} mol, {:.3} mol/L, precipitate {:.3} mol",
        model.solution().solute_amount(),
        model.solution().concentration(),
        model.solution().precipitate_amount()
    );

    apply(&mut model, LabCommand::SetSolventFaucet { open: true, flow_rate: 0.2 });
    run_for(&mut model, 3.0);
    apply(&mut model, LabCommand::SetEvaporationRate(0.25));
    run_for(&mut model, 1.0);
    apply(&mut model, LabCommand::SetEvaporationRate(0.0));
    apply(&mut model, LabCommand::SetDrainFaucet { open: true, flow_rate: 0.1 });
    run_for(&mut model, 2.0);
    apply(&mut model, LabCommand::SetDrainFaucet { open: false, flow_rate: 0.0 });

    let snapshot = model.snapshot();
    if let Some(reading) = snapshot.detector {
        info!(
            "detector at {:.0} nm: A={:.3} T={:.3}",
            reading.wavelength, reading.absorbance, reading.transmittance
        );
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(path) = args.next() {
        io::save_state(&path, &model)?;
    }
    Ok(())
}
