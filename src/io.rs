use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use crate::beaker::Beaker;
use crate::beers_law::BeersLawModel;
use crate::config::LabConfig;
use crate::emitters::{Dropper, Evaporator, Faucet, Shaker};
use crate::error::{LabError, Result};
use crate::meter::ConcentrationMeter;
use crate::particles::{Precipitate, ShakerParticles};
use crate::simulation::{ConcentrationModel, SoluteForm};
use crate::solution::Solution;

/// Everything needed to resume a session exactly, including the RNG
/// position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub config: LabConfig,
    pub solution: Solution,
    pub solute_form: SoluteForm,
    pub shaker: Shaker,
    pub dropper: Dropper,
    pub solvent_faucet: Faucet,
    pub drain_faucet: Faucet,
    pub evaporator: Evaporator,
    #[serde(default)]
    pub shaker_particles: ShakerParticles,
    #[serde(default)]
    pub precipitate: Precipitate,
    #[serde(default)]
    pub meter: ConcentrationMeter,
    pub beers_law: BeersLawModel,
    pub rng_seed: u64,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub frame: u64,
}

impl ModelState {
    pub fn from_model(model: &ConcentrationModel) -> Self {
        Self {
            config: model.config.clone(),
            solution: model.solution.clone(),
            solute_form: model.solute_form,
            shaker: model.shaker.clone(),
            dropper: model.dropper.clone(),
            solvent_faucet: model.solvent_faucet.clone(),
            drain_faucet: model.drain_faucet.clone(),
            evaporator: model.evaporator.clone(),
            shaker_particles: model.shaker_particles.clone(),
            precipitate: model.precipitate.clone(),
            meter: model.meter.clone(),
            beers_law: model.beers_law.clone(),
            rng_seed: model.rng.get_seed(),
            time: model.time,
            frame: model.frame,
        }
    }

    /// Replace the model's state. Fails without touching the model if the
    /// saved configuration or solution is inconsistent.
    pub fn apply_to(self, model: &mut ConcentrationModel) -> Result<()> {
        self.config.validate()?;
        let volume = self.solution.volume();
        if !(0.0..=self.config.beaker_capacity).contains(&volume) || self.solution.solute_amount() < 0.0 {
            return Err(LabError::invalid(format!("saved solution out of range: {volume} L")));
        }

        model.beaker = Beaker::from_config(&self.config);
        model.config = self.config;
        model.solution = self.solution;
        model.solute_form = self.solute_form;
        model.shaker = self.shaker;
        model.dropper = self.dropper;
        model.solvent_faucet = self.solvent_faucet;
        model.drain_faucet = self.drain_faucet;
        model.evaporator = self.evaporator;
        model.shaker_particles = self.shaker_particles;
        model.precipitate = self.precipitate;
        model.meter = self.meter;
        model.beers_law = self.beers_law;
        model.beers_law.path_length = model.beaker.path_length;
        model.rng = fastrand::Rng::with_seed(self.rng_seed);
        model.time = self.time;
        model.frame = self.frame;
        model.events.clear();

        model.update_enabled_states();
        model.refresh_meter();
        info!("restored state at frame {}", model.frame);
        Ok(())
    }
}

impl ConcentrationModel {
    pub fn state(&self) -> ModelState {
        ModelState::from_model(self)
    }

    pub fn set_state(&mut self, state: ModelState) -> Result<()> {
        state.apply_to(self)
    }
}

/// Write `model` as JSON, gzip-compressed when the path ends in `.gz`.
pub fn save_state<P: AsRef<Path>>(path: P, model: &ConcentrationModel) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let state = ModelState::from_model(model);
    let use_gzip = path.extension().map_or(false, |e| e == "gz");

    // Write to a temporary file first so an interrupted save keeps the old file
    let tmp_path = path.with_extension({
        let mut os = path.extension().map(|e| e.to_os_string()).unwrap_or_default();
        os.push(".tmp");
        os
    });
    {
        let file = std::fs::File::create(&tmp_path)?;
        let writer = BufWriter::new(file);
        if use_gzip {
            let mut encoder = GzEncoder::new(writer, Compression::fast());
            serde_json::to_writer(&mut encoder, &state)?;
            let mut writer = encoder.finish()?;
            writer.flush()?;
        } else {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &state)?;
            writer.flush()?;
        }
    }
    std::fs::rename(&tmp_path, path)?;
    info!("saved state at frame {} to {}", model.frame, path.display());
    Ok(())
}

/// Read a state written by [`save_state`]. Compression is detected from
/// the content, not the file name.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<ModelState> {
    let data = std::fs::read(path.as_ref())?;
    let state = match maybe_decompress_gzip(&data)? {
        Some(decoded) => serde_json::from_slice(&decoded)?,
        None => serde_json::from_slice(&data)?,
    };
    Ok(state)
}

fn maybe_decompress_gzip(data: &[u8]) -> std::io::Result<Option<Vec<u8>>> {
    if data.len() < 2 || data[0] != 0x1f || data[1] != 0x8b {
        return Ok(None);
    }

    let mut decoder = GzDecoder::new(Cursor::new(data));
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(Some(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LabCommand;

    fn busy_model() -> ConcentrationModel {
        let mut model = ConcentrationModel::new();
        model.apply(LabCommand::SetShakerDispensing(true)).unwrap();
        for _ in 0..30 {
            model.step(0.05);
        }
        model
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("beers_law_lab_{}_{name}", std::process::id()))
    }

    #[test]
    fn restored_model_continues_identically() {
        let mut original = busy_model();
        let mut restored = ConcentrationModel::new();
        restored.set_state(original.state()).unwrap();
        assert_eq!(restored.state(), original.state());

        for _ in 0..20 {
            original.step(0.05);
            restored.step(0.05);
        }
        assert_eq!(restored.state(), original.state());
    }

    #[test]
    fn save_and_load_plain_and_gzip() {
        let model = busy_model();
        for name in ["state.json", "state.json.gz"] {
            let path = temp_path(name);
            save_state(&path, &model).unwrap();
            let loaded = load_state(&path).unwrap();
            assert_eq!(loaded, model.state());
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn gzip_is_detected_by_content() {
        let bytes = b"\x1f\x8bnot really gzip";
        assert!(maybe_decompress_gzip(bytes).is_err());
        assert!(maybe_decompress_gzip(b"{}").unwrap().is_none());
    }

    #[test]
    fn restored_detector_path_follows_the_beaker() {
        let mut model = ConcentrationModel::new();
        let mut state = model.state();
        state.beers_law.path_length = 7.0;
        model.set_state(state).unwrap();
        assert_eq!(model.beers_law().path_length, model.beaker().path_length);
    }

    #[test]
    fn inconsistent_state_is_rejected() {
        let mut model = ConcentrationModel::new();
        let mut state = model.state();
        state.config.initial_solute = "unobtainium".into();
        assert!(model.set_state(state).is_err());
        assert_eq!(model.state(), ConcentrationModel::new().state());
    }
}
