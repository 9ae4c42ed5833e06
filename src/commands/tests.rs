use super::*;
use crate::error::LabError;
use crate::simulation::ConcentrationModel;
use approx::assert_relative_eq;

#[test]
fn shaker_and_dropper_follow_solute_form() {
    let mut model = ConcentrationModel::new();
    assert!(matches!(
        model.apply(LabCommand::SetDropperDispensing(true)),
        Err(LabError::InvalidCommand(_))
    ));
    model.apply(LabCommand::SetShakerDispensing(true)).unwrap();
    assert!(model.shaker().is_dispensing());

    model.apply(LabCommand::SetSoluteForm(SoluteForm::Solution)).unwrap();
    assert!(!model.shaker().is_dispensing());
    assert!(matches!(
        model.apply(LabCommand::SetShakerDispensing(true)),
        Err(LabError::InvalidCommand(_))
    ));
    model.apply(LabCommand::SetDropperDispensing(true)).unwrap();

    model.apply(LabCommand::SetSoluteForm(SoluteForm::Solid)).unwrap();
    assert!(!model.dropper().is_dispensing());
}

#[test]
fn out_of_range_rates_leave_model_untouched() {
    let mut model = ConcentrationModel::new();
    model.apply(LabCommand::SetDrainFaucet { open: true, flow_rate: 0.1 }).unwrap();
    let before = model.state();

    assert!(matches!(
        model.apply(LabCommand::SetDrainFaucet { open: true, flow_rate: 1.0 }),
        Err(LabError::OutOfRange { parameter: "flow_rate", .. })
    ));
    assert!(model
        .apply(LabCommand::SetSolventFaucet { open: true, flow_rate: -0.1 })
        .is_err());
    assert!(model.apply(LabCommand::SetEvaporationRate(f64::NAN)).is_err());
    assert!(model.apply(LabCommand::SetWavelength(900.0)).is_err());
    assert_eq!(model.state(), before);
}

#[test]
fn faucet_rate_applies_when_opened() {
    let mut model = ConcentrationModel::new();
    model.apply(LabCommand::SetSolventFaucet { open: true, flow_rate: 0.2 }).unwrap();
    assert!(model.solvent_faucet().is_open());
    assert_relative_eq!(model.solvent_faucet().current_flow_rate(), 0.2);
    model.apply(LabCommand::SetSolventFaucet { open: false, flow_rate: 0.2 }).unwrap();
    assert_eq!(model.solvent_faucet().current_flow_rate(), 0.0);
}

#[test]
fn moves_are_clamped_to_drag_bounds() {
    let mut model = ConcentrationModel::new();
    model.apply(LabCommand::MoveShaker(Vec2::new(1000.0, 0.0))).unwrap();
    assert_eq!(model.shaker().position(), Vec2::new(225.0, 340.0));
    model.apply(LabCommand::MoveDropper(Vec2::new(0.0, 0.0))).unwrap();
    assert_eq!(model.dropper().position(), Vec2::new(0.0, 325.0));
    model.apply(LabCommand::MoveProbe(Vec2::new(-1000.0, 1000.0))).unwrap();
    assert_eq!(model.probe_position(), Vec2::new(-320.0, 400.0));
}

#[test]
fn non_finite_moves_are_rejected() {
    let mut model = ConcentrationModel::new();
    let before = model.shaker().position();
    assert!(model.apply(LabCommand::MoveShaker(Vec2::new(f32::NAN, 400.0))).is_err());
    assert_eq!(model.shaker().position(), before);
}

#[test]
fn probe_reading_follows_the_probe() {
    let mut model = ConcentrationModel::new();
    assert_eq!(model.meter().value(), None);
    model.apply(LabCommand::MoveProbe(Vec2::new(0.0, 50.0))).unwrap();
    assert_eq!(model.meter().value(), Some(0.0));
}

#[test]
fn light_commands_drive_the_detector() {
    let mut model = ConcentrationModel::new();
    model.apply(LabCommand::SetLightMode(LightMode::Variable)).unwrap();
    model.apply(LabCommand::SetWavelength(600.0)).unwrap();
    model.apply(LabCommand::SetDetectorMode(DetectorMode::Absorbance)).unwrap();
    let bl = model.beers_law();
    assert_eq!(bl.wavelength(SoluteId::DrinkMix), 600.0);
    assert_eq!(bl.detector_mode, DetectorMode::Absorbance);

    model.apply(LabCommand::SetLightOn(false)).unwrap();
    assert!(!model.beers_law().light_on);
}

#[test]
fn commands_round_trip_through_json() {
    let cmd = LabCommand::SetSolventFaucet { open: true, flow_rate: 0.1 };
    let json = serde_json::to_string(&cmd).unwrap();
    assert_eq!(serde_json::from_str::<LabCommand>(&json).unwrap(), cmd);
}
