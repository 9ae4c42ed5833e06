use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::{ColorPoint, ColorScheme};
use crate::error::LabError;

/// Catalog key for each selectable solute.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum SoluteId {
    DrinkMix,
    CobaltIINitrate,
    CobaltChloride,
    PotassiumDichromate,
    PotassiumChromate,
    NickelIIChloride,
    CopperSulfate,
    PotassiumPermanganate,
}

impl SoluteId {
    pub const ALL: [SoluteId; 8] = [
        SoluteId::DrinkMix,
        SoluteId::CobaltIINitrate,
        SoluteId::CobaltChloride,
        SoluteId::PotassiumDichromate,
        SoluteId::PotassiumChromate,
        SoluteId::NickelIIChloride,
        SoluteId::CopperSulfate,
        SoluteId::PotassiumPermanganate,
    ];

    pub fn props(&self) -> &'static Solute {
        &SOLUTES[self]
    }

    pub fn name(&self) -> &'static str {
        self.props().name
    }

    pub fn formula(&self) -> &'static str {
        self.props().formula
    }

    pub fn saturated_concentration(&self) -> f64 {
        self.props().saturated_concentration
    }

    pub fn stock_concentration(&self) -> f64 {
        self.props().stock_concentration
    }

    pub fn particles_per_mole(&self) -> f64 {
        self.props().particles_per_mole
    }

    pub fn particle_size(&self) -> f32 {
        self.props().particle_size
    }

    pub fn particle_color(&self) -> Srgb<u8> {
        self.props().particle_color
    }

    /// Moles of solute carried by one solid grain.
    pub fn moles_per_particle(&self) -> f64 {
        1.0 / self.particles_per_mole()
    }
}

impl fmt::Display for SoluteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoluteId {
    type Err = LabError;

    /// Accepts the catalog name or the formula, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SoluteId::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(wanted) || id.formula().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LabError::UnknownSolute(s.to_string()))
    }
}

/// Absorption band used to sample molar absorptivity at a wavelength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Absorption {
    /// Wavelength of peak absorption (nm)
    pub lambda_max: f64,
    /// Molar absorptivity at `lambda_max` (L / (mol cm))
    pub peak: f64,
    /// Gaussian half-width of the band (nm)
    pub band_width: f64,
}

impl Absorption {
    /// Molar absorptivity at `wavelength` (nm).
    pub fn molar_absorptivity(&self, wavelength: f64) -> f64 {
        let x = (wavelength - self.lambda_max) / self.band_width;
        self.peak * (-0.5 * x * x).exp()
    }
}

/// Immutable description of a solute.
#[derive(Clone, Debug)]
pub struct Solute {
    pub name: &'static str,
    pub formula: &'static str,
    /// Maximum dissolved concentration (mol/L)
    pub saturated_concentration: f64,
    /// Concentration of the dropper's stock solution (mol/L)
    pub stock_concentration: f64,
    pub particles_per_mole: f64,
    /// Edge length of a solid grain (view units)
    pub particle_size: f32,
    pub particle_color: Srgb<u8>,
    pub colors: ColorScheme,
    pub absorption: Absorption,
}

struct CatalogEntry {
    id: SoluteId,
    name: &'static str,
    formula: &'static str,
    saturated: f64,
    stock: f64,
    min: (f64, [u8; 3]),
    mid: (f64, [u8; 3]),
    max: [u8; 3],
    particle: [u8; 3],
    lambda_max: f64,
    peak: f64,
}

const PARTICLES_PER_MOLE: f64 = 200.0;
const PARTICLE_SIZE: f32 = 5.0;
const BAND_WIDTH: f64 = 40.0;

const CATALOG: [CatalogEntry; 8] = [
    CatalogEntry {
        id: SoluteId::DrinkMix,
        name: "drink mix",
        formula: "drink mix",
        saturated: 5.96,
        stock: 5.5,
        min: (0.0, [255, 225, 225]),
        mid: (0.05, [255, 0, 0]),
        max: [224, 0, 0],
        particle: [255, 0, 0],
        lambda_max: 500.0,
        peak: 20.0,
    },
    CatalogEntry {
        id: SoluteId::CobaltIINitrate,
        name: "cobalt (II) nitrate",
        formula: "Co(NO3)2",
        saturated: 5.64,
        stock: 5.0,
        min: (0.0, [255, 255, 255]),
        mid: (0.05, [255, 225, 225]),
        max: [255, 0, 0],
        particle: [255, 0, 0],
        lambda_max: 510.0,
        peak: 5.0,
    },
    CatalogEntry {
        id: SoluteId::CobaltChloride,
        name: "cobalt chloride",
        formula: "CoCl2",
        saturated: 4.33,
        stock: 4.0,
        min: (0.0, [255, 255, 255]),
        mid: (0.05, [255, 242, 242]),
        max: [255, 106, 106],
        particle: [255, 106, 106],
        lambda_max: 512.0,
        peak: 4.5,
    },
    CatalogEntry {
        id: SoluteId::PotassiumDichromate,
        name: "potassium dichromate",
        formula: "K2Cr2O7",
        saturated: 0.51,
        stock: 0.5,
        min: (0.0, [255, 255, 255]),
        mid: (0.005, [255, 204, 153]),
        max: [255, 127, 0],
        particle: [255, 127, 0],
        lambda_max: 430.0,
        peak: 450.0,
    },
    CatalogEntry {
        id: SoluteId::PotassiumChromate,
        name: "potassium chromate",
        formula: "K2CrO4",
        saturated: 3.35,
        stock: 3.0,
        min: (0.0, [255, 255, 255]),
        mid: (0.01, [255, 255, 153]),
        max: [255, 255, 0],
        particle: [255, 255, 0],
        lambda_max: 400.0,
        peak: 3000.0,
    },
    CatalogEntry {
        id: SoluteId::NickelIIChloride,
        name: "nickel (II) chloride",
        formula: "NiCl2",
        saturated: 5.21,
        stock: 5.0,
        min: (0.0, [255, 255, 255]),
        mid: (0.2, [234, 244, 234]),
        max: [0, 128, 0],
        particle: [0, 128, 0],
        lambda_max: 395.0,
        peak: 5.0,
    },
    CatalogEntry {
        id: SoluteId::CopperSulfate,
        name: "copper sulfate",
        formula: "CuSO4",
        saturated: 1.38,
        stock: 1.0,
        min: (0.0, [255, 255, 255]),
        mid: (0.2, [230, 230, 255]),
        max: [30, 144, 255],
        particle: [30, 144, 255],
        lambda_max: 780.0,
        peak: 12.0,
    },
    CatalogEntry {
        id: SoluteId::PotassiumPermanganate,
        name: "potassium permanganate",
        formula: "KMnO4",
        saturated: 0.48,
        stock: 0.4,
        min: (0.0, [255, 255, 255]),
        mid: (0.01, [255, 0, 255]),
        max: [80, 0, 120],
        particle: [80, 0, 120],
        lambda_max: 525.0,
        peak: 2400.0,
    },
];

pub static SOLUTES: Lazy<HashMap<SoluteId, Solute>> = Lazy::new(|| {
    CATALOG
        .iter()
        .map(|s| {
            let solute = Solute {
                name: s.name,
                formula: s.formula,
                saturated_concentration: s.saturated,
                stock_concentration: s.stock,
                particles_per_mole: PARTICLES_PER_MOLE,
                particle_size: PARTICLE_SIZE,
                particle_color: Srgb::new(s.particle[0], s.particle[1], s.particle[2]),
                colors: ColorScheme::new(
                    ColorPoint::new(s.min.0, s.min.1),
                    ColorPoint::new(s.mid.0, s.mid.1),
                    ColorPoint::new(s.saturated, s.max),
                ),
                absorption: Absorption {
                    lambda_max: s.lambda_max,
                    peak: s.peak,
                    band_width: BAND_WIDTH,
                },
            };
            (s.id, solute)
        })
        .collect()
});
