use serde::{Deserialize, Serialize};

const VOLUME_DIVISOR: f64 = 5_000.0;
const DISCOUNT_THRESHOLD_KG: f64 = 10.0;
const STANDARD_RATE_PER_KG: f64 = 120.0;
const DISCOUNT_RATE_PER_KG: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn from_parts(length: Option<f64>, width: Option<f64>, height: Option<f64>) -> Option<Self> {
        match (length, width, height) {
            (Some(length), Some(width), Some(height))
                if length != 0.0 && width != 0.0 && height != 0.0 =>
            {
                Some(Self {
                    length,
                    width,
                    height,
                })
            }
            _ => None,
        }
    }

    pub fn volume_cm3(&self) -> f64 {
        self.length * self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub declared_weight: f64,
    pub volumetric_weight: f64,
    pub billable_weight: f64,
    pub rate_per_kg: f64,
    pub price: f64,
    pub volumetric_applies: bool,
}

pub fn volumetric_weight(dimensions: Option<&Dimensions>) -> f64 {
    dimensions.map_or(0.0, |dims| dims.volume_cm3() / VOLUME_DIVISOR)
}

pub fn billable_weight(declared: f64, dimensions: Option<&Dimensions>) -> f64 {
    declared.max(volumetric_weight(dimensions))
}

pub fn rate_per_kg(billable: f64) -> f64 {
    if billable < DISCOUNT_THRESHOLD_KG {
        STANDARD_RATE_PER_KG
    } else {
        DISCOUNT_RATE_PER_KG
    }
}

pub fn price(declared: f64, dimensions: Option<&Dimensions>) -> f64 {
    let billable = billable_weight(declared, dimensions);
    billable * rate_per_kg(billable)
}

pub fn quote(declared: f64, dimensions: Option<&Dimensions>) -> Quote {
    let volumetric = volumetric_weight(dimensions);
    let billable = declared.max(volumetric);
    let rate = rate_per_kg(billable);

    Quote {
        declared_weight: declared,
        volumetric_weight: volumetric,
        billable_weight: billable,
        rate_per_kg: rate,
        price: billable * rate,
        volumetric_applies: volumetric > declared,
    }
}

pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.2}")
    }
}
